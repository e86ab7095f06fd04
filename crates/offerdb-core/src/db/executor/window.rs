use crate::db::query::Range;

///
/// LocalWindow
///
/// Catalog window for one definition: `offset` into its matching assets and
/// the number of assets to fetch from there.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct LocalWindow {
    pub(crate) offset: Option<u64>,
    pub(crate) limit: u64,
}

/// Derive the local window for a definition with `count` matching assets.
///
/// Returns `None` when the global window starts at or past this definition's
/// last asset (`remaining_skip >= count`).
///
/// The cap compares against the absolute global limit, not the quota left
/// after earlier definitions. Later definitions can therefore be asked for
/// more assets than the window still needs; the stream's emission cap trims
/// the excess. Kept as is because changing it alters the catalog requests
/// callers observe.
#[must_use]
pub(crate) fn compute_local_window(
    count: u64,
    seen: u64,
    remaining_skip: i64,
    range: Range,
) -> Option<LocalWindow> {
    if remaining_skip >= signed(count) {
        return None;
    }

    let offset = u64::try_from(remaining_skip).ok().filter(|skip| *skip > 0);
    let limit = if count.saturating_add(seen) > range.limit() {
        range.limit()
    } else {
        count
    };

    Some(LocalWindow { offset, limit })
}

/// Widen an asset count into the signed skip domain.
#[must_use]
pub(crate) fn signed(count: u64) -> i64 {
    i64::try_from(count).unwrap_or(i64::MAX)
}

///
/// TESTS
///
