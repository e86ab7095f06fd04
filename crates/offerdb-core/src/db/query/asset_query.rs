use crate::db::query::Criterion;

///
/// AssetQuery
///
/// One catalog request: filter plus the local window derived for a single
/// definition. `offset: None` means 0, `limit: None` means unbounded.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AssetQuery {
    pub filter: Vec<Criterion>,
    pub offset: Option<u64>,
    pub limit: Option<u64>,
}

impl AssetQuery {
    #[must_use]
    pub const fn new(filter: Vec<Criterion>) -> Self {
        Self {
            filter,
            offset: None,
            limit: None,
        }
    }

    #[must_use]
    pub fn offset(mut self, offset: Option<u64>) -> Self {
        self.offset = offset;
        self
    }

    #[must_use]
    pub fn limit(mut self, limit: Option<u64>) -> Self {
        self.limit = limit;
        self
    }

    #[must_use]
    pub fn effective_offset(&self) -> u64 {
        self.offset.unwrap_or(0)
    }
}
