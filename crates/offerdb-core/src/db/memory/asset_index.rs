use crate::{
    db::{
        query::{AssetQuery, Criterion},
        spi::{AssetCatalog, AssetStream},
    },
    error::InternalError,
    model::Asset,
};

///
/// MemoryAssetIndex
///

#[derive(Clone, Debug, Default)]
pub struct MemoryAssetIndex {
    assets: Vec<Asset>,
}

impl MemoryAssetIndex {
    #[must_use]
    pub const fn new() -> Self {
        Self { assets: Vec::new() }
    }

    /// Build from assets in catalog order. Later duplicates replace earlier
    /// ones in place.
    #[must_use]
    pub fn with_assets(assets: impl IntoIterator<Item = Asset>) -> Self {
        let mut index = Self::new();
        for asset in assets {
            index.insert(asset);
        }

        index
    }

    /// Insert or replace by id; a replaced asset keeps its position.
    pub fn insert(&mut self, asset: Asset) -> Option<Asset> {
        match self.assets.iter_mut().find(|existing| existing.id == asset.id) {
            Some(existing) => Some(std::mem::replace(existing, asset)),
            None => {
                self.assets.push(asset);
                None
            }
        }
    }

    pub fn remove(&mut self, id: &str) -> Option<Asset> {
        let position = self.assets.iter().position(|asset| asset.id == id)?;

        Some(self.assets.remove(position))
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Asset> {
        self.assets.iter().find(|asset| asset.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    fn matching<'a>(&'a self, filter: &'a [Criterion]) -> impl Iterator<Item = &'a Asset> + 'a {
        self.assets
            .iter()
            .filter(move |asset| filter.iter().all(|criterion| criterion.matches(asset)))
    }
}

impl AssetCatalog for MemoryAssetIndex {
    fn count(&self, filter: &[Criterion]) -> Result<u64, InternalError> {
        let count = self.matching(filter).count();

        Ok(u64::try_from(count).unwrap_or(u64::MAX))
    }

    fn query<'a>(&'a self, query: &AssetQuery) -> Result<AssetStream<'a>, InternalError> {
        let offset = usize::try_from(query.effective_offset()).unwrap_or(usize::MAX);
        let limit = query
            .limit
            .map_or(usize::MAX, |limit| usize::try_from(limit).unwrap_or(usize::MAX));
        let filter = query.filter.clone();

        let assets = self
            .assets
            .iter()
            .filter(move |asset| filter.iter().all(|criterion| criterion.matches(asset)))
            .skip(offset)
            .take(limit)
            .cloned()
            .map(Ok);

        Ok(Box::new(assets))
    }
}
