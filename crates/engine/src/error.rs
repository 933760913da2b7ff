use catalog::CatalogError;
use layers::basemap::BasemapError;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("catalog rejected: {0}")]
    Catalog(#[from] CatalogError),

    #[error("basemap synthesis failed: {0}")]
    Basemap(#[from] BasemapError),
}
