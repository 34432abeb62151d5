use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScreenError {
    #[error("failed to read catalogue file {path}: {source}")]
    CatalogueIo {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse catalogue JSON: {0}")]
    CatalogueJson(#[from] serde_json::Error),
    #[error("no satellite data available after loading catalogue")]
    NoSatelliteData,
}

pub type Result<T> = std::result::Result<T, ScreenError>;
