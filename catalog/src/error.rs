use crate::model::EntityId;
use thiserror::Error;

/// Step of the index bootstrap that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum StartupStage {
    #[strum(serialize = "universe count")]
    Count,
    #[strum(serialize = "full listing")]
    Listing,
}

#[derive(Error, Debug)]
pub enum CatalogError {
    /// The entity index could not be loaded; nothing useful can be shown.
    #[error("failed to load catalog index ({stage}): {source:#}")]
    Startup {
        stage: StartupStage,
        #[source]
        source: anyhow::Error,
    },

    #[error("failed to fetch detail for entity {id}: {source:#}")]
    DetailFetch {
        id: EntityId,
        #[source]
        source: anyhow::Error,
    },

    #[error("failed to fetch members of category '{label}': {source:#}")]
    CategoryFetch {
        label: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Configuration parse error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Unknown generation: {0}")]
    UnknownGeneration(u8),

    #[error("Invalid sort key: {0}")]
    InvalidSortKey(String),
}

impl CatalogError {
    /// Whether the error leaves the catalog without a usable index.
    pub fn is_fatal(&self) -> bool {
        matches!(self, CatalogError::Startup { .. })
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
