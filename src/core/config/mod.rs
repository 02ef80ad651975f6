use std::path::PathBuf;

use thiserror::Error;

pub mod paths;
pub mod service;
pub mod settings;
pub mod validation;

pub use paths::AppPaths;
pub use service::ConfigService;
pub use settings::{
    AppConfig, CatalogConfig, EmbeddingConfig, EmbeddingProviderKind, LlmConfig, LlmProviderKind,
    RetrievalConfig, ServerConfig,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("{0}")]
    Invalid(String),
    #[error("config does not match the expected shape: {0}")]
    Deserialize(#[source] serde_json::Error),
}
