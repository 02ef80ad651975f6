use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::catalog::{load_catalog, Catalog, Record};
use crate::core::config::{AppConfig, AppPaths, ConfigService};
use crate::embedding::{build_embedder, Embedder, EmbeddingEncoder};
use crate::llm::LlmService;
use crate::rag::{CatalogIndex, Retriever};

pub mod error;

use error::InitializationError;

/// Application state shared by every handler.
///
/// Everything here is built once before the listener binds and is
/// read-only afterwards, so handlers share it without locks.
#[derive(Clone)]
pub struct AppState {
    pub paths: Arc<AppPaths>,
    pub config: ConfigService,
    pub settings: Arc<AppConfig>,
    pub retriever: Retriever,
    pub llm: LlmService,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Initializes the application state.
    ///
    /// 1. Load and validate configuration
    /// 2. Load the catalog CSV
    /// 3. Build the embedding model and the LLM client
    /// 4. Encode every catalog chunk and build the index
    ///
    /// Any failure is fatal; the server never starts half-built.
    pub async fn initialize(config: ConfigService) -> Result<Arc<Self>, InitializationError> {
        let paths = config.shared_paths();
        let settings = config.load_settings()?;
        if let Ok(value) = serde_json::to_value(&settings) {
            debug!(
                "Effective configuration: {}",
                config.redact_sensitive_values(&value)
            );
        }

        let catalog_path = paths.resolve(&settings.catalog.path);
        info!("Loading catalog from {}", catalog_path.display());
        let records = load_catalog(&catalog_path)?;
        if records.is_empty() {
            warn!(
                "Catalog {} has no rows; retrieval will be unavailable",
                catalog_path.display()
            );
        }

        let embedder = build_embedder(&settings.embedding)?;
        let llm = LlmService::from_config(&settings.llm)?;

        Self::from_parts(paths, config, settings, records, embedder, llm).await
    }

    /// Assembles state from already-built parts. Startup goes through
    /// [`AppState::initialize`]; tests call this with stub providers.
    pub async fn from_parts(
        paths: Arc<AppPaths>,
        config: ConfigService,
        settings: AppConfig,
        records: Vec<Record>,
        embedder: Arc<dyn Embedder>,
        llm: LlmService,
    ) -> Result<Arc<Self>, InitializationError> {
        let encoder = EmbeddingEncoder::new(
            embedder,
            settings.embedding.batch_size,
            settings.embedding.max_concurrency,
        );
        let index = CatalogIndex::build(records, &encoder).await?;
        let retriever = Retriever::new(Arc::new(index), encoder, settings.retrieval.top_k);

        Ok(Arc::new(AppState {
            paths,
            config,
            settings: Arc::new(settings),
            retriever,
            llm,
            started_at: Utc::now(),
        }))
    }

    pub fn catalog(&self) -> &Catalog {
        self.retriever.index().catalog()
    }

    pub fn uptime_secs(&self) -> i64 {
        (Utc::now() - self.started_at).num_seconds().max(0)
    }
}
