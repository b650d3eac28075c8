use chrono::{DateTime, Local};
use color_eyre::Result;
use space_weather_explorer::catalog::DatasetCatalog;
use space_weather_explorer::config::AppConfig;
use space_weather_explorer::donki::{DateWindow, DonkiClient, EventAggregator, EventSource, FetchReport};
use space_weather_explorer::globe::{self, GlobeModel};
use space_weather_explorer::query::{build_dataset_urls, DatasetUrl, SelectionOptions};

/// Everything the globe panel needs after one refresh.
#[derive(Debug, Clone)]
pub struct GlobeView {
    pub window: DateWindow,
    pub report: FetchReport,
    pub model: GlobeModel,
    pub fetched_at: DateTime<Local>,
}

/// Request handlers behind the dashboard. Each call receives a complete
/// request value and returns a complete result; nothing is cached.
#[derive(Debug)]
pub struct AppActions<S = DonkiClient> {
    pub config: AppConfig,
    pub catalog: DatasetCatalog,
    aggregator: EventAggregator<S>,
}

impl AppActions<DonkiClient> {
    /// Loads the dataset catalog and builds the DONKI client. A missing or
    /// unreadable catalog is fatal, as is a client that cannot be built.
    pub fn initialize(config: AppConfig) -> Result<Self> {
        let catalog = DatasetCatalog::load(&config.catalog_path)?;
        let client = DonkiClient::from_config(&config)?;
        Ok(Self::with_source(config, catalog, client))
    }
}

impl<S: EventSource> AppActions<S> {
    pub const fn with_source(config: AppConfig, catalog: DatasetCatalog, source: S) -> Self {
        Self {
            config,
            catalog,
            aggregator: EventAggregator::new(source),
        }
    }

    pub async fn refresh_globe(&self, window: DateWindow) -> GlobeView {
        let report = self.aggregator.fetch_report(window).await;
        let model = globe::render(&report.events);
        GlobeView {
            window,
            report,
            model,
            fetched_at: Local::now(),
        }
    }

    pub fn generate_urls(&self, options: &SelectionOptions) -> Vec<DatasetUrl> {
        build_dataset_urls(&self.config.latis_base_url, &self.catalog, options)
    }
}
