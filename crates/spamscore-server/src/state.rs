use crate::config::ServerConfig;
use metrics_exporter_prometheus::PrometheusHandle;
use spamscore_classifiers::SpamModel;
use std::sync::Arc;
use tracing::{error, info};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Loaded model, absent when loading failed at startup
    pub model: Option<Arc<SpamModel>>,

    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Prometheus handle for rendering `/metrics`
    pub metrics_handle: Option<PrometheusHandle>,
}

impl AppState {
    /// Build state around an already constructed model
    pub fn new(config: ServerConfig, model: Option<SpamModel>) -> Self {
        Self {
            model: model.map(Arc::new),
            config: Arc::new(config),
            metrics_handle: None,
        }
    }

    /// Load the model named in the configuration.
    ///
    /// A load failure is logged and leaves the model absent for the lifetime
    /// of the process; `/score` then answers 500.
    pub fn load(config: ServerConfig) -> Self {
        let model = match SpamModel::load(&config.model) {
            Ok(model) => {
                info!("Model ready: {:?}", model);
                Some(model)
            }
            Err(e) => {
                error!("Error loading model: {}", e);
                metrics::counter!("spamscore_errors_total", "kind" => "model_load").increment(1);
                None
            }
        };

        Self::new(config, model)
    }

    /// Attach the Prometheus handle installed by the binary
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics_handle = Some(handle);
        self
    }

    /// Whether a model is available for scoring
    pub fn model_loaded(&self) -> bool {
        self.model.is_some()
    }
}
