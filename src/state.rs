use crate::config::AppConfig;
use crate::nutrition::{NutritionSource, ProxyNutritionClient};
use crate::vision::{backends_from_config, VisionClassifier};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub classifier: Arc<VisionClassifier>,
    pub nutrition: Arc<dyn NutritionSource>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = AppConfig::from_env()?;

        let backends = backends_from_config(&config.vision)?;
        if backends.is_empty() {
            tracing::warn!("no vision provider configured, every photo will be reported unavailable");
        }
        let classifier = Arc::new(VisionClassifier::new(backends));

        let nutrition = Arc::new(ProxyNutritionClient::from_config(&config.nutrition)?)
            as Arc<dyn NutritionSource>;

        tracing::info!(
            backends = classifier.backend_count(),
            proxy = %config.nutrition.proxy_url,
            "audit state ready"
        );

        Ok(Self {
            classifier,
            nutrition,
        })
    }

    #[cfg(test)]
    pub fn fake(
        backends: Vec<Arc<dyn crate::vision::ClassifierBackend>>,
        nutrition: Arc<dyn NutritionSource>,
    ) -> Self {
        Self {
            classifier: Arc::new(VisionClassifier::new(backends)),
            nutrition,
        }
    }
}
