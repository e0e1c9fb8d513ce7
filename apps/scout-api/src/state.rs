use std::sync::Arc;

use scout_service::ScoutService;
use scout_storage::qdrant::QdrantStore;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<ScoutService>,
}
impl AppState {
	pub fn new(config: scout_config::Config) -> color_eyre::Result<Self> {
		let qdrant = QdrantStore::new(&config.storage.qdrant)?;
		let service = ScoutService::new(config, qdrant);

		Ok(Self { service: Arc::new(service) })
	}

	pub fn with_service(service: ScoutService) -> Self {
		Self { service: Arc::new(service) }
	}
}
