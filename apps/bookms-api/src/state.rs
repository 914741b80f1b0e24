use std::sync::Arc;

use bookms_config::Config;
use bookms_service::BookService;
use bookms_storage::{db::Db, seed};

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<BookService>,
}
impl AppState {
	/// Connects to Postgres, bootstraps the schema, and optionally reseeds the book log.
	pub async fn new(config: Config, reseed: bool) -> color_eyre::Result<Self> {
		let db = Db::connect(&config.storage.postgres).await?;

		db.ensure_schema().await?;

		if reseed {
			let inserted = seed::replace_with_seed(&db).await?;

			tracing::info!(inserted, "Book log replaced with seed records.");
		}

		Ok(Self::from_service(BookService::new(config, db)))
	}

	pub fn from_service(service: BookService) -> Self {
		Self { service: Arc::new(service) }
	}
}
