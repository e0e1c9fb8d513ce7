mod error;

pub use error::{Error, Result};

use std::{env, thread, time::Duration};

use qdrant_client::{
	Qdrant,
	qdrant::{CreateCollectionBuilder, Distance, VectorParamsBuilder},
};
use tokio::{runtime::Builder, time};
use uuid::Uuid;

pub fn env_qdrant_url() -> Option<String> {
	env::var("SCOUT_QDRANT_URL").ok()
}

/// A uniquely named Qdrant collection for one integration test. Dropped on
/// `cleanup`, or best-effort from `Drop` when a test panics before cleanup.
pub struct TestCollection {
	url: String,
	name: String,
	cleaned: bool,
}
impl TestCollection {
	pub async fn new(url: &str, vector_dim: u64) -> Result<Self> {
		let name = format!("scout_test_{}", Uuid::new_v4().simple());
		let client = connect(url)?;
		let builder = CreateCollectionBuilder::new(name.clone())
			.vectors_config(VectorParamsBuilder::new(vector_dim, Distance::Cosine));

		client.create_collection(builder).await?;

		Ok(Self { url: url.to_string(), name, cleaned: false })
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub async fn cleanup(mut self) -> Result<()> {
		self.cleanup_inner().await
	}

	async fn cleanup_inner(&mut self) -> Result<()> {
		if self.cleaned {
			return Ok(());
		}

		delete_collection(&self.url, &self.name).await?;

		self.cleaned = true;

		Ok(())
	}
}
impl Drop for TestCollection {
	fn drop(&mut self) {
		if self.cleaned {
			return;
		}

		let url = self.url.clone();
		let name = self.name.clone();
		let cleanup_thread = thread::spawn(move || {
			let runtime = match Builder::new_current_thread().enable_all().build() {
				Ok(runtime) => runtime,
				Err(err) => {
					eprintln!("Test collection cleanup failed: {err}.");

					return;
				},
			};

			if let Err(err) = runtime.block_on(delete_collection(&url, &name)) {
				eprintln!("Test collection cleanup failed: {err}.");
			}
		});
		let _ = cleanup_thread.join();
	}
}

fn connect(url: &str) -> Result<Qdrant> {
	Qdrant::from_url(url)
		.build()
		.map_err(|err| Error::Message(format!("Failed to build Qdrant client: {err}.")))
}

async fn delete_collection(url: &str, name: &str) -> Result<()> {
	let client = connect(url)?;

	time::timeout(Duration::from_secs(10), client.delete_collection(name.to_string()))
		.await
		.map_err(|_| Error::Message(format!("Timed out deleting Qdrant collection {name:?}.")))?
		.map_err(|err| {
			Error::Message(format!("Failed to delete Qdrant collection {name:?}: {err}."))
		})?;

	Ok(())
}
