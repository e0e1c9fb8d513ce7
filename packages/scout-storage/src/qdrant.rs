use qdrant_client::{
	Payload, Qdrant,
	qdrant::{
		CreateCollectionBuilder, Distance, PointStruct, Query, QueryPointsBuilder,
		UpsertPointsBuilder, VectorParamsBuilder,
	},
};
use serde_json::Value;
use tracing::warn;

use crate::{
	Result,
	models::{self, Assessment},
};

pub struct QdrantStore {
	pub client: Qdrant,
	pub collection: String,
	pub vector_dim: u32,
}
impl QdrantStore {
	pub fn new(cfg: &scout_config::Qdrant) -> Result<Self> {
		let mut builder = Qdrant::from_url(&cfg.url);

		if let Some(api_key) = cfg.api_key.as_deref() {
			builder = builder.api_key(api_key);
		}

		let client = builder.build()?;

		Ok(Self { client, collection: cfg.collection.clone(), vector_dim: cfg.vector_dim })
	}

	/// Idempotent collection bootstrap. The serving path only reads; this is
	/// for the ingestion job and for integration tests.
	pub async fn ensure_collection(&self) -> Result<()> {
		if self.client.collection_exists(&self.collection).await? {
			return Ok(());
		}

		let builder = CreateCollectionBuilder::new(self.collection.clone()).vectors_config(
			VectorParamsBuilder::new(u64::from(self.vector_dim), Distance::Cosine),
		);

		self.client.create_collection(builder).await?;

		Ok(())
	}

	pub async fn upsert_assessments(
		&self,
		items: Vec<(u64, Vec<f32>, Assessment)>,
	) -> Result<()> {
		let mut points = Vec::with_capacity(items.len());

		for (id, vector, assessment) in items {
			let mut payload = Payload::new();
			let Value::Object(fields) = serde_json::to_value(&assessment)? else {
				continue;
			};

			for (key, value) in fields {
				payload.insert(key, value);
			}

			points.push(PointStruct::new(id, vector, payload));
		}

		self.client
			.upsert_points(UpsertPointsBuilder::new(self.collection.clone(), points).wait(true))
			.await?;

		Ok(())
	}

	/// Nearest-neighbor search returning decoded payload records in the
	/// store's similarity order. Malformed payloads are skipped with a
	/// warning rather than failing the whole search.
	pub async fn search_assessments(&self, vector: Vec<f32>, limit: u64) -> Result<Vec<Assessment>> {
		let query = QueryPointsBuilder::new(self.collection.clone())
			.query(Query::new_nearest(vector))
			.with_payload(true)
			.limit(limit);
		let response = self.client.query(query).await?;
		let mut assessments = Vec::with_capacity(response.result.len());

		for point in &response.result {
			match models::assessment_from_payload(&point.payload) {
				Some(assessment) => assessments.push(assessment),
				None => {
					warn!("Search hit payload is not a usable assessment; skipping point.");
				},
			}
		}

		Ok(assessments)
	}
}
