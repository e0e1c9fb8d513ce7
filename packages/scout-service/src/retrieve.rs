use scout_storage::models::Assessment;

use crate::{ScoutService, ServiceError, ServiceResult};

impl ScoutService {
	/// Embeds the query, runs nearest-neighbor search, and applies the
	/// optional duration ceiling. Results keep the store's similarity order;
	/// this is the pre-rerank draft, not the final ranking.
	pub async fn retrieve(
		&self,
		query: &str,
		top_k: u32,
		max_duration: Option<i64>,
	) -> ServiceResult<Vec<Assessment>> {
		let vector = self.embed_query(query).await?;
		let candidates = self
			.providers
			.index
			.search(vector, u64::from(top_k))
			.await
			.map_err(|err| ServiceError::Search { message: err.to_string() })?;

		Ok(apply_duration_filter(candidates, max_duration))
	}

	async fn embed_query(&self, query: &str) -> ServiceResult<Vec<f32>> {
		let embeddings = self
			.providers
			.embedding
			.embed(&self.cfg.providers.embedding, std::slice::from_ref(&query.to_string()))
			.await
			.map_err(|err| ServiceError::Embedding { message: err.to_string() })?;
		let vector = embeddings.into_iter().next().ok_or_else(|| ServiceError::Embedding {
			message: "Embedding provider returned no vectors.".to_string(),
		})?;

		if vector.len() != self.cfg.storage.qdrant.vector_dim as usize {
			return Err(ServiceError::Embedding {
				message: "Embedding vector dimension mismatch.".to_string(),
			});
		}

		Ok(vector)
	}
}

/// Hard filter over the fetched set; never a second vector query. A missing
/// or unparseable duration coerces to zero, so such candidates survive any
/// ceiling.
fn apply_duration_filter(candidates: Vec<Assessment>, max_duration: Option<i64>) -> Vec<Assessment> {
	let Some(ceiling) = max_duration else {
		return candidates;
	};

	candidates
		.into_iter()
		.filter(|candidate| candidate.duration_minutes().unwrap_or(0) <= ceiling)
		.collect()
}
