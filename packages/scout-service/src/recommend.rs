use serde::{Deserialize, Serialize};
use tracing::{Instrument, debug, info_span};
use uuid::Uuid;

use scout_storage::models::Assessment;

use crate::{ScoutService, ServiceResult};

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
	pub query: String,
	#[serde(default)]
	pub max_duration: Option<i64>,
	/// Accepted for wire compatibility; nothing filters on it.
	#[serde(default)]
	pub test_type: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RecommendResponse {
	pub recommended_assessments: Vec<RecommendedAssessment>,
}

#[derive(Debug, Serialize)]
pub struct RecommendedAssessment {
	pub url: String,
	pub adaptive_support: String,
	pub description: String,
	pub duration: Option<i64>,
	pub remote_support: String,
	pub test_type: Vec<String>,
}

impl ScoutService {
	/// The public pipeline: retrieve -> rerank -> shape. Retrieval failures
	/// propagate; the reranker degrades internally and never fails here.
	pub async fn recommend(&self, req: RecommendRequest) -> ServiceResult<RecommendResponse> {
		let request_id = Uuid::new_v4();
		let span = info_span!("recommend", %request_id);

		async move {
			let candidates = self
				.retrieve(&req.query, self.cfg.recommend.candidate_k, req.max_duration)
				.await?;
			let ranked = self.rerank(&req.query, &candidates).await;

			debug!(
				candidates = candidates.len(),
				ranked = ranked.len(),
				"Recommendation pipeline finished."
			);

			Ok(RecommendResponse {
				recommended_assessments: ranked.iter().map(shape_assessment).collect(),
			})
		}
		.instrument(span)
		.await
	}
}

fn shape_assessment(assessment: &Assessment) -> RecommendedAssessment {
	RecommendedAssessment {
		url: assessment.url.clone(),
		adaptive_support: assessment.adaptive_support_text(),
		description: assessment.description.clone(),
		duration: assessment.duration_minutes(),
		remote_support: assessment.remote_support_text(),
		test_type: assessment.test_type_list(),
	}
}
