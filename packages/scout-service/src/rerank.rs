use std::collections::HashSet;

use serde_json::Value;
use tracing::warn;

use scout_domain::{
	rank_output::{self, RankParse},
	resolve,
};
use scout_storage::models::Assessment;

use crate::ScoutService;

/// Size of the final ranked list, pool permitting.
pub(crate) const FINAL_K: usize = 10;

impl ScoutService {
	/// Reorders candidates with one language-model call. Infallible by
	/// contract: a failed call, unparseable output, or zero resolved names
	/// all degrade to the first candidates in retrieval order. The result
	/// always holds `min(10, pool)` entries with unique normalized names,
	/// every one drawn from the input pool.
	pub async fn rerank(&self, query: &str, candidates: &[Assessment]) -> Vec<Assessment> {
		if candidates.is_empty() {
			return Vec::new();
		}

		let messages = build_rerank_messages(query, candidates);
		let raw = match self.providers.completion.complete(&self.cfg.providers.llm, &messages).await
		{
			Ok(raw) => raw,
			Err(err) => {
				warn!(error = %err, "Rerank completion failed; falling back to retrieval order.");

				return fallback(candidates);
			},
		};
		let mut names = match rank_output::parse_ranked_names(&raw) {
			RankParse::Parsed(names) => names,
			RankParse::Unparseable => {
				warn!("Rerank output had no parseable names; falling back to retrieval order.");

				return fallback(candidates);
			},
		};

		// Over-eager models get only their first ten names considered.
		names.truncate(FINAL_K);

		let pool_names: Vec<String> =
			candidates.iter().map(|candidate| candidate.name.clone()).collect();
		let mut picked = resolve::resolve_ranked(&names, &pool_names);

		if picked.is_empty() {
			warn!("No parsed names resolved to candidates; falling back to retrieval order.");

			return fallback(candidates);
		}

		pad_from_pool(&mut picked, &pool_names);

		picked.into_iter().map(|index| candidates[index].clone()).collect()
	}
}

fn fallback(candidates: &[Assessment]) -> Vec<Assessment> {
	candidates.iter().take(FINAL_K).cloned().collect()
}

/// Appends unselected candidates in retrieval order until the list reaches
/// `min(10, pool)`, skipping names already present.
fn pad_from_pool(picked: &mut Vec<usize>, pool_names: &[String]) {
	let final_k = FINAL_K.min(pool_names.len());
	let mut taken: HashSet<String> =
		picked.iter().map(|index| resolve::normalize_name(&pool_names[*index])).collect();

	for (index, name) in pool_names.iter().enumerate() {
		if picked.len() >= final_k {
			break;
		}

		let normalized = resolve::normalize_name(name);

		if taken.contains(&normalized) {
			continue;
		}

		taken.insert(normalized);
		picked.push(index);
	}

	picked.truncate(final_k);
}

fn build_rerank_messages(query: &str, candidates: &[Assessment]) -> Vec<Value> {
	let system_prompt = format!(
		"You are a reranking assistant for assessments. Follow these rules strictly:\n\
		1. Return ONLY assessment NAMES wrapped in || (e.g., ||Java Coding Test||)\n\
		2. List exactly {FINAL_K} names in relevance order\n\
		3. Never add explanations or formatting\n\
		4. Use ONLY these delimiters: ||\n\
		5. Never use markdown\n\
		6. Maintain exact spelling from context\n\
		Example response:\n\
		||Assessment 1||\n||Assessment 2||\n..."
	);
	let mut user_prompt = format!("Reorder these assessments for '{query}':\n");

	for (ordinal, candidate) in candidates.iter().enumerate() {
		let duration = candidate
			.duration_minutes()
			.map(|minutes| minutes.to_string())
			.unwrap_or_else(|| "unknown".to_string());
		let entry = format!(
			"Assessment {}:\nName: {}\nContext: {}\nDuration: {} mins\nTest Type: {}\n\
			Remote Testing: {}\nAdaptive Support: {}\n",
			ordinal + 1,
			candidate.name,
			candidate.description,
			duration,
			candidate.test_type_list().join(", "),
			candidate.remote_support_text(),
			candidate.adaptive_support_text(),
		);

		user_prompt.push_str(&entry);
	}

	user_prompt.push_str(&format!("\nReturn only the top {FINAL_K} sorted names."));

	vec![
		serde_json::json!({ "role": "system", "content": system_prompt }),
		serde_json::json!({ "role": "user", "content": user_prompt }),
	]
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn padding_fills_to_ten_without_duplicates() {
		let pool_names: Vec<String> = (0..12).map(|n| format!("Assessment {n}")).collect();
		let mut picked = vec![4, 2];

		pad_from_pool(&mut picked, &pool_names);

		assert_eq!(picked, vec![4, 2, 0, 1, 3, 5, 6, 7, 8, 9]);
	}

	#[test]
	fn padding_stops_at_pool_size() {
		let pool_names: Vec<String> = (0..3).map(|n| format!("Assessment {n}")).collect();
		let mut picked = vec![2];

		pad_from_pool(&mut picked, &pool_names);

		assert_eq!(picked, vec![2, 0, 1]);
	}

	#[test]
	fn padding_skips_duplicate_normalized_names() {
		let pool_names =
			vec!["Java Coding Test".to_string(), "JAVA CODING TEST ".to_string()];
		let mut picked = vec![0];

		pad_from_pool(&mut picked, &pool_names);

		assert_eq!(picked, vec![0]);
	}

	#[test]
	fn prompt_lists_every_candidate_once() {
		let candidates: Vec<Assessment> = (0..3)
			.map(|n| Assessment {
				name: format!("Assessment {n}"),
				description: "desc".to_string(),
				duration: None,
				test_type: None,
				remote_testing: None,
				adaptive_support: None,
				url: format!("https://example.com/{n}"),
			})
			.collect();
		let messages = build_rerank_messages("java developers", &candidates);
		let user = messages[1]["content"].as_str().expect("User prompt must be text.");

		assert!(user.contains("Name: Assessment 0"));
		assert!(user.contains("Name: Assessment 2"));
		assert!(user.contains("java developers"));
	}
}
