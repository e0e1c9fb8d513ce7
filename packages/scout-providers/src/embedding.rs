use std::time::Duration;

use color_eyre::{Result, eyre};
use reqwest::Client;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
	data: Vec<EmbeddingItem>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingItem {
	index: Option<usize>,
	embedding: Vec<f32>,
}

/// One embeddings request against an OpenAI-style `/embeddings` endpoint.
/// Returns one vector per input text, in input order.
pub async fn embed(
	cfg: &scout_config::EmbeddingProviderConfig,
	texts: &[String],
) -> Result<Vec<Vec<f32>>> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let body = serde_json::json!({
		"model": cfg.model,
		"input": texts,
		"dimensions": cfg.dimensions,
	});
	let res = client
		.post(url)
		.headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
		.json(&body)
		.send()
		.await?;
	let response: EmbeddingResponse = res.error_for_status()?.json().await?;

	order_embeddings(response, texts.len())
}

/// Providers may return items out of order; the optional `index` field is
/// authoritative when present, the item's position otherwise.
fn order_embeddings(response: EmbeddingResponse, expected: usize) -> Result<Vec<Vec<f32>>> {
	if response.data.len() != expected {
		return Err(eyre::eyre!(
			"Embedding response carries {} vectors for {expected} inputs.",
			response.data.len()
		));
	}

	let mut indexed: Vec<(usize, Vec<f32>)> = response
		.data
		.into_iter()
		.enumerate()
		.map(|(position, item)| (item.index.unwrap_or(position), item.embedding))
		.collect();

	indexed.sort_by_key(|(index, _)| *index);

	Ok(indexed.into_iter().map(|(_, embedding)| embedding).collect())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn orders_embeddings_by_index() {
		let response = EmbeddingResponse {
			data: vec![
				EmbeddingItem { index: Some(1), embedding: vec![2.0, 3.0] },
				EmbeddingItem { index: Some(0), embedding: vec![0.5, 1.5] },
			],
		};
		let ordered = order_embeddings(response, 2).expect("Failed to order embeddings.");

		assert_eq!(ordered, vec![vec![0.5, 1.5], vec![2.0, 3.0]]);
	}

	#[test]
	fn falls_back_to_position_without_indices() {
		let response = EmbeddingResponse {
			data: vec![
				EmbeddingItem { index: None, embedding: vec![1.0] },
				EmbeddingItem { index: None, embedding: vec![2.0] },
			],
		};
		let ordered = order_embeddings(response, 2).expect("Failed to order embeddings.");

		assert_eq!(ordered, vec![vec![1.0], vec![2.0]]);
	}

	#[test]
	fn rejects_vector_count_mismatch() {
		let response =
			EmbeddingResponse { data: vec![EmbeddingItem { index: None, embedding: vec![1.0] }] };

		assert!(order_embeddings(response, 2).is_err());
	}
}
