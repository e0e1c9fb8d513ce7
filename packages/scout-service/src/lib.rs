pub mod recommend;

mod rerank;
mod retrieve;

use std::{future::Future, pin::Pin, sync::Arc};

use serde_json::Value;

pub use recommend::{RecommendRequest, RecommendResponse, RecommendedAssessment};

use scout_config::{Config, EmbeddingProviderConfig, LlmProviderConfig};
use scout_providers::{completion, embedding};
use scout_storage::{models::Assessment, qdrant::QdrantStore};

pub type ServiceResult<T> = Result<T, ServiceError>;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub trait EmbeddingProvider
where
	Self: Send + Sync,
{
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, color_eyre::Result<Vec<Vec<f32>>>>;
}

pub trait CompletionProvider
where
	Self: Send + Sync,
{
	fn complete<'a>(
		&'a self,
		cfg: &'a LlmProviderConfig,
		messages: &'a [Value],
	) -> BoxFuture<'a, color_eyre::Result<String>>;
}

pub trait VectorIndex
where
	Self: Send + Sync,
{
	fn search<'a>(
		&'a self,
		vector: Vec<f32>,
		limit: u64,
	) -> BoxFuture<'a, color_eyre::Result<Vec<Assessment>>>;
}

/// Fatal pipeline failures. A degraded rerank is not one of them; the
/// reconciler recovers locally and callers only see these two.
#[derive(Debug)]
pub enum ServiceError {
	Embedding { message: String },
	Search { message: String },
}

impl std::fmt::Display for ServiceError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Embedding { message } => write!(f, "Embedding error: {message}"),
			Self::Search { message } => write!(f, "Search error: {message}"),
		}
	}
}

impl std::error::Error for ServiceError {}

#[derive(Clone)]
pub struct Providers {
	pub embedding: Arc<dyn EmbeddingProvider>,
	pub completion: Arc<dyn CompletionProvider>,
	pub index: Arc<dyn VectorIndex>,
}

pub struct ScoutService {
	pub cfg: Config,
	pub providers: Providers,
}

struct DefaultProviders;

impl EmbeddingProvider for DefaultProviders {
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, color_eyre::Result<Vec<Vec<f32>>>> {
		Box::pin(embedding::embed(cfg, texts))
	}
}

impl CompletionProvider for DefaultProviders {
	fn complete<'a>(
		&'a self,
		cfg: &'a LlmProviderConfig,
		messages: &'a [Value],
	) -> BoxFuture<'a, color_eyre::Result<String>> {
		Box::pin(completion::complete(cfg, messages))
	}
}

impl VectorIndex for QdrantStore {
	fn search<'a>(
		&'a self,
		vector: Vec<f32>,
		limit: u64,
	) -> BoxFuture<'a, color_eyre::Result<Vec<Assessment>>> {
		Box::pin(async move { Ok(self.search_assessments(vector, limit).await?) })
	}
}

impl Providers {
	pub fn new(
		embedding: Arc<dyn EmbeddingProvider>,
		completion: Arc<dyn CompletionProvider>,
		index: Arc<dyn VectorIndex>,
	) -> Self {
		Self { embedding, completion, index }
	}
}

impl ScoutService {
	pub fn new(cfg: Config, qdrant: QdrantStore) -> Self {
		let defaults = Arc::new(DefaultProviders);
		let providers = Providers {
			embedding: defaults.clone(),
			completion: defaults,
			index: Arc::new(qdrant),
		};

		Self { cfg, providers }
	}

	pub fn with_providers(cfg: Config, providers: Providers) -> Self {
		Self { cfg, providers }
	}
}
