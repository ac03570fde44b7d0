pub mod directory;
pub mod retry;
pub mod search;
pub mod time_serde;

mod error;

pub use error::{Error, Result};
pub use retry::{AttemptOutcome, SearchAttempt};
pub use search::{SearchRequest, SearchResponse};

use std::{future::Future, pin::Pin, sync::Arc};

use serde_json::Value;

use spyglass_config::Config;
use spyglass_domain::RawHit;
use spyglass_providers::{backend, catalog};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Long-lived, read-only handle onto the catalog metadata service.
pub trait CatalogProvider
where
	Self: Send + Sync,
{
	fn fetch_bucket_list<'a>(
		&'a self,
		cfg: &'a spyglass_config::Catalog,
	) -> BoxFuture<'a, spyglass_providers::Result<Vec<String>>>;
}

/// Long-lived, read-only handle onto the backend search service. Errors
/// arrive already classified as capacity vs other at this boundary.
pub trait SearchBackend
where
	Self: Send + Sync,
{
	fn search<'a>(
		&'a self,
		cfg: &'a spyglass_config::Backend,
		indices: &'a [String],
		body: &'a Value,
	) -> BoxFuture<'a, spyglass_providers::Result<Vec<RawHit>>>;
}

#[derive(Clone)]
pub struct Providers {
	pub catalog: Arc<dyn CatalogProvider>,
	pub backend: Arc<dyn SearchBackend>,
}

pub struct SpyglassService {
	pub cfg: Config,
	pub providers: Providers,
}

struct DefaultProviders;

impl CatalogProvider for DefaultProviders {
	fn fetch_bucket_list<'a>(
		&'a self,
		cfg: &'a spyglass_config::Catalog,
	) -> BoxFuture<'a, spyglass_providers::Result<Vec<String>>> {
		Box::pin(catalog::fetch_bucket_list(cfg))
	}
}

impl SearchBackend for DefaultProviders {
	fn search<'a>(
		&'a self,
		cfg: &'a spyglass_config::Backend,
		indices: &'a [String],
		body: &'a Value,
	) -> BoxFuture<'a, spyglass_providers::Result<Vec<RawHit>>> {
		Box::pin(backend::search(cfg, indices, body))
	}
}

impl Providers {
	pub fn new(catalog: Arc<dyn CatalogProvider>, backend: Arc<dyn SearchBackend>) -> Self {
		Self { catalog, backend }
	}
}

impl Default for Providers {
	fn default() -> Self {
		let provider = Arc::new(DefaultProviders);

		Self { catalog: provider.clone(), backend: provider }
	}
}

impl SpyglassService {
	pub fn new(cfg: Config) -> Self {
		Self { cfg, providers: Providers::default() }
	}

	pub fn with_providers(cfg: Config, providers: Providers) -> Self {
		Self { cfg, providers }
	}
}
