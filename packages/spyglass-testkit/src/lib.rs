//! In-memory fakes for the two external collaborators, for driving the
//! service without a network.

use std::{
	collections::VecDeque,
	sync::Mutex,
};

use serde_json::{Map, Value};

use spyglass_domain::RawHit;
use spyglass_providers::Error as ProviderError;
use spyglass_service::{BoxFuture, CatalogProvider, SearchBackend};

/// Catalog fake: a fixed bucket list, or a scripted transport failure.
pub struct StaticCatalog {
	buckets: Option<Vec<String>>,
	calls: Mutex<u32>,
}

impl StaticCatalog {
	pub fn with_buckets(buckets: &[&str]) -> Self {
		Self {
			buckets: Some(buckets.iter().map(|b| b.to_string()).collect()),
			calls: Mutex::new(0),
		}
	}

	pub fn failing() -> Self {
		Self { buckets: None, calls: Mutex::new(0) }
	}

	pub fn call_count(&self) -> u32 {
		*self.calls.lock().unwrap_or_else(|err| err.into_inner())
	}
}

impl CatalogProvider for StaticCatalog {
	fn fetch_bucket_list<'a>(
		&'a self,
		_cfg: &'a spyglass_config::Catalog,
	) -> BoxFuture<'a, spyglass_providers::Result<Vec<String>>> {
		Box::pin(async move {
			*self.calls.lock().unwrap_or_else(|err| err.into_inner()) += 1;

			match &self.buckets {
				Some(buckets) => Ok(buckets.clone()),
				None => Err(ProviderError::InvalidResponse {
					message: "Catalog is unreachable.".to_string(),
				}),
			}
		})
	}
}

/// One scripted backend response.
pub enum BackendStep {
	Hits(Vec<RawHit>),
	Capacity,
	Fail(String),
}

/// Backend fake that plays back a queue of steps and records the index
/// pattern each call received.
pub struct ScriptedBackend {
	script: Mutex<VecDeque<BackendStep>>,
	patterns: Mutex<Vec<Vec<String>>>,
}

impl ScriptedBackend {
	pub fn new(steps: Vec<BackendStep>) -> Self {
		Self { script: Mutex::new(steps.into()), patterns: Mutex::new(Vec::new()) }
	}

	/// Index patterns seen so far, one entry per backend call.
	pub fn patterns(&self) -> Vec<Vec<String>> {
		self.patterns.lock().unwrap_or_else(|err| err.into_inner()).clone()
	}
}

impl SearchBackend for ScriptedBackend {
	fn search<'a>(
		&'a self,
		cfg: &'a spyglass_config::Backend,
		indices: &'a [String],
		_body: &'a Value,
	) -> BoxFuture<'a, spyglass_providers::Result<Vec<RawHit>>> {
		Box::pin(async move {
			self.patterns.lock().unwrap_or_else(|err| err.into_inner()).push(indices.to_vec());

			let step = self.script.lock().unwrap_or_else(|err| err.into_inner()).pop_front();

			match step {
				Some(BackendStep::Hits(hits)) => Ok(hits),
				Some(BackendStep::Capacity) =>
					Err(ProviderError::Capacity { status: cfg.capacity_status }),
				Some(BackendStep::Fail(message)) =>
					Err(ProviderError::Backend { status: 500, message }),
				None => Err(ProviderError::InvalidResponse {
					message: "Scripted backend ran out of steps.".to_string(),
				}),
			}
		})
	}
}

pub fn file_hit(index: &str, key: &str, score: f64) -> RawHit {
	let mut fields = Map::new();

	fields.insert("key".to_string(), serde_json::json!(key));

	RawHit { index_name: index.to_string(), score, fields }
}

pub fn package_hit(index: &str, name: &str, score: f64) -> RawHit {
	let mut fields = Map::new();

	fields.insert("ptr_name".to_string(), serde_json::json!(name));

	RawHit { index_name: index.to_string(), score, fields }
}
