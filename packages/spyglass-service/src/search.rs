use serde_json::{Map, Value};
use tokio::sync::watch;
use tracing::info;
use uuid::Uuid;

use spyglass_domain::{
	BucketSet, NormalizedResult, Scope, build_pattern, normalize_bucket, normalize_hits,
};
use spyglass_providers::backend::query_doc;

use crate::{Error, Result, SearchAttempt, SpyglassService};

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SearchRequest {
	pub query: String,
	/// One of `file`, `package`, or `global`. Validated before any index
	/// pattern is built.
	pub scope: String,
	/// When present, restricts the search to this bucket and skips bucket
	/// enumeration entirely.
	#[serde(default)]
	pub bucket: Option<String>,
	#[serde(default)]
	pub limit: Option<u32>,
	/// Opaque structured filters folded into the backend query document.
	#[serde(default)]
	pub filters: Map<String, Value>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SearchResponse {
	pub trace_id: Uuid,
	pub results: Vec<NormalizedResult>,
	pub scope: Scope,
	pub bucket: Option<String>,
	pub attempt_count: u32,
	pub attempts: Vec<SearchAttempt>,
	/// True when bucket enumeration failed and the search proceeded on a
	/// best-effort, narrowed basis. Distinguishes a degraded empty response
	/// from a genuine empty-result success.
	pub degraded: bool,
	/// Hits dropped during normalization for missing expected fields.
	pub skipped: u32,
}

impl SpyglassService {
	pub async fn search(&self, req: SearchRequest) -> Result<SearchResponse> {
		self.search_with_cancel(req, None).await
	}

	/// Like [`search`](Self::search), but checks the cancellation signal
	/// between retry attempts. Cancellation mid-attempt is best-effort: the
	/// in-flight backend call completes and its result is discarded.
	pub async fn search_with_cancel(
		&self,
		req: SearchRequest,
		cancel: Option<watch::Receiver<bool>>,
	) -> Result<SearchResponse> {
		let Some(scope) = Scope::parse(&req.scope) else {
			return Err(Error::InvalidScope { value: req.scope });
		};
		let limit =
			req.limit.unwrap_or(self.cfg.search.default_limit).clamp(1, self.cfg.search.max_limit);
		let bucket = req
			.bucket
			.as_deref()
			.map(normalize_bucket)
			.filter(|b| !b.is_empty());
		let trace_id = Uuid::new_v4();

		// Bucket enumeration only matters when the caller left the bucket
		// open; an explicit bucket must keep working even when the catalog
		// is down.
		let (bucket_set, degraded) = if bucket.is_some() {
			(BucketSet::default(), false)
		} else {
			self.resolve_buckets().await?
		};
		let pattern = build_pattern(scope, bucket.as_deref(), &bucket_set);

		if pattern.is_empty() {
			info!(%trace_id, degraded, "Index pattern is empty; skipping the backend call.");

			return Ok(SearchResponse {
				trace_id,
				results: Vec::new(),
				scope,
				bucket,
				attempt_count: 0,
				attempts: Vec::new(),
				degraded,
				skipped: 0,
			});
		}

		let body = query_doc(&req.query, limit, &req.filters);
		let (hits, attempts) = self.execute_with_retry(pattern, &body, cancel.as_ref()).await?;
		let (results, skipped) = normalize_hits(hits, limit as usize);

		info!(
			%trace_id,
			results = results.len(),
			attempt_count = attempts.len(),
			skipped,
			degraded,
			"Search completed."
		);

		Ok(SearchResponse {
			trace_id,
			results,
			scope,
			bucket,
			attempt_count: attempts.len() as u32,
			attempts,
			degraded,
			skipped: skipped as u32,
		})
	}
}
