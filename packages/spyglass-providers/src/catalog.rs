use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use crate::{Error, Result};

const BUCKET_LIST_QUERY: &str = "{ bucketConfigs { name } }";

/// Enumerates the buckets the catalog knows about. Any transport or shape
/// failure surfaces as an error; degrading to an empty set is the bucket
/// directory's decision, not this client's.
pub async fn fetch_bucket_list(cfg: &spyglass_config::Catalog) -> Result<Vec<String>> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}/graphql", cfg.endpoint);
	let body = serde_json::json!({ "query": BUCKET_LIST_QUERY });
	let res = client
		.post(url)
		.headers(crate::auth_headers(cfg.auth_token.as_deref())?)
		.json(&body)
		.send()
		.await?;
	let json: Value = res.error_for_status()?.json().await?;

	parse_bucket_list(json)
}

fn parse_bucket_list(json: Value) -> Result<Vec<String>> {
	if let Some(errors) = json.get("errors").and_then(|v| v.as_array())
		&& !errors.is_empty()
	{
		let message = errors[0]
			.get("message")
			.and_then(|v| v.as_str())
			.unwrap_or("Catalog query failed.")
			.to_string();

		return Err(Error::InvalidResponse { message });
	}

	let configs = json
		.pointer("/data/bucketConfigs")
		.and_then(|v| v.as_array())
		.ok_or_else(|| Error::InvalidResponse {
			message: "Catalog response is missing bucketConfigs.".to_string(),
		})?;
	let mut buckets = Vec::with_capacity(configs.len());

	for config in configs {
		let Some(name) = config.get("name").and_then(|v| v.as_str()) else {
			continue;
		};
		let name = name.trim();

		if !name.is_empty() {
			buckets.push(name.to_string());
		}
	}

	Ok(buckets)
}
