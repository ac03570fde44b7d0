use std::time::Duration;

use reqwest::Client;
use serde_json::{Map, Value};

use spyglass_domain::RawHit;

use crate::{Error, Result};

/// Issues one query against the backend search service for the given index
/// pattern. The configured capacity status is classified here, once, so
/// callers only ever see `Error::Capacity` vs everything else.
pub async fn search(
	cfg: &spyglass_config::Backend,
	indices: &[String],
	body: &Value,
) -> Result<Vec<RawHit>> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}/{}/_search", cfg.endpoint, indices.join(","));
	let res = client
		.post(url)
		.headers(crate::auth_headers(cfg.auth_token.as_deref())?)
		.json(body)
		.send()
		.await?;
	let status = res.status().as_u16();

	if status == cfg.capacity_status {
		return Err(Error::Capacity { status });
	}
	if !res.status().is_success() {
		let message = res.text().await.unwrap_or_default();

		return Err(Error::Backend { status, message });
	}

	let json: Value = res.json().await?;

	parse_hits(json)
}

/// Builds the backend query document. Structured filters are opaque
/// pass-throughs folded into term clauses.
pub fn query_doc(query: &str, limit: u32, filters: &Map<String, Value>) -> Value {
	let mut bool_query = Map::new();

	bool_query.insert(
		"must".to_string(),
		serde_json::json!([{ "query_string": { "query": query } }]),
	);

	if !filters.is_empty() {
		bool_query.insert("filter".to_string(), Value::Array(filter_clauses(filters)));
	}

	serde_json::json!({
		"size": limit,
		"query": { "bool": bool_query }
	})
}

fn filter_clauses(filters: &Map<String, Value>) -> Vec<Value> {
	filters
		.iter()
		.map(|(field, value)| {
			let mut term = Map::new();

			term.insert(field.clone(), value.clone());

			serde_json::json!({ "term": term })
		})
		.collect()
}

fn parse_hits(json: Value) -> Result<Vec<RawHit>> {
	let hits = json.pointer("/hits/hits").and_then(|v| v.as_array()).ok_or_else(|| {
		Error::InvalidResponse { message: "Search response is missing the hits array.".to_string() }
	})?;
	let mut out = Vec::with_capacity(hits.len());

	for hit in hits {
		let index_name =
			hit.get("_index").and_then(|v| v.as_str()).unwrap_or_default().to_string();
		let score = hit.get("_score").and_then(|v| v.as_f64()).unwrap_or(0.0);
		let fields = hit.get("_source").and_then(|v| v.as_object()).cloned().unwrap_or_default();

		// Structurally broken individual hits are the normalizer's problem;
		// it drops and counts them.
		out.push(RawHit { index_name, score, fields });
	}

	Ok(out)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn builds_query_doc_with_filters() {
		let mut filters = Map::new();

		filters.insert("ext".to_string(), serde_json::json!("csv"));

		let doc = query_doc("hello world", 25, &filters);

		assert_eq!(doc["size"], 25);
		assert_eq!(doc["query"]["bool"]["must"][0]["query_string"]["query"], "hello world");
		assert_eq!(doc["query"]["bool"]["filter"][0]["term"]["ext"], "csv");
	}

	#[test]
	fn omits_filter_clause_when_empty() {
		let doc = query_doc("q", 10, &Map::new());

		assert!(doc["query"]["bool"].get("filter").is_none());
	}

	#[test]
	fn parses_hits_array() {
		let json = serde_json::json!({
			"hits": {
				"hits": [
					{
						"_index": "mybucket",
						"_score": 1.5,
						"_source": { "key": "data/report.csv" }
					},
					{ "_index": "mybucket_packages" }
				]
			}
		});
		let hits = parse_hits(json).expect("parse failed");

		assert_eq!(hits.len(), 2);
		assert_eq!(hits[0].index_name, "mybucket");
		assert_eq!(hits[0].score, 1.5);
		assert_eq!(hits[0].fields["key"], "data/report.csv");
		assert_eq!(hits[1].score, 0.0);
		assert!(hits[1].fields.is_empty());
	}

	#[test]
	fn rejects_response_without_hits() {
		let json = serde_json::json!({ "took": 3 });

		assert!(parse_hits(json).is_err());
	}
}
