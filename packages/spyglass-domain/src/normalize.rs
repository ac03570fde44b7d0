use std::cmp::Ordering;

use serde_json::{Map, Value};

use crate::PACKAGE_INDEX_SUFFIX;

/// Backend-native result document, owned transiently between the executor
/// and the normalizer.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct RawHit {
	pub index_name: String,
	pub score: f64,
	pub fields: Map<String, Value>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultKind {
	File,
	Package,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct NormalizedResult {
	pub kind: ResultKind,
	pub bucket: String,
	pub uri: String,
	pub score: f64,
	/// Files only; lowercased last dot-delimited token of the key's last
	/// path segment.
	pub extension: Option<String>,
	pub metadata: Map<String, Value>,
}

/// The single place where index-name suffix sniffing is allowed.
pub fn is_package_index(name: &str) -> bool {
	name.ends_with(PACKAGE_INDEX_SUFFIX)
}

/// Converts raw backend hits into uniform results: highest score first
/// (backend order breaks ties), truncated to `limit`. Malformed hits are
/// dropped and counted rather than failing the pass.
pub fn normalize_hits(hits: Vec<RawHit>, limit: usize) -> (Vec<NormalizedResult>, usize) {
	let mut out = Vec::with_capacity(hits.len());
	let mut skipped = 0;

	for hit in hits {
		match normalize_hit(hit) {
			Some(result) => out.push(result),
			None => skipped += 1,
		}
	}

	out.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
	out.truncate(limit);

	(out, skipped)
}

fn normalize_hit(hit: RawHit) -> Option<NormalizedResult> {
	if !hit.score.is_finite() {
		return None;
	}

	if is_package_index(&hit.index_name) {
		let bucket = hit.index_name.strip_suffix(PACKAGE_INDEX_SUFFIX)?.to_string();

		if bucket.is_empty() {
			return None;
		}

		let name = string_field(&hit.fields, "ptr_name")
			.or_else(|| string_field(&hit.fields, "handle"))?;

		Some(NormalizedResult {
			kind: ResultKind::Package,
			uri: format!("s3://{bucket}/.quilt/packages/{name}"),
			bucket,
			score: hit.score,
			extension: None,
			metadata: hit.fields,
		})
	} else {
		let bucket = hit.index_name.trim().to_string();

		if bucket.is_empty() {
			return None;
		}

		let key = string_field(&hit.fields, "key")?;
		let extension = extract_extension(&key);

		Some(NormalizedResult {
			kind: ResultKind::File,
			uri: format!("s3://{bucket}/{key}"),
			bucket,
			score: hit.score,
			extension,
			metadata: hit.fields,
		})
	}
}

fn string_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
	let value = fields.get(key)?.as_str()?.trim();

	if value.is_empty() { None } else { Some(value.to_string()) }
}

fn extract_extension(key: &str) -> Option<String> {
	let segment = key.rsplit('/').next().unwrap_or(key);
	let (stem, extension) = segment.rsplit_once('.')?;

	if stem.is_empty() || extension.is_empty() {
		return None;
	}

	Some(extension.to_ascii_lowercase())
}
