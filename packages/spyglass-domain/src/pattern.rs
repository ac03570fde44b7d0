use std::collections::HashSet;

use crate::{PACKAGE_INDEX_SUFFIX, scope::Scope};

/// Buckets known to the catalog for one request, plus the configured
/// default bucket. Rebuilt per request, never mutated in place.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct BucketSet {
	pub available: Vec<String>,
	pub default_bucket: Option<String>,
}

/// Reduces a caller-supplied bucket reference to a bare bucket name:
/// strips an `s3://` prefix and anything after the bucket segment.
pub fn normalize_bucket(raw: &str) -> String {
	let trimmed = raw.trim();
	let stripped = trimmed.strip_prefix("s3://").unwrap_or(trimmed);

	stripped.split('/').next().unwrap_or_default().trim().to_string()
}

/// Moves the default bucket to the front when it is present in `available`.
/// The relative order of all other buckets is preserved. A default bucket
/// that is absent from `available` is ignored.
pub fn prioritize(available: &[String], default_bucket: Option<&str>) -> Vec<String> {
	let Some(default) = default_bucket else {
		return available.to_vec();
	};

	if !available.iter().any(|bucket| bucket == default) {
		return available.to_vec();
	}

	let mut out = Vec::with_capacity(available.len());

	out.push(default.to_string());
	out.extend(available.iter().filter(|bucket| *bucket != default).cloned());

	out
}

/// Builds the ordered list of backend index names for one query attempt.
///
/// With an explicit `bucket` the pattern covers exactly that bucket; without
/// one it covers every available bucket in priority order. An empty result is
/// a valid terminal state meaning "nothing to search".
pub fn build_pattern(scope: Scope, bucket: Option<&str>, set: &BucketSet) -> Vec<String> {
	let mut out = Vec::new();

	match bucket.map(str::trim).filter(|b| !b.is_empty()) {
		Some(raw) => {
			let bucket = normalize_bucket(raw);

			if !bucket.is_empty() {
				expand(scope, &bucket, &mut out);
			}
		},
		None =>
			for raw in prioritize(&set.available, set.default_bucket.as_deref()) {
				let bucket = normalize_bucket(&raw);

				if !bucket.is_empty() {
					expand(scope, &bucket, &mut out);
				}
			},
	}

	dedup(&mut out);

	out
}

fn expand(scope: Scope, bucket: &str, out: &mut Vec<String>) {
	match scope {
		Scope::File => out.push(bucket.to_string()),
		Scope::Package => out.push(format!("{bucket}{PACKAGE_INDEX_SUFFIX}")),
		Scope::Global => {
			out.push(bucket.to_string());
			out.push(format!("{bucket}{PACKAGE_INDEX_SUFFIX}"));
		},
	}
}

fn dedup(entries: &mut Vec<String>) {
	let mut seen = HashSet::new();

	entries.retain(|entry| seen.insert(entry.clone()));
}
