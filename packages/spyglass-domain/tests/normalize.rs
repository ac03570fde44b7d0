use serde_json::Map;

use spyglass_domain::{RawHit, ResultKind, normalize_hits};

fn file_hit(index: &str, key: &str, score: f64) -> RawHit {
	let mut fields = Map::new();

	fields.insert("key".to_string(), serde_json::json!(key));
	fields.insert("size".to_string(), serde_json::json!(1024));

	RawHit { index_name: index.to_string(), score, fields }
}

fn package_hit(index: &str, name: &str, score: f64) -> RawHit {
	let mut fields = Map::new();

	fields.insert("ptr_name".to_string(), serde_json::json!(name));

	RawHit { index_name: index.to_string(), score, fields }
}

#[test]
fn infers_kind_and_bucket_from_index_name() {
	let hits = vec![
		package_hit("mybucket_packages", "team/dataset", 2.0),
		file_hit("mybucket", "data/report.csv", 1.0),
	];
	let (results, skipped) = normalize_hits(hits, 10);

	assert_eq!(skipped, 0);
	assert_eq!(results.len(), 2);

	let package = &results[0];
	assert_eq!(package.kind, ResultKind::Package);
	assert_eq!(package.bucket, "mybucket");
	assert_eq!(package.uri, "s3://mybucket/.quilt/packages/team/dataset");
	assert_eq!(package.extension, None);

	let file = &results[1];
	assert_eq!(file.kind, ResultKind::File);
	assert_eq!(file.bucket, "mybucket");
	assert_eq!(file.uri, "s3://mybucket/data/report.csv");
	assert_eq!(file.extension, Some("csv".to_string()));
}

#[test]
fn sorts_by_score_descending_and_truncates() {
	let hits = vec![
		file_hit("b", "low.txt", 0.5),
		file_hit("b", "high.txt", 3.0),
		file_hit("b", "mid.txt", 1.5),
		file_hit("b", "floor.txt", 0.1),
	];
	let (results, skipped) = normalize_hits(hits, 2);

	assert_eq!(skipped, 0);
	assert_eq!(results.len(), 2);
	assert_eq!(results[0].uri, "s3://b/high.txt");
	assert_eq!(results[1].uri, "s3://b/mid.txt");
}

#[test]
fn ties_keep_backend_order() {
	let hits = vec![
		file_hit("b", "first.txt", 1.0),
		file_hit("b", "second.txt", 1.0),
		file_hit("b", "third.txt", 1.0),
	];
	let (results, _) = normalize_hits(hits, 10);

	assert_eq!(results[0].uri, "s3://b/first.txt");
	assert_eq!(results[1].uri, "s3://b/second.txt");
	assert_eq!(results[2].uri, "s3://b/third.txt");
}

#[test]
fn malformed_hits_are_dropped_and_counted() {
	let missing_key = RawHit { index_name: "b".to_string(), score: 1.0, fields: Map::new() };
	let missing_name =
		RawHit { index_name: "b_packages".to_string(), score: 1.0, fields: Map::new() };
	let bad_score = file_hit("b", "ok.txt", f64::NAN);
	let empty_index = file_hit("", "ok.txt", 1.0);
	let hits = vec![missing_key, missing_name, bad_score, empty_index, file_hit("b", "ok.txt", 1.0)];
	let (results, skipped) = normalize_hits(hits, 10);

	assert_eq!(results.len(), 1);
	assert_eq!(skipped, 4);
	assert_eq!(results[0].uri, "s3://b/ok.txt");
}

#[test]
fn package_uri_falls_back_to_handle_field() {
	let mut fields = Map::new();

	fields.insert("handle".to_string(), serde_json::json!("org/pkg"));

	let hit = RawHit { index_name: "b_packages".to_string(), score: 1.0, fields };
	let (results, skipped) = normalize_hits(vec![hit], 10);

	assert_eq!(skipped, 0);
	assert_eq!(results[0].uri, "s3://b/.quilt/packages/org/pkg");
}
