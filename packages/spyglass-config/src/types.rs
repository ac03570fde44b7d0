use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
	pub catalog: Catalog,
	pub backend: Backend,
	#[serde(default)]
	pub retry: Retry,
	pub search: Search,
}

#[derive(Debug, Deserialize)]
pub struct Catalog {
	pub endpoint: String,
	pub timeout_ms: u64,
	/// Distinguished bucket whose indices lead multi-bucket patterns.
	pub default_bucket: Option<String>,
	pub auth_token: Option<String>,
	/// When true, a failed bucket enumeration degrades to an empty bucket set
	/// instead of failing the request.
	#[serde(default = "default_degraded_ok")]
	pub degraded_ok: bool,
}

#[derive(Debug, Deserialize)]
pub struct Backend {
	pub endpoint: String,
	pub timeout_ms: u64,
	pub auth_token: Option<String>,
	/// HTTP status the backend uses to signal excessive index fan-out.
	#[serde(default = "default_capacity_status")]
	pub capacity_status: u16,
}

#[derive(Debug, Deserialize)]
pub struct Retry {
	#[serde(default = "default_max_attempts")]
	pub max_attempts: u32,
	/// Fraction of the index pattern kept after a capacity error.
	#[serde(default = "default_reduction_factor")]
	pub reduction_factor: f64,
}

#[derive(Debug, Deserialize)]
pub struct Search {
	pub default_limit: u32,
	pub max_limit: u32,
}

impl Default for Retry {
	fn default() -> Self {
		Self { max_attempts: default_max_attempts(), reduction_factor: default_reduction_factor() }
	}
}

fn default_degraded_ok() -> bool {
	true
}

fn default_capacity_status() -> u16 {
	403
}

fn default_max_attempts() -> u32 {
	5
}

fn default_reduction_factor() -> f64 {
	0.5
}
