mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Backend, Catalog, Config, Retry, Search};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.catalog.endpoint.trim().is_empty() {
		return Err(Error::Validation {
			message: "catalog.endpoint must be non-empty.".to_string(),
		});
	}
	if cfg.catalog.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "catalog.timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.backend.endpoint.trim().is_empty() {
		return Err(Error::Validation {
			message: "backend.endpoint must be non-empty.".to_string(),
		});
	}
	if cfg.backend.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "backend.timeout_ms must be greater than zero.".to_string(),
		});
	}
	if !(100..=599).contains(&cfg.backend.capacity_status) {
		return Err(Error::Validation {
			message: "backend.capacity_status must be a valid HTTP status code.".to_string(),
		});
	}
	if cfg.retry.max_attempts == 0 {
		return Err(Error::Validation {
			message: "retry.max_attempts must be greater than zero.".to_string(),
		});
	}
	if !cfg.retry.reduction_factor.is_finite() {
		return Err(Error::Validation {
			message: "retry.reduction_factor must be a finite number.".to_string(),
		});
	}
	if cfg.retry.reduction_factor <= 0.0 || cfg.retry.reduction_factor >= 1.0 {
		return Err(Error::Validation {
			message: "retry.reduction_factor must be strictly between 0.0 and 1.0.".to_string(),
		});
	}
	if cfg.search.default_limit == 0 {
		return Err(Error::Validation {
			message: "search.default_limit must be greater than zero.".to_string(),
		});
	}
	if cfg.search.max_limit < cfg.search.default_limit {
		return Err(Error::Validation {
			message: "search.max_limit must be greater than or equal to search.default_limit."
				.to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	while cfg.catalog.endpoint.ends_with('/') {
		cfg.catalog.endpoint.pop();
	}
	while cfg.backend.endpoint.ends_with('/') {
		cfg.backend.endpoint.pop();
	}
	if cfg.catalog.default_bucket.as_deref().map(|b| b.trim().is_empty()).unwrap_or(false) {
		cfg.catalog.default_bucket = None;
	}
	if cfg.catalog.auth_token.as_deref().map(|t| t.trim().is_empty()).unwrap_or(false) {
		cfg.catalog.auth_token = None;
	}
	if cfg.backend.auth_token.as_deref().map(|t| t.trim().is_empty()).unwrap_or(false) {
		cfg.backend.auth_token = None;
	}
}
