pub mod backend;
pub mod catalog;

mod error;

pub use error::{Error, Result};

use reqwest::header::{AUTHORIZATION, HeaderMap};

pub(crate) fn auth_headers(auth_token: Option<&str>) -> Result<HeaderMap> {
	let mut headers = HeaderMap::new();

	if let Some(token) = auth_token {
		headers.insert(AUTHORIZATION, format!("Bearer {token}").parse()?);
	}

	Ok(headers)
}
