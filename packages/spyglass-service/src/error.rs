pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Unknown scope {value:?}; expected file, package, or global.")]
	InvalidScope { value: String },
	#[error("Bucket metadata is unavailable: {message}")]
	MetadataUnavailable { message: String },
	#[error("Search failed: {message}")]
	SearchFailed { message: String },
	#[error("Search retries exhausted after {attempts} attempts.")]
	ExhaustedRetries { attempts: u32 },
	#[error("Search cancelled before completion.")]
	Cancelled,
}
