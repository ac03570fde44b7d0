pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Reqwest(#[from] reqwest::Error),
	#[error(transparent)]
	SerdeJson(#[from] serde_json::Error),
	#[error(transparent)]
	InvalidHeaderValue(#[from] reqwest::header::InvalidHeaderValue),
	#[error("Backend rejected the query for excessive index fan-out (status {status}).")]
	Capacity { status: u16 },
	#[error("Backend returned status {status}: {message}")]
	Backend { status: u16, message: String },
	#[error("{message}")]
	InvalidResponse { message: String },
}

impl Error {
	/// The only classification the retry controller acts on. Everything that
	/// is not a capacity rejection (timeouts included) is non-retryable.
	pub fn is_capacity(&self) -> bool {
		matches!(self, Self::Capacity { .. })
	}
}
