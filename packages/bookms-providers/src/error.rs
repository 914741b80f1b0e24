pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Chat request failed: {0}")]
	Reqwest(#[from] reqwest::Error),
	#[error("Chat payload is not valid JSON: {0}")]
	SerdeJson(#[from] serde_json::Error),
	#[error("Invalid header name: {0}")]
	InvalidHeaderName(#[from] reqwest::header::InvalidHeaderName),
	#[error("Invalid header value: {0}")]
	InvalidHeaderValue(#[from] reqwest::header::InvalidHeaderValue),
	#[error("Invalid provider config: {message}")]
	InvalidConfig { message: String },
	#[error("Chat endpoint returned HTTP {status}.")]
	Status { status: u16 },
	#[error("Unusable chat response: {message}")]
	InvalidResponse { message: String },
}
