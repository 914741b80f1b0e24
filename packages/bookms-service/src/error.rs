pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Not found: {message}")]
	NotFound { message: String },
	#[error("Storage error: {message}")]
	Storage { message: String },
	#[error("Internal error: {message}")]
	Internal { message: String },
}
impl From<bookms_storage::Error> for Error {
	fn from(err: bookms_storage::Error) -> Self {
		match err {
			bookms_storage::Error::Sqlx(inner) => Self::Storage { message: inner.to_string() },
			bookms_storage::Error::InvalidArgument(message) => Self::InvalidRequest { message },
			bookms_storage::Error::NotFound(message) => Self::NotFound { message },
		}
	}
}
