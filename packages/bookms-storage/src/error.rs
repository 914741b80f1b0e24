pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Database error: {0}")]
	Sqlx(#[from] sqlx::Error),
	#[error("Rejected book: {0}")]
	InvalidArgument(String),
	#[error("No such {0}.")]
	NotFound(String),
}
