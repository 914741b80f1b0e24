pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Test database setup failed: {0}")]
	Setup(String),
	#[error("Test database query failed: {0}")]
	Sqlx(#[from] sqlx::Error),
}
