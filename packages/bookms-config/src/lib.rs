mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, LlmProviderConfig, Postgres, Providers, Reading, Search, Service, Storage};

use std::{fs, path::Path};

/// Loads and validates a BookMS TOML config file.
pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|source| Error::ReadConfig { path: path.to_path_buf(), source })?;
	let mut cfg = toml::from_str::<Config>(&raw)
		.map_err(|source| Error::ParseConfig { path: path.to_path_buf(), source })?;

	normalize(&mut cfg);
	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.pool_max_conns must be greater than zero.".to_string(),
		});
	}

	let llm = &cfg.providers.llm_ranker;

	for (label, value) in [
		("providers.llm_ranker.api_base", &llm.api_base),
		("providers.llm_ranker.path", &llm.path),
		("providers.llm_ranker.model", &llm.model),
	] {
		if value.trim().is_empty() {
			return Err(Error::Validation { message: format!("{label} must be non-empty.") });
		}
	}

	if !llm.temperature.is_finite() {
		return Err(Error::Validation {
			message: "providers.llm_ranker.temperature must be a finite number.".to_string(),
		});
	}
	if !(0.0..=2.0).contains(&llm.temperature) {
		return Err(Error::Validation {
			message: "providers.llm_ranker.temperature must be in the range 0.0-2.0.".to_string(),
		});
	}
	if llm.max_tokens == 0 {
		return Err(Error::Validation {
			message: "providers.llm_ranker.max_tokens must be greater than zero.".to_string(),
		});
	}

	if let Some(timeout_ms) = llm.timeout_ms
		&& timeout_ms == 0
	{
		return Err(Error::Validation {
			message: "providers.llm_ranker.timeout_ms must be greater than zero.".to_string(),
		});
	}

	if llm.default_headers.values().any(|value| !value.is_string()) {
		return Err(Error::Validation {
			message: "providers.llm_ranker.default_headers values must be strings.".to_string(),
		});
	}
	if cfg.search.default_location.trim().is_empty() {
		return Err(Error::Validation {
			message: "search.default_location must be non-empty.".to_string(),
		});
	}
	if cfg.reading.annual_goal_books == 0 {
		return Err(Error::Validation {
			message: "reading.annual_goal_books must be greater than zero.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	let llm = &mut cfg.providers.llm_ranker;

	if llm.api_key.as_deref().map(|key| key.trim().is_empty()).unwrap_or(false) {
		llm.api_key = None;
	}
}
