use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	pub providers: Providers,
	#[serde(default)]
	pub search: Search,
	#[serde(default)]
	pub reading: Reading,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
}

#[derive(Debug, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

#[derive(Debug, Deserialize)]
pub struct Providers {
	pub llm_ranker: LlmProviderConfig,
}

#[derive(Debug, Deserialize)]
pub struct LlmProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	/// Blank or missing keys disable the LLM ranking path.
	#[serde(default)]
	pub api_key: Option<String>,
	pub path: String,
	pub model: String,
	pub temperature: f32,
	#[serde(default = "default_max_tokens")]
	pub max_tokens: u32,
	/// Unset keeps the HTTP client's default timeout.
	#[serde(default)]
	pub timeout_ms: Option<u64>,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct Search {
	#[serde(default = "default_location")]
	pub default_location: String,
	#[serde(default = "default_cover_image")]
	pub default_cover_image: String,
	#[serde(default = "default_empty_description")]
	pub empty_description: String,
	/// Fixes the keyword-path relevance scores. Each request reseeds from this value.
	#[serde(default)]
	pub keyword_score_seed: Option<u64>,
}
impl Default for Search {
	fn default() -> Self {
		Self {
			default_location: default_location(),
			default_cover_image: default_cover_image(),
			empty_description: default_empty_description(),
			keyword_score_seed: None,
		}
	}
}

#[derive(Debug, Deserialize)]
pub struct Reading {
	#[serde(default = "default_annual_goal_books")]
	pub annual_goal_books: u32,
}
impl Default for Reading {
	fn default() -> Self {
		Self { annual_goal_books: default_annual_goal_books() }
	}
}

fn default_max_tokens() -> u32 {
	1_000
}

fn default_location() -> String {
	"전체".to_string()
}

fn default_cover_image() -> String {
	"/api/placeholder/default".to_string()
}

fn default_empty_description() -> String {
	"설명이 없습니다.".to_string()
}

fn default_annual_goal_books() -> u32 {
	24
}
