mod format;
mod keyword;
mod llm;

pub use llm::{BookIdRef, RelevanceReply, RelevantBook, parse_reply};

use rand::{SeedableRng, rngs::StdRng};
use tracing::{info, warn};

use crate::{BookService, Error, Result};
use bookms_domain::{BookRecord, catalog};

const QUERY_REQUIRED: &str = "검색어가 필요합니다.";

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct SearchRequest {
	#[serde(default)]
	pub query: Option<String>,
	#[serde(default)]
	pub location: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingStrategy {
	Llm,
	Keyword,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultItem {
	pub id: i64,
	pub title: String,
	pub author: String,
	pub genre: String,
	pub description: String,
	pub location: String,
	pub available: bool,
	pub rating: f32,
	pub cover_image: String,
	pub relevance: f32,
	pub search_highlights: Vec<String>,
	pub reason: String,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SearchResponse {
	pub results: Vec<SearchResultItem>,
	pub ranking: RankingStrategy,
}

/// Ranking output before it is merged with display fields.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RankedCandidate {
	pub(crate) book_id: i64,
	pub(crate) relevance: f32,
	pub(crate) reason: String,
	pub(crate) highlights: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CatalogOrigin {
	Store,
	Sample,
}

/// The read-only catalog one search request works against.
#[derive(Debug, Clone)]
pub(crate) struct CatalogSnapshot {
	pub(crate) books: Vec<BookRecord>,
	pub(crate) origin: CatalogOrigin,
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum RankingError {
	#[error("LLM ranking has no configured api_key.")]
	MissingCredential,
	#[error("Store catalog is empty or unavailable.")]
	EmptyCatalog,
	#[error("Upstream ranking request failed: {0}")]
	Upstream(#[from] bookms_providers::Error),
	#[error("Ranking reply has no parsable relevance object.")]
	Parse,
}

impl BookService {
	pub async fn search(&self, req: SearchRequest) -> Result<SearchResponse> {
		// Whitespace only decides emptiness; ranking sees the query and location verbatim.
		let Some(query) = req.query.as_deref().filter(|value| !value.trim().is_empty()) else {
			return Err(Error::InvalidRequest { message: QUERY_REQUIRED.to_string() });
		};
		let location = req.location.as_deref().filter(|value| !value.is_empty());
		let snapshot = self.catalog_snapshot().await;

		match self.rank_with_llm(query, location, &snapshot).await {
			Ok(results) => Ok(SearchResponse { results, ranking: RankingStrategy::Llm }),
			Err(err) => {
				match err {
					RankingError::MissingCredential | RankingError::EmptyCatalog =>
						info!(reason = %err, "Using keyword ranking."),
					RankingError::Upstream(_) | RankingError::Parse =>
						warn!(error = %err, "LLM ranking failed. Falling back to keyword ranking."),
				}

				let results = self.rank_with_keywords(query, location, &snapshot);

				Ok(SearchResponse { results, ranking: RankingStrategy::Keyword })
			},
		}
	}

	pub(crate) async fn catalog_snapshot(&self) -> CatalogSnapshot {
		match self.store.list_books().await {
			Ok(books) if !books.is_empty() =>
				CatalogSnapshot { books, origin: CatalogOrigin::Store },
			Ok(_) => {
				info!("Book store is empty. Using the built-in sample catalog.");

				sample_snapshot()
			},
			Err(err) => {
				warn!(error = %err, "Failed to load books. Using the built-in sample catalog.");

				sample_snapshot()
			},
		}
	}

	async fn rank_with_llm(
		&self,
		query: &str,
		location: Option<&str>,
		snapshot: &CatalogSnapshot,
	) -> Result<Vec<SearchResultItem>, RankingError> {
		let cfg = &self.cfg.providers.llm_ranker;

		if cfg.api_key.is_none() {
			return Err(RankingError::MissingCredential);
		}
		if snapshot.origin == CatalogOrigin::Sample || snapshot.books.is_empty() {
			return Err(RankingError::EmptyCatalog);
		}

		let messages = llm::build_messages(query, location, &self.cfg.search, &snapshot.books);
		let content = self.providers.ranker.complete(cfg, &messages).await?;
		let reply = llm::parse_reply(&content).ok_or(RankingError::Parse)?;
		let candidates = llm::candidates(reply);

		Ok(format::llm_results(candidates, &snapshot.books, location, &self.cfg.search))
	}

	fn rank_with_keywords(
		&self,
		query: &str,
		location: Option<&str>,
		snapshot: &CatalogSnapshot,
	) -> Vec<SearchResultItem> {
		let mut rng = match self.cfg.search.keyword_score_seed {
			Some(seed) => StdRng::seed_from_u64(seed),
			None => StdRng::from_entropy(),
		};
		let candidates = keyword::rank(query, location, &snapshot.books, &mut rng);

		format::keyword_results(candidates, &snapshot.books, location, &self.cfg.search)
	}
}

fn sample_snapshot() -> CatalogSnapshot {
	CatalogSnapshot { books: catalog::sample_catalog(), origin: CatalogOrigin::Sample }
}
