use std::collections::HashMap;

use crate::search::{RankedCandidate, SearchResultItem};
use bookms_config::Search;
use bookms_domain::BookRecord;

/// Merges LLM candidates with catalog records, keeping reply order and dropping unknown ids.
///
/// Availability is reported as `true` for every LLM result regardless of the record.
pub(crate) fn llm_results(
	candidates: Vec<RankedCandidate>,
	catalog: &[BookRecord],
	location: Option<&str>,
	search_cfg: &Search,
) -> Vec<SearchResultItem> {
	let by_id = index(catalog);
	let location = location.unwrap_or(search_cfg.default_location.as_str());

	candidates
		.into_iter()
		.filter_map(|candidate| {
			let record = by_id.get(&candidate.book_id)?;

			Some(item(record, candidate, location.to_string(), true, search_cfg))
		})
		.collect()
}

pub(crate) fn keyword_results(
	candidates: Vec<RankedCandidate>,
	catalog: &[BookRecord],
	location: Option<&str>,
	search_cfg: &Search,
) -> Vec<SearchResultItem> {
	let by_id = index(catalog);

	candidates
		.into_iter()
		.filter_map(|candidate| {
			let record = by_id.get(&candidate.book_id)?;
			let location = record
				.location
				.as_deref()
				.or(location)
				.unwrap_or(search_cfg.default_location.as_str())
				.to_string();

			Some(item(record, candidate, location, record.available, search_cfg))
		})
		.collect()
}

fn index(catalog: &[BookRecord]) -> HashMap<i64, &BookRecord> {
	catalog.iter().map(|record| (record.id, record)).collect()
}

fn item(
	record: &BookRecord,
	candidate: RankedCandidate,
	location: String,
	available: bool,
	search_cfg: &Search,
) -> SearchResultItem {
	let description = if record.review.trim().is_empty() {
		search_cfg.empty_description.clone()
	} else {
		record.review.clone()
	};
	let cover_image = record
		.cover_image
		.as_deref()
		.filter(|cover| !cover.trim().is_empty())
		.unwrap_or(search_cfg.default_cover_image.as_str())
		.to_string();

	SearchResultItem {
		id: record.id,
		title: record.title.clone(),
		author: record.author.clone(),
		genre: record.genre.clone(),
		description,
		location,
		available,
		rating: record.rating,
		cover_image,
		relevance: candidate.relevance,
		search_highlights: candidate.highlights,
		reason: candidate.reason,
	}
}
