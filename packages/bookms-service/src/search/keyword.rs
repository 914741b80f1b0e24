use rand::Rng;

use bookms_domain::{
	BookRecord,
	keyword::{self, QueryTokens},
};

use crate::search::RankedCandidate;

const MIN_SCORE: f32 = 0.7;
const MAX_SCORE: f32 = 1.0;

/// Keyword matches in catalog order. Scores are placeholders drawn from `[0.7, 1.0)`.
pub(crate) fn rank<R>(
	query: &str,
	location: Option<&str>,
	catalog: &[BookRecord],
	rng: &mut R,
) -> Vec<RankedCandidate>
where
	R: Rng,
{
	let tokens = QueryTokens::parse(query);

	catalog
		.iter()
		.filter(|record| keyword::matches_record(&tokens, record))
		.filter(|record| keyword::location_matches(record, location))
		.map(|record| RankedCandidate {
			book_id: record.id,
			relevance: rng.gen_range(MIN_SCORE..MAX_SCORE),
			reason: keyword::keyword_reason(query, &record.genre),
			highlights: keyword::highlights(&tokens, record),
		})
		.collect()
}
