use crate::BookRecord;

/// Location values that disable location filtering.
pub const ALL_LOCATIONS: [&str; 2] = ["전체", "all"];

pub const TITLE_LABEL: &str = "제목";
pub const AUTHOR_LABEL: &str = "저자";
pub const DESCRIPTION_LABEL: &str = "설명";

/// Lower-cased query split on single spaces.
///
/// Empty tokens are kept: a doubled space produces `""`, and `""` is a substring of every text,
/// so such a query matches the whole catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTokens(Vec<String>);
impl QueryTokens {
	pub fn parse(query: &str) -> Self {
		Self(query.to_lowercase().split(' ').map(str::to_string).collect())
	}

	pub fn as_slice(&self) -> &[String] {
		&self.0
	}

	/// True when any token occurs in the lower-cased text.
	pub fn any_in(&self, text: &str) -> bool {
		let lowered = text.to_lowercase();

		self.0.iter().any(|token| lowered.contains(token.as_str()))
	}
}

pub fn is_unfiltered_location(location: Option<&str>) -> bool {
	match location {
		None => true,
		Some(value) => value.is_empty() || ALL_LOCATIONS.contains(&value),
	}
}

pub fn matches_record(tokens: &QueryTokens, record: &BookRecord) -> bool {
	tokens.any_in(&record.search_text())
}

/// Exact, case-sensitive comparison. Records without a location never pass a real filter.
pub fn location_matches(record: &BookRecord, location: Option<&str>) -> bool {
	if is_unfiltered_location(location) {
		return true;
	}

	record.location.as_deref() == location
}

/// Per-field highlight strings, always in title, author, description order.
pub fn highlights(tokens: &QueryTokens, record: &BookRecord) -> Vec<String> {
	let mut out = Vec::new();

	for (label, value) in [
		(TITLE_LABEL, &record.title),
		(AUTHOR_LABEL, &record.author),
		(DESCRIPTION_LABEL, &record.review),
	] {
		if tokens.any_in(value) {
			out.push(format!("{label}: \"{value}\""));
		}
	}

	out
}

pub fn keyword_reason(query: &str, genre: &str) -> String {
	format!("\"{query}\"와 관련된 {genre} 분야의 도서입니다.")
}
