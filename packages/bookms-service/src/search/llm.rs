use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::search::RankedCandidate;
use bookms_config::Search;
use bookms_domain::{BookRecord, extract};
use bookms_providers::chat::ChatMessage;

const MISSING_DESCRIPTION: &str = "설명 없음";
const REPLY_SHAPE: &str = r#"{
  "relevant_books": [
    {
      "book_id": "도서ID",
      "relevance_score": 0.95,
      "reason": "관련성 이유",
      "search_highlights": ["제목: 도서명", "저자: 저자명"]
    }
  ]
}"#;

/// Structured reply requested from the ranking model.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RelevanceReply {
	/// Entries that do not decode are skipped; the rest of the reply is kept.
	#[serde(deserialize_with = "decodable_entries")]
	pub relevant_books: Vec<RelevantBook>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RelevantBook {
	pub book_id: BookIdRef,
	#[serde(default)]
	pub relevance_score: f32,
	#[serde(default)]
	pub reason: String,
	#[serde(default)]
	pub search_highlights: Option<Vec<String>>,
}

/// Models answer with either `"3"` or `3`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum BookIdRef {
	Number(i64),
	Text(String),
}
impl BookIdRef {
	pub fn resolve(&self) -> Option<i64> {
		match self {
			Self::Number(id) => Some(*id),
			Self::Text(raw) => raw.trim().parse().ok(),
		}
	}
}

fn decodable_entries<'de, D>(deserializer: D) -> Result<Vec<RelevantBook>, D::Error>
where
	D: Deserializer<'de>,
{
	let entries = Vec::<Value>::deserialize(deserializer)?;

	Ok(entries.into_iter().filter_map(|entry| serde_json::from_value(entry).ok()).collect())
}

/// Extracts the first JSON object from free-form model output and decodes it.
///
/// `None` when no object is present or the object does not have the reply shape.
pub fn parse_reply(content: &str) -> Option<RelevanceReply> {
	let object = extract::first_json_object(content)?;

	serde_json::from_str(object).ok()
}

pub(crate) fn build_messages(
	query: &str,
	location: Option<&str>,
	search_cfg: &Search,
	catalog: &[BookRecord],
) -> Vec<ChatMessage> {
	let location = location.unwrap_or(search_cfg.default_location.as_str());
	let mut prompt = String::from(
		"당신은 도서 검색 전문가입니다. 사용자의 자연어 검색어를 분석하여 가장 관련성 높은 도서를 찾아주세요.\n\n다음은 도서 목록입니다:\n",
	);

	for book in catalog {
		let description =
			if book.review.trim().is_empty() { MISSING_DESCRIPTION } else { book.review.as_str() };
		prompt.push_str(&format!(
			"\n- ID: {}\n- 제목: {}\n- 저자: {}\n- 장르: {}\n- 평점: {}/5\n- 설명: {}\n",
			book.id, book.title, book.author, book.genre, book.rating, description,
		));
	}

	prompt.push_str(&format!(
		"\n사용자 검색어: \"{query}\"\n위치: \"{location}\"\n\n다음 JSON 형식으로 응답해주세요:\n{REPLY_SHAPE}",
	));

	vec![
		ChatMessage::system(prompt),
		ChatMessage::user(format!("검색어: \"{query}\"에 대한 관련 도서를 찾아주세요.")),
	]
}

/// Reply entries in reply order. Ids that are not integers are dropped here; ids missing from
/// the catalog are dropped when results are assembled.
pub(crate) fn candidates(reply: RelevanceReply) -> Vec<RankedCandidate> {
	reply
		.relevant_books
		.into_iter()
		.filter_map(|book| {
			let book_id = book.book_id.resolve()?;

			Some(RankedCandidate {
				book_id,
				relevance: book.relevance_score,
				reason: book.reason,
				highlights: book.search_highlights.unwrap_or_default(),
			})
		})
		.collect()
}
