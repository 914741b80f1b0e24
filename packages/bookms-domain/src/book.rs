use serde::{Deserialize, Serialize};
use time::Date;

/// One catalog entry. Search treats a snapshot of these as read-only for a whole request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookRecord {
	pub id: i64,
	pub title: String,
	pub author: String,
	pub genre: String,
	/// Free-text review; shown as the description in search results.
	pub review: String,
	pub rating: f32,
	pub pages: Option<i32>,
	pub cover_image: Option<String>,
	pub location: Option<String>,
	pub available: bool,
	#[serde(default, with = "crate::date_serde::option")]
	pub read_date: Option<Date>,
	#[serde(default, with = "crate::date_serde::option")]
	pub start_date: Option<Date>,
}
impl BookRecord {
	/// Text the keyword matcher searches, in title, author, description, genre order.
	pub fn search_text(&self) -> String {
		format!("{} {} {} {}", self.title, self.author, self.review, self.genre)
	}
}
