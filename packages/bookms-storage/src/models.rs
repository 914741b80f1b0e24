use time::{Date, OffsetDateTime};

use bookms_domain::BookRecord;

#[derive(Debug, sqlx::FromRow)]
pub struct Book {
	pub id: i64,
	pub title: String,
	pub author: String,
	pub genre: String,
	pub review: String,
	pub rating: f32,
	pub pages: Option<i32>,
	pub cover_image: Option<String>,
	pub location: Option<String>,
	pub available: bool,
	pub read_date: Option<Date>,
	pub start_date: Option<Date>,
	pub created_at: OffsetDateTime,
}
impl From<Book> for BookRecord {
	fn from(book: Book) -> Self {
		Self {
			id: book.id,
			title: book.title,
			author: book.author,
			genre: book.genre,
			review: book.review,
			rating: book.rating,
			pages: book.pages,
			cover_image: book.cover_image,
			location: book.location,
			available: book.available,
			read_date: book.read_date,
			start_date: book.start_date,
		}
	}
}

/// Insert payload; the store assigns `id` and `created_at`.
#[derive(Debug, Clone)]
pub struct NewBook {
	pub title: String,
	pub author: String,
	pub genre: String,
	pub review: String,
	pub rating: f32,
	pub pages: Option<i32>,
	pub cover_image: Option<String>,
	pub location: Option<String>,
	pub available: bool,
	pub read_date: Option<Date>,
	pub start_date: Option<Date>,
}
