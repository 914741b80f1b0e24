use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use tracing::info;

use crate::{BookService, Error, Result};
use bookms_domain::{
	BookRecord,
	reading::{self, BookSort, ReadingStats},
};
use bookms_storage::models::NewBook;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListBooksRequest {
	#[serde(default)]
	pub genre: Option<String>,
	#[serde(default)]
	pub sort: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListBooksResponse {
	pub books: Vec<BookRecord>,
	/// `"전체"` first, then every genre in the log.
	pub genres: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookDetail {
	#[serde(flatten)]
	pub book: BookRecord,
	pub reading_days: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddBookRequest {
	pub title: String,
	pub author: String,
	pub genre: String,
	#[serde(default)]
	pub review: String,
	pub rating: f32,
	#[serde(default)]
	pub pages: Option<i32>,
	#[serde(default)]
	pub cover_image: Option<String>,
	#[serde(default)]
	pub location: Option<String>,
	#[serde(default = "default_available")]
	pub available: bool,
	#[serde(default, with = "bookms_domain::date_serde::option")]
	pub read_date: Option<Date>,
	#[serde(default, with = "bookms_domain::date_serde::option")]
	pub start_date: Option<Date>,
}
impl AddBookRequest {
	fn validate(self) -> Result<NewBook> {
		let required = [("title", &self.title), ("author", &self.author), ("genre", &self.genre)];

		for (field, value) in required {
			if value.trim().is_empty() {
				return Err(Error::InvalidRequest { message: format!("{field} must be non-empty.") });
			}
		}

		if !self.rating.is_finite() || !(0.0..=5.0).contains(&self.rating) {
			return Err(Error::InvalidRequest {
				message: "rating must be a finite number between 0 and 5.".to_string(),
			});
		}
		if self.pages.is_some_and(|pages| pages < 0) {
			return Err(Error::InvalidRequest {
				message: "pages must be zero or greater.".to_string(),
			});
		}

		Ok(NewBook {
			title: self.title.trim().to_string(),
			author: self.author.trim().to_string(),
			genre: self.genre.trim().to_string(),
			review: self.review,
			rating: self.rating,
			pages: self.pages,
			cover_image: non_blank(self.cover_image),
			location: non_blank(self.location),
			available: self.available,
			read_date: self.read_date,
			start_date: self.start_date,
		})
	}
}

impl BookService {
	pub async fn list_books(&self, req: ListBooksRequest) -> Result<ListBooksResponse> {
		let sort = match req.sort.as_deref().map(str::trim).filter(|value| !value.is_empty()) {
			Some(raw) =>
				raw.parse::<BookSort>().map_err(|message| Error::InvalidRequest { message })?,
			None => BookSort::default(),
		};
		let genre = req.genre.as_deref().map(str::trim).filter(|value| !value.is_empty());
		let books = self.store.list_books().await?;
		let genres = reading::genre_options(&books);
		let books = reading::filter_and_sort(books, genre, sort);

		Ok(ListBooksResponse { books, genres })
	}

	pub async fn get_book(&self, id: i64) -> Result<BookDetail> {
		let Some(book) = self.store.get_book(id).await? else {
			return Err(Error::NotFound { message: format!("Book {id} does not exist.") });
		};
		let reading_days = match (book.start_date, book.read_date) {
			(Some(start), Some(end)) => Some(reading::reading_days(start, end)),
			_ => None,
		};

		Ok(BookDetail { book, reading_days })
	}

	pub async fn add_book(&self, req: AddBookRequest) -> Result<BookRecord> {
		let new_book = req.validate()?;
		let stored = self.store.insert_book(&new_book).await?;

		info!(book_id = stored.id, title = %stored.title, "Book added.");

		Ok(stored)
	}

	pub async fn stats(&self) -> Result<ReadingStats> {
		self.stats_for_year(OffsetDateTime::now_utc().year()).await
	}

	pub async fn stats_for_year(&self, year: i32) -> Result<ReadingStats> {
		let books = self.store.list_books().await?;

		Ok(reading::reading_stats(&books, year, self.cfg.reading.annual_goal_books))
	}
}

fn default_available() -> bool {
	true
}

fn non_blank(value: Option<String>) -> Option<String> {
	value.map(|value| value.trim().to_string()).filter(|value| !value.is_empty())
}
