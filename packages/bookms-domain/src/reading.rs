use std::{cmp::Ordering, str::FromStr};

use serde::{Deserialize, Serialize};
use time::Date;

use crate::BookRecord;

/// Genre filter value that keeps every book.
pub const ALL_GENRES: &str = "전체";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookSort {
	/// Newest first; undated books last.
	#[default]
	ReadDate,
	Rating,
	Title,
}
impl FromStr for BookSort {
	type Err = String;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		match value {
			"read_date" => Ok(Self::ReadDate),
			"rating" => Ok(Self::Rating),
			"title" => Ok(Self::Title),
			other => Err(format!("Unknown sort key {other:?}.")),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreCount {
	pub genre: String,
	pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingGoal {
	pub target: u32,
	pub completed: u32,
	pub percent: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingStats {
	pub total_books: u32,
	pub total_pages: i64,
	pub average_rating: f32,
	pub genres: Vec<GenreCount>,
	pub goal: ReadingGoal,
}

pub fn filter_and_sort(
	books: Vec<BookRecord>,
	genre: Option<&str>,
	sort: BookSort,
) -> Vec<BookRecord> {
	let mut books: Vec<BookRecord> = books
		.into_iter()
		.filter(|book| match genre {
			None => true,
			Some(genre) => genre == ALL_GENRES || book.genre == genre,
		})
		.collect();

	match sort {
		BookSort::ReadDate => books.sort_by(|a, b| match (a.read_date, b.read_date) {
			(Some(a), Some(b)) => b.cmp(&a),
			(Some(_), None) => Ordering::Less,
			(None, Some(_)) => Ordering::Greater,
			(None, None) => Ordering::Equal,
		}),
		BookSort::Rating =>
			books.sort_by(|a, b| b.rating.partial_cmp(&a.rating).unwrap_or(Ordering::Equal)),
		BookSort::Title => books.sort_by(|a, b| a.title.cmp(&b.title)),
	}

	books
}

/// `"전체"` followed by each distinct genre in first-seen order.
pub fn genre_options(books: &[BookRecord]) -> Vec<String> {
	let mut out = vec![ALL_GENRES.to_string()];

	for book in books {
		if !out.iter().any(|genre| genre == &book.genre) {
			out.push(book.genre.clone());
		}
	}

	out
}

/// Whole days between the two dates, regardless of order.
pub fn reading_days(start: Date, end: Date) -> i64 {
	(end - start).whole_days().abs()
}

pub fn reading_stats(books: &[BookRecord], year: i32, annual_goal: u32) -> ReadingStats {
	let total_books = books.len() as u32;
	let total_pages = books.iter().filter_map(|book| book.pages).map(i64::from).sum();
	let average_rating = if books.is_empty() {
		0.0
	} else {
		let sum: f32 = books.iter().map(|book| book.rating).sum();

		round_one_decimal(sum / books.len() as f32)
	};
	let mut genres: Vec<GenreCount> = Vec::new();

	for book in books {
		match genres.iter_mut().find(|entry| entry.genre == book.genre) {
			Some(entry) => entry.count += 1,
			None => genres.push(GenreCount { genre: book.genre.clone(), count: 1 }),
		}
	}

	let completed = books
		.iter()
		.filter(|book| book.read_date.map(|date| date.year() == year).unwrap_or(false))
		.count() as u32;
	let percent = if annual_goal == 0 {
		0
	} else {
		(completed.saturating_mul(100) / annual_goal).min(100)
	};

	ReadingStats {
		total_books,
		total_pages,
		average_rating,
		genres,
		goal: ReadingGoal { target: annual_goal, completed, percent },
	}
}

fn round_one_decimal(value: f32) -> f32 {
	(value * 10.0).round() / 10.0
}
