//! Reading-log seed data used by `bookms-api --seed`.

use time::{Date, macros::date};

use crate::{Result, db::Db, models::NewBook, queries};

fn seed_book(
	title: &str,
	author: &str,
	genre: &str,
	read_date: Date,
	rating: f32,
	review: &str,
	pages: i32,
) -> NewBook {
	NewBook {
		title: title.to_string(),
		author: author.to_string(),
		genre: genre.to_string(),
		review: review.to_string(),
		rating,
		pages: Some(pages),
		cover_image: None,
		location: None,
		available: true,
		read_date: Some(read_date),
		start_date: None,
	}
}

pub fn seed_books() -> Vec<NewBook> {
	vec![
		seed_book(
			"클린 코드",
			"로버트 C. 마틴",
			"프로그래밍",
			date!(2024 - 01 - 15),
			5.0,
			"개발자라면 반드시 읽어야 할 책. 코드의 품질을 높이는 다양한 기법들을 배울 수 있었다.",
			464,
		),
		seed_book(
			"해리 포터와 마법사의 돌",
			"J.K. 롤링",
			"판타지",
			date!(2024 - 02 - 20),
			4.0,
			"어린 시절의 추억을 되살려주는 마법 같은 이야기. 상상력이 풍부한 세계관이 인상적이다.",
			309,
		),
		seed_book(
			"사피엔스",
			"유발 하라리",
			"역사/인문",
			date!(2024 - 03 - 10),
			5.0,
			"인류의 역사를 새로운 관점에서 바라볼 수 있게 해주는 책. 매우 흥미롭고 생각할 거리가 많다.",
			512,
		),
		seed_book(
			"사피엔스2",
			"유발 하라리",
			"역사/인문",
			date!(2024 - 03 - 10),
			5.0,
			"인류의 역사를 새로운 관점에서 바라볼 수 있게 해주는 책. 매우 흥미롭고 생각할 거리가 많다.",
			512,
		),
	]
}

/// Deletes every book and inserts the seed set in one transaction. Returns the number inserted.
pub async fn replace_with_seed(db: &Db) -> Result<usize> {
	let books = seed_books();
	let mut tx = db.pool.begin().await?;

	sqlx::query("DELETE FROM books").execute(&mut *tx).await?;

	for book in &books {
		queries::insert_book_exec(&mut *tx, book).await?;
	}

	tx.commit().await?;

	Ok(books.len())
}
