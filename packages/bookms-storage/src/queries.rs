use sqlx::{Executor, Postgres};

use crate::{
	Error, Result,
	db::Db,
	models::{Book, NewBook},
};

const BOOK_COLUMNS: &str = "\
id, title, author, genre, review, rating, pages, cover_image, location, available, read_date, \
start_date, created_at";

pub async fn list_books(db: &Db) -> Result<Vec<Book>> {
	let sql = format!("SELECT {BOOK_COLUMNS} FROM books ORDER BY id");
	let books = sqlx::query_as::<_, Book>(&sql).fetch_all(&db.pool).await?;

	Ok(books)
}

pub async fn get_book(db: &Db, id: i64) -> Result<Book> {
	let sql = format!("SELECT {BOOK_COLUMNS} FROM books WHERE id = $1");

	sqlx::query_as::<_, Book>(&sql)
		.bind(id)
		.fetch_optional(&db.pool)
		.await?
		.ok_or_else(|| Error::NotFound(format!("book {id}")))
}

pub async fn insert_book(db: &Db, book: &NewBook) -> Result<Book> {
	insert_book_exec(&db.pool, book).await
}

pub(crate) async fn insert_book_exec<'e, E>(executor: E, book: &NewBook) -> Result<Book>
where
	E: Executor<'e, Database = Postgres>,
{
	if !(0.0..=5.0).contains(&book.rating) {
		return Err(Error::InvalidArgument("rating must be in the range 0-5.".to_string()));
	}

	let sql = format!(
		"\
INSERT INTO books (
	title,
	author,
	genre,
	review,
	rating,
	pages,
	cover_image,
	location,
	available,
	read_date,
	start_date
)
VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11)
RETURNING {BOOK_COLUMNS}"
	);
	let row = sqlx::query_as::<_, Book>(&sql)
		.bind(book.title.as_str())
		.bind(book.author.as_str())
		.bind(book.genre.as_str())
		.bind(book.review.as_str())
		.bind(book.rating)
		.bind(book.pages)
		.bind(book.cover_image.as_deref())
		.bind(book.location.as_deref())
		.bind(book.available)
		.bind(book.read_date)
		.bind(book.start_date)
		.fetch_one(executor)
		.await?;

	Ok(row)
}
