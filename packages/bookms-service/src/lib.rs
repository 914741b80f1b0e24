pub mod books;
pub mod search;

mod error;

pub use error::{Error, Result};

use std::{future::Future, pin::Pin, sync::Arc};

pub use books::{AddBookRequest, BookDetail, ListBooksRequest, ListBooksResponse};
use bookms_config::{Config, LlmProviderConfig};
pub use bookms_domain::{BookRecord, reading::ReadingStats};
use bookms_providers::chat::{self, ChatMessage};
use bookms_storage::{db::Db, models::NewBook, queries};
pub use search::{RankingStrategy, SearchRequest, SearchResponse, SearchResultItem};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Persistent book catalog.
pub trait BookStore
where
	Self: Send + Sync,
{
	fn list_books<'a>(&'a self) -> BoxFuture<'a, Result<Vec<BookRecord>>>;

	fn get_book<'a>(&'a self, id: i64) -> BoxFuture<'a, Result<Option<BookRecord>>>;

	fn insert_book<'a>(&'a self, book: &'a NewBook) -> BoxFuture<'a, Result<BookRecord>>;
}

/// Text-generation endpoint used by LLM-assisted ranking.
pub trait RankerProvider
where
	Self: Send + Sync,
{
	fn complete<'a>(
		&'a self,
		cfg: &'a LlmProviderConfig,
		messages: &'a [ChatMessage],
	) -> BoxFuture<'a, bookms_providers::Result<String>>;
}

#[derive(Clone)]
pub struct Providers {
	pub ranker: Arc<dyn RankerProvider>,
}
impl Providers {
	pub fn new(ranker: Arc<dyn RankerProvider>) -> Self {
		Self { ranker }
	}
}
impl Default for Providers {
	fn default() -> Self {
		Self { ranker: Arc::new(DefaultProviders) }
	}
}

pub struct BookService {
	pub cfg: Config,
	pub store: Arc<dyn BookStore>,
	pub providers: Providers,
}
impl BookService {
	pub fn new(cfg: Config, db: Db) -> Self {
		Self { cfg, store: Arc::new(db), providers: Providers::default() }
	}

	pub fn with_providers(cfg: Config, store: Arc<dyn BookStore>, providers: Providers) -> Self {
		Self { cfg, store, providers }
	}
}

struct DefaultProviders;
impl RankerProvider for DefaultProviders {
	fn complete<'a>(
		&'a self,
		cfg: &'a LlmProviderConfig,
		messages: &'a [ChatMessage],
	) -> BoxFuture<'a, bookms_providers::Result<String>> {
		Box::pin(chat::complete(cfg, messages))
	}
}

impl BookStore for Db {
	fn list_books<'a>(&'a self) -> BoxFuture<'a, Result<Vec<BookRecord>>> {
		Box::pin(async move {
			let books = queries::list_books(self).await?;

			Ok(books.into_iter().map(BookRecord::from).collect())
		})
	}

	fn get_book<'a>(&'a self, id: i64) -> BoxFuture<'a, Result<Option<BookRecord>>> {
		Box::pin(async move {
			match queries::get_book(self, id).await {
				Ok(book) => Ok(Some(book.into())),
				Err(bookms_storage::Error::NotFound(_)) => Ok(None),
				Err(err) => Err(err.into()),
			}
		})
	}

	fn insert_book<'a>(&'a self, book: &'a NewBook) -> BoxFuture<'a, Result<BookRecord>> {
		Box::pin(async move {
			let stored = queries::insert_book(self, book).await?;

			Ok(stored.into())
		})
	}
}
