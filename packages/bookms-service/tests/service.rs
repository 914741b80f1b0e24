use std::sync::{
	Arc, Mutex,
	atomic::{AtomicUsize, Ordering},
};

use serde_json::Map;
use time::macros::date;

use bookms_config::{
	Config, LlmProviderConfig, Postgres, Providers as ProviderConfigs, Reading, Search, Service,
	Storage,
};
use bookms_domain::{BookRecord, catalog::sample_catalog};
use bookms_providers::chat::ChatMessage;
use bookms_service::{
	AddBookRequest, BookService, BookStore, BoxFuture, Error, ListBooksRequest, Providers,
	RankerProvider, RankingStrategy, SearchRequest, SearchResponse,
};
use bookms_storage::models::NewBook;

#[derive(Default)]
struct MemoryStore {
	books: Mutex<Vec<BookRecord>>,
	fail: bool,
}
impl MemoryStore {
	fn with_books(books: Vec<BookRecord>) -> Self {
		Self { books: Mutex::new(books), fail: false }
	}

	fn failing() -> Self {
		Self { books: Mutex::new(Vec::new()), fail: true }
	}

	fn check(&self) -> bookms_service::Result<()> {
		if self.fail {
			return Err(Error::Storage { message: "connection refused".to_string() });
		}

		Ok(())
	}
}
impl BookStore for MemoryStore {
	fn list_books<'a>(&'a self) -> BoxFuture<'a, bookms_service::Result<Vec<BookRecord>>> {
		Box::pin(async move {
			self.check()?;

			Ok(self.books.lock().expect("Store lock poisoned.").clone())
		})
	}

	fn get_book<'a>(
		&'a self,
		id: i64,
	) -> BoxFuture<'a, bookms_service::Result<Option<BookRecord>>> {
		Box::pin(async move {
			self.check()?;

			let books = self.books.lock().expect("Store lock poisoned.");

			Ok(books.iter().find(|book| book.id == id).cloned())
		})
	}

	fn insert_book<'a>(
		&'a self,
		book: &'a NewBook,
	) -> BoxFuture<'a, bookms_service::Result<BookRecord>> {
		Box::pin(async move {
			self.check()?;

			let mut books = self.books.lock().expect("Store lock poisoned.");
			let id = books.iter().map(|book| book.id).max().unwrap_or(0) + 1;
			let record = BookRecord {
				id,
				title: book.title.clone(),
				author: book.author.clone(),
				genre: book.genre.clone(),
				review: book.review.clone(),
				rating: book.rating,
				pages: book.pages,
				cover_image: book.cover_image.clone(),
				location: book.location.clone(),
				available: book.available,
				read_date: book.read_date,
				start_date: book.start_date,
			};

			books.push(record.clone());

			Ok(record)
		})
	}
}

enum Reply {
	Content(&'static str),
	Status(u16),
}

struct SpyRanker {
	reply: Reply,
	calls: AtomicUsize,
}
impl SpyRanker {
	fn new(reply: Reply) -> Arc<Self> {
		Arc::new(Self { reply, calls: AtomicUsize::new(0) })
	}

	fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}
}
impl RankerProvider for SpyRanker {
	fn complete<'a>(
		&'a self,
		_cfg: &'a LlmProviderConfig,
		_messages: &'a [ChatMessage],
	) -> BoxFuture<'a, bookms_providers::Result<String>> {
		self.calls.fetch_add(1, Ordering::SeqCst);

		let result = match self.reply {
			Reply::Content(content) => Ok(content.to_string()),
			Reply::Status(status) => Err(bookms_providers::Error::Status { status }),
		};

		Box::pin(async move { result })
	}
}

fn test_config(api_key: Option<&str>) -> Config {
	Config {
		service: Service { http_bind: "127.0.0.1:0".to_string(), log_level: "info".to_string() },
		storage: Storage {
			postgres: Postgres {
				dsn: "postgres://bookms@127.0.0.1:1/bookms".to_string(),
				pool_max_conns: 1,
			},
		},
		providers: ProviderConfigs {
			llm_ranker: LlmProviderConfig {
				provider_id: "test".to_string(),
				api_base: "http://127.0.0.1:1".to_string(),
				api_key: api_key.map(str::to_string),
				path: "/".to_string(),
				model: "test".to_string(),
				temperature: 0.3,
				max_tokens: 1000,
				timeout_ms: Some(1000),
				default_headers: Map::new(),
			},
		},
		search: Search { keyword_score_seed: Some(42), ..Search::default() },
		reading: Reading { annual_goal_books: 4 },
	}
}

fn service(api_key: Option<&str>, store: MemoryStore, ranker: Arc<SpyRanker>) -> BookService {
	BookService::with_providers(test_config(api_key), Arc::new(store), Providers::new(ranker))
}

fn search_request(query: &str, location: Option<&str>) -> SearchRequest {
	SearchRequest { query: Some(query.to_string()), location: location.map(str::to_string) }
}

fn ids(response: &SearchResponse) -> Vec<i64> {
	response.results.iter().map(|item| item.id).collect()
}

fn logged_book(id: i64, genre: &str, rating: f32, read_date: Option<time::Date>) -> BookRecord {
	BookRecord {
		id,
		title: format!("책 {id}"),
		author: "저자".to_string(),
		genre: genre.to_string(),
		review: String::new(),
		rating,
		pages: Some(100 * id as i32),
		cover_image: None,
		location: None,
		available: true,
		read_date,
		start_date: None,
	}
}

#[tokio::test]
async fn blank_queries_are_rejected_without_ranking() {
	let ranker = SpyRanker::new(Reply::Content(r#"{"relevant_books": []}"#));
	let service =
		service(Some("sk-test"), MemoryStore::with_books(sample_catalog()), ranker.clone());

	for req in [
		SearchRequest::default(),
		search_request("", None),
		search_request("   ", Some("서울")),
	] {
		let err = service.search(req).await.expect_err("Blank query must be rejected.");

		assert!(matches!(
			err,
			Error::InvalidRequest { ref message } if message == "검색어가 필요합니다."
		));
	}

	assert_eq!(ranker.calls(), 0);
}

#[tokio::test]
async fn missing_credential_uses_keyword_ranking_without_calling_the_model() {
	let ranker = SpyRanker::new(Reply::Content(r#"{"relevant_books": []}"#));
	let service = service(None, MemoryStore::default(), ranker.clone());
	let upper = service.search(search_request("AI", None)).await.expect("Search failed.");
	let lower = service.search(search_request("ai", None)).await.expect("Search failed.");

	assert_eq!(upper.ranking, RankingStrategy::Keyword);
	assert_eq!(ids(&upper), vec![1, 4]);
	assert_eq!(ids(&upper), ids(&lower));
	assert_eq!(ranker.calls(), 0);
}

#[tokio::test]
async fn keyword_location_filter_matches_exactly() {
	let ranker = SpyRanker::new(Reply::Status(500));
	let service = service(None, MemoryStore::default(), ranker);

	for location in ["부산", "전체"] {
		let response = service
			.search(search_request("머신러닝", Some(location)))
			.await
			.expect("Search failed.");

		assert_eq!(ids(&response), vec![2]);
		assert_eq!(response.results[0].location, "부산");
	}

	let none = service.search(search_request("머신러닝", Some("서울"))).await.expect("Search failed.");

	assert!(none.results.is_empty());
}

#[tokio::test]
async fn surrounding_whitespace_reaches_keyword_matching_verbatim() {
	let ranker = SpyRanker::new(Reply::Status(500));
	let service = service(None, MemoryStore::default(), ranker);
	let padded = service.search(search_request("머신러닝 ", None)).await.expect("Search failed.");

	assert_eq!(ids(&padded), (1..=10).collect::<Vec<_>>());
	assert!(padded.results[0].reason.starts_with("\"머신러닝 \"와 관련된 "));

	let padded_location =
		service.search(search_request("머신러닝", Some(" 부산 "))).await.expect("Search failed.");

	assert!(padded_location.results.is_empty());
}

#[tokio::test]
async fn llm_results_follow_reply_order_and_drop_unknown_ids() {
	let ranker = SpyRanker::new(Reply::Content(
		r#"Here are the matches:
{"relevant_books": [
  {"book_id": "3", "relevance_score": 0.95, "reason": "딥러닝 알고리즘", "search_highlights": ["제목: 딥러닝의 이해"]},
  {"book_id": "404", "relevance_score": 0.9, "reason": "없는 책"},
  {"book_id": 1, "relevance_score": 0.8, "reason": "AI 사회"}
]}"#,
	));
	let service =
		service(Some("sk-test"), MemoryStore::with_books(sample_catalog()), ranker.clone());
	let response = service.search(search_request("딥러닝", None)).await.expect("Search failed.");

	assert_eq!(response.ranking, RankingStrategy::Llm);
	assert_eq!(ids(&response), vec![3, 1]);
	assert_eq!(ranker.calls(), 1);

	let first = &response.results[0];

	assert_eq!(first.relevance, 0.95);
	assert_eq!(first.reason, "딥러닝 알고리즘");
	assert_eq!(first.search_highlights, vec!["제목: 딥러닝의 이해".to_string()]);
	assert_eq!(first.location, "전체");
	assert!(first.available);
	assert!(response.results[1].search_highlights.is_empty());
}

#[tokio::test]
async fn well_formed_reply_without_known_ids_returns_no_results() {
	let ranker =
		SpyRanker::new(Reply::Content(r#"{"relevant_books": [{"book_id": "77"}]}"#));
	let service = service(Some("sk-test"), MemoryStore::with_books(sample_catalog()), ranker);
	let response = service.search(search_request("AI", None)).await.expect("Search failed.");

	assert_eq!(response.ranking, RankingStrategy::Llm);
	assert!(response.results.is_empty());
}

#[tokio::test]
async fn reply_entries_without_usable_ids_are_skipped() {
	let ranker = SpyRanker::new(Reply::Content(
		r#"{"relevant_books": [
  {"book_id": "3", "relevance_score": 0.9, "reason": "딥러닝"},
  {"book_id": null, "relevance_score": 0.5, "reason": "id 없음"}
]}"#,
	));
	let service = service(Some("sk-test"), MemoryStore::with_books(sample_catalog()), ranker);
	let response = service.search(search_request("AI", None)).await.expect("Search failed.");

	assert_eq!(response.ranking, RankingStrategy::Llm);
	assert_eq!(ids(&response), vec![3]);
}

#[tokio::test]
async fn malformed_reply_falls_back_to_keyword_results() {
	let ranker = SpyRanker::new(Reply::Content("I could not find anything relevant."));
	let service =
		service(Some("sk-test"), MemoryStore::with_books(sample_catalog()), ranker.clone());
	let response = service.search(search_request("AI", None)).await.expect("Search failed.");

	assert_eq!(ranker.calls(), 1);
	assert_eq!(response.ranking, RankingStrategy::Keyword);
	assert_eq!(ids(&response), vec![1, 4]);
}

#[tokio::test]
async fn upstream_failure_falls_back_to_keyword_results() {
	let ranker = SpyRanker::new(Reply::Status(429));
	let service = service(Some("sk-test"), MemoryStore::with_books(sample_catalog()), ranker);
	let response = service.search(search_request("UX", None)).await.expect("Search failed.");

	assert_eq!(response.ranking, RankingStrategy::Keyword);
	assert_eq!(ids(&response), vec![9]);
	assert_eq!(response.results[0].reason, "\"UX\"와 관련된 디자인 분야의 도서입니다.");
}

#[tokio::test]
async fn empty_or_failing_store_searches_the_sample_catalog_by_keyword() {
	for store in [MemoryStore::default(), MemoryStore::failing()] {
		let ranker = SpyRanker::new(Reply::Content(r#"{"relevant_books": [{"book_id": 1}]}"#));
		let service = service(Some("sk-test"), store, ranker.clone());
		let response =
			service.search(search_request("클라우드", None)).await.expect("Search failed.");

		assert_eq!(ranker.calls(), 0);
		assert_eq!(response.ranking, RankingStrategy::Keyword);
		assert_eq!(ids(&response), vec![10]);
	}
}

#[tokio::test]
async fn seeded_keyword_scores_repeat_and_stay_in_range() {
	let ranker = SpyRanker::new(Reply::Status(500));
	let service = service(None, MemoryStore::default(), ranker);
	let first = service.search(search_request("컴퓨터", None)).await.expect("Search failed.");
	let second = service.search(search_request("컴퓨터", None)).await.expect("Search failed.");
	let catalog_ids = sample_catalog().into_iter().map(|book| book.id).collect::<Vec<_>>();

	assert!(!first.results.is_empty());
	assert_eq!(ids(&first), ids(&second));

	for (a, b) in first.results.iter().zip(&second.results) {
		assert_eq!(a.relevance, b.relevance);
		assert!((0.7..1.0).contains(&a.relevance));
		assert!(catalog_ids.contains(&a.id));
	}
}

#[tokio::test]
async fn book_log_lists_filters_and_sorts() {
	let store = MemoryStore::with_books(vec![
		logged_book(1, "소설", 3.5, Some(date!(2024 - 01 - 10))),
		logged_book(2, "에세이", 5.0, None),
		logged_book(3, "소설", 4.0, Some(date!(2024 - 03 - 02))),
	]);
	let service = service(None, store, SpyRanker::new(Reply::Status(500)));
	let all = service.list_books(ListBooksRequest::default()).await.expect("List failed.");

	assert_eq!(all.genres, vec!["전체".to_string(), "소설".to_string(), "에세이".to_string()]);
	assert_eq!(all.books.iter().map(|book| book.id).collect::<Vec<_>>(), vec![3, 1, 2]);

	let novels = service
		.list_books(ListBooksRequest {
			genre: Some("소설".to_string()),
			sort: Some("rating".to_string()),
		})
		.await
		.expect("List failed.");

	assert_eq!(novels.books.iter().map(|book| book.id).collect::<Vec<_>>(), vec![3, 1]);

	let err = service
		.list_books(ListBooksRequest { genre: None, sort: Some("pages".to_string()) })
		.await
		.expect_err("Unknown sort key must be rejected.");

	assert!(matches!(err, Error::InvalidRequest { .. }));
}

#[tokio::test]
async fn book_detail_reports_reading_days_and_missing_books() {
	let mut book = logged_book(1, "소설", 4.0, Some(date!(2024 - 01 - 15)));

	book.start_date = Some(date!(2024 - 01 - 01));

	let store = MemoryStore::with_books(vec![book, logged_book(2, "소설", 4.0, None)]);
	let service = service(None, store, SpyRanker::new(Reply::Status(500)));
	let detail = service.get_book(1).await.expect("Detail failed.");
	let undated = service.get_book(2).await.expect("Detail failed.");

	assert_eq!(detail.reading_days, Some(14));
	assert_eq!(undated.reading_days, None);
	assert!(matches!(service.get_book(9).await, Err(Error::NotFound { .. })));
}

#[tokio::test]
async fn added_books_show_up_in_stats() {
	let store = MemoryStore::with_books(vec![
		logged_book(1, "소설", 4.0, Some(date!(2024 - 05 - 01))),
		logged_book(2, "에세이", 3.0, Some(date!(2023 - 12 - 31))),
	]);
	let service = service(None, store, SpyRanker::new(Reply::Status(500)));
	let added = service
		.add_book(AddBookRequest {
			title: "아몬드".to_string(),
			author: "손원평".to_string(),
			genre: "소설".to_string(),
			review: "감정을 배우는 소년".to_string(),
			rating: 4.5,
			pages: Some(264),
			cover_image: None,
			location: None,
			available: true,
			read_date: Some(date!(2024 - 06 - 20)),
			start_date: Some(date!(2024 - 06 - 10)),
		})
		.await
		.expect("Add failed.");

	assert_eq!(added.id, 3);

	let stats = service.stats_for_year(2024).await.expect("Stats failed.");

	assert_eq!(stats.total_books, 3);
	assert_eq!(stats.total_pages, 100 + 200 + 264);
	assert_eq!(stats.average_rating, 3.8);
	assert_eq!(stats.genres[0].genre, "소설");
	assert_eq!(stats.genres[0].count, 2);
	assert_eq!(stats.goal.target, 4);
	assert_eq!(stats.goal.completed, 2);
	assert_eq!(stats.goal.percent, 50);
}
