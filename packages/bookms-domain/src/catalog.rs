//! Built-in sample catalog, substituted whenever the store is empty or unreachable.

use crate::BookRecord;

struct SampleBook {
	id: i64,
	title: &'static str,
	author: &'static str,
	genre: &'static str,
	description: &'static str,
	location: &'static str,
	available: bool,
	rating: f32,
}

const SAMPLE_BOOKS: [SampleBook; 10] = [
	SampleBook {
		id: 1,
		title: "인공지능과 미래사회",
		author: "김철수",
		genre: "과학/기술",
		description: "AI 기술의 발전과 사회 변화에 대한 분석",
		location: "서울",
		available: true,
		rating: 4.5,
	},
	SampleBook {
		id: 2,
		title: "머신러닝 입문",
		author: "이영희",
		genre: "컴퓨터/프로그래밍",
		description: "머신러닝의 기본 개념과 실습",
		location: "부산",
		available: true,
		rating: 4.2,
	},
	SampleBook {
		id: 3,
		title: "딥러닝의 이해",
		author: "박민수",
		genre: "과학/기술",
		description: "딥러닝 알고리즘과 응용",
		location: "대구",
		available: false,
		rating: 4.8,
	},
	SampleBook {
		id: 4,
		title: "AI 시대의 윤리",
		author: "최지영",
		genre: "철학/사회",
		description: "인공지능 발전에 따른 윤리적 고려사항",
		location: "서울",
		available: true,
		rating: 4.0,
	},
	SampleBook {
		id: 5,
		title: "자연어 처리 기초",
		author: "정현우",
		genre: "컴퓨터/프로그래밍",
		description: "NLP 기술의 기본 원리와 구현",
		location: "부산",
		available: true,
		rating: 4.3,
	},
	SampleBook {
		id: 6,
		title: "파이썬으로 배우는 데이터 과학",
		author: "홍길동",
		genre: "컴퓨터/프로그래밍",
		description: "파이썬을 활용한 데이터 분석과 시각화 실습",
		location: "광주",
		available: true,
		rating: 4.6,
	},
	SampleBook {
		id: 7,
		title: "빅데이터 시대의 통계학",
		author: "김미정",
		genre: "과학/기술",
		description: "빅데이터 분석을 위한 통계학의 원리와 응용",
		location: "대전",
		available: true,
		rating: 4.4,
	},
	SampleBook {
		id: 8,
		title: "알고리즘 문제 해결 전략",
		author: "이준호",
		genre: "컴퓨터/프로그래밍",
		description: "코딩 테스트와 알고리즘 문제 풀이 노하우",
		location: "서울",
		available: false,
		rating: 4.7,
	},
	SampleBook {
		id: 9,
		title: "UX 디자인의 원칙",
		author: "박지은",
		genre: "디자인",
		description: "사용자 경험을 위한 디자인 이론과 실전",
		location: "부산",
		available: true,
		rating: 4.1,
	},
	SampleBook {
		id: 10,
		title: "클라우드 컴퓨팅 입문",
		author: "최성훈",
		genre: "과학/기술",
		description: "클라우드 서비스와 인프라의 이해",
		location: "인천",
		available: true,
		rating: 4.3,
	},
];

pub fn sample_catalog() -> Vec<BookRecord> {
	SAMPLE_BOOKS
		.iter()
		.map(|book| BookRecord {
			id: book.id,
			title: book.title.to_string(),
			author: book.author.to_string(),
			genre: book.genre.to_string(),
			review: book.description.to_string(),
			rating: book.rating,
			pages: None,
			cover_image: Some(format!("/api/placeholder/{}", book.id)),
			location: Some(book.location.to_string()),
			available: book.available,
			read_date: None,
			start_date: None,
		})
		.collect()
}
