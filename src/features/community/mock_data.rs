//! APIに接続できないときに表示する固定投稿

use crate::features::community::models::{Post, PostAuthor, PostStatus};
use crate::features::listing::query::ListQuery;

struct Entry {
    id: i64,
    title: &'static str,
    content: &'static str,
    author: &'static str,
    like_count: u64,
    comment_count: u64,
    view_count: u64,
    created_at: &'static str,
}

const ENTRIES: [Entry; 3] = [
    Entry {
        id: 1,
        title: "맛있는 김치찌개 레시피 공유해요!",
        content: "집에서 쉽게 만들 수 있는 김치찌개 레시피를 공유합니다. 신김치와 돼지고기만 있으면 충분해요.",
        author: "요리사",
        like_count: 15,
        comment_count: 8,
        view_count: 120,
        created_at: "2025-01-20T10:30:00Z",
    },
    Entry {
        id: 2,
        title: "완벽한 스테이크 굽는 법",
        content: "레스토랑 못지않은 스테이크를 집에서 굽는 방법을 알려드릴게요. 핵심은 충분한 예열과 레스팅입니다.",
        author: "고기요리사",
        like_count: 23,
        comment_count: 12,
        view_count: 180,
        created_at: "2025-01-19T15:45:00Z",
    },
    Entry {
        id: 3,
        title: "다이어트 샐러드 레시피",
        content: "건강하고 맛있는 다이어트 샐러드 레시피입니다. 닭가슴살과 각종 채소로 포만감 있게 만들어요.",
        author: "헬시쿠킹",
        like_count: 18,
        comment_count: 6,
        view_count: 95,
        created_at: "2025-01-18T09:20:00Z",
    },
];

impl Entry {
    fn to_post(&self) -> Post {
        Post {
            id: self.id,
            title: self.title.to_string(),
            content: self.content.to_string(),
            status: PostStatus::Published,
            like_count: self.like_count,
            comment_count: self.comment_count,
            view_count: self.view_count,
            author: Some(PostAuthor {
                id: self.id,
                username: self.author.to_string(),
                display_name: Some(self.author.to_string()),
                avatar_url: None,
            }),
            author_name: Some(self.author.to_string()),
            created_at: Some(self.created_at.to_string()),
            updated_at: None,
        }
    }
}

/// 固定投稿全件
pub fn all_posts() -> Vec<Post> {
    ENTRIES.iter().map(Entry::to_post).collect()
}

/// 一覧の代替表示（検索条件に関わらず全件）
pub fn posts_for(_query: &ListQuery) -> Vec<Post> {
    all_posts()
}
