use crate::features::community::mock_data;
use crate::features::community::models::{
    Comment, CommentRequest, LikeStatus, MessageResponse, Post, PostRequest,
};
use crate::features::listing::{FetchAdapter, ListController, ListQuery, PageSource, RawPage};
use crate::shared::api_client::ApiClient;
use crate::shared::errors::AppResult;
use crate::shared::validation::Validate;
use std::sync::Arc;

/// 投稿一覧・コメント一覧の1ページあたりの件数
pub const COMMUNITY_PAGE_SIZE: u32 = 10;

pub type PostListController = ListController<Post, CommunityApi>;
pub type CommentListController = ListController<Comment, PostComments>;

/// コミュニティAPI
#[derive(Clone)]
pub struct CommunityApi {
    api_client: Arc<ApiClient>,
}

impl CommunityApi {
    pub fn new(api_client: Arc<ApiClient>) -> Self {
        Self { api_client }
    }

    /// 投稿一覧を取得する
    ///
    /// キーワードがあれば検索APIを使う
    pub async fn list_posts(&self, query: &ListQuery) -> AppResult<RawPage<Post>> {
        let mut params = query.paging_pairs();
        if query.has_keyword() {
            params.push(("keyword".to_string(), query.keyword.trim().to_string()));
            self.api_client
                .get_with_query("/community/posts/search", &params)
                .await
        } else {
            self.api_client
                .get_with_query("/community/posts", &params)
                .await
        }
    }

    pub async fn get_post(&self, id: i64) -> AppResult<Post> {
        self.api_client.get(&format!("/community/posts/{id}")).await
    }

    /// 投稿を作成する（送信前に入力を検証）
    pub async fn create_post(&self, request: &PostRequest) -> AppResult<Post> {
        request.validate()?;
        let post: Post = self.api_client.post("/community/posts", request).await?;
        log::info!("投稿を作成しました: id={}", post.id);
        Ok(post)
    }

    pub async fn update_post(&self, id: i64, request: &PostRequest) -> AppResult<Post> {
        request.validate()?;
        self.api_client
            .put(&format!("/community/posts/{id}"), request)
            .await
    }

    pub async fn delete_post(&self, id: i64) -> AppResult<MessageResponse> {
        self.api_client
            .delete_json(&format!("/community/posts/{id}"))
            .await
    }

    /// いいねの多い投稿
    pub async fn popular_posts(&self) -> AppResult<Vec<Post>> {
        self.api_client.get("/community/posts/popular").await
    }

    /// 閲覧数の多い投稿
    pub async fn most_viewed_posts(&self) -> AppResult<Vec<Post>> {
        self.api_client.get("/community/posts/most-viewed").await
    }

    /// 投稿のコメント一覧
    pub async fn comments(&self, post_id: i64, query: &ListQuery) -> AppResult<RawPage<Comment>> {
        self.api_client
            .get_with_query(
                &format!("/community/posts/{post_id}/comments"),
                &query.paging_pairs(),
            )
            .await
    }

    pub async fn create_comment(&self, post_id: i64, request: &CommentRequest) -> AppResult<Comment> {
        request.validate()?;
        self.api_client
            .post(&format!("/community/posts/{post_id}/comments"), request)
            .await
    }

    pub async fn update_comment(&self, id: i64, request: &CommentRequest) -> AppResult<Comment> {
        request.validate()?;
        self.api_client
            .put(&format!("/community/comments/{id}"), request)
            .await
    }

    pub async fn delete_comment(&self, id: i64) -> AppResult<MessageResponse> {
        self.api_client
            .delete_json(&format!("/community/comments/{id}"))
            .await
    }

    /// いいねを切り替える
    pub async fn toggle_like(&self, post_id: i64) -> AppResult<LikeStatus> {
        self.api_client
            .post_empty(&format!("/community/posts/{post_id}/like"))
            .await
    }

    pub async fn like_status(&self, post_id: i64) -> AppResult<LikeStatus> {
        self.api_client
            .get(&format!("/community/posts/{post_id}/like-status"))
            .await
    }

    /// 投稿一覧画面のコントローラーを作成する
    pub fn into_post_controller(self) -> PostListController {
        let adapter = FetchAdapter::new("커뮤니티 게시글", self, mock_data::posts_for);
        ListController::new(adapter, ListQuery::new(COMMUNITY_PAGE_SIZE))
    }

    /// 投稿詳細画面のコメント一覧コントローラーを作成する
    ///
    /// 取得に失敗した場合は空の一覧を表示する
    pub fn comment_controller(&self, post_id: i64) -> CommentListController {
        let source = PostComments {
            api: self.clone(),
            post_id,
        };
        let adapter = FetchAdapter::new("댓글 목록", source, |_query: &ListQuery| Vec::new());
        ListController::new(adapter, ListQuery::new(COMMUNITY_PAGE_SIZE))
    }
}

impl PageSource<Post> for CommunityApi {
    async fn fetch_page(&self, query: &ListQuery) -> AppResult<RawPage<Post>> {
        self.list_posts(query).await
    }
}

/// 特定の投稿に付いたコメント
#[derive(Clone)]
pub struct PostComments {
    api: CommunityApi,
    post_id: i64,
}

impl PostComments {
    pub fn post_id(&self) -> i64 {
        self.post_id
    }
}

impl PageSource<Comment> for PostComments {
    async fn fetch_page(&self, query: &ListQuery) -> AppResult<RawPage<Comment>> {
        self.api.comments(self.post_id, query).await
    }
}
