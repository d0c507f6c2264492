use crate::features::auth::models::User;
use crate::features::community::models::{MessageResponse, Post};
use crate::features::listing::{FetchAdapter, ListController, ListQuery, PageSource, RawPage};
use crate::features::profile::models::{
    PasswordChangeRequest, ProfileUpdateRequest, ProfileUpdateResponse, UserStats,
};
use crate::shared::api_client::ApiClient;
use crate::shared::errors::AppResult;
use crate::shared::validation::Validate;
use std::sync::Arc;

/// 自分の投稿一覧の1ページあたりの件数
pub const MY_POSTS_PAGE_SIZE: u32 = 10;

pub type MyPostListController = ListController<Post, ProfileApi>;

/// プロフィールAPI
#[derive(Clone)]
pub struct ProfileApi {
    api_client: Arc<ApiClient>,
}

impl ProfileApi {
    pub fn new(api_client: Arc<ApiClient>) -> Self {
        Self { api_client }
    }

    /// ログイン中のユーザーのプロフィール
    pub async fn me(&self) -> AppResult<User> {
        self.api_client.get("/profile/me").await
    }

    /// プロフィールを更新する
    pub async fn update(&self, request: &ProfileUpdateRequest) -> AppResult<User> {
        request.validate()?;
        let response: ProfileUpdateResponse = self.api_client.put("/profile/me", request).await?;
        log::info!("プロフィールを更新しました: user_id={}", response.user.id);
        Ok(response.user)
    }

    /// パスワードを変更する
    pub async fn change_password(&self, request: &PasswordChangeRequest) -> AppResult<MessageResponse> {
        request.validate()?;
        self.api_client.put("/profile/password", request).await
    }

    /// 自分の投稿一覧
    pub async fn my_posts(&self, query: &ListQuery) -> AppResult<RawPage<Post>> {
        self.api_client
            .get_with_query("/profile/posts", &query.paging_pairs())
            .await
    }

    /// 活動統計
    pub async fn stats(&self) -> AppResult<UserStats> {
        self.api_client.get("/profile/stats").await
    }

    /// 自分の投稿一覧のコントローラーを作成する（失敗時は空）
    pub fn into_post_controller(self) -> MyPostListController {
        let adapter = FetchAdapter::new("내 게시글", self, |_query: &ListQuery| Vec::new());
        ListController::new(adapter, ListQuery::new(MY_POSTS_PAGE_SIZE))
    }
}

impl PageSource<Post> for ProfileApi {
    async fn fetch_page(&self, query: &ListQuery) -> AppResult<RawPage<Post>> {
        self.my_posts(query).await
    }
}
