use crate::features::favorites::models::{Favorite, FavoriteCount, FavoriteStatus};
use crate::features::listing::{FetchAdapter, ListController, ListQuery, PageSource, RawPage};
use crate::shared::api_client::ApiClient;
use crate::shared::errors::AppResult;
use std::sync::Arc;

/// お気に入り一覧の1ページあたりの件数
pub const FAVORITES_PAGE_SIZE: u32 = 20;

pub type FavoriteListController = ListController<Favorite, UserFavorites>;

/// お気に入りAPI
#[derive(Clone)]
pub struct FavoritesApi {
    api_client: Arc<ApiClient>,
}

impl FavoritesApi {
    pub fn new(api_client: Arc<ApiClient>) -> Self {
        Self { api_client }
    }

    /// お気に入りを切り替える（登録済みなら解除）
    pub async fn toggle(&self, recipe_id: i64, user_id: i64) -> AppResult<FavoriteStatus> {
        let status: FavoriteStatus = self
            .api_client
            .post_empty(&format!("/favorites/recipes/{recipe_id}/users/{user_id}/toggle"))
            .await?;
        log::debug!(
            "お気に入りを切り替えました: recipe_id={recipe_id}, is_favorite={}",
            status.is_favorite
        );
        Ok(status)
    }

    pub async fn check(&self, recipe_id: i64, user_id: i64) -> AppResult<bool> {
        let status: FavoriteStatus = self
            .api_client
            .get(&format!("/favorites/recipes/{recipe_id}/users/{user_id}/check"))
            .await?;
        Ok(status.is_favorite)
    }

    /// ユーザーのお気に入り一覧
    pub async fn user_favorites(&self, user_id: i64, query: &ListQuery) -> AppResult<RawPage<Favorite>> {
        self.api_client
            .get_with_query(&format!("/favorites/users/{user_id}"), &query.paging_pairs())
            .await
    }

    pub async fn user_count(&self, user_id: i64) -> AppResult<u64> {
        let count: FavoriteCount = self
            .api_client
            .get(&format!("/favorites/users/{user_id}/count"))
            .await?;
        Ok(count.count)
    }

    pub async fn recipe_count(&self, recipe_id: i64) -> AppResult<u64> {
        let count: FavoriteCount = self
            .api_client
            .get(&format!("/favorites/recipes/{recipe_id}/count"))
            .await?;
        Ok(count.count)
    }

    /// お気に入り画面のコントローラーを作成する（失敗時は空）
    pub fn list_controller(&self, user_id: i64) -> FavoriteListController {
        let source = UserFavorites {
            api: self.clone(),
            user_id,
        };
        let adapter = FetchAdapter::new("즐겨찾기", source, |_query: &ListQuery| Vec::new());
        ListController::new(adapter, ListQuery::new(FAVORITES_PAGE_SIZE))
    }
}

/// 特定ユーザーのお気に入り
#[derive(Clone)]
pub struct UserFavorites {
    api: FavoritesApi,
    user_id: i64,
}

impl PageSource<Favorite> for UserFavorites {
    async fn fetch_page(&self, query: &ListQuery) -> AppResult<RawPage<Favorite>> {
        self.api.user_favorites(self.user_id, query).await
    }
}
