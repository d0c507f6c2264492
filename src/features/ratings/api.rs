use crate::features::community::models::MessageResponse;
use crate::features::listing::{FetchAdapter, ListController, ListQuery, PageSource, RawPage};
use crate::features::ratings::models::{
    AverageRating, Rating, RatingRequest, SavedRating, UserRatingStatus,
};
use crate::shared::api_client::ApiClient;
use crate::shared::errors::AppResult;
use crate::shared::validation::Validate;
use serde::Serialize;
use std::sync::Arc;

/// 評価一覧の1ページあたりの件数
pub const RATINGS_PAGE_SIZE: u32 = 10;

pub type RatingListController = ListController<Rating, RecipeRatings>;

/// 高評価レシピの取得条件
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HighRatedQuery {
    pub min_rating: i32,
    pub limit: u32,
}

impl Default for HighRatedQuery {
    fn default() -> Self {
        Self {
            min_rating: 4,
            limit: 10,
        }
    }
}

/// レシピ評価API
#[derive(Clone)]
pub struct RatingsApi {
    api_client: Arc<ApiClient>,
}

impl RatingsApi {
    pub fn new(api_client: Arc<ApiClient>) -> Self {
        Self { api_client }
    }

    /// 評価を登録する（既にあれば更新）
    pub async fn add_or_update(
        &self,
        recipe_id: i64,
        user_id: i64,
        request: &RatingRequest,
    ) -> AppResult<Rating> {
        request.validate()?;
        let saved: SavedRating = self
            .api_client
            .post(&format!("/ratings/recipes/{recipe_id}/users/{user_id}"), request)
            .await?;
        log::info!(
            "評価を保存しました: recipe_id={recipe_id}, rating={}",
            saved.rating.rating
        );
        Ok(saved.rating)
    }

    pub async fn delete(&self, recipe_id: i64, user_id: i64) -> AppResult<MessageResponse> {
        self.api_client
            .delete_json(&format!("/ratings/recipes/{recipe_id}/users/{user_id}"))
            .await
    }

    /// レシピに付いた評価一覧
    pub async fn recipe_ratings(&self, recipe_id: i64, query: &ListQuery) -> AppResult<RawPage<Rating>> {
        self.api_client
            .get_with_query(&format!("/ratings/recipes/{recipe_id}"), &query.paging_pairs())
            .await
    }

    /// ユーザーが付けた評価一覧
    pub async fn user_ratings(&self, user_id: i64, query: &ListQuery) -> AppResult<RawPage<Rating>> {
        self.api_client
            .get_with_query(&format!("/ratings/users/{user_id}"), &query.paging_pairs())
            .await
    }

    /// 特定ユーザーがレシピに付けた評価
    pub async fn user_rating_for_recipe(&self, recipe_id: i64, user_id: i64) -> AppResult<Option<Rating>> {
        let status: UserRatingStatus = self
            .api_client
            .get(&format!("/ratings/recipes/{recipe_id}/users/{user_id}"))
            .await?;
        Ok(status.rating.filter(|_| status.has_rating))
    }

    pub async fn average(&self, recipe_id: i64) -> AppResult<AverageRating> {
        self.api_client
            .get(&format!("/ratings/recipes/{recipe_id}/average"))
            .await
    }

    /// 高評価のレシピ
    pub async fn high_rated(&self, query: HighRatedQuery) -> AppResult<Vec<Rating>> {
        self.api_client
            .get_with_query("/ratings/high-rated", &query)
            .await
    }

    /// レシピ詳細画面の評価一覧コントローラーを作成する（失敗時は空）
    pub fn recipe_controller(&self, recipe_id: i64) -> RatingListController {
        let source = RecipeRatings {
            api: self.clone(),
            recipe_id,
        };
        let adapter = FetchAdapter::new("레시피 평점", source, |_query: &ListQuery| Vec::new());
        ListController::new(adapter, ListQuery::new(RATINGS_PAGE_SIZE))
    }
}

/// 特定レシピの評価
#[derive(Clone)]
pub struct RecipeRatings {
    api: RatingsApi,
    recipe_id: i64,
}

impl PageSource<Rating> for RecipeRatings {
    async fn fetch_page(&self, query: &ListQuery) -> AppResult<RawPage<Rating>> {
        self.api.recipe_ratings(self.recipe_id, query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::token_store::MemoryTokenStore;
    use crate::shared::api_client::ApiClientConfig;
    use crate::shared::errors::AppError;
    use crate::shared::test_server::{MockResponse, TestServer};

    const RATING: &str = r#"{"id":1,"recipeId":5,"userId":2,"rating":5,"comment":"최고","isFavorite":true}"#;

    fn api_for(server: &TestServer) -> RatingsApi {
        let config = ApiClientConfig {
            base_url: server.base_url(),
            timeout_seconds: 5,
        };
        let client = ApiClient::new_with_config(config, Arc::new(MemoryTokenStore::new())).unwrap();
        RatingsApi::new(Arc::new(client))
    }

    #[tokio::test]
    async fn test_add_or_update_unwraps_rating() {
        let body = format!(r#"{{"message":"평점이 성공적으로 저장되었습니다.","rating":{RATING}}}"#);
        let server = TestServer::start(move |_req| MockResponse::json(200, &body)).await;
        let api = api_for(&server);

        let request = RatingRequest {
            rating: 5,
            comment: Some("최고".to_string()),
            is_favorite: Some(true),
        };
        let rating = api.add_or_update(5, 2, &request).await.unwrap();

        assert_eq!(rating.rating, 5);
        let sent = &server.requests()[0];
        assert_eq!(sent.path, "/api/ratings/recipes/5/users/2");
        assert!(sent.body.contains("\"isFavorite\":true"));
    }

    #[tokio::test]
    async fn test_out_of_range_rating_is_not_sent() {
        let server = TestServer::start(|_req| MockResponse::json(200, "{}")).await;
        let api = api_for(&server);

        let request = RatingRequest {
            rating: 0,
            comment: None,
            is_favorite: None,
        };

        assert!(matches!(
            api.add_or_update(5, 2, &request).await,
            Err(AppError::Validation(_))
        ));
        assert!(server.requests().is_empty());
    }

    #[tokio::test]
    async fn test_user_rating_for_recipe() {
        let server = TestServer::start(|req| {
            if req.path.ends_with("/users/2") {
                MockResponse::json(200, &format!(r#"{{"hasRating":true,"rating":{RATING}}}"#))
            } else {
                MockResponse::json(200, r#"{"hasRating":false,"rating":null}"#)
            }
        })
        .await;
        let api = api_for(&server);

        assert!(api.user_rating_for_recipe(5, 2).await.unwrap().is_some());
        assert!(api.user_rating_for_recipe(5, 3).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_average_and_high_rated() {
        let server = TestServer::start(|req| {
            if req.path.ends_with("/average") {
                MockResponse::json(200, r#"{"averageRating":4.3,"ratingCount":12}"#)
            } else {
                MockResponse::json(200, &format!("[{RATING}]"))
            }
        })
        .await;
        let api = api_for(&server);

        let average = api.average(5).await.unwrap();
        assert_eq!(average.average_rating, 4.3);
        assert_eq!(average.rating_count, 12);

        let high = api.high_rated(HighRatedQuery::default()).await.unwrap();
        assert_eq!(high.len(), 1);

        let request = server
            .requests()
            .into_iter()
            .find(|r| r.path == "/api/ratings/high-rated")
            .unwrap();
        assert_eq!(request.query_param("minRating").as_deref(), Some("4"));
        assert_eq!(request.query_param("limit").as_deref(), Some("10"));
    }

    #[tokio::test]
    async fn test_recipe_controller_pages_ratings() {
        let server = TestServer::start(|_req| {
            MockResponse::json(
                200,
                &format!(
                    r#"{{"content":[{RATING}],"totalPages":4,"totalElements":31,"size":10,"number":2}}"#
                ),
            )
        })
        .await;
        let controller = api_for(&server).recipe_controller(5);

        let state = controller.select_page(3).await;

        assert_eq!(state.items.len(), 1);
        assert_eq!(controller.pagination().current, 3);
        assert_eq!(server.requests()[0].query_param("page").as_deref(), Some("2"));
    }
}
