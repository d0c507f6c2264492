use crate::features::listing::{FetchAdapter, ListController, ListQuery, PageSource, RawPage};
use crate::features::recipes::mock_data;
use crate::features::recipes::models::{ImportResult, Recipe};
use crate::shared::api_client::ApiClient;
use crate::shared::errors::AppResult;
use std::sync::Arc;

/// レシピ一覧の1ページあたりの件数
pub const RECIPE_PAGE_SIZE: u32 = 12;

pub type RecipeListController = ListController<Recipe, RecipeApi>;

/// レシピAPI
#[derive(Clone)]
pub struct RecipeApi {
    api_client: Arc<ApiClient>,
}

impl RecipeApi {
    pub fn new(api_client: Arc<ApiClient>) -> Self {
        Self { api_client }
    }

    /// レシピ一覧を取得する
    pub async fn list(&self, query: &ListQuery) -> AppResult<RawPage<Recipe>> {
        self.api_client
            .get_with_query("/recipes", &query.to_query_pairs())
            .await
    }

    /// レシピ詳細を取得する
    pub async fn get(&self, id: i64) -> AppResult<Recipe> {
        self.api_client.get(&format!("/recipes/{id}")).await
    }

    /// カテゴリ一覧
    pub async fn categories(&self) -> AppResult<Vec<String>> {
        self.api_client.get("/recipes/categories").await
    }

    /// 難易度一覧
    pub async fn difficulty_levels(&self) -> AppResult<Vec<String>> {
        self.api_client.get("/recipes/difficulty-levels").await
    }

    /// 外部サービスの韓国料理レシピ（取り込み前のプレビュー）
    pub async fn korean_recipes(&self, number: u32) -> AppResult<Vec<serde_json::Value>> {
        self.api_client
            .get_with_query("/recipes/external/korean", &[("number", number)])
            .await
    }

    /// 外部サービスの韓国料理レシピを取り込む
    pub async fn import_korean_recipes(&self, number: u32) -> AppResult<ImportResult> {
        log::info!("外部レシピの取り込みを開始します: number={number}");
        let result: ImportResult = self
            .api_client
            .post_empty(&format!("/recipes/external/import?number={number}"))
            .await?;
        log::info!(
            "外部レシピを取り込みました: imported={}, found={}",
            result.imported_count,
            result.total_found
        );
        Ok(result)
    }

    /// レシピ一覧画面のコントローラーを作成する
    ///
    /// 取得に失敗した場合は固定レシピに検索条件を適用して表示する
    pub fn into_list_controller(self) -> RecipeListController {
        let adapter = FetchAdapter::new("레시피 목록", self, mock_data::recipes_for);
        ListController::new(adapter, ListQuery::new(RECIPE_PAGE_SIZE))
    }
}

impl PageSource<Recipe> for RecipeApi {
    async fn fetch_page(&self, query: &ListQuery) -> AppResult<RawPage<Recipe>> {
        self.list(query).await
    }
}
