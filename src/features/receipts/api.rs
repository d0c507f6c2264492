use crate::features::listing::{FetchAdapter, ListController, ListQuery, PageSource, RawPage};
use crate::features::receipts::mock_data;
use crate::features::receipts::models::{
    ExpiringIngredient, ProcessResponse, Receipt, ReceiptStats, ReceiptUpdate, UploadResponse,
};
use crate::shared::api_client::ApiClient;
use crate::shared::errors::AppResult;
use reqwest::multipart::Form;
use std::sync::Arc;

/// レシート一覧の1ページあたりの件数
pub const RECEIPT_PAGE_SIZE: u32 = 10;

/// 店名で絞り込むフィルターのキー
pub const STORE_NAME_FILTER: &str = "storeName";

pub type ReceiptListController = ListController<Receipt, ReceiptApi>;

/// レシートAPI
#[derive(Clone)]
pub struct ReceiptApi {
    api_client: Arc<ApiClient>,
}

impl ReceiptApi {
    pub fn new(api_client: Arc<ApiClient>) -> Self {
        Self { api_client }
    }

    /// レシート画像をアップロードする（フィールド名 `file`）
    pub async fn upload(&self, form: Form) -> AppResult<UploadResponse> {
        self.api_client.post_multipart("/receipts/upload", form).await
    }

    /// レシート一覧を取得する
    ///
    /// キーワードは `searchTerm`、店名フィルターは `storeName` として送る
    pub async fn list(&self, query: &ListQuery) -> AppResult<RawPage<Receipt>> {
        let mut params = query.paging_pairs();
        if let Some(store) = query.filters.get(STORE_NAME_FILTER) {
            params.push((STORE_NAME_FILTER.to_string(), store.clone()));
        }
        if query.has_keyword() {
            params.push(("searchTerm".to_string(), query.keyword.trim().to_string()));
        }
        self.api_client.get_with_query("/receipts", &params).await
    }

    pub async fn get(&self, id: i64) -> AppResult<Receipt> {
        self.api_client.get(&format!("/receipts/{id}")).await
    }

    pub async fn update(&self, id: i64, update: &ReceiptUpdate) -> AppResult<Receipt> {
        self.api_client
            .put(&format!("/receipts/{id}"), update)
            .await
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        log::info!("レシートを削除します: id={id}");
        self.api_client.delete(&format!("/receipts/{id}")).await
    }

    /// 登録済みの店名一覧
    pub async fn stores(&self) -> AppResult<Vec<String>> {
        self.api_client.get("/receipts/stores").await
    }

    /// 指定日数以内に期限が切れる食材
    pub async fn expiring_ingredients(&self, days: u32) -> AppResult<Vec<ExpiringIngredient>> {
        self.api_client
            .get_with_query("/receipts/ingredients/expiring", &[("days", days)])
            .await
    }

    /// アップロード済みレシートのOCR処理を実行する
    pub async fn process(&self, id: i64) -> AppResult<ProcessResponse> {
        self.api_client
            .post_empty(&format!("/receipts/process/{id}"))
            .await
    }

    /// レシート一覧画面のコントローラーを作成する
    pub fn into_list_controller(self) -> ReceiptListController {
        let adapter = FetchAdapter::new("영수증 목록", self, mock_data::receipts_for);
        ListController::new(adapter, ListQuery::new(RECEIPT_PAGE_SIZE))
    }
}

impl PageSource<Receipt> for ReceiptApi {
    async fn fetch_page(&self, query: &ListQuery) -> AppResult<RawPage<Receipt>> {
        self.list(query).await
    }
}

/// 一覧画面に表示中のレシートの集計
pub fn current_page_stats(controller: &ReceiptListController) -> ReceiptStats {
    ReceiptStats::from_receipts(&controller.state().items)
}
