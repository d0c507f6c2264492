pub mod features;
pub mod shared;

use features::auth::{AuthService, FileTokenStore, TokenStore};
use features::community::CommunityApi;
use features::favorites::FavoritesApi;
use features::notifications::NotificationsApi;
use features::profile::ProfileApi;
use features::ratings::RatingsApi;
use features::receipts::{ReceiptApi, ReceiptUploader};
use features::recipes::RecipeApi;
use features::tags::TagsApi;
use log::{error, info, warn};
use shared::config::initialization::ensure_parent_directory;
use shared::{
    initialize_logging_system, load_environment_variables, ApiClient, ApiClientConfig, ApiConfig,
    AppResult, EnvironmentConfig, TokenStoreConfig,
};
use std::sync::Arc;

/// アプリケーション状態（各機能のAPIを保持）
///
/// すべてのAPIは同じ ApiClient とトークン保存先を共有する。
#[derive(Clone)]
pub struct AppState {
    pub api_client: Arc<ApiClient>,
    pub auth: AuthService,
    pub recipes: RecipeApi,
    pub receipts: ReceiptApi,
    pub community: CommunityApi,
    pub profile: ProfileApi,
    pub favorites: FavoritesApi,
    pub ratings: RatingsApi,
    pub notifications: NotificationsApi,
    pub tags: TagsApi,
}

impl AppState {
    pub fn new(api_client: Arc<ApiClient>) -> Self {
        Self {
            auth: AuthService::new(Arc::clone(&api_client)),
            recipes: RecipeApi::new(Arc::clone(&api_client)),
            receipts: ReceiptApi::new(Arc::clone(&api_client)),
            community: CommunityApi::new(Arc::clone(&api_client)),
            profile: ProfileApi::new(Arc::clone(&api_client)),
            favorites: FavoritesApi::new(Arc::clone(&api_client)),
            ratings: RatingsApi::new(Arc::clone(&api_client)),
            notifications: NotificationsApi::new(Arc::clone(&api_client)),
            tags: TagsApi::new(Arc::clone(&api_client)),
            api_client,
        }
    }

    /// 環境変数の設定から状態を組み立てる
    pub fn from_env() -> AppResult<Self> {
        let api_config = ApiConfig::from_env();
        api_config.validate()?;
        for warning in api_config.environment_warnings(&EnvironmentConfig::from_env()) {
            warn!("{warning}");
        }

        let token_config = TokenStoreConfig::from_env()?;
        ensure_parent_directory(&token_config.path)?;
        let token_store: Arc<dyn TokenStore> = Arc::new(FileTokenStore::from_config(&token_config));

        let api_client = ApiClient::new_with_config(ApiClientConfig::from(api_config), token_store)?;
        Ok(Self::new(Arc::new(api_client)))
    }

    /// レシートのアップロードフローを作成する
    pub fn receipt_uploader(&self) -> ReceiptUploader {
        ReceiptUploader::new(self.receipts.clone())
    }
}

/// 起動処理
///
/// 設定を読み込み、保存済みセッションを復元してからレシピ一覧の1ページ目を読み込む。
pub async fn run() -> AppResult<AppState> {
    load_environment_variables();
    initialize_logging_system();

    let env_config = EnvironmentConfig::from_env();
    info!(
        "アプリケーション初期化を開始します: environment={}",
        env_config.environment
    );

    let state = AppState::from_env().map_err(|e| {
        error!("初期化に失敗しました: {e}");
        e
    })?;

    let auth_state = state.auth.restore_session().await;
    match &auth_state.user {
        Some(user) => info!("セッションを復元しました: {}", user.display_label()),
        None => info!("未ログイン状態で起動します"),
    }

    let recipes = state.recipes.clone().into_list_controller();
    let first_page = recipes.refresh().await;
    if first_page.items.is_empty() {
        warn!("レシピが1件もありません");
    }
    info!(
        "レシピ一覧を読み込みました: items={}, total_pages={}, origin={:?}",
        first_page.items.len(),
        first_page.total_pages,
        first_page.origin
    );

    info!("アプリケーション初期化が完了しました");
    Ok(state)
}
