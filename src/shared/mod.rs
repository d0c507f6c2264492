/// 共有エラー型とエラーハンドリング
pub mod errors;

/// 共有設定管理
pub mod config;

/// APIサーバーとの通信
pub mod api_client;

/// 入力フォームのバリデーション
pub mod validation;

/// レスポンスの寛容な読み込み
pub mod serde_ext;

#[cfg(test)]
pub mod test_server;

// 便利な再エクスポート
pub use api_client::{ApiClient, ApiClientConfig};
pub use config::{
    get_environment, initialize_logging_system, load_environment_variables, ApiConfig,
    Environment, EnvironmentConfig, TokenStoreConfig,
};
pub use errors::{AppError, AppResult, ErrorSeverity};
