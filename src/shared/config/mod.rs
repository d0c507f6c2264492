/// 環境設定関連のモジュール
pub mod environment;

/// 起動時の初期化（保存先パスなど）
pub mod initialization;

// 便利な再エクスポート
pub use environment::{
    get_environment, initialize_logging_system, load_environment_variables, ApiConfig,
    Environment, EnvironmentConfig,
};
pub use initialization::{default_token_store_path, TokenStoreConfig};
