/// 認証機能のモジュール
pub mod encryption;
pub mod models;
pub mod service;
pub mod token_store;

pub use models::*;
pub use service::*;
pub use token_store::{FileTokenStore, MemoryTokenStore, TokenStore};
