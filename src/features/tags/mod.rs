/// タグ管理
pub mod api;
pub mod models;

pub use api::TagsApi;
pub use models::{filter_by_name, Tag, TagRequest};
