/// プロフィール機能のモジュール
pub mod api;
pub mod models;

pub use api::{MyPostListController, ProfileApi, MY_POSTS_PAGE_SIZE};
pub use models::{PasswordChangeRequest, ProfileUpdateRequest, ProfileUpdateResponse, UserStats};
