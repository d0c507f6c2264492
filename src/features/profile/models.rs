use crate::features::auth::models::User;
use crate::features::community::models::Post;
use crate::shared::serde_ext::null_as_default;
use serde::{Deserialize, Serialize};

/// プロフィール更新リクエスト（指定した項目だけ更新される）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferences: Option<String>,
}

/// パスワード変更リクエスト
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChangeRequest {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

/// プロフィール更新APIのレスポンス
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdateResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    pub user: User,
}

/// ユーザーの活動統計
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    #[serde(default, deserialize_with = "null_as_default")]
    pub post_count: u64,
    /// 最近の投稿（最大5件）
    #[serde(default, deserialize_with = "null_as_default")]
    pub recent_posts: Vec<Post>,
}
