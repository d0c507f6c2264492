use crate::shared::serde_ext::null_as_default;
use serde::{Deserialize, Serialize};

/// 評価の登録・更新リクエスト
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingRequest {
    /// 1〜5
    pub rating: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_favorite: Option<bool>,
}

/// レシピの評価
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    pub id: i64,
    pub recipe_id: i64,
    #[serde(default)]
    pub recipe_name: Option<String>,
    pub user_id: i64,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub user_display_name: Option<String>,
    #[serde(default)]
    pub user_avatar_url: Option<String>,
    pub rating: i32,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub is_favorite: Option<bool>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Rating {
    /// 星の表示（★★★☆☆）
    pub fn stars(&self) -> String {
        let filled = self.rating.clamp(0, 5) as usize;
        format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
    }
}

/// 登録・更新APIのレスポンス
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SavedRating {
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    pub rating: Rating,
}

/// 特定ユーザーの評価の有無
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRatingStatus {
    pub has_rating: bool,
    #[serde(default)]
    pub rating: Option<Rating>,
}

/// 平均評価（小数第1位に丸め済み）
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AverageRating {
    #[serde(default, deserialize_with = "null_as_default")]
    pub average_rating: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rating_count: u64,
}
