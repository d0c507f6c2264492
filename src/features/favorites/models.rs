use crate::features::recipes::models::Recipe;
use serde::{Deserialize, Serialize};

/// お気に入り登録
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    pub id: i64,
    #[serde(default)]
    pub recipe: Option<Recipe>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// 切り替え・確認APIのレスポンス
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteStatus {
    pub is_favorite: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// 件数APIのレスポンス
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FavoriteCount {
    pub count: u64,
}
