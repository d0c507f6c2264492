use serde::{Deserialize, Serialize};

/// タグ（レシートやレシピの分類に使う）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: i64,
    pub name: String,
    /// 16進カラーコード（例: #1677ff）
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Tag {
    /// 名前に検索文字列を含むか（大文字小文字を区別しない）
    pub fn name_contains(&self, text: &str) -> bool {
        self.name.to_lowercase().contains(&text.to_lowercase())
    }
}

/// タグ作成・更新リクエスト
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagRequest {
    pub name: String,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TagRequest {
    pub fn new(name: &str, color: &str) -> Self {
        Self {
            name: name.to_string(),
            color: color.to_string(),
            description: None,
        }
    }

    /// 既存タグの編集フォーム初期値
    pub fn from_tag(tag: &Tag) -> Self {
        Self {
            name: tag.name.clone(),
            color: tag.color.clone().unwrap_or_default(),
            description: tag.description.clone(),
        }
    }
}

/// 検索文字列で絞り込む（空なら全件）
pub fn filter_by_name<'a>(tags: &'a [Tag], text: &str) -> Vec<&'a Tag> {
    let text = text.trim();
    tags.iter().filter(|tag| tag.name_contains(text)).collect()
}
