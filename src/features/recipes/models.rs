use crate::shared::serde_ext::null_as_default;
use serde::{Deserialize, Deserializer, Serialize};

/// レシピの難易度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DifficultyLevel {
    #[serde(alias = "easy", alias = "매우 쉬움", alias = "쉬움")]
    Easy,
    #[serde(alias = "medium", alias = "보통")]
    Medium,
    #[serde(alias = "hard", alias = "어려움")]
    Hard,
}

impl DifficultyLevel {
    pub const ALL: [DifficultyLevel; 3] = [
        DifficultyLevel::Easy,
        DifficultyLevel::Medium,
        DifficultyLevel::Hard,
    ];

    /// APIで使う値（EASY / MEDIUM / HARD）
    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyLevel::Easy => "EASY",
            DifficultyLevel::Medium => "MEDIUM",
            DifficultyLevel::Hard => "HARD",
        }
    }

    /// API値または画面表示のラベルから変換する
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "EASY" | "easy" | "Easy" | "매우 쉬움" | "쉬움" => Some(DifficultyLevel::Easy),
            "MEDIUM" | "medium" | "Medium" | "보통" => Some(DifficultyLevel::Medium),
            "HARD" | "hard" | "Hard" | "어려움" => Some(DifficultyLevel::Hard),
            _ => None,
        }
    }

    /// 未知の値や `null` は `None` として読み込む
    fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Option<Self>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let label = Option::<String>::deserialize(deserializer)?;
        Ok(label.as_deref().and_then(Self::from_label))
    }
}

/// レシピの作成者
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeAuthor {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// レシピの材料
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeIngredient {
    #[serde(default)]
    pub id: Option<i64>,
    pub ingredient_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub quantity: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub unit: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// レシピ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub instructions: Option<String>,
    /// 調理時間（分）
    #[serde(default)]
    pub cooking_time: Option<u32>,
    #[serde(default)]
    pub servings: Option<u32>,
    /// サーバー側は自由入力の文字列
    #[serde(default, deserialize_with = "DifficultyLevel::deserialize_lenient")]
    pub difficulty_level: Option<DifficultyLevel>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ingredients: Vec<RecipeIngredient>,
    /// 作成者（APIによって `user` または `author` で返る）
    #[serde(default, alias = "user")]
    pub author: Option<RecipeAuthor>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// 外部レシピ取り込みの結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResult {
    pub imported_count: u32,
    pub total_found: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
}
