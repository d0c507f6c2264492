use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 既定のソート項目（新しい順）
pub const DEFAULT_SORT_BY: &str = "createdAt";

/// ソート順
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// 一覧画面の検索条件
///
/// `page` は常に0始まり。1始まりに変換するのはページネーション表示だけ。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    /// 検索キーワード（空文字は未指定）
    pub keyword: String,
    pub category: Option<String>,
    pub difficulty_level: Option<String>,
    pub sort_by: String,
    pub sort_order: SortOrder,
    /// ページ番号（0始まり）
    pub page: u32,
    /// 1ページあたりの件数
    pub size: u32,
    /// 画面固有の追加条件（storeName, startDate など）
    pub filters: BTreeMap<String, String>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::new(10)
    }
}

impl ListQuery {
    pub fn new(size: u32) -> Self {
        Self {
            keyword: String::new(),
            category: None,
            difficulty_level: None,
            sort_by: DEFAULT_SORT_BY.to_string(),
            sort_order: SortOrder::Desc,
            page: 0,
            size,
            filters: BTreeMap::new(),
        }
    }

    /// キーワードが指定されているか
    pub fn has_keyword(&self) -> bool {
        !self.keyword.trim().is_empty()
    }

    /// page と size だけのクエリパラメータ
    pub fn paging_pairs(&self) -> Vec<(String, String)> {
        vec![
            ("page".to_string(), self.page.to_string()),
            ("size".to_string(), self.size.to_string()),
        ]
    }

    /// すべての条件をクエリパラメータに変換する（未指定の項目は送らない）
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = self.paging_pairs();

        if self.has_keyword() {
            pairs.push(("keyword".to_string(), self.keyword.clone()));
        }
        if let Some(category) = &self.category {
            pairs.push(("category".to_string(), category.clone()));
        }
        if let Some(difficulty) = &self.difficulty_level {
            pairs.push(("difficultyLevel".to_string(), difficulty.clone()));
        }
        pairs.push(("sortBy".to_string(), self.sort_by.clone()));
        pairs.push((
            "sortOrder".to_string(),
            self.sort_order.as_str().to_string(),
        ));

        for (key, value) in &self.filters {
            pairs.push((key.clone(), value.clone()));
        }
        pairs
    }
}
