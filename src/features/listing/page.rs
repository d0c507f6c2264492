use crate::features::listing::query::ListQuery;
use crate::shared::serde_ext::{decode_each, null_as_default};
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// 一覧APIが返すページ形式 `{content, totalElements, totalPages, size, number}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_elements: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_pages: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub size: u32,
    /// ページ番号（0始まり）
    #[serde(default, deserialize_with = "null_as_default")]
    pub number: u32,
}

/// サーバーから受け取ったままの一覧レスポンス
///
/// 要素は1件ずつ読み込み、読めない要素だけを除外する。
/// 要素があるのに1件も読めない場合は読み込みエラーとなり、
/// 呼び出し側では取得失敗として扱われる。
#[derive(Debug, Clone)]
pub enum RawPage<T> {
    /// ページ形式
    Envelope(Page<T>),
    /// 配列だけが返ってきた場合
    Items(Vec<T>),
    /// どちらでもない
    Unrecognized(Value),
}

impl<'de, T> Deserialize<'de> for RawPage<T>
where
    T: de::DeserializeOwned,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Array(values) => decode_each(values)
                .map(RawPage::Items)
                .map_err(de::Error::custom),
            value if value.get("content").is_some_and(Value::is_array) => {
                let page: Page<Value> = serde_json::from_value(value).map_err(de::Error::custom)?;
                let content = decode_each(page.content).map_err(de::Error::custom)?;
                Ok(RawPage::Envelope(Page {
                    content,
                    total_elements: page.total_elements,
                    total_pages: page.total_pages,
                    size: page.size,
                    number: page.number,
                }))
            }
            value => Ok(RawPage::Unrecognized(value)),
        }
    }
}

/// 表示データの出どころ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageOrigin {
    /// APIから取得
    Remote,
    /// 取得失敗時の固定データ
    Fallback,
}

/// 正規化済みの1ページ分のデータ
#[derive(Debug, Clone, PartialEq)]
pub struct PageView<T> {
    pub items: Vec<T>,
    pub total_pages: u32,
    pub total_elements: u64,
    /// ページ番号（0始まり）
    pub number: u32,
    pub origin: PageOrigin,
}

impl<T> RawPage<T> {
    /// 画面で使う形に正規化する
    ///
    /// ページ形式ならその内容と `totalPages`、配列なら1ページ扱い、
    /// それ以外は空リストで `total_pages = 0` とする。
    pub fn normalize(self, query: &ListQuery) -> PageView<T> {
        match self {
            RawPage::Envelope(page) => PageView {
                items: page.content,
                total_pages: page.total_pages,
                total_elements: page.total_elements,
                number: page.number,
                origin: PageOrigin::Remote,
            },
            RawPage::Items(items) => PageView {
                total_pages: 1,
                total_elements: items.len() as u64,
                number: 0,
                items,
                origin: PageOrigin::Remote,
            },
            RawPage::Unrecognized(value) => {
                log::warn!("一覧レスポンスの形式を認識できません: {value}");
                PageView {
                    items: Vec::new(),
                    total_pages: 0,
                    total_elements: 0,
                    number: query.page,
                    origin: PageOrigin::Remote,
                }
            }
        }
    }
}

impl<T> PageView<T> {
    /// 固定データを1ページとして扱う
    pub fn fallback(items: Vec<T>) -> Self {
        Self {
            total_elements: items.len() as u64,
            items,
            total_pages: 1,
            number: 0,
            origin: PageOrigin::Fallback,
        }
    }
}

/// ページネーション部品に渡す値
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationView {
    /// 現在のページ（1始まり）
    pub current: u32,
    /// 総件数（totalPages × pageSize）
    pub total: u64,
    pub page_size: u32,
}

impl PaginationView {
    pub fn new(page: u32, total_pages: u32, page_size: u32) -> Self {
        Self {
            current: page + 1,
            total: u64::from(total_pages) * u64::from(page_size),
            page_size,
        }
    }
}
