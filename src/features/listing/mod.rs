/// 一覧画面の共通部品（検索条件・ページ取得・状態管理）
pub mod adapter;
pub mod controller;
pub mod page;
pub mod query;

pub use adapter::{FetchAdapter, PageSource};
pub use controller::{ListController, ListState, DEFAULT_DEBOUNCE};
pub use page::{Page, PageOrigin, PageView, PaginationView, RawPage};
pub use query::{ListQuery, SortOrder, DEFAULT_SORT_BY};
