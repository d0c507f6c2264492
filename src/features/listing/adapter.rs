use crate::features::listing::page::{PageView, RawPage};
use crate::features::listing::query::ListQuery;
use crate::shared::errors::AppResult;
use std::future::Future;

/// 一覧データの取得元
pub trait PageSource<T>: Send + Sync + 'static {
    /// 検索条件に対応する1ページ分を取得する
    fn fetch_page(&self, query: &ListQuery) -> impl Future<Output = AppResult<RawPage<T>>> + Send;
}

type FallbackFn<T> = Box<dyn Fn(&ListQuery) -> Vec<T> + Send + Sync>;

/// 取得元をラップし、レスポンスの正規化と失敗時の固定データ差し替えを行う
///
/// 失敗しても再取得はしない。
pub struct FetchAdapter<T, S> {
    name: &'static str,
    source: S,
    fallback: FallbackFn<T>,
}

impl<T, S> FetchAdapter<T, S>
where
    T: Send + 'static,
    S: PageSource<T>,
{
    /// # 引数
    /// * `name` - ログ出力用の一覧名
    /// * `source` - 取得元
    /// * `fallback` - 取得失敗時に表示する固定データ
    pub fn new<F>(name: &'static str, source: S, fallback: F) -> Self
    where
        F: Fn(&ListQuery) -> Vec<T> + Send + Sync + 'static,
    {
        Self {
            name,
            source,
            fallback: Box::new(fallback),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// 1ページ分を読み込む
    pub async fn load(&self, query: &ListQuery) -> PageView<T> {
        match self.source.fetch_page(query).await {
            Ok(raw) => {
                let view = raw.normalize(query);
                log::debug!(
                    "{}を取得しました: page={}, items={}, total_pages={}",
                    self.name,
                    query.page,
                    view.items.len(),
                    view.total_pages
                );
                view
            }
            Err(e) => {
                log::log!(
                    e.severity().log_level(),
                    "{}の取得に失敗したため固定データを表示します: {e}",
                    self.name
                );
                PageView::fallback((self.fallback)(query))
            }
        }
    }
}
