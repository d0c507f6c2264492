use crate::features::listing::adapter::{FetchAdapter, PageSource};
use crate::features::listing::page::{PageOrigin, PaginationView};
use crate::features::listing::query::{ListQuery, SortOrder};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// キーワード入力のデバウンス間隔
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// 一覧画面の表示状態
#[derive(Debug, Clone, PartialEq)]
pub struct ListState<T> {
    pub items: Vec<T>,
    pub total_pages: u32,
    pub total_elements: u64,
    /// 表示中のページ（0始まり）
    pub page: u32,
    pub size: u32,
    pub loading: bool,
    /// 最後に表示したデータの出どころ（未取得ならNone）
    pub origin: Option<PageOrigin>,
    /// 取得結果を反映した回数
    pub revision: u64,
}

impl<T> ListState<T> {
    fn empty(size: u32) -> Self {
        Self {
            items: Vec::new(),
            total_pages: 0,
            total_elements: 0,
            page: 0,
            size,
            loading: false,
            origin: None,
            revision: 0,
        }
    }

    /// ページネーション部品に渡す値
    pub fn pagination(&self) -> PaginationView {
        PaginationView::new(self.page, self.total_pages, self.size)
    }
}

struct Inner<T, S> {
    adapter: FetchAdapter<T, S>,
    query: Mutex<ListQuery>,
    state: watch::Sender<ListState<T>>,
    debounce: Duration,
    /// 最新のキーワード入力の世代。古いタイマーはこれと一致しないので何もしない
    keyword_generation: AtomicU64,
}

/// 検索・絞り込み・並び替え・ページングの状態を持つ一覧コントローラー
///
/// 条件が変わるたびにページを0に戻して再取得する。
/// 実行中のリクエストは取り消さないため、遅れて返った古いレスポンスが
/// 新しい結果を上書きすることがある。
pub struct ListController<T, S> {
    inner: Arc<Inner<T, S>>,
}

impl<T, S> Clone for ListController<T, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T, S> ListController<T, S>
where
    T: Clone + Send + Sync + 'static,
    S: PageSource<T>,
{
    pub fn new(adapter: FetchAdapter<T, S>, query: ListQuery) -> Self {
        Self::with_debounce(adapter, query, DEFAULT_DEBOUNCE)
    }

    /// デバウンス間隔を指定して作成する
    pub fn with_debounce(adapter: FetchAdapter<T, S>, query: ListQuery, debounce: Duration) -> Self {
        let (state, _) = watch::channel(ListState::empty(query.size));
        Self {
            inner: Arc::new(Inner {
                adapter,
                query: Mutex::new(query),
                state,
                debounce,
                keyword_generation: AtomicU64::new(0),
            }),
        }
    }

    /// 現在の検索条件
    pub fn query(&self) -> ListQuery {
        self.lock_query().clone()
    }

    /// 現在の表示状態
    pub fn state(&self) -> ListState<T> {
        self.inner.state.borrow().clone()
    }

    /// 表示状態の変化を購読する
    pub fn subscribe(&self) -> watch::Receiver<ListState<T>> {
        self.inner.state.subscribe()
    }

    /// ページネーション部品に渡す値
    pub fn pagination(&self) -> PaginationView {
        self.inner.state.borrow().pagination()
    }

    /// 現在の条件で取得し、結果を反映する
    pub async fn refresh(&self) -> ListState<T> {
        let query = self.query();
        self.inner.state.send_modify(|state| state.loading = true);

        let view = self.inner.adapter.load(&query).await;

        self.inner.state.send_modify(|state| {
            state.items = view.items;
            state.total_pages = view.total_pages;
            state.total_elements = view.total_elements;
            state.page = query.page;
            state.size = query.size;
            state.loading = false;
            state.origin = Some(view.origin);
            state.revision += 1;
        });
        self.state()
    }

    /// カテゴリを変更する
    pub async fn set_category(&self, category: Option<String>) -> ListState<T> {
        self.update_and_refresh(|query| query.category = category).await
    }

    /// 難易度を変更する
    pub async fn set_difficulty(&self, difficulty: Option<String>) -> ListState<T> {
        self.update_and_refresh(|query| query.difficulty_level = difficulty)
            .await
    }

    /// ソート項目を変更する
    pub async fn set_sort_by(&self, sort_by: &str) -> ListState<T> {
        let sort_by = sort_by.to_string();
        self.update_and_refresh(|query| query.sort_by = sort_by).await
    }

    /// ソート順を変更する
    pub async fn set_sort_order(&self, sort_order: SortOrder) -> ListState<T> {
        self.update_and_refresh(|query| query.sort_order = sort_order)
            .await
    }

    /// 画面固有の条件を変更する（Noneで解除）
    pub async fn set_filter(&self, key: &str, value: Option<String>) -> ListState<T> {
        let key = key.to_string();
        self.update_and_refresh(|query| match value {
            Some(value) => {
                query.filters.insert(key, value);
            }
            None => {
                query.filters.remove(&key);
            }
        })
        .await
    }

    /// キーワード入力を受け付ける
    ///
    /// 入力が止まってからデバウンス間隔が経過した時点で一度だけ取得する。
    /// 間隔内に次の入力があれば前のタイマーは無効になる。
    pub fn input_keyword(&self, keyword: &str) -> JoinHandle<()> {
        let generation = self.inner.keyword_generation.fetch_add(1, Ordering::SeqCst) + 1;
        let keyword = keyword.to_string();
        let controller = self.clone();

        tokio::spawn(async move {
            tokio::time::sleep(controller.inner.debounce).await;

            if controller.inner.keyword_generation.load(Ordering::SeqCst) != generation {
                return;
            }

            log::debug!(
                "{}: キーワード検索を実行します: keyword={keyword}",
                controller.inner.adapter.name()
            );
            controller
                .update_and_refresh(|query| query.keyword = keyword)
                .await;
        })
    }

    /// キーワードを即座に適用する（検索ボタン押下など）
    ///
    /// 待機中のデバウンスタイマーは無効にする
    pub async fn search_now(&self, keyword: &str) -> ListState<T> {
        self.inner.keyword_generation.fetch_add(1, Ordering::SeqCst);
        let keyword = keyword.to_string();
        self.update_and_refresh(|query| query.keyword = keyword).await
    }

    /// ページを選択する
    ///
    /// # 引数
    /// * `one_based` - ページネーション部品上のページ番号（1始まり）
    pub async fn select_page(&self, one_based: u32) -> ListState<T> {
        self.lock_query().page = one_based.saturating_sub(1);
        self.refresh().await
    }

    /// 条件を変更し、ページを0に戻して再取得する
    async fn update_and_refresh<F>(&self, update: F) -> ListState<T>
    where
        F: FnOnce(&mut ListQuery),
    {
        {
            let mut query = self.lock_query();
            update(&mut query);
            query.page = 0;
        }
        self.refresh().await
    }

    fn lock_query(&self) -> MutexGuard<'_, ListQuery> {
        // 保持中にパニックしても検索条件自体は壊れない
        self.inner
            .query
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::listing::page::{Page, RawPage};
    use crate::shared::errors::{AppError, AppResult};
    use tokio::time::Instant;

    /// 受け取った検索条件を記録するテスト用の取得元
    struct RecordingSource {
        calls: Arc<Mutex<Vec<ListQuery>>>,
        fail: bool,
        total_pages: u32,
    }

    impl PageSource<String> for RecordingSource {
        async fn fetch_page(&self, query: &ListQuery) -> AppResult<RawPage<String>> {
            self.calls.lock().unwrap().push(query.clone());
            if self.fail {
                return Err(AppError::ExternalService("unreachable".to_string()));
            }
            Ok(RawPage::Envelope(Page {
                content: vec![format!("item-{}", query.page)],
                total_elements: u64::from(self.total_pages * query.size),
                total_pages: self.total_pages,
                size: query.size,
                number: query.page,
            }))
        }
    }

    fn fallback_items(_query: &ListQuery) -> Vec<String> {
        vec!["mock-1".to_string(), "mock-2".to_string()]
    }

    fn controller(
        fail: bool,
        total_pages: u32,
    ) -> (
        ListController<String, RecordingSource>,
        Arc<Mutex<Vec<ListQuery>>>,
    ) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let source = RecordingSource {
            calls: Arc::clone(&calls),
            fail,
            total_pages,
        };
        let adapter = FetchAdapter::new("テスト一覧", source, fallback_items);
        (ListController::new(adapter, ListQuery::new(10)), calls)
    }

    #[tokio::test]
    async fn test_filter_change_resets_page() {
        let (controller, calls) = controller(false, 5);

        controller.select_page(4).await;
        assert_eq!(controller.query().page, 3);

        controller.set_category(Some("한식".to_string())).await;
        controller.select_page(2).await;
        controller.set_difficulty(Some("EASY".to_string())).await;
        controller.select_page(3).await;
        controller.set_sort_by("name").await;
        controller.select_page(3).await;
        controller.set_sort_order(SortOrder::Asc).await;
        controller.select_page(3).await;
        controller
            .set_filter("storeName", Some("이마트".to_string()))
            .await;

        let calls = calls.lock().unwrap().clone();
        assert_eq!(calls.len(), 10);
        for index in [1, 3, 5, 7, 9] {
            assert_eq!(calls[index].page, 0, "call {index} should reset page");
        }
        for index in [2, 4, 6, 8] {
            assert_ne!(calls[index].page, 0);
        }
        assert_eq!(calls[1].category.as_deref(), Some("한식"));
        assert_eq!(calls[9].filters.get("storeName").map(String::as_str), Some("이마트"));
        assert_eq!(calls[9].sort_by, "name");
        assert_eq!(calls[9].sort_order, SortOrder::Asc);
    }

    #[tokio::test(start_paused = true)]
    async fn test_keyword_input_is_debounced() {
        let (controller, calls) = controller(false, 1);
        controller.select_page(2).await;
        let mut receiver = controller.subscribe();
        receiver.borrow_and_update();

        for keyword in ["김", "김치", "김치찌"] {
            controller.input_keyword(keyword);
            tokio::time::advance(Duration::from_millis(100)).await;
        }
        controller.input_keyword("김치찌개");
        let last_keystroke = Instant::now();

        receiver.changed().await.unwrap();
        while receiver.borrow_and_update().revision < 2 {
            receiver.changed().await.unwrap();
        }
        assert!(last_keystroke.elapsed() >= DEFAULT_DEBOUNCE);

        // 後から余計な取得が来ないこと
        tokio::time::sleep(Duration::from_secs(1)).await;

        let calls = calls.lock().unwrap().clone();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].keyword, "김치찌개");
        assert_eq!(calls[1].page, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_now_cancels_pending_keyword() {
        let (controller, calls) = controller(false, 1);

        let pending = controller.input_keyword("떡");
        controller.search_now("떡볶이").await;
        pending.await.unwrap();

        let calls = calls.lock().unwrap().clone();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].keyword, "떡볶이");
    }

    #[tokio::test]
    async fn test_failure_shows_fallback_dataset() {
        let (controller, calls) = controller(true, 0);

        let state = controller.refresh().await;

        assert_eq!(state.items, vec!["mock-1".to_string(), "mock-2".to_string()]);
        assert_eq!(state.total_pages, 1);
        assert_eq!(state.origin, Some(PageOrigin::Fallback));
        assert!(!state.loading);
        assert_eq!(calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_pagination_widget_values() {
        let (controller, calls) = controller(false, 3);

        controller.refresh().await;
        let pagination = controller.pagination();
        assert_eq!(pagination.total, 30);
        assert_eq!(pagination.current, 1);

        controller.select_page(2).await;
        assert_eq!(calls.lock().unwrap().last().unwrap().page, 1);
        assert_eq!(controller.pagination().current, 2);
        assert_eq!(controller.state().items, vec!["item-1".to_string()]);
    }

    #[tokio::test]
    async fn test_select_page_keeps_other_parameters() {
        let (controller, _calls) = controller(false, 3);

        controller.set_category(Some("양식".to_string())).await;
        controller.select_page(3).await;

        let query = controller.query();
        assert_eq!(query.page, 2);
        assert_eq!(query.category.as_deref(), Some("양식"));
    }
}
