use crate::features::community::models::MessageResponse;
use crate::features::notifications::models::{
    IngredientExpiry, NotificationStats, NotificationSummary,
};
use crate::shared::api_client::ApiClient;
use crate::shared::errors::AppResult;
use std::sync::Arc;

/// 期限間近とみなす既定の日数
pub const DEFAULT_EXPIRING_DAYS: u32 = 3;

/// 賞味期限通知API
#[derive(Clone)]
pub struct NotificationsApi {
    api_client: Arc<ApiClient>,
}

impl NotificationsApi {
    pub fn new(api_client: Arc<ApiClient>) -> Self {
        Self { api_client }
    }

    /// 指定日数以内に期限が切れる食材
    pub async fn expiring(&self, user_id: i64, days: u32) -> AppResult<Vec<IngredientExpiry>> {
        self.api_client
            .get_with_query(&format!("/notifications/expiring/{user_id}"), &[("days", days)])
            .await
    }

    /// 期限切れの食材
    pub async fn expired(&self, user_id: i64) -> AppResult<Vec<IngredientExpiry>> {
        self.api_client
            .get(&format!("/notifications/expired/{user_id}"))
            .await
    }

    pub async fn stats(&self, user_id: i64) -> AppResult<NotificationStats> {
        self.api_client
            .get(&format!("/notifications/stats/{user_id}"))
            .await
    }

    /// 既読にする
    pub async fn mark_read(&self, ingredient_expiry_id: i64) -> AppResult<MessageResponse> {
        self.api_client
            .post_empty(&format!("/notifications/mark-read/{ingredient_expiry_id}"))
            .await
    }

    /// 期限間近・期限切れ・件数を並行して取得する
    ///
    /// いずれかが失敗したらエラーを返す
    pub async fn summary(&self, user_id: i64, days: u32) -> AppResult<NotificationSummary> {
        let (expiring_soon, expired, stats) = futures::try_join!(
            self.expiring(user_id, days),
            self.expired(user_id),
            self.stats(user_id)
        )?;

        log::info!(
            "通知を取得しました: expiring={}, expired={}",
            expiring_soon.len(),
            expired.len()
        );

        Ok(NotificationSummary {
            expiring_soon,
            expired,
            stats,
        })
    }
}
