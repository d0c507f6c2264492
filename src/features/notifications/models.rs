use crate::features::display::expiry::{ExpiryBadge, ExpiryPolicy};
use crate::features::display::format::parse_date;
use crate::shared::serde_ext::null_as_default;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// 賞味期限を管理している食材
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientExpiry {
    pub id: i64,
    pub ingredient_name: String,
    #[serde(default)]
    pub quantity: Option<f64>,
    #[serde(default)]
    pub unit: Option<String>,
    pub expiry_date: String,
    #[serde(default)]
    pub purchase_date: Option<String>,
    /// 通知済み（既読）かどうか
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_notified: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl IngredientExpiry {
    /// 期限のバッジ（期限日を解析できなければNone）
    pub fn badge(&self, policy: &ExpiryPolicy, now: NaiveDateTime) -> Option<ExpiryBadge> {
        parse_date(&self.expiry_date).map(|expiry| policy.badge(expiry, now))
    }
}

/// 通知件数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationStats {
    #[serde(default, deserialize_with = "null_as_default")]
    pub expiring_soon_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub expired_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_notifications: u64,
}

/// 通知画面にまとめて表示する内容
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationSummary {
    pub expiring_soon: Vec<IngredientExpiry>,
    pub expired: Vec<IngredientExpiry>,
    pub stats: NotificationStats,
}

impl NotificationSummary {
    /// 未読の件数
    pub fn unread_count(&self) -> usize {
        self.expiring_soon
            .iter()
            .chain(self.expired.iter())
            .filter(|item| !item.is_notified)
            .count()
    }
}
