/// 賞味期限通知機能
pub mod api;
pub mod models;

pub use api::{NotificationsApi, DEFAULT_EXPIRING_DAYS};
pub use models::{IngredientExpiry, NotificationStats, NotificationSummary};
