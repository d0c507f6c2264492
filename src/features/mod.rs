/// 機能別モジュール
///
/// 各機能モジュールは、その機能のモデル・API呼び出し・一覧コントローラー・
/// 固定データをまとめた単位です。
pub mod auth;
pub mod community;
pub mod display;
pub mod favorites;
pub mod listing;
pub mod notifications;
pub mod profile;
pub mod ratings;
pub mod receipts;
pub mod recipes;
pub mod tags;
