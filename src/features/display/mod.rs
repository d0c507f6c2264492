/// 一覧・詳細画面の表示用フィールド（色・アイコン・金額・日付・賞味期限）
pub mod expiry;
pub mod format;
pub mod tables;

pub use expiry::{
    classify, days_until, days_until_today, is_expiring, ExpiryBadge, ExpiryPolicy, ExpiryStatus,
    LabelStyle, EXPIRING_WITHIN_DAYS,
};
pub use format::{
    format_currency, format_date, format_date_time, format_number, format_won, parse_date,
    parse_date_time,
};
pub use tables::{
    category_icon, difficulty_color, difficulty_label, difficulty_text, RECIPE_CATEGORIES,
};
