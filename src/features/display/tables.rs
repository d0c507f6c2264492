use crate::features::recipes::models::DifficultyLevel;

/// 難易度・カテゴリが不明な場合の色
pub const UNKNOWN_COLOR: &str = "#666";

/// 難易度の表示色
pub fn difficulty_color(level: Option<DifficultyLevel>) -> &'static str {
    match level {
        Some(DifficultyLevel::Easy) => "#52c41a",
        Some(DifficultyLevel::Medium) => "#fa8c16",
        Some(DifficultyLevel::Hard) => "#f5222d",
        None => UNKNOWN_COLOR,
    }
}

/// 難易度の表示名
pub fn difficulty_label(level: DifficultyLevel) -> &'static str {
    match level {
        DifficultyLevel::Easy => "쉬움",
        DifficultyLevel::Medium => "보통",
        DifficultyLevel::Hard => "어려움",
    }
}

/// 文字列の難易度（API値・表示名どちらでも）を表示名に変換する
///
/// 不明な値はそのまま返す
pub fn difficulty_text(value: &str) -> String {
    match DifficultyLevel::from_label(value) {
        Some(level) => difficulty_label(level).to_string(),
        None => value.to_string(),
    }
}

/// レシピカテゴリ一覧
pub const RECIPE_CATEGORIES: [&str; 7] = ["한식", "양식", "일식", "디저트", "건강식", "간편요리", "음료"];

/// カテゴリのアイコン
pub fn category_icon(category: Option<&str>) -> &'static str {
    match category {
        Some("한식") => "🍲",
        Some("양식") => "🍝",
        Some("일식") => "🍣",
        Some("디저트") => "🍰",
        Some("건강식") => "🥗",
        Some("간편요리") => "⚡",
        Some("음료") => "🥤",
        _ => "🍽️",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_colors() {
        assert_eq!(difficulty_color(Some(DifficultyLevel::Easy)), "#52c41a");
        assert_eq!(difficulty_color(Some(DifficultyLevel::Medium)), "#fa8c16");
        assert_eq!(difficulty_color(Some(DifficultyLevel::Hard)), "#f5222d");
        assert_eq!(difficulty_color(None), "#666");
    }

    #[test]
    fn test_difficulty_text() {
        assert_eq!(difficulty_text("EASY"), "쉬움");
        assert_eq!(difficulty_text("어려움"), "어려움");
        assert_eq!(difficulty_text("EXPERT"), "EXPERT");
    }

    #[test]
    fn test_category_icons() {
        for category in RECIPE_CATEGORIES {
            assert_ne!(category_icon(Some(category)), "🍽️");
        }
        assert_eq!(category_icon(Some("분식")), "🍽️");
        assert_eq!(category_icon(None), "🍽️");
    }
}
