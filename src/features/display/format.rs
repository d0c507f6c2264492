use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Timelike};

/// 3桁区切りの数値（小数は3桁まで）
pub fn format_number(value: f64) -> String {
    let negative = value < 0.0;
    let millis = (value.abs() * 1000.0).round() as u64;
    let integer = group_thousands(millis / 1000);
    let fraction = millis % 1000;

    let mut formatted = String::new();
    if negative && millis > 0 {
        formatted.push('-');
    }
    formatted.push_str(&integer);
    if fraction > 0 {
        let digits = format!("{fraction:03}");
        formatted.push('.');
        formatted.push_str(digits.trim_end_matches('0'));
    }
    formatted
}

/// 整数を3桁ごとにカンマで区切る
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// 金額表示（₩12,345）
pub fn format_currency(amount: f64) -> String {
    format!("₩{}", format_number(amount))
}

/// 金額表示（12,345원）
pub fn format_won(amount: f64) -> String {
    format!("{}원", format_number(amount))
}

/// 日付文字列を解析する
///
/// `2025-01-20`、`2025-01-20T10:30:00`、`2025-01-20T10:30:00Z` などを受け付ける。
/// タイムゾーン付きの場合はその時差のまま扱う。
pub fn parse_date_time(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.naive_local());
    }

    const FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];
    for format in FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Some(parsed);
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    parse_date_time(value).map(|date_time| date_time.date())
}

/// 韓国式の日付表示（2025. 1. 20.）
///
/// 解析できない場合は入力をそのまま返す
pub fn format_date(value: &str) -> String {
    match parse_date_time(value) {
        Some(date_time) => format!(
            "{}. {}. {}.",
            date_time.year(),
            date_time.month(),
            date_time.day()
        ),
        None => value.to_string(),
    }
}

/// 日付と時刻の表示（2025. 1. 20. 10:30）
pub fn format_date_time(value: &str) -> String {
    match parse_date_time(value) {
        Some(date_time) => format!(
            "{}. {}. {}. {:02}:{:02}",
            date_time.year(),
            date_time.month(),
            date_time.day(),
            date_time.hour(),
            date_time.minute()
        ),
        None => value.to_string(),
    }
}
