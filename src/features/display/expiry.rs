use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

const DAY_MILLIS: i64 = 24 * 60 * 60 * 1000;

/// 食材一覧で「期限間近」とみなす日数
pub const EXPIRING_WITHIN_DAYS: i64 = 7;

/// 賞味期限の区分
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpiryStatus {
    Expired,
    Urgent,
    Warning,
    Ok,
}

impl ExpiryStatus {
    /// タグの色
    pub fn color(&self) -> &'static str {
        match self {
            ExpiryStatus::Expired => "red",
            ExpiryStatus::Urgent => "orange",
            ExpiryStatus::Warning => "yellow",
            ExpiryStatus::Ok => "green",
        }
    }
}

/// ラベルの書き方
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelStyle {
    /// 「임박 (2일 후)」のように区分名を付ける
    Tagged,
    /// 「2일 남음」のように残り日数だけ
    Remaining,
}

/// 画面ごとの区分のしきい値
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpiryPolicy {
    /// この日数以下なら urgent
    pub urgent_within: i64,
    /// この日数以下なら warning（Noneなら warning を使わない）
    pub warning_within: Option<i64>,
    pub label_style: LabelStyle,
}

impl ExpiryPolicy {
    /// 標準（3日以内 urgent、7日以内 warning）
    pub const STANDARD: Self = Self {
        urgent_within: 3,
        warning_within: Some(7),
        label_style: LabelStyle::Tagged,
    };

    /// レシート詳細（7日以内 urgent、warning なし）
    pub const RECEIPT_DETAIL: Self = Self {
        urgent_within: 7,
        warning_within: None,
        label_style: LabelStyle::Remaining,
    };

    pub fn classify(&self, days: i64) -> ExpiryStatus {
        if days < 0 {
            ExpiryStatus::Expired
        } else if days <= self.urgent_within {
            ExpiryStatus::Urgent
        } else if self.warning_within.is_some_and(|within| days <= within) {
            ExpiryStatus::Warning
        } else {
            ExpiryStatus::Ok
        }
    }

    pub fn label(&self, days: i64) -> String {
        let status = self.classify(days);
        if status == ExpiryStatus::Expired {
            return format!("만료됨 ({}일 전)", days.abs());
        }

        match (self.label_style, status) {
            (LabelStyle::Remaining, _) => format!("{days}일 남음"),
            (LabelStyle::Tagged, ExpiryStatus::Urgent) => format!("임박 ({days}일 후)"),
            (LabelStyle::Tagged, ExpiryStatus::Warning) => format!("주의 ({days}일 후)"),
            (LabelStyle::Tagged, _) => format!("{days}일 후"),
        }
    }

    /// 期限日から表示用のバッジを作る
    pub fn badge(&self, expiry: NaiveDate, now: NaiveDateTime) -> ExpiryBadge {
        let days = days_until(expiry, now);
        let status = self.classify(days);
        ExpiryBadge {
            status,
            days,
            label: self.label(days),
            color: status.color(),
        }
    }
}

impl Default for ExpiryPolicy {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// 賞味期限の表示情報
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpiryBadge {
    pub status: ExpiryStatus,
    /// 残り日数（過ぎていれば負）
    pub days: i64,
    pub label: String,
    pub color: &'static str,
}

/// 期限日までの日数（切り上げ）
///
/// 期限日の0時と現在時刻の差を日単位で切り上げる。
/// 当日なら0、前日が期限なら-1。
pub fn days_until(expiry: NaiveDate, now: NaiveDateTime) -> i64 {
    let expiry_start = expiry.and_hms_opt(0, 0, 0).unwrap_or_default();
    let diff = (expiry_start - now).num_milliseconds();
    // ceil(diff / DAY)
    -((-diff).div_euclid(DAY_MILLIS))
}

/// 現在時刻を基準にした期限日までの日数
pub fn days_until_today(expiry: NaiveDate) -> i64 {
    days_until(expiry, Local::now().naive_local())
}

/// 標準のしきい値で区分する
pub fn classify(days: i64) -> ExpiryStatus {
    ExpiryPolicy::STANDARD.classify(days)
}

/// 食材一覧の「期限間近」フラグ（期限切れも含む）
pub fn is_expiring(days: i64) -> bool {
    days <= EXPIRING_WITHIN_DAYS
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveTime};
    use quickcheck_macros::quickcheck;

    fn afternoon(date: NaiveDate) -> NaiveDateTime {
        date.and_time(NaiveTime::from_hms_opt(15, 30, 0).unwrap())
    }

    #[test]
    fn test_bucketing_relative_to_today() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 20).unwrap();
        let now = afternoon(today);

        let yesterday = days_until(today - Duration::days(1), now);
        assert_eq!(yesterday, -1);
        assert_eq!(classify(yesterday), ExpiryStatus::Expired);

        let in_two_days = days_until(today + Duration::days(2), now);
        assert_eq!(in_two_days, 2);
        assert_eq!(classify(in_two_days), ExpiryStatus::Urgent);
        assert_eq!(ExpiryPolicy::STANDARD.label(in_two_days), "임박 (2일 후)");

        let in_ten_days = days_until(today + Duration::days(10), now);
        assert_eq!(classify(in_ten_days), ExpiryStatus::Ok);
    }

    #[test]
    fn test_boundaries() {
        assert_eq!(classify(0), ExpiryStatus::Urgent);
        assert_eq!(classify(3), ExpiryStatus::Urgent);
        assert_eq!(classify(4), ExpiryStatus::Warning);
        assert_eq!(classify(7), ExpiryStatus::Warning);
        assert_eq!(classify(8), ExpiryStatus::Ok);
    }

    #[test]
    fn test_labels() {
        let policy = ExpiryPolicy::STANDARD;
        assert_eq!(policy.label(-3), "만료됨 (3일 전)");
        assert_eq!(policy.label(5), "주의 (5일 후)");
        assert_eq!(policy.label(12), "12일 후");
    }

    #[test]
    fn test_receipt_detail_policy() {
        let policy = ExpiryPolicy::RECEIPT_DETAIL;
        assert_eq!(policy.classify(5), ExpiryStatus::Urgent);
        assert_eq!(policy.classify(8), ExpiryStatus::Ok);
        assert_eq!(policy.label(5), "5일 남음");
        assert_eq!(policy.label(-1), "만료됨 (1일 전)");
    }

    #[test]
    fn test_is_expiring() {
        assert!(is_expiring(-2));
        assert!(is_expiring(7));
        assert!(!is_expiring(8));
    }

    #[test]
    fn test_badge() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let badge = ExpiryPolicy::STANDARD.badge(today + Duration::days(1), afternoon(today));

        assert_eq!(badge.days, 1);
        assert_eq!(badge.status, ExpiryStatus::Urgent);
        assert_eq!(badge.color, "orange");
    }

    #[quickcheck]
    fn prop_days_until_counts_calendar_days(offset: i16, millis_into_day: u32) -> bool {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let offset = i64::from(offset);
        let millis = i64::from(millis_into_day) % DAY_MILLIS;
        let now = today.and_hms_opt(0, 0, 0).unwrap() + Duration::milliseconds(millis);

        days_until(today + Duration::days(offset), now) == offset
    }

    #[quickcheck]
    fn prop_classification_is_monotonic(days: i16) -> bool {
        let rank = |status: ExpiryStatus| match status {
            ExpiryStatus::Expired => 0,
            ExpiryStatus::Urgent => 1,
            ExpiryStatus::Warning => 2,
            ExpiryStatus::Ok => 3,
        };
        let days = i64::from(days);
        rank(classify(days)) <= rank(classify(days + 1))
    }
}
