use crate::features::display::expiry::{ExpiryBadge, ExpiryPolicy};
use crate::features::display::format::parse_date;
use crate::shared::serde_ext::null_as_default;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// レシートの品目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptItem {
    #[serde(default)]
    pub id: Option<i64>,
    pub item_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub quantity: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub unit_price: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_price: f64,
    #[serde(default)]
    pub category: Option<String>,
    /// 食材かどうか
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_ingredient: bool,
    /// 賞味期限（YYYY-MM-DD）
    #[serde(default)]
    pub expiry_date: Option<String>,
}

impl ReceiptItem {
    /// レシート詳細画面の期限バッジ（期限日がない、または解析できなければNone）
    pub fn expiry_badge(&self, now: NaiveDateTime) -> Option<ExpiryBadge> {
        let expiry = parse_date(self.expiry_date.as_deref()?)?;
        Some(ExpiryPolicy::RECEIPT_DETAIL.badge(expiry, now))
    }
}

/// レシート
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub store_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub purchase_date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_amount: f64,
    #[serde(default)]
    pub image_url: Option<String>,
    /// OCRで抽出した生テキスト
    #[serde(default)]
    pub raw_ocr_text: Option<String>,
    #[serde(default)]
    pub processed_data: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<ReceiptItem>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Receipt {
    /// 食材の品目数
    pub fn ingredient_count(&self) -> usize {
        self.items.iter().filter(|item| item.is_ingredient).count()
    }

    /// 食材の合計金額
    pub fn ingredient_total(&self) -> f64 {
        self.items
            .iter()
            .filter(|item| item.is_ingredient)
            .map(|item| item.total_price)
            .sum()
    }

    /// 食材以外の合計金額
    pub fn non_ingredient_total(&self) -> f64 {
        self.items
            .iter()
            .filter(|item| !item.is_ingredient)
            .map(|item| item.total_price)
            .sum()
    }
}

/// レシート更新リクエスト（指定した項目だけ送る）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<ReceiptItem>>,
}

/// アップロードAPIのレスポンス
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub receipt_id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub success: bool,
}

/// OCR処理APIのレスポンス
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    /// 処理後のレシート
    #[serde(default)]
    pub receipt: Option<Receipt>,
    /// 解析結果（店名・合計・品目など）
    #[serde(default)]
    pub parsed_data: serde_json::Value,
    #[serde(default)]
    pub raw_text: Option<String>,
}

/// 賞味期限が近い食材
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpiringIngredient {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(alias = "itemName")]
    pub ingredient_name: String,
    #[serde(default)]
    pub quantity: Option<f64>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    pub expiry_date: String,
    #[serde(default)]
    pub purchase_date: Option<String>,
    #[serde(default)]
    pub is_notified: Option<bool>,
}

/// 一覧画面の集計値
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptStats {
    pub total_amount: f64,
    pub ingredient_count: usize,
    pub average_amount: f64,
}

impl ReceiptStats {
    /// 表示中のレシートから集計する
    pub fn from_receipts(receipts: &[Receipt]) -> Self {
        let total_amount: f64 = receipts.iter().map(|r| r.total_amount).sum();
        let ingredient_count = receipts.iter().map(Receipt::ingredient_count).sum();
        let average_amount = if receipts.is_empty() {
            0.0
        } else {
            total_amount / receipts.len() as f64
        };

        Self {
            total_amount,
            ingredient_count,
            average_amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, price: f64, is_ingredient: bool) -> ReceiptItem {
        ReceiptItem {
            id: None,
            item_name: name.to_string(),
            quantity: 1.0,
            unit_price: price,
            total_price: price,
            category: None,
            is_ingredient,
            expiry_date: None,
        }
    }

    fn receipt(id: i64, total: f64, items: Vec<ReceiptItem>) -> Receipt {
        Receipt {
            id,
            store_name: "이마트".to_string(),
            purchase_date: "2025-01-20".to_string(),
            total_amount: total,
            image_url: None,
            raw_ocr_text: None,
            processed_data: None,
            items,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_receipt_deserialize_with_missing_fields() {
        let json = r#"{"id":1,"storeName":"CU","totalAmount":4500,"items":[{"itemName":"우유","totalPrice":2500,"isIngredient":true}]}"#;
        let receipt: Receipt = serde_json::from_str(json).unwrap();

        assert_eq!(receipt.store_name, "CU");
        assert_eq!(receipt.items[0].total_price, 2500.0);
        assert_eq!(receipt.ingredient_count(), 1);
    }

    #[test]
    fn test_ingredient_totals() {
        let receipt = receipt(
            1,
            13500.0,
            vec![item("양파", 2500.0, true), item("휴지", 8000.0, false), item("계란", 3000.0, true)],
        );

        assert_eq!(receipt.ingredient_total(), 5500.0);
        assert_eq!(receipt.non_ingredient_total(), 8000.0);
    }

    #[test]
    fn test_stats() {
        let receipts = vec![
            receipt(1, 10000.0, vec![item("양파", 2500.0, true)]),
            receipt(2, 20000.0, vec![item("감자", 3200.0, true), item("세제", 12000.0, false)]),
        ];

        let stats = ReceiptStats::from_receipts(&receipts);
        assert_eq!(stats.total_amount, 30000.0);
        assert_eq!(stats.ingredient_count, 2);
        assert_eq!(stats.average_amount, 15000.0);

        let empty = ReceiptStats::from_receipts(&[]);
        assert_eq!(empty.average_amount, 0.0);
    }

    #[test]
    fn test_update_sends_only_set_fields() {
        let update = ReceiptUpdate {
            store_name: Some("롯데마트".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({"storeName": "롯데마트"}));
    }

    #[test]
    fn test_item_expiry_badge() {
        let now = chrono::NaiveDate::from_ymd_opt(2025, 1, 20)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        let mut milk = item("우유", 2800.0, true);
        assert!(milk.expiry_badge(now).is_none());

        milk.expiry_date = Some("2025-01-25".to_string());
        let badge = milk.expiry_badge(now).unwrap();
        assert_eq!(badge.days, 5);
        assert_eq!(badge.label, "5일 남음");
        assert_eq!(badge.color, "orange");
    }

    #[test]
    fn test_process_response() {
        let json = r#"{"message":"영수증이 성공적으로 처리되었습니다!","parsedData":{"storeName":"이마트"},"rawText":"..."}"#;
        let response: ProcessResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.parsed_data["storeName"], "이마트");
        assert!(response.receipt.is_none());
    }
}
