//! APIに接続できないときに表示する固定レシート

use crate::features::listing::query::ListQuery;
use crate::features::receipts::models::{Receipt, ReceiptItem};

/// (品名, 単価, 数量, カテゴリ, 食材かどうか)
type ItemRow = (&'static str, f64, f64, &'static str, bool);

struct Entry {
    id: i64,
    store_name: &'static str,
    purchase_date: &'static str,
    items: &'static [ItemRow],
}

const ENTRIES: [Entry; 5] = [
    Entry {
        id: 1,
        store_name: "이마트",
        purchase_date: "2025-01-20",
        items: &[
            ("양파", 2500.0, 1.0, "채소", true),
            ("닭고기", 8500.0, 1.0, "육류", true),
            ("우유", 2800.0, 2.0, "유제품", true),
            ("휴지", 8000.0, 1.0, "생활용품", false),
        ],
    },
    Entry {
        id: 2,
        store_name: "GS25",
        purchase_date: "2025-01-19",
        items: &[
            ("삼각김밥", 1200.0, 2.0, "간편식", true),
            ("생수", 900.0, 3.0, "음료", true),
        ],
    },
    Entry {
        id: 3,
        store_name: "홈플러스",
        purchase_date: "2025-01-18",
        items: &[
            ("감자", 3200.0, 1.0, "채소", true),
            ("돼지고기", 12000.0, 1.0, "육류", true),
            ("계란", 6500.0, 1.0, "유제품", true),
            ("세제", 9900.0, 1.0, "생활용품", false),
        ],
    },
    Entry {
        id: 4,
        store_name: "롯데마트",
        purchase_date: "2025-01-16",
        items: &[
            ("두부", 1800.0, 2.0, "가공식품", true),
            ("대파", 2200.0, 1.0, "채소", true),
            ("고등어", 5900.0, 1.0, "수산물", true),
        ],
    },
    Entry {
        id: 5,
        store_name: "CU",
        purchase_date: "2025-01-15",
        items: &[
            ("컵라면", 1500.0, 2.0, "간편식", true),
            ("칫솔", 3500.0, 1.0, "생활용품", false),
        ],
    },
];

impl Entry {
    fn to_receipt(&self) -> Receipt {
        let items: Vec<ReceiptItem> = self
            .items
            .iter()
            .enumerate()
            .map(|(index, &(name, unit_price, quantity, category, is_ingredient))| ReceiptItem {
                id: Some(self.id * 100 + index as i64),
                item_name: name.to_string(),
                quantity,
                unit_price,
                total_price: unit_price * quantity,
                category: Some(category.to_string()),
                is_ingredient,
                expiry_date: None,
            })
            .collect();
        let total_amount = items.iter().map(|item| item.total_price).sum();

        Receipt {
            id: self.id,
            store_name: self.store_name.to_string(),
            purchase_date: self.purchase_date.to_string(),
            total_amount,
            image_url: None,
            raw_ocr_text: None,
            processed_data: None,
            items,
            created_at: Some(format!("{}T12:00:00", self.purchase_date)),
            updated_at: None,
        }
    }
}

/// 固定レシート全件（購入日の新しい順）
pub fn all_receipts() -> Vec<Receipt> {
    ENTRIES.iter().map(Entry::to_receipt).collect()
}

/// 店名・キーワードを適用した固定レシート
///
/// キーワードは店名と品名に部分一致する。
pub fn receipts_for(query: &ListQuery) -> Vec<Receipt> {
    let keyword = query.keyword.trim().to_lowercase();
    let store = query.filters.get("storeName");

    all_receipts()
        .into_iter()
        .filter(|receipt| store.map_or(true, |s| receipt.store_name.contains(s.as_str())))
        .filter(|receipt| {
            keyword.is_empty()
                || receipt.store_name.to_lowercase().contains(&keyword)
                || receipt
                    .items
                    .iter()
                    .any(|item| item.item_name.to_lowercase().contains(&keyword))
        })
        .collect()
}

/// 固定レシートの店名一覧
pub fn store_names() -> Vec<String> {
    ENTRIES.iter().map(|e| e.store_name.to_string()).collect()
}
