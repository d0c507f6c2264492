/// レシート機能のモジュール（一覧・詳細・アップロード・OCR処理）
pub mod api;
pub mod mock_data;
pub mod models;
pub mod upload;

pub use api::{
    current_page_stats, ReceiptApi, ReceiptListController, RECEIPT_PAGE_SIZE, STORE_NAME_FILTER,
};
pub use models::{
    ExpiringIngredient, ProcessResponse, Receipt, ReceiptItem, ReceiptStats, ReceiptUpdate,
    UploadResponse,
};
pub use upload::{
    content_type, validate_file_format, validate_file_size, ReceiptUploader, UploadOutcome,
    UploadProgress, UploadStage, MAX_FILE_SIZE,
};
