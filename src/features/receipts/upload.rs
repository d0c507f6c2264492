use crate::features::receipts::api::ReceiptApi;
use crate::features::receipts::models::{ProcessResponse, UploadResponse};
use crate::shared::errors::{AppError, AppResult};
use log::{error, info};
use reqwest::multipart::{Form, Part};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::watch;

/// アップロード可能な最大ファイルサイズ
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024; // 10MB

/// アップロードの進行段階
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadStage {
    Idle,
    Uploading,
    Processing,
    Completed,
    Failed,
}

impl UploadStage {
    /// 処理中かどうか（アップロードボタンを無効化する）
    pub fn is_busy(&self) -> bool {
        matches!(self, UploadStage::Uploading | UploadStage::Processing)
    }
}

/// アップロード画面の状態
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadProgress {
    pub stage: UploadStage,
    pub file_name: Option<String>,
    pub receipt_id: Option<i64>,
    /// 画面に表示するメッセージ
    pub message: Option<String>,
}

impl Default for UploadProgress {
    fn default() -> Self {
        Self {
            stage: UploadStage::Idle,
            file_name: None,
            receipt_id: None,
            message: None,
        }
    }
}

/// アップロードとOCR処理の結果
///
/// アップロードが成功していれば、OCR処理が失敗しても結果を返す。
#[derive(Debug, Clone)]
pub struct UploadOutcome {
    pub upload: UploadResponse,
    /// OCR処理の結果（失敗時はNone）
    pub processed: Option<ProcessResponse>,
    /// OCR処理失敗時に表示するメッセージ
    pub process_error: Option<String>,
}

impl UploadOutcome {
    pub fn is_processed(&self) -> bool {
        self.processed.is_some()
    }
}

fn file_extension(file_name: &str) -> Option<String> {
    Path::new(file_name)
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_lowercase())
}

/// ファイル形式を検証（画像またはPDFのみ）
pub fn validate_file_format(file_name: &str) -> AppResult<()> {
    let extension = file_extension(file_name)
        .ok_or_else(|| AppError::validation("이미지 파일 또는 PDF만 업로드 가능합니다!"))?;

    if !matches!(
        extension.as_str(),
        "png" | "jpg" | "jpeg" | "gif" | "pdf"
    ) {
        return Err(AppError::validation(
            "이미지 파일 또는 PDF만 업로드 가능합니다!",
        ));
    }

    Ok(())
}

/// ファイルサイズを検証
pub fn validate_file_size(file_size: u64) -> AppResult<()> {
    if file_size > MAX_FILE_SIZE {
        return Err(AppError::validation("파일 크기는 10MB 이하여야 합니다!"));
    }

    Ok(())
}

/// Content-Typeを推定
pub fn content_type(file_name: &str) -> &'static str {
    match file_extension(file_name).as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}

/// レシートのアップロードフロー
///
/// 検証 → アップロード → OCR処理の順に進め、各段階を watch チャネルで通知する。
#[derive(Clone)]
pub struct ReceiptUploader {
    api: ReceiptApi,
    progress: Arc<watch::Sender<UploadProgress>>,
}

impl ReceiptUploader {
    pub fn new(api: ReceiptApi) -> Self {
        let (sender, _) = watch::channel(UploadProgress::default());
        Self {
            api,
            progress: Arc::new(sender),
        }
    }

    pub fn progress(&self) -> UploadProgress {
        self.progress.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<UploadProgress> {
        self.progress.subscribe()
    }

    /// 状態を初期化する（別のファイルを選ぶとき）
    pub fn reset(&self) {
        self.progress.send_replace(UploadProgress::default());
    }

    /// ファイルを読み込んでアップロードする
    pub async fn upload_path(&self, path: &Path) -> AppResult<UploadOutcome> {
        let file_name = path
            .file_name()
            .and_then(|s| s.to_str())
            .map(str::to_string)
            .ok_or_else(|| AppError::validation("파일을 선택해주세요!"))?;

        // 読み込む前に形式とサイズを確認する
        validate_file_format(&file_name)?;
        let metadata = tokio::fs::metadata(path).await?;
        validate_file_size(metadata.len())?;

        let bytes = tokio::fs::read(path).await?;
        self.upload_bytes(&file_name, bytes).await
    }

    /// メモリ上のファイルをアップロードし、続けてOCR処理を要求する
    pub async fn upload_bytes(&self, file_name: &str, bytes: Vec<u8>) -> AppResult<UploadOutcome> {
        validate_file_format(file_name)?;
        validate_file_size(bytes.len() as u64)?;

        self.progress.send_replace(UploadProgress {
            stage: UploadStage::Uploading,
            file_name: Some(file_name.to_string()),
            receipt_id: None,
            message: None,
        });
        info!("レシートをアップロードします: {} ({} bytes)", file_name, bytes.len());

        let upload = match self.send_file(file_name, bytes).await {
            Ok(upload) => upload,
            Err(e) => return Err(self.fail("アップロード", e)),
        };

        self.progress.send_modify(|progress| {
            progress.stage = UploadStage::Processing;
            progress.receipt_id = Some(upload.receipt_id);
            progress.message = Some(upload.message.clone());
        });
        info!("OCR処理を開始します: receipt_id={}", upload.receipt_id);

        let processed = match self.api.process(upload.receipt_id).await {
            Ok(processed) => processed,
            Err(e) => {
                let e = self.fail("OCR処理", e);
                return Ok(UploadOutcome {
                    upload,
                    processed: None,
                    process_error: Some(e.user_message().to_string()),
                });
            }
        };

        self.progress.send_modify(|progress| {
            progress.stage = UploadStage::Completed;
            progress.message = Some(processed.message.clone());
        });
        info!("レシート処理が完了しました: receipt_id={}", upload.receipt_id);

        Ok(UploadOutcome {
            upload,
            processed: Some(processed),
            process_error: None,
        })
    }

    async fn send_file(&self, file_name: &str, bytes: Vec<u8>) -> AppResult<UploadResponse> {
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(content_type(file_name))?;
        let form = Form::new().part("file", part);
        self.api.upload(form).await
    }

    fn fail(&self, step: &str, e: AppError) -> AppError {
        error!("レシートの{step}に失敗しました: {e}");
        let message = e.user_message().to_string();
        self.progress.send_modify(|progress| {
            progress.stage = UploadStage::Failed;
            progress.message = Some(message);
        });
        e
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::token_store::MemoryTokenStore;
    use crate::shared::api_client::{ApiClient, ApiClientConfig};
    use crate::shared::test_server::{MockResponse, TestServer};
    use std::io::Write;

    fn uploader_for(server: &TestServer) -> ReceiptUploader {
        let config = ApiClientConfig {
            base_url: server.base_url(),
            timeout_seconds: 5,
        };
        let client = ApiClient::new_with_config(config, Arc::new(MemoryTokenStore::new())).unwrap();
        ReceiptUploader::new(ReceiptApi::new(Arc::new(client)))
    }

    #[test]
    fn test_validate_file_format() {
        assert!(validate_file_format("receipt.jpg").is_ok());
        assert!(validate_file_format("RECEIPT.PNG").is_ok());
        assert!(validate_file_format("scan.gif").is_ok());
        assert!(validate_file_format("scan.pdf").is_ok());
        assert!(validate_file_format("notes.txt").is_err());
        assert!(validate_file_format("no_extension").is_err());
    }

    #[test]
    fn test_validate_file_size() {
        assert!(validate_file_size(MAX_FILE_SIZE).is_ok());
        let err = validate_file_size(MAX_FILE_SIZE + 1).unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m == "파일 크기는 10MB 이하여야 합니다!"));
    }

    #[test]
    fn test_content_type() {
        assert_eq!(content_type("a.jpeg"), "image/jpeg");
        assert_eq!(content_type("a.gif"), "image/gif");
        assert_eq!(content_type("a.pdf"), "application/pdf");
        assert_eq!(content_type("a.bin"), "application/octet-stream");
    }

    #[test]
    fn test_upload_stage_serialization() {
        let json = serde_json::to_string(&UploadStage::Processing).unwrap();
        assert_eq!(json, "\"processing\"");
        assert!(UploadStage::Uploading.is_busy());
        assert!(!UploadStage::Failed.is_busy());
    }

    #[tokio::test]
    async fn test_upload_then_process() {
        let server = TestServer::start(|req| match req.path.as_str() {
            "/api/receipts/upload" => MockResponse::json(
                200,
                r#"{"receiptId":42,"message":"영수증이 업로드되었습니다","success":true}"#,
            ),
            "/api/receipts/process/42" => MockResponse::json(
                200,
                r#"{"message":"영수증이 성공적으로 처리되었습니다!","parsedData":{"storeName":"GS25"},"rawText":"GS25"}"#,
            ),
            _ => MockResponse::json(404, "{}"),
        })
        .await;
        let uploader = uploader_for(&server);

        let outcome = uploader
            .upload_bytes("receipt.png", b"fake image".to_vec())
            .await
            .unwrap();

        assert_eq!(outcome.upload.receipt_id, 42);
        assert!(outcome.is_processed());
        assert_eq!(outcome.processed.unwrap().parsed_data["storeName"], "GS25");

        let progress = uploader.progress();
        assert_eq!(progress.stage, UploadStage::Completed);
        assert_eq!(progress.receipt_id, Some(42));

        let requests = server.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].method, "POST");
        assert!(requests[0]
            .content_type
            .as_deref()
            .is_some_and(|ct| ct.starts_with("multipart/form-data")));
        assert!(requests[0].body.contains("name=\"file\""));
        assert!(requests[0].body.contains("filename=\"receipt.png\""));
        assert_eq!(requests[1].path, "/api/receipts/process/42");
    }

    #[tokio::test]
    async fn test_invalid_file_sends_nothing() {
        let server = TestServer::start(|_req| MockResponse::json(200, "{}")).await;
        let uploader = uploader_for(&server);

        let result = uploader.upload_bytes("memo.txt", b"hello".to_vec()).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(uploader.progress().stage, UploadStage::Idle);
        assert!(server.requests().is_empty());
    }

    #[tokio::test]
    async fn test_upload_failure_is_an_error() {
        let server = TestServer::start(|_req| {
            MockResponse::json(500, r#"{"message":"storage unavailable"}"#)
        })
        .await;
        let uploader = uploader_for(&server);

        let result = uploader.upload_bytes("receipt.jpg", b"jpeg".to_vec()).await;

        assert!(matches!(result, Err(AppError::ExternalService(_))));
        assert_eq!(uploader.progress().stage, UploadStage::Failed);
        assert_eq!(server.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_processing_failure_keeps_upload() {
        let server = TestServer::start(|req| {
            if req.path == "/api/receipts/upload" {
                MockResponse::json(200, r#"{"receiptId":7,"message":"ok","success":true}"#)
            } else {
                MockResponse::json(500, r#"{"error":"OCR 처리 중 오류가 발생했습니다"}"#)
            }
        })
        .await;
        let uploader = uploader_for(&server);

        let outcome = uploader
            .upload_bytes("scan.pdf", b"%PDF".to_vec())
            .await
            .unwrap();

        assert_eq!(outcome.upload.receipt_id, 7);
        assert!(outcome.upload.success);
        assert!(!outcome.is_processed());
        assert_eq!(
            outcome.process_error.as_deref(),
            Some("서버와 통신하는 중 오류가 발생했습니다.")
        );

        let progress = uploader.progress();
        assert_eq!(progress.stage, UploadStage::Failed);
        assert_eq!(progress.receipt_id, Some(7));
        assert!(progress.message.is_some());
    }

    #[tokio::test]
    async fn test_upload_path_reads_file() {
        let server = TestServer::start(|req| {
            if req.path == "/api/receipts/upload" {
                MockResponse::json(200, r#"{"receiptId":3,"message":"ok","success":true}"#)
            } else {
                MockResponse::json(200, r#"{"message":"done","parsedData":{}}"#)
            }
        })
        .await;
        let uploader = uploader_for(&server);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mart.jpg");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"jpeg bytes").unwrap();

        let outcome = uploader.upload_path(&path).await.unwrap();

        assert_eq!(outcome.upload.receipt_id, 3);
        assert!(server.requests()[0].body.contains("jpeg bytes"));
    }
}
