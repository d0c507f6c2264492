/// 汎用APIクライアント
///
/// APIサーバーとの通信を行う汎用的なクライアント。
/// 送信のたびに保存済みトークンを `Authorization: Bearer` として付与し、
/// 401 を受けた場合はトークンを削除してエラーを返す（画面遷移は行わない）。
/// リトライは行わない。
use crate::features::auth::token_store::TokenStore;
use crate::shared::config::environment::ApiConfig;
use crate::shared::errors::{AppError, AppResult};
use log::{debug, info, warn};
use reqwest::{multipart, Client, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// APIクライアント設定
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        let api_config = ApiConfig::default();
        Self {
            base_url: api_config.base_url,
            timeout_seconds: api_config.timeout_seconds,
        }
    }
}

impl From<ApiConfig> for ApiClientConfig {
    fn from(api_config: ApiConfig) -> Self {
        Self {
            base_url: ApiConfig::normalize_base_url(&api_config.base_url),
            timeout_seconds: api_config.timeout_seconds,
        }
    }
}

impl ApiClientConfig {
    /// 環境設定からAPIクライアント設定を作成
    pub fn from_env() -> Self {
        ApiConfig::from_env().into()
    }
}

/// APIサーバーからのエラーレスポンス（Spring形式と独自形式の両方を受け付ける）
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub path: Option<String>,
}

/// 汎用APIクライアント
pub struct ApiClient {
    client: Client,
    config: ApiClientConfig,
    token_store: Arc<dyn TokenStore>,
}

impl ApiClient {
    /// 環境変数の設定で新しいAPIクライアントを作成
    pub fn new(token_store: Arc<dyn TokenStore>) -> AppResult<Self> {
        Self::new_with_config(ApiClientConfig::from_env(), token_store)
    }

    /// 設定を指定してAPIクライアントを作成
    pub fn new_with_config(
        config: ApiClientConfig,
        token_store: Arc<dyn TokenStore>,
    ) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AppError::configuration(format!("HTTPクライアント初期化失敗: {e}")))?;

        Ok(Self {
            client,
            config,
            token_store,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// トークン保存先
    pub fn token_store(&self) -> &Arc<dyn TokenStore> {
        &self.token_store
    }

    /// GETリクエストを送信
    pub async fn get<T>(&self, endpoint: &str) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        info!("GETリクエスト送信: endpoint={endpoint}");
        let request = self.client.get(self.url(endpoint));
        self.send_json(request, "GET", endpoint).await
    }

    /// クエリパラメータ付きGETリクエストを送信
    pub async fn get_with_query<T, Q>(&self, endpoint: &str, query: &Q) -> AppResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        info!("GETリクエスト送信: endpoint={endpoint}");
        let request = self.client.get(self.url(endpoint)).query(query);
        self.send_json(request, "GET", endpoint).await
    }

    /// POSTリクエストを送信
    pub async fn post<B, T>(&self, endpoint: &str, body: &B) -> AppResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        info!("POSTリクエスト送信: endpoint={endpoint}");
        let request = self.client.post(self.url(endpoint)).json(body);
        self.send_json(request, "POST", endpoint).await
    }

    /// ボディなしPOSTリクエストを送信
    pub async fn post_empty<T>(&self, endpoint: &str) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        info!("POSTリクエスト送信: endpoint={endpoint}");
        let request = self.client.post(self.url(endpoint));
        self.send_json(request, "POST", endpoint).await
    }

    /// マルチパートPOSTリクエストを送信
    pub async fn post_multipart<T>(&self, endpoint: &str, form: multipart::Form) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        info!("マルチパートPOSTリクエスト送信: endpoint={endpoint}");
        let request = self.client.post(self.url(endpoint)).multipart(form);
        self.send_json(request, "POST", endpoint).await
    }

    /// PUTリクエストを送信
    pub async fn put<B, T>(&self, endpoint: &str, body: &B) -> AppResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        info!("PUTリクエスト送信: endpoint={endpoint}");
        let request = self.client.put(self.url(endpoint)).json(body);
        self.send_json(request, "PUT", endpoint).await
    }

    /// DELETEリクエストを送信し、レスポンスボディを返す
    pub async fn delete_json<T>(&self, endpoint: &str) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        info!("DELETEリクエスト送信: endpoint={endpoint}");
        let request = self.client.delete(self.url(endpoint));
        self.send_json(request, "DELETE", endpoint).await
    }

    /// DELETEリクエストを送信（レスポンスボディは無視）
    pub async fn delete(&self, endpoint: &str) -> AppResult<()> {
        info!("DELETEリクエスト送信: endpoint={endpoint}");
        let request = self.client.delete(self.url(endpoint));
        self.send(request, "DELETE", endpoint).await?;
        Ok(())
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.config.base_url)
    }

    /// 保存済みトークンがあればAuthorizationヘッダーを付与する
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.token_store.load() {
            Ok(Some(token)) => request.bearer_auth(token),
            Ok(None) => request,
            Err(e) => {
                warn!("トークンの読み出しに失敗したため、認証なしで送信します: {e}");
                request
            }
        }
    }

    /// リクエストを送信し、JSONレスポンスを解析する
    ///
    /// 空のボディは JSON の null として扱う
    async fn send_json<T>(&self, request: RequestBuilder, method: &str, endpoint: &str) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        let response = self.send(request, method, endpoint).await?;
        let text = response.text().await?;

        let parsed = if text.trim().is_empty() {
            serde_json::from_value(serde_json::Value::Null)
        } else {
            serde_json::from_str(&text)
        };

        parsed.map_err(|e| AppError::ExternalService(format!("レスポンス解析エラー: {e}")))
    }

    /// リクエストを送信し、ステータスを検査する
    async fn send(&self, request: RequestBuilder, method: &str, endpoint: &str) -> AppResult<Response> {
        let response = self.authorize(request).send().await?;
        let status = response.status();

        if status.is_success() {
            info!("{method}リクエスト成功: endpoint={endpoint}");
            return Ok(response);
        }

        if status == StatusCode::UNAUTHORIZED {
            // 401: トークンだけ削除してエラーを返す
            if let Err(e) = self.token_store.clear() {
                warn!("トークンの削除に失敗しました: {e}");
            }
            warn!("401 Unauthorized - トークンを削除しました: endpoint={endpoint}");
            return Err(AppError::Unauthorized(format!(
                "{method} {endpoint} が401を返しました"
            )));
        }

        let error_response = Self::handle_error_response(response).await;
        let message = error_response
            .message
            .or(error_response.error)
            .unwrap_or_else(|| default_status_message(status).to_string());

        if status == StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(message));
        }

        Err(AppError::ExternalService(format!(
            "APIサーバーエラー: status={} - {message}",
            status.as_u16()
        )))
    }

    /// エラーレスポンスを解析する（JSONでない場合は空のErrorResponse）
    async fn handle_error_response(response: Response) -> ErrorResponse {
        let status = response.status();
        let response_text = response
            .text()
            .await
            .unwrap_or_else(|_| "レスポンス読み取り失敗".to_string());

        match serde_json::from_str::<ErrorResponse>(&response_text) {
            Ok(error_response) => {
                debug!(
                    "APIサーバーから構造化エラーレスポンスを受信: status={status}, message={:?}",
                    error_response.message
                );
                error_response
            }
            Err(_) => {
                warn!(
                    "APIサーバーから非構造化エラーレスポンス: status={status}, body={response_text}"
                );
                ErrorResponse::default()
            }
        }
    }
}

/// ステータスコードごとの既定メッセージ
fn default_status_message(status: StatusCode) -> &'static str {
    match status.as_u16() {
        400 => "요청 형식이 올바르지 않습니다.",
        403 => "권한이 없습니다.",
        404 => "요청한 리소스를 찾을 수 없습니다.",
        413 => "파일 크기가 제한을 초과했습니다.",
        415 => "지원하지 않는 데이터 형식입니다.",
        429 => "요청이 너무 많습니다. 잠시 후 다시 시도해주세요.",
        500 => "서버 내부 오류가 발생했습니다.",
        502 | 503 | 504 => "서버를 일시적으로 사용할 수 없습니다.",
        _ => "알 수 없는 오류가 발생했습니다.",
    }
}
