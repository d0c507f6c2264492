use crate::features::auth::models::{AuthResponse, AuthState, LoginRequest, SignupRequest, User};
use crate::shared::api_client::ApiClient;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::validation::Validate;
use std::sync::Arc;
use tokio::sync::watch;

/// 認証サービス
///
/// ログイン・登録・ログアウトとセッション復元を担当する。
/// トークンはAPIクライアントのトークン保存先に保存され、以降のリクエストに付与される。
#[derive(Clone)]
pub struct AuthService {
    api_client: Arc<ApiClient>,
    state: Arc<watch::Sender<AuthState>>,
}

impl AuthService {
    /// 新しいAuthServiceを作成する
    pub fn new(api_client: Arc<ApiClient>) -> Self {
        let (state, _) = watch::channel(AuthState::default());
        Self {
            api_client,
            state: Arc::new(state),
        }
    }

    /// 現在の認証状態
    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    /// 認証状態の変化を購読する
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    /// ログインする
    ///
    /// # 引数
    /// * `request` - ユーザー名（またはメールアドレス）とパスワード
    ///
    /// # 戻り値
    /// ログインしたユーザー情報
    pub async fn login(&self, request: &LoginRequest) -> AppResult<User> {
        request.validate()?;

        log::info!("ログインを開始します: user={}", request.username_or_email);
        let response: AuthResponse = match self.api_client.post("/auth/signin", request).await {
            Ok(response) => response,
            Err(e) => {
                log::error!("ログインに失敗しました: {e}");
                return Err(e);
            }
        };

        self.api_client.token_store().save(&response.access_token)?;

        let user = response.to_user();
        self.state.send_replace(AuthState::authenticated(user.clone()));

        log::info!("ログインしました: user_id={}", user.id);
        Ok(user)
    }

    /// 会員登録する
    ///
    /// 登録APIのレスポンスはそのまま返す（登録後のログインは行わない）
    pub async fn register(&self, request: &SignupRequest) -> AppResult<serde_json::Value> {
        request.validate()?;

        log::info!("会員登録を開始します: username={}", request.username);
        let result = self.api_client.post("/auth/signup", request).await;
        match &result {
            Ok(_) => log::info!("会員登録が完了しました: username={}", request.username),
            Err(e) => log::error!("会員登録に失敗しました: {e}"),
        }
        result
    }

    /// ログアウトする
    ///
    /// トークンを先に削除してから signout を呼ぶ。signout の失敗は無視する。
    pub async fn logout(&self) -> AppResult<()> {
        self.api_client.token_store().clear()?;
        self.state.send_replace(AuthState::default());

        if let Err(e) = self
            .api_client
            .post_empty::<serde_json::Value>("/auth/signout")
            .await
        {
            log::warn!("signout APIの呼び出しに失敗しました（無視します）: {e}");
        }

        log::info!("ログアウトしました");
        Ok(())
    }

    /// ログイン中のユーザー情報を取得する
    pub async fn current_user(&self) -> AppResult<User> {
        self.api_client.get("/auth/me").await.map_err(|e| {
            self.handle_error(&e);
            e
        })
    }

    /// API呼び出しのエラーを認証状態に反映する
    ///
    /// 401 の場合はトークンが削除済みなので、未ログイン状態を通知する。
    pub fn handle_error(&self, error: &AppError) {
        if error.is_unauthorized() && self.state.borrow().is_authenticated {
            log::warn!("認証が切れたため未ログイン状態に戻します");
            self.state.send_replace(AuthState::default());
        }
    }

    /// 起動時にセッションを復元する
    ///
    /// トークンが保存されていれば `/auth/me` でユーザーを取得する。
    /// 取得に失敗した場合はトークンを削除し、未ログイン状態で続行する。
    pub async fn restore_session(&self) -> AuthState {
        self.state.send_replace(AuthState::loading());

        let token = match self.api_client.token_store().load() {
            Ok(token) => token,
            Err(e) => {
                log::warn!("保存済みトークンの読み出しに失敗しました: {e}");
                None
            }
        };

        let state = match token {
            None => {
                log::debug!("保存済みトークンがないため未ログインで開始します");
                AuthState::default()
            }
            Some(_) => match self.current_user().await {
                Ok(user) => {
                    log::info!("セッションを復元しました: user_id={}", user.id);
                    AuthState::authenticated(user)
                }
                Err(e) => {
                    log::warn!("セッションの復元に失敗したためトークンを削除します: {e}");
                    if let Err(e) = self.api_client.token_store().clear() {
                        log::warn!("トークンの削除に失敗しました: {e}");
                    }
                    AuthState::default()
                }
            },
        };

        self.state.send_replace(state.clone());
        state
    }
}
