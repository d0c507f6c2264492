use crate::shared::serde_ext::null_as_default;
use serde::{Deserialize, Serialize};

/// ユーザー情報を表す構造体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// ユーザーID
    pub id: i64,
    /// ユーザー名
    pub username: String,
    /// メールアドレス
    pub email: String,
    /// 表示名
    #[serde(default)]
    pub display_name: Option<String>,
    /// プロフィール画像URL
    #[serde(default)]
    pub avatar_url: Option<String>,
    /// ユーザー設定（JSON文字列）
    #[serde(default)]
    pub preferences: Option<String>,
    /// ロール一覧
    #[serde(default, deserialize_with = "null_as_default")]
    pub roles: Vec<String>,
    /// 作成日時
    #[serde(default)]
    pub created_at: Option<String>,
    /// 更新日時
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl User {
    /// 画面に表示する名前（表示名がなければユーザー名）
    pub fn display_label(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.username)
    }
}

/// ログインリクエスト
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// ユーザー名またはメールアドレス
    pub username_or_email: String,
    /// パスワード
    pub password: String,
}

/// 会員登録リクエスト
///
/// 確認用パスワードはクライアント側の検証にだけ使い、送信しない。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(skip)]
    pub confirm_password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

/// ログインAPIのレスポンス
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    /// アクセストークン
    pub access_token: String,
    /// トークン種別（通常は "Bearer"）
    #[serde(default)]
    pub token_type: Option<String>,
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub roles: Vec<String>,
}

impl AuthResponse {
    /// レスポンスからユーザー情報を組み立てる
    pub fn to_user(&self) -> User {
        User {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            display_name: self.display_name.clone(),
            avatar_url: None,
            preferences: None,
            roles: self.roles.clone(),
            created_at: None,
            updated_at: None,
        }
    }
}

/// 認証状態を表す構造体
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthState {
    /// ユーザー情報
    pub user: Option<User>,
    /// 認証済みフラグ
    pub is_authenticated: bool,
    /// ローディング状態
    pub is_loading: bool,
}

impl AuthState {
    /// ログイン済みの状態
    pub fn authenticated(user: User) -> Self {
        Self {
            user: Some(user),
            is_authenticated: true,
            is_loading: false,
        }
    }

    /// 読み込み中の状態
    pub fn loading() -> Self {
        Self {
            is_loading: true,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_response_deserialize() {
        let json = r#"{
            "accessToken": "jwt-token",
            "tokenType": "Bearer",
            "id": 7,
            "username": "cook",
            "email": "cook@example.com",
            "roles": ["ROLE_USER"]
        }"#;

        let response: AuthResponse = serde_json::from_str(json).unwrap();
        let user = response.to_user();

        assert_eq!(response.access_token, "jwt-token");
        assert_eq!(user.id, 7);
        assert_eq!(user.display_label(), "cook");
        assert_eq!(user.roles, vec!["ROLE_USER".to_string()]);
    }

    #[test]
    fn test_signup_request_omits_confirmation() {
        let request = SignupRequest {
            username: "cook".to_string(),
            email: "cook@example.com".to_string(),
            password: "secret1".to_string(),
            confirm_password: "secret1".to_string(),
            display_name: None,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("confirmPassword").is_none());
        assert!(json.get("displayName").is_none());
        assert_eq!(json["username"], "cook");
    }

    #[test]
    fn test_login_request_wire_names() {
        let request = LoginRequest {
            username_or_email: "cook".to_string(),
            password: "pw".to_string(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["usernameOrEmail"], "cook");
    }

    #[test]
    fn test_auth_state_default() {
        let state = AuthState::default();
        assert!(!state.is_authenticated);
        assert!(state.user.is_none());
        assert!(AuthState::loading().is_loading);
    }
}
