/// 認証トークン保存モジュール
///
/// ブラウザ版の localStorage に相当する保存先。APIクライアントは送信のたびに
/// ここからトークンを読み出し、401 を受けた時点で削除する。
/// ファイル保存先は初回読み出し後の値をメモリに保持する。
use crate::features::auth::encryption::{EncryptedData, TokenEncryption};
use crate::shared::config::initialization::{ensure_parent_directory, TokenStoreConfig};
use crate::shared::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

/// トークン保存先の抽象
pub trait TokenStore: Send + Sync {
    /// 保存済みトークンを取得する（未保存ならNone）
    fn load(&self) -> AppResult<Option<String>>;

    /// トークンを保存する
    fn save(&self, token: &str) -> AppResult<()>;

    /// トークンを削除する
    fn clear(&self) -> AppResult<()>;
}

/// メモリ上のトークン保存先（テスト・一時セッション用）
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// トークン保存済みの状態で作成する
    pub fn with_token(token: &str) -> Self {
        Self {
            token: Mutex::new(Some(token.to_string())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> AppResult<Option<String>> {
        let guard = self
            .token
            .lock()
            .map_err(|e| AppError::security(format!("トークンロックの取得に失敗: {e}")))?;
        Ok(guard.clone())
    }

    fn save(&self, token: &str) -> AppResult<()> {
        let mut guard = self
            .token
            .lock()
            .map_err(|e| AppError::security(format!("トークンロックの取得に失敗: {e}")))?;
        *guard = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> AppResult<()> {
        let mut guard = self
            .token
            .lock()
            .map_err(|e| AppError::security(format!("トークンロックの取得に失敗: {e}")))?;
        *guard = None;
        Ok(())
    }
}

/// ファイルに保存するトークンの形式
#[derive(Debug, Serialize, Deserialize)]
struct StoredToken {
    #[serde(rename = "authToken")]
    auth_token: EncryptedData,
    /// 保存日時（RFC3339形式）
    #[serde(rename = "savedAt")]
    saved_at: String,
}

/// 暗号化してファイルに保存するトークン保存先
///
/// ファイルの読み出しと復号は最初の `load` で1回だけ行う。
/// 同じファイルを共有する別インスタンスの変更は反映されない。
pub struct FileTokenStore {
    path: PathBuf,
    encryption: TokenEncryption,
    /// 読み込み済みのトークン（外側のNoneは未読み込み）
    cache: Mutex<Option<Option<String>>>,
}

impl FileTokenStore {
    /// 新しいFileTokenStoreを作成する
    ///
    /// # 引数
    /// * `path` - トークンファイルのパス
    /// * `passphrase` - 暗号化キーのパスフレーズ
    pub fn new(path: PathBuf, passphrase: &str) -> Self {
        Self {
            path,
            encryption: TokenEncryption::new(passphrase),
            cache: Mutex::new(None),
        }
    }

    /// 設定から作成する
    pub fn from_config(config: &TokenStoreConfig) -> Self {
        Self::new(config.path.clone(), &config.encryption_key)
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn lock_cache(&self) -> AppResult<MutexGuard<'_, Option<Option<String>>>> {
        self.cache
            .lock()
            .map_err(|e| AppError::security(format!("トークンロックの取得に失敗: {e}")))
    }

    fn read_file(&self) -> AppResult<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path)?;
        let stored: StoredToken = serde_json::from_str(&contents)?;

        match self.encryption.decrypt(&stored.auth_token) {
            Ok(token) => Ok(Some(token)),
            Err(e) => {
                // キーが変わった等で復号できないトークンは破棄する
                log::warn!("保存済みトークンを復号できないため破棄します: {e}");
                fs::remove_file(&self.path)?;
                Ok(None)
            }
        }
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> AppResult<Option<String>> {
        let mut cache = self.lock_cache()?;
        if let Some(token) = cache.as_ref() {
            return Ok(token.clone());
        }

        let token = self.read_file()?;
        *cache = Some(token.clone());
        Ok(token)
    }

    fn save(&self, token: &str) -> AppResult<()> {
        let mut cache = self.lock_cache()?;

        let auth_token = self
            .encryption
            .encrypt(token)
            .map_err(|e| AppError::security(format!("トークンの暗号化に失敗: {e}")))?;

        let stored = StoredToken {
            auth_token,
            saved_at: chrono::Utc::now().to_rfc3339(),
        };

        ensure_parent_directory(&self.path)?;
        fs::write(&self.path, serde_json::to_string_pretty(&stored)?)?;
        *cache = Some(Some(token.to_string()));

        log::info!("認証トークンを保存しました");
        Ok(())
    }

    fn clear(&self) -> AppResult<()> {
        let mut cache = self.lock_cache()?;
        *cache = Some(None);

        if self.path.exists() {
            fs::remove_file(&self.path)?;
            log::info!("認証トークンを削除しました");
        }
        Ok(())
    }
}
