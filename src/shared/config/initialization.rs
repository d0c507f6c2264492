use crate::shared::config::environment::{get_environment, Environment};
use crate::shared::errors::{AppError, AppResult};
use base64::{engine::general_purpose, Engine as _};
use rand::RngCore;
use std::fs;
use std::path::{Path, PathBuf};

/// アプリケーションデータディレクトリ名
const APP_DIR_NAME: &str = "receipt-recipe";

/// 暗号化キー未設定時に生成するキーファイル名（トークンファイルと同じディレクトリ）
const INSTALL_KEY_FILENAME: &str = "token.key";

/// トークン保存設定
#[derive(Debug, Clone)]
pub struct TokenStoreConfig {
    /// トークンファイルのパス
    pub path: PathBuf,
    /// トークン暗号化用のパスフレーズ
    pub encryption_key: String,
}

impl TokenStoreConfig {
    /// 環境変数から設定を読み込む
    ///
    /// TOKEN_STORE_PATH が未設定の場合はプラットフォームのデータディレクトリを使用する
    pub fn from_env() -> AppResult<Self> {
        let path = match crate::get_env_var_optional!("TOKEN_STORE_PATH") {
            Some(path) if !path.trim().is_empty() => PathBuf::from(path.trim()),
            _ => default_token_store_path()?,
        };

        let encryption_key = match crate::get_env_var_optional!("TOKEN_ENCRYPTION_KEY")
            .filter(|key| !key.is_empty())
        {
            Some(key) => key,
            None => {
                let key_path = install_key_path(&path);
                log::warn!(
                    "TOKEN_ENCRYPTION_KEYが未設定のため、端末ごとに生成したキーファイルを使用します。\
                     このファイルを読めるユーザーはトークンを復号できます: {key_path:?}"
                );
                load_or_create_install_key(&key_path)?
            }
        };

        Ok(Self {
            path,
            encryption_key,
        })
    }
}

/// 既定のトークンファイルパスを取得する
///
/// 開発環境と本番環境でファイル名を分ける
pub fn default_token_store_path() -> AppResult<PathBuf> {
    let data_dir = dirs::data_dir().ok_or_else(|| {
        AppError::configuration("データディレクトリを特定できませんでした")
    })?;

    Ok(data_dir
        .join(APP_DIR_NAME)
        .join(get_token_filename(get_environment())))
}

/// 環境に応じたトークンファイル名を取得する
pub fn get_token_filename(environment: Environment) -> &'static str {
    match environment {
        Environment::Development => "dev_session.json",
        Environment::Production => "session.json",
    }
}

/// トークンファイルに対応するキーファイルのパス
pub fn install_key_path(token_path: &Path) -> PathBuf {
    token_path.with_file_name(INSTALL_KEY_FILENAME)
}

/// 端末ごとの暗号化キーを読み込む（無ければ生成して保存する）
pub fn load_or_create_install_key(key_path: &Path) -> AppResult<String> {
    if key_path.exists() {
        let key = fs::read_to_string(key_path)?.trim().to_string();
        if !key.is_empty() {
            return Ok(key);
        }
        log::warn!("キーファイルが空のため再生成します: {key_path:?}");
    }

    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    let key = general_purpose::STANDARD.encode(bytes);

    ensure_parent_directory(key_path)?;
    fs::write(key_path, &key)?;
    restrict_permissions(key_path)?;

    log::info!("暗号化キーファイルを生成しました: {key_path:?}");
    Ok(key)
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> AppResult<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> AppResult<()> {
    Ok(())
}

/// 親ディレクトリを確実に作成する
pub fn ensure_parent_directory(path: &Path) -> AppResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| {
                AppError::configuration(format!("データディレクトリの作成に失敗: {e}"))
            })?;
            log::info!("データディレクトリを作成しました: {parent:?}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_get_token_filename() {
        assert_eq!(
            get_token_filename(Environment::Development),
            "dev_session.json"
        );
        assert_eq!(get_token_filename(Environment::Production), "session.json");
    }

    #[test]
    fn test_ensure_parent_directory() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("session.json");

        ensure_parent_directory(&path).unwrap();
        assert!(path.parent().unwrap().exists());

        // 既に存在する場合も成功する
        ensure_parent_directory(&path).unwrap();
    }

    #[test]
    fn test_install_key_is_generated_once() {
        let temp_dir = TempDir::new().unwrap();
        let key_path = install_key_path(&temp_dir.path().join("app").join("session.json"));
        assert_eq!(key_path.file_name().unwrap(), "token.key");

        let first = load_or_create_install_key(&key_path).unwrap();
        let second = load_or_create_install_key(&key_path).unwrap();

        assert_eq!(first, second);
        assert_eq!(general_purpose::STANDARD.decode(&first).unwrap().len(), 32);
        assert!(key_path.exists());
    }

    #[test]
    fn test_install_keys_differ_per_install() {
        let a = TempDir::new().unwrap();
        let b = TempDir::new().unwrap();

        let key_a = load_or_create_install_key(&a.path().join("token.key")).unwrap();
        let key_b = load_or_create_install_key(&b.path().join("token.key")).unwrap();
        assert_ne!(key_a, key_b);
    }

    #[cfg(unix)]
    #[test]
    fn test_install_key_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let key_path = temp_dir.path().join("token.key");
        load_or_create_install_key(&key_path).unwrap();

        let mode = fs::metadata(&key_path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
