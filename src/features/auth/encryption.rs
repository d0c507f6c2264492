use aes_gcm::{
    aead::{Aead, KeyInit, OsRng},
    Aes256Gcm, Nonce,
};
use base64::{engine::general_purpose, Engine as _};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

const ALGORITHM: &str = "AES-256-GCM";

/// 暗号化エラー
#[derive(Debug, thiserror::Error)]
pub enum EncryptionError {
    #[error("暗号化エラー: {0}")]
    EncryptionFailed(String),

    #[error("復号化エラー: {0}")]
    DecryptionFailed(String),

    #[error("キー生成エラー: {0}")]
    KeyGenerationFailed(String),

    #[error("Base64エンコードエラー: {0}")]
    Base64Error(String),

    #[error("データ形式エラー: {0}")]
    FormatError(String),
}

/// 暗号化されたデータ
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncryptedData {
    /// 暗号化されたデータ（Base64エンコード）
    pub ciphertext: String,
    /// ナンス（Base64エンコード）
    pub nonce: String,
    /// 暗号化アルゴリズム
    pub algorithm: String,
}

/// 認証トークン暗号化サービス
#[derive(Clone)]
pub struct TokenEncryption {
    /// 暗号化キー（32バイト）
    encryption_key: [u8; 32],
}

impl TokenEncryption {
    /// パスフレーズから新しいTokenEncryptionを作成する
    ///
    /// キーはパスフレーズのSHA-256ダイジェスト
    pub fn new(passphrase: &str) -> Self {
        let digest = Sha256::digest(passphrase.as_bytes());
        let mut encryption_key = [0u8; 32];
        encryption_key.copy_from_slice(&digest);
        Self { encryption_key }
    }

    /// データを暗号化する
    pub fn encrypt(&self, plaintext: &str) -> Result<EncryptedData, EncryptionError> {
        let cipher = Aes256Gcm::new_from_slice(&self.encryption_key)
            .map_err(|e| EncryptionError::KeyGenerationFailed(e.to_string()))?;

        let mut nonce_bytes = [0u8; 12];
        OsRng.fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = cipher
            .encrypt(nonce, plaintext.as_bytes())
            .map_err(|e| EncryptionError::EncryptionFailed(e.to_string()))?;

        Ok(EncryptedData {
            ciphertext: general_purpose::STANDARD.encode(&ciphertext),
            nonce: general_purpose::STANDARD.encode(nonce_bytes),
            algorithm: ALGORITHM.to_string(),
        })
    }

    /// データを復号化する
    pub fn decrypt(&self, encrypted_data: &EncryptedData) -> Result<String, EncryptionError> {
        if encrypted_data.algorithm != ALGORITHM {
            return Err(EncryptionError::FormatError(format!(
                "サポートされていないアルゴリズム: {}",
                encrypted_data.algorithm
            )));
        }

        let cipher = Aes256Gcm::new_from_slice(&self.encryption_key)
            .map_err(|e| EncryptionError::KeyGenerationFailed(e.to_string()))?;

        let ciphertext = general_purpose::STANDARD
            .decode(&encrypted_data.ciphertext)
            .map_err(|e| EncryptionError::Base64Error(format!("暗号文デコードエラー: {e}")))?;

        let nonce_bytes = general_purpose::STANDARD
            .decode(&encrypted_data.nonce)
            .map_err(|e| EncryptionError::Base64Error(format!("ナンスデコードエラー: {e}")))?;

        if nonce_bytes.len() != 12 {
            return Err(EncryptionError::FormatError(
                "ナンスのサイズが正しくありません".to_string(),
            ));
        }

        let nonce = Nonce::from_slice(&nonce_bytes);

        let plaintext = cipher
            .decrypt(nonce, ciphertext.as_ref())
            .map_err(|e| EncryptionError::DecryptionFailed(e.to_string()))?;

        String::from_utf8(plaintext)
            .map_err(|e| EncryptionError::DecryptionFailed(format!("UTF-8変換エラー: {e}")))
    }
}
