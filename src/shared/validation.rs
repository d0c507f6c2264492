/// 入力フォームのバリデーション
///
/// 送信前にフィールド単位の規則（必須・長さ・形式）を検査する。
/// フィールドごとに最初に違反した規則のメッセージだけを保持する。
use crate::features::auth::models::{LoginRequest, SignupRequest};
use crate::features::community::models::{CommentRequest, PostRequest};
use crate::features::profile::models::{PasswordChangeRequest, ProfileUpdateRequest};
use crate::features::ratings::models::RatingRequest;
use crate::features::tags::models::TagRequest;
use crate::shared::errors::AppError;
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}$")
        .expect("メールアドレスの正規表現が不正です")
});

/// フィールド単位のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// バリデーション結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// 指定フィールドのエラーメッセージ
    pub fn field(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    fn has(&self, field: &str) -> bool {
        self.field(field).is_some()
    }

    fn push(&mut self, field: &'static str, message: &str) {
        if !self.has(field) {
            self.errors.push(FieldError {
                field,
                message: message.to_string(),
            });
        }
    }

    /// 必須チェック（空白のみも未入力扱い）
    pub fn required(&mut self, field: &'static str, value: &str, message: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.push(field, message);
        }
        self
    }

    /// 文字数チェック（入力がある場合のみ）
    pub fn length(
        &mut self,
        field: &'static str,
        value: &str,
        min: usize,
        max: usize,
        message: &str,
    ) -> &mut Self {
        let count = value.chars().count();
        if count > 0 && (count < min || count > max) {
            self.push(field, message);
        }
        self
    }

    /// メールアドレス形式チェック（入力がある場合のみ）
    pub fn email(&mut self, field: &'static str, value: &str, message: &str) -> &mut Self {
        if !value.is_empty() && !EMAIL_PATTERN.is_match(value) {
            self.push(field, message);
        }
        self
    }

    /// 2つの値が一致するかチェック
    pub fn matches(
        &mut self,
        field: &'static str,
        value: &str,
        expected: &str,
        message: &str,
    ) -> &mut Self {
        if !value.is_empty() && value != expected {
            self.push(field, message);
        }
        self
    }

    /// エラーがなければOk、あればAppError::Validation
    pub fn into_result(self) -> Result<(), AppError> {
        match self.errors.first() {
            None => Ok(()),
            Some(first) => Err(AppError::Validation(first.message.clone())),
        }
    }
}

/// 送信前に検査できる入力
pub trait Validate {
    fn validation_errors(&self) -> ValidationErrors;

    fn validate(&self) -> Result<(), AppError> {
        self.validation_errors().into_result()
    }
}

impl Validate for LoginRequest {
    fn validation_errors(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors
            .required(
                "usernameOrEmail",
                &self.username_or_email,
                "사용자명 또는 이메일을 입력해주세요!",
            )
            .required("password", &self.password, "비밀번호를 입력해주세요!");
        errors
    }
}

impl Validate for SignupRequest {
    fn validation_errors(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors
            .required("username", &self.username, "사용자명을 입력해주세요!")
            .length(
                "username",
                &self.username,
                3,
                20,
                "사용자명은 3자 이상 20자 이하여야 합니다!",
            )
            .required("email", &self.email, "이메일을 입력해주세요!")
            .email("email", &self.email, "올바른 이메일 형식이 아닙니다!")
            .length("email", &self.email, 1, 50, "이메일은 50자 이하여야 합니다!")
            .required("password", &self.password, "비밀번호를 입력해주세요!")
            .length(
                "password",
                &self.password,
                6,
                40,
                "비밀번호는 6자 이상 40자 이하여야 합니다!",
            )
            .required(
                "confirmPassword",
                &self.confirm_password,
                "비밀번호 확인을 입력해주세요!",
            )
            .matches(
                "confirmPassword",
                &self.confirm_password,
                &self.password,
                "비밀번호가 일치하지 않습니다!",
            );

        if let Some(display_name) = &self.display_name {
            errors.length(
                "displayName",
                display_name,
                0,
                50,
                "표시명은 50자 이하여야 합니다!",
            );
        }
        errors
    }
}

impl Validate for PostRequest {
    fn validation_errors(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors
            .required("title", &self.title, "제목을 입력해주세요!")
            .length("title", &self.title, 1, 200, "제목은 200자 이하여야 합니다!")
            .required("content", &self.content, "내용을 입력해주세요!");
        errors
    }
}

impl Validate for CommentRequest {
    fn validation_errors(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.required("content", &self.content, "댓글 내용을 입력해주세요!");
        errors
    }
}

impl Validate for ProfileUpdateRequest {
    fn validation_errors(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        if let Some(display_name) = &self.display_name {
            errors.length(
                "displayName",
                display_name,
                0,
                50,
                "표시명은 50자 이하여야 합니다!",
            );
        }
        if let Some(email) = &self.email {
            errors.email("email", email, "올바른 이메일 형식이 아닙니다!");
        }
        errors
    }
}

impl Validate for PasswordChangeRequest {
    fn validation_errors(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors
            .required(
                "currentPassword",
                &self.current_password,
                "현재 비밀번호를 입력해주세요!",
            )
            .required("newPassword", &self.new_password, "새 비밀번호를 입력해주세요!")
            .length(
                "newPassword",
                &self.new_password,
                6,
                40,
                "비밀번호는 6자 이상 40자 이하여야 합니다!",
            )
            .required(
                "confirmPassword",
                &self.confirm_password,
                "비밀번호 확인을 입력해주세요!",
            )
            .matches(
                "confirmPassword",
                &self.confirm_password,
                &self.new_password,
                "비밀번호가 일치하지 않습니다!",
            );
        errors
    }
}

impl Validate for RatingRequest {
    fn validation_errors(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        if !(1..=5).contains(&self.rating) {
            errors.push("rating", "평점은 1점 이상 5점 이하여야 합니다");
        }
        errors
    }
}

impl Validate for TagRequest {
    fn validation_errors(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors
            .required("name", &self.name, "태그명을 입력해주세요.")
            .required("color", &self.color, "색상을 선택해주세요.");
        errors
    }
}
