//! 表单字段校验
//!
//! 在发起网络请求之前执行；校验失败时不会发出任何请求，
//! 错误按字段返回，由界面显示在对应输入框旁边。

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use sentimeter_shared::{Credentials, RegisterRequest, UpdateProfileRequest};

pub const MIN_PASSWORD_LEN: usize = 8;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$").expect("email pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Username,
    Email,
    Password,
    Text,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Username => "username",
            Field::Email => "email",
            Field::Password => "password",
            Field::Text => "text",
        }
    }
}

/// 按字段收集的校验错误，每个字段只保留第一条
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }

    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }

    fn require(&mut self, field: Field, value: &str, message: &str) -> bool {
        if value.trim().is_empty() {
            self.insert(field, message);
            false
        } else {
            true
        }
    }

    fn email(&mut self, value: &str) {
        if self.require(Field::Email, value, "Email is required") && !is_valid_email(value) {
            self.insert(Field::Email, "Invalid email address");
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, message)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", field.as_str(), message)?;
        }
        Ok(())
    }
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value.trim())
}

pub trait Validate {
    fn validate(&self) -> Result<(), FieldErrors>;
}

impl Validate for Credentials {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require(Field::Username, &self.username, "Username is required");
        // 密码不做 trim，空格也是合法字符
        if self.password.is_empty() {
            errors.insert(Field::Password, "Password is required");
        }
        errors.into_result()
    }
}

impl Validate for RegisterRequest {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require(Field::Name, &self.name, "Full name is required");
        errors.require(Field::Username, &self.username, "Username is required");
        errors.email(&self.email);
        if self.password.is_empty() {
            errors.insert(Field::Password, "Password is required");
        } else if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.insert(Field::Password, "Password must be at least 8 characters");
        }
        errors.into_result()
    }
}

impl Validate for UpdateProfileRequest {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require(Field::Name, &self.name, "Full name is required");
        errors.email(&self.email);
        errors.into_result()
    }
}

/// 待分析文本不能为空白
pub fn validate_text(text: &str) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    errors.require(Field::Text, text, "Please enter some text to analyze.");
    errors.into_result()
}
