use crate::route::AppRoute;
use crate::validation::FieldErrors;

// =========================================================
// 用户可见的固定文案
// =========================================================

pub const SESSION_EXPIRED_MESSAGE: &str = "Session expired. Please log in again.";
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred.";
pub const MISSING_TOKEN_MESSAGE: &str = "Login response did not include an access token.";

/// 非 2xx 且没有可用错误信息时的兜底文案
pub fn status_fallback_message(status: u16) -> String {
    format!("Request failed with status {}", status)
}

// =========================================================
// 错误分类
// =========================================================

/// 错误分类
/// 决定错误在界面上的呈现方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 本地字段校验失败，显示在字段旁，从不发送到网络
    Validation,
    /// 401: 会话失效，令牌已清除，需要跳转登录
    Authentication,
    /// 其他非 2xx：使用服务端文案或兜底文案
    Domain,
    /// 没有拿到响应或响应无法解析
    Transport,
}

/// 网关与表单流程的统一错误类型
///
/// `Display` 输出就是展示给用户的文案。
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(FieldErrors),
    #[error("{}", SESSION_EXPIRED_MESSAGE)]
    SessionExpired,
    #[error("{message}")]
    Domain { status: u16, message: String },
    /// `detail` 只用于开发者诊断
    #[error("{}", UNEXPECTED_ERROR_MESSAGE)]
    Transport { detail: String },
    #[error("{}", MISSING_TOKEN_MESSAGE)]
    MissingToken,
}

impl ApiError {
    pub fn domain(status: u16, message: impl Into<String>) -> Self {
        Self::Domain {
            status,
            message: message.into(),
        }
    }

    pub fn transport(detail: impl Into<String>) -> Self {
        Self::Transport {
            detail: detail.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Validation(_) => ErrorKind::Validation,
            ApiError::SessionExpired => ErrorKind::Authentication,
            ApiError::Domain { .. } | ApiError::MissingToken => ErrorKind::Domain,
            ApiError::Transport { .. } => ErrorKind::Transport,
        }
    }

    /// 获取对应的 HTTP 状态码（如果错误来自某个响应）
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::SessionExpired => Some(401),
            ApiError::Domain { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn user_message(&self) -> String {
        self.to_string()
    }

    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            ApiError::Validation(errors) => Some(errors),
            _ => None,
        }
    }

    /// 调用方需要执行的跳转
    pub fn redirect(&self) -> Option<AppRoute> {
        match self {
            ApiError::SessionExpired => Some(AppRoute::auth_failure_redirect()),
            _ => None,
        }
    }

    pub fn is_session_expired(&self) -> bool {
        matches!(self, ApiError::SessionExpired)
    }
}

impl From<FieldErrors> for ApiError {
    fn from(errors: FieldErrors) -> Self {
        ApiError::Validation(errors)
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
