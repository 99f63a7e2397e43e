use std::time::Duration;

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::gateway::Gateway;
use crate::request::HttpClient;
use crate::route::AppRoute;
use crate::sentiment::AnalysisResult;
use crate::token::SharedTokenStore;
use crate::validation::{Validate, validate_text};
use sentimeter_shared::{
    Credentials, CurrentUserRequest, PredictRequest, RegisterRequest, RegisterResponse,
    UpdateProfileRequest, UserProfile,
};

pub const LOGIN_SUCCESS_MESSAGE: &str = "Login successful! Redirecting...";
pub const REGISTER_SUCCESS_MESSAGE: &str = "Account created successfully! You can now log in.";
pub const PROFILE_UPDATED_MESSAGE: &str = "Profile updated successfully.";

// =========================================================
// 流程结果
// =========================================================

/// 延迟执行的跳转，让用户先看到确认信息
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingRedirect {
    pub route: AppRoute,
    pub after: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginSuccess {
    pub message: String,
    pub redirect: PendingRedirect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterSuccess {
    pub message: String,
    pub redirect: PendingRedirect,
}

// =========================================================
// API 客户端
// =========================================================

/// 情感分析后端的业务接口
///
/// 每个操作先做本地校验，校验失败直接返回 [`ApiError::Validation`]，不发出请求。
#[derive(Clone)]
pub struct SentimentApi<C> {
    gateway: Gateway<C>,
}

impl<C: HttpClient> SentimentApi<C> {
    pub fn new(config: ClientConfig, client: C, store: SharedTokenStore) -> Self {
        Self {
            gateway: Gateway::new(config, client, store),
        }
    }

    pub fn gateway(&self) -> &Gateway<C> {
        &self.gateway
    }

    pub fn token_store(&self) -> &SharedTokenStore {
        self.gateway.token_store()
    }

    fn redirect_to(&self, route: AppRoute) -> PendingRedirect {
        PendingRedirect {
            route,
            after: self.gateway.config().redirect_delay,
        }
    }

    /// 登录并保存令牌
    ///
    /// 失败时令牌存储保持不变。
    pub async fn login(&self, credentials: &Credentials) -> ApiResult<LoginSuccess> {
        credentials.validate()?;

        let resp = self.gateway.call(credentials).await?;
        let token = resp.into_token().ok_or(ApiError::MissingToken)?;
        self.token_store().set(&token);
        log::info!("signed in, session token stored");

        Ok(LoginSuccess {
            message: LOGIN_SUCCESS_MESSAGE.to_string(),
            redirect: self.redirect_to(AppRoute::auth_success_redirect()),
        })
    }

    /// 注册新账户
    ///
    /// 任何 2xx 都算成功；确认内容读不出来（空响应体、非对象）时使用默认文案。
    pub async fn register(&self, request: &RegisterRequest) -> ApiResult<RegisterSuccess> {
        request.validate()?;

        let resp = self.gateway.call_raw(request).await?;
        let confirmation: RegisterResponse = serde_json::from_str(&resp.body).unwrap_or_default();
        let message = confirmation
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| REGISTER_SUCCESS_MESSAGE.to_string());

        Ok(RegisterSuccess {
            message,
            redirect: self.redirect_to(AppRoute::Login),
        })
    }

    pub async fn analyze(&self, text: &str) -> ApiResult<AnalysisResult> {
        validate_text(text)?;

        let request = PredictRequest {
            text: text.to_string(),
        };
        let resp = self.gateway.call(&request).await?;
        Ok(AnalysisResult::from(resp))
    }

    pub async fn fetch_profile(&self) -> ApiResult<UserProfile> {
        self.gateway.call(&CurrentUserRequest).await
    }

    pub async fn update_profile(&self, update: &UpdateProfileRequest) -> ApiResult<UserProfile> {
        update.validate()?;
        self.gateway.call(update).await
    }

    /// 注销：清除令牌，返回应跳转的页面
    pub fn logout(&self) -> AppRoute {
        self.token_store().clear();
        log::info!("signed out");
        AppRoute::auth_failure_redirect()
    }
}

#[cfg(test)]
mod tests;
