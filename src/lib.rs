//! Sentimeter 客户端核心
//!
//! 与平台无关的会话与后端交互逻辑，浏览器前端和测试共用：
//! - `token`: 令牌存储接口（唯一的令牌读写入口）
//! - `session`: 认证状态解析与页面守卫
//! - `gateway`: 后端调用约定（Bearer 头、状态码解释、错误归一化）
//! - `api`: 登录、注册、分析、资料等业务操作
//! - `form` / `profile` / `validation`: 表单状态机、变更检测、字段校验

pub mod api;
pub mod config;
pub mod error;
pub mod form;
pub mod gateway;
pub mod profile;
pub mod request;
pub mod route;
pub mod sentiment;
pub mod session;
pub mod token;
pub mod validation;

pub use api::{LoginSuccess, PendingRedirect, RegisterSuccess, SentimentApi};
pub use config::ClientConfig;
pub use error::{ApiError, ApiResult, ErrorKind};
pub use route::AppRoute;
pub use session::{AuthStatus, PageView, SessionGate};
pub use token::{MemoryTokenStore, SharedTokenStore, TokenStore};

pub use sentimeter_shared as shared;
