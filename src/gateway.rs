//! 后端网关
//!
//! 所有后端调用的统一入口：
//! - 令牌存在时附加 `Authorization: Bearer <token>`
//! - 解释 HTTP 状态码，把错误响应归一化为一条用户可读的消息
//! - 需要认证的接口返回 401 时清除令牌
//!
//! 不做重试，也不设超时：每次失败都直接返回给调用方。

use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult, status_fallback_message};
use crate::request::{HttpClient, HttpRequest, HttpResponse};
use crate::token::SharedTokenStore;
use sentimeter_shared::HEADER_AUTHORIZATION;
use sentimeter_shared::protocol::{ApiRequest, BodyEncoding};

#[derive(Clone)]
pub struct Gateway<C> {
    config: ClientConfig,
    client: C,
    store: SharedTokenStore,
}

impl<C: HttpClient> Gateway<C> {
    pub fn new(config: ClientConfig, client: C, store: SharedTokenStore) -> Self {
        Self {
            config,
            client,
            store,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn token_store(&self) -> &SharedTokenStore {
        &self.store
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// 构建 HTTP 请求
    pub fn build<R: ApiRequest>(&self, request: &R) -> ApiResult<HttpRequest> {
        let url = self.config.url(R::PATH);
        let mut req = HttpRequest::new(&url, R::METHOD).with_header("Accept", "application/json");

        if let Some(token) = self.store.get() {
            req = req.with_header(HEADER_AUTHORIZATION, &format!("Bearer {}", token));
        }

        if let Some(content_type) = R::ENCODING.content_type() {
            req = req.with_header("Content-Type", content_type);
        }

        let body = match R::ENCODING {
            BodyEncoding::Empty => None,
            BodyEncoding::Json => Some(
                serde_json::to_string(request)
                    .map_err(|e| ApiError::transport(format!("encode {}: {}", R::PATH, e)))?,
            ),
            BodyEncoding::Form => Some(encode_form(request)?),
        };

        if let Some(body) = body {
            req = req.with_body(body);
        }
        Ok(req)
    }

    /// 发送请求并解释响应
    pub async fn call<R: ApiRequest>(&self, request: &R) -> ApiResult<R::Response> {
        let resp = self.call_raw(request).await?;
        serde_json::from_str::<R::Response>(&resp.body).map_err(|e| {
            log::warn!("{} returned an unreadable success body: {}", R::PATH, e);
            ApiError::transport(e.to_string())
        })
    }

    /// 发送请求，2xx 时原样返回响应，由调用方决定如何读取响应体
    pub async fn call_raw<R: ApiRequest>(&self, request: &R) -> ApiResult<HttpResponse> {
        let req = self.build(request)?;
        log::debug!("{} {}", R::METHOD.as_str(), req.url);

        let resp = self.client.send(req).await.map_err(|e| {
            log::warn!("{} {} failed without response: {}", R::METHOD.as_str(), R::PATH, e);
            ApiError::transport(e.to_string())
        })?;

        self.check_status::<R>(resp)
    }

    fn check_status<R: ApiRequest>(&self, resp: HttpResponse) -> ApiResult<HttpResponse> {
        if resp.ok() {
            return Ok(resp);
        }

        // 会话失效：不再解析响应体
        if resp.status == 401 && R::AUTHENTICATED {
            log::info!("{} rejected the session token, clearing it", R::PATH);
            self.store.clear();
            return Err(ApiError::SessionExpired);
        }

        let message = extract_error_message(&resp.body)
            .unwrap_or_else(|| status_fallback_message(resp.status));
        log::debug!("{} failed with status {}: {}", R::PATH, resp.status, message);
        Err(ApiError::domain(resp.status, message))
    }
}

/// 从错误响应体中提取消息：优先 `detail`，其次 `message`
///
/// 只接受字符串值；响应体不是 JSON 或字段缺失时返回 `None`。
pub fn extract_error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["detail", "message"].iter().find_map(|key| {
        value
            .get(*key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    })
}

/// 把请求值编码为 `application/x-www-form-urlencoded`
///
/// 只支持扁平对象：字符串、数字、布尔值，null 跳过。
fn encode_form<R: ApiRequest>(request: &R) -> ApiResult<String> {
    let value = serde_json::to_value(request)
        .map_err(|e| ApiError::transport(format!("encode {}: {}", R::PATH, e)))?;
    let Value::Object(fields) = value else {
        return Err(ApiError::transport(format!(
            "{} form body must be an object",
            R::PATH
        )));
    };

    let mut pairs = Vec::with_capacity(fields.len());
    for (key, field) in fields {
        let text = match field {
            Value::Null => continue,
            Value::String(s) => s,
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            _ => {
                return Err(ApiError::transport(format!(
                    "{} form field `{}` is not a scalar",
                    R::PATH,
                    key
                )));
            }
        };
        pairs.push(format!(
            "{}={}",
            urlencoding::encode(&key),
            urlencoding::encode(&text)
        ));
    }
    Ok(pairs.join("&"))
}

#[cfg(test)]
mod tests;
