//! 表单提交状态机
//!
//! `Idle -> Submitting -> {Succeeded, Failed}`，下一次显式提交才会重新进入 `Submitting`。
//! 提交中禁止再次提交；卸载或重置后到达的结果通过 [`Ticket`] 识别并丢弃。

use crate::error::ApiError;
use crate::validation::{Field, FieldErrors};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitState {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
}

/// 表单顶部的提示条
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub kind: BannerKind,
    pub text: String,
}

impl Banner {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Error,
            text: text.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == BannerKind::Error
    }
}

/// 一次提交的凭据
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug, Clone, PartialEq)]
pub struct FormFlow<T> {
    state: SubmitState,
    generation: u64,
    banner: Option<Banner>,
    field_errors: FieldErrors,
    output: Option<T>,
}

impl<T> Default for FormFlow<T> {
    fn default() -> Self {
        Self {
            state: SubmitState::Idle,
            generation: 0,
            banner: None,
            field_errors: FieldErrors::new(),
            output: None,
        }
    }
}

impl<T> FormFlow<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SubmitState {
        self.state
    }

    pub fn is_submitting(&self) -> bool {
        self.state == SubmitState::Submitting
    }

    pub fn is_submit_disabled(&self) -> bool {
        self.is_submitting()
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    pub fn field_error(&self, field: Field) -> Option<&str> {
        self.field_errors.get(field)
    }

    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    pub fn output(&self) -> Option<&T> {
        self.output.as_ref()
    }

    /// 开始一次提交
    ///
    /// 提交中返回 `None`。开始时清空上一次的结果、提示和字段错误。
    pub fn begin(&mut self) -> Option<Ticket> {
        if self.is_submitting() {
            return None;
        }
        self.generation += 1;
        self.state = SubmitState::Submitting;
        self.banner = None;
        self.field_errors = FieldErrors::new();
        self.output = None;
        Some(Ticket(self.generation))
    }

    fn is_current(&self, ticket: Ticket) -> bool {
        self.is_submitting() && ticket.0 == self.generation
    }

    /// 应用提交结果，过期的凭据返回 `false` 且不改变状态
    pub fn succeed(&mut self, ticket: Ticket, output: T, message: Option<String>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.state = SubmitState::Succeeded;
        self.banner = message.map(Banner::success);
        self.output = Some(output);
        true
    }

    pub fn fail(&mut self, ticket: Ticket, error: &ApiError) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.state = SubmitState::Failed;
        match error {
            ApiError::Validation(errors) => self.field_errors = errors.clone(),
            other => self.banner = Some(Banner::error(other.user_message())),
        }
        true
    }

    pub fn complete(&mut self, ticket: Ticket, result: Result<T, ApiError>) -> bool {
        match result {
            Ok(output) => self.succeed(ticket, output, None),
            Err(e) => self.fail(ticket, &e),
        }
    }

    /// 放弃进行中的提交（页面卸载），之后到达的结果都会被忽略
    pub fn abandon(&mut self) {
        self.generation += 1;
        if self.is_submitting() {
            self.state = SubmitState::Idle;
        }
    }

    pub fn dismiss_banner(&mut self) {
        self.banner = None;
    }
}
