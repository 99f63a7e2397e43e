//! 资料编辑的变更检测
//!
//! 保存按钮只在可编辑字段与上次持久化的快照不同时可用。
//! 用户名是不可变标识，既不参与比较也不会出现在更新负载里。

use sentimeter_shared::{UpdateProfileRequest, UserProfile};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    Username,
    Name,
    Email,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileEditor {
    snapshot: UserProfile,
    draft: UserProfile,
}

impl ProfileEditor {
    pub fn new(profile: UserProfile) -> Self {
        Self {
            draft: profile.clone(),
            snapshot: profile,
        }
    }

    pub fn snapshot(&self) -> &UserProfile {
        &self.snapshot
    }

    pub fn draft(&self) -> &UserProfile {
        &self.draft
    }

    pub fn value(&self, field: ProfileField) -> &str {
        match field {
            ProfileField::Username => &self.draft.username,
            ProfileField::Name => &self.draft.name,
            ProfileField::Email => &self.draft.email,
        }
    }

    /// 修改草稿；用户名字段可以被聚焦但修改会被忽略
    pub fn set(&mut self, field: ProfileField, value: impl Into<String>) {
        match field {
            ProfileField::Username => {}
            ProfileField::Name => self.draft.name = value.into(),
            ProfileField::Email => self.draft.email = value.into(),
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.draft.name != self.snapshot.name || self.draft.email != self.snapshot.email
    }

    pub fn can_save(&self, submitting: bool) -> bool {
        !submitting && self.is_dirty()
    }

    /// 有改动时返回更新负载
    pub fn pending_update(&self) -> Option<UpdateProfileRequest> {
        self.is_dirty().then(|| UpdateProfileRequest {
            email: self.draft.email.clone(),
            name: self.draft.name.clone(),
        })
    }

    /// 保存成功后以服务端结果为新的快照
    pub fn commit(&mut self, saved: UserProfile) {
        let username = std::mem::take(&mut self.snapshot.username);
        self.snapshot = UserProfile { username, ..saved };
        self.draft = self.snapshot.clone();
    }

    pub fn revert(&mut self) {
        self.draft = self.snapshot.clone();
    }
}
