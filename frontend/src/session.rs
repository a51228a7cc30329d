//! 会话模块
//!
//! `SessionStore` 是唯一可以读写持久化会话（`token` / `user` 两个键）的组件，
//! 所有视图只能通过它的 `login` / `logout` 修改会话。
//!
//! 与 UI 框架解耦：会话变化通过 `subscribe` 注册的监听器向外广播，
//! `auth` 模块再把它桥接到 Leptos 信号。

use crate::error::{ApiError, ApiResult};
use async_trait::async_trait;
use hrms_shared::validation::{FieldErrors, validate_form};
use hrms_shared::{
    ApiResponse, LoginRequest, LoginResponse, STORAGE_TOKEN_KEY, STORAGE_USER_KEY, Session,
    SessionUser,
};
use log::{info, warn};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use thiserror::Error;


// =========================================================
// 存储抽象
// =========================================================

/// 键值存储（浏览器中为 LocalStorage）
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> bool;
    fn delete(&self, key: &str) -> bool;
}

/// 内存键值存储
///
/// 浏览器存储不可用（例如隐私模式禁用 LocalStorage）时作为降级方案，
/// 也用于测试。
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> bool {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        true
    }

    fn delete(&self, key: &str) -> bool {
        self.entries.borrow_mut().remove(key);
        true
    }
}

// =========================================================
// 认证协作者
// =========================================================

/// 外部认证服务
#[async_trait(?Send)]
pub trait Authenticator {
    async fn authenticate(&self, request: &LoginRequest) -> ApiResult<ApiResponse<LoginResponse>>;

    /// 通知后端注销；`token` 由调用方显式传入，因为本地会话此时已清除
    async fn sign_out(&self, token: &str) -> ApiResult<()>;
}

#[derive(Debug, Error)]
pub enum SessionError {
    /// 本地校验失败，未发出请求
    #[error("{0}")]
    Invalid(FieldErrors),

    /// 后端拒绝（原样透传后端消息）
    #[error("{0}")]
    Rejected(String),

    #[error(transparent)]
    Api(#[from] ApiError),
}

// =========================================================
// SessionStore
// =========================================================

type Listener = Rc<dyn Fn(Option<&Session>)>;

struct SessionInner {
    storage: Rc<dyn KeyValueStore>,
    current: RefCell<Option<Session>>,
    listeners: RefCell<Vec<Listener>>,
}

/// 会话存储
///
/// 克隆开销很小，所有克隆共享同一份状态。
#[derive(Clone)]
pub struct SessionStore {
    inner: Rc<SessionInner>,
}

impl SessionStore {
    /// 从持久化存储恢复会话
    ///
    /// 数据损坏（只有一个键、token 为空、`user` 无法解析）时清除两个键，
    /// 并以未登录状态启动。
    pub fn restore(storage: Rc<dyn KeyValueStore>) -> Self {
        let current = load_persisted(storage.as_ref());
        match &current {
            Some(session) => info!(
                "[Session] Restored session for {} ({})",
                session.user.email, session.user.role
            ),
            None => info!("[Session] No stored session"),
        }

        Self {
            inner: Rc::new(SessionInner {
                storage,
                current: RefCell::new(current),
                listeners: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn current(&self) -> Option<Session> {
        self.inner.current.borrow().clone()
    }

    pub fn token(&self) -> Option<String> {
        self.inner
            .current
            .borrow()
            .as_ref()
            .map(|s| s.token.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.current.borrow().is_some()
    }

    /// 注册会话变化监听器
    pub fn subscribe(&self, listener: impl Fn(Option<&Session>) + 'static) {
        self.inner.listeners.borrow_mut().push(Rc::new(listener));
    }

    /// 登录
    ///
    /// 成功时同时写入 `token` 与 `user`；后端拒绝时原样返回其消息。
    pub async fn login<A>(
        &self,
        auth: &A,
        email: &str,
        password: &str,
    ) -> Result<Session, SessionError>
    where
        A: Authenticator + ?Sized,
    {
        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        validate_form(&request).map_err(SessionError::Invalid)?;

        let envelope = auth.authenticate(&request).await?;
        let response = envelope.into_result().map_err(|message| {
            info!("[Session] Login rejected for {}", request.email);
            SessionError::Rejected(message)
        })?;

        let session = Session::from(response);
        self.persist(&session);
        self.replace(Some(session.clone()));
        info!(
            "[Session] Logged in as {} ({})",
            session.user.email, session.user.role
        );
        Ok(session)
    }

    /// 注销
    ///
    /// 本地会话同步清除，随后尽力通知后端；通知失败只记录日志。
    /// 未登录时调用不会出错。
    pub async fn logout<A>(&self, auth: &A)
    where
        A: Authenticator + ?Sized,
    {
        let Some(previous) = self.clear_local() else {
            return;
        };
        info!("[Session] Logged out {}", previous.user.email);

        if let Err(e) = auth.sign_out(&previous.token).await {
            warn!("[Session] Backend logout failed (ignored): {}", e);
        }
    }

    /// 仅清除本地会话（token 失效时由 API 客户端调用）
    pub fn expire(&self) {
        if let Some(previous) = self.clear_local() {
            warn!(
                "[Session] Token rejected by server, session for {} cleared",
                previous.user.email
            );
        }
    }

    /// 首次设置密码 / 修改密码成功后清除强制改密标记
    pub fn complete_password_change(&self) {
        let updated = {
            let mut current = self.inner.current.borrow_mut();
            match current.as_mut() {
                Some(session) if session.user.must_change_password => {
                    session.user.must_change_password = false;
                    Some(session.clone())
                }
                _ => None,
            }
        };

        if let Some(session) = updated {
            self.persist(&session);
            self.notify();
        }
    }

    fn persist(&self, session: &Session) {
        let storage = &self.inner.storage;
        match serde_json::to_string(&session.user) {
            Ok(user_json) => {
                let ok = storage.set(STORAGE_USER_KEY, &user_json)
                    && storage.set(STORAGE_TOKEN_KEY, &session.token);
                if !ok {
                    // 两个键要么同时存在要么都不存在
                    clear_persisted(storage.as_ref());
                    warn!("[Session] Could not persist session, it will not survive a reload");
                }
            }
            Err(e) => warn!("[Session] Could not encode session: {}", e),
        }
    }

    fn clear_local(&self) -> Option<Session> {
        clear_persisted(self.inner.storage.as_ref());
        let previous = self.inner.current.borrow_mut().take();
        if previous.is_some() {
            self.notify();
        }
        previous
    }

    fn replace(&self, session: Option<Session>) {
        *self.inner.current.borrow_mut() = session;
        self.notify();
    }

    fn notify(&self) {
        // 先复制监听器列表，允许回调中再次访问 store
        let listeners = self.inner.listeners.borrow().clone();
        let current = self.current();
        for listener in listeners {
            listener(current.as_ref());
        }
    }
}

fn load_persisted(storage: &dyn KeyValueStore) -> Option<Session> {
    let token = storage.get(STORAGE_TOKEN_KEY);
    let user = storage.get(STORAGE_USER_KEY);

    let result = match (token, user) {
        (None, None) => return None,
        (Some(token), Some(user_json)) => parse_session(token, &user_json),
        _ => Err("only one of token/user is present".to_string()),
    };

    match result {
        Ok(session) => Some(session),
        Err(reason) => {
            warn!("[Session] Discarding stored session: {}", reason);
            clear_persisted(storage);
            None
        }
    }
}

fn parse_session(token: String, user_json: &str) -> Result<Session, String> {
    if token.trim().is_empty() || token.chars().any(char::is_whitespace) {
        return Err("token is malformed".to_string());
    }
    let user: SessionUser =
        serde_json::from_str(user_json).map_err(|e| format!("user is unreadable: {}", e))?;
    Ok(Session { token, user })
}

fn clear_persisted(storage: &dyn KeyValueStore) {
    storage.delete(STORAGE_TOKEN_KEY);
    storage.delete(STORAGE_USER_KEY);
}
