//! 认证模块
//!
//! 把 `SessionStore` 桥接到 Leptos：会话通过信号向组件广播，
//! 路由服务通过注入的会话信号执行守卫。
//! 组件只通过这里的 `login` / `logout` / 改密操作修改会话，不直接访问存储。

use crate::access::Capabilities;
use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::services::Services;
use crate::session::{KeyValueStore, MemoryStore, SessionError, SessionStore};
use crate::web::{BrowserStorage, BrowserTransport};
use hrms_shared::validation::validate_form;
use hrms_shared::{ChangePasswordRequest, Session, SetInitialPasswordRequest};
use leptos::prelude::*;
use log::{info, warn};
use std::rc::Rc;

/// 认证上下文
///
/// 包含会话信号与服务句柄，通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct AuthContext {
    /// 当前会话（只读）
    pub session: ReadSignal<Option<Session>>,
    store: StoredValue<SessionStore, LocalStorage>,
    services: StoredValue<Services, LocalStorage>,
    config: StoredValue<AppConfig>,
}

impl AuthContext {
    /// 创建认证上下文并从 LocalStorage 恢复会话
    pub fn new(config: AppConfig) -> Self {
        let storage: Rc<dyn KeyValueStore> = match BrowserStorage::open() {
            Some(storage) => Rc::new(storage),
            None => {
                warn!("[Auth] LocalStorage unavailable, session will not survive a reload");
                Rc::new(MemoryStore::new())
            }
        };

        let store = SessionStore::restore(storage);
        let client = ApiClient::new(
            Rc::new(BrowserTransport::new()),
            &config.api_base_url,
            store.clone(),
        );

        let (session, set_session) = signal(store.current());
        store.subscribe(move |current| set_session.set(current.cloned()));

        Self {
            session,
            store: StoredValue::new_local(store),
            services: StoredValue::new_local(Services::new(client)),
            config: StoredValue::new(config),
        }
    }

    /// 获取会话信号（用于路由服务注入）
    pub fn session_signal(&self) -> Signal<Option<Session>> {
        self.session.into()
    }

    /// 当前会话的权限（响应式）
    pub fn capabilities(&self) -> Capabilities {
        self.session.with(|s| Capabilities::for_session(s.as_ref()))
    }

    /// 在事件回调 / 异步任务中使用
    pub fn capabilities_untracked(&self) -> Capabilities {
        self.session
            .with_untracked(|s| Capabilities::for_session(s.as_ref()))
    }

    pub fn services(&self) -> Services {
        self.services.get_value()
    }

    pub fn config(&self) -> AppConfig {
        self.config.get_value()
    }

    /// 登录
    pub async fn login(&self, email: String, password: String) -> Result<Session, SessionError> {
        let store = self.store.get_value();
        let services = self.services();
        store.login(&services.auth, &email, &password).await
    }

    /// 注销并清除状态
    ///
    /// 导航将由路由服务的会话监听自动处理。
    pub async fn logout(&self) {
        let store = self.store.get_value();
        let services = self.services();
        store.logout(&services.auth).await;
    }

    /// 修改密码
    pub async fn change_password(&self, request: ChangePasswordRequest) -> Result<(), SessionError> {
        validate_form(&request).map_err(SessionError::Invalid)?;
        self.services()
            .auth
            .change_password(&request)
            .await?
            .into_unit()
            .map_err(SessionError::Rejected)?;

        info!("[Auth] Password changed");
        self.store.with_value(|store| store.complete_password_change());
        Ok(())
    }

    /// 首次登录设置密码，成功后守卫放行其余页面
    pub async fn set_initial_password(
        &self,
        request: SetInitialPasswordRequest,
    ) -> Result<(), SessionError> {
        validate_form(&request).map_err(SessionError::Invalid)?;
        self.services()
            .auth
            .set_initial_password(&request)
            .await?
            .into_unit()
            .map_err(SessionError::Rejected)?;

        info!("[Auth] Initial password set");
        self.store.with_value(|store| store.complete_password_change());
        Ok(())
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}
