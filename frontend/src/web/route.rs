//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由，以及根据会话决定是否放行的守卫。

use crate::access::{Area, Capabilities, Operation};
use hrms_shared::{Id, Session};
use log::debug;
use std::fmt::Display;

/// 资源区域内的子路由
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceRoute {
    /// `/resource`
    List,
    /// `/resource/new`
    New,
    /// `/resource/:id`
    View(Id),
    /// `/resource/:id/edit`
    Edit(Id),
}

impl ResourceRoute {
    pub fn operation(&self) -> Operation {
        match *self {
            ResourceRoute::List => Operation::List,
            ResourceRoute::New => Operation::Create,
            ResourceRoute::View(id) => Operation::View(id),
            ResourceRoute::Edit(id) => Operation::Edit(id),
        }
    }
}

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 登录页面
    Login,
    ChangePassword,
    /// 首次登录强制设置密码
    SetInitialPassword,
    /// 控制面板（`/` 与 `/dashboard`）
    #[default]
    Dashboard,
    /// 八个资源区域
    Resource(Area, ResourceRoute),
    Notifications,
    Profile,
    CheckInOut,
    /// 页面未找到
    NotFound,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    ///
    /// 忽略查询串、片段与末尾斜杠；非数字的 id 视为未找到。
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] | ["dashboard"] => Self::Dashboard,
            ["login"] => Self::Login,
            ["change-password"] => Self::ChangePassword,
            ["set-initial-password"] => Self::SetInitialPassword,
            ["notifications"] => Self::Notifications,
            ["profile"] => Self::Profile,
            ["checkin-checkout"] => Self::CheckInOut,
            [area, rest @ ..] => match Area::from_segment(area) {
                Some(area) => Self::resource_from(area, rest),
                None => Self::NotFound,
            },
        }
    }

    fn resource_from(area: Area, rest: &[&str]) -> Self {
        let sub = match rest {
            [] => Some(ResourceRoute::List),
            ["new"] => Some(ResourceRoute::New),
            [id] => parse_id(id).map(ResourceRoute::View),
            [id, "edit"] => parse_id(id).map(ResourceRoute::Edit),
            _ => None,
        };
        sub.map_or(Self::NotFound, |sub| Self::Resource(area, sub))
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> String {
        match self {
            Self::Login => "/login".to_string(),
            Self::ChangePassword => "/change-password".to_string(),
            Self::SetInitialPassword => "/set-initial-password".to_string(),
            Self::Dashboard => "/dashboard".to_string(),
            Self::Resource(area, sub) => {
                let base = area.segment();
                match sub {
                    ResourceRoute::List => format!("/{}", base),
                    ResourceRoute::New => format!("/{}/new", base),
                    ResourceRoute::View(id) => format!("/{}/{}", base, id),
                    ResourceRoute::Edit(id) => format!("/{}/{}/edit", base, id),
                }
            }
            Self::Notifications => "/notifications".to_string(),
            Self::Profile => "/profile".to_string(),
            Self::CheckInOut => "/checkin-checkout".to_string(),
            Self::NotFound => "/404".to_string(),
        }
    }

    pub fn list(area: Area) -> Self {
        Self::Resource(area, ResourceRoute::List)
    }

    /// **核心守卫逻辑：定义该路由是否需要认证**
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Self::Login | Self::NotFound)
    }

    /// 定义已认证用户是否应该离开此路由（如登录页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login)
    }

    /// 页面标题
    pub fn title(&self) -> &'static str {
        match self {
            Self::Login => "Sign in",
            Self::ChangePassword => "Change password",
            Self::SetInitialPassword => "Set your password",
            Self::Dashboard => "Dashboard",
            Self::Resource(area, _) => area.label(),
            Self::Notifications => "Notifications",
            Self::Profile => "My profile",
            Self::CheckInOut => "Check in / out",
            Self::NotFound => "Page not found",
        }
    }
}

fn parse_id(segment: &str) -> Option<Id> {
    segment.parse::<Id>().ok().filter(|id| *id > 0)
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

// =========================================================
// 守卫
// =========================================================

/// 守卫结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(AppRoute),
}

/// 根据当前会话决定是否放行
///
/// 每次导航、popstate 与会话变化时都重新计算，结果不缓存。
pub fn guard(route: AppRoute, session: Option<&Session>) -> GuardDecision {
    let Some(session) = session else {
        return if route.requires_auth() {
            debug!("[Guard] {} requires a session", route);
            GuardDecision::Redirect(AppRoute::Login)
        } else {
            GuardDecision::Allow
        };
    };

    if session.must_change_password() {
        return match route {
            AppRoute::SetInitialPassword | AppRoute::NotFound => GuardDecision::Allow,
            _ => GuardDecision::Redirect(AppRoute::SetInitialPassword),
        };
    }

    if route.should_redirect_when_authenticated() || route == AppRoute::SetInitialPassword {
        return GuardDecision::Redirect(AppRoute::Dashboard);
    }

    if let AppRoute::Resource(area, sub) = route {
        let caps = Capabilities::for_session(Some(session));
        if !caps.can_open(area, sub.operation()) {
            debug!("[Guard] {} not allowed for {}", route, session.role());
            return GuardDecision::Redirect(AppRoute::Dashboard);
        }
    }

    GuardDecision::Allow
}

#[cfg(test)]
mod tests {
    use super::*;
    use hrms_shared::{Role, SessionUser};

    fn session(role: Role, must_change_password: bool) -> Session {
        Session {
            token: "t".to_string(),
            user: SessionUser {
                employee_id: 7,
                email: "emre@example.com".to_string(),
                first_name: "Emre".to_string(),
                last_name: "Demir".to_string(),
                role,
                must_change_password,
            },
        }
    }

    #[test]
    fn test_parse_routes() {
        assert_eq!(AppRoute::from_path("/"), AppRoute::Dashboard);
        assert_eq!(AppRoute::from_path("/login"), AppRoute::Login);
        assert_eq!(AppRoute::from_path("/dashboard/"), AppRoute::Dashboard);
        assert_eq!(AppRoute::from_path("/checkin-checkout"), AppRoute::CheckInOut);
        assert_eq!(
            AppRoute::from_path("/employees?page=2"),
            AppRoute::list(Area::Employees)
        );
        assert_eq!(
            AppRoute::from_path("/departments/new"),
            AppRoute::Resource(Area::Departments, ResourceRoute::New)
        );
        assert_eq!(
            AppRoute::from_path("/leaves/12"),
            AppRoute::Resource(Area::Leaves, ResourceRoute::View(12))
        );
        assert_eq!(
            AppRoute::from_path("/performance/5/edit"),
            AppRoute::Resource(Area::Performance, ResourceRoute::Edit(5))
        );
    }

    #[test]
    fn test_unknown_paths_are_not_found() {
        for path in ["/payroll", "/employees/abc", "/employees/0", "/leaves/3/approve", "/login/x"] {
            assert_eq!(AppRoute::from_path(path), AppRoute::NotFound, "{}", path);
        }
    }

    #[test]
    fn test_paths_round_trip() {
        let routes = [
            AppRoute::Login,
            AppRoute::ChangePassword,
            AppRoute::SetInitialPassword,
            AppRoute::Dashboard,
            AppRoute::Notifications,
            AppRoute::Profile,
            AppRoute::CheckInOut,
            AppRoute::Resource(Area::Salaries, ResourceRoute::Edit(44)),
            AppRoute::Resource(Area::Announcements, ResourceRoute::New),
        ];
        for route in routes {
            assert_eq!(AppRoute::from_path(&route.to_path()), route);
        }
    }

    #[test]
    fn test_protected_route_requires_session() {
        assert_eq!(
            guard(AppRoute::list(Area::Leaves), None),
            GuardDecision::Redirect(AppRoute::Login)
        );
        assert_eq!(guard(AppRoute::Login, None), GuardDecision::Allow);
        assert_eq!(guard(AppRoute::NotFound, None), GuardDecision::Allow);
    }

    #[test]
    fn test_login_redirects_when_signed_in() {
        let hr = session(Role::Hr, false);
        assert_eq!(
            guard(AppRoute::Login, Some(&hr)),
            GuardDecision::Redirect(AppRoute::Dashboard)
        );
    }

    #[test]
    fn test_must_change_password_forces_initial_password_page() {
        let flagged = session(Role::Employee, true);
        assert_eq!(
            guard(AppRoute::Dashboard, Some(&flagged)),
            GuardDecision::Redirect(AppRoute::SetInitialPassword)
        );
        assert_eq!(
            guard(AppRoute::Login, Some(&flagged)),
            GuardDecision::Redirect(AppRoute::SetInitialPassword)
        );
        assert_eq!(
            guard(AppRoute::SetInitialPassword, Some(&flagged)),
            GuardDecision::Allow
        );

        let normal = session(Role::Employee, false);
        assert_eq!(
            guard(AppRoute::SetInitialPassword, Some(&normal)),
            GuardDecision::Redirect(AppRoute::Dashboard)
        );
    }

    #[test]
    fn test_employee_cannot_open_department_form() {
        let employee = session(Role::Employee, false);
        let route = AppRoute::from_path("/departments/new");
        assert_eq!(
            guard(route, Some(&employee)),
            GuardDecision::Redirect(AppRoute::Dashboard)
        );
        assert_eq!(
            guard(AppRoute::list(Area::Departments), Some(&employee)),
            GuardDecision::Allow
        );
    }

    #[test]
    fn test_role_gated_areas() {
        let employee = session(Role::Employee, false);
        assert_eq!(
            guard(AppRoute::list(Area::Salaries), Some(&employee)),
            GuardDecision::Redirect(AppRoute::Dashboard)
        );
        // 自己的员工记录可以打开
        assert_eq!(
            guard(
                AppRoute::Resource(Area::Employees, ResourceRoute::View(7)),
                Some(&employee)
            ),
            GuardDecision::Allow
        );
        assert_eq!(
            guard(AppRoute::from_path("/leaves/new"), Some(&employee)),
            GuardDecision::Allow
        );

        let manager = session(Role::Manager, false);
        assert_eq!(
            guard(AppRoute::from_path("/performance/new"), Some(&manager)),
            GuardDecision::Allow
        );
        assert_eq!(
            guard(AppRoute::from_path("/employees/3/edit"), Some(&manager)),
            GuardDecision::Redirect(AppRoute::Dashboard)
        );
    }
}
