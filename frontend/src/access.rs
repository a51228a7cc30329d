//! 角色权限
//!
//! 所有按钮 / 菜单 / 路由的可见性都由当前会话即时推导，不单独存储。
//! 这里只决定界面上显示什么，真正的授权始终由后端执行。

use hrms_shared::{Id, Role, Session};

/// 业务区域
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Area {
    Employees,
    Departments,
    Positions,
    Leaves,
    Salaries,
    Performance,
    Attendance,
    Announcements,
}

impl Area {
    pub const ALL: [Area; 8] = [
        Area::Employees,
        Area::Departments,
        Area::Positions,
        Area::Leaves,
        Area::Salaries,
        Area::Performance,
        Area::Attendance,
        Area::Announcements,
    ];

    /// 路由中的第一段
    pub fn segment(&self) -> &'static str {
        match self {
            Area::Employees => "employees",
            Area::Departments => "departments",
            Area::Positions => "positions",
            Area::Leaves => "leaves",
            Area::Salaries => "salaries",
            Area::Performance => "performance",
            Area::Attendance => "attendance",
            Area::Announcements => "announcements",
        }
    }

    pub fn from_segment(segment: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.segment() == segment)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Area::Employees => "Employees",
            Area::Departments => "Departments",
            Area::Positions => "Positions",
            Area::Leaves => "Leave Requests",
            Area::Salaries => "Salaries",
            Area::Performance => "Performance",
            Area::Attendance => "Attendance",
            Area::Announcements => "Announcements",
        }
    }
}

/// 资源路由上的操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    View(Id),
    Create,
    Edit(Id),
}

/// 当前会话的能力集合
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    role: Option<Role>,
    employee_id: Option<Id>,
}

impl Capabilities {
    pub fn for_session(session: Option<&Session>) -> Self {
        Self {
            role: session.map(Session::role),
            employee_id: session.map(|s| s.user.employee_id),
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.role
    }

    pub fn is_signed_in(&self) -> bool {
        self.role.is_some()
    }

    pub fn is_hr(&self) -> bool {
        self.role == Some(Role::Hr)
    }

    pub fn is_hr_or_manager(&self) -> bool {
        matches!(self.role, Some(Role::Hr | Role::Manager))
    }

    fn owns(&self, owner: Option<Id>) -> bool {
        matches!((self.employee_id, owner), (Some(me), Some(owner)) if me == owner)
    }

    /// 列表页
    pub fn can_list(&self, area: Area) -> bool {
        match area {
            Area::Employees => self.is_hr_or_manager(),
            Area::Salaries => self.is_hr(),
            _ => self.is_signed_in(),
        }
    }

    /// 详情页；`owner` 为记录所属员工
    pub fn can_view(&self, area: Area, owner: Option<Id>) -> bool {
        match area {
            Area::Employees | Area::Salaries => self.can_list(area) || self.owns(owner),
            _ => self.can_list(area),
        }
    }

    pub fn can_create(&self, area: Area) -> bool {
        match area {
            Area::Leaves => self.is_signed_in(),
            Area::Performance => self.is_hr_or_manager(),
            _ => self.is_hr(),
        }
    }

    pub fn can_edit(&self, area: Area, owner: Option<Id>) -> bool {
        match area {
            Area::Leaves => self.is_hr() || self.owns(owner),
            Area::Performance => self.is_hr_or_manager(),
            _ => self.is_hr(),
        }
    }

    pub fn can_delete(&self, _area: Area) -> bool {
        self.is_hr()
    }

    /// 审批 / 拒绝请假：HR 或经理，且不能审批自己的申请
    pub fn can_decide_leave(&self, owner: Id) -> bool {
        self.is_hr_or_manager() && !self.owns(Some(owner))
    }

    /// 只有申请人本人可以撤销自己的请假
    pub fn can_cancel_leave(&self, owner: Id) -> bool {
        self.owns(Some(owner))
    }

    /// 路由级检查
    ///
    /// 记录归属在路由层未知时（工资详情、请假编辑），只要求已登录，
    /// 页面加载记录后再用 `can_view` / `can_edit` 精确判断。
    pub fn can_open(&self, area: Area, operation: Operation) -> bool {
        match (area, operation) {
            (_, Operation::List) => self.can_list(area),
            (Area::Employees, Operation::View(id)) => self.can_view(area, Some(id)),
            (Area::Salaries, Operation::View(_)) => self.is_signed_in(),
            (_, Operation::View(_)) => self.can_view(area, None),
            (_, Operation::Create) => self.can_create(area),
            (Area::Leaves, Operation::Edit(_)) => self.is_signed_in(),
            (_, Operation::Edit(_)) => self.can_edit(area, None),
        }
    }

    /// 导航菜单中显示的区域
    pub fn navigable_areas(&self) -> Vec<Area> {
        Area::ALL
            .into_iter()
            .filter(|a| self.can_list(*a))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hrms_shared::SessionUser;

    fn caps(role: Role, employee_id: Id) -> Capabilities {
        let session = Session {
            token: "t".to_string(),
            user: SessionUser {
                employee_id,
                email: "someone@example.com".to_string(),
                first_name: "Deniz".to_string(),
                last_name: "Kaya".to_string(),
                role,
                must_change_password: false,
            },
        };
        Capabilities::for_session(Some(&session))
    }

    #[test]
    fn test_hr_can_do_everything() {
        let hr = caps(Role::Hr, 1);
        for area in Area::ALL {
            assert!(hr.can_list(area));
            assert!(hr.can_create(area));
            assert!(hr.can_edit(area, Some(99)));
            assert!(hr.can_delete(area));
        }
        assert!(hr.can_decide_leave(2));
        assert!(!hr.can_decide_leave(1));
    }

    #[test]
    fn test_employee_is_read_only_on_reference_data() {
        let employee = caps(Role::Employee, 7);
        for area in [Area::Departments, Area::Positions, Area::Announcements] {
            assert!(employee.can_list(area));
            assert!(!employee.can_create(area));
            assert!(!employee.can_edit(area, Some(7)));
            assert!(!employee.can_delete(area));
        }
        assert!(!employee.can_open(Area::Departments, Operation::Create));
    }

    #[test]
    fn test_employee_records_visibility() {
        let employee = caps(Role::Employee, 7);
        assert!(!employee.can_list(Area::Employees));
        assert!(employee.can_view(Area::Employees, Some(7)));
        assert!(!employee.can_view(Area::Employees, Some(8)));
        assert!(employee.can_open(Area::Employees, Operation::View(7)));
        assert!(!employee.can_open(Area::Employees, Operation::View(8)));

        let manager = caps(Role::Manager, 3);
        assert!(manager.can_list(Area::Employees));
        assert!(!manager.can_create(Area::Employees));
    }

    #[test]
    fn test_salaries_are_hr_only_except_own() {
        let employee = caps(Role::Employee, 7);
        assert!(!employee.can_list(Area::Salaries));
        assert!(employee.can_view(Area::Salaries, Some(7)));
        assert!(!employee.can_view(Area::Salaries, Some(9)));
        assert!(!caps(Role::Manager, 3).can_list(Area::Salaries));
    }

    #[test]
    fn test_leave_rules() {
        let employee = caps(Role::Employee, 7);
        assert!(employee.can_create(Area::Leaves));
        assert!(employee.can_edit(Area::Leaves, Some(7)));
        assert!(!employee.can_edit(Area::Leaves, Some(8)));
        assert!(!employee.can_delete(Area::Leaves));
        assert!(!employee.can_decide_leave(8));
        assert!(employee.can_cancel_leave(7));
        assert!(!employee.can_cancel_leave(8));

        let manager = caps(Role::Manager, 3);
        assert!(manager.can_decide_leave(7));
        assert!(!manager.can_decide_leave(3));
    }

    #[test]
    fn test_performance_reviews_by_managers() {
        let manager = caps(Role::Manager, 3);
        assert!(manager.can_create(Area::Performance));
        assert!(manager.can_edit(Area::Performance, None));
        assert!(!manager.can_delete(Area::Performance));
        assert!(!caps(Role::Employee, 7).can_create(Area::Performance));
    }

    #[test]
    fn test_signed_out_sees_nothing() {
        let nobody = Capabilities::for_session(None);
        assert!(nobody.navigable_areas().is_empty());
        assert!(!nobody.can_create(Area::Leaves));
        assert!(!nobody.can_decide_leave(1));
    }

    #[test]
    fn test_navigation_by_role() {
        assert_eq!(caps(Role::Hr, 1).navigable_areas().len(), 8);
        let employee_nav = caps(Role::Employee, 7).navigable_areas();
        assert!(!employee_nav.contains(&Area::Employees));
        assert!(!employee_nav.contains(&Area::Salaries));
        assert!(employee_nav.contains(&Area::Leaves));
    }

    #[test]
    fn test_segments_round_trip() {
        for area in Area::ALL {
            assert_eq!(Area::from_segment(area.segment()), Some(area));
        }
        assert_eq!(Area::from_segment("payroll"), None);
    }
}
