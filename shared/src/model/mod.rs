//! 领域视图模型
//!
//! 这些类型只是后端 DTO 的客户端快照，持久化状态全部以后端为准。

mod announcement;
mod attendance;
mod auth;
mod employee;
mod leave;
mod organization;
mod performance;
mod salary;

pub use announcement::*;
pub use attendance::*;
pub use auth::*;
pub use employee::*;
pub use leave::*;
pub use organization::*;
pub use performance::*;
pub use salary::*;

/// 后端实体主键
pub type Id = i64;
