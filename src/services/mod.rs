//! Usecases. Handlers call these with an explicit [`Identity`](crate::auth::Identity)
//! where one is needed; services never read request state.

pub mod session;
pub mod task;
pub mod task_query;
pub mod user;

pub use session::SessionService;
pub use task::TaskService;
pub use user::UserService;
