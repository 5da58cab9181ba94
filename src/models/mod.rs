pub mod datetime;
pub mod session;
pub mod task;
pub mod user;

pub use session::Session;
pub use task::{NewTask, StatusUpdate, Task, TaskFilter, TaskListQuery, TaskPatch};
pub use user::{Role, User};
