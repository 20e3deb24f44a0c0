//! Application services for task management.

mod management;

pub use management::{
    CreateTaskRequest, TaskDetail, TaskService, TaskServiceError, TaskServiceResult,
};
