//! Transport-agnostic HTTP surface.
//!
//! Handlers accept deserialised request bodies and path segments and return
//! an [`ApiResponse`] carrying a status code and JSON body. Binding them to
//! a concrete router is left to the host.
//!
//! | Route | Handler |
//! |---|---|
//! | `POST /ai/breakdown` | [`TaskApi::breakdown`] |
//! | `GET /tasks` | [`TaskApi::list_tasks`] |
//! | `POST /tasks` | [`TaskApi::create_task`] |
//! | `GET /tasks/:id` | [`TaskApi::get_task`] |
//! | `PUT /tasks/:id` | [`TaskApi::update_task`] |
//! | `DELETE /tasks/:id` | [`TaskApi::delete_task`] |
//! | `POST /tasks/:id/subtasks` | [`TaskApi::add_subtasks`] |
//! | `POST /tasks/:id/breakdown` | [`TaskApi::generate_breakdown`] |
//! | `PUT /tasks/:id/reorder` | [`TaskApi::reorder`] |
//! | `PUT /subtasks/:id` | [`TaskApi::update_subtask`] |
//! | `DELETE /subtasks/:id` | [`TaskApi::delete_subtask`] |
//! | `GET /health` | [`health`] |

mod bodies;
mod error;
mod handlers;

pub use bodies::{
    BreakdownBody, CreateSubtasksBody, CreateTaskBody, ReorderBody, SubtaskBody,
    UpdateSubtaskBody, UpdateTaskBody,
};
pub use error::{ApiError, ApiResponse, ApiResult};
pub use handlers::{SERVICE_NAME, TaskApi, health};
