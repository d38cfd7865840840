//! Task Layer
//!
//! Service and controller that map console actions onto store operations.
//!
//! The controller validates input, the service turns it into `create`,
//! `read`, `update`, `delete` and `list` calls on a [`SharedStore`].
//!
//! [`SharedStore`]: crate::store::SharedStore

pub mod controller;
pub mod service;
pub mod validation;

pub use controller::TaskController;
pub use service::{TaskService, TaskStore};
