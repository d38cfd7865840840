//! Record types kept in the store by the task console.

pub mod task;

pub use task::{short_id, Task, SHORT_ID_LEN};
