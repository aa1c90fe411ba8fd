// TaskList - In-memory to-do list with tab/search filtering

pub mod config;
pub mod error;
pub mod filter;
pub mod logging;
pub mod render;
pub mod shell;
pub mod store;
pub mod task;
pub mod view;

// Re-export main types for convenience
pub use config::{Config, Seed};
pub use error::StoreError;
pub use filter::{Filter, Tab, filter};
pub use store::{Change, Store, SubscriptionId};
pub use task::{Task, TaskId, demo_tasks, now_ms};
pub use view::{Row, ViewState};
