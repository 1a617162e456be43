//! Plain data shapes shared with clients — images, tasks, preferences.

pub mod images;
pub mod preferences;
pub mod tasks;

pub use images::ImageAttachment;
pub use preferences::AssistantPreferences;
pub use tasks::{Task, TaskPriority, TaskStatus};
