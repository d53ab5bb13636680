//! Calendar tasks: the domain model and where tasks come from.

pub mod mock_source;
pub mod model;
pub mod source;

pub use mock_source::MockTaskSource;
pub use model::{Priority, ReminderSettings, Task, TaskCreator, TaskKind};
pub use source::{HttpTaskSource, TaskSource, TaskWindow};
