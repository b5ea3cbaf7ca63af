// TaskTrack - In-memory personal task tracking with CSV export

pub mod config;
pub mod console;
pub mod error;
pub mod export;
pub mod filter;
pub mod models;
pub mod record;
pub mod store;

// Re-export main types for convenience
pub use config::Config;
pub use console::Console;
pub use error::{Result, TaskError};
pub use export::{CsvExporter, ExportOutcome, export_file_name};
pub use filter::Filter;
pub use models::{DATE_FORMAT, DueDate, Priority, Task, TaskId, parse_due_date, today};
pub use record::CsvRecord;
pub use store::{Statistics, TaskStore};
