// CSV row contract for exportable records

use crate::models::{DATE_FORMAT, Task};

/// Core trait that any exportable record must implement
pub trait CsvRecord {
    /// Column names, written once as the header line
    const HEADER: &'static [&'static str];

    /// Raw (unescaped) field values, one per header column
    fn fields(&self) -> Vec<String>;
}

impl CsvRecord for Task {
    const HEADER: &'static [&'static str] = &[
        "ID",
        "Title",
        "Description",
        "Due Date",
        "Priority",
        "Status",
        "Created Date",
    ];

    fn fields(&self) -> Vec<String> {
        vec![
            self.id().to_string(),
            self.title().to_string(),
            self.description().to_string(),
            self.due_date().format(DATE_FORMAT).to_string(),
            self.priority().label().to_string(),
            self.status_label().to_string(),
            self.created_date().format(DATE_FORMAT).to_string(),
        ]
    }
}
