// Data models for TaskTrack

use chrono::{Local, NaiveDate};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;
use tracing::warn;

/// Textual date format used for input and display (DD-MM-YYYY)
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// Store-assigned task identifier, starting at 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(pub u32);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TaskId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// Task urgency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// All variants in display order
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    /// Convert a menu selector into a priority.
    ///
    /// 1 is HIGH, 2 is MEDIUM and 3 is LOW. Every other value maps to MEDIUM,
    /// so this never fails.
    pub fn from_selector(selector: i64) -> Self {
        match selector {
            1 => Priority::High,
            3 => Priority::Low,
            _ => Priority::Medium,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Priority::High => "HIGH",
            Priority::Medium => "MEDIUM",
            Priority::Low => "LOW",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A single trackable work item
///
/// Only the store constructs tasks and only `mark_complete` mutates them,
/// so everything apart from the completion flag is fixed at creation.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    id: TaskId,
    title: String,
    description: String,
    due_date: NaiveDate,
    created_date: NaiveDate,
    priority: Priority,
    completed: bool,
}

impl Task {
    pub(crate) fn new(
        id: TaskId,
        title: String,
        description: String,
        due_date: NaiveDate,
        priority: Priority,
        created_date: NaiveDate,
    ) -> Self {
        Self {
            id,
            title,
            description,
            due_date,
            created_date,
            priority,
            completed: false,
        }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn due_date(&self) -> NaiveDate {
        self.due_date
    }

    pub fn created_date(&self) -> NaiveDate {
        self.created_date
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Incomplete and due strictly before `today`
    pub fn is_overdue_on(&self, today: NaiveDate) -> bool {
        !self.completed && self.due_date < today
    }

    pub fn status_label(&self) -> &'static str {
        if self.completed { "COMPLETED" } else { "PENDING" }
    }

    // Completion is one-way; repeating it is a no-op
    pub(crate) fn mark_complete(&mut self) {
        self.completed = true;
    }
}

/// Outcome of parsing a due date typed by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueDate {
    /// The input matched DD-MM-YYYY
    Parsed(NaiveDate),
    /// The input was unusable and today's date was substituted
    Defaulted(NaiveDate),
}

impl DueDate {
    pub fn date(&self) -> NaiveDate {
        match self {
            DueDate::Parsed(d) | DueDate::Defaulted(d) => *d,
        }
    }

    pub fn is_defaulted(&self) -> bool {
        matches!(self, DueDate::Defaulted(_))
    }
}

/// Parse a DD-MM-YYYY due date, falling back to `today` on failure
///
/// Day and month must be two digits and the year four; chrono alone would
/// also take `1-1-2030` or a two-digit year.
pub fn parse_due_date(input: &str, today: NaiveDate) -> DueDate {
    let input = input.trim();
    if !has_date_shape(input) {
        warn!(input, "Due date is not DD-MM-YYYY, using today");
        return DueDate::Defaulted(today);
    }

    match NaiveDate::parse_from_str(input, DATE_FORMAT) {
        Ok(date) => DueDate::Parsed(date),
        Err(e) => {
            warn!(input, error = %e, "Invalid due date, using today");
            DueDate::Defaulted(today)
        }
    }
}

// DD-MM-YYYY, digits only apart from the two hyphens
fn has_date_shape(input: &str) -> bool {
    let bytes = input.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            2 | 5 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Today's calendar date in the local timezone
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
