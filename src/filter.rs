// Query filtering for tasks

use crate::models::{Priority, Task};

/// Predicate applied to tasks when listing
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Exact priority match
    Priority(Priority),
    /// Case-insensitive substring of the title or the description
    Keyword(String),
}

impl Filter {
    pub fn keyword(keyword: &str) -> Self {
        Filter::Keyword(keyword.to_string())
    }

    pub fn matches(&self, task: &Task) -> bool {
        match self {
            Filter::Priority(p) => task.priority() == *p,
            Filter::Keyword(keyword) => {
                let needle = keyword.to_lowercase();
                task.title().to_lowercase().contains(&needle)
                    || task.description().to_lowercase().contains(&needle)
            }
        }
    }
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Filter::Priority(p) => write!(f, "priority = {}", p),
            Filter::Keyword(k) => write!(f, "keyword ~ {:?}", k),
        }
    }
}
