use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TodoId(pub i64);

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for TodoId {
    fn from(id: i64) -> Self {
        TodoId(id)
    }
}

pub const DEFAULT_CATEGORY: &str = "General";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    pub completed: bool,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Todo {
    /// Business rule: display status with color
    pub fn status_display(&self) -> (&'static str, &'static str) {
        if self.completed {
            ("Done", "green")
        } else {
            ("Open", "gray")
        }
    }

    /// Format creation time for display
    pub fn created_display(&self) -> String {
        let days_diff = (Utc::now().date_naive() - self.created_at.date_naive()).num_days();

        match days_diff {
            0 => "Today".to_string(),
            1 => "Yesterday".to_string(),
            d if d <= 7 => format!("{d} days ago"),
            _ => self.created_at.format("%Y-%m-%d").to_string(),
        }
    }
}

/// A proposed new todo, before the remote store has assigned it an id.
#[derive(Debug, Clone, Default)]
pub struct TodoDraft {
    pub title: String,
    pub category: String,
}

impl TodoDraft {
    pub fn new(title: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            category: category.into(),
        }
    }
}

/// Full replacement payload for a todo. The remote store expects every
/// mutable field on update, so there are no optional fields here.
#[derive(Debug, Clone, PartialEq)]
pub struct TodoUpdate {
    pub title: String,
    pub completed: bool,
    pub category: String,
}

impl TodoUpdate {
    /// Seed an update from the current server state of a todo.
    pub fn from_todo(todo: &Todo) -> Self {
        Self {
            title: todo.title.clone(),
            completed: todo.completed,
            category: todo.category.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Completed,
    Pending,
}

impl StatusFilter {
    pub fn label(&self) -> &'static str {
        match self {
            StatusFilter::All => "All",
            StatusFilter::Completed => "Completed",
            StatusFilter::Pending => "Pending",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            StatusFilter::All => StatusFilter::Completed,
            StatusFilter::Completed => StatusFilter::Pending,
            StatusFilter::Pending => StatusFilter::All,
        }
    }

    pub fn accepts(&self, completed: bool) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Completed => completed,
            StatusFilter::Pending => !completed,
        }
    }
}

/// Ephemeral view criteria. Applied locally over the mirrored collection,
/// never sent to the server (remote search is a separate gateway call).
#[derive(Debug, Clone, Default)]
pub struct ViewFilter {
    pub search_term: String,
    pub status: StatusFilter,
}

impl ViewFilter {
    pub fn matches(&self, todo: &Todo) -> bool {
        if !self.status.accepts(todo.completed) {
            return false;
        }

        if self.search_term.is_empty() {
            return true;
        }

        todo.title
            .to_lowercase()
            .contains(&self.search_term.to_lowercase())
    }
}
