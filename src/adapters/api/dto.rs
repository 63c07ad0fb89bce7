use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Todo, TodoDraft, TodoId, TodoUpdate, User, UserId, DEFAULT_CATEGORY};

// DTOs for API communication. The service has shipped both snake_case and
// camelCase timestamp spellings; aliases accept either.
#[derive(Debug, Deserialize)]
pub struct TodoDto {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, alias = "createdAt")]
    pub created_at: Option<String>,
    #[serde(default, alias = "updatedAt", alias = "completedAt")]
    pub updated_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UserDto {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginResponseDto {
    pub token: String,
    // Some deployments return the user inline, some expect a follow-up
    // call to /auth/me.
    #[serde(default)]
    pub user: Option<UserDto>,
}

/// Error payload the service uses for non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct ErrorBodyDto {
    #[serde(default)]
    pub error: Option<String>,
}

// Request DTOs
#[derive(Debug, Serialize)]
pub struct TodoCreateDto {
    pub title: String,
    pub completed: bool,
    pub category: String,
}

#[derive(Debug, Serialize)]
pub struct TodoUpdateDto {
    pub title: String,
    pub completed: bool,
    pub category: String,
}

#[derive(Debug, Serialize)]
pub struct LoginRequestDto {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SignupRequestDto {
    pub username: String,
    pub email: String,
    pub password: String,
}

// Conversion implementations
impl From<TodoDto> for Todo {
    fn from(dto: TodoDto) -> Self {
        Self {
            id: TodoId(dto.id),
            title: dto.title,
            completed: dto.completed,
            category: dto
                .category
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            created_at: dto
                .created_at
                .as_deref()
                .and_then(parse_timestamp)
                .unwrap_or_else(Utc::now),
            updated_at: dto.updated_at.as_deref().and_then(parse_timestamp),
        }
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}

impl From<UserDto> for User {
    fn from(dto: UserDto) -> Self {
        Self {
            id: UserId(dto.id),
            username: dto.username,
            email: dto.email,
        }
    }
}

impl From<&TodoDraft> for TodoCreateDto {
    fn from(draft: &TodoDraft) -> Self {
        Self {
            title: draft.title.clone(),
            completed: false,
            category: if draft.category.is_empty() {
                DEFAULT_CATEGORY.to_string()
            } else {
                draft.category.clone()
            },
        }
    }
}

impl From<&TodoUpdate> for TodoUpdateDto {
    fn from(update: &TodoUpdate) -> Self {
        Self {
            title: update.title.clone(),
            completed: update.completed,
            category: update.category.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_snake_case_timestamps() {
        let dto: TodoDto = serde_json::from_str(
            r#"{"id":1,"title":"Buy milk","completed":false,
                "created_at":"2026-01-05T10:00:00Z","updated_at":"2026-01-06T11:30:00Z"}"#,
        )
        .unwrap();

        let todo = Todo::from(dto);
        assert_eq!(todo.id, TodoId(1));
        assert_eq!(todo.category, DEFAULT_CATEGORY);
        assert_eq!(todo.created_at.to_rfc3339(), "2026-01-05T10:00:00+00:00");
        assert!(todo.updated_at.is_some());
    }

    #[test]
    fn decodes_camel_case_timestamps() {
        let dto: TodoDto = serde_json::from_str(
            r#"{"id":2,"title":"Call mum","completed":true,"category":"Home",
                "createdAt":"2026-01-05T10:00:00Z","completedAt":"2026-01-07T09:00:00Z"}"#,
        )
        .unwrap();

        let todo = Todo::from(dto);
        assert_eq!(todo.category, "Home");
        assert!(todo.completed);
        assert!(todo.updated_at.is_some());
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let dto: TodoDto = serde_json::from_str(r#"{"id":3,"title":"Bare"}"#).unwrap();

        let todo = Todo::from(dto);
        assert!(!todo.completed);
        assert_eq!(todo.category, DEFAULT_CATEGORY);
        assert!(todo.updated_at.is_none());
    }
}
