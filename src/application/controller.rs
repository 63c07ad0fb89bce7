use super::{AppError, TodoStore};
use crate::domain::{
    validate_title, StatusFilter, Todo, TodoDraft, TodoId, TodoUpdate, ViewFilter,
};
use std::sync::Arc;

/// One user-visible notification per terminal outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Warning(String),
    Error(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Notice::Success(m) | Notice::Warning(m) | Notice::Error(m) => m,
        }
    }
}

/// Lifecycle of an editable row as the user sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowState {
    Viewing,
    Editing,
    Saving,
    Deleting,
}

/// Unsaved edits for one row, seeded from the task when editing starts and
/// kept through failed saves so the user can retry.
#[derive(Debug, Clone)]
pub struct EditBuffer {
    pub id: TodoId,
    pub title: String,
    pub category: String,
}

/// Orchestrates user intents into validator + store calls and decides what
/// the surface should say about each outcome. Owns the ephemeral UI-session
/// state (view filter, form buffers, per-row lifecycle); never touches the
/// collection directly.
pub struct TodoController {
    store: Arc<TodoStore>,
    filter: ViewFilter,
    draft: TodoDraft,
    default_category: String,
    editing: Option<EditBuffer>,
    saving: Option<TodoId>,
    deleting: Option<TodoId>,
    pending_delete: Option<TodoId>,
    session_expired: bool,
}

impl TodoController {
    pub fn new(store: Arc<TodoStore>, default_category: String) -> Self {
        Self {
            store,
            filter: ViewFilter::default(),
            draft: TodoDraft::default(),
            default_category,
            editing: None,
            saving: None,
            deleting: None,
            pending_delete: None,
            session_expired: false,
        }
    }

    // --- derived views -----------------------------------------------------

    pub async fn visible(&self) -> Vec<Todo> {
        self.store.visible(&self.filter).await
    }

    pub fn row_state(&self, id: TodoId) -> RowState {
        if self.saving == Some(id) {
            RowState::Saving
        } else if self.deleting == Some(id) {
            RowState::Deleting
        } else if self.editing.as_ref().is_some_and(|e| e.id == id) {
            RowState::Editing
        } else {
            RowState::Viewing
        }
    }

    pub fn status_filter(&self) -> StatusFilter {
        self.filter.status
    }

    pub fn search_term(&self) -> &str {
        &self.filter.search_term
    }

    pub fn draft(&self) -> &TodoDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut TodoDraft {
        &mut self.draft
    }

    pub fn edit_buffer(&self) -> Option<&EditBuffer> {
        self.editing.as_ref()
    }

    pub fn edit_buffer_mut(&mut self) -> Option<&mut EditBuffer> {
        self.editing.as_mut()
    }

    pub fn pending_delete(&self) -> Option<TodoId> {
        self.pending_delete
    }

    /// Set once the service answers 401 on a todo operation; the surface is
    /// expected to route back to login and acknowledge.
    pub fn session_expired(&self) -> bool {
        self.session_expired
    }

    pub fn acknowledge_session_expired(&mut self) {
        self.session_expired = false;
    }

    // --- view criteria -----------------------------------------------------

    pub fn set_search_term(&mut self, term: String) {
        self.filter.search_term = term;
    }

    pub fn cycle_status_filter(&mut self) -> StatusFilter {
        self.filter.status = self.filter.status.next();
        self.filter.status
    }

    /// Remote search for the current term; an empty term reloads the full
    /// list instead. Success speaks through the updated list itself.
    pub async fn submit_search(&mut self) -> Option<Notice> {
        let term = self.filter.search_term.trim().to_string();

        let result = if term.is_empty() {
            self.store.reload().await
        } else {
            self.store.search(&term).await
        };

        match result {
            Ok(()) => None,
            Err(e) => Some(self.failure(&e, "Failed to load todos")),
        }
    }

    pub async fn refresh(&mut self) -> Option<Notice> {
        match self.store.reload().await {
            Ok(()) => None,
            Err(e) => Some(self.failure(&e, "Failed to load todos")),
        }
    }

    // --- mutations ---------------------------------------------------------

    /// Submit the new-todo form. Form fields are cleared only after the
    /// service accepts; any rejection leaves them for correction.
    pub async fn add_todo(&mut self) -> Notice {
        if let Err(e) = validate_title(&self.draft.title) {
            return Notice::Warning(e.to_string());
        }

        let draft = TodoDraft::new(
            self.draft.title.trim(),
            self.effective_category(&self.draft.category),
        );

        match self.store.create(&draft).await {
            Ok(_) => {
                self.draft = TodoDraft::default();
                Notice::Success("Todo added!".to_string())
            }
            Err(e) => self.failure(&e, "Failed to add todo"),
        }
    }

    pub fn start_edit(&mut self, todo: &Todo) {
        self.editing = Some(EditBuffer {
            id: todo.id,
            title: todo.title.clone(),
            category: todo.category.clone(),
        });
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Save the edit buffer. Validation rejections and network failures both
    /// return the row to Editing with the buffer intact for retry.
    pub async fn save_edit(&mut self) -> Notice {
        let Some(buffer) = self.editing.clone() else {
            return Notice::Warning("Nothing is being edited".to_string());
        };

        if let Err(e) = validate_title(&buffer.title) {
            return Notice::Warning(e.to_string());
        }

        let Some(current) = self.store.get(buffer.id).await else {
            self.editing = None;
            return Notice::Warning("Todo no longer exists".to_string());
        };

        // Completion state rides along unchanged; only title and category
        // come from the buffer.
        let mut update = TodoUpdate::from_todo(&current);
        update.title = buffer.title.trim().to_string();
        update.category = self.effective_category(&buffer.category);

        self.saving = Some(buffer.id);
        let result = self.store.update(buffer.id, &update).await;
        self.saving = None;

        match result {
            Ok(_) => {
                self.editing = None;
                Notice::Success("Todo updated!".to_string())
            }
            Err(e) => self.failure(&e, "Failed to update todo"),
        }
    }

    pub async fn toggle(&mut self, id: TodoId) -> Notice {
        self.saving = Some(id);
        let result = self.store.toggle(id).await;
        self.saving = None;

        match result {
            Ok(todo) => {
                if todo.completed {
                    Notice::Success("Todo completed!".to_string())
                } else {
                    Notice::Success("Todo reopened!".to_string())
                }
            }
            Err(e) => self.failure(&e, "Failed to toggle todo"),
        }
    }

    /// First phase of delete: park the id until the user answers the
    /// confirmation prompt. No network call happens here.
    pub fn request_delete(&mut self, id: TodoId) {
        self.pending_delete = Some(id);
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub async fn confirm_delete(&mut self) -> Notice {
        let Some(id) = self.pending_delete.take() else {
            return Notice::Warning("No delete pending".to_string());
        };

        self.deleting = Some(id);
        let result = self.store.remove(id).await;
        self.deleting = None;

        match result {
            Ok(()) => Notice::Success("Todo deleted!".to_string()),
            Err(e) => self.failure(&e, "Failed to delete todo"),
        }
    }

    // --- helpers -----------------------------------------------------------

    fn effective_category(&self, category: &str) -> String {
        let trimmed = category.trim();
        if trimmed.is_empty() {
            self.default_category.clone()
        } else {
            trimmed.to_string()
        }
    }

    fn failure(&mut self, error: &AppError, context: &str) -> Notice {
        if error.is_unauthorized() {
            self.session_expired = true;
            return Notice::Error("Session expired. Please login again.".to_string());
        }

        tracing::warn!("{context}: {error}");
        Notice::Error(format!("{context}: {error}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{GatewayError, GatewayResult, TodoGateway};
    use async_trait::async_trait;
    use chrono::Utc;
    use mockall::mock;
    use mockall::predicate::eq;

    mock! {
        pub Gateway {}

        #[async_trait]
        impl TodoGateway for Gateway {
            async fn list(&self) -> GatewayResult<Vec<Todo>>;
            async fn search(&self, term: &str) -> GatewayResult<Vec<Todo>>;
            async fn create(&self, draft: &TodoDraft) -> GatewayResult<Todo>;
            async fn update(&self, id: TodoId, update: &TodoUpdate) -> GatewayResult<Todo>;
            async fn toggle(&self, id: TodoId) -> GatewayResult<Todo>;
            async fn remove(&self, id: TodoId) -> GatewayResult<()>;
        }
    }

    fn make_todo(id: i64, title: &str, completed: bool) -> Todo {
        Todo {
            id: TodoId(id),
            title: title.to_string(),
            completed,
            category: "General".to_string(),
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    fn controller(gateway: MockGateway) -> TodoController {
        TodoController::new(
            Arc::new(TodoStore::new(Arc::new(gateway))),
            "General".to_string(),
        )
    }

    #[tokio::test]
    async fn validation_rejection_never_reaches_the_network() {
        // No create expectation: any call would panic the mock.
        let mut ctrl = controller(MockGateway::new());

        ctrl.draft_mut().title = "123".to_string();
        let notice = ctrl.add_todo().await;

        assert!(matches!(notice, Notice::Warning(_)));
        assert_eq!(ctrl.draft().title, "123", "form kept for correction");

        ctrl.draft_mut().title = "   ".to_string();
        assert!(matches!(ctrl.add_todo().await, Notice::Warning(_)));
    }

    #[tokio::test]
    async fn add_clears_the_form_only_on_success() {
        let mut gateway = MockGateway::new();
        gateway.expect_create().times(2).returning({
            let mut first = true;
            move |_| {
                if first {
                    first = false;
                    Err(GatewayError::Network("offline".into()))
                } else {
                    Ok(make_todo(1, "Buy milk", false))
                }
            }
        });

        let mut ctrl = controller(gateway);
        ctrl.draft_mut().title = "Buy milk".to_string();

        let notice = ctrl.add_todo().await;
        assert!(matches!(notice, Notice::Error(_)));
        assert_eq!(ctrl.draft().title, "Buy milk");

        let notice = ctrl.add_todo().await;
        assert_eq!(notice, Notice::Success("Todo added!".to_string()));
        assert!(ctrl.draft().title.is_empty());
        assert_eq!(ctrl.visible().await.len(), 1);
    }

    #[tokio::test]
    async fn failed_save_returns_to_editing_with_buffer_intact() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_list()
            .times(1)
            .return_once(|| Ok(vec![make_todo(1, "original", false)]));
        gateway
            .expect_update()
            .times(1)
            .return_once(|_, _| Err(GatewayError::Network("timed out".into())));

        let mut ctrl = controller(gateway);
        ctrl.refresh().await;

        let todo = ctrl.visible().await[0].clone();
        ctrl.start_edit(&todo);
        ctrl.edit_buffer_mut().unwrap().title = "edited but unsaved".to_string();

        let notice = ctrl.save_edit().await;

        assert!(matches!(notice, Notice::Error(_)));
        assert_eq!(ctrl.row_state(TodoId(1)), RowState::Editing);
        assert_eq!(ctrl.edit_buffer().unwrap().title, "edited but unsaved");
        assert_eq!(
            ctrl.visible().await[0].title,
            "original",
            "collection unchanged after failed update"
        );
    }

    #[tokio::test]
    async fn successful_save_exits_editing_and_applies_server_value() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_list()
            .times(1)
            .return_once(|| Ok(vec![make_todo(1, "original", false)]));
        gateway
            .expect_update()
            .times(1)
            .return_once(|_, _| Ok(make_todo(1, "renamed", false)));

        let mut ctrl = controller(gateway);
        ctrl.refresh().await;

        let todo = ctrl.visible().await[0].clone();
        ctrl.start_edit(&todo);
        ctrl.edit_buffer_mut().unwrap().title = "renamed".to_string();

        let notice = ctrl.save_edit().await;

        assert_eq!(notice, Notice::Success("Todo updated!".to_string()));
        assert_eq!(ctrl.row_state(TodoId(1)), RowState::Viewing);
        assert!(ctrl.edit_buffer().is_none());
        assert_eq!(ctrl.visible().await[0].title, "renamed");
    }

    #[tokio::test]
    async fn numeric_edit_is_rejected_without_a_network_call() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_list()
            .times(1)
            .return_once(|| Ok(vec![make_todo(1, "original", false)]));
        // No update expectation.

        let mut ctrl = controller(gateway);
        ctrl.refresh().await;

        let todo = ctrl.visible().await[0].clone();
        ctrl.start_edit(&todo);
        ctrl.edit_buffer_mut().unwrap().title = "4.5".to_string();

        let notice = ctrl.save_edit().await;

        assert!(matches!(notice, Notice::Warning(_)));
        assert_eq!(ctrl.row_state(TodoId(1)), RowState::Editing);
    }

    #[tokio::test]
    async fn delete_needs_an_affirmative_confirmation() {
        // Phase one only: no remove expectation, cancel must not call out.
        let mut ctrl = controller(MockGateway::new());

        ctrl.request_delete(TodoId(1));
        assert_eq!(ctrl.pending_delete(), Some(TodoId(1)));
        ctrl.cancel_delete();
        assert_eq!(ctrl.pending_delete(), None);

        let notice = ctrl.confirm_delete().await;
        assert!(matches!(notice, Notice::Warning(_)), "nothing was pending");
    }

    #[tokio::test]
    async fn confirmed_delete_removes_the_row() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_list()
            .times(1)
            .return_once(|| Ok(vec![make_todo(1, "doomed", false)]));
        gateway
            .expect_remove()
            .with(eq(TodoId(1)))
            .times(1)
            .return_once(|_| Ok(()));

        let mut ctrl = controller(gateway);
        ctrl.refresh().await;

        ctrl.request_delete(TodoId(1));
        let notice = ctrl.confirm_delete().await;

        assert_eq!(notice, Notice::Success("Todo deleted!".to_string()));
        assert!(ctrl.visible().await.is_empty());
    }

    #[tokio::test]
    async fn failed_delete_keeps_the_row() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_list()
            .times(1)
            .return_once(|| Ok(vec![make_todo(1, "survivor", false)]));
        gateway.expect_remove().times(1).return_once(|_| {
            Err(GatewayError::Http {
                status: 500,
                message: "boom".into(),
            })
        });

        let mut ctrl = controller(gateway);
        ctrl.refresh().await;

        ctrl.request_delete(TodoId(1));
        let notice = ctrl.confirm_delete().await;

        assert!(matches!(notice, Notice::Error(_)));
        assert_eq!(ctrl.visible().await.len(), 1);
        assert_eq!(ctrl.row_state(TodoId(1)), RowState::Viewing);
    }

    #[tokio::test]
    async fn unauthorized_response_flags_the_session() {
        let mut gateway = MockGateway::new();
        gateway.expect_toggle().times(1).return_once(|_| {
            Err(GatewayError::Http {
                status: 401,
                message: "unauthenticated".into(),
            })
        });

        let mut ctrl = controller(gateway);
        assert!(!ctrl.session_expired());

        let notice = ctrl.toggle(TodoId(1)).await;

        assert!(matches!(notice, Notice::Error(_)));
        assert!(ctrl.session_expired());

        ctrl.acknowledge_session_expired();
        assert!(!ctrl.session_expired());
    }

    #[tokio::test]
    async fn empty_search_reloads_the_full_list() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_list()
            .times(1)
            .return_once(|| Ok(vec![make_todo(1, "a", false), make_todo(2, "b", false)]));
        gateway
            .expect_search()
            .with(eq("milk"))
            .times(1)
            .return_once(|_| Ok(vec![make_todo(3, "Buy milk", false)]));

        let mut ctrl = controller(gateway);

        ctrl.set_search_term("milk".to_string());
        assert!(ctrl.submit_search().await.is_none());
        assert_eq!(ctrl.visible().await.len(), 1);

        ctrl.set_search_term(String::new());
        assert!(ctrl.submit_search().await.is_none());
        assert_eq!(ctrl.visible().await.len(), 2);
    }
}
