use super::AppResult;
use crate::domain::{Todo, TodoDraft, TodoId, TodoUpdate, ViewFilter};
use crate::ports::{GatewayError, TodoGateway};
use std::sync::Arc;

/// In-memory mirror of the remote todo collection. The collection is owned
/// exclusively here; everything outside reads derived views. Order is the
/// remote store's order and is never re-sorted locally.
///
/// Reconciliation policy, one rule per entity class:
/// - create/update/toggle apply the server-returned value after the call
///   succeeds (server authoritative),
/// - delete is pessimistic: the row leaves the collection only once the
///   server has acknowledged,
/// - reload/search replace the whole collection; a malformed payload
///   degrades to an empty collection plus the decode error.
///
/// Racing mutations on the same id are allowed; the last response to arrive
/// wins the collection entry.
pub struct TodoStore {
    gateway: Arc<dyn TodoGateway>,
    todos: tokio::sync::RwLock<Vec<Todo>>,
}

impl TodoStore {
    pub fn new(gateway: Arc<dyn TodoGateway>) -> Self {
        Self {
            gateway,
            todos: tokio::sync::RwLock::new(Vec::new()),
        }
    }

    /// Pure projection of the collection: status filter first, then a
    /// case-insensitive substring match on the title. Order preserved.
    pub async fn visible(&self, filter: &ViewFilter) -> Vec<Todo> {
        self.todos
            .read()
            .await
            .iter()
            .filter(|todo| filter.matches(todo))
            .cloned()
            .collect()
    }

    pub async fn all(&self) -> Vec<Todo> {
        self.todos.read().await.clone()
    }

    pub async fn get(&self, id: TodoId) -> Option<Todo> {
        self.todos.read().await.iter().find(|t| t.id == id).cloned()
    }

    pub async fn reload(&self) -> AppResult<()> {
        let result = self.gateway.list().await;
        self.replace_collection(result).await
    }

    pub async fn search(&self, term: &str) -> AppResult<()> {
        let result = self.gateway.search(term).await;
        self.replace_collection(result).await
    }

    async fn replace_collection(&self, result: Result<Vec<Todo>, GatewayError>) -> AppResult<()> {
        match result {
            Ok(todos) => {
                *self.todos.write().await = todos;
                Ok(())
            }
            Err(e @ GatewayError::Decode(_)) => {
                // A list endpoint answering with the wrong shape must not
                // leave stale rows behind or take the UI down with it.
                self.todos.write().await.clear();
                Err(e.into())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn create(&self, draft: &TodoDraft) -> AppResult<Todo> {
        let todo = self.gateway.create(draft).await?;

        // The service appends new rows, so remote order implies append.
        self.todos.write().await.push(todo.clone());

        Ok(todo)
    }

    pub async fn update(&self, id: TodoId, update: &TodoUpdate) -> AppResult<Todo> {
        let todo = self.gateway.update(id, update).await?;
        self.apply_replacement(todo.clone()).await;
        Ok(todo)
    }

    pub async fn toggle(&self, id: TodoId) -> AppResult<Todo> {
        let todo = self.gateway.toggle(id).await?;
        self.apply_replacement(todo.clone()).await;
        Ok(todo)
    }

    pub async fn remove(&self, id: TodoId) -> AppResult<()> {
        self.gateway.remove(id).await?;
        self.todos.write().await.retain(|t| t.id != id);
        Ok(())
    }

    /// Replace the matching entry with the server-returned value. A missing
    /// entry means the row was deleted while this call was in flight; the
    /// delete already won, so the stale response is dropped.
    async fn apply_replacement(&self, todo: Todo) {
        let mut todos = self.todos.write().await;
        if let Some(slot) = todos.iter_mut().find(|t| t.id == todo.id) {
            *slot = todo;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StatusFilter;
    use crate::ports::GatewayResult;
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

    fn store_with(todos: Vec<Todo>, mut gateway: MockGateway) -> TodoStore {
        gateway.expect_list().times(1).return_once(move || Ok(todos));
        TodoStore::new(Arc::new(gateway))
    }

    #[tokio::test]
    async fn status_filter_returns_exact_subset_in_order() {
        let store = store_with(
            vec![
                make_todo(1, "first", true),
                make_todo(2, "second", false),
                make_todo(3, "third", true),
            ],
            MockGateway::new(),
        );
        store.reload().await.unwrap();

        let filter = ViewFilter {
            status: StatusFilter::Completed,
            ..Default::default()
        };
        let visible = store.visible(&filter).await;

        assert_eq!(
            visible.iter().map(|t| t.id.0).collect::<Vec<_>>(),
            vec![1, 3]
        );

        let filter = ViewFilter {
            status: StatusFilter::Pending,
            ..Default::default()
        };
        assert_eq!(store.visible(&filter).await.len(), 1);
    }

    #[tokio::test]
    async fn search_term_matches_case_insensitively() {
        let store = store_with(
            vec![
                make_todo(1, "Buy Milk", false),
                make_todo(2, "Buy bread", false),
            ],
            MockGateway::new(),
        );
        store.reload().await.unwrap();

        let filter = ViewFilter {
            search_term: "milk".to_string(),
            ..Default::default()
        };
        let visible = store.visible(&filter).await;

        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].title, "Buy Milk");
    }

    #[tokio::test]
    async fn create_appends_the_server_returned_todo() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_list()
            .times(1)
            .return_once(|| Ok(vec![make_todo(1, "existing", false)]));
        gateway
            .expect_create()
            .times(1)
            .return_once(|_| Ok(make_todo(7, "X", false)));

        let store = TodoStore::new(Arc::new(gateway));
        store.reload().await.unwrap();

        let draft = TodoDraft::new("X", "General");
        store.create(&draft).await.unwrap();

        let all = store.all().await;
        assert_eq!(all.len(), 2);
        assert_eq!(all[1].title, "X");
        assert_eq!(all[1].id, TodoId(7));
    }

    #[tokio::test]
    async fn create_failure_leaves_collection_unchanged() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_create()
            .times(1)
            .return_once(|_| Err(GatewayError::Network("connection refused".into())));

        let store = TodoStore::new(Arc::new(gateway));

        let draft = TodoDraft::new("X", "General");
        assert!(store.create(&draft).await.is_err());
        assert!(store.all().await.is_empty());
    }

    #[tokio::test]
    async fn toggle_twice_restores_original_state() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_list()
            .times(1)
            .return_once(|| Ok(vec![make_todo(1, "task", false)]));

        // The server flips the flag; two round trips land where we started.
        let mut flipped = false;
        gateway
            .expect_toggle()
            .with(eq(TodoId(1)))
            .times(2)
            .returning(move |_| {
                flipped = !flipped;
                Ok(make_todo(1, "task", flipped))
            });

        let store = TodoStore::new(Arc::new(gateway));
        store.reload().await.unwrap();

        store.toggle(TodoId(1)).await.unwrap();
        assert!(store.get(TodoId(1)).await.unwrap().completed);

        store.toggle(TodoId(1)).await.unwrap();
        assert!(!store.get(TodoId(1)).await.unwrap().completed);
    }

    #[tokio::test]
    async fn update_replaces_with_server_returned_value() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_list()
            .times(1)
            .return_once(|| Ok(vec![make_todo(1, "old title", false)]));
        gateway
            .expect_update()
            .times(1)
            .return_once(|_, _| Ok(make_todo(1, "new title", false)));

        let store = TodoStore::new(Arc::new(gateway));
        store.reload().await.unwrap();

        let update = TodoUpdate {
            title: "new title".to_string(),
            completed: false,
            category: "General".to_string(),
        };
        store.update(TodoId(1), &update).await.unwrap();

        assert_eq!(store.get(TodoId(1)).await.unwrap().title, "new title");
    }

    #[tokio::test]
    async fn update_failure_leaves_collection_unchanged() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_list()
            .times(1)
            .return_once(|| Ok(vec![make_todo(1, "old title", false)]));
        gateway
            .expect_update()
            .times(1)
            .return_once(|_, _| Err(GatewayError::Network("timed out".into())));

        let store = TodoStore::new(Arc::new(gateway));
        store.reload().await.unwrap();
        let before = store.all().await;

        let update = TodoUpdate {
            title: "new title".to_string(),
            completed: false,
            category: "General".to_string(),
        };
        assert!(store.update(TodoId(1), &update).await.is_err());
        assert_eq!(store.all().await, before);
    }

    #[tokio::test]
    async fn remove_is_pessimistic() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_list()
            .times(1)
            .return_once(|| Ok(vec![make_todo(1, "keep me", false)]));
        gateway
            .expect_remove()
            .with(eq(TodoId(1)))
            .times(2)
            .returning({
                let mut first = true;
                move |_| {
                    if first {
                        first = false;
                        Err(GatewayError::Http {
                            status: 500,
                            message: "boom".into(),
                        })
                    } else {
                        Ok(())
                    }
                }
            });

        let store = TodoStore::new(Arc::new(gateway));
        store.reload().await.unwrap();

        // Failed acknowledgement: the row must still be there.
        assert!(store.remove(TodoId(1)).await.is_err());
        assert_eq!(store.all().await.len(), 1);

        // Acknowledged: now it goes.
        store.remove(TodoId(1)).await.unwrap();
        assert!(store.all().await.is_empty());
    }

    #[tokio::test]
    async fn malformed_list_degrades_to_empty_collection() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_list()
            .times(1)
            .return_once(|| Ok(vec![make_todo(1, "stale", false)]));
        gateway.expect_list().times(1).return_once(|| {
            Err(GatewayError::Decode(
                "Expected an array of todos, got an object".into(),
            ))
        });

        let store = TodoStore::new(Arc::new(gateway));
        store.reload().await.unwrap();
        assert_eq!(store.all().await.len(), 1);

        let err = store.reload().await.unwrap_err();
        assert!(err.is_decode());
        assert!(store.visible(&ViewFilter::default()).await.is_empty());
    }

    #[tokio::test]
    async fn transport_failure_on_reload_keeps_previous_collection() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_list()
            .times(1)
            .return_once(|| Ok(vec![make_todo(1, "survivor", false)]));
        gateway
            .expect_list()
            .times(1)
            .return_once(|| Err(GatewayError::Network("dns failure".into())));

        let store = TodoStore::new(Arc::new(gateway));
        store.reload().await.unwrap();

        assert!(store.reload().await.is_err());
        assert_eq!(store.all().await.len(), 1);
    }
}
