//! Task/category store: server-synchronized collections with optimistic
//! local updates.
//!
//! Mutations send the request first and update the in-memory collection
//! from the response body, so the local mirror tracks what the server
//! acknowledged without a re-fetch. Newly created records are prepended,
//! which diverges from server ordering until the next full fetch.
//!
//! Read paths degrade rather than fail: statistics reset to zeros and the
//! today/overdue queries return empty lists on error.

use std::collections::HashMap;

use tracing::{debug, instrument, warn};

use taskflow_core::{ApiError, ListResponse};
use taskflow_core::tasks::{
    Category, NewCategory, NewTask, Task, TaskStats, TaskStatus, TaskUpdate,
};

use crate::client::ApiClient;

/// Bucket name for tasks without a category.
const UNCATEGORIZED: &str = "Uncategorized";

/// Task and category state container.
pub struct TaskStore {
    tasks: Vec<Task>,
    categories: Vec<Category>,
    stats: TaskStats,
    loading: bool,
    client: ApiClient,
}

impl TaskStore {
    /// New store with empty collections.
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self {
            tasks: Vec::new(),
            categories: Vec::new(),
            stats: TaskStats::default(),
            loading: false,
            client,
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Task operations
    // ─────────────────────────────────────────────────────────────────────

    /// Replace the local task collection with the server's list.
    #[instrument(skip_all)]
    pub async fn fetch_tasks(&mut self) -> Result<&[Task], ApiError> {
        self.loading = true;
        let result = self.client.get::<ListResponse<Task>>("/api/tasks/").await;
        self.loading = false;

        match result {
            Ok(list) => {
                self.tasks = list.into_items();
                debug!(count = self.tasks.len(), "tasks fetched");
                Ok(&self.tasks)
            }
            Err(e) => {
                warn!(error = %e, "task fetch failed");
                Err(ApiError::operation("Failed to fetch tasks"))
            }
        }
    }

    /// Refresh the statistics snapshot. Best-effort: a failure resets the
    /// snapshot to zeros instead of propagating.
    #[instrument(skip_all)]
    pub async fn fetch_stats(&mut self) -> &TaskStats {
        match self.client.get::<TaskStats>("/api/tasks/statistics/").await {
            Ok(stats) => self.stats = stats,
            Err(e) => {
                warn!(error = %e, "stats fetch failed, resetting to zeros");
                self.stats = TaskStats::default();
            }
        }
        &self.stats
    }

    /// Create a task and prepend the server's record to the collection.
    #[instrument(skip_all, fields(title = %new.title))]
    pub async fn create_task(&mut self, new: &NewTask) -> Result<Task, ApiError> {
        let task: Task = self
            .client
            .post("/api/tasks/", new)
            .await
            .map_err(|e| e.surface("Failed to create task"))?;
        self.tasks.insert(0, task.clone());
        Ok(task)
    }

    /// Full-replace update; the matching local record is replaced in
    /// place. An id absent locally is silently dropped from the view.
    #[instrument(skip_all, fields(id = id))]
    pub async fn update_task(&mut self, id: i64, update: &TaskUpdate) -> Result<Task, ApiError> {
        let task: Task = self
            .client
            .put(&format!("/api/tasks/{id}/"), update)
            .await
            .map_err(|e| e.surface("Failed to update task"))?;
        self.replace_task(id, task.clone());
        Ok(task)
    }

    /// Delete a task and remove it from the collection by id.
    #[instrument(skip_all, fields(id = id))]
    pub async fn delete_task(&mut self, id: i64) -> Result<(), ApiError> {
        self.client
            .delete(&format!("/api/tasks/{id}/"))
            .await
            .map_err(|e| e.surface("Failed to delete task"))?;
        self.tasks.retain(|t| t.id != id);
        Ok(())
    }

    /// Transition a task to completed via the dedicated endpoint.
    ///
    /// Unlike the other mutators this surfaces a static message with no
    /// server detail, matching the contract's documented behavior.
    #[instrument(skip_all, fields(id = id))]
    pub async fn mark_completed(&mut self, id: i64) -> Result<Task, ApiError> {
        let task: Task = self
            .client
            .post_empty(&format!("/api/tasks/{id}/mark_completed/"))
            .await
            .map_err(|_| ApiError::operation("Failed to mark task as completed"))?;
        self.replace_task(id, task.clone());
        Ok(task)
    }

    /// Transition a task back to pending via the dedicated endpoint.
    #[instrument(skip_all, fields(id = id))]
    pub async fn mark_pending(&mut self, id: i64) -> Result<Task, ApiError> {
        let task: Task = self
            .client
            .post_empty(&format!("/api/tasks/{id}/mark_pending/"))
            .await
            .map_err(|_| ApiError::operation("Failed to mark task as pending"))?;
        self.replace_task(id, task.clone());
        Ok(task)
    }

    /// Tasks due today, straight from the server. No state mutation; a
    /// failure yields an empty list.
    #[instrument(skip_all)]
    pub async fn today_tasks(&self) -> Vec<Task> {
        self.read_only_list("/api/tasks/today/").await
    }

    /// Overdue tasks, straight from the server. No state mutation; a
    /// failure yields an empty list.
    #[instrument(skip_all)]
    pub async fn overdue_tasks(&self) -> Vec<Task> {
        self.read_only_list("/api/tasks/overdue/").await
    }

    // ─────────────────────────────────────────────────────────────────────
    // Category operations
    // ─────────────────────────────────────────────────────────────────────

    /// Replace the local category collection with the server's list.
    #[instrument(skip_all)]
    pub async fn fetch_categories(&mut self) -> Result<&[Category], ApiError> {
        match self
            .client
            .get::<ListResponse<Category>>("/api/categories/")
            .await
        {
            Ok(list) => {
                self.categories = list.into_items();
                Ok(&self.categories)
            }
            Err(e) => {
                warn!(error = %e, "category fetch failed");
                Err(ApiError::operation("Failed to fetch categories"))
            }
        }
    }

    /// Create a category and prepend the server's record.
    #[instrument(skip_all, fields(name = %new.name))]
    pub async fn create_category(&mut self, new: &NewCategory) -> Result<Category, ApiError> {
        let category: Category = self
            .client
            .post("/api/categories/", new)
            .await
            .map_err(|e| e.surface("Failed to create category"))?;
        self.categories.insert(0, category.clone());
        Ok(category)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Derived views
    // ─────────────────────────────────────────────────────────────────────

    /// Current task collection.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Current category collection.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Latest statistics snapshot.
    #[must_use]
    pub fn stats(&self) -> &TaskStats {
        &self.stats
    }

    /// Whether a list request is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Tasks with status pending.
    #[must_use]
    pub fn pending_tasks(&self) -> Vec<&Task> {
        self.tasks_with_status(TaskStatus::Pending)
    }

    /// Tasks with status in-progress.
    #[must_use]
    pub fn in_progress_tasks(&self) -> Vec<&Task> {
        self.tasks_with_status(TaskStatus::InProgress)
    }

    /// Tasks with status completed.
    #[must_use]
    pub fn completed_tasks(&self) -> Vec<&Task> {
        self.tasks_with_status(TaskStatus::Completed)
    }

    /// Tasks grouped by category name; tasks without a category fall into
    /// the `"Uncategorized"` bucket. Per-bucket order follows the
    /// collection's insertion order.
    #[must_use]
    pub fn tasks_by_category(&self) -> HashMap<String, Vec<&Task>> {
        let mut grouped: HashMap<String, Vec<&Task>> = HashMap::new();
        for task in &self.tasks {
            let name = task
                .category_name
                .clone()
                .unwrap_or_else(|| UNCATEGORIZED.to_string());
            grouped.entry(name).or_default().push(task);
        }
        grouped
    }

    // ─────────────────────────────────────────────────────────────────────
    // Internals
    // ─────────────────────────────────────────────────────────────────────

    fn tasks_with_status(&self, status: TaskStatus) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.status == status).collect()
    }

    fn replace_task(&mut self, id: i64, task: Task) {
        if let Some(slot) = self.tasks.iter_mut().find(|t| t.id == id) {
            *slot = task;
        }
    }

    async fn read_only_list(&self, path: &str) -> Vec<Task> {
        match self.client.get::<ListResponse<Task>>(path).await {
            Ok(list) => list.into_items(),
            Err(e) => {
                warn!(error = %e, path, "read-only task query failed");
                Vec::new()
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn store_for(uri: &str) -> TaskStore {
        TaskStore::new(ApiClient::new(&ClientConfig::new(uri)).unwrap())
    }

    fn task(id: i64, title: &str, status: TaskStatus, category: Option<&str>) -> Task {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "title": title,
            "status": status.to_string(),
            "category_name": category,
        }))
        .unwrap()
    }

    fn task_json(id: i64, title: &str, status: &str) -> serde_json::Value {
        serde_json::json!({"id": id, "title": title, "status": status})
    }

    // ── Fetching ────────────────────────────────────────────────────────

    #[tokio::test]
    async fn fetch_tasks_unwraps_paginated_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tasks/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "count": 2,
                "next": null,
                "previous": null,
                "results": [task_json(1, "a", "pending"), task_json(2, "b", "completed")],
            })))
            .mount(&server)
            .await;

        let mut store = store_for(&server.uri());
        let tasks = store.fetch_tasks().await.unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].title, "a");
    }

    #[tokio::test]
    async fn fetch_tasks_accepts_bare_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tasks/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([task_json(1, "a", "pending")])),
            )
            .mount(&server)
            .await;

        let mut store = store_for(&server.uri());
        assert_eq!(store.fetch_tasks().await.unwrap().len(), 1);
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn fetch_tasks_replaces_previous_collection() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tasks/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([task_json(9, "only", "pending")])),
            )
            .mount(&server)
            .await;

        let mut store = store_for(&server.uri());
        store.tasks = vec![task(1, "stale", TaskStatus::Pending, None)];
        let _ = store.fetch_tasks().await.unwrap();
        assert_eq!(store.tasks().len(), 1);
        assert_eq!(store.tasks()[0].id, 9);
    }

    #[tokio::test]
    async fn fetch_tasks_failure_is_generic_and_clears_loading() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(500)
                    .set_body_json(serde_json::json!({"detail": "db on fire"})),
            )
            .mount(&server)
            .await;

        let mut store = store_for(&server.uri());
        let err = store.fetch_tasks().await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch tasks");
        assert!(!store.is_loading());
    }

    // ── Statistics ──────────────────────────────────────────────────────

    #[tokio::test]
    async fn fetch_stats_sets_snapshot() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tasks/statistics/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "total_tasks": 5,
                "pending_tasks": 2,
                "in_progress_tasks": 1,
                "completed_tasks": 2,
                "overdue_tasks": 1,
                "completion_rate": 40.0,
                "tasks_by_priority": {"2": 5},
                "tasks_by_category": {},
            })))
            .mount(&server)
            .await;

        let mut store = store_for(&server.uri());
        let stats = store.fetch_stats().await;
        assert_eq!(stats.total_tasks, 5);
        assert_eq!(stats.completion_rate, 40.0);
    }

    #[tokio::test]
    async fn fetch_stats_failure_resets_to_zeros() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let mut store = store_for(&server.uri());
        store.stats = TaskStats {
            total_tasks: 42,
            ..TaskStats::default()
        };
        let stats = store.fetch_stats().await;
        assert_eq!(*stats, TaskStats::default());
    }

    // ── Mutations ───────────────────────────────────────────────────────

    #[tokio::test]
    async fn create_task_prepends_server_record() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/tasks/"))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(task_json(1, "x", "pending")),
            )
            .mount(&server)
            .await;

        let mut store = store_for(&server.uri());
        store.tasks = vec![task(5, "existing", TaskStatus::Pending, None)];

        let created = store
            .create_task(&NewTask {
                title: "x".into(),
                ..NewTask::default()
            })
            .await
            .unwrap();

        assert_eq!(created.id, 1);
        assert_eq!(store.tasks().len(), 2);
        assert_eq!(store.tasks()[0].id, 1);
    }

    #[tokio::test]
    async fn create_task_surfaces_server_detail() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(
                serde_json::json!({"title": ["This field may not be blank."]}),
            ))
            .mount(&server)
            .await;

        let mut store = store_for(&server.uri());
        let err = store.create_task(&NewTask::default()).await.unwrap_err();
        assert_eq!(err.to_string(), "title: This field may not be blank.");
        assert!(store.tasks().is_empty());
    }

    #[tokio::test]
    async fn update_task_replaces_in_place() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/tasks/2/"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(task_json(2, "renamed", "in_progress")),
            )
            .mount(&server)
            .await;

        let mut store = store_for(&server.uri());
        store.tasks = vec![
            task(1, "first", TaskStatus::Pending, None),
            task(2, "second", TaskStatus::Pending, None),
            task(3, "third", TaskStatus::Pending, None),
        ];

        let updated = store
            .update_task(
                2,
                &TaskUpdate {
                    title: "renamed".into(),
                    ..TaskUpdate::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.title, "renamed");
        assert_eq!(store.tasks()[1].title, "renamed");
        assert_eq!(store.tasks()[1].status, TaskStatus::InProgress);
        assert_eq!(store.tasks().len(), 3);
    }

    #[tokio::test]
    async fn update_task_unknown_id_leaves_collection_unchanged() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/tasks/99/"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(task_json(99, "ghost", "pending")),
            )
            .mount(&server)
            .await;

        let mut store = store_for(&server.uri());
        store.tasks = vec![task(1, "only", TaskStatus::Pending, None)];

        let updated = store
            .update_task(
                99,
                &TaskUpdate {
                    title: "ghost".into(),
                    ..TaskUpdate::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.id, 99);
        assert_eq!(store.tasks().len(), 1);
        assert_eq!(store.tasks()[0].id, 1);
    }

    #[tokio::test]
    async fn delete_task_removes_by_id() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/tasks/1/"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let mut store = store_for(&server.uri());
        store.tasks = vec![
            task(1, "doomed", TaskStatus::Pending, None),
            task(2, "kept", TaskStatus::Pending, None),
        ];

        store.delete_task(1).await.unwrap();
        assert_eq!(store.tasks().len(), 1);
        assert_eq!(store.tasks()[0].id, 2);
    }

    #[tokio::test]
    async fn delete_task_failure_keeps_collection() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(serde_json::json!({"detail": "Not found."})),
            )
            .mount(&server)
            .await;

        let mut store = store_for(&server.uri());
        store.tasks = vec![task(1, "kept", TaskStatus::Pending, None)];

        let err = store.delete_task(1).await.unwrap_err();
        assert_eq!(err.to_string(), "Not found.");
        assert_eq!(store.tasks().len(), 1);
    }

    #[tokio::test]
    async fn mark_completed_replaces_record() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/tasks/1/mark_completed/"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(task_json(1, "done", "completed")),
            )
            .mount(&server)
            .await;

        let mut store = store_for(&server.uri());
        store.tasks = vec![task(1, "done", TaskStatus::Pending, None)];

        let completed = store.mark_completed(1).await.unwrap();
        assert_eq!(completed.status, TaskStatus::Completed);
        assert_eq!(store.tasks()[0].status, TaskStatus::Completed);
    }

    #[tokio::test]
    async fn mark_completed_failure_is_static_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(serde_json::json!({"detail": "server detail ignored"})),
            )
            .mount(&server)
            .await;

        let mut store = store_for(&server.uri());
        let err = store.mark_completed(1).await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to mark task as completed");
    }

    #[tokio::test]
    async fn mark_pending_replaces_record() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/tasks/3/mark_pending/"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(task_json(3, "reopened", "pending")),
            )
            .mount(&server)
            .await;

        let mut store = store_for(&server.uri());
        store.tasks = vec![task(3, "reopened", TaskStatus::Completed, None)];

        let reopened = store.mark_pending(3).await.unwrap();
        assert_eq!(reopened.status, TaskStatus::Pending);
        assert_eq!(store.tasks()[0].status, TaskStatus::Pending);
    }

    // ── Categories ──────────────────────────────────────────────────────

    #[tokio::test]
    async fn fetch_categories_unwraps_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/categories/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "count": 1,
                "results": [{"id": 1, "name": "Work", "color": "#3498db"}],
            })))
            .mount(&server)
            .await;

        let mut store = store_for(&server.uri());
        let categories = store.fetch_categories().await.unwrap();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].name, "Work");
    }

    #[tokio::test]
    async fn create_category_prepends() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/categories/"))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(serde_json::json!({"id": 2, "name": "Home"})),
            )
            .mount(&server)
            .await;

        let mut store = store_for(&server.uri());
        store.categories = vec![Category {
            id: 1,
            name: "Work".into(),
            color: None,
            user: None,
            task_count: None,
            created_at: None,
        }];

        let created = store
            .create_category(&NewCategory {
                name: "Home".into(),
                color: None,
            })
            .await
            .unwrap();

        assert_eq!(created.name, "Home");
        assert_eq!(store.categories()[0].id, 2);
        assert_eq!(store.categories().len(), 2);
    }

    // ── Read-only queries ───────────────────────────────────────────────

    #[tokio::test]
    async fn today_tasks_returns_server_list_without_mutating() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tasks/today/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([task_json(7, "due today", "pending")])),
            )
            .mount(&server)
            .await;

        let store = store_for(&server.uri());
        let today = store.today_tasks().await;
        assert_eq!(today.len(), 1);
        assert!(store.tasks().is_empty());
    }

    #[tokio::test]
    async fn overdue_tasks_network_failure_returns_empty() {
        let store = store_for("http://127.0.0.1:9");
        assert!(store.overdue_tasks().await.is_empty());
    }

    #[tokio::test]
    async fn overdue_tasks_server_error_returns_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let store = store_for(&server.uri());
        assert!(store.overdue_tasks().await.is_empty());
    }

    // ── Derived views ───────────────────────────────────────────────────

    #[test]
    fn status_filters_partition_tasks() {
        let server_uri = "http://127.0.0.1:9";
        let mut store = store_for(server_uri);
        store.tasks = vec![
            task(1, "a", TaskStatus::Pending, None),
            task(2, "b", TaskStatus::InProgress, None),
            task(3, "c", TaskStatus::Completed, None),
            task(4, "d", TaskStatus::Pending, None),
        ];

        assert_eq!(store.pending_tasks().len(), 2);
        assert_eq!(store.in_progress_tasks().len(), 1);
        assert_eq!(store.completed_tasks().len(), 1);
    }

    #[test]
    fn tasks_by_category_buckets_uncategorized() {
        let mut store = store_for("http://127.0.0.1:9");
        store.tasks = vec![
            task(1, "a", TaskStatus::Pending, Some("Work")),
            task(2, "b", TaskStatus::Pending, None),
            task(3, "c", TaskStatus::Pending, Some("Work")),
        ];

        let grouped = store.tasks_by_category();
        assert_eq!(grouped["Work"].len(), 2);
        assert_eq!(grouped[UNCATEGORIZED].len(), 1);
        assert_eq!(grouped[UNCATEGORIZED][0].id, 2);
    }

    #[test]
    fn tasks_by_category_preserves_insertion_order() {
        let mut store = store_for("http://127.0.0.1:9");
        store.tasks = vec![
            task(3, "third", TaskStatus::Pending, Some("Work")),
            task(1, "first", TaskStatus::Pending, Some("Work")),
            task(2, "second", TaskStatus::Pending, Some("Work")),
        ];

        let grouped = store.tasks_by_category();
        let ids: Vec<i64> = grouped["Work"].iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }
}
