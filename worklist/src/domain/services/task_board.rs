use std::sync::Arc;

use chrono::NaiveDate;
use tracing::instrument;

use atomwalk::{CompanyInfo, ProfileInfo, RawTask};

use crate::domain::{
    filter_view,
    models::{
        ActivityView, DayFilter, FilterState, NormalizedActivity, NormalizedTask, StatusFilter,
        StatusMatch, TaskId, TaskSummary,
    },
    ports::outbound::{TaskBackend, TaskQuery},
    unique_ref_nums, ActivityStatusResolver, AfterCompletion, CompletionError, CompletionPolicy,
    CompletionWorkflow, NormalizerOptions, SessionContext, TaskFilterEngine, TaskNormalizer,
    WorklistError, COMPLETED_LOCALLY,
};

/// Knobs of a [`TaskBoard`], usually taken from [`crate::Settings::board_options`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoardOptions {
    pub normalizer: NormalizerOptions,
    pub status_match: StatusMatch,
    pub filters: FilterState,
    pub completion: CompletionPolicy,
}

/// A task list fetch that has been issued but not applied yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFetch {
    generation: u64,
    pub query: TaskQuery,
}

impl PendingFetch {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Puts the workflow back to idle when dropped, also when the submitting future is.
struct SubmissionGuard<'a>(&'a mut CompletionWorkflow);

impl Drop for SubmissionGuard<'_> {
    fn drop(&mut self) {
        self.0.finish();
    }
}

fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// State behind the task and activity screens of one signed-in session.
///
/// Owns the current filters and lists and the completion workflow. Every failure is logged
/// and returned, leaving the board in a state the user can retry from.
pub struct TaskBoard<B> {
    backend: Arc<B>,
    session: SessionContext,
    normalizer: TaskNormalizer,
    filter_engine: TaskFilterEngine,
    resolver: ActivityStatusResolver,
    workflow: CompletionWorkflow,
    filters: FilterState,
    tasks: Vec<NormalizedTask>,
    activities: Vec<NormalizedActivity>,
    profile: Option<ProfileInfo>,
    company: Option<CompanyInfo>,
    fetch_generation: u64,
    today: fn() -> NaiveDate,
}

impl<B: TaskBackend> TaskBoard<B> {
    pub fn new(backend: Arc<B>, session: SessionContext, options: BoardOptions) -> Self {
        Self {
            backend,
            session,
            normalizer: TaskNormalizer::new(options.normalizer),
            filter_engine: TaskFilterEngine::new(options.status_match),
            resolver: ActivityStatusResolver,
            workflow: CompletionWorkflow::new(options.completion),
            filters: options.filters,
            tasks: Vec::new(),
            activities: Vec::new(),
            profile: None,
            company: None,
            fetch_generation: 0,
            today: local_today,
        }
    }

    /// Replaces the clock used for due dates and default update dates.
    pub fn with_clock(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn filters(&self) -> FilterState {
        self.filters
    }

    pub fn profile(&self) -> Option<&ProfileInfo> {
        self.profile.as_ref()
    }

    pub fn company(&self) -> Option<&CompanyInfo> {
        self.company.as_ref()
    }

    pub fn workflow(&self) -> &CompletionWorkflow {
        &self.workflow
    }

    /// Tasks of the current day range, before the status filter.
    pub fn tasks(&self) -> &[NormalizedTask] {
        &self.tasks
    }

    /// Tasks passing the current filters.
    pub fn visible_tasks(&self) -> Vec<&NormalizedTask> {
        self.filter_engine.select(&self.filters, &self.tasks)
    }

    pub fn summary(&self) -> TaskSummary {
        let visible: Vec<NormalizedTask> = self.visible_tasks().into_iter().cloned().collect();
        TaskSummary::from_tasks(&visible, self.filter_engine.status_match())
    }

    pub fn task(&self, id: &TaskId) -> Option<&NormalizedTask> {
        self.tasks.iter().find(|task| &task.id == id)
    }

    pub fn activities(&self) -> &[NormalizedActivity] {
        &self.activities
    }

    pub fn activity_view(
        &self,
        view: ActivityView,
        ref_num: Option<&str>,
    ) -> Vec<&NormalizedActivity> {
        filter_view(&self.activities, view, ref_num)
    }

    pub fn ref_nums(&self) -> Vec<&str> {
        unique_ref_nums(&self.activities)
    }

    /// Company, profile and activities concurrently, then the task list.
    #[instrument(skip(self), fields(db = %self.session.db_name))]
    pub async fn load_dashboard(&mut self) -> Result<(), WorklistError> {
        let backend = Arc::clone(&self.backend);
        let emp_id = self.session.emp_id().map(str::to_string);

        let (company, profile, activities) = tokio::try_join!(
            backend.get_company_info(),
            backend.get_profile_info(emp_id.as_deref()),
            backend.get_activity_list(),
        )
        .inspect_err(|e| tracing::error!("Failed to load dashboard: {}", e))?;

        self.company = Some(company);
        self.profile = profile;
        self.activities = self.resolver.normalize_all(activities, (self.today)());
        tracing::debug!(activities = self.activities.len(), "Dashboard loaded");

        self.refresh().await
    }

    #[instrument(skip(self))]
    pub async fn load_activities(&mut self) -> Result<&[NormalizedActivity], WorklistError> {
        let activities = self
            .backend
            .get_activity_list()
            .await
            .inspect_err(|e| tracing::error!("Failed to load activities: {}", e))?;
        self.activities = self.resolver.normalize_all(activities, (self.today)());
        Ok(&self.activities)
    }

    #[instrument(skip(self))]
    pub async fn load_manager_activities(
        &mut self,
        call_mode: &str,
    ) -> Result<&[NormalizedActivity], WorklistError> {
        let activities = self
            .backend
            .get_manager_activity_list(call_mode)
            .await
            .inspect_err(|e| tracing::error!("Failed to load team activities: {}", e))?;
        self.activities = self.resolver.normalize_all(activities, (self.today)());
        Ok(&self.activities)
    }

    /// Issues a new task list fetch. Any fetch issued before it becomes stale.
    pub fn begin_fetch(&mut self) -> PendingFetch {
        self.fetch_generation += 1;
        PendingFetch {
            generation: self.fetch_generation,
            query: TaskQuery::for_session(&self.session, self.filters.day),
        }
    }

    /// Applies the result of a fetch. Returns `Ok(false)` when a newer fetch has been
    /// issued since, in which case the result is dropped.
    pub fn apply_fetch(
        &mut self,
        fetch: PendingFetch,
        result: Result<Vec<RawTask>, WorklistError>,
    ) -> Result<bool, WorklistError> {
        if fetch.generation < self.fetch_generation {
            tracing::warn!(
                generation = fetch.generation,
                latest = self.fetch_generation,
                "Discarding stale task list response"
            );
            return Ok(false);
        }

        let raws = result.inspect_err(|e| tracing::error!("Failed to fetch tasks: {}", e))?;
        let received = raws.len();
        self.tasks = self.normalizer.normalize_lenient(raws);
        tracing::debug!(received, kept = self.tasks.len(), day = %fetch.query.day, "Task list updated");
        Ok(true)
    }

    /// Re-fetches the task list for the current day filter.
    #[instrument(skip(self), fields(day = %self.filters.day))]
    pub async fn refresh(&mut self) -> Result<(), WorklistError> {
        let fetch = self.begin_fetch();
        let result = self.backend.get_user_tasks(&fetch.query).await;
        self.apply_fetch(fetch, result).map(|_| ())
    }

    /// Switches filters. A new day range needs a re-fetch, a new status only re-filters.
    pub async fn set_filters(&mut self, filters: FilterState) -> Result<(), WorklistError> {
        let day_changed = filters.day != self.filters.day;
        self.filters = filters;
        if day_changed {
            self.refresh().await?;
        }
        Ok(())
    }

    pub async fn set_day_filter(&mut self, day: DayFilter) -> Result<(), WorklistError> {
        self.set_filters(FilterState::new(day, self.filters.status))
            .await
    }

    pub fn set_status_filter(&mut self, status: StatusFilter) {
        self.filters.status = status;
    }

    /// Starts the mark-complete flow for a task of the current list.
    pub fn request_completion(&mut self, id: &TaskId) -> Result<&NormalizedTask, WorklistError> {
        let index = self
            .tasks
            .iter()
            .position(|task| &task.id == id)
            .ok_or_else(|| CompletionError::UnknownTask(id.to_string()))?;
        self.workflow.request(&self.tasks[index])?;
        Ok(&self.tasks[index])
    }

    pub fn cancel_completion(&mut self) -> bool {
        self.workflow.cancel()
    }

    /// Sends the pending completion and brings the list up to date afterwards.
    ///
    /// The workflow is back to idle when this returns or is dropped, whatever the outcome.
    #[instrument(skip(self))]
    pub async fn confirm_completion(&mut self) -> Result<TaskId, WorklistError> {
        let submission = self
            .workflow
            .confirm((self.today)())
            .inspect_err(|e| tracing::error!("Cannot submit completion: {}", e))?;

        let guard = SubmissionGuard(&mut self.workflow);
        let result = self
            .backend
            .update_task(
                &submission.task_data,
                submission.is_completed,
                submission.assign_user,
            )
            .await;
        drop(guard);

        if let Err(e) = result {
            tracing::error!(task_id = %submission.task_id, "Failed to complete task: {}", e);
            return Err(e);
        }
        tracing::info!(task_id = %submission.task_id, "Task completed");

        match self.workflow.policy().after_success {
            AfterCompletion::Refetch => {
                if let Err(e) = self.refresh().await {
                    tracing::warn!("Task completed but the list could not be refreshed: {}", e);
                }
            }
            AfterCompletion::PatchLocal => {
                if let Some(task) = self.tasks.iter_mut().find(|t| t.id == submission.task_id) {
                    task.status = COMPLETED_LOCALLY.to_string();
                }
            }
        }

        Ok(submission.task_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use async_trait::async_trait;
    use atomwalk::{RawActivity, TaskUpdateData, YesNo};

    use crate::adapters::outbound::InMemoryBackend;
    use crate::domain::models::ActivityStatus;
    use serde_json::json;

    /// Serves reads from memory, never answers an update.
    struct HangingUpdates(InMemoryBackend);

    #[async_trait]
    impl TaskBackend for HangingUpdates {
        async fn get_profile_info(
            &self,
            emp_id: Option<&str>,
        ) -> Result<Option<ProfileInfo>, WorklistError> {
            self.0.get_profile_info(emp_id).await
        }

        async fn get_company_info(&self) -> Result<CompanyInfo, WorklistError> {
            self.0.get_company_info().await
        }

        async fn get_activity_list(&self) -> Result<Vec<RawActivity>, WorklistError> {
            self.0.get_activity_list().await
        }

        async fn get_manager_activity_list(
            &self,
            call_mode: &str,
        ) -> Result<Vec<RawActivity>, WorklistError> {
            self.0.get_manager_activity_list(call_mode).await
        }

        async fn get_user_tasks(&self, query: &TaskQuery) -> Result<Vec<RawTask>, WorklistError> {
            self.0.get_user_tasks(query).await
        }

        async fn update_task(
            &self,
            _task_data: &TaskUpdateData,
            _is_completed: YesNo,
            _assign_user: YesNo,
        ) -> Result<(), WorklistError> {
            std::future::pending().await
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn session() -> SessionContext {
        SessionContext::new("ACME_01", "token").with_emp_id("EMP-004")
    }

    fn board_with(
        backend: &InMemoryBackend,
        options: BoardOptions,
    ) -> TaskBoard<InMemoryBackend> {
        TaskBoard::new(Arc::new(backend.clone()), session(), options).with_clock(today)
    }

    fn raw_task(value: serde_json::Value) -> RawTask {
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn dashboard_loads_everything() {
        let backend = InMemoryBackend::seeded();
        let mut board = board_with(&backend, BoardOptions::default());

        board.load_dashboard().await.unwrap();

        assert!(board.company().is_some());
        assert_eq!(
            board.profile().and_then(|p| p.emp_id.as_deref()),
            Some("EMP-004")
        );
        assert_eq!(board.activities().len(), 3);
        assert_eq!(board.activities()[0].status, ActivityStatus::OverDue);
        assert_eq!(board.tasks().len(), 2);
        assert_eq!(board.ref_nums(), vec!["PRJ-100", "PRJ-200"]);

        let queries = backend.queries();
        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0].emp_id.as_deref(), Some("EMP-004"));
        assert_eq!(queries[0].day, DayFilter::Today);
    }

    #[tokio::test]
    async fn dashboard_failure_is_reported() {
        let backend = InMemoryBackend::seeded();
        backend.fail_with(Some("connection refused"));
        let mut board = board_with(&backend, BoardOptions::default());

        let err = board.load_dashboard().await.unwrap_err();
        assert!(err.is_retryable());
        assert!(board.tasks().is_empty());
    }

    #[tokio::test]
    async fn status_filter_is_client_side_and_day_filter_refetches() {
        let backend = InMemoryBackend::seeded();
        let mut board = board_with(&backend, BoardOptions::default());
        board.refresh().await.unwrap();

        let planned: Vec<_> = board.visible_tasks().iter().map(|t| t.id.to_string()).collect();
        assert_eq!(planned, vec!["101"]);
        assert_eq!(
            board.summary(),
            TaskSummary {
                total: 1,
                completed: 0,
                planned: 1
            }
        );

        board.set_status_filter(StatusFilter::All);
        assert_eq!(board.visible_tasks().len(), 2);
        assert_eq!(backend.queries().len(), 1);

        board.set_day_filter(DayFilter::All).await.unwrap();
        assert_eq!(board.visible_tasks().len(), 4);
        assert_eq!(backend.queries().len(), 2);
        assert_eq!(backend.queries()[1].day, DayFilter::All);
    }

    #[tokio::test]
    async fn stale_fetch_is_discarded() {
        let backend = InMemoryBackend::new();
        let mut board = board_with(&backend, BoardOptions::default());

        let slow = board.begin_fetch();
        board.filters = FilterState::new(DayFilter::Past, StatusFilter::All);
        let fast = board.begin_fetch();
        assert!(fast.generation() > slow.generation());

        let applied = board
            .apply_fetch(fast, Ok(vec![raw_task(json!({ "id": 2, "task_status": "Planned" }))]))
            .unwrap();
        assert!(applied);

        let applied = board
            .apply_fetch(slow, Ok(vec![raw_task(json!({ "id": 1 })), raw_task(json!({ "id": 3 }))]))
            .unwrap();
        assert!(!applied);

        let ids: Vec<_> = board.tasks().iter().map(|t| t.id.to_string()).collect();
        assert_eq!(ids, vec!["2"]);
    }

    #[tokio::test]
    async fn failed_fetch_keeps_previous_list() {
        let backend = InMemoryBackend::seeded();
        let mut board = board_with(&backend, BoardOptions::default());
        board.refresh().await.unwrap();

        backend.fail_with(Some("offline"));
        assert!(board.refresh().await.is_err());
        assert_eq!(board.tasks().len(), 2);
    }

    #[tokio::test]
    async fn completion_refetches_by_default() {
        let backend = InMemoryBackend::seeded();
        let mut board = board_with(&backend, BoardOptions::default());
        board.refresh().await.unwrap();

        let id = TaskId::from("101");
        board.request_completion(&id).unwrap();
        assert_eq!(board.confirm_completion().await.unwrap(), id);

        let updates = backend.updates();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].task_data.id, atomwalk::RecordId::Number(101));
        assert_eq!(
            updates[0].task_data.curr_user,
            Some(atomwalk::RecordId::Number(4))
        );
        assert_eq!(updates[0].task_data.task_type, "VISIT");
        assert_eq!(updates[0].is_completed, atomwalk::YesNo::Yes);

        assert_eq!(backend.queries().len(), 2);
        assert_eq!(board.task(&id).unwrap().status, "Completed");
        assert!(!board.workflow().is_busy());
    }

    #[tokio::test]
    async fn abandoned_completion_leaves_workflow_idle() {
        let backend = HangingUpdates(InMemoryBackend::seeded());
        let mut board = TaskBoard::new(Arc::new(backend), session(), BoardOptions::default())
            .with_clock(today);
        board.refresh().await.unwrap();

        let id = TaskId::from("101");
        board.request_completion(&id).unwrap();
        let outcome =
            tokio::time::timeout(Duration::from_millis(10), board.confirm_completion()).await;
        assert!(outcome.is_err());

        assert!(!board.workflow().is_busy());
        assert!(board.request_completion(&id).is_ok());
    }

    #[tokio::test]
    async fn completion_can_patch_locally() {
        let backend = InMemoryBackend::seeded();
        let options = BoardOptions {
            completion: CompletionPolicy {
                after_success: AfterCompletion::PatchLocal,
                ..CompletionPolicy::default()
            },
            ..BoardOptions::default()
        };
        let mut board = board_with(&backend, options);
        board.refresh().await.unwrap();

        let id = TaskId::from("101");
        board.request_completion(&id).unwrap();
        board.confirm_completion().await.unwrap();

        assert_eq!(backend.queries().len(), 1);
        assert_eq!(board.task(&id).unwrap().status, COMPLETED_LOCALLY);
    }

    #[tokio::test]
    async fn missing_identifier_never_reaches_backend() {
        let backend = InMemoryBackend::new();
        let mut board = board_with(&backend, BoardOptions::default());
        let fetch = board.begin_fetch();
        board
            .apply_fetch(fetch, Ok(vec![raw_task(json!({ "id": 7, "name": "Fix pump" }))]))
            .unwrap();
        board.tasks[0].original.id = None;

        board.request_completion(&TaskId::from("7")).unwrap();
        let err = board.confirm_completion().await.unwrap_err();

        assert!(matches!(
            err,
            WorklistError::Completion(CompletionError::MissingIdentifier)
        ));
        assert!(backend.updates().is_empty());
        assert!(!board.workflow().is_busy());
    }

    #[tokio::test]
    async fn second_request_is_rejected_while_pending() {
        let backend = InMemoryBackend::seeded();
        let mut board = board_with(&backend, BoardOptions::default());
        board.refresh().await.unwrap();

        board.request_completion(&TaskId::from("101")).unwrap();
        let err = board.request_completion(&TaskId::from("101")).unwrap_err();
        assert!(matches!(err, WorklistError::Completion(CompletionError::Busy)));

        assert!(board.cancel_completion());
        assert!(board.request_completion(&TaskId::from("101")).is_ok());
    }

    #[tokio::test]
    async fn completed_and_unknown_tasks_are_rejected() {
        let backend = InMemoryBackend::seeded();
        let mut board = board_with(&backend, BoardOptions::default());
        board.refresh().await.unwrap();

        let err = board.request_completion(&TaskId::from("102")).unwrap_err();
        assert!(matches!(
            err,
            WorklistError::Completion(CompletionError::NotCompletable { .. })
        ));

        let err = board.request_completion(&TaskId::from("999")).unwrap_err();
        assert!(matches!(
            err,
            WorklistError::Completion(CompletionError::UnknownTask(_))
        ));
    }

    #[tokio::test]
    async fn failed_update_returns_to_idle() {
        let backend = InMemoryBackend::seeded();
        let mut board = board_with(&backend, BoardOptions::default());
        board.refresh().await.unwrap();

        board.request_completion(&TaskId::from("101")).unwrap();
        backend.fail_with(Some("timeout"));
        assert!(board.confirm_completion().await.is_err());
        assert!(!board.workflow().is_busy());
        assert_eq!(board.task(&TaskId::from("101")).unwrap().status, "Planned");
    }

    #[tokio::test]
    async fn activity_views_use_board_clock() {
        let backend = InMemoryBackend::seeded();
        let mut board = board_with(&backend, BoardOptions::default());
        board.load_activities().await.unwrap();

        let over_due = board.activity_view(ActivityView::OverDue, None);
        assert_eq!(over_due.len(), 1);
        assert_eq!(over_due[0].heading(), "SO-2210");
        assert_eq!(board.activity_view(ActivityView::Completed, None).len(), 1);
        assert_eq!(board.activity_view(ActivityView::All, Some("PRJ-100")).len(), 2);
    }
}
