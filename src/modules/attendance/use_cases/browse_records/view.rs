// Attendance list screen, without the pixels.
//
// Purpose
// - Render the store's snapshots as rows and turn user gestures (search, add, edit, delete,
//   quick-edit) into store calls.
//
// Responsibilities
// - Every snapshot the store publishes replaces the rows. The view never edits the store's
//   list; it submits intents and waits for the next publish. A successful quick-edit commits
//   its own values to the edited row because the user is looking at that row.
// - The view's own renders (reload, search result, quick-edit commit) go through the same
//   task that forwards snapshots, and mark every publish already received as seen. A
//   snapshot published before a render can never overwrite it.
// - Report the result of every flow as a notice.
// - Stop receiving snapshots on teardown, so a discarded view is never updated.

use crate::modules::attendance::core::entry_fields::{EntryFields, FieldError};
use crate::modules::attendance::core::record::{AttendanceDraft, AttendanceRecord};
use crate::modules::attendance::core::search_criteria::SearchCriteria;
use crate::modules::attendance::use_cases::browse_records::dialogs_port::{AttendanceDialogs, FormMode};
use crate::modules::attendance::use_cases::synchronize_records::api_port::AttendanceApi;
use crate::modules::attendance::use_cases::synchronize_records::store::AttendanceStore;
use crate::shared::core::flow_outcome::FlowOutcome;
use crate::shared::core::user_facing_error::UserFacingError;
use crate::shared::infrastructure::notifications::{DEFAULT_NOTICE_DURATION, Notice, Notifier};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, mpsc, oneshot, watch};
use tracing::debug;

pub const DELETE_QUESTION: &str = "Are you sure you want to delete this attendance record?";

pub type AttendanceOutcome = FlowOutcome<FieldError>;

/// Receives the rows on screen and the store's latest snapshot.
type RowsChange = Box<dyn FnOnce(&mut Vec<AttendanceRecord>, &[AttendanceRecord]) + Send>;

struct RenderRequest {
    change: RowsChange,
    done: oneshot::Sender<()>,
}

pub struct AttendanceView<TApi>
where
    TApi: AttendanceApi + ?Sized + 'static,
{
    store: Arc<AttendanceStore<TApi>>,
    notifier: Arc<dyn Notifier>,
    notice_duration: Duration,
    rows: Arc<watch::Sender<Vec<AttendanceRecord>>>,
    criteria: Mutex<SearchCriteria>,
    editing: Mutex<HashMap<String, EntryFields>>,
    renders: mpsc::UnboundedSender<RenderRequest>,
    teardown: watch::Sender<bool>,
}

impl<TApi> AttendanceView<TApi>
where
    TApi: AttendanceApi + ?Sized + 'static,
{
    /// Subscribes to `store`. Must be called inside a tokio runtime.
    pub fn attach(store: Arc<AttendanceStore<TApi>>, notifier: Arc<dyn Notifier>) -> Self {
        let updates = store.subscribe();
        let rows = Arc::new(watch::Sender::new(updates.borrow().clone()));
        let (renders, pending_renders) = mpsc::unbounded_channel();
        let (teardown, stopped) = watch::channel(false);
        tokio::spawn(forward_snapshots(updates, rows.clone(), pending_renders, stopped));

        Self {
            store,
            notifier,
            notice_duration: DEFAULT_NOTICE_DURATION,
            rows,
            criteria: Mutex::new(SearchCriteria::default()),
            editing: Mutex::new(HashMap::new()),
            renders,
            teardown,
        }
    }

    pub fn with_notice_duration(mut self, duration: Duration) -> Self {
        self.notice_duration = duration;
        self
    }

    pub fn rows(&self) -> Vec<AttendanceRecord> {
        self.rows.borrow().clone()
    }

    /// Observes what is on screen.
    pub fn rendered(&self) -> watch::Receiver<Vec<AttendanceRecord>> {
        self.rows.subscribe()
    }

    pub async fn criteria(&self) -> SearchCriteria {
        self.criteria.lock().await.clone()
    }

    /// Stops delivery of further snapshots. Also happens on drop.
    pub fn teardown(&self) {
        self.teardown.send_replace(true);
    }

    /// First render: the unfiltered list.
    pub async fn init(&self) -> usize {
        self.show_all().await
    }

    /// Filters the current list when a bound is set, otherwise reloads everything.
    pub async fn search(&self, criteria: SearchCriteria) -> usize {
        *self.criteria.lock().await = criteria.clone();
        if criteria.is_empty() {
            return self.show_all().await;
        }

        let found = self.store.search(&criteria);
        let count = found.len();
        self.render(move |rows, _| *rows = found).await;
        self.notify(Notice::info(format!("Found {count} record(s)")));
        count
    }

    pub async fn clear_search(&self) -> usize {
        *self.criteria.lock().await = SearchCriteria::default();
        let count = self.show_all().await;
        self.notify(Notice::info("Search cleared"));
        count
    }

    pub async fn open_add_dialog(&self, dialogs: &dyn AttendanceDialogs) -> AttendanceOutcome {
        let Some(fields) = dialogs.open_form(FormMode::Create).await else {
            return FlowOutcome::Cancelled;
        };
        let draft = match self.validate(&fields) {
            Ok(draft) => draft,
            Err(errors) => return FlowOutcome::Invalid(errors),
        };
        match self.store.add(draft).await {
            Ok(_) => self.succeeded("Attendance record added successfully!"),
            Err(err) => self.failed(err),
        }
    }

    pub async fn open_update_dialog(
        &self,
        dialogs: &dyn AttendanceDialogs,
        record: &AttendanceRecord,
    ) -> AttendanceOutcome {
        let Some(fields) = dialogs.open_form(FormMode::Update(record.clone())).await else {
            return FlowOutcome::Cancelled;
        };
        let draft = match self.validate(&fields) {
            Ok(draft) => draft,
            Err(errors) => return FlowOutcome::Invalid(errors),
        };
        match self.store.update(&record.id, draft).await {
            Ok(_) => self.succeeded("Attendance record updated successfully!"),
            Err(err) => self.failed(err),
        }
    }

    pub async fn delete_record(&self, dialogs: &dyn AttendanceDialogs, id: &str) -> AttendanceOutcome {
        if !dialogs.confirm(DELETE_QUESTION).await {
            return FlowOutcome::Cancelled;
        }
        match self.store.delete(id).await {
            Ok(()) => self.succeeded("Attendance record deleted successfully!"),
            Err(err) => self.failed(err),
        }
    }

    /// Puts the row `id` into quick-edit with a copy of its editable fields. Returns `false`
    /// when no such row is displayed.
    pub async fn start_quick_edit(&self, id: &str) -> bool {
        let fields = {
            let rows = self.rows.borrow();
            rows.iter().find(|row| row.id == id).map(EntryFields::from)
        };
        let Some(fields) = fields else {
            return false;
        };
        self.editing.lock().await.insert(id.to_string(), fields);
        true
    }

    /// Changes the shadow copy only; the row keeps its values until the save succeeds.
    pub async fn edit_quick_fields(&self, id: &str, change: impl FnOnce(&mut EntryFields)) -> bool {
        match self.editing.lock().await.get_mut(id) {
            Some(fields) => {
                change(fields);
                true
            }
            None => false,
        }
    }

    pub async fn quick_edit_fields(&self, id: &str) -> Option<EntryFields> {
        self.editing.lock().await.get(id).cloned()
    }

    pub async fn is_editing(&self, id: &str) -> bool {
        self.editing.lock().await.contains_key(id)
    }

    pub async fn cancel_quick_edit(&self, id: &str) {
        self.editing.lock().await.remove(id);
    }

    /// Validates the shadow copy and sends it. Editing state survives a failed save.
    pub async fn save_quick_edit(&self, id: &str) -> AttendanceOutcome {
        let Some(fields) = self.quick_edit_fields(id).await else {
            return FlowOutcome::Cancelled;
        };
        let draft = match self.validate(&fields) {
            Ok(draft) => draft,
            Err(errors) => return FlowOutcome::Invalid(errors),
        };
        match self.store.update(id, draft.clone()).await {
            Ok(_) => {
                self.commit_row(id, draft).await;
                self.editing.lock().await.remove(id);
                self.succeeded("Attendance record updated successfully!")
            }
            Err(err) => self.failed(err),
        }
    }

    async fn show_all(&self) -> usize {
        match self.store.load().await {
            Ok(records) => {
                let count = records.len();
                self.render(|rows, latest| *rows = latest.to_vec()).await;
                count
            }
            Err(err) => {
                self.notify(Notice::error(err.message()));
                0
            }
        }
    }

    async fn commit_row(&self, id: &str, draft: AttendanceDraft) {
        let id = id.to_string();
        self.render(move |rows, _| {
            if let Some(row) = rows.iter_mut().find(|row| row.id == id) {
                row.apply(&draft);
            }
        })
        .await;
    }

    /// Applies `change` to the rows once every publish received so far counts as seen.
    /// Returns after the change is visible.
    async fn render(
        &self,
        change: impl FnOnce(&mut Vec<AttendanceRecord>, &[AttendanceRecord]) + Send + 'static,
    ) {
        let (done, rendered) = oneshot::channel();
        let request = RenderRequest {
            change: Box::new(change),
            done,
        };
        match self.renders.send(request) {
            Ok(()) => {
                let _ = rendered.await;
            }
            Err(mpsc::error::SendError(request)) => {
                let latest = self.store.snapshot();
                self.rows.send_modify(|rows| (request.change)(rows, &latest));
            }
        }
    }

    fn validate(&self, fields: &EntryFields) -> Result<AttendanceDraft, Vec<FieldError>> {
        fields.validate().inspect_err(|errors| {
            for error in errors {
                self.notify(Notice::error(error.to_string()));
            }
        })
    }

    fn succeeded(&self, message: &str) -> AttendanceOutcome {
        self.notify(Notice::success(message));
        FlowOutcome::Completed
    }

    fn failed(&self, err: UserFacingError) -> AttendanceOutcome {
        self.notify(Notice::error(err.message()));
        FlowOutcome::Failed(err)
    }

    fn notify(&self, notice: Notice) {
        self.notifier.show(notice.with_duration(self.notice_duration));
    }
}

impl<TApi> Drop for AttendanceView<TApi>
where
    TApi: AttendanceApi + ?Sized + 'static,
{
    fn drop(&mut self) {
        self.teardown();
    }
}

async fn forward_snapshots(
    mut updates: watch::Receiver<Vec<AttendanceRecord>>,
    rows: Arc<watch::Sender<Vec<AttendanceRecord>>>,
    mut renders: mpsc::UnboundedReceiver<RenderRequest>,
    mut stopped: watch::Receiver<bool>,
) {
    loop {
        tokio::select! {
            biased;
            _ = stopped.wait_for(|stopped| *stopped) => break,
            Some(request) = renders.recv() => apply_render(&mut updates, &rows, request),
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = updates.borrow_and_update().clone();
                rows.send_replace(snapshot);
            }
        }
    }

    renders.close();
    while let Ok(request) = renders.try_recv() {
        apply_render(&mut updates, &rows, request);
    }
    debug!("attendance view detached from store");
}

fn apply_render(
    updates: &mut watch::Receiver<Vec<AttendanceRecord>>,
    rows: &watch::Sender<Vec<AttendanceRecord>>,
    request: RenderRequest,
) {
    let latest = updates.borrow_and_update().clone();
    rows.send_modify(|rows| (request.change)(rows, &latest));
    let _ = request.done.send(());
}
