use contracts::domain::common::EntityId;
use contracts::system::tables::{Collection, Record};

use super::draft::Draft;
use crate::shared::poll::{PollGuard, Ticket};
use crate::shared::record_set::{derive_columns, TableView, ViewSlice};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    LoadFailed(String),
}

/// Add and edit forms are mutually exclusive
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FormState {
    #[default]
    Closed,
    Adding(Draft),
    Editing { id: EntityId, draft: Draft },
}

impl FormState {
    pub fn draft(&self) -> Option<&Draft> {
        match self {
            FormState::Closed => None,
            FormState::Adding(draft) | FormState::Editing { draft, .. } => Some(draft),
        }
    }

    pub fn draft_mut(&mut self) -> Option<&mut Draft> {
        match self {
            FormState::Closed => None,
            FormState::Adding(draft) | FormState::Editing { draft, .. } => Some(draft),
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, FormState::Closed)
    }
}

/// Everything the table browser holds for the selected collection
#[derive(Debug, Clone, PartialEq)]
pub struct TableSession {
    pub collection: Collection,
    pub records: Vec<Record>,
    pub columns: Vec<String>,
    pub view: TableView,
    pub load: LoadState,
    pub form: FormState,
    pub form_error: Option<String>,
    pub submitting: bool,
    guard: PollGuard,
}

pub fn record_id(record: &Record) -> Option<EntityId> {
    record
        .get("id")
        .filter(|v| !v.is_null())
        .and_then(|v| serde_json::from_value(v.clone()).ok())
}

impl TableSession {
    pub fn new(collection: Collection) -> Self {
        Self {
            collection,
            records: Vec::new(),
            columns: Vec::new(),
            view: TableView::default(),
            load: LoadState::Idle,
            form: FormState::Closed,
            form_error: None,
            submitting: false,
            guard: PollGuard::new(),
        }
    }

    /// Switch collections: drop everything held for the old one. Any load
    /// still in flight for it becomes stale.
    pub fn select_collection(&mut self, collection: Collection) {
        self.guard.invalidate();
        self.collection = collection;
        self.records.clear();
        self.columns.clear();
        self.view.reset();
        self.load = LoadState::Idle;
        self.close_form();
    }

    pub fn begin_load(&mut self) -> Ticket {
        self.load = LoadState::Loading;
        self.guard.issue()
    }

    /// Apply a finished load. Returns `false` when a newer load or a
    /// collection switch superseded it; the result is then dropped.
    pub fn finish_load(&mut self, ticket: Ticket, result: Result<Vec<Record>, String>) -> bool {
        if !self.guard.is_current(ticket) {
            log::debug!("Discarding stale {} load ({:?})", self.collection.path(), ticket);
            return false;
        }
        match result {
            Ok(records) => {
                self.columns = derive_columns(&records);
                self.records = records;
                self.load = LoadState::Loaded;
                let count = self.slice().filtered.len();
                self.view.go_to(self.view.page, count);
            }
            Err(message) => {
                log::warn!("Failed to load {}: {}", self.collection.path(), message);
                self.load = LoadState::LoadFailed(message);
            }
        }
        true
    }

    pub fn is_loading(&self) -> bool {
        self.load == LoadState::Loading
    }

    /// No rows to show: nothing loaded or the last load failed
    pub fn shows_empty_state(&self) -> bool {
        matches!(self.load, LoadState::LoadFailed(_)) || self.records.is_empty()
    }

    /// Rows as displayed. Records kept from before a failed load stay
    /// hidden, so the badge, pager and CSV export see none of them.
    pub fn slice(&self) -> ViewSlice<'_> {
        if matches!(self.load, LoadState::LoadFailed(_)) {
            return self.view.apply(&[]);
        }
        self.view.apply(&self.records)
    }

    pub fn open_add(&mut self) {
        self.form = FormState::Adding(Draft::blank(&self.columns, self.records.first()));
        self.form_error = None;
    }

    pub fn open_edit(&mut self, id: &EntityId) -> bool {
        let Some(record) = self.find(id) else {
            return false;
        };
        let draft = Draft::from_record(&self.columns, record);
        self.form = FormState::Editing { id: id.clone(), draft };
        self.form_error = None;
        true
    }

    pub fn close_form(&mut self) {
        self.form = FormState::Closed;
        self.form_error = None;
        self.submitting = false;
    }

    pub fn find(&self, id: &EntityId) -> Option<&Record> {
        self.records.iter().find(|r| record_id(r).as_ref() == Some(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::export::{export_csv, EMPTY_EXPORT_MESSAGE};
    use serde_json::json;

    fn rec(v: serde_json::Value) -> Record {
        v.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_stale_load_after_switch_is_dropped() {
        let mut session = TableSession::new(Collection::Users);
        let ticket = session.begin_load();
        session.select_collection(Collection::Services);
        let applied = session.finish_load(ticket, Ok(vec![rec(json!({"id": 1, "full_name": "A"}))]));
        assert!(!applied);
        assert!(session.records.is_empty());
        assert!(session.columns.is_empty());
    }

    #[test]
    fn test_failed_load_keeps_records_but_shows_empty_state() {
        let mut session = TableSession::new(Collection::Services);
        let t = session.begin_load();
        session.finish_load(t, Ok(vec![rec(json!({"id": 1, "name": "Sedot"}))]));
        assert!(!session.shows_empty_state());

        let t = session.begin_load();
        session.finish_load(t, Err("HTTP 500".into()));
        assert_eq!(session.records.len(), 1);
        assert!(session.shows_empty_state());
    }

    #[test]
    fn test_failed_load_hides_kept_records_from_view() {
        let mut session = TableSession::new(Collection::Services);
        let t = session.begin_load();
        session.finish_load(t, Ok(vec![rec(json!({"id": 1, "name": "Sedot"}))]));
        assert_eq!(session.slice().filtered.len(), 1);

        let t = session.begin_load();
        session.finish_load(t, Err("HTTP 500".into()));
        let slice = session.slice();
        assert!(slice.filtered.is_empty());
        assert!(slice.rows.is_empty());
        let today = chrono::NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert_eq!(
            export_csv(&session.columns, &slice.filtered, session.collection.label(), today),
            Err(EMPTY_EXPORT_MESSAGE.to_string())
        );

        let t = session.begin_load();
        session.finish_load(t, Ok(vec![rec(json!({"id": 2, "name": "Kuras"}))]));
        assert_eq!(session.slice().filtered.len(), 1);
    }

    #[test]
    fn test_empty_load_clears_columns() {
        let mut session = TableSession::new(Collection::Services);
        let t = session.begin_load();
        session.finish_load(t, Ok(vec![rec(json!({"id": 1, "name": "Sedot"}))]));
        assert_eq!(session.columns, vec!["id", "name"]);
        let t = session.begin_load();
        session.finish_load(t, Ok(vec![]));
        assert!(session.columns.is_empty());
    }

    #[test]
    fn test_reload_clamps_page_after_rows_vanish() {
        let mut session = TableSession::new(Collection::Users);
        let rows: Vec<Record> = (1..=11).map(|i| rec(json!({"id": i}))).collect();
        let t = session.begin_load();
        session.finish_load(t, Ok(rows.clone()));
        session.view.go_to(2, 11);
        let t = session.begin_load();
        session.finish_load(t, Ok(rows[..10].to_vec()));
        assert_eq!(session.view.page, 1);
    }

    #[test]
    fn test_forms_are_exclusive() {
        let mut session = TableSession::new(Collection::Users);
        let t = session.begin_load();
        session.finish_load(t, Ok(vec![rec(json!({"id": "u-1", "full_name": "Siti"}))]));
        session.open_add();
        assert!(matches!(session.form, FormState::Adding(_)));
        assert!(session.open_edit(&EntityId::from("u-1")));
        assert!(matches!(session.form, FormState::Editing { .. }));
        assert!(!session.open_edit(&EntityId::from("missing")));
        session.close_form();
        assert!(!session.form.is_open());
    }
}
