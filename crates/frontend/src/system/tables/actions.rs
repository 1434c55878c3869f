//! Async operations of the table browser.
//!
//! Written against [`CollectionApi`] and [`SessionCell`] so the same code
//! drives the page (HTTP + `RwSignal`) and the tests (fake API + `RefCell`).

use async_trait::async_trait;
use contracts::domain::common::EntityId;
use contracts::system::tables::{Collection, Record};
use leptos::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

use super::state::{FormState, TableSession};
use crate::shared::api_utils::ApiError;

pub const CREATED_MESSAGE: &str = "Data berhasil ditambahkan";
pub const UPDATED_MESSAGE: &str = "Data berhasil diperbarui";
pub const DELETED_MESSAGE: &str = "Data berhasil dihapus";
pub const DELETE_PROMPT: &str = "Yakin ingin menghapus data ini?";

#[async_trait(?Send)]
pub trait CollectionApi {
    async fn list(&self, collection: Collection) -> Result<Vec<Record>, ApiError>;
    async fn create(&self, collection: Collection, payload: &Record) -> Result<(), ApiError>;
    async fn update(&self, collection: Collection, id: &EntityId, payload: &Record) -> Result<(), ApiError>;
    async fn delete(&self, collection: Collection, id: &EntityId) -> Result<(), ApiError>;
}

/// Shared handle to a [`TableSession`]. `None` means the owner is gone
/// (page unmounted) and the operation should stop quietly.
pub trait SessionCell {
    fn read<R>(&self, f: impl FnOnce(&TableSession) -> R) -> Option<R>;
    fn write<R>(&self, f: impl FnOnce(&mut TableSession) -> R) -> Option<R>;
}

impl SessionCell for RwSignal<TableSession> {
    fn read<R>(&self, f: impl FnOnce(&TableSession) -> R) -> Option<R> {
        self.try_with_untracked(f)
    }

    fn write<R>(&self, f: impl FnOnce(&mut TableSession) -> R) -> Option<R> {
        self.try_update(f)
    }
}

impl SessionCell for Rc<RefCell<TableSession>> {
    fn read<R>(&self, f: impl FnOnce(&TableSession) -> R) -> Option<R> {
        Some(f(&self.borrow()))
    }

    fn write<R>(&self, f: impl FnOnce(&mut TableSession) -> R) -> Option<R> {
        Some(f(&mut self.borrow_mut()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Loaded(usize),
    Failed(ApiError),
    /// Superseded by a newer load or a collection switch
    Stale,
}

/// Fetch the whole selected collection
pub async fn load<A, S>(api: &A, cell: &S) -> LoadOutcome
where
    A: CollectionApi + ?Sized,
    S: SessionCell,
{
    let Some((ticket, collection)) = cell.write(|s| (s.begin_load(), s.collection)) else {
        return LoadOutcome::Stale;
    };
    let result = api.list(collection).await;
    let count = result.as_ref().map(Vec::len).unwrap_or(0);
    let error = result.as_ref().err().cloned();
    let applied = cell
        .write(|s| s.finish_load(ticket, result.map_err(|e| e.to_string())))
        .unwrap_or(false);
    match (applied, error) {
        (false, _) => LoadOutcome::Stale,
        (true, Some(e)) => LoadOutcome::Failed(e),
        (true, None) => LoadOutcome::Loaded(count),
    }
}

/// Send the open form. Validation errors never reach the network. On
/// failure the form stays open with the draft untouched.
pub async fn submit<A, S>(api: &A, cell: &S) -> Result<&'static str, String>
where
    A: CollectionApi + ?Sized,
    S: SessionCell,
{
    let prepared = cell
        .write(|s| {
            if s.submitting {
                return None;
            }
            let collection = s.collection;
            let target = match &s.form {
                FormState::Closed => return None,
                FormState::Adding(draft) => draft.to_payload().map(|p| (None, p)),
                FormState::Editing { id, draft } => draft.to_payload().map(|p| (Some(id.clone()), p)),
            };
            match target {
                Ok(target) => {
                    s.submitting = true;
                    s.form_error = None;
                    Some(Ok((collection, target)))
                }
                Err(message) => {
                    s.form_error = Some(message.clone());
                    Some(Err(message))
                }
            }
        })
        .flatten();

    let (collection, (id, payload)) = match prepared {
        None => return Err(String::new()),
        Some(Err(message)) => return Err(message),
        Some(Ok(ready)) => ready,
    };

    let result = match &id {
        None => api.create(collection, &payload).await,
        Some(id) => api.update(collection, id, &payload).await,
    };

    match result {
        Ok(()) => {
            cell.write(|s| s.close_form());
            load(api, cell).await;
            Ok(if id.is_none() { CREATED_MESSAGE } else { UPDATED_MESSAGE })
        }
        Err(e) => {
            let message = e.to_string();
            cell.write(|s| {
                s.submitting = false;
                s.form_error = Some(message.clone());
            });
            Err(message)
        }
    }
}

/// Delete one record after `confirm` agrees. `Ok(None)` when declined.
pub async fn delete<A, S, C>(api: &A, cell: &S, id: &EntityId, confirm: C) -> Result<Option<&'static str>, String>
where
    A: CollectionApi + ?Sized,
    S: SessionCell,
    C: FnOnce(&str) -> bool,
{
    if !confirm(DELETE_PROMPT) {
        return Ok(None);
    }
    let Some(collection) = cell.read(|s| s.collection) else {
        return Ok(None);
    };
    match api.delete(collection, id).await {
        Ok(()) => {
            load(api, cell).await;
            Ok(Some(DELETED_MESSAGE))
        }
        Err(e) => Err(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        List(Collection),
        Create(Record),
        Update(EntityId, Record),
        Delete(EntityId),
    }

    #[derive(Default)]
    struct FakeApi {
        calls: RefCell<Vec<Call>>,
        rows: RefCell<Vec<Record>>,
        fail_writes: Option<ApiError>,
    }

    impl FakeApi {
        fn with_rows(rows: Vec<Record>) -> Self {
            Self { rows: RefCell::new(rows), ..Default::default() }
        }

        fn failing(rows: Vec<Record>, error: ApiError) -> Self {
            Self { rows: RefCell::new(rows), fail_writes: Some(error), ..Default::default() }
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.borrow().clone()
        }

        fn write_result(&self) -> Result<(), ApiError> {
            match &self.fail_writes {
                Some(e) => Err(e.clone()),
                None => Ok(()),
            }
        }
    }

    #[async_trait(?Send)]
    impl CollectionApi for FakeApi {
        async fn list(&self, collection: Collection) -> Result<Vec<Record>, ApiError> {
            self.calls.borrow_mut().push(Call::List(collection));
            Ok(self.rows.borrow().clone())
        }

        async fn create(&self, _: Collection, payload: &Record) -> Result<(), ApiError> {
            self.calls.borrow_mut().push(Call::Create(payload.clone()));
            self.write_result()
        }

        async fn update(&self, _: Collection, id: &EntityId, payload: &Record) -> Result<(), ApiError> {
            self.calls.borrow_mut().push(Call::Update(id.clone(), payload.clone()));
            self.write_result()
        }

        async fn delete(&self, _: Collection, id: &EntityId) -> Result<(), ApiError> {
            self.calls.borrow_mut().push(Call::Delete(id.clone()));
            self.write_result()
        }
    }

    fn rec(v: serde_json::Value) -> Record {
        v.as_object().cloned().unwrap_or_default()
    }

    fn services() -> Vec<Record> {
        vec![
            rec(json!({"id": 1, "name": "Sedot Tinja", "base_price": 150000})),
            rec(json!({"id": 2, "name": "Kuras IPAL", "base_price": 300000})),
        ]
    }

    fn loaded(api: &FakeApi) -> Rc<RefCell<TableSession>> {
        let cell = Rc::new(RefCell::new(TableSession::new(Collection::Services)));
        block_on(load(api, &cell));
        cell
    }

    #[test]
    fn test_load_fills_records_and_columns() {
        let api = FakeApi::with_rows(services());
        let cell = Rc::new(RefCell::new(TableSession::new(Collection::Services)));
        assert_eq!(block_on(load(&api, &cell)), LoadOutcome::Loaded(2));
        assert_eq!(cell.borrow().columns, vec!["id", "name", "base_price"]);
        assert_eq!(api.calls(), vec![Call::List(Collection::Services)]);
    }

    #[test]
    fn test_declined_delete_sends_nothing() {
        let api = FakeApi::with_rows(services());
        let cell = loaded(&api);
        let mut asked = None;
        let result = block_on(delete(&api, &cell, &EntityId::from(1), |prompt| {
            asked = Some(prompt.to_string());
            false
        }));
        assert_eq!(result, Ok(None));
        assert_eq!(asked.as_deref(), Some(DELETE_PROMPT));
        assert_eq!(api.calls(), vec![Call::List(Collection::Services)]);
        assert_eq!(cell.borrow().records.len(), 2);
    }

    #[test]
    fn test_confirmed_delete_reloads() {
        let api = FakeApi::with_rows(services());
        let cell = loaded(&api);
        let result = block_on(delete(&api, &cell, &EntityId::from(2), |_| true));
        assert_eq!(result, Ok(Some(DELETED_MESSAGE)));
        assert_eq!(
            api.calls(),
            vec![
                Call::List(Collection::Services),
                Call::Delete(EntityId::from(2)),
                Call::List(Collection::Services),
            ]
        );
    }

    #[test]
    fn test_failed_delete_keeps_record() {
        let error = ApiError::Status { status: 409, message: "Masih dipakai reservasi".into() };
        let api = FakeApi::failing(services(), error);
        let cell = loaded(&api);
        let result = block_on(delete(&api, &cell, &EntityId::from(1), |_| true));
        assert_eq!(result, Err("Masih dipakai reservasi".to_string()));
        assert!(cell.borrow().find(&EntityId::from(1)).is_some());
    }

    #[test]
    fn test_failed_update_keeps_form_and_draft() {
        let error = ApiError::Status { status: 422, message: "Harga tidak valid".into() };
        let api = FakeApi::failing(services(), error);
        let cell = loaded(&api);
        cell.borrow_mut().open_edit(&EntityId::from(1));
        if let Some(d) = cell.borrow_mut().form.draft_mut() {
            d.set_text("name", "Sedot Tinja Plus");
        }
        let before = cell.borrow().form.clone();
        let records_before = cell.borrow().records.clone();

        let result = block_on(submit(&api, &cell));

        assert_eq!(result, Err("Harga tidak valid".to_string()));
        let session = cell.borrow();
        assert_eq!(session.form, before);
        assert_eq!(session.records, records_before);
        let kept = session.find(&EntityId::from(1)).and_then(|r| r.get("name"));
        assert_eq!(kept, Some(&json!("Sedot Tinja")));
        assert_eq!(session.form_error.as_deref(), Some("Harga tidak valid"));
        assert!(!session.submitting);
        assert!(matches!(api.calls().last(), Some(Call::Update(_, _))));
    }

    #[test]
    fn test_successful_create_closes_form_and_reloads() {
        let api = FakeApi::with_rows(services());
        let cell = loaded(&api);
        cell.borrow_mut().open_add();
        if let Some(d) = cell.borrow_mut().form.draft_mut() {
            d.set_text("name", "Inspeksi");
            d.set_text("base_price", "50000");
        }

        let result = block_on(submit(&api, &cell));

        assert_eq!(result, Ok(CREATED_MESSAGE));
        assert!(!cell.borrow().form.is_open());
        let calls = api.calls();
        assert_eq!(
            calls[1],
            Call::Create(rec(json!({"name": "Inspeksi", "base_price": 50000})))
        );
        assert_eq!(calls.last(), Some(&Call::List(Collection::Services)));
    }

    #[test]
    fn test_invalid_draft_sends_nothing() {
        let api = FakeApi::with_rows(services());
        let cell = loaded(&api);
        cell.borrow_mut().open_add();
        if let Some(d) = cell.borrow_mut().form.draft_mut() {
            d.set_text("base_price", "mahal");
        }

        let result = block_on(submit(&api, &cell));

        assert_eq!(result, Err("Kolom base_price harus berupa angka".to_string()));
        assert_eq!(api.calls().len(), 1);
        assert!(cell.borrow().form.is_open());
    }
}
