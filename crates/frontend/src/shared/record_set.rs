//! Schema-agnostic record sets: column inference, free-text filter, sort and
//! client-side pagination over whatever rows an admin collection returns.
//!
//! The first record of a fetched set defines the columns. Fields that only
//! appear on later records are not shown.

use contracts::system::tables::Record;
use serde_json::Value;
use std::cmp::Ordering;

/// Never shown as a column nor editable
pub const HIDDEN_FIELDS: &[&str] = &["password_hash"];

/// Shown but never editable; assigned by the backend
pub const READONLY_FIELDS: &[&str] = &["id", "created_at", "updated_at"];

pub const PAGE_SIZE_OPTIONS: [usize; 5] = [5, 10, 25, 50, 100];
pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const DEFAULT_SORT_FIELD: &str = "created_at";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn is_ascending(self) -> bool {
        self == SortDirection::Ascending
    }

    fn apply(self, ord: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    }
}

/// Column names of a record set: the key order of the first record, minus
/// hidden fields.
pub fn derive_columns(records: &[Record]) -> Vec<String> {
    records
        .first()
        .map(|first| {
            first
                .keys()
                .filter(|k| !HIDDEN_FIELDS.contains(&k.as_str()))
                .cloned()
                .collect()
        })
        .unwrap_or_default()
}

pub fn is_editable(column: &str) -> bool {
    !READONLY_FIELDS.contains(&column) && !HIDDEN_FIELDS.contains(&column)
}

/// Text form of a value as shown in a cell; `None` for null
pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

/// Records with at least one non-null field whose text contains `query`,
/// case-insensitively. A blank query keeps everything, in order.
pub fn apply_filter<'a, I>(query: &str, records: I) -> Vec<&'a Record>
where
    I: IntoIterator<Item = &'a Record>,
{
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return records.into_iter().collect();
    }
    records
        .into_iter()
        .filter(|record| {
            record
                .values()
                .filter_map(value_text)
                .any(|text| text.to_lowercase().contains(&needle))
        })
        .collect()
}

fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

/// Order two field values. Missing and null values go last whatever the
/// direction; two numbers compare numerically, anything else by text.
pub fn compare_values(a: Option<&Value>, b: Option<&Value>, direction: SortDirection) -> Ordering {
    match (present(a), present(b)) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(x), Some(y)) => {
            let ord = match (x, y) {
                (Value::Number(p), Value::Number(q)) => match (p.as_f64(), q.as_f64()) {
                    (Some(p), Some(q)) => p.partial_cmp(&q).unwrap_or(Ordering::Equal),
                    _ => p.to_string().cmp(&q.to_string()),
                },
                _ => value_text(x).cmp(&value_text(y)),
            };
            direction.apply(ord)
        }
    }
}

/// Stable sort by one field; returns a new sequence
pub fn apply_sort<'a>(records: &[&'a Record], field: &str, direction: SortDirection) -> Vec<&'a Record> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| compare_values(a.get(field), b.get(field), direction));
    sorted
}

/// The `[(page-1)*size, page*size)` slice. Pages are 1-based and not clamped:
/// an out-of-range page yields an empty slice.
pub fn paginate<T>(items: &[T], page_size: usize, page: usize) -> &[T] {
    if page == 0 || page_size == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

pub fn total_pages(count: usize, page_size: usize) -> usize {
    if count == 0 || page_size == 0 {
        1
    } else {
        count.div_ceil(page_size)
    }
}

/// Query, sort and paging state of one table view
#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub query: String,
    pub sort_field: String,
    pub sort_direction: SortDirection,
    pub page_size: usize,
    /// 1-based
    pub page: usize,
}

impl Default for TableView {
    fn default() -> Self {
        Self {
            query: String::new(),
            sort_field: DEFAULT_SORT_FIELD.to_string(),
            sort_direction: SortDirection::Descending,
            page_size: DEFAULT_PAGE_SIZE,
            page: 1,
        }
    }
}

/// Result of running a view over a record set
#[derive(Debug, Clone, PartialEq)]
pub struct ViewSlice<'a> {
    /// Entire filtered set in display order (what CSV export writes)
    pub filtered: Vec<&'a Record>,
    /// Rows of the current page
    pub rows: Vec<&'a Record>,
    pub total_pages: usize,
}

impl TableView {
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.page = 1;
    }

    pub fn set_page_size(&mut self, size: usize) {
        self.page_size = if PAGE_SIZE_OPTIONS.contains(&size) { size } else { DEFAULT_PAGE_SIZE };
        self.page = 1;
    }

    /// Clicking the current sort column flips direction; another column
    /// starts ascending.
    pub fn toggle_sort(&mut self, field: &str) {
        if self.sort_field == field {
            self.sort_direction = self.sort_direction.toggled();
        } else {
            self.sort_field = field.to_string();
            self.sort_direction = SortDirection::Ascending;
        }
    }

    /// Move to `page`, kept within `[1, total_pages]` for `count` rows
    pub fn go_to(&mut self, page: usize, count: usize) {
        self.page = page.clamp(1, total_pages(count, self.page_size));
    }

    /// Reset for a newly selected collection
    pub fn reset(&mut self) {
        self.query.clear();
        self.page = 1;
    }

    pub fn apply<'a>(&self, records: &'a [Record]) -> ViewSlice<'a> {
        let filtered = apply_filter(&self.query, records);
        let filtered = apply_sort(&filtered, &self.sort_field, self.sort_direction);
        let rows = paginate(&filtered, self.page_size, self.page).to_vec();
        ViewSlice {
            total_pages: total_pages(filtered.len(), self.page_size),
            rows,
            filtered,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rec(v: Value) -> Record {
        match v {
            Value::Object(map) => map,
            _ => panic!("test record must be an object"),
        }
    }

    fn numbered(n: usize) -> Vec<Record> {
        (1..=n).map(|i| rec(json!({"id": i, "name": format!("row {}", i)}))).collect()
    }

    #[test]
    fn test_columns_from_first_record_without_password_hash() {
        let records = vec![
            rec(json!({"a": 1, "b": 2, "password_hash": "x"})),
            rec(json!({"a": 3, "b": 4, "c": 5})),
        ];
        assert_eq!(derive_columns(&records), vec!["a", "b"]);
        assert!(derive_columns(&[]).is_empty());
    }

    #[test]
    fn test_columns_keep_first_record_order() {
        let records = vec![rec(json!({"z": 1, "id": 2, "m": 3}))];
        assert_eq!(derive_columns(&records), vec!["z", "id", "m"]);
    }

    #[test]
    fn test_filter_case_insensitive_substring() {
        let records = vec![rec(json!({"name": "Budi"})), rec(json!({"name": "Siti"}))];
        let found = apply_filter("bud", &records);
        assert_eq!(found, vec![&records[0]]);
    }

    #[test]
    fn test_filter_blank_query_keeps_order() {
        let records = numbered(3);
        let found = apply_filter("", &records);
        assert_eq!(found, records.iter().collect::<Vec<_>>());
        assert_eq!(apply_filter("   ", &records).len(), 3);
    }

    #[test]
    fn test_filter_skips_nulls_and_matches_other_kinds() {
        let records = vec![
            rec(json!({"note": null, "n": 42})),
            rec(json!({"note": "null", "active": true})),
            rec(json!({"meta": {"kota": "Bandung"}})),
        ];
        assert_eq!(apply_filter("null", &records), vec![&records[1]]);
        assert_eq!(apply_filter("42", &records), vec![&records[0]]);
        assert_eq!(apply_filter("TRUE", &records), vec![&records[1]]);
        assert_eq!(apply_filter("bandung", &records), vec![&records[2]]);
    }

    #[test]
    fn test_sort_nulls_last_both_directions() {
        let records = vec![rec(json!({"k": 2})), rec(json!({"k": null})), rec(json!({"k": 1}))];
        let refs: Vec<&Record> = records.iter().collect();

        let asc = apply_sort(&refs, "k", SortDirection::Ascending);
        let keys: Vec<&Value> = asc.iter().map(|r| &r["k"]).collect();
        assert_eq!(keys, vec![&json!(1), &json!(2), &Value::Null]);

        let desc = apply_sort(&refs, "k", SortDirection::Descending);
        let keys: Vec<&Value> = desc.iter().map(|r| &r["k"]).collect();
        assert_eq!(keys, vec![&json!(2), &json!(1), &Value::Null]);
    }

    #[test]
    fn test_sort_missing_field_last_and_input_untouched() {
        let records = vec![rec(json!({"x": 1})), rec(json!({"k": "b"})), rec(json!({"k": "a"}))];
        let refs: Vec<&Record> = records.iter().collect();
        let sorted = apply_sort(&refs, "k", SortDirection::Descending);
        assert_eq!(sorted, vec![&records[1], &records[2], &records[0]]);
        assert_eq!(refs, records.iter().collect::<Vec<_>>());
    }

    #[test]
    fn test_sort_numbers_numerically_and_stably() {
        let records = vec![
            rec(json!({"k": 10, "tag": "first"})),
            rec(json!({"k": 9})),
            rec(json!({"k": 10, "tag": "second"})),
        ];
        let refs: Vec<&Record> = records.iter().collect();
        let asc = apply_sort(&refs, "k", SortDirection::Ascending);
        assert_eq!(asc, vec![&records[1], &records[0], &records[2]]);
    }

    #[test]
    fn test_paginate_25_rows_by_10() {
        let records = numbered(25);
        let sizes: Vec<usize> = (1..=total_pages(records.len(), 10))
            .map(|p| paginate(&records, 10, p).len())
            .collect();
        assert_eq!(sizes, vec![10, 10, 5]);
        let last = paginate(&records, 10, 3);
        assert_eq!(last, &records[20..25]);
    }

    #[test]
    fn test_paginate_out_of_range_is_empty() {
        let records = numbered(5);
        assert!(paginate(&records, 10, 2).is_empty());
        assert!(paginate(&records, 10, 0).is_empty());
        assert_eq!(total_pages(0, 10), 1);
    }

    #[test]
    fn test_query_change_resets_page() {
        let records = numbered(50);
        let mut view = TableView::default();
        view.go_to(4, records.len());
        assert_eq!(view.page, 4);
        view.set_query("row");
        assert_eq!(view.page, 1);
        assert!(!view.apply(&records).rows.is_empty());
    }

    #[test]
    fn test_page_size_change_resets_page() {
        let mut view = TableView::default();
        view.go_to(3, 100);
        view.set_page_size(25);
        assert_eq!((view.page_size, view.page), (25, 1));
        view.set_page_size(7);
        assert_eq!(view.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_go_to_clamps() {
        let mut view = TableView::default();
        view.go_to(9, 25);
        assert_eq!(view.page, 3);
        view.go_to(0, 25);
        assert_eq!(view.page, 1);
    }

    #[test]
    fn test_toggle_sort() {
        let mut view = TableView::default();
        assert_eq!(view.sort_field, "created_at");
        assert_eq!(view.sort_direction, SortDirection::Descending);
        view.toggle_sort("created_at");
        assert_eq!(view.sort_direction, SortDirection::Ascending);
        view.toggle_sort("name");
        assert_eq!((view.sort_field.as_str(), view.sort_direction), ("name", SortDirection::Ascending));
    }

    #[test]
    fn test_apply_defaults_newest_first() {
        let records = vec![
            rec(json!({"id": 1, "created_at": "2026-01-01"})),
            rec(json!({"id": 2, "created_at": "2026-03-01"})),
            rec(json!({"id": 3, "created_at": null})),
        ];
        let slice = TableView::default().apply(&records);
        let ids: Vec<&Value> = slice.rows.iter().map(|r| &r["id"]).collect();
        assert_eq!(ids, vec![&json!(2), &json!(1), &json!(3)]);
        assert_eq!(slice.filtered.len(), 3);
        assert_eq!(slice.total_pages, 1);
    }
}
