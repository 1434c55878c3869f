//! CSV export of the filtered record set
use chrono::NaiveDate;
use contracts::system::tables::Record;
use serde_json::Value;
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

pub const EMPTY_EXPORT_MESSAGE: &str = "Tidak ada data untuk diekspor";

/// Header label of a column: uppercased, `_` shown as a space
pub fn header_label(column: &str) -> String {
    column.replace('_', " ").to_uppercase()
}

/// Text written into a CSV cell for one field value
pub fn csv_cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::Bool(true)) => "TRUE".to_string(),
        Some(Value::Bool(false)) => "FALSE".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn quote(cell: &str) -> String {
    format!("\"{}\"", cell.replace('"', "\"\""))
}

/// Serialize `records` over `columns`. Every field is quoted, rows end in `\n`.
pub fn build_csv(columns: &[String], records: &[&Record]) -> String {
    let mut out = String::new();

    let header: Vec<String> = columns.iter().map(|c| quote(&header_label(c))).collect();
    out.push_str(&header.join(","));
    out.push('\n');

    for record in records {
        let row: Vec<String> = columns
            .iter()
            .map(|c| quote(&csv_cell(record.get(c))))
            .collect();
        out.push_str(&row.join(","));
        out.push('\n');
    }
    out
}

pub fn csv_filename(label: &str, date: NaiveDate) -> String {
    format!("{}_{}.csv", label.replace(' ', "_"), date.format("%Y-%m-%d"))
}

/// Build the CSV and hand it to the browser as a download.
/// An empty set produces no file.
pub fn export_csv(
    columns: &[String],
    records: &[&Record],
    label: &str,
    today: NaiveDate,
) -> Result<String, String> {
    if records.is_empty() {
        return Err(EMPTY_EXPORT_MESSAGE.to_string());
    }
    let content = build_csv(columns, records);
    let filename = csv_filename(label, today);

    let blob = create_csv_blob(&content)?;
    download_blob(&blob, &filename)?;

    log::info!("exported {} rows to {}", records.len(), filename);
    Ok(filename)
}

fn create_csv_blob(content: &str) -> Result<Blob, String> {
    let array = js_sys::Array::new();
    array.push(&wasm_bindgen::JsValue::from_str(content));

    let properties = BlobPropertyBag::new();
    properties.set_type("text/csv;charset=utf-8;");

    Blob::new_with_str_sequence_and_options(&array, &properties)
        .map_err(|e| format!("Failed to create blob: {:?}", e))
}

fn download_blob(blob: &Blob, filename: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("No window object")?;
    let document = window.document().ok_or("No document object")?;
    let body = document.body().ok_or("No body element")?;

    let url = Url::create_object_url_with_blob(blob)
        .map_err(|e| format!("Failed to create object URL: {:?}", e))?;

    let anchor = document
        .create_element("a")
        .map_err(|e| format!("Failed to create anchor: {:?}", e))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|e| format!("Failed to cast to anchor: {:?}", e))?;

    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor
        .style()
        .set_property("display", "none")
        .map_err(|e| format!("Failed to set style: {:?}", e))?;

    body.append_child(&anchor)
        .map_err(|e| format!("Failed to append anchor: {:?}", e))?;
    anchor.click();
    body.remove_child(&anchor)
        .map_err(|e| format!("Failed to remove anchor: {:?}", e))?;

    Url::revoke_object_url(&url).map_err(|e| format!("Failed to revoke URL: {:?}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rec(v: Value) -> Record {
        v.as_object().cloned().unwrap_or_default()
    }

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_row_quoting_by_value_kind() {
        let record = rec(json!({"id": 1, "active": true, "notes": null, "meta": {"x": 1}}));
        let csv = build_csv(&cols(&["id", "active", "notes", "meta"]), &[&record]);
        let row = csv.lines().nth(1).unwrap_or_default();
        assert_eq!(row, r#""1","TRUE","","{""x"":1}""#);
    }

    #[test]
    fn test_header_uppercased_with_spaces() {
        let record = rec(json!({"full_name": "Budi", "created_at": "2026-01-01"}));
        let csv = build_csv(&cols(&["full_name", "created_at"]), &[&record]);
        assert!(csv.starts_with("\"FULL NAME\",\"CREATED AT\"\n"));
        assert!(csv.ends_with('\n'));
    }

    #[test]
    fn test_embedded_quotes_and_missing_fields() {
        let record = rec(json!({"name": "Tangki \"besar\""}));
        let csv = build_csv(&cols(&["name", "absent"]), &[&record]);
        assert_eq!(csv.lines().nth(1), Some(r#""Tangki ""besar""","""#));
    }

    #[test]
    fn test_rows_follow_given_order() {
        let a = rec(json!({"id": 2}));
        let b = rec(json!({"id": 1}));
        let csv = build_csv(&cols(&["id"]), &[&a, &b]);
        let rows: Vec<&str> = csv.lines().skip(1).collect();
        assert_eq!(rows, vec!["\"2\"", "\"1\""]);
    }

    #[test]
    fn test_empty_set_is_rejected_without_file() {
        let today = NaiveDate::from_ymd_opt(2026, 5, 1).unwrap_or_default();
        let result = export_csv(&cols(&["id"]), &[], "Reservasi", today);
        assert_eq!(result, Err(EMPTY_EXPORT_MESSAGE.to_string()));
    }

    #[test]
    fn test_filename() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 9).unwrap_or_default();
        assert_eq!(csv_filename("Reservasi", date), "Reservasi_2026-03-09.csv");
        assert_eq!(
            csv_filename("Template Notifikasi", date),
            "Template_Notifikasi_2026-03-09.csv"
        );
    }
}
