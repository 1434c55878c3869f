//! Edit buffer for one record of an unknown schema.
//!
//! Each field remembers the JSON kind it was seeded from so the payload is
//! sent back with the same types the backend handed out.

use contracts::system::tables::Record;
use serde_json::{Number, Value};

use crate::shared::record_set::is_editable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    Boolean,
    /// Object or array, edited as JSON text
    Json,
}

impl FieldKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Number(_) => FieldKind::Number,
            Value::Bool(_) => FieldKind::Boolean,
            Value::Object(_) | Value::Array(_) => FieldKind::Json,
            Value::Null | Value::String(_) => FieldKind::Text,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DraftField {
    pub name: String,
    pub kind: FieldKind,
    pub text: String,
    pub flag: bool,
    /// Seeded from null; empty text goes back as null
    pub nullable: bool,
}

impl DraftField {
    fn seeded(name: &str, value: Option<&Value>) -> Self {
        let value = value.unwrap_or(&Value::Null);
        let text = match value {
            Value::Null | Value::Bool(_) => String::new(),
            Value::String(s) => s.clone(),
            Value::Object(_) | Value::Array(_) => {
                serde_json::to_string_pretty(value).unwrap_or_default()
            }
            other => other.to_string(),
        };
        Self {
            name: name.to_string(),
            kind: FieldKind::of(value),
            text,
            flag: value.as_bool().unwrap_or(false),
            nullable: value.is_null(),
        }
    }

    fn to_value(&self) -> Result<Value, String> {
        let trimmed = self.text.trim();
        match self.kind {
            FieldKind::Boolean => Ok(Value::Bool(self.flag)),
            FieldKind::Text if self.nullable && self.text.is_empty() => Ok(Value::Null),
            FieldKind::Text => Ok(Value::String(self.text.clone())),
            FieldKind::Number if trimmed.is_empty() => Ok(Value::Null),
            FieldKind::Number => parse_number(trimmed)
                .map(Value::Number)
                .ok_or_else(|| format!("Kolom {} harus berupa angka", self.name)),
            FieldKind::Json if trimmed.is_empty() => Ok(Value::Null),
            FieldKind::Json => serde_json::from_str(trimmed)
                .map_err(|_| format!("Kolom {} harus berupa JSON yang valid", self.name)),
        }
    }
}

fn parse_number(text: &str) -> Option<Number> {
    if let Ok(n) = text.parse::<i64>() {
        return Some(Number::from(n));
    }
    text.parse::<f64>().ok().and_then(Number::from_f64)
}

/// Editable fields of one record, in column order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Draft {
    pub fields: Vec<DraftField>,
}

impl Draft {
    /// Empty buffer for an add form. Kinds follow `sample` (the first loaded
    /// record) but no values are copied from it.
    pub fn blank(columns: &[String], sample: Option<&Record>) -> Self {
        let fields = columns
            .iter()
            .filter(|c| is_editable(c))
            .map(|c| {
                let kind = sample
                    .and_then(|r| r.get(c))
                    .map(FieldKind::of)
                    .unwrap_or(FieldKind::Text);
                DraftField {
                    name: c.clone(),
                    kind,
                    text: String::new(),
                    flag: false,
                    nullable: sample.and_then(|r| r.get(c)).map(Value::is_null).unwrap_or(false),
                }
            })
            .collect();
        Self { fields }
    }

    /// Buffer seeded from an existing record for the edit form
    pub fn from_record(columns: &[String], record: &Record) -> Self {
        let fields = columns
            .iter()
            .filter(|c| is_editable(c))
            .map(|c| DraftField::seeded(c, record.get(c)))
            .collect();
        Self { fields }
    }

    pub fn field(&self, name: &str) -> Option<&DraftField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn set_text(&mut self, name: &str, text: impl Into<String>) {
        if let Some(field) = self.fields.iter_mut().find(|f| f.name == name) {
            field.text = text.into();
        }
    }

    pub fn set_flag(&mut self, name: &str, flag: bool) {
        if let Some(field) = self.fields.iter_mut().find(|f| f.name == name) {
            field.flag = flag;
        }
    }

    /// Request body with every editable field; the first invalid field
    /// aborts with a message for the form.
    pub fn to_payload(&self) -> Result<Record, String> {
        let mut payload = Record::new();
        for field in &self.fields {
            payload.insert(field.name.clone(), field.to_value()?);
        }
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rec(v: Value) -> Record {
        v.as_object().cloned().unwrap_or_default()
    }

    fn columns(record: &Record) -> Vec<String> {
        record.keys().cloned().collect()
    }

    #[test]
    fn test_readonly_fields_are_not_editable() {
        let record = rec(json!({"id": 1, "name": "A", "created_at": "x", "updated_at": "y"}));
        let draft = Draft::from_record(&columns(&record), &record);
        let names: Vec<&str> = draft.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["name"]);
    }

    #[test]
    fn test_payload_keeps_kinds() {
        let record = rec(json!({
            "id": 7, "name": "Sedot", "base_price": 150000, "ratio": 1.5,
            "is_active": true, "meta": {"a": [1, 2]}
        }));
        let draft = Draft::from_record(&columns(&record), &record);
        let payload = draft.to_payload().unwrap();
        assert_eq!(
            Value::Object(payload),
            json!({"name": "Sedot", "base_price": 150000, "ratio": 1.5, "is_active": true, "meta": {"a": [1, 2]}})
        );
    }

    #[test]
    fn test_edits_are_parsed_by_kind() {
        let record = rec(json!({"price": 1, "active": false, "note": "x"}));
        let mut draft = Draft::from_record(&columns(&record), &record);
        draft.set_text("price", " 2500 ");
        draft.set_flag("active", true);
        draft.set_text("note", "");
        let payload = draft.to_payload().unwrap();
        assert_eq!(Value::Object(payload), json!({"price": 2500, "active": true, "note": ""}));
    }

    #[test]
    fn test_invalid_number_and_json_are_rejected() {
        let record = rec(json!({"price": 1, "meta": {}}));
        let mut draft = Draft::from_record(&columns(&record), &record);
        draft.set_text("price", "dua ribu");
        assert_eq!(draft.to_payload(), Err("Kolom price harus berupa angka".to_string()));

        draft.set_text("price", "2");
        draft.set_text("meta", "{oops");
        assert_eq!(draft.to_payload(), Err("Kolom meta harus berupa JSON yang valid".to_string()));
    }

    #[test]
    fn test_null_seeded_empty_text_goes_back_as_null() {
        let record = rec(json!({"notes": null, "price": null}));
        let mut draft = Draft::from_record(&columns(&record), &record);
        assert_eq!(draft.field("notes").map(|f| f.kind), Some(FieldKind::Text));
        let payload = draft.to_payload().unwrap();
        assert_eq!(Value::Object(payload), json!({"notes": null, "price": null}));

        draft.set_text("notes", "pagar biru");
        assert_eq!(draft.to_payload().unwrap()["notes"], json!("pagar biru"));
    }

    #[test]
    fn test_blank_draft_takes_kinds_not_values() {
        let sample = rec(json!({"id": 1, "name": "A", "capacity": 4, "open": true}));
        let draft = Draft::blank(&columns(&sample), Some(&sample));
        let kinds: Vec<(&str, FieldKind, &str)> = draft
            .fields
            .iter()
            .map(|f| (f.name.as_str(), f.kind, f.text.as_str()))
            .collect();
        assert_eq!(
            kinds,
            vec![
                ("name", FieldKind::Text, ""),
                ("capacity", FieldKind::Number, ""),
                ("open", FieldKind::Boolean, ""),
            ]
        );
        let payload = draft.to_payload().unwrap();
        assert_eq!(Value::Object(payload), json!({"name": "", "capacity": null, "open": false}));
    }
}
