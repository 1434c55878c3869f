use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::common::EntityId;

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*\}\}").expect("valid placeholder regex"));

/// Template pesan WhatsApp yang dipakai untuk broadcast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationTemplate {
    pub id: EntityId,
    pub name: String,
    pub body: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TemplateDto {
    pub name: String,
    pub body: String,
    pub is_active: bool,
}

impl TemplateDto {
    pub fn from_template(t: &NotificationTemplate) -> Self {
        Self {
            name: t.name.clone(),
            body: t.body.clone(),
            is_active: t.is_active,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Nama template wajib diisi".into());
        }
        if self.body.trim().is_empty() {
            return Err("Isi pesan wajib diisi".into());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BroadcastRequest {
    pub template_id: EntityId,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BroadcastResponse {
    #[serde(default)]
    pub sent: u32,
    #[serde(default)]
    pub failed: u32,
}

/// Names of the `{{placeholder}}` variables used in a template body, in
/// first-appearance order.
pub fn placeholders(body: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for caps in PLACEHOLDER.captures_iter(body) {
        let name = caps[1].to_string();
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names
}

/// Substitute `{{name}}` placeholders. Unknown placeholders stay verbatim so
/// the preview shows what the backend will have to fill in.
pub fn render_template(body: &str, vars: &BTreeMap<String, String>) -> String {
    PLACEHOLDER
        .replace_all(body, |caps: &Captures| match vars.get(&caps[1]) {
            Some(value) => value.clone(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_known_and_unknown() {
        let mut vars = BTreeMap::new();
        vars.insert("name".to_string(), "Budi".to_string());
        let out = render_template("Halo {{ name }}, jadwal Anda {{date}}.", &vars);
        assert_eq!(out, "Halo Budi, jadwal Anda {{date}}.");
    }

    #[test]
    fn test_placeholders_dedup_in_order() {
        assert_eq!(
            placeholders("{{b}} {{a}} {{ b }} {{1bad}}"),
            vec!["b".to_string(), "a".to_string()]
        );
    }

    #[test]
    fn test_dto_validation() {
        let dto = TemplateDto { name: "Pengingat".into(), body: " ".into(), is_active: true };
        assert_eq!(dto.validate().unwrap_err(), "Isi pesan wajib diisi");
    }
}
