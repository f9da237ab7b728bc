//! Registro de evento y su forma serializada.
//!
//! Rol en el sistema:
//! - Cada interacción del visitante (visita, click, scroll, etc.) se captura
//!   como un `Record` inmutable con timestamp, kind y sessionId.
//! - El log no interpreta los `fields`: son un mapa abierto clave → escalar
//!   que cada colector llena a su criterio. El enum `RecordKind` define el
//!   contrato observable usado sólo para filtrar en estadísticas.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Tipos de evento soportados. Tags desconocidos en datos persistidos viejos
/// caen en `Other` en lugar de fallar la deserialización (ver el impl manual
/// de `Deserialize` más abajo).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Visit,
    SessionStart,
    Activity,
    PageExit,
    Click,
    FormSubmit,
    ScrollDepth,
    TimeOnPage,
    Other,
}

impl<'de> Deserialize<'de> for RecordKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where D: serde::Deserializer<'de>
    {
        let tag = String::deserialize(deserializer)?;
        Ok(match tag.as_str() {
            "visit" => RecordKind::Visit,
            "session_start" => RecordKind::SessionStart,
            "activity" => RecordKind::Activity,
            "page_exit" => RecordKind::PageExit,
            "click" => RecordKind::Click,
            "form_submit" => RecordKind::FormSubmit,
            "scroll_depth" => RecordKind::ScrollDepth,
            "time_on_page" => RecordKind::TimeOnPage,
            _ => RecordKind::Other,
        })
    }
}

impl RecordKind {
    /// Nombre en el formato de almacenamiento (snake_case).
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Visit => "visit",
            RecordKind::SessionStart => "session_start",
            RecordKind::Activity => "activity",
            RecordKind::PageExit => "page_exit",
            RecordKind::Click => "click",
            RecordKind::FormSubmit => "form_submit",
            RecordKind::ScrollDepth => "scroll_depth",
            RecordKind::TimeOnPage => "time_on_page",
            RecordKind::Other => "other",
        }
    }
}

/// Valor escalar de un campo abierto. Se serializa sin tag: el JSON guarda
/// el literal directamente.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Str(String),
    Num(f64),
    Bool(bool),
}

impl FieldValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_num(&self) -> Option<f64> {
        match self {
            FieldValue::Num(n) => Some(*n),
            _ => None,
        }
    }

    /// Representación plana para export CSV (`true`/`false`, números sin
    /// ceros artificiales).
    pub fn to_cell(&self) -> String {
        match self {
            FieldValue::Str(s) => s.clone(),
            FieldValue::Num(n) => {
                if n.fract() == 0.0 && n.is_finite() {
                    format!("{}", *n as i64)
                } else {
                    format!("{n}")
                }
            }
            FieldValue::Bool(b) => b.to_string(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self { FieldValue::Str(v.to_string()) }
}
impl From<String> for FieldValue {
    fn from(v: String) -> Self { FieldValue::Str(v) }
}
impl From<f64> for FieldValue {
    fn from(v: f64) -> Self { FieldValue::Num(v) }
}
impl From<i64> for FieldValue {
    fn from(v: i64) -> Self { FieldValue::Num(v as f64) }
}
impl From<u8> for FieldValue {
    fn from(v: u8) -> Self { FieldValue::Num(f64::from(v)) }
}
impl From<bool> for FieldValue {
    fn from(v: bool) -> Self { FieldValue::Bool(v) }
}

/// Registro ya sellado por el log. Los `fields` se aplanan al nivel superior
/// del objeto JSON (un registro es un objeto plano, no anidado).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub timestamp: DateTime<Utc>,
    pub kind: RecordKind,
    #[serde(rename = "sessionId")]
    pub session_id: String,
    #[serde(flatten)]
    pub fields: IndexMap<String, FieldValue>,
}

impl Record {
    pub fn field(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    pub fn field_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(FieldValue::as_str)
    }
}

/// Borrador de registro producido por un colector. El timestamp es opcional:
/// si falta, el log lo sella en el momento del append.
#[derive(Debug, Clone)]
pub struct RecordDraft {
    pub kind: RecordKind,
    pub session_id: String,
    pub timestamp: Option<DateTime<Utc>>,
    pub fields: IndexMap<String, FieldValue>,
}

impl RecordDraft {
    pub fn new(kind: RecordKind, session_id: impl Into<String>) -> Self {
        Self { kind,
               session_id: session_id.into(),
               timestamp: None,
               fields: IndexMap::new() }
    }

    /// Agrega un campo abierto (estilo builder).
    pub fn field(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Fija un timestamp explícito (normalmente sólo en tests).
    pub fn at(mut self, ts: DateTime<Utc>) -> Self {
        self.timestamp = Some(ts);
        self
    }

    /// Sella el borrador: usa `now` sólo si el borrador no traía timestamp.
    pub fn stamp(self, now: DateTime<Utc>) -> Record {
        Record { timestamp: self.timestamp.unwrap_or(now),
                 kind: self.kind,
                 session_id: self.session_id,
                 fields: self.fields }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn record_serializes_flat_with_session_id_camel_case() {
        let ts = Utc.with_ymd_and_hms(2025, 3, 1, 10, 0, 0).unwrap();
        let rec = RecordDraft::new(RecordKind::Visit, "session_1_abc")
            .field("path", "/index.html")
            .field("cookieEnabled", true)
            .at(ts)
            .stamp(Utc::now());
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["kind"], "visit");
        assert_eq!(json["sessionId"], "session_1_abc");
        assert_eq!(json["path"], "/index.html");
        assert_eq!(json["cookieEnabled"], true);
        // los fields quedan aplanados, no anidados bajo "fields"
        assert!(json.get("fields").is_none());
    }

    #[test]
    fn unknown_kind_deserializes_to_other() {
        let json = r#"{"timestamp":"2025-03-01T10:00:00Z","kind":"heartbeat","sessionId":"s"}"#;
        let rec: Record = serde_json::from_str(json).unwrap();
        assert_eq!(rec.kind, RecordKind::Other);
    }

    #[test]
    fn stamp_preserves_explicit_timestamp() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let rec = RecordDraft::new(RecordKind::Click, "s").at(ts).stamp(Utc::now());
        assert_eq!(rec.timestamp, ts);
    }

    #[test]
    fn field_value_cell_formats() {
        assert_eq!(FieldValue::from(42i64).to_cell(), "42");
        assert_eq!(FieldValue::from(12.5).to_cell(), "12.5");
        assert_eq!(FieldValue::from(true).to_cell(), "true");
    }
}
