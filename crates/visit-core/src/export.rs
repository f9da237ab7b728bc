//! Export del log a artefactos de transferencia (JSON / CSV).
//!
//! El export es de sólo lectura: arma un artefacto autocontenido con fecha de
//! export y conteo, sin mutar el log. Escribirlo a disco es el análogo de la
//! descarga del navegador y, a diferencia del resto del subsistema, sus
//! fallos SÍ se devuelven al caller (exportar es una acción deliberada).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use visit_domain::Record;

use crate::constants::EXPORT_FILE_PREFIX;
use crate::errors::LogError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub fn parse(s: &str) -> Result<Self, LogError> {
        match s {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(LogError::UnknownFormat(other.to_string())),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }
}

/// Artefacto JSON autocontenido (`exportDate` / `totalLogs` / `logs`).
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonExport {
    #[serde(rename = "exportDate")]
    pub export_date: DateTime<Utc>,
    #[serde(rename = "totalLogs")]
    pub total_logs: usize,
    pub logs: Vec<Record>,
}

pub fn json_artifact(records: &[Record]) -> JsonExport {
    JsonExport { export_date: Utc::now(),
                 total_logs: records.len(),
                 logs: records.to_vec() }
}

/// Columnas fijas del CSV.
pub const CSV_HEADERS: [&str; 17] = ["Timestamp",
                                     "Date",
                                     "Time",
                                     "Page",
                                     "Path",
                                     "Referrer",
                                     "User Agent",
                                     "Language",
                                     "Timezone",
                                     "Screen Resolution",
                                     "Viewport Size",
                                     "Connection Type",
                                     "Cookie Enabled",
                                     "Online Status",
                                     "Session ID",
                                     "Action",
                                     "Time on Page"];

/// Renderiza el artefacto como texto. JSON va pretty-printed (indent 2);
/// CSV usa las columnas fijas de `CSV_HEADERS`.
pub fn render(records: &[Record], format: ExportFormat) -> Result<String, LogError> {
    match format {
        ExportFormat::Json => {
            let artifact = json_artifact(records);
            serde_json::to_string_pretty(&artifact).map_err(|e| LogError::Internal(format!("serialize export: {e}")))
        }
        ExportFormat::Csv => Ok(render_csv(records)),
    }
}

fn render_csv(records: &[Record]) -> String {
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(CSV_HEADERS.join(","));
    for rec in records {
        lines.push(csv_row(rec));
    }
    lines.join("\n")
}

/// Neutraliza separadores embebidos en campos de texto libre. Sustitución
/// deliberadamente lossy (coma → punto y coma) en lugar de quoting CSV
/// completo.
fn sanitize_cell(value: &str) -> String {
    value.replace(',', ";")
}

fn field_cell(rec: &Record, key: &str) -> String {
    rec.field(key).map(|v| v.to_cell()).unwrap_or_default()
}

fn csv_row(rec: &Record) -> String {
    let time_on_page = rec.field("timeOnPage")
                          .or_else(|| rec.field("duration"))
                          .map(|v| v.to_cell())
                          .unwrap_or_default();
    let cells = [rec.timestamp.to_rfc3339(),
                 rec.timestamp.format("%Y-%m-%d").to_string(),
                 rec.timestamp.format("%H:%M:%S").to_string(),
                 field_cell(rec, "page"),
                 field_cell(rec, "path"),
                 sanitize_cell(&field_cell(rec, "referrer")),
                 sanitize_cell(&field_cell(rec, "userAgent")),
                 field_cell(rec, "language"),
                 field_cell(rec, "timezone"),
                 field_cell(rec, "screenResolution"),
                 field_cell(rec, "viewportSize"),
                 field_cell(rec, "connectionType"),
                 field_cell(rec, "cookieEnabled"),
                 field_cell(rec, "onlineStatus"),
                 rec.session_id.clone(),
                 rec.kind.as_str().to_string(),
                 time_on_page];
    cells.join(",")
}

/// Nombre de archivo sugerido: `visitor-logs-<YYYY-MM-DD>.<ext>`.
pub fn file_name(format: ExportFormat, date: NaiveDate) -> String {
    format!("{EXPORT_FILE_PREFIX}-{}.{}", date.format("%Y-%m-%d"), format.extension())
}

/// Escribe el artefacto en `path`. Los errores de IO se devuelven al caller.
pub fn write_to(path: &Path, records: &[Record], format: ExportFormat) -> Result<(), LogError> {
    let rendered = render(records, format)?;
    std::fs::write(path, rendered).map_err(|e| LogError::ExportIo(format!("{}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use visit_domain::{RecordDraft, RecordKind};

    fn visit(referrer: &str) -> Record {
        RecordDraft::new(RecordKind::Visit, "s1").field("referrer", referrer)
                                                 .field("path", "/")
                                                 .stamp(Utc::now())
    }

    #[test]
    fn csv_has_fixed_header_and_one_row_per_record() {
        let recs = vec![visit("Direct"), visit("Direct")];
        let csv = render(&recs, ExportFormat::Csv).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Timestamp,Date,Time,Page,Path,Referrer"));
    }

    #[test]
    fn csv_replaces_commas_in_referrer_with_semicolons() {
        let recs = vec![visit("a,b,c")];
        let csv = render(&recs, ExportFormat::Csv).unwrap();
        let row = csv.lines().nth(1).unwrap();
        assert!(row.contains("a;b;c"), "expected sanitized referrer in: {row}");
        assert!(!row.contains("a,b,c"));
    }

    #[test]
    fn json_artifact_counts_and_embeds_records() {
        let recs = vec![visit("Direct")];
        let rendered = render(&recs, ExportFormat::Json).unwrap();
        let parsed: JsonExport = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed.total_logs, 1);
        assert_eq!(parsed.logs, recs);
    }

    #[test]
    fn empty_log_exports_valid_empty_shapes() {
        let json = render(&[], ExportFormat::Json).unwrap();
        let parsed: JsonExport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.total_logs, 0);
        assert!(parsed.logs.is_empty());
        let csv = render(&[], ExportFormat::Csv).unwrap();
        assert_eq!(csv.lines().count(), 1); // sólo el header
    }

    #[test]
    fn file_name_includes_date_and_extension() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        assert_eq!(file_name(ExportFormat::Json, date), "visitor-logs-2025-03-01.json");
        assert_eq!(file_name(ExportFormat::Csv, date), "visitor-logs-2025-03-01.csv");
    }
}
