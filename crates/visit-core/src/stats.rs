//! Estadísticas agregadas del log.
//!
//! `compute` es una función pura: una sola pasada lineal sobre los registros
//! actuales, sin efectos. En un log vacío devuelve conteos en cero y mapas
//! vacíos, nunca falla.

use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashSet;
use visit_domain::{browser_family, Record, RecordKind};

/// Resultado de una pasada de agregación. Los mapas usan `IndexMap` para que
/// el orden de primera aparición sea estable al serializar.
#[derive(Debug, Default, Serialize)]
pub struct LogStats {
    pub total_records: u64,
    pub total_visits: u64,
    pub unique_sessions: u64,
    pub by_kind: IndexMap<RecordKind, u64>,
    pub pages: IndexMap<String, u64>,
    pub referrers: IndexMap<String, u64>,
    pub browsers: IndexMap<String, u64>,
    pub clicked_elements: IndexMap<String, u64>,
    pub clicked_pages: IndexMap<String, u64>,
    pub click_coordinates: Vec<[f64; 2]>,
    pub average_scroll_depth: f64,
    pub average_time_on_page: f64,
}

pub fn compute(records: &[Record]) -> LogStats {
    let mut stats = LogStats::default();
    let mut sessions: HashSet<&str> = HashSet::new();
    let mut depth_sum = 0.0;
    let mut depth_count = 0u64;
    let mut duration_sum = 0.0;
    let mut duration_count = 0u64;

    for rec in records {
        stats.total_records += 1;
        *stats.by_kind.entry(rec.kind).or_insert(0) += 1;
        if rec.kind == RecordKind::Visit {
            stats.total_visits += 1;
        }
        sessions.insert(rec.session_id.as_str());

        if let Some(path) = rec.field_str("path") {
            *stats.pages.entry(path.to_string()).or_insert(0) += 1;
        }

        // Referrer ausente cae en el bucket literal "Direct", nunca en una
        // clave tipo "undefined".
        let referrer = rec.field_str("referrer").unwrap_or("Direct");
        *stats.referrers.entry(referrer.to_string()).or_insert(0) += 1;

        if let Some(ua) = rec.field_str("userAgent") {
            *stats.browsers.entry(browser_family(ua).to_string()).or_insert(0) += 1;
        }

        match rec.kind {
            RecordKind::Click => {
                if let Some(el) = rec.field_str("element") {
                    *stats.clicked_elements.entry(el.to_string()).or_insert(0) += 1;
                }
                if let Some(page) = rec.field_str("page").or_else(|| rec.field_str("path")) {
                    *stats.clicked_pages.entry(page.to_string()).or_insert(0) += 1;
                }
                if let (Some(x), Some(y)) = (rec.field("x").and_then(|v| v.as_num()),
                                             rec.field("y").and_then(|v| v.as_num()))
                {
                    stats.click_coordinates.push([x, y]);
                }
            }
            RecordKind::ScrollDepth => {
                if let Some(depth) = rec.field("depth").and_then(|v| v.as_num()) {
                    depth_sum += depth;
                    depth_count += 1;
                }
            }
            RecordKind::TimeOnPage => {
                if let Some(duration) = rec.field("duration").and_then(|v| v.as_num()) {
                    duration_sum += duration;
                    duration_count += 1;
                }
            }
            _ => {}
        }
    }

    stats.unique_sessions = sessions.len() as u64;
    // Media aritmética de todas las muestras del mismo kind; una fórmula
    // encadenada tipo (old+new)/2 dependería del orden de llegada.
    if depth_count > 0 {
        stats.average_scroll_depth = depth_sum / depth_count as f64;
    }
    if duration_count > 0 {
        stats.average_time_on_page = duration_sum / duration_count as f64;
    }
    stats
}
