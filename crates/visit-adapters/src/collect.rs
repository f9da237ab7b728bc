//! Constructores de registros por tipo de evento.
//!
//! Cada función arma un `RecordDraft` con los campos propios de su tipo de
//! evento; el log les sella el timestamp al hacer append.

use chrono::Utc;
use visit_core::constants::SCROLL_MILESTONE_STEP;
use visit_domain::{ClientEnv, RecordDraft, RecordKind, Session};

/// Registro de visita con el snapshot completo del entorno del cliente.
pub fn visit_record(env: &ClientEnv, session: &Session) -> RecordDraft {
    RecordDraft::new(RecordKind::Visit, session.id())
        .field("page", env.page.as_str())
        .field("path", env.path.as_str())
        .field("referrer", env.referrer_or_direct())
        .field("userAgent", env.user_agent.as_str())
        .field("language", env.language.as_str())
        .field("timezone", env.timezone.as_str())
        .field("screenResolution", env.screen_resolution.as_str())
        .field("viewportSize", env.viewport_size.as_str())
        .field("connectionType", env.connection_or_unknown())
        .field("cookieEnabled", env.cookie_enabled)
        .field("onlineStatus", env.online_status)
}

/// Apertura de sesión para el log compacto de sesiones: quién llegó, desde
/// dónde y a qué página. Se sella con el instante de inicio de la sesión,
/// no con el del append.
pub fn session_record(env: &ClientEnv, session: &Session) -> RecordDraft {
    RecordDraft::new(RecordKind::SessionStart, session.id())
        .field("startTime", session.started_at().to_rfc3339())
        .field("userAgent", env.user_agent.as_str())
        .field("referrer", env.referrer_or_direct())
        .field("landingPage", env.page.as_str())
        .at(session.started_at())
}

/// Tick periódico mientras la "página" sigue viva.
pub fn activity_record(env: &ClientEnv, session: &Session) -> RecordDraft {
    RecordDraft::new(RecordKind::Activity, session.id())
        .field("page", env.page.as_str())
        .field("timeOnPage", session.time_on_page(Utc::now()))
}

/// Registro de cierre emitido en el teardown de la página.
pub fn page_exit_record(env: &ClientEnv, session: &Session) -> RecordDraft {
    RecordDraft::new(RecordKind::PageExit, session.id())
        .field("page", env.page.as_str())
        .field("timeOnPage", session.time_on_page(Utc::now()))
}

/// Descriptor del elemento clickeado (subset de los atributos DOM útiles).
#[derive(Debug, Clone, Default)]
pub struct ElementDescriptor {
    pub tag: String,
    pub id: Option<String>,
    pub class_name: Option<String>,
    pub text: Option<String>,
    pub href: Option<String>,
}

impl ElementDescriptor {
    /// Selector compacto `TAG#id.primera-clase`, la clave que usan las
    /// estadísticas de elementos más clickeados.
    pub fn selector(&self) -> String {
        let mut s = self.tag.clone();
        if let Some(id) = &self.id {
            s.push('#');
            s.push_str(id);
        }
        if let Some(class) = self.class_name.as_deref().and_then(|c| c.split_whitespace().next()) {
            s.push('.');
            s.push_str(class);
        }
        s
    }
}

pub fn click_record(path: &str, element: &ElementDescriptor, x: f64, y: f64, session: &Session) -> RecordDraft {
    let mut draft = RecordDraft::new(RecordKind::Click, session.id())
        .field("page", path)
        .field("element", element.selector())
        .field("x", x)
        .field("y", y);
    if let Some(text) = &element.text {
        // texto recortado a 50 chars para acotar el tamaño del registro
        let trimmed: String = text.chars().take(50).collect();
        draft = draft.field("text", trimmed);
    }
    if let Some(href) = &element.href {
        draft = draft.field("href", href.as_str());
    }
    draft
}

pub fn form_submit_record(path: &str,
                          form_id: Option<&str>,
                          action: Option<&str>,
                          session: &Session)
                          -> RecordDraft {
    let mut draft = RecordDraft::new(RecordKind::FormSubmit, session.id()).field("page", path);
    if let Some(id) = form_id {
        draft = draft.field("formId", id);
    }
    if let Some(action) = action {
        draft = draft.field("formAction", action);
    }
    draft
}

pub fn scroll_depth_record(path: &str, depth: u8, session: &Session) -> RecordDraft {
    RecordDraft::new(RecordKind::ScrollDepth, session.id()).field("page", path)
                                                           .field("depth", depth)
}

pub fn time_on_page_record(path: &str, seconds: i64, session: &Session) -> RecordDraft {
    RecordDraft::new(RecordKind::TimeOnPage, session.id()).field("page", path)
                                                          .field("duration", seconds)
}

/// Compuerta de hitos de scroll: sólo emite cuando la profundidad supera el
/// máximo visto Y cae en un múltiplo del paso (25/50/75/100).
#[derive(Debug, Default)]
pub struct ScrollTracker {
    max_depth: u8,
}

impl ScrollTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Devuelve la profundidad a registrar, o `None` si el evento se filtra.
    pub fn observe(&mut self, depth: u8) -> Option<u8> {
        if depth <= self.max_depth {
            return None;
        }
        self.max_depth = depth;
        if depth > 0 && depth % SCROLL_MILESTONE_STEP == 0 {
            Some(depth)
        } else {
            None
        }
    }

    pub fn max_depth(&self) -> u8 {
        self.max_depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env() -> ClientEnv {
        ClientEnv { page: "https://example.com/work".into(),
                    path: "/work".into(),
                    referrer: None,
                    user_agent: "Chrome/120 Safari/537".into(),
                    language: "en-US".into(),
                    timezone: "America/Santo_Domingo".into(),
                    screen_resolution: "1920x1080".into(),
                    viewport_size: "1280x720".into(),
                    connection_type: Some("4g".into()),
                    cookie_enabled: true,
                    online_status: true }
    }

    #[test]
    fn visit_record_captures_full_snapshot() {
        let session = Session::start();
        let rec = visit_record(&env(), &session).stamp(Utc::now());
        assert_eq!(rec.kind, RecordKind::Visit);
        assert_eq!(rec.field_str("referrer"), Some("Direct"));
        assert_eq!(rec.field_str("connectionType"), Some("4g"));
        assert_eq!(rec.field_str("viewportSize"), Some("1280x720"));
        assert_eq!(rec.session_id, session.id());
    }

    #[test]
    fn session_record_captures_origin_and_landing_page() {
        let session = Session::start();
        let rec = session_record(&env(), &session).stamp(Utc::now());
        assert_eq!(rec.kind, RecordKind::SessionStart);
        assert_eq!(rec.session_id, session.id());
        assert_eq!(rec.timestamp, session.started_at());
        assert_eq!(rec.field_str("startTime"), Some(session.started_at().to_rfc3339().as_str()));
        assert_eq!(rec.field_str("referrer"), Some("Direct"));
        assert_eq!(rec.field_str("landingPage"), Some("https://example.com/work"));
    }

    #[test]
    fn element_selector_uses_first_class_only() {
        let el = ElementDescriptor { tag: "A".into(),
                                     id: Some("cta".into()),
                                     class_name: Some("btn btn-primary".into()),
                                     ..Default::default() };
        assert_eq!(el.selector(), "A#cta.btn");
        let bare = ElementDescriptor { tag: "DIV".into(), ..Default::default() };
        assert_eq!(bare.selector(), "DIV");
    }

    #[test]
    fn click_record_truncates_text_to_50_chars() {
        let session = Session::start();
        let el = ElementDescriptor { tag: "P".into(), text: Some("x".repeat(80)), ..Default::default() };
        let rec = click_record("/", &el, 1.0, 2.0, &session).stamp(Utc::now());
        assert_eq!(rec.field_str("text").unwrap().len(), 50);
    }

    #[test]
    fn scroll_tracker_emits_only_growing_milestones() {
        let mut tracker = ScrollTracker::new();
        assert_eq!(tracker.observe(10), None);
        assert_eq!(tracker.observe(25), Some(25));
        assert_eq!(tracker.observe(25), None); // no retrocede ni repite
        assert_eq!(tracker.observe(40), None);
        assert_eq!(tracker.observe(75), Some(75));
        assert_eq!(tracker.observe(50), None);
        assert_eq!(tracker.observe(100), Some(100));
        assert_eq!(tracker.max_depth(), 100);
    }
}
