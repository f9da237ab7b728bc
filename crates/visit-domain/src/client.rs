//! Snapshot del entorno del cliente en el momento de la visita.

/// Datos del entorno que los colectores copian a los campos abiertos de un
/// registro de visita. En un navegador saldrían de `window`/`navigator`;
/// acá los provee quien integre la librería.
#[derive(Debug, Clone, Default)]
pub struct ClientEnv {
    pub page: String,
    pub path: String,
    pub referrer: Option<String>,
    pub user_agent: String,
    pub language: String,
    pub timezone: String,
    pub screen_resolution: String,
    pub viewport_size: String,
    pub connection_type: Option<String>,
    pub cookie_enabled: bool,
    pub online_status: bool,
}

impl ClientEnv {
    /// Referrer efectivo: las visitas sin referrer se atribuyen a "Direct".
    pub fn referrer_or_direct(&self) -> &str {
        self.referrer.as_deref().filter(|r| !r.is_empty()).unwrap_or("Direct")
    }

    /// Tipo de conexión efectivo ("unknown" cuando el cliente no lo expone).
    pub fn connection_or_unknown(&self) -> &str {
        self.connection_type.as_deref().unwrap_or("unknown")
    }
}
