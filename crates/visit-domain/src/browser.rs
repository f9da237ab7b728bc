//! Clasificación gruesa de familia de navegador a partir del user agent.

/// Orden de prioridad: gana el primer match. El test de substring es
/// case-sensitive a propósito (los UA reales traen las marcas capitalizadas).
const FAMILIES: [&str; 5] = ["Chrome", "Firefox", "Safari", "Edge", "Opera"];

/// Etiqueta de fallback cuando ningún patrón coincide.
pub const OTHER_FAMILY: &str = "Other";

pub fn browser_family(user_agent: &str) -> &'static str {
    for family in FAMILIES {
        if user_agent.contains(family) {
            return family;
        }
    }
    OTHER_FAMILY
}
