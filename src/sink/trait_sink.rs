use async_trait::async_trait;
use chrono::{DateTime, Local};

use crate::data::CycleResultSet;
use crate::errors::SinkError;

/// Formato con el que el sink representa la marca de tiempo del ciclo.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Representación textual de la marca de tiempo de un ciclo.
pub fn render_timestamp(completed_at: DateTime<Local>) -> String {
    completed_at.format(TIMESTAMP_FORMAT).to_string()
}

/// Escritor del sink de agregación. Mejor esfuerzo: dos escrituras por
/// ciclo (bloque de datos y después la marca de tiempo) sin reintentos ni
/// transaccionalidad entre ambas.
#[async_trait]
pub trait SinkWriter: Send + Sync {
    /// Escribe el conjunto ordenado de resultados y la marca de tiempo del
    /// ciclo. El fallo de cualquiera de las dos escrituras se devuelve al
    /// llamador, que lo registra sin detener la planificación.
    async fn write_cycle(&self, results: &CycleResultSet, completed_at: DateTime<Local>)
                         -> Result<(), SinkError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_timestamp_format() {
        let dt = Local.with_ymd_and_hms(2026, 8, 4, 9, 30, 5).unwrap();
        assert_eq!(render_timestamp(dt), "2026-08-04 09:30:05");
    }
}
