use thiserror::Error;

/// Errores del sink de agregación. Los fallos de escritura se registran a
/// nivel de ciclo y no se reintentan; el siguiente ciclo procede igual.
#[derive(Debug, Error)]
pub enum SinkError {
    /// La credencial de servicio no se pudo interpretar o autorizar.
    #[error("sink auth failed: {0}")]
    Auth(String),
    /// Fallo de escritura de un rango (bloque de datos o marca de tiempo).
    #[error("sink write failed: {0}")]
    Write(String),
}
