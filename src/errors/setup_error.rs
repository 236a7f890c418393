use thiserror::Error;

/// Errores fatales de arranque. Son los únicos que terminan el proceso
/// (salida distinta de cero); ningún ciclo corre sin configuración válida.
#[derive(Debug, Error)]
pub enum SetupError {
    /// Variable de entorno obligatoria ausente.
    #[error("missing environment variable: {0}")]
    MissingEnv(&'static str),
    /// Valor de configuración presente pero inválido.
    #[error("invalid configuration for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}
