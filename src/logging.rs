//! Inicialización del logging estructurado del proceso.
//! La salida va a stderr en formato compacto; el filtro se controla con
//! `RUST_LOG` y por defecto queda en `info` porque el progreso por ciclo
//! (inicio, duración, escrituras al sink) es parte del comportamiento
//! observable del servicio.
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Instala el subscriber global. Llamar una sola vez, al arrancar.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
