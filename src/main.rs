//! Punto de entrada del servicio.
//! Orden de arranque: entorno (.env) → logging → configuración (la
//! credencial del sink es obligatoria: sin ella el proceso sale con código
//! distinto de cero antes de cualquier ciclo) → conexión del sink → motor
//! de automatización → bucle planificador, para siempre. Los colaboradores
//! se construyen una sola vez aquí y se inyectan al planificador.
use std::sync::Arc;

use tracing::{error, info};

use boardflow_rust::automation::implementations::WebDriverEngine;
use boardflow_rust::automation::UiEngine;
use boardflow_rust::config::AppConfig;
use boardflow_rust::logging;
use boardflow_rust::pipeline::scheduler;
use boardflow_rust::roster;
use boardflow_rust::sink::implementations::SheetsSink;
use boardflow_rust::sink::SinkWriter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    logging::init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid startup configuration");
            std::process::exit(1);
        }
    };

    let sink = match SheetsSink::connect(&config.sink).await {
        Ok(sink) => sink,
        Err(e) => {
            error!(error = %e, "failed to connect to the aggregation sink");
            std::process::exit(1);
        }
    };
    info!(spreadsheet = %config.sink.spreadsheet_id,
          worksheet = %config.sink.worksheet,
          "connected to the aggregation sink");

    let engine: Arc<dyn UiEngine> = Arc::new(WebDriverEngine::new(&config.driver));
    let sink: Arc<dyn SinkWriter> = Arc::new(sink);
    let targets = roster::targets();
    info!(targets = targets.len(), "roster loaded");

    scheduler::run(engine, sink, targets, config).await;
}
