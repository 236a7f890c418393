//! Bucle planificador: un ciclo inmediato al arrancar y después uno por
//! periodo fijo, para siempre (planificación aditiva sobre el inicio de
//! tick, no sobre el final del ciclo). Los ciclos corren en línea sobre la
//! propia tarea del planificador, así que nunca hay dos ciclos en vuelo;
//! si un ciclo excede el periodo, los ticks perdidos se omiten y se deja
//! constancia en el log.
use std::sync::Arc;
use std::time::Instant;

use chrono::Local;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info, warn};

use crate::automation::UiEngine;
use crate::config::AppConfig;
use crate::data::Target;
use crate::pipeline::cycle;
use crate::sink::SinkWriter;

/// Un ciclo completo: scraping del roster y volcado al sink. El fallo de
/// escritura se registra y se descarta; el siguiente ciclo procede igual.
pub async fn run_once(engine: &Arc<dyn UiEngine>,
                      sink: &Arc<dyn SinkWriter>,
                      roster: &[Target],
                      config: &AppConfig) {
    let started = Instant::now();
    let results =
        cycle::run_cycle(Arc::clone(engine), roster, &config.tuning, config.schedule.workers).await;

    let completed_at = Local::now();
    if let Err(e) = sink.write_cycle(&results, completed_at).await {
        error!(error = %e, "sink write failed, next cycle proceeds unaffected");
    }

    let elapsed = started.elapsed();
    info!(elapsed_secs = elapsed.as_secs_f64(), "cycle completed");
    if elapsed > config.schedule.period {
        warn!(period_secs = config.schedule.period.as_secs(),
              "cycle exceeded the schedule period, missed ticks are skipped");
    }
}

/// Bucle infinito. No hay estado terminal: el proceso se detiene desde
/// fuera. Los colaboradores llegan construidos e inyectados desde el
/// arranque.
pub async fn run(engine: Arc<dyn UiEngine>,
                 sink: Arc<dyn SinkWriter>,
                 roster: Vec<Target>,
                 config: AppConfig) {
    let mut ticker = interval(config.schedule.period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    info!(period_secs = config.schedule.period.as_secs(),
          targets = roster.len(),
          "scheduler started");

    loop {
        // El primer tick resuelve de inmediato: primer ciclo al arrancar.
        ticker.tick().await;
        run_once(&engine, &sink, &roster, &config).await;
    }
}
