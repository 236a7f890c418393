//! Coordinador de ciclo: reparte el roster a un pool de tareas acotado por
//! un semáforo de K permisos, recoge cada desenlace según termina y
//! reensambla los resultados en el orden del roster (reensamblado por
//! identidad, nunca por orden de llegada). Un fallo a nivel de tarea
//! sustituye un centinela para ese objetivo en lugar de tumbar el ciclo:
//! el ciclo sólo se considera completo cuando todos los objetivos tienen
//! resultado, con éxito o centinela.
use std::collections::HashMap;
use std::sync::Arc;

use indexmap::IndexMap;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{error, info};
use uuid::Uuid;

use crate::automation::UiEngine;
use crate::config::StepTuning;
use crate::data::{CycleResultSet, Target, TargetResult};
use crate::pipeline::executor;

/// Centinela para fallos a nivel de planificación (la tarea murió sin
/// producir resultado).
const TASK_FAULT_SENTINEL: &str = "Exception";

/// Ejecuta un ciclo completo sobre el roster. El invariante de salida es
/// `resultados.len() == roster.len()`, con las identidades en el mismo
/// orden del roster.
pub async fn run_cycle(engine: Arc<dyn UiEngine>,
                       roster: &[Target],
                       tuning: &StepTuning,
                       workers: usize)
                       -> CycleResultSet {
    let cycle_id = Uuid::new_v4();
    info!(%cycle_id, targets = roster.len(), workers, "cycle started");

    // Mapa de agregación presembrado en orden de roster; cada tarea sólo
    // rellena la ranura de su propio objetivo.
    let mut slots: IndexMap<String, Option<TargetResult>> =
        roster.iter().map(|t| (t.key.clone(), None)).collect();

    let semaphore = Arc::new(Semaphore::new(workers.max(1)));
    let mut tasks = JoinSet::new();
    let mut key_of_task = HashMap::new();

    for target in roster {
        let engine = Arc::clone(&engine);
        let semaphore = Arc::clone(&semaphore);
        let tuning = tuning.clone();
        let key = target.key.clone();
        let target = target.clone();
        let handle = tasks.spawn(async move {
            let _permit = semaphore.acquire_owned().await.expect("semaphore never closed");
            executor::run_target(engine.as_ref(), &target, &tuning).await
        });
        key_of_task.insert(handle.id(), key);
    }

    while let Some(joined) = tasks.join_next_with_id().await {
        match joined {
            Ok((_task_id, result)) => match slots.get_mut(&result.key) {
                Some(slot) => *slot = Some(result),
                None => error!(%cycle_id, url = %result.key, "result for unknown target dropped"),
            },
            Err(join_err) => {
                // La tarea murió sin producir resultado; se sustituye el
                // centinela de ese objetivo en lugar de fallar el ciclo.
                if let Some(key) = key_of_task.get(&join_err.id()) {
                    error!(%cycle_id, url = %key, error = %join_err,
                           "task-level fault, substituting sentinel");
                    if let Some(slot) = slots.get_mut(key) {
                        *slot = Some(TargetResult::sentinel(key.clone(), TASK_FAULT_SENTINEL));
                    }
                }
            }
        }
    }

    let results: Vec<TargetResult> =
        slots.into_iter()
             .map(|(key, slot)| {
                 slot.unwrap_or_else(|| TargetResult::sentinel(key, TASK_FAULT_SENTINEL))
             })
             .collect();

    info!(%cycle_id, results = results.len(), "cycle assembled");
    CycleResultSet::new(results)
}
