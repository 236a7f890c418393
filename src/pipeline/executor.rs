//! Ejecutor de pasos: conduce un objetivo por la secuencia fija
//! autenticar → seleccionar vista (si aplica) → extraer, contra su sesión
//! exclusiva, cortando en el primer fallo. Un solo intento por ciclo: el
//! fallo de cada paso se recupera aquí mismo como resultado centinela y
//! jamás escapa de la ejecución de este objetivo.
use tokio::time::sleep;
use tracing::{error, info, warn};

use crate::automation::{UiEngine, UiSession};
use crate::config::StepTuning;
use crate::data::{Target, TargetResult};
use crate::errors::{Stage, StepError};

/// Ejecuta el pipeline completo de un objetivo. Siempre devuelve un
/// resultado: datos extraídos o centinela del paso fallido. La sesión,
/// una vez adquirida, se libera en todos los caminos de salida.
pub async fn run_target(engine: &dyn UiEngine, target: &Target, tuning: &StepTuning)
                        -> TargetResult {
    let mut session = match engine.launch(target).await {
        Ok(session) => session,
        Err(e) => {
            error!(url = %target.key, error = %e, "session init failed");
            let failure = StepError::SessionInit(e.to_string());
            return TargetResult::sentinel(&target.key, failure.sentinel());
        }
    };
    info!(url = %target.key, "session initialized");

    let outcome = drive(session.as_ref(), target, tuning).await;

    if let Err(e) = session.quit().await {
        warn!(url = %target.key, error = %e, "session teardown failed");
    }

    match outcome {
        Ok((field_a, field_b)) => {
            info!(url = %target.key, %field_a, %field_b, "extraction complete");
            TargetResult::new(&target.key, field_a, field_b)
        }
        Err(failure) => {
            error!(url = %target.key, error = %failure, "target run failed");
            TargetResult::sentinel(&target.key, failure.sentinel())
        }
    }
}

/// Secuencia de pasos propiamente dicha. Separada de la gestión de la
/// sesión para que el corte por fallo no pueda saltarse la liberación.
async fn drive(session: &dyn UiSession, target: &Target, tuning: &StepTuning)
               -> Result<(String, String), StepError> {
    session.navigate(&target.entry_point)
           .await
           .map_err(|e| StepError::Unexpected(e.to_string()))?;

    // Autenticación: usuario, contraseña, envío y pausa de asentamiento.
    session.type_into(&target.locators.username, &target.username, tuning.presence_timeout)
           .await
           .map_err(|e| StepError::at(Stage::Username, e))?;
    session.type_into(&target.locators.password, &target.secret, tuning.presence_timeout)
           .await
           .map_err(|e| StepError::at(Stage::Password, e))?;
    session.click(&target.locators.submit, tuning.presence_timeout)
           .await
           .map_err(|e| StepError::at(Stage::Submit, e))?;
    sleep(tuning.post_login_settle).await;

    // Selección de vista: sólo objetivos con el atributo declarado.
    if let Some(view) = &target.view_select {
        let locator = view.rendered_locator();
        session.click(&locator, tuning.presence_timeout)
               .await
               .map_err(|e| StepError::at(Stage::ViewSelect, e))?;
        info!(url = %target.key, option = view.option_index, "view selected");
        sleep(tuning.post_select_settle).await;
    }

    // Extracción de los dos elementos de datos, ya recortados.
    let field_a = session.read_text(&target.locators.field_a, tuning.extract_timeout)
                         .await
                         .map_err(StepError::extraction)?;
    let field_b = session.read_text(&target.locators.field_b, tuning.extract_timeout)
                         .await
                         .map_err(StepError::extraction)?;
    Ok((field_a, field_b))
}
