use std::fmt;

use thiserror::Error;

use super::driver_error::DriverError;

/// Etapa del pipeline por objetivo en la que ocurrió un fallo.
/// Determina el texto centinela que sustituye a los datos reales.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Username,
    Password,
    Submit,
    ViewSelect,
    Extract,
}

impl Stage {
    /// Texto centinela asociado a la etapa (va al sink en lugar del dato).
    pub fn sentinel(self) -> &'static str {
        match self {
            Stage::Username => "Username Error",
            Stage::Password => "Password Error",
            Stage::Submit => "Login Error",
            Stage::ViewSelect => "View Error",
            Stage::Extract => "Data Error",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Username => "username",
            Stage::Password => "password",
            Stage::Submit => "submit",
            Stage::ViewSelect => "view-select",
            Stage::Extract => "extract",
        };
        f.write_str(name)
    }
}

/// Fallos tipados de un paso del scraping. Cada variante corta la ejecución
/// del objetivo afectado y se recupera localmente como resultado centinela;
/// nunca se propaga fuera de la ejecución de ese objetivo.
#[derive(Debug, Error)]
pub enum StepError {
    /// No se pudo adquirir la sesión de automatización.
    #[error("session init failed: {0}")]
    SessionInit(String),
    /// El campo de la etapa nunca estuvo presente dentro de la espera.
    #[error("{stage} field not present")]
    FieldNotFound { stage: Stage },
    /// El control de la etapa nunca llegó a ser interactuable.
    #[error("{stage} control not interactable")]
    FieldNotInteractable { stage: Stage },
    /// La interacción de la etapa falló tras localizar el elemento.
    #[error("{stage} interaction failed")]
    ActionTimeout { stage: Stage },
    /// La lectura de los elementos de datos falló.
    #[error("data extraction failed: {0}")]
    Extraction(String),
    /// Cualquier fallo no anticipado por las categorías anteriores.
    #[error("unexpected failure: {0}")]
    Unexpected(String),
}

impl StepError {
    /// Clasifica un fallo del driver ocurrido en una etapa de interacción.
    pub fn at(stage: Stage, err: DriverError) -> Self {
        match err {
            DriverError::NotPresent { .. } => StepError::FieldNotFound { stage },
            DriverError::NotInteractable { .. } => StepError::FieldNotInteractable { stage },
            DriverError::Action { .. } => StepError::ActionTimeout { stage },
            DriverError::Session(msg) => StepError::Unexpected(msg),
        }
    }

    /// Clasifica un fallo del driver durante la extracción de datos.
    /// Cualquier causa se reporta como fallo de extracción.
    pub fn extraction(err: DriverError) -> Self {
        StepError::Extraction(err.to_string())
    }

    /// Texto centinela que sustituye a ambos campos del objetivo afectado.
    pub fn sentinel(&self) -> &'static str {
        match self {
            StepError::SessionInit(_) => "Browser Error",
            StepError::FieldNotFound { stage }
            | StepError::FieldNotInteractable { stage }
            | StepError::ActionTimeout { stage } => stage.sentinel(),
            StepError::Extraction(_) => "Data Error",
            StepError::Unexpected(_) => "General Error",
        }
    }
}
