use thiserror::Error;

/// Errores en la frontera del motor de automatización (sesión UI).
/// Los adaptadores concretos traducen sus fallos nativos a estas variantes;
/// el ejecutor de pasos las convierte después en `StepError` según la etapa.
#[derive(Debug, Error)]
pub enum DriverError {
    /// El elemento no apareció dentro de la espera acotada.
    #[error("element not present: {locator}")]
    NotPresent { locator: String },
    /// El elemento apareció pero nunca llegó a ser interactuable.
    #[error("element not interactable: {locator}")]
    NotInteractable { locator: String },
    /// El elemento se localizó pero la interacción en sí falló (envío de
    /// teclas, pulsación, tiempo límite de la llamada).
    #[error("interaction failed: {locator}: {message}")]
    Action { locator: String, message: String },
    /// Fallo de sesión no clasificado (protocolo, navegador caído, etc.).
    #[error("session error: {0}")]
    Session(String),
}
