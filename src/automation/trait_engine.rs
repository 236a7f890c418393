use std::time::Duration;

use async_trait::async_trait;

use crate::data::Target;
use crate::errors::DriverError;

/// Motor de automatización: adquiere sesiones aisladas, una por objetivo.
/// Una sesión nunca se comparte entre ejecuciones concurrentes ni se
/// reutiliza entre ciclos.
#[async_trait]
pub trait UiEngine: Send + Sync {
    /// Lanza una sesión exclusiva para `target`. El fallo se reporta como
    /// `DriverError` y el llamador lo convierte en centinela de inicio.
    async fn launch(&self, target: &Target) -> Result<Box<dyn UiSession>, DriverError>;
}

/// Capacidades de una sesión de automatización sobre un panel externo.
/// Cada espera acotada bloquea únicamente a su propio worker.
#[async_trait]
pub trait UiSession: Send + Sync {
    /// Navega a la URL indicada.
    async fn navigate(&self, url: &str) -> Result<(), DriverError>;

    /// Espera la presencia del elemento (hasta `timeout`) y escribe texto.
    async fn type_into(&self, locator: &str, text: &str, timeout: Duration)
                       -> Result<(), DriverError>;

    /// Espera a que el elemento sea interactuable (hasta `timeout`) y lo pulsa.
    async fn click(&self, locator: &str, timeout: Duration) -> Result<(), DriverError>;

    /// Espera la presencia del elemento (hasta `timeout`) y devuelve su
    /// texto ya recortado.
    async fn read_text(&self, locator: &str, timeout: Duration) -> Result<String, DriverError>;

    /// Libera la sesión. Idempotente: una segunda llamada es un no-op, y es
    /// segura aunque la adquisición quedara a medias.
    async fn quit(&mut self) -> Result<(), DriverError>;
}
