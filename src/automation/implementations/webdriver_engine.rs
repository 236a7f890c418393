//! Adaptador WebDriver del motor de automatización (Chrome headless).
//! Traduce el conjunto de capacidades de `UiSession` al protocolo
//! WebDriver vía `thirtyfour`: esperas acotadas de presencia/clicabilidad,
//! escritura de teclas, pulsación y lectura de texto recortado.
use std::time::Duration;

use async_trait::async_trait;
use thirtyfour::prelude::*;
use thirtyfour::ChromiumLikeCapabilities;
use tokio::runtime::Handle;
use tracing::warn;

use crate::automation::trait_engine::{UiEngine, UiSession};
use crate::config::DriverConfig;
use crate::data::Target;
use crate::errors::DriverError;

/// Opciones de lanzamiento para entornos sin display (contenedores).
const CHROME_ARGS: &[&str] = &["--headless",
                               "--no-sandbox",
                               "--disable-dev-shm-usage",
                               "--disable-gpu",
                               "--window-size=1920,1080"];

/// Intervalo de sondeo de las esperas acotadas.
const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Motor real: una sesión de navegador aislada por objetivo, contra un
/// servidor WebDriver externo.
pub struct WebDriverEngine {
    server_url: String,
}

impl WebDriverEngine {
    pub fn new(config: &DriverConfig) -> Self {
        Self { server_url: config.server_url.clone() }
    }
}

#[async_trait]
impl UiEngine for WebDriverEngine {
    async fn launch(&self, _target: &Target) -> Result<Box<dyn UiSession>, DriverError> {
        let mut caps = DesiredCapabilities::chrome();
        for arg in CHROME_ARGS {
            caps.add_arg(arg).map_err(|e| DriverError::Session(e.to_string()))?;
        }
        let driver = WebDriver::new(&self.server_url, caps)
            .await
            .map_err(|e| DriverError::Session(e.to_string()))?;
        Ok(Box::new(WebDriverSession { driver: Some(driver) }))
    }
}

/// Sesión WebDriver con liberación idempotente: `quit` consume el handle
/// interno y deja la sesión inerte.
struct WebDriverSession {
    driver: Option<WebDriver>,
}

impl WebDriverSession {
    fn driver(&self) -> Result<&WebDriver, DriverError> {
        self.driver
            .as_ref()
            .ok_or_else(|| DriverError::Session("session already released".into()))
    }
}

#[async_trait]
impl UiSession for WebDriverSession {
    async fn navigate(&self, url: &str) -> Result<(), DriverError> {
        self.driver()?
            .goto(url)
            .await
            .map_err(|e| DriverError::Session(e.to_string()))
    }

    async fn type_into(&self, locator: &str, text: &str, timeout: Duration)
                       -> Result<(), DriverError> {
        let elem = self.driver()?
                       .query(By::XPath(locator))
                       .wait(timeout, POLL_INTERVAL)
                       .first()
                       .await
                       .map_err(|_| DriverError::NotPresent { locator: locator.to_string() })?;
        elem.send_keys(text)
            .await
            .map_err(|e| DriverError::Action { locator: locator.to_string(),
                                               message: e.to_string() })
    }

    async fn click(&self, locator: &str, timeout: Duration) -> Result<(), DriverError> {
        let elem = self.driver()?
                       .query(By::XPath(locator))
                       .wait(timeout, POLL_INTERVAL)
                       .and_clickable()
                       .first()
                       .await
                       .map_err(|_| DriverError::NotInteractable { locator: locator.to_string() })?;
        elem.click()
            .await
            .map_err(|e| DriverError::Action { locator: locator.to_string(),
                                               message: e.to_string() })
    }

    async fn read_text(&self, locator: &str, timeout: Duration) -> Result<String, DriverError> {
        let elem = self.driver()?
                       .query(By::XPath(locator))
                       .wait(timeout, POLL_INTERVAL)
                       .first()
                       .await
                       .map_err(|_| DriverError::NotPresent { locator: locator.to_string() })?;
        let text = elem.text()
                       .await
                       .map_err(|e| DriverError::Action { locator: locator.to_string(),
                                                          message: e.to_string() })?;
        Ok(text.trim().to_string())
    }

    async fn quit(&mut self) -> Result<(), DriverError> {
        match self.driver.take() {
            Some(driver) => driver.quit().await.map_err(|e| DriverError::Session(e.to_string())),
            None => Ok(()),
        }
    }
}

impl Drop for WebDriverSession {
    // Liberación de último recurso: si la tarea murió sin pasar por `quit`
    // (pánico), el navegador se cierra en una tarea desprendida.
    fn drop(&mut self) {
        if let Some(driver) = self.driver.take() {
            if let Ok(handle) = Handle::try_current() {
                handle.spawn(async move {
                    if let Err(e) = driver.quit().await {
                        warn!(error = %e, "deferred session teardown failed");
                    }
                });
            }
        }
    }
}
