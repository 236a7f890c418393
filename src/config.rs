//! Configuración central de la aplicación.
//! Carga variables de entorno (.env) y expone una estructura inmutable
//! (`AppConfig`). La credencial de servicio del sink (`GCP_SA_KEY`) es
//! obligatoria: sin ella el arranque falla y ningún ciclo llega a correr.
//! El resto de parámetros tiene valores por defecto sobreescribibles.
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::errors::SetupError;

/// Identificador por defecto de la hoja de cálculo de agregación.
const DEFAULT_SPREADSHEET_ID: &str = "1Xk3qPtodRvQqJKwnpKa3CDF7X9V5wXNYt5aXivAlpha";

/// Configuración global de la aplicación.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Planificación de ciclos.
    pub schedule: ScheduleConfig,
    /// Motor de automatización UI.
    pub driver: DriverConfig,
    /// Sink de agregación.
    pub sink: SinkConfig,
    /// Tiempos de espera y asentamiento de los pasos.
    pub tuning: StepTuning,
}

/// Periodo del ciclo y tamaño del pool de workers.
#[derive(Debug, Clone)]
pub struct ScheduleConfig {
    /// Periodo fijo entre inicios de ciclo.
    pub period: Duration,
    /// Cota K de ejecuciones concurrentes por ciclo.
    pub workers: usize,
}

/// Parámetros del motor de automatización.
#[derive(Debug, Clone)]
pub struct DriverConfig {
    /// URL del servidor WebDriver (chromedriver).
    pub server_url: String,
}

/// Parámetros del sink de agregación.
#[derive(Debug, Clone)]
pub struct SinkConfig {
    /// Credencial de cuenta de servicio (blob JSON), vía entorno.
    pub service_account_json: String,
    /// Identificador de la hoja de cálculo.
    pub spreadsheet_id: String,
    /// Nombre de la pestaña destino.
    pub worksheet: String,
    /// Celda ancla del bloque de datos.
    pub data_anchor: String,
    /// Celda ancla de la marca de tiempo.
    pub stamp_anchor: String,
}

/// Esperas acotadas y pausas de asentamiento de los pasos de scraping.
#[derive(Debug, Clone)]
pub struct StepTuning {
    /// Espera máxima de presencia de campos de formulario.
    pub presence_timeout: Duration,
    /// Espera máxima de presencia de los elementos de datos.
    pub extract_timeout: Duration,
    /// Pausa tras el envío del formulario de acceso.
    pub post_login_settle: Duration,
    /// Pausa tras la selección de vista, para el refresco de datos.
    pub post_select_settle: Duration,
}

impl Default for StepTuning {
    fn default() -> Self {
        Self { presence_timeout: Duration::from_secs(10),
               extract_timeout: Duration::from_secs(10),
               post_login_settle: Duration::from_secs(2),
               post_select_settle: Duration::from_secs(5) }
    }
}

impl AppConfig {
    /// Construye la configuración desde el entorno. Falla sólo ante la
    /// ausencia de la credencial obligatoria o valores no interpretables.
    pub fn from_env() -> Result<Self, SetupError> {
        let service_account_json =
            env::var("GCP_SA_KEY").map_err(|_| SetupError::MissingEnv("GCP_SA_KEY"))?;

        let period_secs: u64 = parsed_var("BOARDFLOW_PERIOD_SECS", 60)?;
        let workers: usize = parsed_var("BOARDFLOW_WORKERS", 4)?;

        Ok(Self { schedule: ScheduleConfig { period: Duration::from_secs(period_secs),
                                             workers },
                  driver: DriverConfig { server_url: var_or("WEBDRIVER_URL",
                                                            "http://localhost:9515") },
                  sink: SinkConfig { service_account_json,
                                     spreadsheet_id: var_or("BOARDFLOW_SPREADSHEET_ID",
                                                            DEFAULT_SPREADSHEET_ID),
                                     worksheet: var_or("BOARDFLOW_WORKSHEET", "Panel"),
                                     data_anchor: var_or("BOARDFLOW_DATA_ANCHOR", "B2"),
                                     stamp_anchor: var_or("BOARDFLOW_STAMP_ANCHOR", "D1") },
                  tuning: StepTuning::default() })
    }
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn parsed_var<T>(name: &'static str, default: T) -> Result<T, SetupError>
    where T: FromStr,
          T::Err: std::fmt::Display
{
    match env::var(name) {
        Ok(raw) => raw.parse().map_err(|e: T::Err| SetupError::Invalid { name,
                                                                         reason: e.to_string() }),
        Err(_) => Ok(default),
    }
}
