//! Taxonomías de error del sistema, una por archivo:
//! - `driver_error`: fallos en la frontera del motor de automatización UI.
//! - `step_error`: fallos tipados de los pasos del scraping (con centinela).
//! - `sink_error`: fallos al escribir en el sink de agregación.
//! - `setup_error`: fallos fatales de arranque (configuración/credencial).

pub mod driver_error;
pub mod setup_error;
pub mod sink_error;
pub mod step_error;

pub use driver_error::DriverError;
pub use setup_error::SetupError;
pub use sink_error::SinkError;
pub use step_error::{Stage, StepError};
