//! BoardFlow Rust Library
//!
//! Este crate actúa como la librería central de BoardFlow:
//! - Expone `data` y `roster` con el modelo de objetivos y resultados.
//! - Expone `errors` para manejar errores de sesión, pasos y sink.
//! - Expone `automation` (motor de UI), `pipeline` (ejecución por ciclos)
//!   y `sink` (escritura agregada).
//!
//! Puede usarse desde `main.rs` o por otros clientes (tests de integración).

pub mod automation;
pub mod config;
pub mod data;
pub mod errors;
pub mod logging;
pub mod pipeline;
pub mod roster;
pub mod sink;
