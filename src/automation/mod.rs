//! Frontera con el motor de automatización UI.
//! El núcleo depende sólo del conjunto de capacidades de `UiSession`
//! (navegar, escribir, pulsar, leer texto, cerrar), nunca de un motor
//! concreto. Las implementaciones viven en `implementations/`: el
//! adaptador WebDriver real y un doble guionizado para tests.

pub mod implementations;
pub mod trait_engine;

pub use trait_engine::{UiEngine, UiSession};
