//! Frontera con el sink de agregación.
//! El núcleo depende sólo del contrato `SinkWriter` (bloque de datos en el
//! ancla fija y marca de tiempo en la segunda ancla, en ese orden, sin
//! transaccionalidad). Las implementaciones viven en `implementations/`:
//! el adaptador de hoja de cálculo real y un sink en memoria para tests.

pub mod implementations;
pub mod trait_sink;

pub use trait_sink::{render_timestamp, SinkWriter};
