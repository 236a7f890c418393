pub mod memory_sink;
pub mod sheets_sink;

pub use memory_sink::{MemorySink, SinkWrite};
pub use sheets_sink::SheetsSink;
