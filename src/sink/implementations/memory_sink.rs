//! Sink en memoria para tests: registra cada escritura en orden para poder
//! afirmar el contenido del bloque, la marca de tiempo y el orden relativo
//! de ambas. Puede guionizarse para fallar y ejercitar la recuperación a
//! nivel de ciclo.
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Local};

use crate::data::CycleResultSet;
use crate::errors::SinkError;
use crate::sink::trait_sink::{render_timestamp, SinkWriter};

/// Una escritura registrada, en el orden en que ocurrió.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkWrite {
    /// Bloque rectangular de valores en el ancla de datos.
    Block(Vec<Vec<String>>),
    /// Marca de tiempo ya representada, en la segunda ancla.
    Stamp(String),
}

#[derive(Default)]
pub struct MemorySink {
    writes: Mutex<Vec<SinkWrite>>,
    fail_writes: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Variante que rechaza toda escritura.
    pub fn failing() -> Self {
        Self { writes: Mutex::new(Vec::new()),
               fail_writes: true }
    }

    /// Copia de las escrituras registradas hasta ahora.
    pub fn writes(&self) -> Vec<SinkWrite> {
        self.writes.lock().expect("sink log poisoned").clone()
    }
}

#[async_trait]
impl SinkWriter for MemorySink {
    async fn write_cycle(&self, results: &CycleResultSet, completed_at: DateTime<Local>)
                         -> Result<(), SinkError> {
        if self.fail_writes {
            return Err(SinkError::Write("scripted sink failure".into()));
        }
        let mut writes = self.writes.lock().expect("sink log poisoned");
        writes.push(SinkWrite::Block(results.rows()));
        writes.push(SinkWrite::Stamp(render_timestamp(completed_at)));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{CycleResultSet, TargetResult};
    use chrono::TimeZone;

    #[tokio::test]
    async fn test_records_block_then_stamp() {
        let sink = MemorySink::new();
        let set = CycleResultSet::new(vec![TargetResult::new("a", "1,234", "56")]);
        let dt = Local.with_ymd_and_hms(2026, 8, 4, 12, 0, 0).unwrap();

        sink.write_cycle(&set, dt).await.unwrap();

        assert_eq!(sink.writes(),
                   vec![SinkWrite::Block(vec![vec!["1,234".into(), "56".into()]]),
                        SinkWrite::Stamp("2026-08-04 12:00:00".into())]);
    }

    #[tokio::test]
    async fn test_failing_sink_rejects() {
        let sink = MemorySink::failing();
        let set = CycleResultSet::new(vec![]);
        let err = sink.write_cycle(&set, Local::now()).await.unwrap_err();
        assert_eq!(err.to_string(), "sink write failed: scripted sink failure");
        assert!(sink.writes().is_empty());
    }
}
