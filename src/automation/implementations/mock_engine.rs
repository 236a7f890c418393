//! Doble de pruebas del motor de automatización.
//! Cada objetivo puede guionizarse (fallo de lanzamiento, localizadores
//! ausentes o inertes, pánico inyectado en la extracción, valores a
//! devolver, retardo por paso) y el motor registra cada interacción junto
//! con contadores de higiene de sesiones: lanzamientos, liberaciones y
//! marca de agua de sesiones vivas para verificar la cota de concurrencia.
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::automation::trait_engine::{UiEngine, UiSession};
use crate::data::{PageLocators, Target};
use crate::errors::DriverError;

/// Guion de comportamiento para un objetivo concreto.
#[derive(Debug, Clone, Default)]
pub struct TargetScript {
    /// La adquisición de sesión falla.
    pub launch_error: bool,
    /// Fragmentos de localizador que nunca llegan a estar presentes.
    pub absent: Vec<String>,
    /// Fragmentos de localizador que nunca llegan a ser interactuables.
    pub inert: Vec<String>,
    /// Pánico no modelado dentro de la lectura de datos.
    pub panic_on_read: bool,
    /// Valores que devuelven los dos elementos de datos.
    pub field_a: String,
    pub field_b: String,
    /// Retardo aplicado en `navigate`, para moldear el orden de finalización.
    pub step_delay: Duration,
}

impl TargetScript {
    /// Guion de éxito con los dos valores indicados.
    pub fn values(field_a: &str, field_b: &str) -> Self {
        Self { field_a: field_a.to_string(),
               field_b: field_b.to_string(),
               ..Self::default() }
    }
}

/// Interacción registrada: (clave del objetivo, acción, localizador).
pub type LoggedAction = (String, String, String);

#[derive(Default)]
struct MockState {
    launched: AtomicUsize,
    released: AtomicUsize,
    live: AtomicUsize,
    max_live: AtomicUsize,
    log: Mutex<Vec<LoggedAction>>,
}

/// Motor guionizado. Compartido entre tareas vía `Arc`; los guiones se
/// fijan antes de arrancar el ciclo.
#[derive(Default)]
pub struct MockEngine {
    scripts: HashMap<String, TargetScript>,
    state: Arc<MockState>,
}

impl MockEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Asocia un guion al objetivo con la clave dada.
    pub fn with_script(mut self, key: &str, script: TargetScript) -> Self {
        self.scripts.insert(key.to_string(), script);
        self
    }

    /// Sesiones adquiridas en total.
    pub fn launched(&self) -> usize {
        self.state.launched.load(Ordering::Relaxed)
    }

    /// Sesiones liberadas en total (por `quit` o por descarte).
    pub fn released(&self) -> usize {
        self.state.released.load(Ordering::Relaxed)
    }

    /// Máximo de sesiones simultáneamente vivas observado.
    pub fn max_live(&self) -> usize {
        self.state.max_live.load(Ordering::Relaxed)
    }

    /// Copia del registro completo de interacciones.
    pub fn log(&self) -> Vec<LoggedAction> {
        self.state.log.lock().expect("mock log poisoned").clone()
    }

    /// Interacciones registradas para un objetivo concreto.
    pub fn actions_for(&self, key: &str) -> Vec<LoggedAction> {
        self.log().into_iter().filter(|(k, _, _)| k == key).collect()
    }
}

#[async_trait]
impl UiEngine for MockEngine {
    async fn launch(&self, target: &Target) -> Result<Box<dyn UiSession>, DriverError> {
        let script = self.scripts.get(&target.key).cloned().unwrap_or_default();
        if script.launch_error {
            return Err(DriverError::Session("scripted launch failure".into()));
        }
        self.state.launched.fetch_add(1, Ordering::Relaxed);
        let live = self.state.live.fetch_add(1, Ordering::Relaxed) + 1;
        self.state.max_live.fetch_max(live, Ordering::Relaxed);
        Ok(Box::new(MockSession { key: target.key.clone(),
                                  locators: target.locators.clone(),
                                  script,
                                  state: Arc::clone(&self.state),
                                  released: false }))
    }
}

struct MockSession {
    key: String,
    locators: PageLocators,
    script: TargetScript,
    state: Arc<MockState>,
    released: bool,
}

impl MockSession {
    fn record(&self, action: &str, locator: &str) {
        self.state
            .log
            .lock()
            .expect("mock log poisoned")
            .push((self.key.clone(), action.to_string(), locator.to_string()));
    }

    fn is_absent(&self, locator: &str) -> bool {
        self.script.absent.iter().any(|frag| locator.contains(frag.as_str()))
    }

    fn is_inert(&self, locator: &str) -> bool {
        self.script.inert.iter().any(|frag| locator.contains(frag.as_str()))
    }

    fn mark_released(&mut self) {
        if !self.released {
            self.released = true;
            self.state.released.fetch_add(1, Ordering::Relaxed);
            self.state.live.fetch_sub(1, Ordering::Relaxed);
        }
    }
}

#[async_trait]
impl UiSession for MockSession {
    async fn navigate(&self, url: &str) -> Result<(), DriverError> {
        self.record("navigate", url);
        if !self.script.step_delay.is_zero() {
            tokio::time::sleep(self.script.step_delay).await;
        }
        Ok(())
    }

    async fn type_into(&self, locator: &str, text: &str, _timeout: Duration)
                       -> Result<(), DriverError> {
        self.record("type", locator);
        let _ = text;
        if self.is_absent(locator) {
            return Err(DriverError::NotPresent { locator: locator.to_string() });
        }
        Ok(())
    }

    async fn click(&self, locator: &str, _timeout: Duration) -> Result<(), DriverError> {
        self.record("click", locator);
        if self.is_absent(locator) {
            return Err(DriverError::NotPresent { locator: locator.to_string() });
        }
        if self.is_inert(locator) {
            return Err(DriverError::NotInteractable { locator: locator.to_string() });
        }
        Ok(())
    }

    async fn read_text(&self, locator: &str, _timeout: Duration) -> Result<String, DriverError> {
        self.record("read", locator);
        if self.script.panic_on_read {
            panic!("injected extraction fault for {}", self.key);
        }
        if self.is_absent(locator) {
            return Err(DriverError::NotPresent { locator: locator.to_string() });
        }
        if locator == self.locators.field_a {
            Ok(self.script.field_a.clone())
        } else if locator == self.locators.field_b {
            Ok(self.script.field_b.clone())
        } else {
            Err(DriverError::NotPresent { locator: locator.to_string() })
        }
    }

    async fn quit(&mut self) -> Result<(), DriverError> {
        self.mark_released();
        Ok(())
    }
}

impl Drop for MockSession {
    // El descarte sin `quit` (pánico de la tarea) también cuenta como
    // liberación, igual que el cierre diferido del adaptador real.
    fn drop(&mut self) {
        self.mark_released();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster;

    #[tokio::test]
    async fn test_launch_and_release_counters() {
        let roster = roster::targets();
        let engine = MockEngine::new();

        let mut session = engine.launch(&roster[0]).await.unwrap();
        assert_eq!(engine.launched(), 1);
        assert_eq!(engine.max_live(), 1);

        session.quit().await.unwrap();
        session.quit().await.unwrap(); // idempotente
        drop(session);
        assert_eq!(engine.released(), 1);
    }

    #[tokio::test]
    async fn test_scripted_fields_and_absence() {
        let roster = roster::targets();
        let target = &roster[3];
        let engine = MockEngine::new().with_script(&target.key, TargetScript::values("1,234", "56"));

        let mut session = engine.launch(target).await.unwrap();
        let a = session.read_text(&target.locators.field_a, Duration::from_secs(1)).await.unwrap();
        let b = session.read_text(&target.locators.field_b, Duration::from_secs(1)).await.unwrap();
        assert_eq!((a.as_str(), b.as_str()), ("1,234", "56"));

        let err = session.read_text("//missing", Duration::from_secs(1)).await.unwrap_err();
        assert!(matches!(err, DriverError::NotPresent { .. }));
        session.quit().await.unwrap();
    }

    #[tokio::test]
    async fn test_drop_without_quit_counts_as_release() {
        let roster = roster::targets();
        let engine = MockEngine::new();
        let session = engine.launch(&roster[0]).await.unwrap();
        drop(session);
        assert_eq!(engine.released(), 1);
        assert_eq!(engine.max_live(), 1);
    }
}
