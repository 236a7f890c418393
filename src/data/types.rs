//! Tipos del modelo de scraping: el descriptor inmutable de cada objetivo
//! (identidad, credencial, localizadores), el atributo declarativo de
//! selección de vista y los resultados por objetivo/ciclo que consume el
//! sink. El conjunto de objetivos queda fijado al arrancar el proceso.
use serde::{Deserialize, Serialize};

/// Localizadores estructurales de la página de un objetivo. Son datos de
/// configuración por objetivo, no lógica: acoplan al marcado externo y por
/// eso viven junto al roster y no en el ejecutor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageLocators {
    /// Campo de usuario del formulario de acceso.
    pub username: String,
    /// Campo de contraseña.
    pub password: String,
    /// Control de envío del formulario.
    pub submit: String,
    /// Primer elemento portador de datos.
    pub field_a: String,
    /// Segundo elemento portador de datos.
    pub field_b: String,
}

/// Atributo declarativo de selección de vista. Presente sólo en los
/// objetivos que requieren elegir una opción antes de extraer; el índice
/// es por objetivo (uno del roster usa un índice distinto al resto).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewSelect {
    /// Plantilla del localizador de la opción; `{index}` se sustituye por
    /// `option_index` al ejecutar.
    pub option_locator: String,
    /// Índice de la opción a elegir (1-based en el marcado externo).
    pub option_index: u32,
}

impl ViewSelect {
    /// Localizador concreto de la opción a pulsar.
    pub fn rendered_locator(&self) -> String {
        self.option_locator.replace("{index}", &self.option_index.to_string())
    }
}

/// Un objetivo externo: identidad (URL del endpoint), credencial y punto de
/// entrada, más sus atributos de interacción. Inmutable durante la vida del
/// proceso.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Target {
    /// Clave única del objetivo (URL del endpoint).
    pub key: String,
    /// Usuario de acceso.
    pub username: String,
    /// Secreto de acceso.
    pub secret: String,
    /// URL inicial que abre la sesión.
    pub entry_point: String,
    /// Selección de vista previa a la extracción, si aplica.
    pub view_select: Option<ViewSelect>,
    /// Localizadores estructurales de la página.
    pub locators: PageLocators,
}

/// Resultado de un objetivo en un ciclo. Cada campo es el texto extraído o
/// un centinela de error; el sink no distingue ambos casos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetResult {
    pub key: String,
    pub field_a: String,
    pub field_b: String,
}

impl TargetResult {
    pub fn new(key: impl Into<String>, field_a: impl Into<String>, field_b: impl Into<String>) -> Self {
        Self { key: key.into(),
               field_a: field_a.into(),
               field_b: field_b.into() }
    }

    /// Resultado centinela: ambos campos llevan el mismo texto de error.
    pub fn sentinel(key: impl Into<String>, text: &str) -> Self {
        Self { key: key.into(),
               field_a: text.to_string(),
               field_b: text.to_string() }
    }
}

/// Resultados de un ciclo completo, uno por objetivo y en el orden del
/// roster (nunca en orden de finalización). Se crea, se escribe una vez en
/// el sink y se descarta.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleResultSet {
    results: Vec<TargetResult>,
}

impl CycleResultSet {
    pub fn new(results: Vec<TargetResult>) -> Self {
        Self { results }
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TargetResult> {
        self.results.iter()
    }

    pub fn results(&self) -> &[TargetResult] {
        &self.results
    }

    /// Vista rectangular para el sink: una fila `[field_a, field_b]` por
    /// objetivo, en orden del roster.
    pub fn rows(&self) -> Vec<Vec<String>> {
        self.results
            .iter()
            .map(|r| vec![r.field_a.clone(), r.field_b.clone()])
            .collect()
    }
}
