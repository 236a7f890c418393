//! Roster fijo de objetivos a visitar en cada ciclo.
//! La lista está compilada en el binario y no se recarga dinámicamente:
//! cada entrada lleva identidad (URL), credencial, el atributo de selección
//! de vista cuando aplica y sus localizadores estructurales. Todos los
//! paneles comparten hoy el mismo marcado, así que los localizadores parten
//! de una plantilla común por objetivo.
use once_cell::sync::Lazy;

use crate::data::{PageLocators, Target, ViewSelect};

/// Plantilla del localizador de la opción de vista; `{index}` se rellena
/// con el índice por objetivo.
const VIEW_OPTION_TEMPLATE: &str =
    "/html/body/div[5]/div[2]/div/div[1]/ul[2]/li/a/span[2]/select/option[{index}]";

/// Localizadores compartidos por los paneles actuales del roster.
static DEFAULT_LOCATORS: Lazy<PageLocators> = Lazy::new(|| PageLocators {
    username: "/html/body/div[2]/div/form/div[2]/div/input".into(),
    password: "/html/body/div[2]/div/form/div[3]/div/input".into(),
    submit: "/html/body/div[2]/div/form/div[6]/a".into(),
    field_a: "/html/body/div[5]/div[2]/div/div[4]/div[1]/div/div[2]/ul/li[2]/strong".into(),
    field_b: "/html/body/div[5]/div[2]/div/div[4]/div[2]/div/div[2]/ul/li[2]/strong".into(),
});

fn target(url: &str, username: &str, secret: &str, view_index: Option<u32>) -> Target {
    Target { key: url.to_string(),
             username: username.to_string(),
             secret: secret.to_string(),
             entry_point: url.to_string(),
             view_select: view_index.map(|option_index| ViewSelect {
                 option_locator: VIEW_OPTION_TEMPLATE.to_string(),
                 option_index,
             }),
             locators: DEFAULT_LOCATORS.clone() }
}

/// Lista ordenada de objetivos. El orden de salida de cada ciclo es
/// exactamente este, con independencia del orden de finalización.
pub fn targets() -> Vec<Target> {
    vec![
        target("https://www.nimbusplay.com/page/manager/login.jsp", "npbert", "Acceso1", Some(2)),
        // Este panel expone una opción extra al inicio del selector.
        target("https://arcadeback.com/page/manager/dashboard.jsp", "avmon01", "Acceso1", Some(3)),
        target("https://mkback1.com/page/manager/login.jsp", "mkbert", "Acceso1", Some(2)),
        target("https://dvoffice1.com/page/manager/dashboard.jsp", "dvbert", "Acceso1", None),
        target("https://kroffice1.com/page/manager/dashboard.jsp", "krbert", "Acceso1", None),
        target("https://hloffice1.com/page/manager/dashboard.jsp", "hlmon04", "Acceso1", None),
        target("https://jtoffice1.com/page/manager/dashboard.jsp", "jtbert", "Acceso1", None),
        target("https://jxoffice1.com/page/manager/dashboard.jsp", "jxbert", "Acceso3333", Some(2)),
        target("https://sgoffice1.com/page/manager/dashboard.jsp", "sgmon03", "acceso2", None),
        target("https://slboffice1.com/page/manager/dashboard.jsp", "slbmon02", "acceso888", None),
        target("https://bkdoffice1.com/page/manager/dashboard.jsp", "bkdmon02", "Acceso23", None),
    ]
}
