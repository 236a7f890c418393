//! Adaptador real del sink: hoja de cálculo de Google vía `google-sheets4`
//! con credencial de cuenta de servicio. Dos escrituras por ciclo: el
//! bloque rectangular de valores en el ancla de datos y la marca de tiempo
//! en la segunda ancla, en ese orden.
use async_trait::async_trait;
use chrono::{DateTime, Local};
use google_sheets4::api::ValueRange;
use google_sheets4::{hyper, hyper_rustls, oauth2, Sheets};
use tracing::info;

use crate::config::SinkConfig;
use crate::data::CycleResultSet;
use crate::errors::SinkError;
use crate::sink::trait_sink::{render_timestamp, SinkWriter};

type SheetsHub = Sheets<hyper_rustls::HttpsConnector<hyper::client::HttpConnector>>;

/// Cliente autenticado del sink, construido una vez al arrancar y pasado
/// al planificador. Fallar aquí es fatal: ningún ciclo corre sin sink.
pub struct SheetsSink {
    hub: SheetsHub,
    spreadsheet_id: String,
    worksheet: String,
    data_anchor: String,
    stamp_anchor: String,
}

impl SheetsSink {
    /// Interpreta la credencial de servicio, autoriza y deja el cliente
    /// listo para escribir.
    pub async fn connect(config: &SinkConfig) -> Result<Self, SinkError> {
        let key = oauth2::parse_service_account_key(&config.service_account_json)
            .map_err(|e| SinkError::Auth(e.to_string()))?;
        let auth = oauth2::ServiceAccountAuthenticator::builder(key)
            .build()
            .await
            .map_err(|e| SinkError::Auth(e.to_string()))?;
        let connector = hyper_rustls::HttpsConnectorBuilder::new()
            .with_native_roots()
            .map_err(|e| SinkError::Auth(e.to_string()))?
            .https_or_http()
            .enable_http1()
            .build();
        let hub = Sheets::new(hyper::Client::builder().build(connector), auth);
        Ok(Self { hub,
                  spreadsheet_id: config.spreadsheet_id.clone(),
                  worksheet: config.worksheet.clone(),
                  data_anchor: config.data_anchor.clone(),
                  stamp_anchor: config.stamp_anchor.clone() })
    }

    async fn update_range(&self, range: &str, values: Vec<Vec<serde_json::Value>>)
                          -> Result<(), SinkError> {
        let body = ValueRange { major_dimension: None,
                                range: Some(range.to_string()),
                                values: Some(values) };
        self.hub
            .spreadsheets()
            .values_update(body, &self.spreadsheet_id, range)
            .value_input_option("USER_ENTERED")
            .doit()
            .await
            .map_err(|e| SinkError::Write(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl SinkWriter for SheetsSink {
    async fn write_cycle(&self, results: &CycleResultSet, completed_at: DateTime<Local>)
                         -> Result<(), SinkError> {
        let data_range = format!("{}!{}", self.worksheet, self.data_anchor);
        let block: Vec<Vec<serde_json::Value>> =
            results.rows()
                   .into_iter()
                   .map(|row| row.into_iter().map(serde_json::Value::String).collect())
                   .collect();
        self.update_range(&data_range, block).await?;
        info!(rows = results.len(), anchor = %self.data_anchor, "data block written");

        let stamp_range = format!("{}!{}", self.worksheet, self.stamp_anchor);
        let stamp = render_timestamp(completed_at);
        self.update_range(&stamp_range, vec![vec![serde_json::Value::String(stamp.clone())]])
            .await?;
        info!(%stamp, anchor = %self.stamp_anchor, "timestamp written");
        Ok(())
    }
}
