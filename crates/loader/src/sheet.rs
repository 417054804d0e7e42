use crate::error::LoaderError;
use crate::parse::parse_csv;
use crate::provider::RecordProvider;
use async_trait::async_trait;
use core_types::PlayRecord;
use reqwest::Client;

const SHEETS_BASE_URL: &str = "https://docs.google.com/spreadsheets/d";

/// Fetches plays from a published spreadsheet through its CSV export.
#[derive(Debug, Clone)]
pub struct PublishedSheetProvider {
    client: Client,
    sheet_id: String,
    gid: Option<String>,
}

impl PublishedSheetProvider {
    pub fn new(sheet_id: String, gid: Option<String>) -> Self {
        Self {
            client: Client::new(),
            sheet_id,
            gid,
        }
    }

    /// The CSV export URL for the configured sheet (and worksheet, if any).
    pub fn export_url(&self) -> String {
        let mut url = format!("{}/{}/export?format=csv", SHEETS_BASE_URL, self.sheet_id);
        if let Some(gid) = self.gid.as_deref().filter(|g| !g.is_empty()) {
            url.push_str("&gid=");
            url.push_str(gid);
        }
        url
    }
}

#[async_trait]
impl RecordProvider for PublishedSheetProvider {
    async fn load(&self) -> Result<Vec<PlayRecord>, LoaderError> {
        let url = self.export_url();
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(LoaderError::SourceUnavailable(format!(
                "sheet export returned HTTP {}",
                response.status()
            )));
        }

        let body = response.bytes().await?;
        let records = parse_csv(body.as_ref())?;
        tracing::debug!(sheet_id = %self.sheet_id, plays = records.len(), "Loaded plays from sheet.");
        Ok(records)
    }

    fn describe(&self) -> String {
        match &self.gid {
            Some(gid) if !gid.is_empty() => format!("sheet {} (gid {})", self.sheet_id, gid),
            _ => format!("sheet {}", self.sheet_id),
        }
    }
}
