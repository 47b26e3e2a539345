//! Saved replay documents

use serde::Deserialize;

use replaydex_battle::{AnalysisError, MatchReport, analyze};

use crate::ReplayError;

const LOG_SCRIPT_CLASS: &str = "class=\"battle-log-data\"";
const SCRIPT_END: &str = "</script>";

/// A battle log and whatever metadata came with it
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ReplayDocument {
    /// Replay id ("gen9ou-2012345678"), empty for bare logs
    #[serde(default)]
    pub id: String,

    /// Format name ("[Gen 9] OU")
    #[serde(default)]
    pub format: String,

    #[serde(default)]
    pub players: Vec<String>,

    pub log: String,

    /// Unix seconds
    #[serde(default, rename = "uploadtime")]
    pub upload_time: Option<i64>,
}

impl ReplayDocument {
    /// Wrap a raw battle log
    pub fn from_log(log: impl Into<String>) -> Self {
        Self {
            log: log.into(),
            ..Self::default()
        }
    }

    /// Parse any of the shapes a saved replay comes in: the replay JSON, the
    /// replay HTML page, or a bare log.
    pub fn parse(text: &str) -> Result<Self, ReplayError> {
        let trimmed = text.trim_start();

        if trimmed.starts_with('{') {
            return Ok(serde_json::from_str(trimmed)?);
        }

        if trimmed.starts_with('|') {
            return Ok(Self::from_log(trimmed));
        }

        if trimmed.contains(LOG_SCRIPT_CLASS) {
            return extract_html_log(trimmed).map(Self::from_log);
        }

        Err(ReplayError::MissingLogData)
    }

    pub fn analyze(&self) -> Result<MatchReport, AnalysisError> {
        analyze(&self.log)
    }
}

/// Pull the log out of `<script type="text/plain" class="battle-log-data">`
fn extract_html_log(html: &str) -> Result<String, ReplayError> {
    let start = html
        .find(LOG_SCRIPT_CLASS)
        .ok_or(ReplayError::MissingLogData)?;
    let after_tag = html[start..]
        .find('>')
        .map(|offset| start + offset + 1)
        .ok_or(ReplayError::MissingLogData)?;
    let end = html[after_tag..]
        .find(SCRIPT_END)
        .map(|offset| after_tag + offset)
        .ok_or(ReplayError::MissingLogData)?;

    let log = html[after_tag..end].replace("<\\/", "</");
    if log.trim().is_empty() {
        return Err(ReplayError::MissingLogData);
    }
    Ok(log.trim_start_matches(['\r', '\n']).to_string())
}
