//! Governance parameter set.
//!
//! Minimum deposit and voting window, owned by the engine instance and
//! passed in at construction — never ambient global state. Parameter
//! changes apply to proposals submitted afterwards; in-flight proposals
//! keep the voting-end time computed at their own submission.

use crate::error::{GovError, GovResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

const DEFAULT_MIN_DEPOSIT: u64 = 10;
const DEFAULT_VOTING_WINDOW_SECS: u64 = 172_800; // 48 hours

/// Governance parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovParams {
    /// Smallest deposit accepted with a submission.
    #[serde(default = "default_min_deposit")]
    pub min_deposit: u64,

    /// Duration of the voting window in seconds.
    #[serde(default = "default_voting_window_secs")]
    pub voting_window_secs: u64,
}

fn default_min_deposit() -> u64 {
    DEFAULT_MIN_DEPOSIT
}

fn default_voting_window_secs() -> u64 {
    DEFAULT_VOTING_WINDOW_SECS
}

impl Default for GovParams {
    fn default() -> Self {
        Self {
            min_deposit: default_min_deposit(),
            voting_window_secs: default_voting_window_secs(),
        }
    }
}

impl GovParams {
    /// Voting window as a `Duration`.
    pub fn voting_window(&self) -> Duration {
        Duration::from_secs(self.voting_window_secs)
    }

    /// Check both parameters, reporting the first violation.
    pub fn validate(&self) -> GovResult<()> {
        if self.voting_window_secs == 0 {
            return Err(GovError::InvalidVotingWindow(None));
        }
        if self.min_deposit == 0 {
            return Err(GovError::InsufficientDeposit(Some(
                "minimum deposit must be positive".into(),
            )));
        }
        Ok(())
    }

    /// Load parameters from a TOML string.
    ///
    /// The voting window accepts either plain seconds or a humantime
    /// string:
    ///
    /// ```toml
    /// min_deposit = 25
    /// voting_window = "48h"
    /// ```
    pub fn from_toml_str(contents: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let file: ParamsFile = toml::from_str(contents)
            .map_err(|e| format!("failed to parse governance params: {e}"))?;

        let voting_window_secs = match file.voting_window {
            None => default_voting_window_secs(),
            Some(WindowField::Secs(secs)) => secs,
            Some(WindowField::Human(ref text)) => parse_voting_window(text)?,
        };

        let params = Self {
            min_deposit: file.min_deposit.unwrap_or_else(default_min_deposit),
            voting_window_secs,
        };
        params.validate()?;
        Ok(params)
    }

    /// Load parameters from a TOML file.
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(path)
            .map_err(|e| format!("failed to read params file '{}': {}", path.display(), e))?;
        Self::from_toml_str(&contents)
    }
}

/// On-disk shape: both fields optional, window as seconds or a humantime
/// string.
#[derive(Deserialize)]
struct ParamsFile {
    min_deposit: Option<u64>,
    voting_window: Option<WindowField>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WindowField {
    Secs(u64),
    Human(String),
}

/// Parse a voting window from a humantime string ("48h", "2 days").
///
/// Zero and unparseable input fail with `InvalidVotingWindow`.
pub fn parse_voting_window(input: &str) -> GovResult<u64> {
    let duration = humantime::parse_duration(input).map_err(|e| {
        GovError::InvalidVotingWindow(Some(format!("invalid voting window '{input}': {e}")))
    })?;
    let secs = duration.as_secs();
    if secs == 0 {
        return Err(GovError::InvalidVotingWindow(None));
    }
    Ok(secs)
}
