use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RngMode {
    Manual,
    Seeded,
}

/// Provenance record for a single roll made through [`crate::rng`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollRecord {
    pub id: String,
    pub timestamp: u64,
    pub formula: String,
    pub result_total: i64,
    pub source: String,
}

/// `rng.last_rolls.len()` doubles as the seed-derived roll counter spec §4.2
/// describes — no separate counter field is carried, so `SET_SEED` resets the
/// stream simply by clearing the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngState {
    pub mode: RngMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<String>,
    #[serde(default)]
    pub last_rolls: Vec<RollRecord>,
}

impl RngState {
    pub fn manual() -> Self {
        Self {
            mode: RngMode::Manual,
            seed: None,
            last_rolls: Vec::new(),
        }
    }

    pub fn rolls_consumed(&self) -> u64 {
        self.last_rolls.len() as u64
    }
}

impl Default for RngState {
    fn default() -> Self {
        Self::manual()
    }
}
