use serde::{Deserialize, Serialize};

/// Caller-supplied knobs of the assignment engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct DsspConfig {
    /// Minimal number of consecutive residues inside the φ/ψ window for a
    /// polyproline-II helix.
    pub min_pp_stretch: usize,
}

impl Default for DsspConfig {
    fn default() -> Self {
        Self { min_pp_stretch: 3 }
    }
}
