use serde::{Deserialize, Serialize};

/// Tunables of a chamber instance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChamberParams {
    /// Window length given to proposals submitted without one.
    pub default_window_secs: u64,
    /// How many closed proposals the dashboards list by default.
    pub recently_closed_limit: usize,
}

impl Default for ChamberParams {
    fn default() -> Self {
        Self {
            default_window_secs: 60,
            recently_closed_limit: 5,
        }
    }
}
