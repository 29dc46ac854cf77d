use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::world::stage_rng;

/// Seasonal palette the texture atlas is painted with.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub enum Theme {
    #[default]
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Theme {
    pub const ALL: [Theme; 4] = [Theme::Spring, Theme::Summer, Theme::Fall, Theme::Winter];

    /// Pick a theme from its own stream so it does not disturb the generators.
    pub fn from_seed(seed: u32) -> Self {
        let mut rng = stage_rng(seed);
        Theme::ALL[rng.gen_range(0..Theme::ALL.len())]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Theme::Spring => "spring",
            Theme::Summer => "summer",
            Theme::Fall => "fall",
            Theme::Winter => "winter",
        }
    }
}
