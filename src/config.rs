// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::path::Path;

use serde::Deserialize;

use crate::algorithm::SchedulingAlgorithm;
use crate::error::Fallible;
use crate::error::fail;
use crate::leitner::DEFAULT_INTERVALS;
use crate::leitner::LeitnerSystem;

pub const CONFIG_FILE_NAME: &str = "flashforge.toml";

#[derive(Deserialize, Clone, PartialEq, Debug, Default)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub study: StudyConfig,
}

#[derive(Deserialize, Clone, PartialEq, Debug)]
#[serde(default, deny_unknown_fields)]
pub struct StudyConfig {
    pub algorithm: SchedulingAlgorithm,
    /// Cap on the number of cards in a drill.
    pub cards_per_session: usize,
    pub shuffle: bool,
    /// Whether never-seen cards count as due.
    pub include_new: bool,
    /// Review interval in days for each Leitner box, first box first.
    pub leitner_intervals: Vec<u32>,
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self {
            algorithm: SchedulingAlgorithm::Sm2,
            cards_per_session: 20,
            shuffle: true,
            include_new: true,
            leitner_intervals: DEFAULT_INTERVALS.to_vec(),
        }
    }
}

impl Config {
    pub fn parse(text: &str) -> Fallible<Self> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the config at `path`. A missing file gives the defaults.
    pub fn load(path: &Path) -> Fallible<Self> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults.", path.display());
            return Ok(Config::default());
        }
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    fn validate(&self) -> Fallible<()> {
        if self.study.cards_per_session == 0 {
            return fail("cards_per_session must be greater than zero.");
        }
        LeitnerSystem::with_intervals(&self.study.leitner_intervals)?;
        Ok(())
    }
}
