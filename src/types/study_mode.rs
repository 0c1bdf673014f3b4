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

use std::fmt::Display;
use std::fmt::Formatter;

use clap::ValueEnum;
use serde::Deserialize;
use serde::Serialize;

/// The way a deck is being studied. Only `Flashcards` and `Learn` feed
/// responses into the schedulers; the rest are labels for the front-end.
#[derive(ValueEnum, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug, Default)]
#[serde(rename_all = "snake_case")]
pub enum StudyMode {
    #[default]
    Flashcards,
    Learn,
    Write,
    Test,
    Match,
    Gravity,
}

impl StudyMode {
    pub fn as_str(self) -> &'static str {
        match self {
            StudyMode::Flashcards => "flashcards",
            StudyMode::Learn => "learn",
            StudyMode::Write => "write",
            StudyMode::Test => "test",
            StudyMode::Match => "match",
            StudyMode::Gravity => "gravity",
        }
    }

    pub fn drives_scheduling(self) -> bool {
        matches!(self, StudyMode::Flashcards | StudyMode::Learn)
    }
}

impl Display for StudyMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drives_scheduling() {
        assert!(StudyMode::Flashcards.drives_scheduling());
        assert!(StudyMode::Learn.drives_scheduling());
        assert!(!StudyMode::Match.drives_scheduling());
        assert!(!StudyMode::Gravity.drives_scheduling());
    }

    #[test]
    fn test_serde_names() -> crate::error::Fallible<()> {
        assert_eq!(serde_json::to_string(&StudyMode::Flashcards)?, "\"flashcards\"");
        let mode: StudyMode = serde_json::from_str("\"write\"")?;
        assert_eq!(mode, StudyMode::Write);
        Ok(())
    }
}
