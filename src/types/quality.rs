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

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de::Error;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;

/// A response grade on the SM-2 scale.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum Quality {
    /// Complete blackout.
    Blackout,
    /// Incorrect, but remembered once the answer was shown.
    Incorrect,
    /// Incorrect, but the answer seemed easy to recall.
    IncorrectEasy,
    /// Correct, with serious difficulty.
    CorrectHard,
    /// Correct, after some hesitation.
    Correct,
    /// Perfect response.
    Perfect,
}

impl Quality {
    pub fn value(self) -> u8 {
        match self {
            Quality::Blackout => 0,
            Quality::Incorrect => 1,
            Quality::IncorrectEasy => 2,
            Quality::CorrectHard => 3,
            Quality::Correct => 4,
            Quality::Perfect => 5,
        }
    }

    /// Grades of 3 and above count as a successful recall.
    pub fn is_pass(self) -> bool {
        self.value() >= 3
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Quality::Blackout => "blackout",
            Quality::Incorrect => "incorrect",
            Quality::IncorrectEasy => "incorrect-easy",
            Quality::CorrectHard => "correct-hard",
            Quality::Correct => "correct",
            Quality::Perfect => "perfect",
        }
    }
}

impl TryFrom<u8> for Quality {
    type Error = ErrorReport;

    fn try_from(value: u8) -> Fallible<Self> {
        match value {
            0 => Ok(Quality::Blackout),
            1 => Ok(Quality::Incorrect),
            2 => Ok(Quality::IncorrectEasy),
            3 => Ok(Quality::CorrectHard),
            4 => Ok(Quality::Correct),
            5 => Ok(Quality::Perfect),
            _ => fail(format!("quality must be between 0 and 5, got {value}.")),
        }
    }
}

impl Serialize for Quality {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(self.value())
    }
}

impl<'de> Deserialize<'de> for Quality {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = u8::deserialize(deserializer)?;
        Quality::try_from(value).map_err(D::Error::custom)
    }
}
