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

use serde::Serialize;

/// Cards reviewed at intervals of this many days or more are mastered.
pub const MASTERY_INTERVAL: u32 = 21;

/// How far along a card is, judged by its current review interval.
#[derive(Serialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "snake_case")]
pub enum Maturity {
    New,
    Learning,
    Mastered,
}

impl Maturity {
    pub fn of_interval(interval: u32) -> Self {
        if interval == 0 {
            Maturity::New
        } else if interval < MASTERY_INTERVAL {
            Maturity::Learning
        } else {
            Maturity::Mastered
        }
    }
}
