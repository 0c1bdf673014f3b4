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
use serde::Serialize;

use crate::engine::ReviewDelta;
use crate::engine::Schedule;
use crate::types::card_id::CardId;
use crate::types::timestamp::Timestamp;

/// A card record as supplied by whatever stores the deck. Every scheduling
/// field is optional: absent fields mean the card was never studied.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct RawCard {
    pub id: CardId,
    pub term: String,
    pub definition: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    #[serde(default)]
    pub is_starred: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ease_factor: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repetitions: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_review: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leitner_box: Option<usize>,
    #[serde(default)]
    pub times_seen: u32,
    #[serde(default)]
    pub times_correct: u32,
    #[serde(default)]
    pub times_incorrect: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_seen_at: Option<Timestamp>,
}

impl RawCard {
    pub fn new(id: i64, term: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            id: CardId::new(id),
            term: term.into(),
            definition: definition.into(),
            hint: None,
            example: None,
            is_starred: false,
            ease_factor: None,
            interval: None,
            repetitions: None,
            next_review: None,
            leitner_box: None,
            times_seen: 0,
            times_correct: 0,
            times_incorrect: 0,
            last_seen_at: None,
        }
    }

    /// Write the result of a graded response back into this record.
    ///
    /// The counters carried by a delta are session-local, so the stored
    /// lifetime totals are bumped by the single response instead.
    pub fn apply_delta(&mut self, delta: &ReviewDelta) {
        self.times_seen += 1;
        if delta.correct {
            self.times_correct += 1;
        } else {
            self.times_incorrect += 1;
        }
        self.last_seen_at = Some(delta.last_seen_at);
        self.apply_schedule(&delta.schedule);
    }

    fn apply_schedule(&mut self, schedule: &Schedule) {
        match *schedule {
            Schedule::Sm2 {
                ease_factor,
                interval,
                repetitions,
                next_review,
            } => {
                self.ease_factor = Some(ease_factor);
                self.interval = Some(interval);
                self.repetitions = Some(repetitions);
                self.next_review = Some(next_review);
            }
            Schedule::Leitner {
                leitner_box,
                interval,
                next_review,
            } => {
                self.leitner_box = Some(leitner_box);
                self.interval = Some(interval);
                self.next_review = Some(next_review);
            }
        }
    }
}
