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

//! The Leitner box scheduler.
//!
//! Cards move up one box on every correct answer and fall back to the first
//! box on a mistake. Each box has a fixed review interval.

use crate::error::Fallible;
use crate::error::fail;
use crate::types::timestamp::Timestamp;

pub const DEFAULT_BOXES: usize = 5;

pub const DEFAULT_INTERVALS: [u32; DEFAULT_BOXES] = [1, 2, 4, 7, 14];

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct LeitnerSystem {
    num_boxes: usize,
    /// Review interval in days for each box. Always `num_boxes` long.
    intervals: Vec<u32>,
}

impl LeitnerSystem {
    /// A system with `num_boxes` boxes using the default intervals.
    pub fn new(num_boxes: usize) -> Self {
        fit_intervals(&DEFAULT_INTERVALS, num_boxes)
    }

    /// A system with one box per interval. Intervals must be non-empty and
    /// strictly ascending.
    pub fn with_intervals(intervals: &[u32]) -> Fallible<Self> {
        if intervals.is_empty() {
            return fail("Leitner intervals must not be empty.");
        }
        if intervals.windows(2).any(|w| w[0] >= w[1]) {
            return fail("Leitner intervals must be strictly ascending.");
        }
        if intervals[0] == 0 {
            return fail("Leitner intervals must be at least one day.");
        }
        Ok(fit_intervals(intervals, intervals.len()))
    }

    pub fn num_boxes(&self) -> usize {
        self.num_boxes
    }

    pub fn intervals(&self) -> &[u32] {
        &self.intervals
    }

    /// The box a card lands in after a response. Boxes are 1-indexed.
    pub fn next_box(&self, current_box: usize, correct: bool) -> usize {
        if correct {
            (current_box + 1).min(self.num_boxes)
        } else {
            1
        }
    }

    /// The review interval of a box, in days. Unknown boxes get the
    /// interval of the first box.
    pub fn interval(&self, box_number: usize) -> u32 {
        if (1..=self.num_boxes).contains(&box_number) {
            self.intervals[box_number - 1]
        } else {
            self.intervals[0]
        }
    }

    pub fn next_review(&self, box_number: usize, now: Timestamp) -> Timestamp {
        now.plus_days(self.interval(box_number))
    }

    /// Force a box number into `1..=num_boxes`.
    pub fn clamp_box(&self, box_number: usize) -> usize {
        box_number.clamp(1, self.num_boxes)
    }
}

impl Default for LeitnerSystem {
    fn default() -> Self {
        Self::new(DEFAULT_BOXES)
    }
}

/// Truncate or extend `intervals` to exactly `num_boxes` entries (at least
/// one). Extra boxes double the interval of the box before them.
fn fit_intervals(intervals: &[u32], num_boxes: usize) -> LeitnerSystem {
    let num_boxes = num_boxes.max(1);
    let mut fitted: Vec<u32> = intervals.iter().copied().take(num_boxes).collect();
    while fitted.len() < num_boxes {
        let last = fitted.last().copied().unwrap_or(1);
        fitted.push(last.saturating_mul(2));
    }
    LeitnerSystem {
        num_boxes,
        intervals: fitted,
    }
}
