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

//! The SuperMemo 2 scheduler.

use crate::types::quality::Quality;
use crate::types::timestamp::Timestamp;

/// The ease factor of a card that has never been reviewed.
pub const DEFAULT_EASE: f64 = 2.5;

/// The lowest ease factor a card can reach.
pub const MIN_EASE: f64 = 1.3;

/// The highest ease factor a card can reach.
pub const MAX_EASE: f64 = 3.0;

/// Interval after the first successful recall, in days.
const FIRST_INTERVAL: u32 = 1;

/// Interval after the second consecutive successful recall, in days.
const SECOND_INTERVAL: u32 = 6;

/// Scheduling parameters produced by an SM-2 review.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Sm2Review {
    pub ease_factor: f64,
    pub interval: u32,
    pub repetitions: u32,
    pub next_review: Timestamp,
}

/// Force an ease factor into `[MIN_EASE, MAX_EASE]`. NaN is treated as a
/// fresh card.
pub fn clamp_ease(ease: f64) -> f64 {
    if ease.is_nan() {
        DEFAULT_EASE
    } else {
        ease.clamp(MIN_EASE, MAX_EASE)
    }
}

/// The ease factor after a response of the given quality.
pub fn new_ease(ease: f64, quality: Quality) -> f64 {
    let q = 5.0 - f64::from(quality.value());
    clamp_ease(ease + (0.1 - q * (0.08 + q * 0.02)))
}

/// Compute the next review for a card.
///
/// A failing grade (below 3) resets the repetition counter and schedules the
/// card for tomorrow. A passing grade schedules it 1 day out, then 6 days,
/// then at the previous interval multiplied by the new ease factor.
pub fn next_review(
    ease_factor: f64,
    interval: u32,
    repetitions: u32,
    quality: Quality,
    now: Timestamp,
) -> Sm2Review {
    let ease_factor = new_ease(ease_factor, quality);
    let (interval, repetitions) = if quality.is_pass() {
        let repetitions = repetitions + 1;
        let interval = match repetitions {
            1 => FIRST_INTERVAL,
            2 => SECOND_INTERVAL,
            _ => (f64::from(interval) * ease_factor).floor() as u32,
        };
        (interval, repetitions)
    } else {
        (FIRST_INTERVAL, 0)
    };
    Sm2Review {
        ease_factor,
        interval,
        repetitions,
        next_review: now.plus_days(interval),
    }
}

/// Map a pass/fail response onto the quality scale, for front-ends that
/// only ask whether the answer was right.
pub fn quality_from_binary(correct: bool, hesitation: bool) -> Quality {
    match (correct, hesitation) {
        (true, false) => Quality::Perfect,
        (true, true) => Quality::Correct,
        (false, _) => Quality::Incorrect,
    }
}
