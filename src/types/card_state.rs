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

use crate::leitner::LeitnerSystem;
use crate::sm2::DEFAULT_EASE;
use crate::sm2::Sm2Review;
use crate::sm2::clamp_ease;
use crate::types::card_id::CardId;
use crate::types::maturity::Maturity;
use crate::types::quality::Quality;
use crate::types::raw_card::RawCard;
use crate::types::timestamp::Timestamp;

/// A card's learning state for the duration of a study session.
#[derive(Serialize, Clone, PartialEq, Debug)]
pub struct CardState {
    card_id: CardId,
    term: String,
    definition: String,
    hint: Option<String>,
    example: Option<String>,
    /// SM-2 ease factor, always within the SM-2 clamp bounds.
    ease_factor: f64,
    /// Current review interval in days.
    interval: u32,
    /// Consecutive successful SM-2 recalls.
    repetitions: u32,
    /// When the card is next due. `None` means it was never scheduled.
    next_review: Option<Timestamp>,
    /// The card's Leitner box, 1-indexed.
    leitner_box: usize,
    /// Times the card was graded this session.
    times_shown: u32,
    times_correct: u32,
    times_incorrect: u32,
    last_response: Option<Quality>,
    is_starred: bool,
}

impl CardState {
    /// A card that has never been studied.
    pub fn new(card_id: CardId, term: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            card_id,
            term: term.into(),
            definition: definition.into(),
            hint: None,
            example: None,
            ease_factor: DEFAULT_EASE,
            interval: 0,
            repetitions: 0,
            next_review: None,
            leitner_box: 1,
            times_shown: 0,
            times_correct: 0,
            times_incorrect: 0,
            last_response: None,
            is_starred: false,
        }
    }

    /// Seed a card from its stored record. Out-of-range stored values are
    /// forced back into their domains.
    ///
    /// Records written before the Leitner box was stored on its own carry the
    /// box in `repetitions`, so that is the fallback.
    pub fn from_raw(raw: &RawCard, leitner: &LeitnerSystem) -> Self {
        let repetitions = raw.repetitions.unwrap_or(0);
        let leitner_box = match raw.leitner_box {
            Some(b) => leitner.clamp_box(b),
            None => leitner.clamp_box(repetitions as usize + 1),
        };
        Self {
            card_id: raw.id,
            term: raw.term.clone(),
            definition: raw.definition.clone(),
            hint: raw.hint.clone(),
            example: raw.example.clone(),
            ease_factor: clamp_ease(raw.ease_factor.unwrap_or(DEFAULT_EASE)),
            interval: raw.interval.unwrap_or(0),
            repetitions,
            next_review: raw.next_review,
            leitner_box,
            times_shown: 0,
            times_correct: 0,
            times_incorrect: 0,
            last_response: None,
            is_starred: raw.is_starred,
        }
    }

    pub fn card_id(&self) -> CardId {
        self.card_id
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn definition(&self) -> &str {
        &self.definition
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    pub fn example(&self) -> Option<&str> {
        self.example.as_deref()
    }

    pub fn ease_factor(&self) -> f64 {
        self.ease_factor
    }

    pub fn interval(&self) -> u32 {
        self.interval
    }

    pub fn repetitions(&self) -> u32 {
        self.repetitions
    }

    pub fn next_review(&self) -> Option<Timestamp> {
        self.next_review
    }

    pub fn leitner_box(&self) -> usize {
        self.leitner_box
    }

    pub fn times_shown(&self) -> u32 {
        self.times_shown
    }

    pub fn times_correct(&self) -> u32 {
        self.times_correct
    }

    pub fn times_incorrect(&self) -> u32 {
        self.times_incorrect
    }

    pub fn last_response(&self) -> Option<Quality> {
        self.last_response
    }

    pub fn is_starred(&self) -> bool {
        self.is_starred
    }

    pub fn maturity(&self) -> Maturity {
        Maturity::of_interval(self.interval)
    }

    /// Count one graded showing. `times_shown` moves with exactly one of
    /// the outcome counters.
    pub(crate) fn record_outcome(&mut self, correct: bool, quality: Quality) {
        self.times_shown += 1;
        if correct {
            self.times_correct += 1;
        } else {
            self.times_incorrect += 1;
        }
        self.last_response = Some(quality);
    }

    pub(crate) fn apply_sm2(&mut self, review: &Sm2Review) {
        self.ease_factor = review.ease_factor;
        self.interval = review.interval;
        self.repetitions = review.repetitions;
        self.next_review = Some(review.next_review);
    }

    pub(crate) fn apply_leitner(&mut self, leitner_box: usize, interval: u32, next: Timestamp) {
        self.leitner_box = leitner_box;
        self.interval = interval;
        self.next_review = Some(next);
    }

    pub(crate) fn toggle_star(&mut self) -> bool {
        self.is_starred = !self.is_starred;
        self.is_starred
    }

    /// Clear the session-local counters. Scheduling fields are kept.
    pub(crate) fn reset_session_counters(&mut self) {
        self.times_shown = 0;
        self.times_correct = 0;
        self.times_incorrect = 0;
        self.last_response = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sm2::MAX_EASE;
    use crate::sm2::MIN_EASE;

    #[test]
    fn test_defaults() {
        let card = CardState::new(CardId::new(1), "Hello", "Bonjour");
        assert_eq!(card.ease_factor(), 2.5);
        assert_eq!(card.interval(), 0);
        assert_eq!(card.repetitions(), 0);
        assert_eq!(card.times_shown(), 0);
        assert_eq!(card.leitner_box(), 1);
        assert!(!card.is_starred());
        assert_eq!(card.maturity(), Maturity::New);
        assert_eq!(card.next_review(), None);
    }

    #[test]
    fn test_from_raw() {
        let mut raw = RawCard::new(5, "Hello", "Bonjour");
        raw.hint = Some("Greeting".to_string());
        raw.ease_factor = Some(2.1);
        raw.interval = Some(30);
        raw.repetitions = Some(4);
        raw.is_starred = true;
        let card = CardState::from_raw(&raw, &LeitnerSystem::default());
        assert_eq!(card.card_id(), CardId::new(5));
        assert_eq!(card.hint(), Some("Greeting"));
        assert_eq!(card.ease_factor(), 2.1);
        assert_eq!(card.interval(), 30);
        assert_eq!(card.repetitions(), 4);
        assert!(card.is_starred());
        assert_eq!(card.maturity(), Maturity::Mastered);
    }

    #[test]
    fn test_from_raw_clamps_ease() {
        let leitner = LeitnerSystem::default();
        let mut raw = RawCard::new(1, "a", "b");
        raw.ease_factor = Some(0.5);
        assert_eq!(CardState::from_raw(&raw, &leitner).ease_factor(), MIN_EASE);
        raw.ease_factor = Some(9.0);
        assert_eq!(CardState::from_raw(&raw, &leitner).ease_factor(), MAX_EASE);
    }

    #[test]
    fn test_leitner_box_seeding() {
        let leitner = LeitnerSystem::default();
        let mut raw = RawCard::new(1, "a", "b");
        assert_eq!(CardState::from_raw(&raw, &leitner).leitner_box(), 1);
        raw.repetitions = Some(2);
        assert_eq!(CardState::from_raw(&raw, &leitner).leitner_box(), 3);
        raw.repetitions = Some(40);
        assert_eq!(CardState::from_raw(&raw, &leitner).leitner_box(), 5);
        raw.leitner_box = Some(2);
        assert_eq!(CardState::from_raw(&raw, &leitner).leitner_box(), 2);
        raw.leitner_box = Some(0);
        assert_eq!(CardState::from_raw(&raw, &leitner).leitner_box(), 1);
    }

    #[test]
    fn test_record_outcome_keeps_counters_consistent() {
        let mut card = CardState::new(CardId::new(1), "a", "b");
        card.record_outcome(true, Quality::Perfect);
        card.record_outcome(false, Quality::Incorrect);
        card.record_outcome(true, Quality::Correct);
        assert_eq!(card.times_shown(), 3);
        assert_eq!(card.times_correct(), 2);
        assert_eq!(card.times_incorrect(), 1);
        assert_eq!(
            card.times_shown(),
            card.times_correct() + card.times_incorrect()
        );
        assert_eq!(card.last_response(), Some(Quality::Correct));
    }

    #[test]
    fn test_reset_keeps_scheduling() {
        let now = Timestamp::now();
        let mut card = CardState::new(CardId::new(1), "a", "b");
        card.record_outcome(true, Quality::Perfect);
        card.apply_sm2(&Sm2Review {
            ease_factor: 2.6,
            interval: 6,
            repetitions: 2,
            next_review: now.plus_days(6),
        });
        card.reset_session_counters();
        assert_eq!(card.times_shown(), 0);
        assert_eq!(card.last_response(), None);
        assert_eq!(card.ease_factor(), 2.6);
        assert_eq!(card.interval(), 6);
        assert_eq!(card.repetitions(), 2);
        assert_eq!(card.next_review(), Some(now.plus_days(6)));
    }
}
