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

//! The study engine: builds review sessions and grades responses.
//!
//! Navigation and grading on a missing or finished session are no-ops that
//! return `None` (or `false`). Front-ends are expected to check
//! `get_current_card` before acting, so these cases are not errors.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::Serialize;

use crate::algorithm::SchedulingAlgorithm;
use crate::config::StudyConfig;
use crate::due::due_cards;
use crate::error::Fallible;
use crate::leitner::LeitnerSystem;
use crate::session::SessionOptions;
use crate::session::StudySessionState;
use crate::sm2;
use crate::types::card_id::CardId;
use crate::types::card_state::CardState;
use crate::types::quality::Quality;
use crate::types::raw_card::RawCard;
use crate::types::study_mode::StudyMode;
use crate::types::timestamp::Timestamp;

/// The scheduling fields a response changed.
#[derive(Serialize, Clone, Copy, PartialEq, Debug)]
#[serde(tag = "algorithm", rename_all = "snake_case")]
pub enum Schedule {
    Sm2 {
        ease_factor: f64,
        interval: u32,
        repetitions: u32,
        next_review: Timestamp,
    },
    Leitner {
        leitner_box: usize,
        interval: u32,
        next_review: Timestamp,
    },
}

impl Schedule {
    pub fn interval(&self) -> u32 {
        match self {
            Schedule::Sm2 { interval, .. } => *interval,
            Schedule::Leitner { interval, .. } => *interval,
        }
    }

    pub fn next_review(&self) -> Timestamp {
        match self {
            Schedule::Sm2 { next_review, .. } => *next_review,
            Schedule::Leitner { next_review, .. } => *next_review,
        }
    }
}

/// What a graded response changed, for the caller to persist against
/// `card_id`. The counters are the card's session-local totals.
#[derive(Serialize, Clone, PartialEq, Debug)]
pub struct ReviewDelta {
    pub card_id: CardId,
    pub correct: bool,
    pub quality: Quality,
    #[serde(flatten)]
    pub schedule: Schedule,
    pub times_seen: u32,
    pub times_correct: u32,
    pub times_incorrect: u32,
    pub last_seen_at: Timestamp,
}

/// A snapshot of a session's progress.
#[derive(Serialize, Clone, PartialEq, Debug)]
pub struct SessionSummary {
    pub deck_id: i64,
    pub mode: StudyMode,
    pub total_cards: usize,
    pub cards_studied: u32,
    pub correct: u32,
    pub incorrect: u32,
    pub accuracy: f64,
    pub duration_seconds: u64,
    pub started_at: Timestamp,
    pub is_complete: bool,
}

impl SessionSummary {
    fn of(session: &StudySessionState, now: Timestamp) -> Self {
        Self {
            deck_id: session.deck_id(),
            mode: session.mode(),
            total_cards: session.len(),
            cards_studied: session.cards_studied(),
            correct: session.correct_count(),
            incorrect: session.incorrect_count(),
            accuracy: session.accuracy(),
            duration_seconds: now.seconds_since(session.started_at()),
            started_at: session.started_at(),
            is_complete: session.is_complete(),
        }
    }
}

pub struct StudyEngine {
    algorithm: SchedulingAlgorithm,
    leitner: LeitnerSystem,
    rng: StdRng,
    current_session: Option<StudySessionState>,
}

impl StudyEngine {
    pub fn new(algorithm: SchedulingAlgorithm) -> Self {
        Self::with_leitner(algorithm, LeitnerSystem::default())
    }

    pub fn with_leitner(algorithm: SchedulingAlgorithm, leitner: LeitnerSystem) -> Self {
        Self {
            algorithm,
            leitner,
            rng: StdRng::from_entropy(),
            current_session: None,
        }
    }

    pub fn from_config(config: &StudyConfig) -> Fallible<Self> {
        let leitner = LeitnerSystem::with_intervals(&config.leitner_intervals)?;
        Ok(Self::with_leitner(config.algorithm, leitner))
    }

    /// Replace the shuffling source with a seeded one, making card order
    /// reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn algorithm(&self) -> SchedulingAlgorithm {
        self.algorithm
    }

    pub fn leitner(&self) -> &LeitnerSystem {
        &self.leitner
    }

    pub fn current_session(&self) -> Option<&StudySessionState> {
        self.current_session.as_ref()
    }

    /// Start a new session over `cards`, replacing any live one.
    ///
    /// Shuffling happens before the limit is applied, so a limited shuffled
    /// session is a uniform sample of the deck. A limit of zero means no
    /// limit. If no card survives filtering the session is empty.
    pub fn start_session(
        &mut self,
        deck_id: i64,
        cards: &[RawCard],
        options: SessionOptions,
    ) -> &StudySessionState {
        let mut states: Vec<CardState> = cards
            .iter()
            .filter(|card| !options.starred_only || card.is_starred)
            .map(|card| CardState::from_raw(card, &self.leitner))
            .collect();
        if options.shuffle {
            states.shuffle(&mut self.rng);
        }
        if let Some(limit) = options.limit.filter(|&limit| limit > 0) {
            states.truncate(limit);
        }
        log::debug!(
            "Starting {} session on deck {deck_id}: {} of {} cards, {}.",
            options.mode,
            states.len(),
            cards.len(),
            self.algorithm
        );
        self.current_session
            .insert(StudySessionState::new(deck_id, options, states))
    }

    pub fn get_current_card(&self) -> Option<&CardState> {
        self.current_session.as_ref()?.current_card()
    }

    /// Grade the current card. Does not move the cursor.
    ///
    /// When `quality` is absent it is derived from `correct`. Returns the
    /// updated card and the changes to persist, or `None` when there is no
    /// card to grade.
    pub fn record_response(
        &mut self,
        correct: bool,
        quality: Option<Quality>,
    ) -> Option<(&CardState, ReviewDelta)> {
        let now = Timestamp::now();
        let algorithm = self.algorithm;
        let leitner = &self.leitner;
        let Some(session) = self.current_session.as_mut() else {
            log::debug!("Ignoring response: no active session.");
            return None;
        };
        if session.current_card().is_none() {
            log::debug!("Ignoring response: session is complete.");
            return None;
        }
        session.record_outcome(correct);
        let card = session.current_card_mut()?;
        let quality = quality.unwrap_or_else(|| sm2::quality_from_binary(correct, false));
        card.record_outcome(correct, quality);

        let schedule = match algorithm {
            SchedulingAlgorithm::Sm2 => {
                let review = sm2::next_review(
                    card.ease_factor(),
                    card.interval(),
                    card.repetitions(),
                    quality,
                    now,
                );
                card.apply_sm2(&review);
                Schedule::Sm2 {
                    ease_factor: review.ease_factor,
                    interval: review.interval,
                    repetitions: review.repetitions,
                    next_review: review.next_review,
                }
            }
            SchedulingAlgorithm::Leitner => {
                let leitner_box = leitner.next_box(card.leitner_box(), correct);
                let interval = leitner.interval(leitner_box);
                let next_review = leitner.next_review(leitner_box, now);
                card.apply_leitner(leitner_box, interval, next_review);
                Schedule::Leitner {
                    leitner_box,
                    interval,
                    next_review,
                }
            }
        };

        log::debug!(
            "{} {} ({}) interval={}d due={}",
            card.card_id(),
            quality.as_str(),
            quality.value(),
            schedule.interval(),
            schedule.next_review()
        );

        let delta = ReviewDelta {
            card_id: card.card_id(),
            correct,
            quality,
            schedule,
            times_seen: card.times_shown(),
            times_correct: card.times_correct(),
            times_incorrect: card.times_incorrect(),
            last_seen_at: now,
        };
        Some((&*card, delta))
    }

    /// Move to the next card. Returns `None` once the session is complete.
    pub fn next_card(&mut self) -> Option<&CardState> {
        let session = self.current_session.as_mut()?;
        session.advance();
        session.current_card()
    }

    /// Move back one card, staying put at the start of the queue.
    pub fn previous_card(&mut self) -> Option<&CardState> {
        let session = self.current_session.as_mut()?;
        session.rewind();
        session.current_card()
    }

    /// Defer the current card to the end of the queue and return the card
    /// that took its place.
    pub fn skip_card(&mut self) -> Option<&CardState> {
        let session = self.current_session.as_mut()?;
        if !session.defer_current() {
            return None;
        }
        session.current_card()
    }

    /// Flip the star on the current card and return the new value.
    pub fn toggle_star(&mut self) -> bool {
        self.current_session
            .as_mut()
            .and_then(|session| session.current_card_mut())
            .map(|card| card.toggle_star())
            .unwrap_or(false)
    }

    pub fn get_session_summary(&self) -> Option<SessionSummary> {
        let session = self.current_session.as_ref()?;
        Some(SessionSummary::of(session, Timestamp::now()))
    }

    /// End the live session, returning its final summary.
    pub fn end_session(&mut self) -> Option<SessionSummary> {
        let summary = self.get_session_summary()?;
        self.current_session = None;
        log::debug!(
            "Session on deck {} ended: {}/{} correct in {}s.",
            summary.deck_id,
            summary.correct,
            summary.cards_studied,
            summary.duration_seconds
        );
        Some(summary)
    }

    /// Restart the live session from the top. Session counters are cleared
    /// and the queue is reshuffled if the session was shuffled; scheduling
    /// fields are left alone.
    pub fn reset_session(&mut self) {
        let Some(session) = self.current_session.as_mut() else {
            return;
        };
        session.restart(Timestamp::now());
        if session.options().shuffle {
            session.cards_mut().shuffle(&mut self.rng);
        }
        log::debug!("Session on deck {} reset.", session.deck_id());
    }

    /// The cards in `cards` due for review now, most overdue first. Does not
    /// touch the live session.
    pub fn get_due_cards<'a>(&self, cards: &'a [RawCard], include_new: bool) -> Vec<&'a RawCard> {
        due_cards(cards, include_new, Timestamp::now())
    }
}

impl Default for StudyEngine {
    fn default() -> Self {
        Self::new(SchedulingAlgorithm::default())
    }
}
