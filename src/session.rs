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

use crate::types::card_state::CardState;
use crate::types::study_mode::StudyMode;
use crate::types::timestamp::Timestamp;

/// How a session was requested. The settings are kept on the session so a
/// reset can replay them.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SessionOptions {
    pub mode: StudyMode,
    /// Randomize the queue before applying `limit`.
    pub shuffle: bool,
    /// Prompt with the definition instead of the term. Front-end only.
    pub show_definition_first: bool,
    pub starred_only: bool,
    /// Maximum number of cards in the session.
    pub limit: Option<usize>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            mode: StudyMode::Flashcards,
            shuffle: true,
            show_definition_first: false,
            starred_only: false,
            limit: None,
        }
    }
}

/// The review queue for one deck.
///
/// The cursor only ever moves within `0..=cards.len()`; a cursor equal to
/// the queue length means the session is complete.
#[derive(Clone, Debug)]
pub struct StudySessionState {
    deck_id: i64,
    options: SessionOptions,
    cards: Vec<CardState>,
    current_index: usize,
    started_at: Timestamp,
    cards_studied: u32,
    correct_count: u32,
    incorrect_count: u32,
}

impl StudySessionState {
    pub fn new(deck_id: i64, options: SessionOptions, cards: Vec<CardState>) -> Self {
        Self {
            deck_id,
            options,
            cards,
            current_index: 0,
            started_at: Timestamp::now(),
            cards_studied: 0,
            correct_count: 0,
            incorrect_count: 0,
        }
    }

    pub fn deck_id(&self) -> i64 {
        self.deck_id
    }

    pub fn mode(&self) -> StudyMode {
        self.options.mode
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    pub fn cards(&self) -> &[CardState] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn started_at(&self) -> Timestamp {
        self.started_at
    }

    pub fn cards_studied(&self) -> u32 {
        self.cards_studied
    }

    pub fn correct_count(&self) -> u32 {
        self.correct_count
    }

    pub fn incorrect_count(&self) -> u32 {
        self.incorrect_count
    }

    pub fn current_card(&self) -> Option<&CardState> {
        self.cards.get(self.current_index)
    }

    pub(crate) fn current_card_mut(&mut self) -> Option<&mut CardState> {
        self.cards.get_mut(self.current_index)
    }

    /// Percentage of the queue the cursor has moved past.
    pub fn progress_percent(&self) -> f64 {
        if self.cards.is_empty() {
            return 0.0;
        }
        (self.current_index as f64 / self.cards.len() as f64) * 100.0
    }

    /// Percentage of correct responses, or zero before the first response.
    pub fn accuracy(&self) -> f64 {
        let total = self.correct_count + self.incorrect_count;
        if total == 0 {
            return 0.0;
        }
        (f64::from(self.correct_count) / f64::from(total)) * 100.0
    }

    pub fn is_complete(&self) -> bool {
        self.current_index >= self.cards.len()
    }

    pub fn remaining(&self) -> usize {
        self.cards.len().saturating_sub(self.current_index)
    }

    pub(crate) fn record_outcome(&mut self, correct: bool) {
        self.cards_studied += 1;
        if correct {
            self.correct_count += 1;
        } else {
            self.incorrect_count += 1;
        }
    }

    /// Move the cursor forward, stopping at the end of the queue.
    pub(crate) fn advance(&mut self) {
        if self.current_index < self.cards.len() {
            self.current_index += 1;
        }
    }

    /// Move the cursor back, stopping at the start of the queue.
    pub(crate) fn rewind(&mut self) {
        self.current_index = self.current_index.saturating_sub(1);
    }

    /// Move the current card to the back of the queue. Returns false when
    /// there is no current card.
    pub(crate) fn defer_current(&mut self) -> bool {
        if self.current_index >= self.cards.len() {
            return false;
        }
        let card = self.cards.remove(self.current_index);
        self.cards.push(card);
        true
    }

    /// Zero the cursor and every session-local counter, and restart the
    /// clock. Card order is left to the caller.
    pub(crate) fn restart(&mut self, now: Timestamp) {
        self.current_index = 0;
        self.cards_studied = 0;
        self.correct_count = 0;
        self.incorrect_count = 0;
        self.started_at = now;
        for card in self.cards.iter_mut() {
            card.reset_session_counters();
        }
    }

    pub(crate) fn cards_mut(&mut self) -> &mut [CardState] {
        &mut self.cards
    }

    #[cfg(test)]
    pub(crate) fn with_counts(
        mut self,
        current_index: usize,
        correct: u32,
        incorrect: u32,
    ) -> Self {
        self.current_index = current_index.min(self.cards.len());
        self.correct_count = correct;
        self.incorrect_count = incorrect;
        self.cards_studied = correct + incorrect;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::card_id::CardId;

    fn cards(n: i64) -> Vec<CardState> {
        (0..n)
            .map(|i| CardState::new(CardId::new(i), format!("Term{i}"), format!("Def{i}")))
            .collect()
    }

    #[test]
    fn test_progress() {
        let session =
            StudySessionState::new(1, SessionOptions::default(), cards(10)).with_counts(5, 0, 0);
        assert_eq!(session.progress_percent(), 50.0);
    }

    #[test]
    fn test_progress_of_empty_session() {
        let session = StudySessionState::new(1, SessionOptions::default(), Vec::new());
        assert_eq!(session.progress_percent(), 0.0);
        assert!(session.is_complete());
        assert!(session.current_card().is_none());
    }

    #[test]
    fn test_accuracy() {
        let session =
            StudySessionState::new(1, SessionOptions::default(), Vec::new()).with_counts(0, 7, 3);
        assert_eq!(session.accuracy(), 70.0);
    }

    #[test]
    fn test_accuracy_without_responses() {
        let session = StudySessionState::new(1, SessionOptions::default(), cards(3));
        assert_eq!(session.accuracy(), 0.0);
    }

    #[test]
    fn test_remaining() {
        let session =
            StudySessionState::new(1, SessionOptions::default(), cards(10)).with_counts(3, 0, 0);
        assert_eq!(session.remaining(), 7);
    }

    #[test]
    fn test_cursor_bounds() {
        let mut session = StudySessionState::new(1, SessionOptions::default(), cards(2));
        session.rewind();
        assert_eq!(session.current_index(), 0);
        for _ in 0..5 {
            session.advance();
        }
        assert_eq!(session.current_index(), 2);
        assert!(session.is_complete());
        assert_eq!(session.remaining(), 0);
    }

    #[test]
    fn test_defer_current() {
        let mut session = StudySessionState::new(1, SessionOptions::default(), cards(3));
        assert!(session.defer_current());
        let ids: Vec<i64> = session
            .cards()
            .iter()
            .map(|c| c.card_id().into_inner())
            .collect();
        assert_eq!(ids, vec![1, 2, 0]);
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.len(), 3);
    }

    #[test]
    fn test_defer_when_complete() {
        let mut session = StudySessionState::new(1, SessionOptions::default(), cards(1));
        session.advance();
        assert!(!session.defer_current());
    }
}
