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

use crate::types::raw_card::RawCard;
use crate::types::timestamp::Timestamp;

/// Whether a card should be reviewed at `now`.
///
/// Cards that were never seen are due when `include_new` is set. Otherwise a
/// card is due once its review date has passed.
pub fn is_due(card: &RawCard, include_new: bool, now: Timestamp) -> bool {
    if card.times_seen == 0 && include_new {
        return true;
    }
    match card.next_review {
        Some(next_review) => next_review <= now,
        None => false,
    }
}

/// Find the cards due at `now`, most overdue first.
///
/// Cards without a review date sort before everything else. The sort is
/// stable, so ties keep the order the cards were given in.
pub fn due_cards(cards: &[RawCard], include_new: bool, now: Timestamp) -> Vec<&RawCard> {
    let mut due: Vec<&RawCard> = cards
        .iter()
        .filter(|card| is_due(card, include_new, now))
        .collect();
    due.sort_by_key(|card| card.next_review.unwrap_or_else(Timestamp::min));
    due
}
