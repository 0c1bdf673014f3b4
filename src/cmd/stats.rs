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

use std::path::Path;

use serde::Serialize;

use crate::deck::Deck;
use crate::deck::history_path;
use crate::error::Fallible;
use crate::stats::AllTimeStats;
use crate::stats::DeckProgress;
use crate::stats::PeriodSummary;
use crate::stats::StatisticsManager;
use crate::stats::difficult_cards;
use crate::types::achievement::Unlocked;
use crate::types::card_id::CardId;
use crate::types::timestamp::Timestamp;

/// How many of the hardest cards to list.
const DIFFICULT_CARD_COUNT: usize = 5;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats<'a> {
    deck_id: i64,
    deck_name: Option<&'a str>,
    progress: DeckProgress,
    this_week: PeriodSummary,
    this_month: PeriodSummary,
    all_time: AllTimeStats,
    difficult_cards: Vec<DifficultCard<'a>>,
    achievements: Vec<Unlocked>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DifficultCard<'a> {
    id: CardId,
    term: &'a str,
    times_seen: u32,
    times_correct: u32,
}

pub fn deck_stats<'a>(
    deck: &'a Deck,
    history: &StatisticsManager,
    now: Timestamp,
) -> Stats<'a> {
    let today = now.local_date();
    let difficult_cards = difficult_cards(&deck.cards, DIFFICULT_CARD_COUNT)
        .into_iter()
        .filter(|card| card.times_seen > 0)
        .map(|card| DifficultCard {
            id: card.id,
            term: &card.term,
            times_seen: card.times_seen,
            times_correct: card.times_correct,
        })
        .collect();
    Stats {
        deck_id: deck.deck_id,
        deck_name: deck.name.as_deref(),
        progress: DeckProgress::from_cards(&deck.cards, now),
        this_week: history.weekly_summary(today),
        this_month: history.monthly_summary(today),
        all_time: history.all_time(today),
        difficult_cards,
        achievements: history.achievements().to_vec(),
    }
}

pub fn print_deck_stats(path: &Path) -> Fallible<()> {
    let deck = Deck::load(path)?;
    let history = StatisticsManager::load(&history_path(path))?;
    let stats = deck_stats(&deck, &history, Timestamp::now());
    let stats_json = serde_json::to_string_pretty(&stats)?;
    println!("{}", stats_json);
    Ok(())
}
