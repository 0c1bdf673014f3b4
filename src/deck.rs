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

use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;
use std::time::Instant;

use serde::Deserialize;
use serde::Serialize;

use crate::engine::ReviewDelta;
use crate::error::Fallible;
use crate::error::fail;
use crate::types::card_id::CardId;
use crate::types::raw_card::RawCard;

/// A deck stored as a single JSON file.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct Deck {
    pub deck_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub cards: Vec<RawCard>,
}

impl Deck {
    pub fn load(path: &Path) -> Fallible<Self> {
        if !path.exists() {
            return fail(format!("deck file {} does not exist.", path.display()));
        }
        log::debug!("Loading deck...");
        let start = Instant::now();
        let text = std::fs::read_to_string(path)?;
        let deck: Deck = serde_json::from_str(&text)?;
        let duration = start.elapsed().as_millis();
        log::debug!("Loaded {} cards in {duration}ms.", deck.cards.len());
        Ok(deck)
    }

    /// Write the deck to `path`, replacing the file atomically.
    pub fn save(&self, path: &Path) -> Fallible<()> {
        let text = serde_json::to_string_pretty(self)?;
        write_atomically(path, &text)
    }

    /// Check that every card has a term and a definition, and that no id is
    /// used twice.
    pub fn validate(&self) -> Fallible<()> {
        let mut seen: HashSet<CardId> = HashSet::new();
        for card in &self.cards {
            if card.term.trim().is_empty() {
                return fail(format!("card {} has an empty term.", card.id));
            }
            if card.definition.trim().is_empty() {
                return fail(format!("card {} has an empty definition.", card.id));
            }
            if !seen.insert(card.id) {
                return fail(format!("card {} appears more than once.", card.id));
            }
        }
        Ok(())
    }

    /// Apply a review to the card it names. Returns false if the deck has no
    /// such card.
    pub fn apply_delta(&mut self, delta: &ReviewDelta) -> bool {
        match self.cards.iter_mut().find(|card| card.id == delta.card_id) {
            Some(card) => {
                card.apply_delta(delta);
                true
            }
            None => {
                log::warn!("Review for unknown card {}.", delta.card_id);
                false
            }
        }
    }

    pub fn set_starred(&mut self, card_id: CardId, starred: bool) {
        if let Some(card) = self.cards.iter_mut().find(|card| card.id == card_id) {
            card.is_starred = starred;
        }
    }
}

/// Replace the file at `path` with `text`. The text goes to a sibling
/// temporary file first, so readers see either the old or the new contents.
pub(crate) fn write_atomically(path: &Path, text: &str) -> Fallible<()> {
    let Some(name) = path.file_name() else {
        return fail(format!("{} is not a file path.", path.display()));
    };
    let mut tmp_name = name.to_os_string();
    tmp_name.push(".tmp");
    let tmp = path.with_file_name(tmp_name);
    std::fs::write(&tmp, text)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

/// Where the study history for the deck at `deck_path` lives.
pub fn history_path(deck_path: &Path) -> PathBuf {
    deck_path.with_extension("history.json")
}
