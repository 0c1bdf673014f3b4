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

use crate::config::Config;
use crate::deck::Deck;
use crate::engine::StudyEngine;
use crate::error::Fallible;

pub fn print_due_cards(path: &Path, config: &Config, include_new: bool) -> Fallible<()> {
    let deck = Deck::load(path)?;
    let engine = StudyEngine::from_config(&config.study)?;
    let include_new = include_new && config.study.include_new;
    let due = engine.get_due_cards(&deck.cards, include_new);
    log::debug!("{} of {} cards due.", due.len(), deck.cards.len());
    println!("{}", serde_json::to_string_pretty(&due)?);
    Ok(())
}
