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
use std::path::PathBuf;

use clap::Parser;

use crate::algorithm::SchedulingAlgorithm;
use crate::cmd::check::check_deck;
use crate::cmd::drill::DrillArgs;
use crate::cmd::drill::start_drill;
use crate::cmd::due::print_due_cards;
use crate::cmd::stats::print_deck_stats;
use crate::config::CONFIG_FILE_NAME;
use crate::config::Config;
use crate::error::Fallible;
use crate::types::study_mode::StudyMode;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Drill the cards in a deck.
    Drill {
        /// Path to the deck file.
        deck: PathBuf,
        /// Path to the config file. Defaults to `flashforge.toml` next to the deck.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Study mode.
        #[arg(long, value_enum, default_value_t = StudyMode::Flashcards)]
        mode: StudyMode,
        /// Scheduling algorithm. Overrides the config.
        #[arg(long)]
        algorithm: Option<SchedulingAlgorithm>,
        /// Maximum number of cards to drill. Overrides the config.
        #[arg(long)]
        limit: Option<usize>,
        /// Only drill starred cards.
        #[arg(long)]
        starred_only: bool,
        /// Keep the deck's card order.
        #[arg(long)]
        no_shuffle: bool,
        /// Show the definition and ask for the term.
        #[arg(long)]
        definition_first: bool,
    },
    /// List the cards due for review.
    Due {
        /// Path to the deck file.
        deck: PathBuf,
        /// Path to the config file.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Leave out cards that were never studied.
        #[arg(long)]
        no_new: bool,
    },
    /// Print deck and study statistics.
    Stats {
        /// Path to the deck file.
        deck: PathBuf,
    },
    /// Check a deck file for errors.
    Check {
        /// Path to the deck file.
        deck: PathBuf,
    },
}

pub fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Drill {
            deck,
            config,
            mode,
            algorithm,
            limit,
            starred_only,
            no_shuffle,
            definition_first,
        } => {
            let config = load_config(&deck, config)?;
            start_drill(
                &deck,
                config,
                DrillArgs {
                    mode,
                    algorithm,
                    limit,
                    starred_only,
                    shuffle: !no_shuffle,
                    definition_first,
                },
            )
        }
        Command::Due {
            deck,
            config,
            no_new,
        } => {
            let config = load_config(&deck, config)?;
            print_due_cards(&deck, &config, !no_new)
        }
        Command::Stats { deck } => print_deck_stats(&deck),
        Command::Check { deck } => check_deck(&deck),
    }
}

fn load_config(deck: &Path, config: Option<PathBuf>) -> Fallible<Config> {
    let path = match config {
        Some(path) => path,
        None => deck
            .parent()
            .map(|dir| dir.join(CONFIG_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME)),
    };
    Config::load(&path)
}
