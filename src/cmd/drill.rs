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

use std::io::BufRead;
use std::io::Write;
use std::path::Path;

use crate::algorithm::SchedulingAlgorithm;
use crate::config::Config;
use crate::deck::Deck;
use crate::deck::history_path;
use crate::due::due_cards;
use crate::engine::SessionSummary;
use crate::engine::StudyEngine;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::session::SessionOptions;
use crate::stats::StatisticsManager;
use crate::types::quality::Quality;
use crate::types::raw_card::RawCard;
use crate::types::study_mode::StudyMode;
use crate::types::timestamp::Timestamp;

/// Command-line overrides for a drill.
pub struct DrillArgs {
    pub mode: StudyMode,
    pub algorithm: Option<SchedulingAlgorithm>,
    pub limit: Option<usize>,
    pub starred_only: bool,
    pub shuffle: bool,
    pub definition_first: bool,
}

pub fn start_drill(path: &Path, mut config: Config, args: DrillArgs) -> Fallible<()> {
    let mut deck = Deck::load(path)?;
    deck.validate()?;
    if let Some(algorithm) = args.algorithm {
        config.study.algorithm = algorithm;
    }
    let mut engine = StudyEngine::from_config(&config.study)?;
    let cards = select_cards(&deck, args.mode, config.study.include_new, Timestamp::now());
    if cards.is_empty() {
        println!("No cards to drill.");
        return Ok(());
    }
    let options = SessionOptions {
        mode: args.mode,
        shuffle: args.shuffle && config.study.shuffle,
        show_definition_first: args.definition_first,
        starred_only: args.starred_only,
        limit: Some(args.limit.unwrap_or(config.study.cards_per_session)),
    };

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let summary = drill(
        &mut engine,
        &mut deck,
        &cards,
        options,
        &mut stdin.lock(),
        &mut stdout,
    )?;

    deck.save(path)?;
    if summary.cards_studied > 0 {
        let history_path = history_path(path);
        let mut history = StatisticsManager::load(&history_path)?;
        let earned = history.record_session(&summary, Timestamp::now().local_datetime());
        history.save(&history_path)?;
        for achievement in earned {
            println!(
                "Achievement unlocked: {}: {}",
                achievement.name(),
                achievement.description()
            );
        }
    }
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

/// The cards a drill in `mode` should draw from. Scheduling modes only see
/// the cards that are due; practice modes see the whole deck.
fn select_cards(deck: &Deck, mode: StudyMode, include_new: bool, now: Timestamp) -> Vec<RawCard> {
    if mode.drives_scheduling() {
        due_cards(&deck.cards, include_new, now)
            .into_iter()
            .cloned()
            .collect()
    } else {
        deck.cards.clone()
    }
}

/// Run a session over `cards`, reading commands from `input`. Reviews are
/// written back into `deck` when the mode drives scheduling.
fn drill<R: BufRead, W: Write>(
    engine: &mut StudyEngine,
    deck: &mut Deck,
    cards: &[RawCard],
    options: SessionOptions,
    input: &mut R,
    output: &mut W,
) -> Fallible<SessionSummary> {
    engine.start_session(deck.deck_id, cards, options);
    loop {
        let Some(session) = engine.current_session() else {
            break;
        };
        let Some(card) = session.current_card() else {
            break;
        };
        let position = session.current_index() + 1;
        let total = session.len();
        let (prompt, answer) = if options.show_definition_first {
            (card.definition(), card.term())
        } else {
            (card.term(), card.definition())
        };
        let card_id = card.card_id();
        let answer = answer.to_string();
        let example = card.example().map(str::to_string);
        let star = if card.is_starred() { " *" } else { "" };

        writeln!(output, "[{position}/{total}] Q: {prompt}{star}")?;
        if let Some(hint) = card.hint() {
            writeln!(output, "Hint: {hint}")?;
        }
        writeln!(output, "[enter: reveal, s: skip, p: previous, *: star, q: quit]")?;
        let Some(command) = read_line(input)? else {
            break;
        };
        match command.as_str() {
            "" => {}
            "s" => {
                engine.skip_card();
                continue;
            }
            "p" => {
                engine.previous_card();
                continue;
            }
            "*" => {
                let starred = engine.toggle_star();
                deck.set_starred(card_id, starred);
                continue;
            }
            "q" => break,
            _ => {
                writeln!(output, "Unknown command.")?;
                continue;
            }
        }

        writeln!(output, "A: {answer}")?;
        if let Some(example) = example {
            writeln!(output, "Example: {example}")?;
        }
        let Some((correct, quality)) = read_grade(input, output)? else {
            break;
        };
        if let Some((_, delta)) = engine.record_response(correct, quality) {
            if options.mode.drives_scheduling() {
                deck.apply_delta(&delta);
            }
        }
        engine.next_card();
    }
    engine
        .end_session()
        .ok_or_else(|| ErrorReport::new("no session to end."))
}

/// Read one trimmed line. `None` at end of input.
fn read_line<R: BufRead>(input: &mut R) -> Fallible<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Ask for a grade until a valid one is given. `None` means the user quit.
fn read_grade<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> Fallible<Option<(bool, Option<Quality>)>> {
    loop {
        writeln!(output, "Grade: 0-5, or y/n (q to quit)")?;
        let Some(line) = read_line(input)? else {
            return Ok(None);
        };
        match line.as_str() {
            "y" => return Ok(Some((true, None))),
            "n" => return Ok(Some((false, None))),
            "q" => return Ok(None),
            _ => {}
        }
        match line.parse::<u8>().map(Quality::try_from) {
            Ok(Ok(quality)) => return Ok(Some((quality.is_pass(), Some(quality)))),
            _ => writeln!(output, "Invalid input. Enter a number between 0 and 5, y or n.")?,
        }
    }
}
