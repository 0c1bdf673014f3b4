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

//! Study history and progress figures.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::Datelike;
use chrono::Duration;
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use chrono::Timelike;
use serde::Deserialize;
use serde::Serialize;

use crate::deck::write_atomically;
use crate::due::is_due;
use crate::engine::SessionSummary;
use crate::error::Fallible;
use crate::types::achievement::Achievement;
use crate::types::achievement::Unlocked;
use crate::types::maturity::Maturity;
use crate::types::raw_card::RawCard;
use crate::types::timestamp::Timestamp;

/// Streaks are not counted further back than this.
const MAX_STREAK_DAYS: i64 = 365;

fn percent(correct: u32, incorrect: u32) -> f64 {
    let total = correct + incorrect;
    if total == 0 {
        return 0.0;
    }
    (f64::from(correct) / f64::from(total)) * 100.0
}

/// Activity totals for one calendar day.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct DailyProgress {
    pub cards_studied: u32,
    pub correct: u32,
    pub incorrect: u32,
    pub seconds: u64,
    pub sessions: u32,
}

impl DailyProgress {
    pub fn accuracy(&self) -> f64 {
        percent(self.correct, self.incorrect)
    }

    fn add(&mut self, other: &DailyProgress) {
        self.cards_studied += other.cards_studied;
        self.correct += other.correct;
        self.incorrect += other.incorrect;
        self.seconds += other.seconds;
        self.sessions += other.sessions;
    }
}

/// Totals over a range of days.
#[derive(Serialize, Clone, PartialEq, Debug)]
pub struct PeriodSummary {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub cards_studied: u32,
    pub correct: u32,
    pub incorrect: u32,
    pub accuracy: f64,
    pub seconds: u64,
    pub days_studied: u32,
}

#[derive(Serialize, Clone, PartialEq, Debug)]
pub struct AllTimeStats {
    pub cards_studied: u32,
    pub correct: u32,
    pub incorrect: u32,
    pub accuracy: f64,
    pub seconds: u64,
    pub sessions: u32,
    pub streak: u32,
    pub days_active: usize,
}

/// One entry of a daily breakdown.
#[derive(Serialize, Clone, PartialEq, Debug)]
pub struct DayEntry {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub progress: DailyProgress,
}

/// Per-day study history and earned achievements.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug, Default)]
pub struct StatisticsManager {
    days: BTreeMap<NaiveDate, DailyProgress>,
    #[serde(default)]
    achievements: Vec<Unlocked>,
}

impl StatisticsManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the history at `path`. A missing file is an empty history.
    pub fn load(path: &Path) -> Fallible<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn save(&self, path: &Path) -> Fallible<()> {
        let text = serde_json::to_string_pretty(self)?;
        write_atomically(path, &text)
    }

    pub fn day(&self, date: NaiveDate) -> Option<&DailyProgress> {
        self.days.get(&date)
    }

    /// Fold a session that finished at local time `at` into that day's
    /// totals. Returns the achievements it unlocked.
    pub fn record_session(
        &mut self,
        summary: &SessionSummary,
        at: NaiveDateTime,
    ) -> Vec<Achievement> {
        let date = at.date();
        let session = DailyProgress {
            cards_studied: summary.cards_studied,
            correct: summary.correct,
            incorrect: summary.incorrect,
            seconds: summary.duration_seconds,
            sessions: 1,
        };
        self.days.entry(date).or_default().add(&session);
        log::debug!("Recorded {} cards on {date}.", summary.cards_studied);

        let earned: Vec<Achievement> = self
            .qualifying(summary, at)
            .into_iter()
            .filter(|achievement| !self.is_unlocked(*achievement))
            .collect();
        for achievement in &earned {
            log::debug!("Unlocked {achievement:?}.");
            self.achievements.push(Unlocked {
                achievement: *achievement,
                unlocked_at: at,
            });
        }
        earned
    }

    /// Every achievement the history and this session satisfy, earned or not.
    fn qualifying(&self, summary: &SessionSummary, at: NaiveDateTime) -> Vec<Achievement> {
        let total: u32 = self.days.values().map(|day| day.cards_studied).sum();
        let streak = self.streak(at.date());
        let studied = summary.cards_studied;
        let hour = at.hour();
        let checks = [
            (Achievement::FirstCard, total > 0),
            (Achievement::TenCards, total >= 10),
            (Achievement::HundredCards, total >= 100),
            (Achievement::ThousandCards, total >= 1000),
            (Achievement::Streak3, streak >= 3),
            (Achievement::Streak7, streak >= 7),
            (Achievement::Streak30, streak >= 30),
            (Achievement::Streak100, streak >= 100),
            (
                Achievement::PerfectSession,
                studied >= 10 && summary.incorrect == 0,
            ),
            (
                Achievement::SpeedDemon,
                studied >= 50 && summary.duration_seconds <= 300,
            ),
            (Achievement::NightOwl, studied > 0 && hour < 4),
            (Achievement::EarlyBird, studied > 0 && (4..6).contains(&hour)),
            (Achievement::Marathon, summary.duration_seconds >= 3600),
        ];
        checks
            .into_iter()
            .filter(|(_, met)| *met)
            .map(|(achievement, _)| achievement)
            .collect()
    }

    pub fn is_unlocked(&self, achievement: Achievement) -> bool {
        self.achievements
            .iter()
            .any(|unlocked| unlocked.achievement == achievement)
    }

    /// Earned achievements in the order they were earned.
    pub fn achievements(&self) -> &[Unlocked] {
        &self.achievements
    }

    /// Consecutive days with studying, counting back from `today`. If
    /// nothing was studied today yet the count starts from yesterday.
    pub fn streak(&self, today: NaiveDate) -> u32 {
        let mut streak = 0;
        for offset in 0..MAX_STREAK_DAYS {
            let date = today - Duration::days(offset);
            match self.days.get(&date) {
                Some(day) if day.cards_studied > 0 => streak += 1,
                Some(_) => break,
                None if offset == 0 => continue,
                None => break,
            }
        }
        streak
    }

    pub fn all_time(&self, today: NaiveDate) -> AllTimeStats {
        let mut total = DailyProgress::default();
        for day in self.days.values() {
            total.add(day);
        }
        AllTimeStats {
            cards_studied: total.cards_studied,
            correct: total.correct,
            incorrect: total.incorrect,
            accuracy: total.accuracy(),
            seconds: total.seconds,
            sessions: total.sessions,
            streak: self.streak(today),
            days_active: self
                .days
                .values()
                .filter(|day| day.cards_studied > 0)
                .count(),
        }
    }

    /// Totals for the Monday-to-Sunday week containing `today`.
    pub fn weekly_summary(&self, today: NaiveDate) -> PeriodSummary {
        let offset = i64::from(today.weekday().num_days_from_monday());
        let start = today - Duration::days(offset);
        let end = start + Duration::days(6);
        self.period(start, end)
    }

    /// Totals from the first of the month up to and including `today`.
    pub fn monthly_summary(&self, today: NaiveDate) -> PeriodSummary {
        let start = today.with_day(1).unwrap_or(today);
        self.period(start, today)
    }

    fn period(&self, start: NaiveDate, end: NaiveDate) -> PeriodSummary {
        let mut total = DailyProgress::default();
        let mut days_studied = 0;
        for day in self.days.range(start..=end).map(|(_, day)| day) {
            total.add(day);
            if day.cards_studied > 0 {
                days_studied += 1;
            }
        }
        PeriodSummary {
            start,
            end,
            cards_studied: total.cards_studied,
            correct: total.correct,
            incorrect: total.incorrect,
            accuracy: total.accuracy(),
            seconds: total.seconds,
            days_studied,
        }
    }

    /// The last `days` days, most recent first. Days without activity are
    /// reported as zeros.
    pub fn daily_breakdown(&self, today: NaiveDate, days: u32) -> Vec<DayEntry> {
        (0..i64::from(days))
            .map(|offset| {
                let date = today - Duration::days(offset);
                DayEntry {
                    date,
                    progress: self.days.get(&date).copied().unwrap_or_default(),
                }
            })
            .collect()
    }

    /// Cards studied on each of the last `days` days, zero for days without
    /// activity.
    pub fn heatmap(&self, today: NaiveDate, days: u32) -> BTreeMap<NaiveDate, u32> {
        (0..i64::from(days))
            .map(|offset| {
                let date = today - Duration::days(offset);
                let studied = self.days.get(&date).map_or(0, |day| day.cards_studied);
                (date, studied)
            })
            .collect()
    }
}

/// The cards with the worst recall ratio, worst first. Cards that were never
/// seen go last.
pub fn difficult_cards(cards: &[RawCard], limit: usize) -> Vec<&RawCard> {
    let score = |card: &RawCard| {
        if card.times_seen == 0 {
            f64::INFINITY
        } else {
            f64::from(card.times_correct) / f64::from(card.times_seen)
        }
    };
    let mut sorted: Vec<&RawCard> = cards.iter().collect();
    sorted.sort_by(|a, b| score(a).total_cmp(&score(b)));
    sorted.truncate(limit);
    sorted
}

/// How far along a deck is.
#[derive(Serialize, Clone, PartialEq, Debug)]
pub struct DeckProgress {
    pub total: usize,
    pub mastered: usize,
    pub learning: usize,
    pub new: usize,
    pub due: usize,
    pub last_studied: Option<Timestamp>,
    /// Share of the deck that is mastered, as a percentage.
    pub mastery_percent: f64,
}

impl DeckProgress {
    pub fn from_cards(cards: &[RawCard], now: Timestamp) -> Self {
        let mut progress = DeckProgress {
            total: cards.len(),
            mastered: 0,
            learning: 0,
            new: 0,
            due: 0,
            last_studied: None,
            mastery_percent: 0.0,
        };
        for card in cards {
            match Maturity::of_interval(card.interval.unwrap_or(0)) {
                Maturity::New => progress.new += 1,
                Maturity::Learning => progress.learning += 1,
                Maturity::Mastered => progress.mastered += 1,
            }
            if is_due(card, true, now) {
                progress.due += 1;
            }
            progress.last_studied = progress.last_studied.max(card.last_seen_at);
        }
        if progress.total > 0 {
            progress.mastery_percent = (progress.mastered as f64 / progress.total as f64) * 100.0;
        }
        progress
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::types::study_mode::StudyMode;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn noon(date: NaiveDate) -> NaiveDateTime {
        date.and_hms_opt(12, 0, 0).unwrap()
    }

    fn at(date: NaiveDate, hour: u32) -> NaiveDateTime {
        date.and_hms_opt(hour, 30, 0).unwrap()
    }

    fn summary(correct: u32, incorrect: u32, seconds: u64) -> SessionSummary {
        SessionSummary {
            deck_id: 1,
            mode: StudyMode::Flashcards,
            total_cards: (correct + incorrect) as usize,
            cards_studied: correct + incorrect,
            correct,
            incorrect,
            accuracy: percent(correct, incorrect),
            duration_seconds: seconds,
            started_at: Timestamp::now(),
            is_complete: true,
        }
    }

    #[test]
    fn test_record_session_accumulates() {
        let mut stats = StatisticsManager::new();
        let today = date(2025, 3, 12);
        stats.record_session(&summary(3, 1, 60), noon(today));
        stats.record_session(&summary(1, 1, 30), noon(today));
        let day = stats.day(today).unwrap();
        assert_eq!(day.cards_studied, 6);
        assert_eq!(day.correct, 4);
        assert_eq!(day.incorrect, 2);
        assert_eq!(day.seconds, 90);
        assert_eq!(day.sessions, 2);
    }

    #[test]
    fn test_streak() {
        let mut stats = StatisticsManager::new();
        let today = date(2025, 3, 12);
        for offset in 0..3 {
            stats.record_session(&summary(1, 0, 10), noon(today - Duration::days(offset)));
        }
        stats.record_session(&summary(1, 0, 10), noon(today - Duration::days(5)));
        assert_eq!(stats.streak(today), 3);
    }

    #[test]
    fn test_streak_starts_yesterday_when_today_is_empty() {
        let mut stats = StatisticsManager::new();
        let today = date(2025, 3, 12);
        stats.record_session(&summary(1, 0, 10), noon(today - Duration::days(1)));
        stats.record_session(&summary(1, 0, 10), noon(today - Duration::days(2)));
        assert_eq!(stats.streak(today), 2);
        assert_eq!(stats.streak(today + Duration::days(1)), 0);
    }

    #[test]
    fn test_streak_empty_history() {
        assert_eq!(StatisticsManager::new().streak(date(2025, 1, 1)), 0);
    }

    #[test]
    fn test_streak_is_capped() {
        let mut stats = StatisticsManager::new();
        let today = date(2025, 3, 12);
        for offset in 0..400 {
            stats.record_session(&summary(1, 0, 1), noon(today - Duration::days(offset)));
        }
        assert_eq!(stats.streak(today), 365);
    }

    #[test]
    fn test_weekly_summary() {
        let mut stats = StatisticsManager::new();
        // Wednesday.
        let today = date(2025, 3, 12);
        stats.record_session(&summary(2, 2, 40), noon(date(2025, 3, 10)));
        stats.record_session(&summary(4, 0, 20), noon(today));
        stats.record_session(&summary(9, 9, 99), noon(date(2025, 3, 9)));
        let week = stats.weekly_summary(today);
        assert_eq!(week.start, date(2025, 3, 10));
        assert_eq!(week.end, date(2025, 3, 16));
        assert_eq!(week.cards_studied, 8);
        assert_eq!(week.correct, 6);
        assert_eq!(week.incorrect, 2);
        assert_eq!(week.accuracy, 75.0);
        assert_eq!(week.seconds, 60);
        assert_eq!(week.days_studied, 2);
    }

    #[test]
    fn test_all_time() {
        let mut stats = StatisticsManager::new();
        let today = date(2025, 3, 12);
        stats.record_session(&summary(3, 1, 10), noon(today));
        stats.record_session(&summary(1, 3, 10), noon(date(2025, 1, 1)));
        let all = stats.all_time(today);
        assert_eq!(all.cards_studied, 8);
        assert_eq!(all.accuracy, 50.0);
        assert_eq!(all.sessions, 2);
        assert_eq!(all.streak, 1);
        assert_eq!(all.days_active, 2);
    }

    #[test]
    fn test_daily_breakdown() {
        let mut stats = StatisticsManager::new();
        let today = date(2025, 3, 12);
        stats.record_session(&summary(2, 0, 10), noon(today - Duration::days(1)));
        let days = stats.daily_breakdown(today, 3);
        assert_eq!(days.len(), 3);
        assert_eq!(days[0].date, today);
        assert_eq!(days[0].progress, DailyProgress::default());
        assert_eq!(days[1].progress.cards_studied, 2);
        assert_eq!(days[2].date, date(2025, 3, 10));
    }

    #[test]
    fn test_load_and_save() -> Fallible<()> {
        let dir = tempdir()?;
        let path = dir.path().join("history.json");
        assert_eq!(StatisticsManager::load(&path)?, StatisticsManager::new());
        let mut stats = StatisticsManager::new();
        stats.record_session(&summary(1, 1, 5), noon(date(2025, 3, 12)));
        stats.save(&path)?;
        assert_eq!(StatisticsManager::load(&path)?, stats);
        Ok(())
    }

    #[test]
    fn test_save_leaves_no_temporary_file() -> Fallible<()> {
        let dir = tempdir()?;
        let path = dir.path().join("history.json");
        std::fs::write(&path, "{}")?;
        StatisticsManager::new().save(&path)?;
        assert!(!dir.path().join("history.json.tmp").exists());
        assert_eq!(StatisticsManager::load(&path)?, StatisticsManager::new());
        Ok(())
    }

    #[test]
    fn test_load_history_without_achievements() -> Fallible<()> {
        let dir = tempdir()?;
        let path = dir.path().join("history.json");
        std::fs::write(
            &path,
            r#"{"days": {"2025-03-12": {"cards_studied": 2, "correct": 1, "incorrect": 1, "seconds": 5, "sessions": 1}}}"#,
        )?;
        let stats = StatisticsManager::load(&path)?;
        assert_eq!(stats.day(date(2025, 3, 12)).unwrap().cards_studied, 2);
        assert!(stats.achievements().is_empty());
        Ok(())
    }

    #[test]
    fn test_monthly_summary() {
        let mut stats = StatisticsManager::new();
        let today = date(2025, 3, 12);
        stats.record_session(&summary(9, 9, 99), noon(date(2025, 2, 28)));
        stats.record_session(&summary(2, 1, 30), noon(date(2025, 3, 1)));
        stats.record_session(&summary(1, 0, 10), noon(today));
        stats.record_session(&summary(5, 5, 50), noon(date(2025, 3, 13)));
        let month = stats.monthly_summary(today);
        assert_eq!(month.start, date(2025, 3, 1));
        assert_eq!(month.end, today);
        assert_eq!(month.cards_studied, 4);
        assert_eq!(month.correct, 3);
        assert_eq!(month.incorrect, 1);
        assert_eq!(month.accuracy, 75.0);
        assert_eq!(month.seconds, 40);
        assert_eq!(month.days_studied, 2);
    }

    #[test]
    fn test_monthly_summary_on_the_first() {
        let mut stats = StatisticsManager::new();
        let today = date(2025, 3, 1);
        stats.record_session(&summary(3, 0, 10), noon(date(2025, 2, 28)));
        let month = stats.monthly_summary(today);
        assert_eq!(month.start, today);
        assert_eq!(month.end, today);
        assert_eq!(month.cards_studied, 0);
        assert_eq!(month.accuracy, 0.0);

        stats.record_session(&summary(1, 0, 10), noon(today));
        assert_eq!(stats.monthly_summary(today).cards_studied, 1);
        // A new year starts a new month too.
        assert_eq!(stats.monthly_summary(date(2026, 1, 1)).cards_studied, 0);
    }

    #[test]
    fn test_heatmap() {
        let mut stats = StatisticsManager::new();
        let today = date(2025, 3, 12);
        stats.record_session(&summary(2, 1, 10), noon(today - Duration::days(1)));
        stats.record_session(&summary(4, 0, 10), noon(today - Duration::days(6)));
        stats.record_session(&summary(7, 0, 10), noon(today - Duration::days(30)));
        let heatmap = stats.heatmap(today, 7);
        assert_eq!(heatmap.len(), 7);
        assert_eq!(heatmap.keys().next(), Some(&date(2025, 3, 6)));
        assert_eq!(heatmap.keys().last(), Some(&today));
        assert_eq!(heatmap[&today], 0);
        assert_eq!(heatmap[&date(2025, 3, 11)], 3);
        assert_eq!(heatmap[&date(2025, 3, 6)], 4);
        assert_eq!(heatmap.values().sum::<u32>(), 7);
        assert!(stats.heatmap(today, 0).is_empty());
    }

    #[test]
    fn test_first_session_unlocks_first_card() {
        let mut stats = StatisticsManager::new();
        let now = noon(date(2025, 3, 12));
        let earned = stats.record_session(&summary(1, 0, 10), now);
        assert_eq!(earned, vec![Achievement::FirstCard]);
        assert!(stats.is_unlocked(Achievement::FirstCard));
        assert_eq!(
            stats.achievements(),
            &[Unlocked {
                achievement: Achievement::FirstCard,
                unlocked_at: now,
            }]
        );
    }

    #[test]
    fn test_achievements_unlock_once() {
        let mut stats = StatisticsManager::new();
        let today = date(2025, 3, 12);
        assert!(!stats.record_session(&summary(1, 0, 10), noon(today)).is_empty());
        assert!(stats.record_session(&summary(1, 0, 10), noon(today)).is_empty());
        let first = stats
            .achievements()
            .iter()
            .filter(|u| u.achievement == Achievement::FirstCard)
            .count();
        assert_eq!(first, 1);
    }

    #[test]
    fn test_card_milestones() {
        let mut stats = StatisticsManager::new();
        let today = date(2025, 3, 12);
        let earned = stats.record_session(&summary(5, 4, 10), noon(today));
        assert!(!earned.contains(&Achievement::TenCards));
        let earned = stats.record_session(&summary(0, 1, 10), noon(today));
        assert_eq!(earned, vec![Achievement::TenCards]);
        let earned = stats.record_session(&summary(45, 44, 10_000), noon(today));
        assert!(!earned.contains(&Achievement::HundredCards));
        let earned = stats.record_session(&summary(1, 0, 10), noon(today));
        assert_eq!(earned, vec![Achievement::HundredCards]);
        let earned = stats.record_session(&summary(450, 450, 10_000), noon(today));
        assert_eq!(earned, vec![Achievement::ThousandCards]);
    }

    #[test]
    fn test_streak_milestones() {
        let mut stats = StatisticsManager::new();
        let start = date(2025, 1, 1);
        let mut unlocked_on = Vec::new();
        for offset in 0..100 {
            let day = start + Duration::days(offset);
            for achievement in stats.record_session(&summary(1, 0, 10), noon(day)) {
                unlocked_on.push((achievement, offset + 1));
            }
        }
        for (achievement, streak) in [
            (Achievement::Streak3, 3),
            (Achievement::Streak7, 7),
            (Achievement::Streak30, 30),
            (Achievement::Streak100, 100),
        ] {
            assert!(unlocked_on.contains(&(achievement, streak)));
        }
    }

    #[test]
    fn test_perfect_session() {
        let mut stats = StatisticsManager::new();
        let today = date(2025, 3, 12);
        let earned = stats.record_session(&summary(9, 0, 100), noon(today));
        assert!(!earned.contains(&Achievement::PerfectSession));
        let earned = stats.record_session(&summary(10, 1, 100), noon(today));
        assert!(!earned.contains(&Achievement::PerfectSession));
        let earned = stats.record_session(&summary(10, 0, 100), noon(today));
        assert!(earned.contains(&Achievement::PerfectSession));
    }

    #[test]
    fn test_speed_demon() {
        let mut stats = StatisticsManager::new();
        let today = date(2025, 3, 12);
        let earned = stats.record_session(&summary(40, 10, 301), noon(today));
        assert!(!earned.contains(&Achievement::SpeedDemon));
        let earned = stats.record_session(&summary(49, 0, 60), noon(today));
        assert!(!earned.contains(&Achievement::SpeedDemon));
        let earned = stats.record_session(&summary(40, 10, 300), noon(today));
        assert!(earned.contains(&Achievement::SpeedDemon));
    }

    #[test]
    fn test_marathon() {
        let mut stats = StatisticsManager::new();
        let today = date(2025, 3, 12);
        let earned = stats.record_session(&summary(1, 0, 3599), noon(today));
        assert!(!earned.contains(&Achievement::Marathon));
        let earned = stats.record_session(&summary(1, 0, 3600), noon(today));
        assert!(earned.contains(&Achievement::Marathon));
    }

    #[test]
    fn test_time_of_day_achievements() {
        let today = date(2025, 3, 12);
        let earned_at = |hour: u32| {
            StatisticsManager::new().record_session(&summary(1, 0, 10), at(today, hour))
        };
        assert!(earned_at(0).contains(&Achievement::NightOwl));
        assert!(earned_at(3).contains(&Achievement::NightOwl));
        assert!(!earned_at(4).contains(&Achievement::NightOwl));
        assert!(earned_at(4).contains(&Achievement::EarlyBird));
        assert!(earned_at(5).contains(&Achievement::EarlyBird));
        assert!(!earned_at(6).contains(&Achievement::EarlyBird));
        assert!(!earned_at(23).contains(&Achievement::NightOwl));

        let empty = StatisticsManager::new().record_session(&summary(0, 0, 10), at(today, 2));
        assert!(empty.is_empty());
    }

    #[test]
    fn test_achievements_survive_save() -> Fallible<()> {
        let dir = tempdir()?;
        let path = dir.path().join("history.json");
        let mut stats = StatisticsManager::new();
        stats.record_session(&summary(10, 0, 10), at(date(2025, 3, 12), 5));
        stats.save(&path)?;
        let loaded = StatisticsManager::load(&path)?;
        assert!(loaded.is_unlocked(Achievement::PerfectSession));
        assert!(loaded.is_unlocked(Achievement::EarlyBird));
        assert_eq!(loaded.achievements(), stats.achievements());
        Ok(())
    }

    #[test]
    fn test_difficult_cards() {
        let mut cards = Vec::new();
        for (id, seen, correct) in [(1, 0, 0), (2, 4, 3), (3, 4, 1), (4, 2, 1)] {
            let mut card = RawCard::new(id, "t", "d");
            card.times_seen = seen;
            card.times_correct = correct;
            cards.push(card);
        }
        let ids: Vec<i64> = difficult_cards(&cards, 10)
            .iter()
            .map(|c| c.id.into_inner())
            .collect();
        assert_eq!(ids, vec![3, 4, 2, 1]);
        assert_eq!(difficult_cards(&cards, 2).len(), 2);
    }

    #[test]
    fn test_deck_progress() {
        let now = Timestamp::now();
        let mut cards = Vec::new();
        for (id, interval) in [(1, None), (2, Some(3)), (3, Some(30)), (4, Some(21))] {
            let mut card = RawCard::new(id, "t", "d");
            card.interval = interval;
            if interval.is_some() {
                card.times_seen = 1;
                card.next_review = Some(now.plus_days(1));
                card.last_seen_at = Some(now.minus_days(id as u32));
            }
            cards.push(card);
        }
        let progress = DeckProgress::from_cards(&cards, now);
        assert_eq!(progress.total, 4);
        assert_eq!(progress.new, 1);
        assert_eq!(progress.learning, 1);
        assert_eq!(progress.mastered, 2);
        assert_eq!(progress.due, 1);
        assert_eq!(progress.mastery_percent, 50.0);
        assert_eq!(progress.last_studied, Some(now.minus_days(2)));
    }

    #[test]
    fn test_deck_progress_of_empty_deck() {
        let progress = DeckProgress::from_cards(&[], Timestamp::now());
        assert_eq!(progress.total, 0);
        assert_eq!(progress.mastery_percent, 0.0);
    }
}
