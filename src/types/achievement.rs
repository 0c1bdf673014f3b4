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

use chrono::NaiveDateTime;
use serde::Deserialize;
use serde::Serialize;

/// A study milestone.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Achievement {
    #[serde(rename = "first_card")]
    FirstCard,
    #[serde(rename = "10_cards")]
    TenCards,
    #[serde(rename = "100_cards")]
    HundredCards,
    #[serde(rename = "1000_cards")]
    ThousandCards,
    #[serde(rename = "streak_3")]
    Streak3,
    #[serde(rename = "streak_7")]
    Streak7,
    #[serde(rename = "streak_30")]
    Streak30,
    #[serde(rename = "streak_100")]
    Streak100,
    #[serde(rename = "perfect_session")]
    PerfectSession,
    #[serde(rename = "speed_demon")]
    SpeedDemon,
    #[serde(rename = "night_owl")]
    NightOwl,
    #[serde(rename = "early_bird")]
    EarlyBird,
    #[serde(rename = "marathon")]
    Marathon,
}

impl Achievement {
    pub const ALL: [Achievement; 13] = [
        Achievement::FirstCard,
        Achievement::TenCards,
        Achievement::HundredCards,
        Achievement::ThousandCards,
        Achievement::Streak3,
        Achievement::Streak7,
        Achievement::Streak30,
        Achievement::Streak100,
        Achievement::PerfectSession,
        Achievement::SpeedDemon,
        Achievement::NightOwl,
        Achievement::EarlyBird,
        Achievement::Marathon,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Achievement::FirstCard => "First Steps",
            Achievement::TenCards => "Getting Started",
            Achievement::HundredCards => "Century",
            Achievement::ThousandCards => "Millennium",
            Achievement::Streak3 => "Consistent",
            Achievement::Streak7 => "Week Warrior",
            Achievement::Streak30 => "Monthly Master",
            Achievement::Streak100 => "Centurion",
            Achievement::PerfectSession => "Perfectionist",
            Achievement::SpeedDemon => "Speed Demon",
            Achievement::NightOwl => "Night Owl",
            Achievement::EarlyBird => "Early Bird",
            Achievement::Marathon => "Marathon",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Achievement::FirstCard => "Study your first card",
            Achievement::TenCards => "Study 10 cards",
            Achievement::HundredCards => "Study 100 cards",
            Achievement::ThousandCards => "Study 1000 cards",
            Achievement::Streak3 => "3 day streak",
            Achievement::Streak7 => "7 day streak",
            Achievement::Streak30 => "30 day streak",
            Achievement::Streak100 => "100 day streak",
            Achievement::PerfectSession => "100% accuracy in a session of at least 10 cards",
            Achievement::SpeedDemon => "Study 50 cards in 5 minutes or less",
            Achievement::NightOwl => "Study between midnight and 4 AM",
            Achievement::EarlyBird => "Study between 4 AM and 6 AM",
            Achievement::Marathon => "Study for an hour in one session",
        }
    }
}

/// An achievement and the local time it was earned.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub struct Unlocked {
    pub achievement: Achievement,
    pub unlocked_at: NaiveDateTime,
}
