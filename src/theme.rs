use chrono::{Datelike, NaiveDate};
use std::str::FromStr;
use thiserror::Error;

pub const STAGE_NAMES: [&str; 6] = ["Seed", "Sprout", "Seedling", "Growing", "Leafy", "Bloom"];

pub fn stage_name(stage: u8) -> &'static str {
    STAGE_NAMES[usize::from(stage).min(STAGE_NAMES.len() - 1)]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

/// Configured theme: pinned to a season, or following the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeChoice {
    #[default]
    Auto,
    Fixed(Season),
}

#[derive(Debug)]
pub struct Palette {
    pub bg: [&'static str; 3],
    pub accent: &'static str,
    pub stem: &'static str,
    pub leaves: [&'static str; 3],
    pub flower: &'static str,
    pub flower_alt: &'static str,
    pub sparkline: &'static str,
}

#[derive(Debug)]
pub struct Theme {
    pub season: Season,
    pub name: &'static str,
    pub icon: &'static str,
    pub palette: Palette,
    pub pot_deco: &'static str,
    pub particle: &'static str,
    pub particle_count: usize,
    pub messages: [&'static str; 6],
}

impl Theme {
    pub fn message(&self, stage: u8) -> &'static str {
        self.messages[usize::from(stage).min(self.messages.len() - 1)]
    }
}

impl Season {
    pub fn for_date(date: NaiveDate) -> Self {
        match date.month() {
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            9..=11 => Season::Fall,
            _ => Season::Winter,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Fall => "fall",
            Season::Winter => "winter",
        }
    }

    pub fn theme(self) -> &'static Theme {
        match self {
            Season::Spring => &SPRING,
            Season::Summer => &SUMMER,
            Season::Fall => &FALL,
            Season::Winter => &WINTER,
        }
    }
}

impl ThemeChoice {
    pub fn resolve(self, today: NaiveDate) -> &'static Theme {
        match self {
            ThemeChoice::Auto => Season::for_date(today).theme(),
            ThemeChoice::Fixed(season) => season.theme(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown theme '{0}' (expected auto, spring, summer, fall or winter)")]
pub struct UnknownTheme(pub String);

impl FromStr for ThemeChoice {
    type Err = UnknownTheme;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "auto" => Ok(ThemeChoice::Auto),
            "spring" => Ok(ThemeChoice::Fixed(Season::Spring)),
            "summer" => Ok(ThemeChoice::Fixed(Season::Summer)),
            "fall" | "autumn" => Ok(ThemeChoice::Fixed(Season::Fall)),
            "winter" => Ok(ThemeChoice::Fixed(Season::Winter)),
            _ => Err(UnknownTheme(value.to_string())),
        }
    }
}

static SPRING: Theme = Theme {
    season: Season::Spring,
    name: "Spring",
    icon: "🌸",
    palette: Palette {
        bg: ["#1a0f1e", "#1e1025", "#16091a"],
        accent: "#f472b6",
        stem: "#4ade80",
        leaves: ["#4ade80", "#22c55e", "#86efac"],
        flower: "#f472b6",
        flower_alt: "#e879f9",
        sparkline: "#f472b6",
    },
    pot_deco: "🌸",
    particle: "🌸",
    particle_count: 20,
    messages: [
        "Fresh start! Plant a commit seed.",
        "Spring sprout! Keep going.",
        "Growing in the warm breeze.",
        "Your garden is flourishing!",
        "A lush spring canopy!",
        "Full bloom, absolutely gorgeous.",
    ],
};

static SUMMER: Theme = Theme {
    season: Season::Summer,
    name: "Summer",
    icon: "☀️",
    palette: Palette {
        bg: ["#0a1628", "#0f1e30", "#081420"],
        accent: "#38bdf8",
        stem: "#22c55e",
        leaves: ["#16a34a", "#22c55e", "#4ade80"],
        flower: "#f472b6",
        flower_alt: "#fb923c",
        sparkline: "#38bdf8",
    },
    pot_deco: "🐚",
    particle: "✨",
    particle_count: 15,
    messages: [
        "Sunny days, plant a commit!",
        "A summer sprout rises.",
        "Growing strong in the heat.",
        "Your garden soaks up the sun!",
        "Long days, great code.",
        "Full bloom under summer skies!",
    ],
};

static FALL: Theme = Theme {
    season: Season::Fall,
    name: "Fall",
    icon: "🍂",
    palette: Palette {
        bg: ["#1a1008", "#1e150a", "#140e06"],
        accent: "#fb923c",
        stem: "#a3e635",
        leaves: ["#ca8a04", "#eab308", "#f59e0b"],
        flower: "#fb923c",
        flower_alt: "#ef4444",
        sparkline: "#fb923c",
    },
    pot_deco: "🎃",
    particle: "🍁",
    particle_count: 18,
    messages: [
        "Harvest season, plant a seed!",
        "An autumn sprout appears.",
        "Growing among falling leaves.",
        "Your garden glows golden!",
        "A warm amber canopy.",
        "Full bloom in autumn splendor!",
    ],
};

static WINTER: Theme = Theme {
    season: Season::Winter,
    name: "Winter",
    icon: "❄️",
    palette: Palette {
        bg: ["#0c1220", "#111827", "#0a0f1a"],
        accent: "#93c5fd",
        stem: "#86efac",
        leaves: ["#6ee7b7", "#34d399", "#a7f3d0"],
        flower: "#93c5fd",
        flower_alt: "#c4b5fd",
        sparkline: "#93c5fd",
    },
    pot_deco: "⛄",
    particle: "❄️",
    particle_count: 22,
    messages: [
        "Cold outside, warm up with a commit!",
        "A frosty sprout pushes through.",
        "Growing despite the chill.",
        "Your garden braves the winter!",
        "Hardy and evergreen.",
        "Full bloom in the snow, magical!",
    ],
};
