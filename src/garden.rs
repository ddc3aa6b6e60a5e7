use crate::models::{ActivitySummary, ChartPoint, ContributionDay, ContributionHistory};
use chrono::{Days, Local, NaiveDate};
use std::collections::BTreeMap;

pub const MAX_STAGE: u8 = 5;
pub const RECENT_DAYS: u64 = 7;
const STREAK_WALK_LIMIT: u64 = 365;

pub fn derive_summary(username: &str, history: &ContributionHistory) -> ActivitySummary {
    derive_summary_at(Local::now().date_naive(), username, history)
}

pub fn derive_summary_at(
    now: NaiveDate,
    username: &str,
    history: &ContributionHistory,
) -> ActivitySummary {
    let days = index_by_date(&history.contributions);

    let today = days.get(&now).copied().unwrap_or(0);
    let streak = streak_at(now, &days);
    let stage = stage_for(today, streak);

    let window_start = now
        .checked_sub_days(Days::new(RECENT_DAYS - 1))
        .unwrap_or(NaiveDate::MIN);
    let recent = days
        .range(window_start..=now)
        .map(|(date, count)| ContributionDay::new(date_key(*date), *count))
        .collect();

    ActivitySummary {
        username: username.to_string(),
        today,
        streak,
        stage,
        total_last_year: history.total_last_year,
        recent,
        as_of: now,
    }
}

/// Consecutive non-zero days before `now`. Today neither extends nor breaks it.
pub fn streak_at(now: NaiveDate, days: &BTreeMap<NaiveDate, u64>) -> u32 {
    let mut streak = 0;
    for offset in 1..STREAK_WALK_LIMIT {
        let Some(date) = now.checked_sub_days(Days::new(offset)) else {
            break;
        };
        match days.get(&date) {
            Some(&count) if count > 0 => streak += 1,
            _ => break,
        }
    }
    streak
}

pub fn stage_for(today: u64, streak: u32) -> u8 {
    let base = match today {
        0 => 0,
        1..=2 => 1,
        3..=5 => 2,
        6..=10 => 3,
        11..=20 => 4,
        _ => 5,
    };
    let floor = match streak {
        30.. => 4,
        14.. => 3,
        7.. => 2,
        _ => 0,
    };
    base.max(floor).min(MAX_STAGE)
}

/// `0 <= (now - date) < 7` in whole days. Unparseable dates are never in the window.
pub fn in_recent_window(day: &ContributionDay, now: NaiveDate) -> bool {
    parse_day(&day.date).is_some_and(|date| {
        let diff = (now - date).num_days();
        diff >= 0 && diff < RECENT_DAYS as i64
    })
}

impl ActivitySummary {
    /// The trailing week with one point per day, zero where the source had no entry.
    pub fn chart(&self) -> Vec<ChartPoint> {
        (0..RECENT_DAYS)
            .rev()
            .filter_map(|offset| self.as_of.checked_sub_days(Days::new(offset)))
            .map(|date| {
                let key = date_key(date);
                let count = self
                    .recent
                    .iter()
                    .find(|day| day.date == key)
                    .map_or(0, |day| day.count);
                ChartPoint {
                    weekday: date.format("%a").to_string(),
                    date: key,
                    count,
                }
            })
            .collect()
    }
}

/// First occurrence wins when the source repeats a date.
fn index_by_date(series: &[ContributionDay]) -> BTreeMap<NaiveDate, u64> {
    let mut days = BTreeMap::new();
    for day in series {
        if let Some(date) = parse_day(&day.date) {
            days.entry(date).or_insert(day.count);
        }
    }
    days
}

fn parse_day(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .filter(|date| date_key(*date) == raw)
}

fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
