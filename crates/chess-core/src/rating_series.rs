//! Rating history series for the chart, bucketed by timeframe.

use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::game_data::GameRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "last_week")]
    LastWeek,
    #[serde(rename = "last_month")]
    LastMonth,
    #[serde(rename = "last_6_months")]
    LastSixMonths,
    #[default]
    #[serde(rename = "all_time")]
    AllTime,
}

impl Timeframe {
    pub const ALL: [Timeframe; 4] = [
        Timeframe::LastWeek,
        Timeframe::LastMonth,
        Timeframe::LastSixMonths,
        Timeframe::AllTime,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Timeframe::LastWeek => "last_week",
            Timeframe::LastMonth => "last_month",
            Timeframe::LastSixMonths => "last_6_months",
            Timeframe::AllTime => "all_time",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        Timeframe::ALL
            .into_iter()
            .find(|t| t.as_str() == normalized)
            .ok_or_else(|| {
                format!("unknown timeframe '{s}' (expected last_week, last_month, last_6_months or all_time)")
            })
    }
}

/// The searched player's rating after one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatingPoint {
    pub at: DateTime<Utc>,
    pub rating: i32,
}

/// One chart entry. `rating` is `None` where there is no data, which is not zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesPoint {
    pub label: String,
    pub rating: Option<i32>,
}

/// One point per matched game, in source order; games without a rating are dropped.
pub fn rating_points(username: &str, games: &[GameRecord]) -> Vec<RatingPoint> {
    games
        .iter()
        .filter_map(|game| {
            let side = game.side_of(username)?;
            let rating = game.participant(side).post_game_rating()?;
            Some(RatingPoint { at: game.created_at, rating })
        })
        .collect()
}

/// Build the chart series for `timeframe`, with windows ending on `today`.
pub fn build_series(
    username: &str,
    games: &[GameRecord],
    timeframe: Timeframe,
    today: NaiveDate,
) -> Vec<SeriesPoint> {
    let points = rating_points(username, games);

    match timeframe {
        Timeframe::LastWeek => daily_series(&points, today, 7),
        Timeframe::LastMonth => daily_series(&points, today, 30),
        Timeframe::LastSixMonths => monthly_series(&points, today, 6),
        Timeframe::AllTime => chronological_series(points),
    }
}

/// One entry per calendar day; the first point on that day (source order) wins.
fn daily_series(points: &[RatingPoint], today: NaiveDate, days: u64) -> Vec<SeriesPoint> {
    let start = today
        .checked_sub_days(Days::new(days - 1))
        .unwrap_or(NaiveDate::MIN);

    start
        .iter_days()
        .take(days as usize)
        .map(|day| SeriesPoint {
            label: day.format("%Y-%m-%d").to_string(),
            rating: points
                .iter()
                .find(|p| p.at.date_naive() == day)
                .map(|p| p.rating),
        })
        .collect()
}

/// One entry per calendar month, averaging that month's ratings.
fn monthly_series(points: &[RatingPoint], today: NaiveDate, months: u32) -> Vec<SeriesPoint> {
    (0..months)
        .rev()
        .map(|back| {
            let (year, month) = months_before(today, back);
            let ratings: Vec<i32> = points
                .iter()
                .filter(|p| p.at.year() == year && p.at.month() == month)
                .map(|p| p.rating)
                .collect();

            let rating = if ratings.is_empty() {
                None
            } else {
                let sum: i64 = ratings.iter().map(|&r| r as i64).sum();
                Some((sum as f64 / ratings.len() as f64).round() as i32)
            };

            SeriesPoint {
                label: format!("{year:04}-{month:02}"),
                rating,
            }
        })
        .collect()
}

/// Every point, oldest first. Equal timestamps keep their source order.
fn chronological_series(mut points: Vec<RatingPoint>) -> Vec<SeriesPoint> {
    points.sort_by_key(|p| p.at);
    points
        .into_iter()
        .map(|p| SeriesPoint {
            label: p.at.format("%Y-%m-%d").to_string(),
            rating: Some(p.rating),
        })
        .collect()
}

/// (year, month) of the calendar month `back` months before `today`'s month.
fn months_before(today: NaiveDate, back: u32) -> (i32, u32) {
    let index = today.year() * 12 + today.month0() as i32 - back as i32;
    (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
}
