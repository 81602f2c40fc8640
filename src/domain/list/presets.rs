use chrono::{Datelike, Duration, Local, NaiveDate};

use crate::domain::entities::listing::DateRange;

/// Source of "today" for the date presets.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Calendar day in the local timezone, the same frame ledger dates are
/// entered in.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePreset {
    Today,
    Last7Days,
    Last30Days,
    ThisMonth,
}

impl DatePreset {
    pub const ALL: [DatePreset; 4] = [
        DatePreset::Today,
        DatePreset::Last7Days,
        DatePreset::Last30Days,
        DatePreset::ThisMonth,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DatePreset::Today => "Hoy",
            DatePreset::Last7Days => "Últimos 7 días",
            DatePreset::Last30Days => "Últimos 30 días",
            DatePreset::ThisMonth => "Este mes",
        }
    }

    pub fn range(self, today: NaiveDate) -> DateRange {
        let from = match self {
            DatePreset::Today => today,
            DatePreset::Last7Days => today - Duration::days(7),
            DatePreset::Last30Days => today - Duration::days(30),
            DatePreset::ThisMonth => today.with_day(1).unwrap_or(today),
        };
        DateRange::between(from, today)
    }
}

pub fn today(clock: &impl Clock) -> DateRange {
    DatePreset::Today.range(clock.today())
}

pub fn last_7_days(clock: &impl Clock) -> DateRange {
    DatePreset::Last7Days.range(clock.today())
}

pub fn last_30_days(clock: &impl Clock) -> DateRange {
    DatePreset::Last30Days.range(clock.today())
}

pub fn this_month(clock: &impl Clock) -> DateRange {
    DatePreset::ThisMonth.range(clock.today())
}
