//! Rolling month calendar for the `Activities` table.
//!
//! One column per tracked month, named after the month's last business day.
//! The "current" column is the month *before* the wall-clock month: work is
//! closed at month end and recorded during the following month.

use crate::models::month::YearMonth;
use crate::models::row::Row;
use chrono::NaiveDate;
use std::collections::BTreeSet;
use std::fmt;

const KEY_FORMAT: &str = "%Y-%m-%d";

/// Generated column name: last business day of a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ColumnKey(NaiveDate);

impl ColumnKey {
    pub fn for_month(month: YearMonth) -> Self {
        Self(month.last_business_day())
    }

    /// Recognise a stored column name as a calendar column. Only a month's
    /// last business day qualifies; other dates are plain columns.
    pub fn parse(column: &str) -> Option<Self> {
        let date = NaiveDate::parse_from_str(column.trim(), KEY_FORMAT).ok()?;
        let key = Self::for_month(YearMonth::of(date));
        (key.0 == date).then_some(key)
    }

    /// User form of a month: `YYYY-MM`, or the column name itself.
    pub fn from_user(s: &str) -> Option<Self> {
        YearMonth::parse(s)
            .map(Self::for_month)
            .or_else(|| Self::parse(s))
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn month(&self) -> YearMonth {
        YearMonth::of(self.0)
    }

    pub fn name(&self) -> String {
        self.0.format(KEY_FORMAT).to_string()
    }
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(KEY_FORMAT))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnPhase {
    Past,
    Current,
    Future,
}

impl ColumnPhase {
    pub fn of(key: ColumnKey, today: NaiveDate) -> Self {
        let current = current_working_month(today);
        match key.month().cmp(&current) {
            std::cmp::Ordering::Less => ColumnPhase::Past,
            std::cmp::Ordering::Equal => ColumnPhase::Current,
            std::cmp::Ordering::Greater => ColumnPhase::Future,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnPhase::Past => "past",
            ColumnPhase::Current => "current",
            ColumnPhase::Future => "future",
        }
    }
}

/// Month whose column is edited by default.
pub fn current_working_month(today: NaiveDate) -> YearMonth {
    YearMonth::of(today).pred()
}

pub fn current_column(today: NaiveDate) -> ColumnKey {
    ColumnKey::for_month(current_working_month(today))
}

/// Calendar columns already present in a loaded row-set.
pub fn keys_in_rows(rows: &[Row]) -> BTreeSet<ColumnKey> {
    rows.iter()
        .flat_map(|r| r.columns())
        .filter_map(|c| ColumnKey::parse(c))
        .collect()
}

#[derive(Debug, Clone, Copy)]
pub struct RollingCalendar {
    /// First tracked month; never moves, so the full column set only grows.
    pub start: YearMonth,
    pub past_count: u32,
    pub future_count: u32,
}

impl RollingCalendar {
    pub fn new(start: YearMonth) -> Self {
        Self {
            start,
            past_count: 4,
            future_count: 1,
        }
    }

    pub fn with_window(mut self, past_count: u32, future_count: u32) -> Self {
        self.past_count = past_count;
        self.future_count = future_count;
        self
    }

    /// Sliding window around the current working month, oldest first.
    /// Months before `start` are not shown; the current column always is.
    pub fn visible_columns(&self, today: NaiveDate) -> Vec<ColumnKey> {
        let current = current_working_month(today);
        let from = current.add_months(-(self.past_count as i32));
        let to = current.add_months(self.future_count as i32);

        from.range_to(to)
            .into_iter()
            .filter(|m| *m >= self.start || *m == current)
            .map(ColumnKey::for_month)
            .collect()
    }

    /// Every column from `start` up to `horizon_months` past the current one,
    /// always covering the visible window.
    pub fn all_columns(&self, today: NaiveDate, horizon_months: u32) -> Vec<ColumnKey> {
        let current = current_working_month(today);
        let to = current.add_months(horizon_months.max(self.future_count) as i32);

        let mut keys: BTreeSet<ColumnKey> = self
            .start
            .range_to(to)
            .into_iter()
            .map(ColumnKey::for_month)
            .collect();

        // start configured after today: the current column is still required
        keys.insert(ColumnKey::for_month(current));
        keys.extend(self.visible_columns(today));

        keys.into_iter().collect()
    }
}
