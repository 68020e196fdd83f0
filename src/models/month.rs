use chrono::{Datelike, NaiveDate, Weekday};
use std::fmt;

/// A calendar month, ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Parse `YYYY-MM`.
    pub fn parse(s: &str) -> Option<Self> {
        let (y, m) = s.trim().split_once('-')?;
        Self::new(y.parse().ok()?, m.parse().ok()?)
    }

    /// Shift by a signed number of months.
    pub fn add_months(self, delta: i32) -> Self {
        let idx = self.year * 12 + (self.month as i32 - 1) + delta;
        Self {
            year: idx.div_euclid(12),
            month: idx.rem_euclid(12) as u32 + 1,
        }
    }

    pub fn pred(self) -> Self {
        self.add_months(-1)
    }

    pub fn succ(self) -> Self {
        self.add_months(1)
    }

    pub fn first_day(self) -> NaiveDate {
        // month is validated on construction
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn last_day(self) -> NaiveDate {
        self.succ()
            .first_day()
            .pred_opt()
            .unwrap_or(NaiveDate::MIN)
    }

    /// Last Monday-to-Friday day of the month.
    pub fn last_business_day(self) -> NaiveDate {
        let mut d = self.last_day();
        while matches!(d.weekday(), Weekday::Sat | Weekday::Sun) {
            match d.pred_opt() {
                Some(p) => d = p,
                None => break,
            }
        }
        d
    }

    /// Inclusive month range; empty when `to < self`.
    pub fn range_to(self, to: YearMonth) -> Vec<YearMonth> {
        let mut out = Vec::new();
        let mut m = self;
        while m <= to {
            out.push(m);
            m = m.succ();
        }
        out
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
