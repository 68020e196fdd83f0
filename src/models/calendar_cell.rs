use serde::Serialize;
use std::fmt;

/// Status of one activity for one tracked month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum CalendarCell {
    #[default]
    Unset,
    /// Not applicable this month; left out of completion denominators.
    Excluded,
    Done,
    NotDone,
}

const GLYPH_DONE: &str = "🟢";
const GLYPH_NOT_DONE: &str = "🔴";
const GLYPH_EXCLUDED: &str = "⚪";
const GLYPH_UNSET: &str = "";

impl CalendarCell {
    pub const ALL: [CalendarCell; 4] = [
        CalendarCell::Unset,
        CalendarCell::Excluded,
        CalendarCell::Done,
        CalendarCell::NotDone,
    ];

    /// Canonical stored text.
    pub fn as_str(&self) -> &'static str {
        match self {
            CalendarCell::Unset => GLYPH_UNSET,
            CalendarCell::Excluded => GLYPH_EXCLUDED,
            CalendarCell::Done => GLYPH_DONE,
            CalendarCell::NotDone => GLYPH_NOT_DONE,
        }
    }

    /// Map any stored or user-typed value to a cell. Total: unknown text is Unset.
    pub fn normalize(raw: &str) -> Self {
        let s = raw.trim();
        match s {
            GLYPH_DONE => return CalendarCell::Done,
            GLYPH_NOT_DONE => return CalendarCell::NotDone,
            GLYPH_EXCLUDED => return CalendarCell::Excluded,
            // legacy glyphs written by older clients
            "✅" | "✔" | "✔️" => return CalendarCell::Done,
            "❌" | "✖" => return CalendarCell::NotDone,
            "⚫" | "➖" => return CalendarCell::Excluded,
            _ => {}
        }

        match s.to_lowercase().as_str() {
            "true" | "1" | "done" | "yes" => CalendarCell::Done,
            "false" | "0" | "undone" | "no" | "not done" | "not_done" | "notdone" => CalendarCell::NotDone,
            "na" | "n/a" | "skip" | "skipped" | "excluded" | "not to do" => CalendarCell::Excluded,
            _ => CalendarCell::Unset,
        }
    }

    pub fn is_excluded(&self) -> bool {
        matches!(self, CalendarCell::Excluded)
    }

    pub fn is_done(&self) -> bool {
        matches!(self, CalendarCell::Done)
    }
}

impl fmt::Display for CalendarCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
