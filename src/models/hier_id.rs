use crate::errors::{AppError, AppResult};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static MACRO_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*(\d+)\s*$").expect("valid regex"));
static MICRO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:(\d+)\.)?(\d+)\s*$").expect("valid regex"));

/// Two-level activity id: group (`macro`) and optional child (`micro`).
///
/// Stored across two columns: the group number alone, and the child as
/// `"{macro}.{micro}"` (empty on group header rows).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HierarchicalId {
    pub macro_id: u32,
    pub micro_id: Option<u32>,
}

impl HierarchicalId {
    pub fn group(macro_id: u32) -> Self {
        Self {
            macro_id,
            micro_id: None,
        }
    }

    pub fn child(macro_id: u32, micro_id: u32) -> Self {
        Self {
            macro_id,
            micro_id: Some(micro_id),
        }
    }

    /// Placeholder id for a new group: sorts after every existing group,
    /// renumbering gives it its real number.
    pub fn append_group() -> Self {
        Self::group(u32::MAX)
    }

    /// Placeholder id for a new last child of `macro_id`.
    pub fn append_child(macro_id: u32) -> Self {
        Self::child(macro_id, u32::MAX)
    }

    /// Parse the two stored columns. `None` when the group is not a positive
    /// integer or the child text is present but malformed.
    pub fn from_columns(macro_text: &str, micro_text: &str) -> Option<Self> {
        let macro_id = parse_positive(MACRO_RE.captures(macro_text)?.get(1)?.as_str())?;

        if micro_text.trim().is_empty() {
            return Some(Self::group(macro_id));
        }

        let caps = MICRO_RE.captures(micro_text)?;
        let micro_id = parse_positive(caps.get(2)?.as_str())?;
        Some(Self::child(macro_id, micro_id))
    }

    /// Text for the group column.
    pub fn macro_text(&self) -> String {
        self.macro_id.to_string()
    }

    /// Text for the child column.
    pub fn micro_text(&self) -> String {
        match self.micro_id {
            Some(m) => format!("{}.{}", self.macro_id, m),
            None => String::new(),
        }
    }
}

fn parse_positive(s: &str) -> Option<u32> {
    s.parse::<u32>().ok().filter(|n| *n > 0)
}

impl FromStr for HierarchicalId {
    type Err = AppError;

    /// User form: `"3"` or `"3.2"`.
    fn from_str(s: &str) -> AppResult<Self> {
        let invalid = || AppError::InvalidId(s.to_string());
        match s.trim().split_once('.') {
            Some((m, _)) => Self::from_columns(m, s).ok_or_else(invalid),
            None => Self::from_columns(s, "").ok_or_else(invalid),
        }
    }
}

impl fmt::Display for HierarchicalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.micro_id {
            Some(m) => write!(f, "{}.{}", self.macro_id, m),
            None => write!(f, "{}", self.macro_id),
        }
    }
}
