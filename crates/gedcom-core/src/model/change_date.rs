use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::codec::{GedcomNode, LineWriter};
use crate::tree::TreeNode;

const DATE_FORMAT: &str = "%-d %b %Y";
const TIME_FORMAT: &str = "%H:%M:%S";

/// Accepted `TIME` layouts, most specific first
const TIME_INPUT_FORMATS: [&str; 3] = ["%H:%M:%S%.f", "%H:%M:%S", "%H:%M"];

/// Last-modification timestamp of a record or composite
///
/// `level` is the depth of the `DATE` line when the value is rendered; the
/// `CHAN` line sits one level above it and `TIME` one below. Effective dates
/// are stamped with `owner.level + 2` on a copy at render time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeDate {
    timestamp: DateTime<Utc>,
    level: u32,
}

impl ChangeDate {
    pub fn new(timestamp: DateTime<Utc>, level: u32) -> Self {
        Self { timestamp, level }
    }

    /// Current time at level 0
    pub fn now() -> Self {
        Self::new(Utc::now(), 0)
    }

    /// The date to record after a modification
    ///
    /// Never earlier than `previous`, so successive changes yield a
    /// non-decreasing sequence even if the wall clock steps back.
    pub fn advance(previous: Option<&ChangeDate>) -> Self {
        let now = Utc::now();
        match previous {
            Some(prev) if prev.timestamp > now => prev.clone(),
            Some(prev) => Self::new(now, prev.level),
            None => Self::new(now, 0),
        }
    }

    /// The later of two optional dates; `None` is earlier than any date
    pub fn later(a: Option<&ChangeDate>, b: Option<&ChangeDate>) -> Option<ChangeDate> {
        match (a, b) {
            (Some(a), Some(b)) if b.timestamp > a.timestamp => Some(b.clone()),
            (Some(a), _) => Some(a.clone()),
            (None, b) => b.cloned(),
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Copy of this date at another level
    pub fn stamped(&self, level: u32) -> Self {
        Self::new(self.timestamp, level)
    }

    /// `DATE` value, e.g. `18 OCT 2026`
    pub fn date_text(&self) -> String {
        self.timestamp
            .format(DATE_FORMAT)
            .to_string()
            .to_uppercase()
    }

    /// `TIME` value, e.g. `15:47:03`
    pub fn time_text(&self) -> String {
        self.timestamp.format(TIME_FORMAT).to_string()
    }

    /// Write the `CHAN`/`DATE`/`TIME` block around this date's level
    pub fn render(&self, writer: &mut LineWriter) {
        let level = self.level.max(1);
        writer.line(level - 1, None, "CHAN", None);
        writer.line(level, None, "DATE", Some(&self.date_text()));
        writer.line(level + 1, None, "TIME", Some(&self.time_text()));
    }

    pub fn to_tree(&self) -> TreeNode {
        TreeNode::element("change")
            .with_child(TreeNode::text("date", self.date_text()))
            .with_child(TreeNode::text("time", self.time_text()))
    }

    /// Read a `CHAN` node
    ///
    /// Returns `None` when the `DATE` is missing or unreadable. A missing
    /// or unreadable `TIME` reads as midnight.
    pub fn from_node(chan: &GedcomNode) -> Option<Self> {
        let date_node = chan.child("DATE")?;
        let date = NaiveDate::parse_from_str(date_node.value_str().trim(), "%d %b %Y").ok()?;
        let time = date_node
            .child("TIME")
            .and_then(|t| parse_time(t.value_str().trim()))
            .unwrap_or(NaiveTime::MIN);
        Some(Self::new(date.and_time(time).and_utc(), date_node.level))
    }
}

fn parse_time(text: &str) -> Option<NaiveTime> {
    TIME_INPUT_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(text, format).ok())
}
