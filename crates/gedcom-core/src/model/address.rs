use super::base::{replace_if_changed, ChangeTracker};
use super::change_date::ChangeDate;
use crate::codec::LineWriter;
use crate::tree::TreeNode;

/// Postal address with phone numbers
///
/// A composite owned by exactly one record. It has no identifier and is
/// never registered; its change date is folded into the owner's.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Address {
    lines: String,
    adr1: String,
    adr2: String,
    city: String,
    state: String,
    postal_code: String,
    country: String,
    phones: Vec<String>,
    change_date: Option<ChangeDate>,
    dirty: bool,
}

macro_rules! tracked_field {
    ($getter:ident, $setter:ident) => {
        pub fn $getter(&self) -> &str {
            &self.$getter
        }

        pub fn $setter(&mut self, value: impl Into<String>) -> bool {
            let changed = replace_if_changed(&mut self.$getter, value.into());
            self.note_change(changed)
        }
    };
}

impl Address {
    pub fn new() -> Self {
        Self::default()
    }

    tracked_field!(lines, set_lines);
    tracked_field!(adr1, set_adr1);
    tracked_field!(adr2, set_adr2);
    tracked_field!(city, set_city);
    tracked_field!(state, set_state);
    tracked_field!(postal_code, set_postal_code);
    tracked_field!(country, set_country);

    pub fn phones(&self) -> &[String] {
        &self.phones
    }

    pub fn add_phone(&mut self, phone: impl Into<String>) -> bool {
        let phone = phone.into();
        let changed = !phone.is_empty() && !self.phones.contains(&phone);
        if changed {
            self.phones.push(phone);
        }
        self.note_change(changed)
    }

    pub fn remove_phone(&mut self, phone: &str) -> bool {
        let before = self.phones.len();
        self.phones.retain(|p| p != phone);
        let changed = self.phones.len() != before;
        self.note_change(changed)
    }

    pub fn change_date(&self) -> Option<&ChangeDate> {
        self.change_date.as_ref()
    }

    pub fn set_change_date(&mut self, change_date: Option<ChangeDate>) {
        self.change_date = change_date;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Whether any `ADDR` sub-field is set
    fn has_address(&self) -> bool {
        [
            &self.lines,
            &self.adr1,
            &self.adr2,
            &self.city,
            &self.state,
            &self.postal_code,
            &self.country,
        ]
        .iter()
        .any(|f| !f.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        !self.has_address() && self.phones.is_empty()
    }

    /// Write `ADDR` at `level` with its parts one deeper, then `PHON` lines
    /// as siblings of `ADDR`
    pub fn render(&self, writer: &mut LineWriter, level: u32) {
        if self.has_address() {
            writer.line(level, None, "ADDR", Some(&self.lines));
            writer.field(level + 1, "ADR1", &self.adr1);
            writer.field(level + 1, "ADR2", &self.adr2);
            writer.field(level + 1, "CITY", &self.city);
            writer.field(level + 1, "STAE", &self.state);
            writer.field(level + 1, "POST", &self.postal_code);
            writer.field(level + 1, "CTRY", &self.country);
        }
        for phone in &self.phones {
            writer.field(level, "PHON", phone);
        }
    }

    pub fn to_tree(&self) -> TreeNode {
        let mut node = TreeNode::element("address");
        node.push_text("lines", &self.lines);
        node.push_text("adr1", &self.adr1);
        node.push_text("adr2", &self.adr2);
        node.push_text("city", &self.city);
        node.push_text("state", &self.state);
        node.push_text("postal_code", &self.postal_code);
        node.push_text("country", &self.country);
        for phone in &self.phones {
            node.push_text("phone", phone);
        }
        node
    }
}

impl ChangeTracker for Address {
    fn changed(&mut self) {
        self.dirty = true;
        self.change_date = Some(ChangeDate::advance(self.change_date.as_ref()));
    }
}
