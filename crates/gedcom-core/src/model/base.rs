use gedcom_core_types::RegistryId;

use super::change_date::ChangeDate;
use crate::xref::Xref;

/// Replace `field` with `value` if they differ
///
/// Returns whether a replacement happened.
pub fn replace_if_changed<T: PartialEq>(field: &mut T, value: T) -> bool {
    if *field == value {
        return false;
    }
    *field = value;
    true
}

/// Single point through which every content modification is reported
///
/// Setters compare first and report only real changes, so assigning the
/// current value never touches the change date.
pub trait ChangeTracker {
    /// Record that a field changed
    fn changed(&mut self);

    /// Forward `changed` to [`ChangeTracker::changed`] when true
    fn note_change(&mut self, changed: bool) -> bool {
        if changed {
            self.changed();
        }
        changed
    }
}

/// State shared by every record variant
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordBase {
    level: u32,
    xref: Option<Xref>,
    registry: Option<RegistryId>,
    change_date: Option<ChangeDate>,
    dirty: bool,
}

impl RecordBase {
    pub fn new(level: u32) -> Self {
        Self {
            level,
            ..Self::default()
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Placement is structural; moving a record does not count as a change.
    pub fn set_level(&mut self, level: u32) {
        self.level = level;
    }

    pub fn xref(&self) -> Option<&Xref> {
        self.xref.as_ref()
    }

    /// Registry that issued the identifier
    pub fn registry(&self) -> Option<RegistryId> {
        self.registry
    }

    /// Bind an identifier issued by `registry`
    pub fn assign(&mut self, xref: Xref, registry: RegistryId) {
        self.xref = Some(xref);
        self.registry = Some(registry);
    }

    /// Give the record an identifier before it is registered
    pub fn set_xref(&mut self, xref: Option<Xref>) {
        self.xref = xref;
        self.registry = None;
    }

    pub fn change_date(&self) -> Option<&ChangeDate> {
        self.change_date.as_ref()
    }

    /// Set the change date as read from a file; not itself a change
    pub fn set_change_date(&mut self, change_date: Option<ChangeDate>) {
        self.change_date = change_date;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }
}

impl ChangeTracker for RecordBase {
    fn changed(&mut self) {
        self.dirty = true;
        self.change_date = Some(ChangeDate::advance(self.change_date.as_ref()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_if_changed() {
        let mut value = String::from("a");
        assert!(!replace_if_changed(&mut value, "a".to_string()));
        assert!(replace_if_changed(&mut value, "b".to_string()));
        assert_eq!(value, "b");
    }

    #[test]
    fn test_note_change_only_on_real_change() {
        let mut base = RecordBase::new(0);
        assert!(!base.note_change(false));
        assert!(!base.is_dirty());
        assert!(base.change_date().is_none());

        assert!(base.note_change(true));
        assert!(base.is_dirty());
        assert!(base.change_date().is_some());
    }

    #[test]
    fn test_loaded_change_date_does_not_dirty() {
        let mut base = RecordBase::new(0);
        base.set_change_date(Some(ChangeDate::now()));
        assert!(!base.is_dirty());
    }

    #[test]
    fn test_assign_binds_registry() {
        let mut base = RecordBase::new(0);
        let registry = RegistryId::new();
        base.assign(Xref::new("N1").unwrap(), registry);
        assert_eq!(base.xref().map(Xref::as_str), Some("N1"));
        assert_eq!(base.registry(), Some(registry));

        base.set_xref(None);
        assert!(base.registry().is_none());
    }

    #[test]
    fn test_mark_clean() {
        let mut base = RecordBase::new(0);
        base.changed();
        base.mark_clean();
        assert!(!base.is_dirty());
        assert!(base.change_date().is_some());
    }
}
