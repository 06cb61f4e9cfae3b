//! In-place selection sync for structurally equal option sets
use crate::dom::SelectElement;
use crate::types::SelectSnapshot;
use log::debug;

pub struct SelectionPatcher;

impl SelectionPatcher {
    /// Copies selected flags from `authoritative` onto matching live options.
    /// Options the snapshot does not know are left alone. Returns how many
    /// options changed.
    pub fn apply_selection(live: &mut SelectElement, authoritative: &SelectSnapshot) -> usize {
        let mut changed = 0;
        for option in live.options.iter_mut() {
            if let Some(record) = authoritative.get(&option.value) {
                if option.selected != record.selected {
                    option.selected = record.selected;
                    changed += 1;
                }
            }
        }
        debug!(
            "combo box: patched {} selection flag(s) on '{}'",
            changed, live.id
        );
        changed
    }
}
