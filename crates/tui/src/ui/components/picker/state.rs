//! State for the team/channel assignment picker modal.

use rat_focus::{FocusBuilder, FocusFlag, HasFocus};
use ratatui::layout::Rect;

use tenure_types::PickerKind;

/// One selectable directory entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerEntry {
    pub id: String,
    pub label: String,
    pub checked: bool,
}

/// Multi-select list plus Add/Cancel buttons. Entries are seeded from the
/// directory each time the modal opens, with already-assigned ids checked.
#[derive(Debug, Default)]
pub struct PickerState {
    kind: Option<PickerKind>,
    entries: Vec<PickerEntry>,
    cursor: usize,

    container_focus: FocusFlag,
    pub f_list: FocusFlag,
    pub f_apply: FocusFlag,
    pub f_cancel: FocusFlag,
}

impl PickerState {
    pub fn new() -> Self {
        Self {
            kind: None,
            entries: Vec::new(),
            cursor: 0,
            container_focus: FocusFlag::new().with_name("picker"),
            f_list: FocusFlag::new().with_name("picker.list"),
            f_apply: FocusFlag::new().with_name("picker.apply"),
            f_cancel: FocusFlag::new().with_name("picker.cancel"),
        }
    }

    /// Seeds the picker for a fresh open.
    pub fn open<I>(&mut self, kind: PickerKind, directory: I, assigned: &[String])
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.kind = Some(kind);
        self.entries = directory
            .into_iter()
            .map(|(id, label)| PickerEntry {
                checked: assigned.contains(&id),
                id,
                label,
            })
            .collect();
        self.cursor = 0;
    }

    pub fn kind(&self) -> Option<PickerKind> {
        self.kind
    }

    pub fn title(&self) -> &'static str {
        match self.kind {
            Some(PickerKind::Teams) => "Add teams",
            Some(PickerKind::Channels) => "Add channels",
            None => "Add",
        }
    }

    pub fn entries(&self) -> &[PickerEntry] {
        &self.entries
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn move_down(&mut self) {
        if !self.entries.is_empty() {
            self.cursor = (self.cursor + 1).min(self.entries.len() - 1);
        }
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn set_cursor(&mut self, index: usize) {
        if index < self.entries.len() {
            self.cursor = index;
        }
    }

    pub fn toggle_current(&mut self) {
        if let Some(entry) = self.entries.get_mut(self.cursor) {
            entry.checked = !entry.checked;
        }
    }

    /// Ids of all checked entries, in directory order.
    pub fn checked_ids(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|entry| entry.checked)
            .map(|entry| entry.id.clone())
            .collect()
    }

    pub fn checked_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.checked).count()
    }
}

impl HasFocus for PickerState {
    fn build(&self, builder: &mut FocusBuilder) {
        let start = builder.start(self);
        builder.leaf_widget(&self.f_list);
        builder.leaf_widget(&self.f_apply);
        builder.leaf_widget(&self.f_cancel);
        builder.end(start);
    }

    fn focus(&self) -> FocusFlag {
        self.container_focus.clone()
    }

    fn area(&self) -> Rect {
        Rect::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn teams() -> Vec<(String, String)> {
        vec![
            ("t1".to_string(), "Engineering".to_string()),
            ("t2".to_string(), "Design".to_string()),
            ("t3".to_string(), "Sales".to_string()),
        ]
    }

    #[test]
    fn open_checks_already_assigned_entries() {
        let mut picker = PickerState::new();
        picker.open(PickerKind::Teams, teams(), &["t2".to_string()]);
        assert_eq!(picker.entries().len(), 3);
        assert!(!picker.entries()[0].checked);
        assert!(picker.entries()[1].checked);
        assert_eq!(picker.checked_ids(), vec!["t2".to_string()]);
    }

    #[test]
    fn toggling_updates_checked_ids_in_directory_order() {
        let mut picker = PickerState::new();
        picker.open(PickerKind::Teams, teams(), &[]);
        picker.move_down();
        picker.move_down();
        picker.toggle_current();
        picker.move_up();
        picker.move_up();
        picker.toggle_current();
        assert_eq!(picker.checked_ids(), vec!["t1".to_string(), "t3".to_string()]);
        picker.toggle_current();
        assert_eq!(picker.checked_ids(), vec!["t3".to_string()]);
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let mut picker = PickerState::new();
        picker.open(PickerKind::Channels, teams(), &[]);
        for _ in 0..10 {
            picker.move_down();
        }
        assert_eq!(picker.cursor(), 2);
        for _ in 0..10 {
            picker.move_up();
        }
        assert_eq!(picker.cursor(), 0);
    }
}
