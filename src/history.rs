use log::debug;

use crate::element::PlannerElement;
use crate::page::Page;

/// Upper bound on retained snapshots; the oldest past state is
/// dropped beyond this.
const MAX_HISTORY_DEPTH: usize = 200;

/// Snapshot-based undo/redo over a page's element list.
///
/// Callers push one snapshot per discrete user action (stroke start,
/// before a bulk delete) via [`History::save`], never per pointer
/// move. Undo swaps the live element array with the top of `past`,
/// redo with the top of `future`; a new save after an undo discards
/// the redo branch.
#[derive(Debug, Default)]
pub struct History {
    past: Vec<Vec<PlannerElement>>,
    future: Vec<Vec<PlannerElement>>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a deep copy of the page's current element list. Must be
    /// called before the first mutation of a user action.
    pub fn save(&mut self, page: &Page) {
        self.past.push(page.elements().to_vec());
        if self.past.len() > MAX_HISTORY_DEPTH {
            self.past.remove(0);
        }
        self.future.clear();
        debug!("history: saved snapshot ({} past states)", self.past.len());
    }

    /// Restore the previous snapshot. No-op when there is none.
    pub fn undo(&mut self, page: &mut Page) {
        let Some(snapshot) = self.past.pop() else {
            return;
        };
        let current = page.replace_elements(snapshot);
        self.future.push(current);
    }

    /// Reapply the last undone snapshot. No-op when there is none.
    pub fn redo(&mut self, page: &mut Page) {
        let Some(snapshot) = self.future.pop() else {
            return;
        };
        let current = page.replace_elements(snapshot);
        self.past.push(current);
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{BrushKind, factory};
    use egui::{Color32, pos2};

    fn page_with_stroke() -> Page {
        let mut page = Page::new(800.0, 600.0);
        let id = page.allocate_id();
        page.add_element(factory::create_path(
            id,
            pos2(1.0, 1.0),
            Color32::BLACK,
            2.0,
            BrushKind::Pen,
        ));
        page
    }

    #[test]
    fn undo_redo_round_trip_restores_exact_list() {
        let mut page = page_with_stroke();
        let mut history = History::new();

        let before = page.elements().to_vec();
        history.save(&page);
        let id = page.allocate_id();
        page.add_element(factory::create_path(
            id,
            pos2(5.0, 5.0),
            Color32::RED,
            3.0,
            BrushKind::Marker,
        ));
        let after = page.elements().to_vec();

        history.undo(&mut page);
        assert_eq!(page.elements(), &before[..]);
        history.redo(&mut page);
        assert_eq!(page.elements(), &after[..]);
    }

    #[test]
    fn empty_stacks_are_no_ops() {
        let mut page = page_with_stroke();
        let mut history = History::new();
        let before = page.elements().to_vec();
        history.undo(&mut page);
        history.redo(&mut page);
        assert_eq!(page.elements(), &before[..]);
    }

    #[test]
    fn new_save_clears_redo_branch() {
        let mut page = page_with_stroke();
        let mut history = History::new();

        history.save(&page);
        let id = page.allocate_id();
        page.add_element(factory::create_path(
            id,
            pos2(9.0, 9.0),
            Color32::BLUE,
            1.0,
            BrushKind::Pencil,
        ));
        history.undo(&mut page);
        assert!(history.can_redo());

        history.save(&page);
        assert!(!history.can_redo());
    }
}
