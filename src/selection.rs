use egui::Rect;
use serde::{Deserialize, Serialize};

use crate::element::Element;
use crate::page::Page;

/// The set of selected element ids, plus the derived union bounds.
///
/// Ids must reference elements present on the active page; a stale id
/// (element deleted since selection) empties the whole selection on
/// the next recompute.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    ids: Vec<u64>,
    #[serde(skip)]
    bounds: Option<Rect>,
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn ids(&self) -> &[u64] {
        &self.ids
    }

    pub fn contains(&self, id: u64) -> bool {
        self.ids.contains(&id)
    }

    /// Union bounding box of the selected elements, valid as of the
    /// last [`Selection::recompute`].
    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    pub fn clear(&mut self) {
        self.ids.clear();
        self.bounds = None;
    }

    pub fn set_single(&mut self, id: u64) {
        self.ids.clear();
        self.ids.push(id);
        self.bounds = None;
    }

    pub fn replace(&mut self, ids: Vec<u64>) {
        self.ids = ids;
        self.ids.dedup();
        self.bounds = None;
    }

    pub fn toggle(&mut self, id: u64) {
        if let Some(index) = self.ids.iter().position(|&i| i == id) {
            self.ids.remove(index);
        } else {
            self.ids.push(id);
        }
        self.bounds = None;
    }

    /// Re-derive the union bounds against the current page state.
    /// Must run whenever the selection or any referenced element
    /// changes.
    pub fn recompute(&mut self, page: &Page) {
        if self.ids.iter().any(|&id| page.find_element(id).is_none()) {
            self.clear();
            return;
        }

        let mut union: Option<Rect> = None;
        for &id in &self.ids {
            let rect = page.find_element(id).map(|e| e.bounds());
            if let Some(rect) = rect.filter(|r| *r != Rect::NOTHING) {
                union = Some(match union {
                    Some(u) => u.union(rect),
                    None => rect,
                });
            }
        }
        self.bounds = union;
    }
}
