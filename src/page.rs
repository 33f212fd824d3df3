use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::element::{Element, ElementKind, PlannerElement, factory};

/// Classification labels used by external filtering UI; the core
/// stores them but never reads them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageMeta {
    #[serde(default)]
    pub year: Option<u16>,
    #[serde(default)]
    pub month: Option<u8>,
    #[serde(default)]
    pub section: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// One canvas page: an ordered element list (array position is
/// z-order) plus page-level bookkeeping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    pub id: Uuid,
    pub width: f32,
    pub height: f32,
    elements: Vec<PlannerElement>,
    /// Monotonic id source; persisted so ids never collide with
    /// elements resurrected by undo.
    next_element_id: u64,
    /// Low-resolution page raster captured by the thumbnail pipeline.
    #[serde(default)]
    pub thumbnail: Option<Vec<u8>>,
    #[serde(default)]
    pub meta: PageMeta,
}

impl Page {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            id: Uuid::new_v4(),
            width,
            height,
            elements: Vec::new(),
            next_element_id: 1,
            thumbnail: None,
            meta: PageMeta::default(),
        }
    }

    /// Allocate an element id unique for the lifetime of this page.
    pub fn allocate_id(&mut self) -> u64 {
        let id = self.next_element_id;
        self.next_element_id += 1;
        id
    }

    pub fn elements(&self) -> &[PlannerElement] {
        &self.elements
    }

    pub fn elements_mut(&mut self) -> &mut Vec<PlannerElement> {
        &mut self.elements
    }

    /// Swap in a whole element list (undo/redo restore path).
    pub fn replace_elements(&mut self, elements: Vec<PlannerElement>) -> Vec<PlannerElement> {
        std::mem::replace(&mut self.elements, elements)
    }

    pub fn add_element(&mut self, element: PlannerElement) {
        self.elements.push(element);
    }

    pub fn find_element(&self, id: u64) -> Option<&PlannerElement> {
        self.elements.iter().find(|e| e.id() == id)
    }

    pub fn find_element_mut(&mut self, id: u64) -> Option<&mut PlannerElement> {
        self.elements.iter_mut().find(|e| e.id() == id)
    }

    /// Remove an element by id. Locked elements are left in place.
    pub fn remove_element(&mut self, id: u64) -> Option<PlannerElement> {
        let index = self
            .elements
            .iter()
            .position(|e| e.id() == id && !e.is_locked())?;
        Some(self.elements.remove(index))
    }

    /// Move an element to the end of the array (topmost z).
    pub fn bring_to_front(&mut self, id: u64) {
        if let Some(index) = self.elements.iter().position(|e| e.id() == id) {
            let element = self.elements.remove(index);
            self.elements.push(element);
        }
    }

    /// Move an element to the start of the array (bottom z). The
    /// background stays conceptually below it regardless.
    pub fn send_to_back(&mut self, id: u64) {
        if let Some(index) = self.elements.iter().position(|e| e.id() == id) {
            let element = self.elements.remove(index);
            self.elements.insert(0, element);
        }
    }

    /// Number of ink paths on the page; the OCR debounce watches this.
    pub fn ink_path_count(&self) -> usize {
        self.elements.iter().filter(|e| e.is_path()).count()
    }

    /// Stored handwriting transcription, if any.
    pub fn ocr_text(&self) -> Option<&str> {
        self.elements.iter().find_map(|e| match e {
            PlannerElement::OcrMetadata(m) => Some(m.text.as_str()),
            _ => None,
        })
    }

    /// Write the page transcription, replacing any previous one.
    pub fn set_ocr_text(&mut self, text: String) {
        for element in &mut self.elements {
            if let PlannerElement::OcrMetadata(m) = element {
                m.text = text;
                return;
            }
        }
        let id = self.allocate_id();
        self.elements.push(factory::create_ocr_metadata(id, text));
    }

    /// The page background element, if one has been placed.
    pub fn background(&self) -> Option<&PlannerElement> {
        self.elements
            .iter()
            .find(|e| e.kind() == ElementKind::Background)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{Color32, pos2};

    use crate::element::{BrushKind, ShapeKind};

    fn page_with_elements() -> Page {
        let mut page = Page::new(800.0, 600.0);
        let id = page.allocate_id();
        page.add_element(factory::create_path(
            id,
            pos2(10.0, 10.0),
            Color32::BLACK,
            2.0,
            BrushKind::Pen,
        ));
        let id = page.allocate_id();
        page.add_element(factory::create_shape(id, ShapeKind::Circle, pos2(50.0, 50.0)));
        page
    }

    #[test]
    fn z_order_is_array_order() {
        let mut page = page_with_elements();
        page.bring_to_front(1);
        assert_eq!(page.elements().last().unwrap().id(), 1);
        page.send_to_back(1);
        assert_eq!(page.elements().first().unwrap().id(), 1);
    }

    #[test]
    fn locked_element_survives_remove() {
        let mut page = page_with_elements();
        page.find_element_mut(2).unwrap().set_locked(true);
        assert!(page.remove_element(2).is_none());
        assert!(page.find_element(2).is_some());
    }

    #[test]
    fn ocr_text_is_replaced_not_duplicated() {
        let mut page = page_with_elements();
        page.set_ocr_text("first".to_owned());
        page.set_ocr_text("second".to_owned());
        assert_eq!(page.ocr_text(), Some("second"));
        let metadata_count = page
            .elements()
            .iter()
            .filter(|e| matches!(e, PlannerElement::OcrMetadata(_)))
            .count();
        assert_eq!(metadata_count, 1);
    }

    #[test]
    fn ids_stay_unique_after_restore() {
        let mut page = page_with_elements();
        let snapshot = page.elements().to_vec();
        let id = page.allocate_id();
        page.add_element(factory::create_shape(id, ShapeKind::Star, pos2(0.0, 0.0)));
        page.replace_elements(snapshot);
        // The counter is page state, not element-list state.
        assert_eq!(page.allocate_id(), 4);
    }
}
