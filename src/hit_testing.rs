use egui::Pos2;

use crate::element::{Element, PathElement, PlannerElement};
use crate::page::Page;

/// Lasso containment samples every Nth stroke point; sparse or curved
/// strokes fall back to their centroid.
const PATH_SAMPLE_STRIDE: usize = 5;

/// Ray-casting point-in-polygon test. The polygon is treated as
/// closed (last vertex joins the first).
pub fn point_in_polygon(point: Pos2, polygon: &[Pos2]) -> bool {
    if polygon.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let a = polygon[i];
        let b = polygon[j];
        if (a.y > point.y) != (b.y > point.y) {
            let intersect_x = (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x;
            if point.x < intersect_x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// True if the stroke falls inside the lasso polygon: any sampled
/// point (every 5th, plus the first and last) or the centroid.
pub fn path_in_lasso(path: &PathElement, polygon: &[Pos2]) -> bool {
    let count = path.point_count();
    if count == 0 {
        return false;
    }
    for index in (0..count).step_by(PATH_SAMPLE_STRIDE) {
        if point_in_polygon(path.point(index), polygon) {
            return true;
        }
    }
    if point_in_polygon(path.point(count - 1), polygon) {
        return true;
    }
    path.centroid()
        .is_some_and(|centroid| point_in_polygon(centroid, polygon))
}

/// Lasso containment for a single element. Paths use sampled points;
/// boxed kinds use their center only: an element is selected by
/// "does your center fall inside the lasso", not partial overlap.
/// Locked elements and non-positional kinds never match.
pub fn element_in_lasso(element: &PlannerElement, polygon: &[Pos2]) -> bool {
    if !element.is_selectable() {
        return false;
    }
    match element {
        PlannerElement::Path(path) => path_in_lasso(path, polygon),
        _ => point_in_polygon(element.center(), polygon),
    }
}

/// Run a closed lasso polygon against the page, returning the ids of
/// every contained element in z-order.
pub fn lasso_select(page: &Page, polygon: &[Pos2]) -> Vec<u64> {
    page.elements()
        .iter()
        .filter(|e| element_in_lasso(e, polygon))
        .map(|e| e.id())
        .collect()
}

/// Topmost unlocked element whose geometry contains `pos`, or `None`.
/// Paths test against the stroke itself, boxed kinds against their
/// bounds; background and OCR metadata are never picked.
pub fn pick_topmost(page: &Page, pos: Pos2) -> Option<u64> {
    for element in page.elements().iter().rev() {
        if !element.is_selectable() {
            continue;
        }
        let hit = match element {
            PlannerElement::Path(path) => path.hit_test(pos),
            _ => element.bounds().contains(pos),
        };
        if hit {
            return Some(element.id());
        }
    }
    None
}

/// Ink paths with at least one point within `eraser_size / 2` of the
/// eraser position. Locked paths are exempt.
pub fn stroke_eraser_hits(page: &Page, pos: Pos2, eraser_size: f32) -> Vec<u64> {
    let radius = eraser_size / 2.0;
    page.elements()
        .iter()
        .filter_map(|e| match e {
            PlannerElement::Path(path) if !path.common.locked => path
                .any_point_within(pos, radius)
                .then_some(path.common.id),
            _ => None,
        })
        .collect()
}

/// Non-path elements whose center is within `eraser_size` of the
/// eraser position. Locked elements, the background, and OCR
/// metadata are exempt.
pub fn object_eraser_hits(page: &Page, pos: Pos2, eraser_size: f32) -> Vec<u64> {
    page.elements()
        .iter()
        .filter(|e| !e.is_path() && e.is_selectable())
        .filter(|e| e.center().distance(pos) <= eraser_size)
        .map(|e| e.id())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{BrushKind, ShapeKind, factory};
    use egui::{Color32, Rect, Vec2, pos2};

    fn square_lasso() -> Vec<Pos2> {
        vec![
            pos2(0.0, 0.0),
            pos2(100.0, 0.0),
            pos2(100.0, 100.0),
            pos2(0.0, 100.0),
        ]
    }

    #[test]
    fn ray_casting_basics() {
        let lasso = square_lasso();
        assert!(point_in_polygon(pos2(50.0, 50.0), &lasso));
        assert!(!point_in_polygon(pos2(150.0, 50.0), &lasso));
        assert!(!point_in_polygon(pos2(50.0, -1.0), &lasso));
    }

    #[test]
    fn degenerate_polygon_contains_nothing() {
        assert!(!point_in_polygon(pos2(0.0, 0.0), &[pos2(1.0, 1.0), pos2(2.0, 2.0)]));
    }

    #[test]
    fn boxed_element_selected_by_center_only() {
        let mut page = Page::new(800.0, 600.0);
        // Overlaps the lasso but its center is outside.
        let id = page.allocate_id();
        let mut overlapping = factory::create_shape(id, ShapeKind::Rectangle, pos2(80.0, 40.0));
        overlapping.set_bounds(Rect::from_min_size(pos2(80.0, 40.0), Vec2::new(60.0, 20.0)));
        page.add_element(overlapping);
        // Fully inside.
        let id = page.allocate_id();
        let mut inside = factory::create_shape(id, ShapeKind::Circle, pos2(20.0, 20.0));
        inside.set_bounds(Rect::from_min_size(pos2(20.0, 20.0), Vec2::new(30.0, 30.0)));
        page.add_element(inside);

        let selected = lasso_select(&page, &square_lasso());
        assert_eq!(selected, vec![2]);
    }

    #[test]
    fn sparse_path_caught_by_centroid() {
        let mut page = Page::new(800.0, 600.0);
        let id = page.allocate_id();
        // Both endpoints outside the lasso, centroid inside.
        let mut path = factory::create_path(id, pos2(-50.0, 50.0), Color32::BLACK, 2.0, BrushKind::Pen);
        path.as_path_mut().unwrap().push_point(pos2(150.0, 50.0));
        page.add_element(path);

        assert_eq!(lasso_select(&page, &square_lasso()), vec![1]);
    }

    #[test]
    fn locked_elements_never_lassoed_or_picked() {
        let mut page = Page::new(800.0, 600.0);
        let id = page.allocate_id();
        let mut shape = factory::create_shape(id, ShapeKind::Star, pos2(40.0, 40.0));
        shape.set_bounds(Rect::from_min_size(pos2(40.0, 40.0), Vec2::new(20.0, 20.0)));
        shape.set_locked(true);
        page.add_element(shape);

        assert!(lasso_select(&page, &square_lasso()).is_empty());
        assert!(pick_topmost(&page, pos2(50.0, 50.0)).is_none());
    }

    #[test]
    fn pick_prefers_topmost() {
        let mut page = Page::new(800.0, 600.0);
        for _ in 0..2 {
            let id = page.allocate_id();
            let mut shape = factory::create_shape(id, ShapeKind::Rectangle, pos2(10.0, 10.0));
            shape.set_bounds(Rect::from_min_size(pos2(10.0, 10.0), Vec2::new(40.0, 40.0)));
            page.add_element(shape);
        }
        assert_eq!(pick_topmost(&page, pos2(20.0, 20.0)), Some(2));
    }

    #[test]
    fn stroke_eraser_uses_half_size_radius() {
        let mut page = Page::new(800.0, 600.0);
        let id = page.allocate_id();
        let near = factory::create_path(id, pos2(60.0, 50.0), Color32::BLACK, 2.0, BrushKind::Pen);
        page.add_element(near);
        let id = page.allocate_id();
        let far = factory::create_path(id, pos2(70.0, 50.0), Color32::BLACK, 2.0, BrushKind::Pen);
        page.add_element(far);

        // eraser_size 24 -> radius 12 around (50, 50).
        let hits = stroke_eraser_hits(&page, pos2(50.0, 50.0), 24.0);
        assert_eq!(hits, vec![1]);
    }

    #[test]
    fn object_eraser_skips_paths() {
        let mut page = Page::new(800.0, 600.0);
        let id = page.allocate_id();
        page.add_element(factory::create_path(
            id,
            pos2(50.0, 50.0),
            Color32::BLACK,
            2.0,
            BrushKind::Pen,
        ));
        let id = page.allocate_id();
        let mut shape = factory::create_shape(id, ShapeKind::Diamond, pos2(45.0, 45.0));
        shape.set_bounds(Rect::from_min_size(pos2(45.0, 45.0), Vec2::new(10.0, 10.0)));
        page.add_element(shape);

        let hits = object_eraser_hits(&page, pos2(50.0, 50.0), 24.0);
        assert_eq!(hits, vec![2]);
    }
}
