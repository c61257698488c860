use std::cell::RefCell;
use std::rc::Rc;

use kurbo::Point;

use crate::geom::BBox;

/// A node in the scene graph: an optional human-readable label, optional
/// renderable geometry of its own, and an ordered list of children.
///
/// `Element` is a cheap-to-clone shared handle; identity is pointer
/// identity ([`Element::ptr_eq`]), not structural equality. Scene
/// definitions own the graph; the validator only reads geometry and
/// membership, and moves geometry on an animation's behalf.
#[derive(Clone)]
pub struct Element {
    inner: Rc<RefCell<ElementData>>,
}

struct ElementData {
    label: Option<String>,
    extent: Option<BBox>,
    children: Vec<Element>,
}

impl Element {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(ElementData {
                label: None,
                extent: None,
                children: Vec::new(),
            })),
        }
    }

    /// Leaf with a label and its own geometry, the common case in scene
    /// definitions.
    pub fn with_box(label: impl Into<String>, extent: BBox) -> Self {
        let el = Self::new();
        {
            let mut data = el.inner.borrow_mut();
            data.label = Some(label.into());
            data.extent = Some(extent);
        }
        el
    }

    /// Unlabeled container for other elements.
    pub fn group(children: impl IntoIterator<Item = Element>) -> Self {
        let el = Self::new();
        el.inner.borrow_mut().children = children.into_iter().collect();
        el
    }

    pub fn set_label(&self, label: impl Into<String>) {
        self.inner.borrow_mut().label = Some(label.into());
    }

    pub fn label(&self) -> Option<String> {
        self.inner.borrow().label.clone()
    }

    pub fn set_extent(&self, extent: Option<BBox>) {
        self.inner.borrow_mut().extent = extent;
    }

    pub fn add_child(&self, child: &Element) {
        self.inner.borrow_mut().children.push(child.clone());
    }

    pub fn child_count(&self) -> usize {
        self.inner.borrow().children.len()
    }

    pub fn ptr_eq(&self, other: &Element) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// True iff `other` is reachable from `self` through the child
    /// relation, one or more hops. A node is never its own ancestor.
    pub fn is_ancestor_of(&self, other: &Element) -> bool {
        let data = self.inner.borrow();
        for child in &data.children {
            if child.ptr_eq(other) || child.is_ancestor_of(other) {
                return true;
            }
        }
        false
    }

    /// The element's bounding box: the union of its own extent and all
    /// children's boxes. `None` when the element has no renderable
    /// geometry and no measurable children.
    pub fn bbox(&self) -> Option<BBox> {
        let data = self.inner.borrow();
        let mut acc: Option<BBox> = data.extent;
        for child in &data.children {
            if let Some(cb) = child.bbox() {
                acc = Some(match acc {
                    Some(b) => b.union(&cb),
                    None => cb,
                });
            }
        }
        acc
    }

    /// Shifts the element's own geometry and all children by `(dx, dy)`.
    pub fn shift(&self, dx: f64, dy: f64) {
        let mut data = self.inner.borrow_mut();
        if let Some(extent) = data.extent {
            data.extent = Some(extent.translated(dx, dy));
        }
        for child in &data.children {
            child.shift(dx, dy);
        }
    }

    /// Moves the element so its bounding-box center lands on `target`.
    /// No-op for elements without a box.
    pub fn move_to(&self, target: Point) {
        if let Some(bbox) = self.bbox() {
            let c = bbox.center();
            self.shift(target.x - c.x, target.y - c.y);
        }
    }

    /// Scales the element's geometry about its bounding-box center.
    pub fn scale(&self, factor: f64) {
        if let Some(bbox) = self.bbox() {
            self.scale_about(factor, bbox.center());
        }
    }

    fn scale_about(&self, factor: f64, origin: Point) {
        let mut data = self.inner.borrow_mut();
        if let Some(e) = data.extent {
            data.extent = BBox::from_extents(
                origin.x + (e.left - origin.x) * factor,
                origin.x + (e.right - origin.x) * factor,
                origin.y + (e.bottom - origin.y) * factor,
                origin.y + (e.top - origin.y) * factor,
            );
        }
        for child in &data.children {
            child.scale_about(factor, origin);
        }
    }

    /// Human-readable label for reports: the own label when set,
    /// otherwise derived from the first labeled child, otherwise the
    /// child count.
    pub fn display_label(&self) -> String {
        let data = self.inner.borrow();
        if let Some(label) = &data.label {
            return format!("\"{}\"", truncate_chars(label, 25));
        }
        for child in data.children.iter().take(3) {
            if let Some(label) = child.inner.borrow().label.clone() {
                return format!("group[\"{}\",..]", truncate_chars(&label, 20));
            }
        }
        if data.children.is_empty() {
            "element".to_string()
        } else {
            format!("group({} sub)", data.children.len())
        }
    }

    /// Label plus box coordinates, for the verbose final-frame dump.
    pub fn describe(&self) -> String {
        match self.bbox() {
            Some(b) => format!(
                "{} @ ({:.1},{:.1})-({:.1},{:.1})",
                self.display_label(),
                b.left,
                b.bottom,
                b.right,
                b.top
            ),
            None => format!("{} @ no-bbox", self.display_label()),
        }
    }
}

impl Default for Element {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Element({})", self.describe())
    }
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(label: &str, l: f64, r: f64, b: f64, t: f64) -> Element {
        Element::with_box(label, BBox::from_extents(l, r, b, t).unwrap())
    }

    #[test]
    fn bbox_covers_children() {
        let a = leaf("a", 0.0, 1.0, 0.0, 1.0);
        let b = leaf("b", 2.0, 3.0, -1.0, 0.5);
        let g = Element::group([a, b]);
        let bb = g.bbox().unwrap();
        assert_eq!((bb.left, bb.right, bb.bottom, bb.top), (0.0, 3.0, -1.0, 1.0));
    }

    #[test]
    fn empty_element_has_no_bbox() {
        assert!(Element::new().bbox().is_none());
        assert!(Element::group([]).bbox().is_none());
    }

    #[test]
    fn ancestor_is_transitive_but_not_reflexive() {
        let inner = leaf("inner", 0.0, 1.0, 0.0, 1.0);
        let mid = Element::group([inner.clone()]);
        let outer = Element::group([mid.clone()]);
        assert!(outer.is_ancestor_of(&mid));
        assert!(outer.is_ancestor_of(&inner));
        assert!(!inner.is_ancestor_of(&outer));
        assert!(!outer.is_ancestor_of(&outer));
    }

    #[test]
    fn siblings_are_not_ancestors() {
        let a = leaf("a", 0.0, 1.0, 0.0, 1.0);
        let b = leaf("b", 0.0, 1.0, 0.0, 1.0);
        let _g = Element::group([a.clone(), b.clone()]);
        assert!(!a.is_ancestor_of(&b));
        assert!(!b.is_ancestor_of(&a));
    }

    #[test]
    fn shift_moves_children_too() {
        let a = leaf("a", 0.0, 1.0, 0.0, 1.0);
        let g = Element::group([a.clone()]);
        g.shift(2.0, -1.0);
        let bb = a.bbox().unwrap();
        assert_eq!((bb.left, bb.bottom), (2.0, -1.0));
    }

    #[test]
    fn move_to_centers_on_target() {
        let a = leaf("a", 0.0, 2.0, 0.0, 2.0);
        a.move_to(Point::new(0.0, 0.0));
        let bb = a.bbox().unwrap();
        assert_eq!(
            (bb.left, bb.right, bb.bottom, bb.top),
            (-1.0, 1.0, -1.0, 1.0)
        );
    }

    #[test]
    fn scale_grows_about_center() {
        let a = leaf("a", -1.0, 1.0, -1.0, 1.0);
        a.scale(2.0);
        let bb = a.bbox().unwrap();
        assert_eq!(
            (bb.left, bb.right, bb.bottom, bb.top),
            (-2.0, 2.0, -2.0, 2.0)
        );
    }

    #[test]
    fn display_label_prefers_own_then_child() {
        let named = leaf("Title", 0.0, 1.0, 0.0, 1.0);
        assert_eq!(named.display_label(), "\"Title\"");

        let g = Element::group([leaf("Sub", 0.0, 1.0, 0.0, 1.0)]);
        assert_eq!(g.display_label(), "group[\"Sub\",..]");

        let anon = Element::group([Element::new(), Element::new()]);
        assert_eq!(anon.display_label(), "group(2 sub)");
    }
}
