use perchdom::{Element, Length, Position, Rect, StyleSet};

#[test]
fn test_tree_links() {
    let child = Element::box_().id("child");
    let root = Element::box_().id("root").child(child.clone());

    assert_eq!(child.parent(), Some(root.clone()));
    assert_eq!(root.children(), vec![child.clone()]);

    assert!(root.remove_child(&child));
    assert_eq!(child.parent(), None);
    assert!(!root.remove_child(&child));
}

#[test]
fn test_append_moves_between_parents() {
    let child = Element::new();
    let first = Element::box_().child(child.clone());
    let second = Element::box_();

    second.append_child(&child);

    assert!(first.children().is_empty());
    assert_eq!(child.parent(), Some(second));
}

#[test]
fn test_apply_style_set_skips_identical_writes() {
    let element = Element::new();
    let style = StyleSet::new()
        .position(Position::Relative)
        .width(Length::Px(120));

    assert!(element.apply_style_set(&style));
    assert!(!element.apply_style_set(&style));
    assert_eq!(element.style_writes(), 1);
    assert_eq!(element.computed_style(), style);
}

#[test]
fn test_classes() {
    let element = Element::new();
    assert!(element.add_class("stick"));
    assert!(!element.add_class("stick"));
    assert!(element.has_class("stick"));

    assert!(element.remove_class("stick"));
    assert!(!element.remove_class("stick"));
    assert!(element.classes().is_empty());
}

#[test]
fn test_geometry() {
    let element = Element::box_()
        .bounds(Rect::new(0, 100, 200, 300))
        .offset(Rect::new(8, 40, 200, 20))
        .client_width(184);

    assert_eq!(element.bounding_rect().bottom(), 400);
    assert_eq!(element.offset_top(), 40);
    assert_eq!(element.offset_left(), 8);
    assert_eq!(element.offset_height(), 20);
    assert_eq!(element.client_width_px(), 184);

    let moved = element.bounding_rect().translate_y(-150);
    assert_eq!(moved.top(), -50);
    assert!(moved.contains(10, 0));
    assert!(!moved.contains(10, 250));
}

#[test]
fn test_handles_compare_by_identity() {
    let a = Element::new();
    let b = Element::new();
    assert_eq!(a.clone(), a);
    assert_ne!(a, b);
}
