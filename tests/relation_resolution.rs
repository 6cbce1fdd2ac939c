//! Integration tests for relation resolution order and anchored values.
//!
//! These check the observable frame a builder commits, independent of the
//! order relations were declared in.

use framemaker::{
    configure_frame, Dimension, EdgeInsets, Maker, Rect, Sides, ViewHierarchy, ViewId, ViewTree,
};
use pretty_assertions::assert_eq;

/// A 200x100 window with one empty subview
fn window() -> (ViewTree, ViewId, ViewId) {
    let mut tree = ViewTree::new();
    let root = tree.add_root("root", Rect::new(0.0, 0.0, 200.0, 100.0));
    let view = tree.add_subview(root, "view", Rect::new(3.0, 4.0, 5.0, 6.0));
    (tree, root, view)
}

type Relation = fn(&mut Maker<'_, ViewTree>);

/// All orderings of `items`
fn permutations<T: Copy>(items: &[T]) -> Vec<Vec<T>> {
    if items.len() <= 1 {
        return vec![items.to_vec()];
    }
    let mut out = Vec::new();
    for i in 0..items.len() {
        let mut rest = items.to_vec();
        let first = rest.remove(i);
        for mut tail in permutations(&rest) {
            tail.insert(0, first);
            out.push(tail);
        }
    }
    out
}

fn resolve_in_order(order: &[Relation]) -> (Rect, Option<f64>) {
    let (mut tree, _, view) = window();
    let frame = configure_frame(&mut tree, view, |maker| {
        for relation in order {
            relation(maker);
        }
    })
    .expect("relations are valid");
    (frame, tree.corner_radius(view))
}

#[test]
fn test_same_priority_disjoint_relations_are_order_independent() {
    let relations: [Relation; 4] = [
        |m| {
            m.width(50.0);
        },
        |m| {
            m.height(20.0);
        },
        |m| {
            m.right(10.0);
        },
        |m| {
            m.center_y(0.0);
        },
    ];

    for order in permutations(&relations) {
        assert_eq!(
            resolve_in_order(&order).0,
            Rect::new(140.0, 40.0, 50.0, 20.0)
        );
    }
}

#[test]
fn test_priorities_decide_execution_order() {
    let relations: [Relation; 3] = [
        |m| {
            m.corner_radius_by_half(Dimension::Width);
        },
        |m| {
            m.size(40.0, 10.0);
        },
        |m| {
            m.left(5.0).bottom(5.0);
        },
    ];

    for order in permutations(&relations) {
        let (frame, radius) = resolve_in_order(&order);
        assert_eq!(frame, Rect::new(5.0, 85.0, 40.0, 10.0));
        assert_eq!(radius, Some(20.0));
    }
}

#[test]
fn test_conflicting_widths_last_declared_wins() {
    let (mut tree, _, view) = window();
    let frame = configure_frame(&mut tree, view, |maker| {
        maker.width(30.0).width(70.0);
    })
    .unwrap();
    assert_eq!(frame.width, 70.0);

    let frame = configure_frame(&mut tree, view, |maker| {
        maker.width(70.0).width(30.0);
    })
    .unwrap();
    assert_eq!(frame.width, 30.0);
}

#[test]
fn test_both_edges_override_explicit_width() {
    let (mut tree, _, view) = window();
    let frame = configure_frame(&mut tree, view, |maker| {
        maker.left(10.0).width(999.0).right(20.0);
    })
    .unwrap();
    assert_eq!(frame.x, 10.0);
    assert_eq!(frame.width, 170.0);
}

#[test]
fn test_resolving_without_relations_is_idempotent() {
    let (mut tree, _, view) = window();
    let resolved = configure_frame(&mut tree, view, |maker| {
        maker.edges(8.0, 12.0, None, None).size(60.0, 30.0);
    })
    .unwrap();

    let again = Maker::new(&mut tree, view).apply().unwrap();
    assert_eq!(again, resolved);
    assert_eq!(tree.frame(view), resolved);
}

#[test]
fn test_left_edge_from_sibling_right_edge() {
    let (mut tree, root, a) = window();
    let b = tree.add_subview(root, "b", Rect::zero());

    configure_frame(&mut tree, a, |maker| {
        maker.left(0.0).width(20.0);
    })
    .unwrap();
    let frame = configure_frame(&mut tree, b, |maker| {
        maker.left(a.right().offset(10.0));
    })
    .unwrap();
    assert_eq!(frame.x, 30.0);
}

#[test]
fn test_width_as_fraction_of_other_view() {
    let (mut tree, root, view) = window();
    let frame = configure_frame(&mut tree, view, |maker| {
        maker.width(root.width().multiplied(0.5)).height(root.height().multiplied(0.25));
    })
    .unwrap();
    assert_eq!((frame.width, frame.height), (100.0, 25.0));
}

#[test]
fn test_anchor_in_another_container_is_converted() {
    let mut tree = ViewTree::new();
    let root = tree.add_root("root", Rect::new(0.0, 0.0, 300.0, 300.0));
    let left_panel = tree.add_subview(root, "left_panel", Rect::new(10.0, 10.0, 100.0, 100.0));
    let right_panel = tree.add_subview(root, "right_panel", Rect::new(150.0, 50.0, 100.0, 100.0));
    let marker = tree.add_subview(left_panel, "marker", Rect::new(0.0, 40.0, 10.0, 10.0));
    let label = tree.add_subview(right_panel, "label", Rect::zero());

    let frame = configure_frame(&mut tree, label, |maker| {
        maker.top(marker.top()).height(marker.height());
    })
    .unwrap();
    // marker sits at y=50 in root space, right_panel starts at y=50
    assert_eq!(frame.y, 0.0);
    assert_eq!(frame.height, 10.0);
}

#[test]
fn test_center_to_other_view() {
    let (mut tree, root, a) = window();
    let b = tree.add_subview(root, "b", Rect::new(0.0, 0.0, 10.0, 4.0));
    configure_frame(&mut tree, a, |maker| {
        maker.left(20.0).top(20.0).size(40.0, 40.0);
    })
    .unwrap();

    let frame = configure_frame(&mut tree, b, |maker| {
        maker.center_to(a);
    })
    .unwrap();
    assert_eq!(frame, Rect::new(35.0, 38.0, 10.0, 4.0));
}

#[test]
fn test_equal_to_copies_geometry() {
    let (mut tree, root, a) = window();
    let b = tree.add_subview(root, "b", Rect::zero());
    let a_frame = configure_frame(&mut tree, a, |maker| {
        maker.edges(1.0, 2.0, 3.0, 4.0);
    })
    .unwrap();
    let b_frame = configure_frame(&mut tree, b, |maker| {
        maker.equal_to(a);
    })
    .unwrap();
    assert_eq!(b_frame, a_frame);
}

/// Reading a view that has not been configured yet sees its old frame.
#[test]
fn test_dependent_before_dependency_reads_stale_frame() {
    let (mut tree, root, a) = window();
    let b = tree.add_subview(root, "b", Rect::zero());

    let b_frame = configure_frame(&mut tree, b, |maker| {
        maker.left(a.right());
    })
    .unwrap();
    configure_frame(&mut tree, a, |maker| {
        maker.left(100.0);
    })
    .unwrap();

    // a was still at x=3, width=5 when b resolved
    assert_eq!(b_frame.x, 8.0);
}

#[test]
fn test_selected_edges_match_single_edge_calls() {
    let insets = EdgeInsets::new(7.0, 9.0, 11.0, 13.0);

    let (mut tree, _, view) = window();
    let via_selector = configure_frame(&mut tree, view, |maker| {
        maker.edges_with(insets, Sides::TOP | Sides::LEFT);
    })
    .unwrap();

    let (mut tree, _, view) = window();
    let via_calls = configure_frame(&mut tree, view, |maker| {
        maker.top(7.0).left(9.0);
    })
    .unwrap();

    assert_eq!(via_selector, via_calls);
    // bottom and right untouched: size stays as it was
    assert_eq!(via_selector, Rect::new(9.0, 7.0, 5.0, 6.0));
}

#[test]
fn test_all_sides_span_superview() {
    let (mut tree, _, view) = window();
    let frame = configure_frame(&mut tree, view, |maker| {
        maker.edges_with(EdgeInsets::uniform(10.0), Sides::ALL);
    })
    .unwrap();
    assert_eq!(frame, Rect::new(10.0, 10.0, 180.0, 80.0));
}
