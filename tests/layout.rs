use std::collections::BTreeMap;

use techdag::graph::{GraphStore, LevelPolicy, Node, assign_levels};
use techdag::layout::engine::Point;
use techdag::layout::{Extent, LayoutOptions, compute_positions, container_size};
use techdag_test_utils::builders::GraphBuilder;

fn layout_all(store: &GraphStore, policy: LevelPolicy) -> BTreeMap<String, Point> {
    let levels = assign_levels(store, policy).unwrap();
    let subset: Vec<&Node> = store.nodes().collect();
    compute_positions(store, &levels, &subset, policy, &LayoutOptions::default())
}

#[test]
fn child_is_centered_over_its_parents() {
    let store = GraphBuilder::new()
        .with_plain("a", &[])
        .with_plain("b", &[])
        .with_plain("c", &["a", "b"])
        .build();

    let positions = layout_all(&store, LevelPolicy::None);

    // a and b share the dependent c, so they form one group.
    assert_eq!(positions["a"], Point { x: 0.0, y: 0.0 });
    assert_eq!(positions["b"], Point { x: 150.0, y: 0.0 });
    // c sits at the mean of its parents, one level down.
    assert_eq!(positions["c"], Point { x: 75.0, y: 200.0 });
}

#[test]
fn root_groups_are_separated_by_shared_dependents() {
    // Two families: {a, b} -> c and {d, e} -> f.
    let store = GraphBuilder::new()
        .with_plain("a", &[])
        .with_plain("b", &[])
        .with_plain("c", &["a", "b"])
        .with_plain("d", &[])
        .with_plain("e", &[])
        .with_plain("f", &["d", "e"])
        .build();

    let positions = layout_all(&store, LevelPolicy::None);

    assert_eq!(positions["a"].x, 0.0);
    assert_eq!(positions["b"].x, 150.0);
    assert_eq!(positions["d"].x, 300.0);
    assert_eq!(positions["e"].x, 450.0);

    assert_eq!(positions["c"].x, 75.0);
    assert_eq!(positions["f"].x, 375.0);
}

#[test]
fn colliding_siblings_are_nudged_apart() {
    // c and g both average to the same spot between a and b.
    let store = GraphBuilder::new()
        .with_plain("a", &[])
        .with_plain("b", &[])
        .with_plain("c", &["a", "b"])
        .with_plain("g", &["a", "b"])
        .build();

    let positions = layout_all(&store, LevelPolicy::None);

    assert_eq!(positions["c"].x, 75.0);
    assert!((positions["g"].x - positions["c"].x).abs() >= 150.0);
}

#[test]
fn same_level_nodes_keep_minimum_spacing() {
    let store = GraphBuilder::new()
        .with_plain("a", &[])
        .with_plain("b", &[])
        .with_plain("c", &["a", "b"])
        .with_plain("g", &["a", "b"])
        .with_plain("h", &["a", "b"])
        .build();

    let positions = layout_all(&store, LevelPolicy::None);

    let xs = ["c", "g", "h"].map(|id| positions[id].x);
    for i in 0..xs.len() {
        for j in (i + 1)..xs.len() {
            assert!(
                (xs[i] - xs[j]).abs() >= 150.0,
                "nodes {i} and {j} too close: {} vs {}",
                xs[i],
                xs[j]
            );
        }
    }
}

#[test]
fn node_without_parents_in_subset_takes_next_open_slot() {
    let store = GraphBuilder::new()
        .with_plain("a", &[])
        .with_plain("h", &["a"])
        .build();

    let levels = assign_levels(&store, LevelPolicy::None).unwrap();
    // Render only h; its parent is not part of the view.
    let subset: Vec<&Node> = store.nodes().filter(|n| n.id == "h").collect();
    let positions = compute_positions(
        &store,
        &levels,
        &subset,
        LevelPolicy::None,
        &LayoutOptions::default(),
    );

    assert_eq!(positions["h"], Point { x: 0.0, y: 200.0 });
    assert!(!positions.contains_key("a"));
}

#[test]
fn layout_is_deterministic() {
    let store = GraphBuilder::new()
        .with_plain("a", &[])
        .with_plain("b", &[])
        .with_plain("c", &["a", "b"])
        .with_plain("d", &["c"])
        .with_plain("e", &["c", "a"])
        .build();

    let first = layout_all(&store, LevelPolicy::None);
    let second = layout_all(&store, LevelPolicy::None);
    assert_eq!(first, second);
}

#[test]
fn exhausted_retry_budget_terminates() {
    // A dozen siblings all averaging to the same spot; the nudge loop must
    // give up on the overflow instead of spinning.
    let mut builder = GraphBuilder::new().with_plain("a", &[]).with_plain("b", &[]);
    for i in 0..12 {
        builder = builder.with_plain(&format!("n{i:02}"), &["a", "b"]);
    }
    let store = builder.build();

    let positions = layout_all(&store, LevelPolicy::None);
    assert_eq!(positions.len(), store.len());
}

#[test]
fn layout_respects_the_level_policy() {
    // b's only dependency is done: in the pending tree it is a root and
    // must not be averaged over a parent that is not shown.
    let store = GraphBuilder::new()
        .with_node(
            techdag_test_utils::builders::NodeBuilder::new("done-dep")
                .done(true)
                .build(),
        )
        .with_plain("b", &["done-dep"])
        .build();

    let policy = LevelPolicy::IgnoreDoneDependencies;
    let levels = assign_levels(&store, policy).unwrap();
    assert_eq!(levels["b"], 0);

    let subset: Vec<&Node> = store.nodes().filter(|n| !n.done).collect();
    let positions = compute_positions(&store, &levels, &subset, policy, &LayoutOptions::default());
    assert_eq!(positions["b"].y, 0.0);
}

#[test]
fn container_wraps_content_with_padding() {
    let mut positions = BTreeMap::new();
    positions.insert("a".to_string(), Point { x: 0.0, y: 0.0 });
    positions.insert("b".to_string(), Point { x: 300.0, y: 200.0 });

    let size = container_size(
        &positions,
        Extent::new(100.0, 120.0),
        Extent::new(0.0, 0.0),
        100.0,
    );
    assert_eq!(size.width, 500.0);
    assert_eq!(size.height, 420.0);
}

#[test]
fn container_is_floored_at_the_viewport() {
    let positions: BTreeMap<String, Point> = BTreeMap::new();
    let size = container_size(
        &positions,
        Extent::new(100.0, 120.0),
        Extent::new(1280.0, 720.0),
        100.0,
    );
    assert_eq!(size.width, 1280.0);
    assert_eq!(size.height, 720.0);
}
