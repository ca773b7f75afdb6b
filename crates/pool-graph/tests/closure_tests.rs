use pool_graph::{ClosureEngine, RelationGraph};
use pool_item::{ItemId, ItemKind};
use pool_test_utils::{Ne555Fixture, PoolBuilder};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::collections::HashSet;

proptest! {
    #[test]
    fn prop_where_used_terminates_on_random_edges(
        unit_count in 1..8usize,
        edges in proptest::collection::vec((0..8usize, 0..8usize), 0..40)
    ) {
        let mut builder = PoolBuilder::new();
        let units: Vec<ItemId> = (0..unit_count)
            .map(|i| builder.unit(&format!("U{i}"), &["1"]))
            .collect();
        let entity = builder.entity("E", &units);
        let part = builder.part("P", entity);

        for (from, to) in edges {
            if from < units.len() && to < units.len() {
                builder.dependency(units[from], units[to]);
            }
        }
        builder.dependency(units[0], entity);

        let graph = RelationGraph::build(&builder.build());
        let rows = ClosureEngine::new(&graph).where_used(&[part], |_| false);

        // Bounded by the number of items
        prop_assert!(rows.len() <= graph.node_count());
        let unique: HashSet<ItemId> = rows.iter().map(|r| r.id).collect();
        prop_assert_eq!(unique.len(), rows.len());
    }

    #[test]
    fn prop_derived_terminates_on_random_bases(
        bases in proptest::collection::vec(0..6usize, 6)
    ) {
        let mut builder = PoolBuilder::new();
        let unit = builder.unit("U", &["1"]);
        let entity = builder.entity("E", &[unit]);
        let parts: Vec<ItemId> = (0..bases.len())
            .map(|i| builder.part(&format!("P{i}"), entity))
            .collect();
        for (i, base) in bases.iter().enumerate() {
            let base = parts[*base].uuid;
            builder.edit_part(parts[i], |p| p.base = Some(base));
        }

        let graph = RelationGraph::build(&builder.build());
        let rows = ClosureEngine::new(&graph).derived(&parts, |_| true);

        prop_assert!(rows.len() <= parts.len());
    }
}

#[test]
fn test_two_node_cycle_is_visited_once() {
    let mut builder = PoolBuilder::new();
    let a = builder.unit("A", &["1"]);
    let b = builder.unit("B", &["1"]);
    let entity = builder.entity("E", &[a]);
    let part = builder.part("P", entity);
    builder.dependency(a, b).dependency(b, a);

    let graph = RelationGraph::build(&builder.build());
    let rows = ClosureEngine::new(&graph).where_used(&[part], |_| false);

    let ids: Vec<ItemId> = rows.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![part, entity, a, b]);
}

#[test]
fn test_derivation_cycle_terminates() {
    let mut builder = PoolBuilder::new();
    let unit = builder.unit("U", &["1"]);
    let entity = builder.entity("E", &[unit]);
    let x = builder.part("X", entity);
    let y = builder.derived_part("Y", x);
    builder.edit_part(x, |p| p.base = Some(y.uuid));

    let graph = RelationGraph::build(&builder.build());
    let rows = ClosureEngine::new(&graph).derived(&[x], |_| true);

    let ids: Vec<(ItemId, usize)> = rows.iter().map(|r| (r.id, r.depth)).collect();
    assert_eq!(ids, vec![(x, 0), (y, 1)]);
}

#[test]
fn test_lower_type_order_precedes_regardless_of_discovery() {
    // Inner entity is only discovered through the unit, after it
    let mut builder = PoolBuilder::new();
    let unit = builder.unit("U", &["1"]);
    let other = builder.unit("Other", &["1"]);
    let entity = builder.entity("E", &[unit]);
    let inner = builder.entity("Inner", &[other]);
    let part = builder.part("P", entity);
    builder.dependency(unit, inner);

    let graph = RelationGraph::build(&builder.build());
    let rows = ClosureEngine::new(&graph).where_used(&[part], |_| false);

    let entity_pos = rows.iter().position(|r| r.id == inner).unwrap();
    let unit_pos = rows.iter().position(|r| r.id == other).unwrap();
    assert_eq!(rows[entity_pos].type_order, 1);
    assert_eq!(rows[unit_pos].type_order, 2);
    assert!(entity_pos < unit_pos);
}

#[test]
fn test_symbols_follow_their_unit() {
    let mut builder = PoolBuilder::new();
    let f = Ne555Fixture::add_to(&mut builder);
    let graph = RelationGraph::build(&builder.build());
    let rows = ClosureEngine::new(&graph).where_used(&[f.part], |_| false);

    let symbol = rows.iter().find(|r| r.id == f.symbol).unwrap();
    assert_eq!(symbol.depth, 3);
    assert_eq!(symbol.kind, ItemKind::Symbol);
    assert_eq!(symbol.name, "NE555");
}

#[test]
fn test_model_sits_below_package() {
    let mut builder = PoolBuilder::new();
    let f = Ne555Fixture::add_to(&mut builder);
    let graph = RelationGraph::build(&builder.build());
    let rows = ClosureEngine::new(&graph).where_used(&[f.part], |_| false);

    let package = rows.iter().find(|r| r.id == f.package).unwrap();
    let model = rows.iter().find(|r| r.id == f.model).unwrap();
    assert_eq!(model.depth, package.depth + 1);
}

#[test]
fn test_shared_items_listed_per_root() {
    let mut builder = PoolBuilder::new();
    let unit = builder.unit("U", &["1"]);
    let entity = builder.entity("E", &[unit]);
    let p1 = builder.part("P1", entity);
    let p2 = builder.part("P2", entity);

    let graph = RelationGraph::build(&builder.build());
    let rows = ClosureEngine::new(&graph).where_used(&[p2, p1], |_| false);

    let roots: Vec<(ItemId, ItemId)> = rows.iter().map(|r| (r.root, r.id)).collect();
    assert_eq!(
        roots,
        vec![
            (p1, p1),
            (p1, entity),
            (p1, unit),
            (p2, p2),
            (p2, entity),
            (p2, unit),
        ]
    );
}
