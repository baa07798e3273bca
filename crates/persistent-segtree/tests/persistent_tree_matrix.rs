use persistent_segtree::{FnMonoid, Max, Min, PersistentTree, Sum, TreeError, VersionId};

fn v(id: u64) -> VersionId {
    VersionId::from_u64(id)
}

fn demo_tree() -> PersistentTree<Sum<i64>> {
    let tree = PersistentTree::new(Sum::<i64>::new());
    assert_eq!(tree.build(&[5, 3, 7, 2]), Ok(v(0)));
    tree
}

#[test]
fn build_registers_version_zero_matrix() {
    let tree = demo_tree();
    assert_eq!(tree.query_point(v(0), 1), Ok(3));
    assert_eq!(tree.latest_version(), Ok(v(0)));
    assert_eq!(tree.version_count(), 1);
    assert_eq!(tree.array_len(), Some(4));
    assert_eq!(tree.base_of(v(0)), Ok(None));
}

#[test]
fn update_chain_matrix() {
    let tree = demo_tree();

    assert_eq!(tree.apply(v(0), 1, 6), Ok(v(1)));
    assert_eq!(tree.query_point(v(1), 1), Ok(6));
    assert_eq!(tree.query_point(v(1), 3), Ok(2));
    assert_eq!(tree.query_point(v(0), 1), Ok(3));

    assert_eq!(tree.apply(v(1), 3, 9), Ok(v(2)));
    assert_eq!(tree.query_point(v(2), 3), Ok(9));
    assert_eq!(tree.query_point(v(2), 1), Ok(6));
    assert_eq!(tree.query_point(v(0), 3), Ok(2));

    assert_eq!(tree.latest_version(), Ok(v(2)));
    assert_eq!(tree.snapshot(v(0)).unwrap().to_vec(), vec![5, 3, 7, 2]);
    assert_eq!(tree.snapshot(v(1)).unwrap().to_vec(), vec![5, 6, 7, 2]);
    assert_eq!(tree.snapshot(v(2)).unwrap().to_vec(), vec![5, 6, 7, 9]);
}

#[test]
fn boundary_matrix() {
    let tree = demo_tree();

    assert_eq!(
        tree.query_point(v(0), 4),
        Err(TreeError::IndexOutOfRange { lo: 4, hi: 4, len: 4 })
    );
    assert_eq!(
        tree.query_point(v(0), usize::MAX),
        Err(TreeError::IndexOutOfRange {
            lo: i64::MAX,
            hi: i64::MAX,
            len: 4
        })
    );
    assert_eq!(tree.apply(v(99), 0, 1), Err(TreeError::VersionNotFound(99)));
    assert_eq!(tree.apply(v(0), 4, 1), Err(TreeError::IndexOutOfRange { lo: 4, hi: 4, len: 4 }));
    assert_eq!(tree.query_point(v(1), 0), Err(TreeError::VersionNotFound(1)));

    // Rejected updates register nothing.
    assert_eq!(tree.version_count(), 1);
    assert_eq!(tree.latest_version(), Ok(v(0)));
}

#[test]
fn range_boundary_matrix() {
    let tree = demo_tree();
    assert_eq!(tree.query_range(v(0), 0, 3), Ok(17));
    assert_eq!(tree.query_range(v(0), 2, 2), Ok(7));
    assert_eq!(tree.query_range(v(0), 1, 2), Ok(10));
    assert_eq!(tree.query_range(v(0), 2, 1), Err(TreeError::IndexOutOfRange { lo: 2, hi: 1, len: 4 }));
    assert_eq!(tree.query_range(v(0), 0, 4), Err(TreeError::IndexOutOfRange { lo: 0, hi: 4, len: 4 }));
    assert_eq!(tree.query_range(v(7), 0, 1), Err(TreeError::VersionNotFound(7)));
}

#[test]
fn branching_matrix() {
    let tree = demo_tree();
    tree.apply(v(0), 1, 6).unwrap();
    tree.apply(v(1), 3, 9).unwrap();

    assert_eq!(tree.apply(v(0), 2, 100), Ok(v(3)));
    assert_eq!(tree.snapshot(v(3)).unwrap().to_vec(), vec![5, 3, 100, 2]);
    assert_eq!(tree.query_point(v(3), 1), Ok(3));
    assert_eq!(tree.query_point(v(3), 3), Ok(2));
    assert_eq!(tree.query_range(v(3), 0, 3), Ok(110));

    // The 1 -> 2 chain is unaffected by the branch.
    assert_eq!(tree.snapshot(v(2)).unwrap().to_vec(), vec![5, 6, 7, 9]);
    assert_eq!(tree.query_point(v(2), 2), Ok(7));

    assert_eq!(tree.base_of(v(3)), Ok(Some(v(0))));
    assert_eq!(tree.lineage(v(2)), Ok(vec![v(2), v(1), v(0)]));
    assert_eq!(tree.lineage(v(3)), Ok(vec![v(3), v(0)]));

    // Branch off the branch.
    assert_eq!(tree.apply(v(3), 0, -5), Ok(v(4)));
    assert_eq!(tree.lineage(v(4)), Ok(vec![v(4), v(3), v(0)]));
    assert_eq!(tree.query_range(v(4), 0, 3), Ok(100));
}

#[test]
fn structural_sharing_matrix() {
    let values: Vec<i64> = (0..37).collect();
    let tree = PersistentTree::new(Sum::<i64>::new());
    tree.build(&values).unwrap();

    for target in [0usize, 13, 18, 36] {
        let base = tree.latest_version().unwrap();
        let next = tree.apply(base, target, -1).unwrap();
        let before = tree.snapshot(base).unwrap();
        let after = tree.snapshot(next).unwrap();

        for j in 0..values.len() {
            if j == target {
                assert!(!after.shares_leaf_with(&before, j).unwrap());
            } else {
                assert!(after.shares_leaf_with(&before, j).unwrap(), "target {target}, index {j}");
                assert_eq!(after.get(j), before.get(j));
            }
        }
        // 37 leaves: the tree has 7 levels, so at most 7 nodes are copied.
        let fresh = after.fresh_nodes_since(&before);
        assert!((6..=7).contains(&fresh), "fresh = {fresh}");
    }
}

#[test]
fn reads_are_idempotent_matrix() {
    let tree = demo_tree();
    tree.apply(v(0), 0, 1).unwrap();

    let first: Vec<i64> = (0..4).map(|i| tree.query_point(v(1), i).unwrap()).collect();
    for _ in 0..3 {
        let again: Vec<i64> = (0..4).map(|i| tree.query_point(v(1), i).unwrap()).collect();
        assert_eq!(again, first);
        assert_eq!(tree.query_range(v(1), 0, 3), Ok(13));
    }
    assert_eq!(tree.version_count(), 2);
    assert_eq!(tree.latest_version(), Ok(v(1)));
}

#[test]
fn aggregate_consistency_matrix() {
    let tree = PersistentTree::new(Min::<i32>::new());
    tree.build(&[9, 4, 7, 1, 8, 2, 6]).unwrap();
    tree.apply(v(0), 3, 10).unwrap();
    tree.apply(v(1), 5, 0).unwrap();
    tree.apply(v(0), 6, -3).unwrap();

    for id in 0..tree.version_count() as u64 {
        let snap = tree.snapshot(v(id)).unwrap();
        snap.assert_valid().unwrap();
    }
    assert_eq!(tree.query_range(v(0), 0, 6), Ok(1));
    assert_eq!(tree.query_range(v(1), 0, 6), Ok(2));
    assert_eq!(tree.query_range(v(2), 0, 6), Ok(0));
    assert_eq!(tree.query_range(v(3), 4, 6), Ok(-3));
    assert_eq!(tree.query_range(v(1), 0, 2), Ok(4));
}

#[test]
fn custom_monoid_matrix() {
    let tree = PersistentTree::new(Max::<f64>::new());
    tree.build(&[0.5, 2.5, -1.0]).unwrap();
    tree.apply(v(0), 0, 3.0).unwrap();
    assert_eq!(tree.query_range(v(0), 0, 2), Ok(2.5));
    assert_eq!(tree.query_range(v(1), 0, 2), Ok(3.0));

    let concat = FnMonoid::new(String::new(), |a: &String, b: &String| format!("{a}{b}"));
    let words: Vec<String> = ["per", "sis", "tent"].iter().map(|s| s.to_string()).collect();
    let tree = PersistentTree::new(concat);
    tree.build(&words).unwrap();
    let edited = tree.apply(v(0), 1, "ist".to_string()).unwrap();
    assert_eq!(tree.query_range(v(0), 0, 2).unwrap(), "persistent");
    assert_eq!(tree.query_range(edited, 0, 2).unwrap(), "peristtent");
    assert_eq!(tree.query_range(edited, 1, 2).unwrap(), "isttent");
}

#[test]
fn single_element_matrix() {
    let tree = PersistentTree::new(Sum::<u64>::new());
    tree.build(&[41]).unwrap();
    assert_eq!(tree.apply(v(0), 0, 42), Ok(v(1)));
    assert_eq!(tree.query_point(v(0), 0), Ok(41));
    assert_eq!(tree.query_point(v(1), 0), Ok(42));
    assert_eq!(tree.query_range(v(1), 0, 0), Ok(42));
    assert_eq!(tree.query_point(v(1), 1), Err(TreeError::IndexOutOfRange { lo: 1, hi: 1, len: 1 }));
    assert_eq!(tree.snapshot(v(1)).unwrap().dump(), "[0] = 42");
}

#[test]
fn snapshot_outlives_borrow_matrix() {
    let snap = {
        let tree = demo_tree();
        tree.apply(v(0), 2, 0).unwrap();
        tree.snapshot(v(1)).unwrap()
    };
    assert_eq!(snap.to_vec(), vec![5, 3, 0, 2]);
    assert_eq!(snap.range(0, 3), Ok(10));
}

#[test]
fn public_reads_reject_out_of_range_matrix() {
    let tree = demo_tree();
    let err = |i: i64| TreeError::IndexOutOfRange { lo: i, hi: i, len: 4 };

    for index in [4usize, 10] {
        assert_eq!(tree.query_point(v(0), index), Err(err(index as i64)));
        assert_eq!(
            tree.query_range(v(0), 0, index),
            Err(TreeError::IndexOutOfRange { lo: 0, hi: index as i64, len: 4 })
        );
    }

    let snap = tree.snapshot(v(0)).unwrap();
    assert_eq!(snap.get(10), Err(err(10)));
    assert_eq!(snap.range(3, 10), Err(TreeError::IndexOutOfRange { lo: 3, hi: 10, len: 4 }));
    assert_eq!(snap.shares_leaf_with(&snap, 4), Err(err(4)));

    // The last leaf stays reachable only through its own index.
    assert_eq!(snap.get(3), Ok(2));
    assert_eq!(tree.query_point(v(0), 3), Ok(2));
}
