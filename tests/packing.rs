use symbios_arbor::{
    CATEGORY_LEVELS, META_STRIDE, NO_PARENT, POSITION_STRIDE, SegmentTree, TreeConfig,
    bounds_header, collection_of, generate, pack, pack_many,
};

fn sample(rule: &str, iterations: u32, seed: u64) -> SegmentTree {
    generate(
        &TreeConfig::new("F")
            .with_rule('F', rule)
            .with_iterations(iterations)
            .with_seed(seed),
    )
    .unwrap()
}

#[test]
fn test_single_tree_reads_back() {
    let tree = sample("FF+[+F-FL]-[-F+FH]", 2, 1);
    let packed = pack(&tree, 42);

    assert_eq!(packed.positions.len(), POSITION_STRIDE * tree.len());
    assert_eq!(packed.metadata.len(), META_STRIDE * tree.len());
    assert_eq!(packed.segment_count(), tree.len());
    assert_eq!(packed.category_bounds, None);

    for (i, s) in tree.iter().enumerate() {
        let (a, b) = packed.position_of(i).unwrap();
        assert_eq!(a, s.a);
        assert_eq!(b, s.b);

        let meta = packed.meta_of(i).unwrap();
        assert_eq!(meta.parent, s.parent);
        assert_eq!(meta.level, s.depth);
        assert_eq!(meta.branch_start, s.branch_start);

        let raw = &packed.metadata[i * META_STRIDE..(i + 1) * META_STRIDE];
        assert_eq!(raw[0], s.parent.unwrap_or(NO_PARENT));
        assert_eq!(raw[2], s.branch_start as u32);
    }
}

#[test]
fn test_variation_slot_is_seeded() {
    let tree = sample("F[+F]F", 2, 0);
    assert_eq!(pack(&tree, 7), pack(&tree, 7));
    assert_ne!(pack(&tree, 7).metadata, pack(&tree, 8).metadata);
}

#[test]
fn test_multi_collection_bounds() {
    let trees = vec![
        sample("FF+[+F-F]-[-F+F]", 2, 1),
        sample("FF-[+F-F-F]-[+&F+[-&F-F]]", 2, 2),
        SegmentTree::new(),
        sample("FF+[&F&F&F]-[^F]", 2, 3),
    ];
    let packed = pack_many(&trees, 0);
    let bounds = packed.category_bounds.clone().unwrap();

    let sizes: Vec<u32> = trees.iter().map(|t| t.len() as u32).collect();
    assert_eq!(bounds.len(), trees.len() + 1);
    assert_eq!(bounds[0], 0);
    assert_eq!(*bounds.last().unwrap(), sizes.iter().sum::<u32>());
    assert!(bounds.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(packed.positions.len(), POSITION_STRIDE * bounds[4] as usize);

    for (k, tree) in trees.iter().enumerate() {
        for (local, s) in tree.iter().enumerate() {
            let flat = bounds[k] as usize + local;
            assert_eq!(collection_of(&bounds, flat), Some(k));
            assert_eq!(packed.collection_of(flat), Some(k));

            let (a, b) = packed.position_of(flat).unwrap();
            assert_eq!((a, b), (s.a, s.b));

            let meta = packed.meta_of(flat).unwrap();
            // Parent ids stay local to their collection.
            assert_eq!(meta.parent, s.parent);
            assert_eq!(meta.level, s.depth.min(CATEGORY_LEVELS - 1));
            assert_eq!(meta.branch_start, s.branch_start);
        }
    }
    assert_eq!(packed.collection_of(bounds[4] as usize), None);
}

#[test]
fn test_deep_segments_share_last_category() {
    let tree = generate(&TreeConfig::new("F[F[F[F[F[F]]]]]")).unwrap();
    let packed = pack_many(std::slice::from_ref(&tree), 0);
    let levels: Vec<u32> = (0..tree.len())
        .map(|i| packed.meta_of(i).unwrap().level)
        .collect();
    assert_eq!(levels, vec![0, 1, 2, 3, 3, 3]);

    let single = pack(&tree, 0);
    assert_eq!(single.meta_of(5).unwrap().level, 5);
}

#[test]
fn test_bounds_header_and_byte_views() {
    let trees = vec![sample("F[+F]", 1, 0), sample("F[-F]F", 1, 0)];
    let packed = pack_many(&trees, 0);
    let bounds = packed.category_bounds.as_deref().unwrap();
    assert_eq!(bounds, &[0, 2, 5]);
    assert_eq!(bounds_header(bounds), vec![3, 0, 2, 5]);

    assert_eq!(packed.position_bytes().len(), packed.positions.len() * 4);
    assert_eq!(packed.metadata_bytes().len(), packed.metadata.len() * 4);
}

#[test]
fn test_no_collections() {
    let packed = pack_many(&[], 0);
    assert!(packed.positions.is_empty());
    assert_eq!(packed.category_bounds, Some(vec![0]));
    assert_eq!(packed.collection_of(0), None);
}
