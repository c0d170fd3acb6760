// tests/basic_topology.rs
use glam::Vec3;
use symbios_arbor::{
    Grammar, SegmentKind, TreeConfig, TreeInterpreter, TurtleOp, generate, rewrite,
};

fn bush() -> TreeConfig {
    TreeConfig::new("F")
        .with_rule('F', "F[+F]F[-F]F")
        .with_iterations(1)
        .with_angle(25.0)
        .with_step_length(1.0)
        .with_uniform_steps()
}

#[test]
fn test_single_round_bush_topology() {
    let config = bush();
    let symbols = rewrite(&config.axiom, &config.rules, config.iterations);
    assert_eq!(symbols, "F[+F]F[-F]F");

    let tree = generate(&config).unwrap();

    // Assertions
    assert_eq!(tree.len(), 5, "Should have 5 chain segments");
    assert_eq!(tree.count_kind(SegmentKind::Branch), 5);

    let flags: Vec<bool> = tree.iter().map(|s| s.branch_start).collect();
    assert_eq!(flags, vec![false, false, true, false, true]);

    // Topology check
    let parents: Vec<_> = tree.iter().map(|s| s.parent).collect();
    assert_eq!(parents, vec![None, Some(0), Some(0), Some(2), Some(2)]);
    let depths: Vec<_> = tree.iter().map(|s| s.depth).collect();
    assert_eq!(depths, vec![0, 1, 0, 1, 0]);

    // Geometric check
    // The trunk is three unit segments straight up the Y axis.
    let seg = tree.segments();
    assert!(seg[4].b.abs_diff_eq(Vec3::new(0.0, 3.0, 0.0), 1e-5));
    // Side branches leave from the trunk tips, mirrored across the trunk.
    assert!(seg[1].a.abs_diff_eq(seg[0].b, 1e-5));
    assert!(seg[3].a.abs_diff_eq(seg[2].b, 1e-5));
    let angle = 25f32.to_radians();
    assert!(seg[1].direction().abs_diff_eq(Vec3::new(-angle.sin(), angle.cos(), 0.0), 1e-5));
    assert!(seg[3].direction().abs_diff_eq(Vec3::new(angle.sin(), angle.cos(), 0.0), 1e-5));
}

#[test]
fn test_unmatched_pop_is_ignored() {
    let tree = generate(&TreeConfig::new("]F")).unwrap();
    assert_eq!(tree.len(), 1);
    assert!(!tree.segments()[0].branch_start);
    assert_eq!(tree.segments()[0].parent, None);
}

#[test]
fn test_empty_inputs_produce_empty_trees() {
    assert!(generate(&TreeConfig::default()).unwrap().is_empty());
    assert!(
        generate(&TreeConfig::new("").with_rule('F', "FF").with_iterations(4))
            .unwrap()
            .is_empty()
    );

    // Zero-length steps still emit well-formed, degenerate segments.
    let tree = generate(&TreeConfig::new("FF").with_step_length(0.0)).unwrap();
    assert_eq!(tree.len(), 2);
    assert!(tree.iter().all(|s| s.a == s.b));
}

#[test]
fn test_invalid_config_is_rejected_before_generation() {
    assert!(generate(&TreeConfig::new("F").with_step_length(-2.0)).is_err());
}

#[test]
fn test_parents_always_precede_children() {
    let configs = [
        TreeConfig::new("X")
            .with_rule('X', "F+[[X]-X]-F[-FX]+XL")
            .with_rule('F', "FF")
            .with_iterations(4),
        TreeConfig::new("F")
            .with_rule('F', "FF-[+F-F-F]-[+&F+[-&F-FH]]")
            .with_iterations(3)
            .with_seed(3),
        TreeConfig {
            random_factor: 1.0,
            ..TreeConfig::new("A")
                .with_rule('A', "[&FL!A]/////[&FL!A]///////[&FHA]")
                .with_iterations(5)
                .with_seed(11)
        },
    ];
    for config in configs {
        let tree = generate(&config).unwrap();
        assert!(!tree.is_empty());
        assert!(tree.check_parent_order());
        for (i, s) in tree.iter().enumerate() {
            if let Some(p) = s.parent {
                assert!((p as usize) < i);
            }
            assert!(s.a.is_finite() && s.b.is_finite());
        }
    }
}

#[test]
fn test_same_seed_same_tree() {
    let config = TreeConfig {
        random_factor: 0.6,
        ..TreeConfig::new("F")
            .with_rule('F', "F[+FL]F[-FH]F")
            .with_iterations(3)
            .with_seed(1234)
    };
    assert_eq!(generate(&config).unwrap(), generate(&config).unwrap());

    let other = TreeConfig {
        seed: 4321,
        ..config.clone()
    };
    assert_ne!(generate(&config).unwrap(), generate(&other).unwrap());
}

#[test]
fn test_custom_symbols() {
    let symbols = Grammar::new("A").with_rule('A', "B[A]A").expand(2);
    let mut interpreter = TreeInterpreter::new(TreeConfig::default().with_uniform_steps());
    interpreter.set_op('B', TurtleOp::Draw);
    interpreter.set_op('[', TurtleOp::Push);
    interpreter.set_op(']', TurtleOp::Pop);

    // "B[B[A]A]B[A]A" -> three draws.
    let tree = interpreter.build_tree(&symbols);
    assert_eq!(tree.len(), 3);
    assert_eq!(tree.segments()[1].parent, Some(0));
    assert_eq!(tree.segments()[2].parent, Some(0));
    assert!(tree.segments()[2].branch_start);
}

#[test]
fn test_chains_cover_every_tip() {
    let tree = generate(&bush()).unwrap();
    let chains = tree.chains();
    // Tips: 1, 3, 4. Branch starts at 2 and 4 split the trunk.
    assert_eq!(
        chains,
        vec![vec![0, 1], vec![0], vec![2, 3], vec![2], vec![4]]
    );
}
