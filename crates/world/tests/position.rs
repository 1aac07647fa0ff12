use gdmc_world::{BlockOffset, Vector2Int};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Vector2Int
// ---------------------------------------------------------------------------

#[test]
fn constants_point_along_their_axes() {
    assert_eq!(Vector2Int::ZERO, Vector2Int::new(0, 0));
    assert_eq!(Vector2Int::ONE, Vector2Int::AXIS_X + Vector2Int::AXIS_Z);
    assert_eq!(Vector2Int::AXIS_X.x, 1);
    assert_eq!(Vector2Int::AXIS_Z.z, 1);
}

#[test]
fn componentwise_min_max() {
    let a = Vector2Int::new(3, -8);
    let b = Vector2Int::new(-1, 4);
    assert_eq!(a.min(b), Vector2Int::new(-1, -8));
    assert_eq!(a.max(b), Vector2Int::new(3, 4));
}

#[test]
fn manhattan_distance() {
    assert_eq!(Vector2Int::new(1, 1).manhattan(Vector2Int::new(-2, 5)), 7);
    assert_eq!(Vector2Int::ZERO.manhattan(Vector2Int::ZERO), 0);
}

#[test]
fn negation_flips_both_axes() {
    assert_eq!(-Vector2Int::new(2, -5), Vector2Int::new(-2, 5));
}

#[test]
fn chunk_conversion_matches_server_division() {
    assert_eq!(Vector2Int::new(31, 0).to_chunk().x, 1);
    assert_eq!(Vector2Int::new(-1, 0).to_chunk().x, 0);
    assert_eq!(Vector2Int::new(0, 47).to_chunk().z, 2);
}

#[test]
fn block_offset_arithmetic() {
    let a = BlockOffset::new(-7, 5, 10);
    let b = BlockOffset::new(1, 1, 1);
    assert_eq!(a + b, BlockOffset::new(-6, 6, 11));
    assert_eq!(a - a, BlockOffset::ORIGIN);
    assert_eq!(a.horizontal(), Vector2Int::new(-7, 10));
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

fn small() -> impl Strategy<Value = i32> {
    -1_000_000i32..1_000_000
}

fn arb_vec() -> impl Strategy<Value = Vector2Int> {
    (small(), small()).prop_map(|(x, z)| Vector2Int::new(x, z))
}

proptest! {
    #[test]
    fn add_then_sub_is_identity(a in arb_vec(), b in arb_vec()) {
        prop_assert_eq!(a + b - b, a);
    }

    #[test]
    fn add_then_sub_is_identity_over_full_range(
        a in any::<(i32, i32)>(),
        b in any::<(i32, i32)>(),
    ) {
        let (a, b) = (Vector2Int::new(a.0, a.1), Vector2Int::new(b.0, b.1));
        prop_assert_eq!(a + b - b, a);
        prop_assert_eq!(a.manhattan(b), b.manhattan(a));
    }

    #[test]
    fn manhattan_is_symmetric(a in arb_vec(), b in arb_vec()) {
        prop_assert_eq!(a.manhattan(b), b.manhattan(a));
    }

    #[test]
    fn min_never_exceeds_max(a in arb_vec(), b in arb_vec()) {
        let lo = a.min(b);
        let hi = a.max(b);
        prop_assert!(lo.x <= hi.x && lo.z <= hi.z);
    }

    #[test]
    fn to_chunk_is_truncating_division(v in arb_vec()) {
        let c = v.to_chunk();
        prop_assert_eq!(c.x, v.x / 16);
        prop_assert_eq!(c.z, v.z / 16);
        prop_assert_eq!(c, v / 16);
    }
}
