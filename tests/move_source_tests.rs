use std::collections::HashSet;

use navywar::{
    sample_remaining, Bits, CandidatePool, Coord, EngineError, MoveSource, RandomMoveSource,
};
use proptest::prelude::*;
use rand::{rngs::SmallRng, SeedableRng};

#[test]
fn test_last_free_cell_is_found() {
    let mut exclude = Bits::new(2);
    exclude.set(0, 0).unwrap();
    exclude.set(0, 1).unwrap();
    exclude.set(1, 0).unwrap();

    let mut rng = SmallRng::seed_from_u64(1);
    let mut source = RandomMoveSource::new(1);
    for _ in 0..20 {
        assert_eq!(source.next_move(&mut rng, &exclude).unwrap(), Coord::new(1, 1));
    }
}

#[test]
fn test_exhausted_board() {
    let mut rng = SmallRng::seed_from_u64(1);
    let full = Bits::full(3);
    assert_eq!(
        RandomMoveSource::default().next_move(&mut rng, &full),
        Err(EngineError::BoardExhausted)
    );
    assert_eq!(sample_remaining(&mut rng, &full), Err(EngineError::BoardExhausted));
    assert_eq!(
        CandidatePool::new(3).next_move(&mut rng, &full),
        Err(EngineError::BoardExhausted)
    );
}

#[test]
fn test_pool_hands_out_every_cell_once() {
    let mut rng = SmallRng::seed_from_u64(9);
    let mut pool = CandidatePool::new(20);
    assert_eq!(pool.len(), 400);

    let mut seen = HashSet::new();
    while let Some(coord) = pool.draw(&mut rng) {
        assert!(coord.row < 20 && coord.col < 20);
        assert!(seen.insert(coord), "{} drawn twice", coord);
    }
    assert_eq!(seen.len(), 400);
    assert!(pool.is_empty());
}

#[test]
fn test_pool_skips_excluded_cells() {
    let mut rng = SmallRng::seed_from_u64(4);
    let mut exclude = Bits::full(4);
    exclude.clear(2, 3).unwrap();
    let mut pool = CandidatePool::new(4);
    assert_eq!(pool.next_move(&mut rng, &exclude).unwrap(), Coord::new(2, 3));
    assert!(pool.len() < 16);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn moves_never_repeat(seed in any::<u64>(), side in 1usize..12) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut source = RandomMoveSource::default();
        let mut exclude = Bits::new(side);
        for _ in 0..side * side {
            let coord = source.next_move(&mut rng, &exclude).unwrap();
            prop_assert!(!exclude.get(coord.row, coord.col).unwrap());
            exclude.set(coord.row, coord.col).unwrap();
        }
        prop_assert!(exclude.is_full());
        prop_assert_eq!(source.next_move(&mut rng, &exclude), Err(EngineError::BoardExhausted));
    }
}
