use navywar::{
    footprint, place_fleet, random_placement, AttackOutcome, AttackState, Board, Coord,
    EngineError, Orientation, Ship, ShipSpec,
};
use rand::{rngs::SmallRng, SeedableRng};

const PATROL: ShipSpec = ShipSpec::new("Patrol", 3, 30);
const SCOUT: ShipSpec = ShipSpec::new("Scout", 2, 20);

#[test]
fn test_sinking_a_ship() {
    let mut board = Board::new(20, 10);
    let id = board
        .place(PATROL, Coord::new(0, 0), Orientation::Horizontal)
        .unwrap();

    assert_eq!(board.resolve_attack(Coord::new(0, 0)).unwrap(), AttackOutcome::Hit(id));
    assert!(!board.all_sunk());
    assert_eq!(board.resolve_attack(Coord::new(0, 1)).unwrap(), AttackOutcome::Hit(id));
    assert!(!board.all_sunk());
    assert_eq!(
        board.resolve_attack(Coord::new(0, 2)).unwrap(),
        AttackOutcome::HitAndSunk(id)
    );
    assert!(board.all_sunk());

    let ship = board.fleet().ship(id).unwrap();
    assert!(ship.is_destroyed());
    assert_eq!(ship.hits(), 3);
}

#[test]
fn test_miss_and_repeat() {
    let mut board = Board::new(20, 10);
    board
        .place(PATROL, Coord::new(0, 0), Orientation::Horizontal)
        .unwrap();

    assert_eq!(board.resolve_attack(Coord::new(15, 15)).unwrap(), AttackOutcome::Miss);
    assert_eq!(
        board.resolve_attack(Coord::new(15, 15)).unwrap(),
        AttackOutcome::AlreadyAttacked
    );

    board.resolve_attack(Coord::new(0, 1)).unwrap();
    let hits_before = board.fleet().ship(0).unwrap().hits();
    assert_eq!(
        board.resolve_attack(Coord::new(0, 1)).unwrap(),
        AttackOutcome::AlreadyAttacked
    );
    assert_eq!(board.fleet().ship(0).unwrap().hits(), hits_before);
    assert_eq!(board.attacked().count_ones(), 2);
}

#[test]
fn test_attack_outside_board() {
    let mut board = Board::new(10, 10);
    assert_eq!(
        board.resolve_attack(Coord::new(10, 0)),
        Err(EngineError::InvalidCoordinate(Coord::new(10, 0)))
    );
}

#[test]
fn test_cell_states() {
    let mut board = Board::new(20, 10);
    let id = board
        .place(SCOUT, Coord::new(4, 4), Orientation::Vertical)
        .unwrap();

    let cell = board.cell(Coord::new(5, 4)).unwrap();
    assert_eq!(cell.occupant, Some(id));
    assert_eq!(cell.attack, AttackState::Unattacked);

    board.resolve_attack(Coord::new(5, 4)).unwrap();
    board.resolve_attack(Coord::new(0, 0)).unwrap();
    assert_eq!(board.cell(Coord::new(5, 4)).unwrap().attack, AttackState::Hit);
    let miss = board.cell(Coord::new(0, 0)).unwrap();
    assert_eq!(miss.attack, AttackState::Miss);
    assert_eq!(miss.occupant, None);
}

#[test]
fn test_placement_rules() {
    let mut board = Board::new(20, 10);
    board
        .place(PATROL, Coord::new(2, 2), Orientation::Horizontal)
        .unwrap();
    assert_eq!(
        board.place(SCOUT, Coord::new(1, 3), Orientation::Vertical),
        Err(EngineError::ShipOverlaps)
    );
    // Beyond the placement quadrant, though still on the board.
    assert_eq!(
        board.place(SCOUT, Coord::new(9, 9), Orientation::Horizontal),
        Err(EngineError::ShipOutOfBounds)
    );
    assert_eq!(
        board.place(SCOUT, Coord::new(12, 0), Orientation::Horizontal),
        Err(EngineError::ShipOutOfBounds)
    );
    // Touching is allowed.
    assert!(board
        .place(SCOUT, Coord::new(3, 2), Orientation::Horizontal)
        .is_ok());
    assert_eq!(board.fleet().len(), 2);
}

#[test]
fn test_footprint_cells() {
    let cells = footprint(Coord::new(1, 2), Orientation::Vertical, 3, 10).unwrap();
    assert_eq!(cells, vec![Coord::new(1, 2), Coord::new(2, 2), Coord::new(3, 2)]);
    assert_eq!(
        footprint(Coord::new(0, 8), Orientation::Horizontal, 3, 10),
        Err(EngineError::ShipOutOfBounds)
    );

    let ship = Ship::new(PATROL, Coord::new(0, 7), Orientation::Horizontal, 20, 10).unwrap();
    assert_eq!(ship.origin(), Coord::new(0, 7));
    assert!(ship.occupies(Coord::new(0, 9)));
    assert!(!ship.occupies(Coord::new(1, 9)));
    assert_eq!(ship.mask().count_ones(), 3);
}

#[test]
fn test_footprint_at_index_limit() {
    assert_eq!(
        footprint(Coord::new(usize::MAX, 0), Orientation::Vertical, 3, 10),
        Err(EngineError::ShipOutOfBounds)
    );
    assert_eq!(
        footprint(Coord::new(0, usize::MAX - 1), Orientation::Horizontal, 3, 10),
        Err(EngineError::ShipOutOfBounds)
    );
    assert_eq!(
        Orientation::Horizontal.step(Coord::new(0, usize::MAX), 1),
        None
    );

    let mut board = Board::new(10, 10);
    assert_eq!(
        board.place(PATROL, Coord::new(usize::MAX, 0), Orientation::Vertical),
        Err(EngineError::ShipOutOfBounds)
    );
}

#[test]
fn test_placement_without_area() {
    let mut rng = SmallRng::seed_from_u64(3);
    let mut board = Board::new(10, 0);
    assert!(matches!(
        random_placement(&board, SCOUT, 100, &mut rng),
        Err(EngineError::InvalidConfig(_))
    ));
    assert!(matches!(
        place_fleet(&[SCOUT], &mut board, 100, &mut rng),
        Err(EngineError::InvalidConfig(_))
    ));
    assert!(board.fleet().is_empty());
}
