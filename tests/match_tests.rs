use navywar::{
    AttackOutcome, Board, Coord, EndReason, EngineError, GameConfig, GameEvent, Match,
    Orientation, Scores, ShipSpec, Side, TurnState, Winner,
};
use rand::{rngs::SmallRng, SeedableRng};

const FLAGSHIP: ShipSpec = ShipSpec::new("Flagship", 1, 120);
const ESCORT: ShipSpec = ShipSpec::new("Escort", 1, 90);
const TENDER: ShipSpec = ShipSpec::new("Tender", 1, 10);

fn config() -> GameConfig {
    GameConfig::navy_war()
        .with_roster(&[FLAGSHIP, ESCORT, TENDER])
        .with_time_limit(60)
}

/// Flagship at A1, escort at C1, tender at E1.
fn board() -> Board {
    let mut board = Board::new(20, 10);
    board.place(FLAGSHIP, Coord::new(0, 0), Orientation::Horizontal).unwrap();
    board.place(ESCORT, Coord::new(0, 2), Orientation::Horizontal).unwrap();
    board.place(TENDER, Coord::new(0, 4), Orientation::Horizontal).unwrap();
    board
}

fn new_match(config: &GameConfig) -> Match {
    let mut m = Match::with_boards(1, config, board(), board());
    m.drain_events();
    m
}

#[test]
fn test_turns_alternate() {
    let config = config();
    let mut m = new_match(&config);
    assert_eq!(m.turn(), TurnState::HumanTurn);

    assert_eq!(m.submit_attack(Side::Human, Coord::new(9, 9)).unwrap(), AttackOutcome::Miss);
    assert_eq!(m.turn(), TurnState::ComputerTurn);
    assert_eq!(m.submit_attack(Side::Computer, Coord::new(0, 2)).unwrap(), AttackOutcome::HitAndSunk(1));
    assert_eq!(m.turn(), TurnState::HumanTurn);
    assert_eq!(m.scores(), Scores { human: 0, computer: 90 });
    assert_eq!(m.scores().of(Side::Computer), 90);

    let events = m.drain_events();
    assert_eq!(
        events[0],
        GameEvent::AttackResolved {
            attacker: Side::Human,
            coord: Coord::new(9, 9),
            outcome: AttackOutcome::Miss,
            ship: None,
            footprint: None,
        }
    );
    assert_eq!(events[1], GameEvent::TurnChanged { active: Side::Computer });
    assert_eq!(
        events[2],
        GameEvent::AttackResolved {
            attacker: Side::Computer,
            coord: Coord::new(0, 2),
            outcome: AttackOutcome::HitAndSunk(1),
            ship: Some("Escort"),
            footprint: Some(vec![Coord::new(0, 2)]),
        }
    );
    assert_eq!(events[3], GameEvent::TurnChanged { active: Side::Human });
}

#[test]
fn test_out_of_turn_is_rejected() {
    let config = config();
    let mut m = new_match(&config);
    assert_eq!(
        m.submit_attack(Side::Computer, Coord::new(0, 0)),
        Err(EngineError::NotYourTurn(Side::Computer))
    );
    assert!(m.board(Side::Human).attacked().is_empty());
    assert!(m.drain_events().is_empty());
}

#[test]
fn test_repeat_keeps_the_turn() {
    let config = config();
    let mut m = new_match(&config);
    m.submit_attack(Side::Human, Coord::new(5, 5)).unwrap();
    m.submit_attack(Side::Computer, Coord::new(5, 5)).unwrap();
    assert_eq!(
        m.submit_attack(Side::Human, Coord::new(5, 5)).unwrap(),
        AttackOutcome::AlreadyAttacked
    );
    assert_eq!(m.turn(), TurnState::HumanTurn);
}

#[test]
fn test_fleet_destroyed_ends_match() {
    let config = config();
    let mut m = new_match(&config);
    let shots = [Coord::new(0, 0), Coord::new(0, 2), Coord::new(0, 4)];
    for (i, shot) in shots.iter().enumerate() {
        m.submit_attack(Side::Human, *shot).unwrap();
        if i < shots.len() - 1 {
            m.submit_attack(Side::Computer, Coord::new(19, i)).unwrap();
        }
    }
    assert!(m.is_over());
    assert_eq!(m.winner(), Some(Winner::Human));
    assert_eq!(m.end_reason(), Some(EndReason::FleetDestroyed));
    assert_eq!(m.scores().human, 220);

    let last = m.drain_events().pop().unwrap();
    assert_eq!(
        last,
        GameEvent::GameEnded {
            winner: Winner::Human,
            scores: Scores { human: 220, computer: 0 },
            reason: EndReason::FleetDestroyed,
        }
    );
    assert_eq!(m.submit_attack(Side::Computer, Coord::new(1, 1)), Err(EngineError::GameOver));
    assert_eq!(m.submit_attack(Side::Human, Coord::new(1, 1)), Err(EngineError::GameOver));
}

#[test]
fn test_timeout_goes_to_higher_score() {
    let config = config();
    let mut m = new_match(&config);
    m.submit_attack(Side::Human, Coord::new(0, 0)).unwrap();
    m.submit_attack(Side::Computer, Coord::new(0, 2)).unwrap();
    assert_eq!(m.scores(), Scores { human: 120, computer: 90 });

    assert!(!m.tick(59));
    assert_eq!(m.remaining_secs(), 1);
    assert!(m.tick(1));
    assert_eq!(m.winner(), Some(Winner::Human));
    assert_eq!(m.end_reason(), Some(EndReason::TimeExpired));
    assert!(!m.tick(1));
    assert!(!m.expire());

    let ended = m
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, GameEvent::GameEnded { .. }))
        .count();
    assert_eq!(ended, 1);
}

#[test]
fn test_timeout_with_equal_scores_is_a_draw() {
    let config = config();
    let mut m = new_match(&config);
    m.submit_attack(Side::Human, Coord::new(0, 0)).unwrap();
    m.submit_attack(Side::Computer, Coord::new(0, 0)).unwrap();
    assert!(m.expire());
    assert_eq!(m.winner(), Some(Winner::Draw));

    let config = config.with_first_turn(Side::Computer);
    let mut m = new_match(&config);
    assert_eq!(m.turn(), TurnState::ComputerTurn);
    assert!(m.expire());
    assert_eq!(m.winner(), Some(Winner::Draw));
}

#[test]
fn test_score_recorded_once() {
    let config = config();
    let mut m = new_match(&config);
    assert!(!m.mark_score_recorded());
    m.expire();
    assert!(m.mark_score_recorded());
    assert!(!m.mark_score_recorded());
}

#[test]
fn test_new_places_both_fleets() {
    let mut rng = SmallRng::seed_from_u64(7);
    let mut m = Match::new(3, &GameConfig::navy_war(), &mut rng).unwrap();
    assert_eq!(m.id(), 3);
    assert_eq!(m.remaining_secs(), 60);
    for side in [Side::Human, Side::Computer] {
        assert_eq!(m.board(side).fleet().len(), 5);
        assert_eq!(m.board(side).ship_map().count_ones(), 28);
    }
    assert_eq!(m.drain_events(), vec![GameEvent::TurnChanged { active: Side::Human }]);

    let bad = GameConfig::navy_war().with_time_limit(0);
    assert!(matches!(
        Match::new(4, &bad, &mut rng),
        Err(EngineError::InvalidConfig(_))
    ));
}
