//! Integration tests for the match loop
//!
//! These tests verify that:
//! - Simultaneous knockouts resolve on pre-clamp health
//! - The combat log records what happened in a bout
//! - CPU-driven bouts keep fighters inside the arena and vitals in range

use duelist::combat::constants::{ARENA_MARGIN, ARENA_WIDTH, FRAMES_PER_SECOND, GROUND_Y};
use duelist::combat::rng::{GameRng, ScriptedRng};
use duelist::{Bout, CombatLogEventType, Corner, FrameInput, GameMode, MatchConfig, MatchPhase};

const DT: f64 = 1.0 / FRAMES_PER_SECOND;

/// Two humans standing toe to toe, both about to jab.
fn trading_jabs(blue_health: i32, red_health: i32) -> (Bout, FrameInput) {
    let mut bout = Bout::new(MatchConfig::for_mode(GameMode::TwoPlayer));
    bout.fighter_mut(Corner::Blue).x = 300.0;
    bout.fighter_mut(Corner::Red).x = 380.0;
    bout.fighter_mut(Corner::Blue).health = blue_health;
    bout.fighter_mut(Corner::Red).health = red_health;

    let mut input = FrameInput::default();
    input.for_corner_mut(Corner::Blue).attack = true;
    input.for_corner_mut(Corner::Red).attack = true;
    (bout, input)
}

#[test]
fn test_double_knockout_goes_to_higher_pre_clamp_health() {
    // Blue ends at -5, red at -2
    let (mut bout, input) = trading_jabs(5, 8);
    let mut rng = ScriptedRng::with_rolls([10, 10]);

    bout.step(&input, DT, &mut rng);

    assert_eq!(bout.fighter(Corner::Blue).health, 0);
    assert_eq!(bout.fighter(Corner::Red).health, 0);
    assert_eq!(bout.fighter(Corner::Blue).pre_clamp_health(), -5);
    assert_eq!(bout.fighter(Corner::Red).pre_clamp_health(), -2);
    assert_eq!(bout.phase(), MatchPhase::GameOver { winner: Some(Corner::Red) });
    assert_eq!(bout.log().filter_by_type(CombatLogEventType::Knockout).len(), 2);
}

#[test]
fn test_double_knockout_with_equal_overkill_is_a_draw() {
    let (mut bout, input) = trading_jabs(8, 8);
    let mut rng = ScriptedRng::with_rolls([10, 10]);

    bout.step(&input, DT, &mut rng);

    assert_eq!(bout.phase(), MatchPhase::GameOver { winner: None });
    assert_eq!(bout.winner(), None);
    let last = bout.log().entries.last().map(|e| e.message.clone());
    assert_eq!(last.as_deref(), Some("Draw!"));
}

#[test]
fn test_fighter_floored_mid_frame_cannot_heal_back_up() {
    let (mut bout, mut input) = trading_jabs(100, 5);
    input.for_corner_mut(Corner::Red).attack = false;
    input.for_corner_mut(Corner::Red).heal = true;
    let mut rng = ScriptedRng::with_rolls([12, 20]);

    bout.step(&input, DT, &mut rng);

    let red = bout.fighter(Corner::Red);
    assert_eq!(red.health, 0);
    assert_eq!(red.stats.healing_done, 0);
    assert_eq!(bout.phase(), MatchPhase::GameOver { winner: Some(Corner::Blue) });
    assert!(bout.log().filter_by_type(CombatLogEventType::Healing).is_empty());
}

#[test]
fn test_bout_log_records_hits_and_result() {
    let (mut bout, input) = trading_jabs(100, 10);
    let mut rng = ScriptedRng::with_rolls([12, 14]);

    bout.step(&input, DT, &mut rng);

    let damage = bout.log().filter_by_type(CombatLogEventType::Damage);
    assert_eq!(damage.len(), 2);
    assert!(damage[0].message.starts_with("Hero hits"));
    assert_eq!(bout.fighter(Corner::Blue).health, 86);
    assert_eq!(bout.winner(), Some(Corner::Blue));

    let metadata = bout.metadata(None);
    assert_eq!(metadata.winner.as_deref(), Some("Hero"));
    assert_eq!(metadata.fighters.len(), 2);
    assert_eq!(metadata.fighters[0].damage_dealt, 12, "overkill still counts as dealt");
}

#[test]
fn test_cpu_bout_respects_arena_and_vitals() {
    let config = MatchConfig::for_mode(GameMode::CpuVsCpu);
    let mut bout = Bout::new(config);
    let mut rng = GameRng::from_seed(7);
    let idle = FrameInput::default();

    for _ in 0..(60.0 * FRAMES_PER_SECOND) as usize {
        bout.step(&idle, DT, &mut rng);
        for fighter in bout.fighters() {
            assert!(fighter.x >= ARENA_MARGIN);
            assert!(fighter.x + fighter.width <= ARENA_WIDTH - ARENA_MARGIN);
            assert!(fighter.y + fighter.height <= GROUND_Y);
            assert!((0..=fighter.max_health).contains(&fighter.health));
            assert!((0..=fighter.max_energy).contains(&fighter.energy));
        }
        if bout.is_over() {
            break;
        }
    }
}

#[test]
fn test_same_seed_same_bout() {
    let run = |seed| {
        let mut bout = Bout::new(MatchConfig::for_mode(GameMode::CpuVsCpu));
        let mut rng = GameRng::from_seed(seed);
        for _ in 0..1200 {
            bout.step(&FrameInput::default(), DT, &mut rng);
        }
        bout.fighters().clone()
    };

    let first = run(99);
    let second = run(99);
    for corner in Corner::all() {
        let (a, b) = (&first[corner.index()], &second[corner.index()]);
        assert_eq!(a.health, b.health);
        assert_eq!(a.energy, b.energy);
        assert_eq!(a.x, b.x);
    }
}
