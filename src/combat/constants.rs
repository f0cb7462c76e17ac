//! Combat Constants
//!
//! Centralized location for the numbers that define how a bout plays.
//! Distances are in arena units (one unit = one pixel of the 1000x560 arena),
//! per-frame values assume the fixed 60 Hz step, durations are in seconds.

// ============================================================================
// Arena
// ============================================================================

/// Arena width in units.
pub const ARENA_WIDTH: f32 = 1000.0;

/// Arena height in units.
pub const ARENA_HEIGHT: f32 = 560.0;

/// Y coordinate of the floor. A fighter's feet rest here.
pub const GROUND_Y: f32 = ARENA_HEIGHT - 100.0;

/// Gap kept between a fighter and either arena wall.
pub const ARENA_MARGIN: f32 = 10.0;

/// Fixed simulation rate. Per-frame constants below are tuned for it.
pub const FRAMES_PER_SECOND: f64 = 60.0;

// ============================================================================
// Fighter Body & Movement
// ============================================================================

pub const FIGHTER_WIDTH: f32 = 64.0;
pub const FIGHTER_HEIGHT: f32 = 96.0;

/// Horizontal walk speed per frame.
pub const WALK_SPEED: f32 = 4.2;

/// Vertical velocity applied on jump (negative is up).
pub const JUMP_IMPULSE: f32 = -13.0;

/// Added to vertical velocity every frame.
pub const GRAVITY: f32 = 0.8;

// ============================================================================
// Vitals & Regeneration
// ============================================================================

pub const DEFAULT_MAX_HEALTH: i32 = 220;
pub const BOSS_MAX_HEALTH: i32 = 320;
pub const MAX_ENERGY: i32 = 100;

/// Seconds between passive regeneration ticks.
pub const REGEN_INTERVAL: f64 = 1.0;
pub const ENERGY_REGEN_PER_TICK: i32 = 5;
/// Only applied while below max health.
pub const HEALTH_REGEN_PER_TICK: i32 = 2;

// ============================================================================
// Actions
// ============================================================================

/// Normal attack hitbox: (range, height, vertical offset from the fighter's top)
pub const NORMAL_ATTACK_RANGE: f32 = 56.0;
pub const NORMAL_ATTACK_HEIGHT: f32 = 28.0;
pub const NORMAL_ATTACK_OFFSET_Y: f32 = 30.0;
pub const NORMAL_ATTACK_DAMAGE: (i32, i32) = (10, 20);

pub const SPECIAL_ATTACK_RANGE: f32 = 140.0;
pub const SPECIAL_ATTACK_HEIGHT: f32 = 36.0;
pub const SPECIAL_ATTACK_OFFSET_Y: f32 = 20.0;
pub const SPECIAL_ATTACK_DAMAGE: (i32, i32) = (28, 48);
pub const SPECIAL_ATTACK_COST: i32 = 28;
pub const SPECIAL_ATTACK_COOLDOWN: f64 = 4.5;

pub const HEAL_AMOUNT: (i32, i32) = (18, 34);
pub const HEAL_COST: i32 = 22;
pub const HEAL_COOLDOWN: f64 = 9.0;

/// How long a guard stays up after `defend()`.
pub const DEFEND_DURATION: f64 = 1.2;

// ============================================================================
// CPU Opponent
// ============================================================================

/// Minimum seconds between two policy decisions.
pub const AI_DECISION_INTERVAL: f64 = 0.8;

/// Below this fraction of max health the CPU considers healing.
pub const AI_HEAL_HEALTH_FRACTION: f32 = 0.35;
pub const AI_HEAL_CHANCE: f32 = 0.45;

/// Beyond this distance the CPU considers a special attack.
pub const AI_SPECIAL_MIN_DISTANCE: f32 = 100.0;
pub const AI_SPECIAL_CHANCE: f32 = 0.5;

/// Inside this distance the CPU trades blows.
pub const AI_CLOSE_DISTANCE: f32 = 80.0;

/// Approach stops when centers are this close.
pub const AI_APPROACH_DEAD_ZONE: f32 = 40.0;
pub const AI_APPROACH_SPEED_FACTOR: f32 = 0.95;

/// Per-frame chance of an unthrottled jab, and the follow-up roll.
pub const AI_OPPORTUNISTIC_CHANCE: f32 = 0.01;
pub const AI_OPPORTUNISTIC_DISTANCE: f32 = 90.0;
pub const AI_OPPORTUNISTIC_FOLLOW_THROUGH: f32 = 0.6;

// ============================================================================
// Spawn Positions
// ============================================================================

pub const BLUE_SPAWN_X: f32 = 140.0;
/// Red corner spawns this far from the right edge (Boss a bit further).
pub const RED_SPAWN_INSET: f32 = 200.0;
pub const BOSS_SPAWN_INSET: f32 = 220.0;
