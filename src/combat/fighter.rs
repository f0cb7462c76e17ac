//! Fighter entity and its per-frame rules
//!
//! A [`Fighter`] owns its position, vitals, guard and cooldown state. Actions
//! resolve instantly within the frame they are issued: there is no queue and
//! no interrupt, so cooldowns and energy costs are the only scarcity.
//!
//! Time-gated actions read the match [`Clock`]; every random draw goes through
//! the supplied [`RandomSource`].

use serde::Serialize;

use super::clock::Clock;
use super::constants::*;
use super::hitbox::Hitbox;
use super::rng::RandomSource;
use crate::states::match_config::FighterProfile;

/// Which side of the bout a fighter belongs to. Blue is player one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, serde::Deserialize)]
pub enum Corner {
    Blue,
    Red,
}

impl Corner {
    pub fn index(&self) -> usize {
        match self {
            Corner::Blue => 0,
            Corner::Red => 1,
        }
    }

    pub fn all() -> [Corner; 2] {
        [Corner::Blue, Corner::Red]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Corner::Blue => "Player 1",
            Corner::Red => "Player 2",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    /// +1.0 facing right, -1.0 facing left.
    pub fn sign(&self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

/// Result of a gated action.
///
/// `Unavailable` means a gate (cooldown, energy, knockout) failed and nothing
/// changed. It is a normal outcome, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Applied(i32),
    Unavailable,
}

impl ActionOutcome {
    pub fn is_available(&self) -> bool {
        matches!(self, ActionOutcome::Applied(_))
    }
}

/// Running totals for the results overlay and headless reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FighterStats {
    pub damage_dealt: i32,
    pub damage_taken: i32,
    pub healing_done: i32,
    pub specials_used: u32,
}

#[derive(Debug, Clone)]
pub struct Fighter {
    pub name: String,
    pub profile: FighterProfile,
    pub corner: Corner,

    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub facing: Facing,
    pub vel_y: f32,
    pub on_ground: bool,
    pub speed: f32,

    pub health: i32,
    pub max_health: i32,
    pub energy: i32,
    pub max_energy: i32,

    pub is_defending: bool,
    defend_started: f64,

    /// Area of the attack issued this frame, if any. Cleared every frame.
    pub attack_hitbox: Option<Hitbox>,

    special_last: Option<f64>,
    heal_last: Option<f64>,
    last_regen: f64,

    /// Damage that landed past zero health. Only used to break ties when both
    /// fighters go down in the same frame.
    overkill: i32,

    pub stats: FighterStats,
}

impl Fighter {
    /// A fresh fighter standing on the ground at `x`, full health and energy.
    pub fn new(profile: FighterProfile, corner: Corner, x: f32, now: f64) -> Self {
        let max_health = profile.max_health();
        let mut fighter = Self {
            name: profile.name().to_string(),
            profile,
            corner,
            x,
            y: GROUND_Y - FIGHTER_HEIGHT,
            width: FIGHTER_WIDTH,
            height: FIGHTER_HEIGHT,
            facing: match corner {
                Corner::Blue => Facing::Right,
                Corner::Red => Facing::Left,
            },
            vel_y: 0.0,
            on_ground: true,
            speed: WALK_SPEED,
            health: max_health,
            max_health,
            energy: MAX_ENERGY,
            max_energy: MAX_ENERGY,
            is_defending: false,
            defend_started: now,
            attack_hitbox: None,
            special_last: None,
            heal_last: None,
            last_regen: now,
            overkill: 0,
            stats: FighterStats::default(),
        };
        fighter.x = fighter.clamp_x(x);
        fighter
    }

    pub fn bounds(&self) -> Hitbox {
        Hitbox::new(self.x, self.y, self.width, self.height)
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn distance_to(&self, other: &Fighter) -> f32 {
        (self.center_x() - other.center_x()).abs()
    }

    pub fn is_knocked_out(&self) -> bool {
        self.health <= 0
    }

    /// Health as if damage were not floored at zero.
    pub fn pre_clamp_health(&self) -> i32 {
        self.health - self.overkill
    }

    pub fn health_fraction(&self) -> f32 {
        if self.max_health > 0 {
            self.health as f32 / self.max_health as f32
        } else {
            0.0
        }
    }

    pub fn energy_fraction(&self) -> f32 {
        if self.max_energy > 0 {
            self.energy as f32 / self.max_energy as f32
        } else {
            0.0
        }
    }

    /// Seconds until the special attack is off cooldown (0 when ready).
    pub fn special_cooldown_remaining(&self, clock: &dyn Clock) -> f64 {
        cooldown_remaining(self.special_last, SPECIAL_ATTACK_COOLDOWN, clock.now())
    }

    pub fn heal_cooldown_remaining(&self, clock: &dyn Clock) -> f64 {
        cooldown_remaining(self.heal_last, HEAL_COOLDOWN, clock.now())
    }

    pub fn can_special(&self, clock: &dyn Clock) -> bool {
        self.special_cooldown_remaining(clock) <= 0.0 && self.energy >= SPECIAL_ATTACK_COST
    }

    /// A knocked-out fighter cannot heal back off the floor.
    pub fn can_heal(&self, clock: &dyn Clock) -> bool {
        !self.is_knocked_out()
            && self.heal_cooldown_remaining(clock) <= 0.0
            && self.energy >= HEAL_COST
    }

    fn clamp_x(&self, x: f32) -> f32 {
        x.clamp(ARENA_MARGIN, ARENA_WIDTH - ARENA_MARGIN - self.width)
    }

    // ------------------------------------------------------------------------
    // Movement
    // ------------------------------------------------------------------------

    pub fn move_by(&mut self, delta_x: f32) {
        self.x = self.clamp_x(self.x + delta_x);
        if delta_x > 0.0 {
            self.facing = Facing::Right;
        } else if delta_x < 0.0 {
            self.facing = Facing::Left;
        }
    }

    pub fn jump(&mut self) {
        if self.on_ground {
            self.vel_y = JUMP_IMPULSE;
            self.on_ground = false;
        }
    }

    pub fn apply_gravity(&mut self) {
        self.vel_y += GRAVITY;
        self.y += self.vel_y;
        if self.y + self.height >= GROUND_Y {
            self.y = GROUND_Y - self.height;
            self.vel_y = 0.0;
            self.on_ground = true;
        }
    }

    // ------------------------------------------------------------------------
    // Actions
    // ------------------------------------------------------------------------

    /// Short jab in front of the fighter. Returns the damage applied (0 on miss).
    pub fn normal_attack(&mut self, target: &mut Fighter, rng: &mut dyn RandomSource) -> i32 {
        let (min, max) = NORMAL_ATTACK_DAMAGE;
        let damage = rng.roll(min, max);
        let hitbox = self.hitbox_in_front(
            NORMAL_ATTACK_RANGE,
            NORMAL_ATTACK_HEIGHT,
            NORMAL_ATTACK_OFFSET_Y,
        );
        self.resolve_strike(hitbox, damage, target)
    }

    /// Long-range strike gated by cooldown and energy.
    pub fn special_attack(
        &mut self,
        target: &mut Fighter,
        clock: &dyn Clock,
        rng: &mut dyn RandomSource,
    ) -> ActionOutcome {
        if !self.can_special(clock) {
            return ActionOutcome::Unavailable;
        }
        self.energy -= SPECIAL_ATTACK_COST;
        self.special_last = Some(clock.now());
        self.stats.specials_used += 1;

        let (min, max) = SPECIAL_ATTACK_DAMAGE;
        let damage = rng.roll(min, max);
        let hitbox = self.hitbox_in_front(
            SPECIAL_ATTACK_RANGE,
            SPECIAL_ATTACK_HEIGHT,
            SPECIAL_ATTACK_OFFSET_Y,
        );
        ActionOutcome::Applied(self.resolve_strike(hitbox, damage, target))
    }

    pub fn defend(&mut self, clock: &dyn Clock) {
        self.is_defending = true;
        self.defend_started = clock.now();
    }

    /// Restore health, gated like the special. Reports the health actually gained.
    pub fn heal(&mut self, clock: &dyn Clock, rng: &mut dyn RandomSource) -> ActionOutcome {
        if !self.can_heal(clock) {
            return ActionOutcome::Unavailable;
        }
        self.energy -= HEAL_COST;
        self.heal_last = Some(clock.now());

        let (min, max) = HEAL_AMOUNT;
        let before = self.health;
        self.health = (self.health + rng.roll(min, max)).min(self.max_health);
        let gained = self.health - before;
        self.stats.healing_done += gained;
        ActionOutcome::Applied(gained)
    }

    /// Once-per-frame upkeep: guard expiry and passive regeneration.
    pub fn update(&mut self, clock: &dyn Clock) {
        let now = clock.now();
        if self.is_defending && now - self.defend_started > DEFEND_DURATION {
            self.is_defending = false;
        }

        if now - self.last_regen > REGEN_INTERVAL {
            self.last_regen = now;
            self.energy = (self.energy + ENERGY_REGEN_PER_TICK).min(self.max_energy);
            if self.health > 0 && self.health < self.max_health {
                self.health = (self.health + HEALTH_REGEN_PER_TICK).min(self.max_health);
            }
        }
    }

    fn hitbox_in_front(&self, range: f32, height: f32, offset_y: f32) -> Hitbox {
        let x = match self.facing {
            Facing::Right => self.x + self.width,
            Facing::Left => self.x - range,
        };
        Hitbox::new(x, self.y + offset_y, range, height)
    }

    fn resolve_strike(&mut self, hitbox: Hitbox, damage: i32, target: &mut Fighter) -> i32 {
        self.attack_hitbox = Some(hitbox);
        if !hitbox.overlaps(&target.bounds()) {
            return 0;
        }
        let applied = target.take_damage(damage);
        self.stats.damage_dealt += applied;
        applied
    }

    /// Apply an incoming hit, halved (integer division) while guarding.
    fn take_damage(&mut self, damage: i32) -> i32 {
        let applied = if self.is_defending { damage / 2 } else { damage };
        let remaining = self.health - applied;
        if remaining < 0 {
            self.overkill += -remaining;
        }
        self.health = remaining.max(0);
        self.stats.damage_taken += applied;
        applied
    }
}

fn cooldown_remaining(last_used: Option<f64>, cooldown: f64, now: f64) -> f64 {
    match last_used {
        Some(last) => (cooldown - (now - last)).max(0.0),
        None => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::clock::FrameClock;
    use crate::combat::rng::ScriptedRng;

    fn fighter_at(corner: Corner, x: f32) -> Fighter {
        Fighter::new(FighterProfile::Hero, corner, x, 0.0)
    }

    /// Blue at 100 facing right, red directly in jab range.
    fn face_off() -> (Fighter, Fighter) {
        let blue = fighter_at(Corner::Blue, 100.0);
        let red = fighter_at(Corner::Red, 100.0 + FIGHTER_WIDTH + 20.0);
        (blue, red)
    }

    #[test]
    fn test_new_fighter_starts_grounded_and_full() {
        let fighter = fighter_at(Corner::Blue, 140.0);
        assert!(fighter.on_ground);
        assert_eq!(fighter.y + fighter.height, GROUND_Y);
        assert_eq!(fighter.health, fighter.max_health);
        assert_eq!(fighter.energy, MAX_ENERGY);
        assert_eq!(fighter.facing, Facing::Right);
        assert_eq!(fighter_at(Corner::Red, 800.0).facing, Facing::Left);
    }

    #[test]
    fn test_move_updates_facing_only_on_nonzero_delta() {
        let mut fighter = fighter_at(Corner::Blue, 300.0);
        fighter.move_by(-5.0);
        assert_eq!(fighter.facing, Facing::Left);
        fighter.move_by(0.0);
        assert_eq!(fighter.facing, Facing::Left);
        fighter.move_by(5.0);
        assert_eq!(fighter.facing, Facing::Right);
    }

    #[test]
    fn test_move_clamps_to_arena() {
        let mut fighter = fighter_at(Corner::Blue, 300.0);
        fighter.move_by(-10_000.0);
        assert_eq!(fighter.x, ARENA_MARGIN);
        fighter.move_by(10_000.0);
        assert_eq!(fighter.x, ARENA_WIDTH - ARENA_MARGIN - fighter.width);
    }

    #[test]
    fn test_jump_and_land() {
        let mut fighter = fighter_at(Corner::Blue, 300.0);
        fighter.jump();
        assert!(!fighter.on_ground);
        assert_eq!(fighter.vel_y, JUMP_IMPULSE);

        // A second jump mid-air does nothing
        fighter.apply_gravity();
        let vel_after_first_frame = fighter.vel_y;
        fighter.jump();
        assert_eq!(fighter.vel_y, vel_after_first_frame);

        for _ in 0..120 {
            fighter.apply_gravity();
        }
        assert!(fighter.on_ground);
        assert_eq!(fighter.vel_y, 0.0);
        assert_eq!(fighter.y, GROUND_Y - fighter.height);
    }

    #[test]
    fn test_normal_attack_hit_applies_full_roll() {
        let (mut blue, mut red) = face_off();
        let mut rng = ScriptedRng::with_rolls([17]);

        let applied = blue.normal_attack(&mut red, &mut rng);

        assert_eq!(applied, 17);
        assert_eq!(red.health, red.max_health - 17);
        assert_eq!(blue.stats.damage_dealt, 17);
        assert_eq!(red.stats.damage_taken, 17);
    }

    #[test]
    fn test_normal_attack_against_guard_is_halved() {
        let (mut blue, mut red) = face_off();
        let clock = FrameClock::new();
        red.defend(&clock);
        let mut rng = ScriptedRng::with_rolls([15]);

        let applied = blue.normal_attack(&mut red, &mut rng);

        assert_eq!(applied, 7, "15 / 2 rounds down");
        assert_eq!(red.health, red.max_health - 7);
    }

    #[test]
    fn test_normal_attack_miss_keeps_hitbox() {
        let mut blue = fighter_at(Corner::Blue, 100.0);
        let mut red = fighter_at(Corner::Red, 700.0);
        let mut rng = ScriptedRng::with_rolls([20]);

        let applied = blue.normal_attack(&mut red, &mut rng);

        assert_eq!(applied, 0);
        assert_eq!(red.health, red.max_health);
        let hitbox = blue.attack_hitbox.expect("hitbox is set even on a miss");
        assert_eq!(hitbox.x, blue.x + blue.width);
        assert_eq!(hitbox.width, NORMAL_ATTACK_RANGE);
    }

    #[test]
    fn test_attack_hitbox_follows_facing() {
        let mut blue = fighter_at(Corner::Blue, 400.0);
        let mut red = fighter_at(Corner::Red, 800.0);
        let mut rng = ScriptedRng::new();
        blue.move_by(-1.0);
        blue.normal_attack(&mut red, &mut rng);
        let hitbox = blue.attack_hitbox.unwrap();
        assert_eq!(hitbox.right(), blue.x);
    }

    #[test]
    fn test_special_attack_consumes_energy_and_stamps_cooldown() {
        let (mut blue, mut red) = face_off();
        let mut clock = FrameClock::new();
        let mut rng = ScriptedRng::with_rolls([40, 40]);

        let first = blue.special_attack(&mut red, &clock, &mut rng);
        assert_eq!(first, ActionOutcome::Applied(40));
        assert_eq!(blue.energy, MAX_ENERGY - SPECIAL_ATTACK_COST);

        clock.advance(1.0);
        let health_before = red.health;
        let energy_before = blue.energy;
        let second = blue.special_attack(&mut red, &clock, &mut rng);
        assert_eq!(second, ActionOutcome::Unavailable);
        assert_eq!(red.health, health_before);
        assert_eq!(blue.energy, energy_before);

        clock.advance(SPECIAL_ATTACK_COOLDOWN);
        assert!(blue.special_attack(&mut red, &clock, &mut rng).is_available());
    }

    #[test]
    fn test_special_attack_needs_energy() {
        let (mut blue, mut red) = face_off();
        let clock = FrameClock::new();
        blue.energy = SPECIAL_ATTACK_COST - 1;
        let mut rng = ScriptedRng::new();

        assert_eq!(blue.special_attack(&mut red, &clock, &mut rng), ActionOutcome::Unavailable);
        assert_eq!(blue.energy, SPECIAL_ATTACK_COST - 1);
        assert!(blue.attack_hitbox.is_none());
    }

    #[test]
    fn test_special_attack_miss_still_costs_energy() {
        let mut blue = fighter_at(Corner::Blue, 100.0);
        let mut red = fighter_at(Corner::Red, 800.0);
        let clock = FrameClock::new();
        let mut rng = ScriptedRng::new();

        let outcome = blue.special_attack(&mut red, &clock, &mut rng);
        assert_eq!(outcome, ActionOutcome::Applied(0));
        assert_eq!(blue.energy, MAX_ENERGY - SPECIAL_ATTACK_COST);
    }

    #[test]
    fn test_heal_is_capped_and_gated() {
        let mut fighter = fighter_at(Corner::Blue, 300.0);
        let mut clock = FrameClock::new();
        fighter.health = fighter.max_health - 10;
        let mut rng = ScriptedRng::with_rolls([30, 30]);

        assert_eq!(fighter.heal(&clock, &mut rng), ActionOutcome::Applied(10));
        assert_eq!(fighter.health, fighter.max_health);
        assert_eq!(fighter.energy, MAX_ENERGY - HEAL_COST);

        clock.advance(HEAL_COOLDOWN - 0.5);
        assert_eq!(fighter.heal(&clock, &mut rng), ActionOutcome::Unavailable);
    }

    #[test]
    fn test_knocked_out_fighter_cannot_heal() {
        let mut fighter = fighter_at(Corner::Blue, 300.0);
        let clock = FrameClock::new();
        fighter.health = 0;
        let mut rng = ScriptedRng::with_rolls([30]);

        assert!(!fighter.can_heal(&clock));
        assert_eq!(fighter.heal(&clock, &mut rng), ActionOutcome::Unavailable);
        assert_eq!(fighter.health, 0);
        assert_eq!(fighter.energy, MAX_ENERGY);
    }

    #[test]
    fn test_heal_without_energy_is_unavailable() {
        let mut fighter = fighter_at(Corner::Blue, 300.0);
        let clock = FrameClock::new();
        fighter.health = 50;
        fighter.energy = HEAL_COST - 1;
        let mut rng = ScriptedRng::with_rolls([30]);

        assert_eq!(fighter.heal(&clock, &mut rng), ActionOutcome::Unavailable);
        assert_eq!(fighter.health, 50);
        assert_eq!(fighter.energy, HEAL_COST - 1);
    }

    #[test]
    fn test_guard_expires_after_duration() {
        let mut fighter = fighter_at(Corner::Blue, 300.0);
        let mut clock = FrameClock::new();
        fighter.defend(&clock);

        clock.advance(1.0);
        fighter.update(&clock);
        assert!(fighter.is_defending);

        clock.advance(0.3);
        fighter.update(&clock);
        assert!(!fighter.is_defending);
    }

    #[test]
    fn test_regen_restores_energy_and_health() {
        let mut fighter = fighter_at(Corner::Blue, 300.0);
        let mut clock = FrameClock::new();
        fighter.energy = 50;
        fighter.health = 100;

        clock.advance(0.5);
        fighter.update(&clock);
        assert_eq!((fighter.energy, fighter.health), (50, 100), "no tick before the interval");

        clock.advance(0.6);
        fighter.update(&clock);
        assert_eq!(fighter.energy, 50 + ENERGY_REGEN_PER_TICK);
        assert_eq!(fighter.health, 100 + HEALTH_REGEN_PER_TICK);
    }

    #[test]
    fn test_regen_at_full_health_only_restores_energy() {
        let mut fighter = fighter_at(Corner::Blue, 300.0);
        let mut clock = FrameClock::new();
        fighter.energy = MAX_ENERGY - 2;

        clock.advance(1.1);
        fighter.update(&clock);
        assert_eq!(fighter.energy, MAX_ENERGY);
        assert_eq!(fighter.health, fighter.max_health);
    }

    #[test]
    fn test_knocked_out_fighter_does_not_regenerate_health() {
        let mut fighter = fighter_at(Corner::Blue, 300.0);
        let mut clock = FrameClock::new();
        fighter.health = 0;

        clock.advance(1.1);
        fighter.update(&clock);
        assert_eq!(fighter.health, 0);
    }

    #[test]
    fn test_lethal_hit_floors_health_and_tracks_overkill() {
        let (mut blue, mut red) = face_off();
        red.health = 5;
        let mut rng = ScriptedRng::with_rolls([12]);

        blue.normal_attack(&mut red, &mut rng);

        assert_eq!(red.health, 0);
        assert!(red.is_knocked_out());
        assert_eq!(red.pre_clamp_health(), -7);
    }
}
