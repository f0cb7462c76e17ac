//! CPU opponent decision policy
//!
//! The CPU makes one throttled decision every [`AI_DECISION_INTERVAL`]
//! seconds, evaluated in priority order:
//!
//! 1. Low on health with enough energy → maybe heal
//! 2. Far from the opponent with enough energy → maybe fire a special
//! 3. Close to the opponent → attack (twice as likely) or defend
//! 4. Otherwise → approach
//!
//! Separately, [`wants_opportunistic_attack`] gives the CPU a small,
//! unthrottled chance each frame to jab when already in close range.

use super::clock::Clock;
use super::constants::*;
use super::fighter::Fighter;
use super::rng::RandomSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiAction {
    Heal,
    Special,
    Attack,
    Defend,
    Approach,
}

/// Close-range choices; attack is listed twice to double its weight.
const CLOSE_RANGE_CHOICES: [AiAction; 3] = [AiAction::Attack, AiAction::Attack, AiAction::Defend];

#[derive(Debug, Clone)]
pub struct SimpleAi {
    last_decision: f64,
}

impl SimpleAi {
    /// The first decision comes one interval after `now`.
    pub fn new(now: f64) -> Self {
        Self { last_decision: now }
    }

    pub fn decide(
        &mut self,
        me: &Fighter,
        opponent: &Fighter,
        clock: &dyn Clock,
        rng: &mut dyn RandomSource,
    ) -> Option<AiAction> {
        let now = clock.now();
        if now - self.last_decision < AI_DECISION_INTERVAL {
            return None;
        }
        self.last_decision = now;

        let distance = me.distance_to(opponent);
        let low_health = (me.health as f32) < me.max_health as f32 * AI_HEAL_HEALTH_FRACTION;

        if low_health && me.energy >= HEAL_COST && rng.chance(AI_HEAL_CHANCE) {
            return Some(AiAction::Heal);
        }
        if distance > AI_SPECIAL_MIN_DISTANCE
            && me.energy >= SPECIAL_ATTACK_COST
            && rng.chance(AI_SPECIAL_CHANCE)
        {
            return Some(AiAction::Special);
        }
        if distance < AI_CLOSE_DISTANCE {
            return Some(CLOSE_RANGE_CHOICES[rng.pick_index(CLOSE_RANGE_CHOICES.len())]);
        }
        Some(AiAction::Approach)
    }
}

/// Horizontal step that brings `me` toward `opponent`, or 0 inside the dead zone.
pub fn approach_step(me: &Fighter, opponent: &Fighter) -> f32 {
    let step = me.speed * AI_APPROACH_SPEED_FACTOR;
    if me.center_x() > opponent.center_x() + AI_APPROACH_DEAD_ZONE {
        -step
    } else if me.center_x() < opponent.center_x() - AI_APPROACH_DEAD_ZONE {
        step
    } else {
        0.0
    }
}

/// Unthrottled per-frame jab roll, independent of the decision interval.
pub fn wants_opportunistic_attack(
    me: &Fighter,
    opponent: &Fighter,
    rng: &mut dyn RandomSource,
) -> bool {
    rng.chance(AI_OPPORTUNISTIC_CHANCE)
        && me.distance_to(opponent) < AI_OPPORTUNISTIC_DISTANCE
        && rng.chance(AI_OPPORTUNISTIC_FOLLOW_THROUGH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::clock::FrameClock;
    use crate::combat::fighter::Corner;
    use crate::combat::rng::ScriptedRng;
    use crate::states::match_config::FighterProfile;

    fn pair(gap: f32) -> (Fighter, Fighter) {
        let me = Fighter::new(FighterProfile::Boss, Corner::Red, 500.0, 0.0);
        let opponent = Fighter::new(FighterProfile::Hero, Corner::Blue, 500.0 - gap, 0.0);
        (me, opponent)
    }

    fn ready_clock() -> FrameClock {
        FrameClock::starting_at(AI_DECISION_INTERVAL)
    }

    #[test]
    fn test_decision_is_throttled() {
        let (me, opponent) = pair(300.0);
        let mut ai = SimpleAi::new(0.0);
        let mut rng = ScriptedRng::new();

        assert_eq!(ai.decide(&me, &opponent, &FrameClock::starting_at(0.5), &mut rng), None);

        let clock = ready_clock();
        assert!(ai.decide(&me, &opponent, &clock, &mut rng).is_some());
        assert_eq!(ai.decide(&me, &opponent, &clock, &mut rng), None, "stamped on decision");
    }

    #[test]
    fn test_low_health_heals_when_coin_succeeds() {
        let (mut me, opponent) = pair(300.0);
        me.health = 50;
        let mut ai = SimpleAi::new(0.0);
        let mut rng = ScriptedRng::new();
        rng.push_float(0.2);

        assert_eq!(ai.decide(&me, &opponent, &ready_clock(), &mut rng), Some(AiAction::Heal));
    }

    #[test]
    fn test_failed_heal_coin_falls_through_to_special() {
        let (mut me, opponent) = pair(300.0);
        me.health = 50;
        let mut ai = SimpleAi::new(0.0);
        let mut rng = ScriptedRng::new();
        rng.push_float(0.9).push_float(0.1);

        assert_eq!(ai.decide(&me, &opponent, &ready_clock(), &mut rng), Some(AiAction::Special));
        assert_eq!(rng.remaining(), (0, 0));
    }

    #[test]
    fn test_no_energy_means_approach_at_range() {
        let (mut me, opponent) = pair(300.0);
        me.energy = 0;
        let mut ai = SimpleAi::new(0.0);
        let mut rng = ScriptedRng::new();
        rng.push_float(0.0);

        assert_eq!(ai.decide(&me, &opponent, &ready_clock(), &mut rng), Some(AiAction::Approach));
        assert_eq!(rng.remaining(), (0, 1), "no coin drawn without energy");
    }

    #[test]
    fn test_close_range_picks_attack_or_defend() {
        let (me, opponent) = pair(50.0);
        let mut rng = ScriptedRng::new();
        rng.push_float(0.1).push_float(0.9);

        let mut ai = SimpleAi::new(0.0);
        assert_eq!(ai.decide(&me, &opponent, &ready_clock(), &mut rng), Some(AiAction::Attack));

        let mut ai = SimpleAi::new(0.0);
        assert_eq!(ai.decide(&me, &opponent, &ready_clock(), &mut rng), Some(AiAction::Defend));
    }

    #[test]
    fn test_approach_step_direction_and_dead_zone() {
        let (me, opponent) = pair(300.0);
        assert!(approach_step(&me, &opponent) < 0.0, "opponent is to the left");
        assert!(approach_step(&opponent, &me) > 0.0);

        let (me, opponent) = pair(30.0);
        assert_eq!(approach_step(&me, &opponent), 0.0);
    }

    #[test]
    fn test_opportunistic_attack_requires_range() {
        let (me, opponent) = pair(50.0);
        let mut rng = ScriptedRng::new();
        rng.push_float(0.0).push_float(0.5);
        assert!(wants_opportunistic_attack(&me, &opponent, &mut rng));

        let (me, opponent) = pair(200.0);
        let mut rng = ScriptedRng::new();
        rng.push_float(0.0).push_float(0.0);
        assert!(!wants_opportunistic_attack(&me, &opponent, &mut rng));

        let (me, opponent) = pair(50.0);
        let mut rng = ScriptedRng::new();
        rng.push_float(0.5);
        assert!(!wants_opportunistic_attack(&me, &opponent, &mut rng));
    }
}
