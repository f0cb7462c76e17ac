//! Match loop
//!
//! A [`Bout`] owns both fighters, who controls them, the match clock and the
//! combat log. It is stepped once per fixed frame:
//!
//! 1. Clear last frame's attack hitboxes and advance the clock
//! 2. Apply human input or CPU decisions (blue corner first)
//! 3. Roll unthrottled opportunistic jabs for CPU fighters
//! 4. Gravity, then per-fighter upkeep (guard expiry, regeneration)
//! 5. Knockout check
//!
//! Nothing advances while paused or after the bout is over.

use bevy::prelude::*;

use super::ai::{approach_step, wants_opportunistic_attack, AiAction, SimpleAi};
use super::clock::{Clock, FrameClock};
use super::events::SoundCue;
use super::fighter::{ActionOutcome, Corner, Fighter};
use super::log::{CombatLog, CombatLogEventType, FighterMetadata, MatchMetadata};
use super::rng::RandomSource;
use crate::states::match_config::MatchConfig;

/// One player's controls for a single frame.
///
/// `left`/`right` are held states; the rest are edges (pressed this frame).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub attack: bool,
    pub special: bool,
    pub defend: bool,
    pub heal: bool,
}

impl PlayerInput {
    /// Fold a newer reading in: held states are replaced, edges accumulate
    /// until consumed.
    pub fn latch(&mut self, fresh: &PlayerInput) {
        self.left = fresh.left;
        self.right = fresh.right;
        self.jump |= fresh.jump;
        self.attack |= fresh.attack;
        self.special |= fresh.special;
        self.defend |= fresh.defend;
        self.heal |= fresh.heal;
    }

    /// Drop the edge-triggered actions, keeping held movement.
    pub fn clear_edges(&mut self) {
        *self = PlayerInput {
            left: self.left,
            right: self.right,
            ..Default::default()
        };
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub players: [PlayerInput; 2],
}

impl FrameInput {
    pub fn for_corner(&self, corner: Corner) -> &PlayerInput {
        &self.players[corner.index()]
    }

    pub fn for_corner_mut(&mut self, corner: Corner) -> &mut PlayerInput {
        &mut self.players[corner.index()]
    }

    pub fn clear_edges(&mut self) {
        for player in self.players.iter_mut() {
            player.clear_edges();
        }
    }
}

#[derive(Debug, Clone)]
pub enum Controller {
    Human,
    Cpu(SimpleAi),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPhase {
    Running,
    Paused,
    /// `winner` is `None` for a draw
    GameOver { winner: Option<Corner> },
}

/// A single instruction for a fighter, from either a player or the CPU.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Command {
    Move(f32),
    Jump,
    Attack,
    Special,
    Defend,
    Heal,
}

#[derive(Resource, Debug, Clone)]
pub struct Bout {
    config: MatchConfig,
    fighters: [Fighter; 2],
    controllers: [Controller; 2],
    phase: MatchPhase,
    clock: FrameClock,
    log: CombatLog,
    frames: u64,
}

impl Bout {
    pub fn new(config: MatchConfig) -> Self {
        let clock = FrameClock::new();
        let now = clock.now();
        let build = |corner: Corner| {
            let profile = config.profile(corner);
            Fighter::new(profile, corner, profile.spawn_x(corner), now)
        };
        let control = |corner: Corner| {
            if config.mode.is_human(corner) {
                Controller::Human
            } else {
                Controller::Cpu(SimpleAi::new(now))
            }
        };

        let fighters = [build(Corner::Blue), build(Corner::Red)];
        let mut log = CombatLog::default();
        log.log(
            now,
            CombatLogEventType::MatchEvent,
            format!(
                "{}: {} vs {}. Fight!",
                config.mode.name(),
                fighters[0].name,
                fighters[1].name
            ),
        );

        Self {
            controllers: [control(Corner::Blue), control(Corner::Red)],
            config,
            fighters,
            phase: MatchPhase::Running,
            clock,
            log,
            frames: 0,
        }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn fighter(&self, corner: Corner) -> &Fighter {
        &self.fighters[corner.index()]
    }

    /// Direct access for scripted setups (tests, tooling).
    pub fn fighter_mut(&mut self, corner: Corner) -> &mut Fighter {
        &mut self.fighters[corner.index()]
    }

    pub fn fighters(&self) -> &[Fighter; 2] {
        &self.fighters
    }

    pub fn controller(&self, corner: Corner) -> &Controller {
        &self.controllers[corner.index()]
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, MatchPhase::GameOver { .. })
    }

    pub fn winner(&self) -> Option<Corner> {
        match self.phase {
            MatchPhase::GameOver { winner } => winner,
            _ => None,
        }
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn elapsed(&self) -> f64 {
        self.clock.now()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn log(&self) -> &CombatLog {
        &self.log
    }

    /// Running ↔ Paused. Returns false when the bout is already over.
    pub fn toggle_pause(&mut self) -> bool {
        let now = self.clock.now();
        match self.phase {
            MatchPhase::Running => {
                self.phase = MatchPhase::Paused;
                self.log.log(now, CombatLogEventType::MatchEvent, "Paused".to_string());
                info!("Bout paused at {:.1}s", now);
                true
            }
            MatchPhase::Paused => {
                self.phase = MatchPhase::Running;
                self.log.log(now, CombatLogEventType::MatchEvent, "Resumed".to_string());
                info!("Bout resumed");
                true
            }
            MatchPhase::GameOver { .. } => false,
        }
    }

    /// Rematch with fresh fighters. Only allowed once the bout is over.
    pub fn restart(&mut self) -> bool {
        if !self.is_over() {
            return false;
        }
        info!("Rematch: {} vs {}", self.config.blue.name(), self.config.red.name());
        *self = Bout::new(self.config.clone());
        true
    }

    /// Advance one frame. Returns the sounds the frame produced.
    pub fn step(
        &mut self,
        input: &FrameInput,
        delta_secs: f64,
        rng: &mut dyn RandomSource,
    ) -> Vec<SoundCue> {
        let mut cues = Vec::new();
        if self.phase != MatchPhase::Running {
            return cues;
        }

        for fighter in self.fighters.iter_mut() {
            fighter.attack_hitbox = None;
        }
        self.clock.advance(delta_secs);
        self.frames += 1;

        for corner in Corner::all() {
            let commands = match &mut self.controllers[corner.index()] {
                Controller::Human => human_commands(input.for_corner(corner), &self.fighters[corner.index()]),
                Controller::Cpu(ai) => {
                    let (me, opponent) = split(&mut self.fighters, corner);
                    cpu_commands(ai.decide(me, opponent, &self.clock, rng), me, opponent)
                }
            };
            for command in commands {
                self.execute(corner, command, rng, &mut cues);
            }
        }

        for corner in Corner::all() {
            if !matches!(self.controllers[corner.index()], Controller::Cpu(_)) {
                continue;
            }
            let (me, opponent) = split(&mut self.fighters, corner);
            if wants_opportunistic_attack(me, opponent, rng) {
                self.execute(corner, Command::Attack, rng, &mut cues);
            }
        }

        for fighter in self.fighters.iter_mut() {
            fighter.apply_gravity();
        }
        for fighter in self.fighters.iter_mut() {
            fighter.update(&self.clock);
        }

        self.check_knockout();
        cues
    }

    fn execute(
        &mut self,
        corner: Corner,
        command: Command,
        rng: &mut dyn RandomSource,
        cues: &mut Vec<SoundCue>,
    ) {
        let now = self.clock.now();
        let (me, opponent) = split(&mut self.fighters, corner);
        match command {
            Command::Move(delta_x) => me.move_by(delta_x),
            Command::Jump => me.jump(),
            Command::Attack => {
                let applied = me.normal_attack(opponent, rng);
                if applied > 0 {
                    cues.push(SoundCue::NormalHit);
                    self.log.log(
                        now,
                        CombatLogEventType::Damage,
                        format!("{} hits {} for {}", me.name, opponent.name, applied),
                    );
                } else {
                    self.log.log(
                        now,
                        CombatLogEventType::Action,
                        format!("{} swings and misses", me.name),
                    );
                }
            }
            Command::Special => match me.special_attack(opponent, &self.clock, rng) {
                ActionOutcome::Applied(applied) if applied > 0 => {
                    cues.push(SoundCue::SpecialHit);
                    self.log.log(
                        now,
                        CombatLogEventType::Damage,
                        format!("{}'s special hits {} for {}", me.name, opponent.name, applied),
                    );
                }
                ActionOutcome::Applied(_) => {
                    self.log.log(
                        now,
                        CombatLogEventType::Action,
                        format!("{}'s special misses", me.name),
                    );
                }
                ActionOutcome::Unavailable => {}
            },
            Command::Defend => {
                me.defend(&self.clock);
                self.log.log(now, CombatLogEventType::Defend, format!("{} guards", me.name));
            }
            Command::Heal => {
                if let ActionOutcome::Applied(gained) = me.heal(&self.clock, rng) {
                    cues.push(SoundCue::Heal);
                    self.log.log(
                        now,
                        CombatLogEventType::Healing,
                        format!("{} heals {}", me.name, gained),
                    );
                }
            }
        }
    }

    fn check_knockout(&mut self) {
        let [blue, red] = &self.fighters;
        let winner = match (blue.is_knocked_out(), red.is_knocked_out()) {
            (false, false) => return,
            (true, false) => Some(Corner::Red),
            (false, true) => Some(Corner::Blue),
            (true, true) => resolve_double_knockout(blue, red),
        };

        let now = self.clock.now();
        for fighter in self.fighters.iter().filter(|f| f.is_knocked_out()) {
            self.log.log(
                now,
                CombatLogEventType::Knockout,
                format!("{} is knocked out", fighter.name),
            );
        }
        let message = match winner {
            Some(corner) => format!("{} wins!", self.fighter(corner).name),
            None => "Draw!".to_string(),
        };
        info!("Bout over after {:.1}s: {}", now, message);
        self.log.log(now, CombatLogEventType::MatchEvent, message);
        self.phase = MatchPhase::GameOver { winner };
    }

    /// Summary for reports and saved logs.
    pub fn metadata(&self, random_seed: Option<u64>) -> MatchMetadata {
        MatchMetadata {
            winner: self.winner().map(|corner| self.fighter(corner).name.clone()),
            duration_secs: self.clock.now(),
            random_seed,
            fighters: self
                .fighters
                .iter()
                .map(|f| FighterMetadata {
                    name: f.name.clone(),
                    max_health: f.max_health,
                    final_health: f.health,
                    final_energy: f.energy,
                    damage_dealt: f.stats.damage_dealt,
                    damage_taken: f.stats.damage_taken,
                    healing_done: f.stats.healing_done,
                    final_position: (f.x, f.y),
                })
                .collect(),
        }
    }
}

/// Both fighters down in one frame: higher pre-clamp health wins, equal is a draw.
fn resolve_double_knockout(blue: &Fighter, red: &Fighter) -> Option<Corner> {
    use std::cmp::Ordering;
    match blue.pre_clamp_health().cmp(&red.pre_clamp_health()) {
        Ordering::Greater => Some(Corner::Blue),
        Ordering::Less => Some(Corner::Red),
        Ordering::Equal => None,
    }
}

/// (acting fighter, its opponent)
fn split(fighters: &mut [Fighter; 2], corner: Corner) -> (&mut Fighter, &mut Fighter) {
    let [blue, red] = fighters;
    match corner {
        Corner::Blue => (blue, red),
        Corner::Red => (red, blue),
    }
}

fn human_commands(input: &PlayerInput, me: &Fighter) -> Vec<Command> {
    let mut commands = Vec::new();
    if input.jump {
        commands.push(Command::Jump);
    }
    if input.attack {
        commands.push(Command::Attack);
    }
    if input.special {
        commands.push(Command::Special);
    }
    if input.defend {
        commands.push(Command::Defend);
    }
    if input.heal {
        commands.push(Command::Heal);
    }

    let mut delta_x = 0.0;
    if input.left {
        delta_x -= me.speed;
    }
    if input.right {
        delta_x += me.speed;
    }
    commands.push(Command::Move(delta_x));
    commands
}

fn cpu_commands(decision: Option<AiAction>, me: &Fighter, opponent: &Fighter) -> Vec<Command> {
    let command = match decision {
        None => return Vec::new(),
        Some(AiAction::Approach) => Command::Move(approach_step(me, opponent)),
        Some(AiAction::Attack) => Command::Attack,
        Some(AiAction::Special) => Command::Special,
        Some(AiAction::Defend) => Command::Defend,
        Some(AiAction::Heal) => Command::Heal,
    };
    vec![command]
}
