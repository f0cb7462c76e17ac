//! Keybinding system for remappable controls
//!
//! Both fighters share one keyboard, so every fighter control is bound per
//! corner. Bindings are stored in `settings.ron` by key name.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::combat::bout::PlayerInput;
use crate::combat::fighter::Corner;

/// Per-fighter controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FighterControl {
    Left,
    Right,
    Jump,
    Attack,
    Special,
    Defend,
    Heal,
}

impl FighterControl {
    pub fn all() -> [FighterControl; 7] {
        [
            FighterControl::Left,
            FighterControl::Right,
            FighterControl::Jump,
            FighterControl::Attack,
            FighterControl::Special,
            FighterControl::Defend,
            FighterControl::Heal,
        ]
    }

    pub fn description(&self) -> &'static str {
        match self {
            FighterControl::Left => "Move Left",
            FighterControl::Right => "Move Right",
            FighterControl::Jump => "Jump",
            FighterControl::Attack => "Attack",
            FighterControl::Special => "Special",
            FighterControl::Defend => "Defend",
            FighterControl::Heal => "Heal",
        }
    }
}

/// All possible actions that can be bound to keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameAction {
    Player(Corner, FighterControl),

    // Match
    Pause,
    Restart,

    // Navigation
    Back,
    MenuUp,
    MenuDown,
    Confirm,
}

impl GameAction {
    pub fn description(&self) -> String {
        match self {
            GameAction::Player(_, control) => control.description().to_string(),
            GameAction::Pause => "Pause / Resume".to_string(),
            GameAction::Restart => "Rematch".to_string(),
            GameAction::Back => "Back / Exit".to_string(),
            GameAction::MenuUp => "Menu Up".to_string(),
            GameAction::MenuDown => "Menu Down".to_string(),
            GameAction::Confirm => "Confirm / Select".to_string(),
        }
    }

    pub fn category(&self) -> &'static str {
        match self {
            GameAction::Player(corner, _) => corner.label(),
            GameAction::Pause | GameAction::Restart => "Match",
            GameAction::Back | GameAction::MenuUp | GameAction::MenuDown | GameAction::Confirm => {
                "Navigation"
            }
        }
    }

    pub fn all() -> Vec<GameAction> {
        let mut actions: Vec<GameAction> = Corner::all()
            .into_iter()
            .flat_map(|corner| {
                FighterControl::all()
                    .into_iter()
                    .map(move |control| GameAction::Player(corner, control))
            })
            .collect();
        actions.extend([
            GameAction::Pause,
            GameAction::Restart,
            GameAction::Back,
            GameAction::MenuUp,
            GameAction::MenuDown,
            GameAction::Confirm,
        ]);
        actions
    }
}

/// Keys that can be stored in settings: (key, stored name, display name).
const NAMED_KEYS: &[(KeyCode, &str, &str)] = &[
    (KeyCode::Escape, "Escape", "ESC"),
    (KeyCode::Enter, "Enter", "ENTER"),
    (KeyCode::Space, "Space", "SPACE"),
    (KeyCode::Tab, "Tab", "TAB"),
    (KeyCode::Backspace, "Backspace", "BACKSPACE"),
    (KeyCode::ShiftLeft, "ShiftLeft", "L-SHIFT"),
    (KeyCode::ShiftRight, "ShiftRight", "R-SHIFT"),
    (KeyCode::ControlLeft, "ControlLeft", "L-CTRL"),
    (KeyCode::ControlRight, "ControlRight", "R-CTRL"),
    (KeyCode::KeyA, "KeyA", "A"),
    (KeyCode::KeyB, "KeyB", "B"),
    (KeyCode::KeyC, "KeyC", "C"),
    (KeyCode::KeyD, "KeyD", "D"),
    (KeyCode::KeyE, "KeyE", "E"),
    (KeyCode::KeyF, "KeyF", "F"),
    (KeyCode::KeyG, "KeyG", "G"),
    (KeyCode::KeyH, "KeyH", "H"),
    (KeyCode::KeyI, "KeyI", "I"),
    (KeyCode::KeyJ, "KeyJ", "J"),
    (KeyCode::KeyK, "KeyK", "K"),
    (KeyCode::KeyL, "KeyL", "L"),
    (KeyCode::KeyM, "KeyM", "M"),
    (KeyCode::KeyN, "KeyN", "N"),
    (KeyCode::KeyO, "KeyO", "O"),
    (KeyCode::KeyP, "KeyP", "P"),
    (KeyCode::KeyQ, "KeyQ", "Q"),
    (KeyCode::KeyR, "KeyR", "R"),
    (KeyCode::KeyS, "KeyS", "S"),
    (KeyCode::KeyT, "KeyT", "T"),
    (KeyCode::KeyU, "KeyU", "U"),
    (KeyCode::KeyV, "KeyV", "V"),
    (KeyCode::KeyW, "KeyW", "W"),
    (KeyCode::KeyX, "KeyX", "X"),
    (KeyCode::KeyY, "KeyY", "Y"),
    (KeyCode::KeyZ, "KeyZ", "Z"),
    (KeyCode::Digit1, "Digit1", "1"),
    (KeyCode::Digit2, "Digit2", "2"),
    (KeyCode::Digit3, "Digit3", "3"),
    (KeyCode::Digit4, "Digit4", "4"),
    (KeyCode::Digit5, "Digit5", "5"),
    (KeyCode::Digit6, "Digit6", "6"),
    (KeyCode::Digit7, "Digit7", "7"),
    (KeyCode::Digit8, "Digit8", "8"),
    (KeyCode::Digit9, "Digit9", "9"),
    (KeyCode::Digit0, "Digit0", "0"),
    (KeyCode::Comma, "Comma", ","),
    (KeyCode::Period, "Period", "."),
    (KeyCode::Slash, "Slash", "/"),
    (KeyCode::Semicolon, "Semicolon", ";"),
    (KeyCode::Numpad0, "Numpad0", "NUM0"),
    (KeyCode::Numpad1, "Numpad1", "NUM1"),
    (KeyCode::Numpad2, "Numpad2", "NUM2"),
    (KeyCode::Numpad3, "Numpad3", "NUM3"),
    (KeyCode::NumpadEnter, "NumpadEnter", "NUM ENTER"),
    (KeyCode::ArrowUp, "ArrowUp", "↑"),
    (KeyCode::ArrowDown, "ArrowDown", "↓"),
    (KeyCode::ArrowLeft, "ArrowLeft", "←"),
    (KeyCode::ArrowRight, "ArrowRight", "→"),
];

/// Parse a stored key name (`"KeyA"`, `"ArrowUp"`, ...).
pub fn key_from_name(name: &str) -> Option<KeyCode> {
    NAMED_KEYS
        .iter()
        .find(|(_, stored, _)| *stored == name)
        .map(|(key, _, _)| *key)
}

fn stored_name(key: KeyCode) -> Option<&'static str> {
    NAMED_KEYS
        .iter()
        .find(|(k, _, _)| *k == key)
        .map(|(_, stored, _)| *stored)
}

/// Key binding with primary and optional secondary key
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KeyBinding {
    #[serde(with = "keycode_serde")]
    pub primary: KeyCode,
    #[serde(with = "option_keycode_serde", default)]
    pub secondary: Option<KeyCode>,
}

mod keycode_serde {
    use super::*;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S>(key: &KeyCode, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let name = stored_name(*key).ok_or_else(|| {
            <S::Error as serde::ser::Error>::custom(format!("key {:?} cannot be stored", key))
        })?;
        serializer.serialize_str(name)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<KeyCode, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        key_from_name(&name)
            .ok_or_else(|| <D::Error as serde::de::Error>::custom(format!("unknown key '{}'", name)))
    }
}

mod option_keycode_serde {
    use super::*;
    use serde::{Deserializer, Serializer};

    #[derive(Serialize, Deserialize)]
    #[serde(transparent)]
    struct Stored(#[serde(with = "super::keycode_serde")] KeyCode);

    pub fn serialize<S>(key: &Option<KeyCode>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match key {
            Some(k) => serializer.serialize_some(&Stored(*k)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<KeyCode>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let stored: Option<Stored> = Option::deserialize(deserializer)?;
        Ok(stored.map(|Stored(key)| key))
    }
}

impl KeyBinding {
    pub fn new(primary: KeyCode) -> Self {
        Self {
            primary,
            secondary: None,
        }
    }

    pub fn with_secondary(primary: KeyCode, secondary: KeyCode) -> Self {
        Self {
            primary,
            secondary: Some(secondary),
        }
    }

    pub fn matches(&self, key: KeyCode) -> bool {
        self.primary == key || self.secondary == Some(key)
    }
}

/// Complete keybindings configuration
#[derive(Debug, Clone, Resource, Serialize, Deserialize, PartialEq)]
pub struct Keybindings {
    bindings: HashMap<GameAction, KeyBinding>,
}

impl Default for Keybindings {
    fn default() -> Self {
        Self::create_defaults()
    }
}

impl Keybindings {
    pub fn create_defaults() -> Self {
        use FighterControl::*;

        let mut bindings = HashMap::new();
        let mut bind_fighter = |corner: Corner, keys: [(FighterControl, KeyCode); 7]| {
            for (control, key) in keys {
                bindings.insert(GameAction::Player(corner, control), KeyBinding::new(key));
            }
        };

        bind_fighter(
            Corner::Blue,
            [
                (Left, KeyCode::KeyA),
                (Right, KeyCode::KeyD),
                (Jump, KeyCode::KeyW),
                (Attack, KeyCode::KeyJ),
                (Special, KeyCode::KeyK),
                (Defend, KeyCode::KeyL),
                (Heal, KeyCode::KeyH),
            ],
        );
        bind_fighter(
            Corner::Red,
            [
                (Left, KeyCode::ArrowLeft),
                (Right, KeyCode::ArrowRight),
                (Jump, KeyCode::ArrowUp),
                (Attack, KeyCode::KeyM),
                (Special, KeyCode::KeyN),
                (Defend, KeyCode::KeyB),
                (Heal, KeyCode::KeyV),
            ],
        );

        bindings.insert(GameAction::Pause, KeyBinding::new(KeyCode::KeyP));
        bindings.insert(GameAction::Restart, KeyBinding::new(KeyCode::KeyR));
        bindings.insert(GameAction::Back, KeyBinding::new(KeyCode::Escape));
        bindings.insert(GameAction::MenuUp, KeyBinding::new(KeyCode::ArrowUp));
        bindings.insert(GameAction::MenuDown, KeyBinding::new(KeyCode::ArrowDown));
        bindings.insert(
            GameAction::Confirm,
            KeyBinding::with_secondary(KeyCode::Enter, KeyCode::NumpadEnter),
        );

        Self { bindings }
    }

    pub fn get(&self, action: GameAction) -> Option<&KeyBinding> {
        self.bindings.get(&action)
    }

    pub fn set(&mut self, action: GameAction, binding: KeyBinding) {
        self.bindings.insert(action, binding);
    }

    pub fn reset_to_defaults(&mut self) {
        *self = Self::create_defaults();
    }

    /// Check if an action is currently held
    pub fn action_pressed(&self, action: GameAction, keyboard: &ButtonInput<KeyCode>) -> bool {
        self.get(action).is_some_and(|binding| {
            keyboard.pressed(binding.primary)
                || binding.secondary.is_some_and(|key| keyboard.pressed(key))
        })
    }

    /// Check if an action was just pressed this frame
    pub fn action_just_pressed(&self, action: GameAction, keyboard: &ButtonInput<KeyCode>) -> bool {
        self.get(action).is_some_and(|binding| {
            keyboard.just_pressed(binding.primary)
                || binding.secondary.is_some_and(|key| keyboard.just_pressed(key))
        })
    }

    /// One fighter's controls this frame: held movement, edge-triggered actions.
    pub fn player_input(&self, corner: Corner, keyboard: &ButtonInput<KeyCode>) -> PlayerInput {
        let held = |control| self.action_pressed(GameAction::Player(corner, control), keyboard);
        let tapped = |control| self.action_just_pressed(GameAction::Player(corner, control), keyboard);
        PlayerInput {
            left: held(FighterControl::Left),
            right: held(FighterControl::Right),
            jump: tapped(FighterControl::Jump),
            attack: tapped(FighterControl::Attack),
            special: tapped(FighterControl::Special),
            defend: tapped(FighterControl::Defend),
            heal: tapped(FighterControl::Heal),
        }
    }

    /// Pairs of in-match actions that share a key. Menu navigation is
    /// excluded since it never runs alongside a bout.
    pub fn conflicts(&self) -> Vec<(GameAction, GameAction)> {
        let in_match = |action: &GameAction| {
            matches!(
                action,
                GameAction::Player(..) | GameAction::Pause | GameAction::Restart | GameAction::Back
            )
        };
        let actions: Vec<GameAction> = GameAction::all().into_iter().filter(in_match).collect();

        let mut conflicts = Vec::new();
        for (i, a) in actions.iter().enumerate() {
            for b in &actions[i + 1..] {
                if let (Some(binding_a), Some(binding_b)) = (self.get(*a), self.get(*b)) {
                    let shared = binding_b.matches(binding_a.primary)
                        || binding_a.secondary.is_some_and(|key| binding_b.matches(key));
                    if shared {
                        conflicts.push((*a, *b));
                    }
                }
            }
        }
        conflicts
    }

    /// Get a human-readable string for a key
    pub fn key_name(key: KeyCode) -> &'static str {
        NAMED_KEYS
            .iter()
            .find(|(k, _, _)| *k == key)
            .map(|(_, _, display)| *display)
            .unwrap_or("???")
    }

    /// Get display string for a binding
    pub fn binding_display(&self, action: GameAction) -> String {
        match self.get(action) {
            Some(binding) => {
                let primary = Self::key_name(binding.primary);
                match binding.secondary {
                    Some(secondary) => format!("{} / {}", primary, Self::key_name(secondary)),
                    None => primary.to_string(),
                }
            }
            None => "Unbound".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_action_has_a_default() {
        let bindings = Keybindings::default();
        for action in GameAction::all() {
            assert!(bindings.get(action).is_some(), "{:?} is unbound", action);
        }
        assert_eq!(GameAction::all().len(), 20);
    }

    #[test]
    fn test_defaults_have_no_in_match_conflicts() {
        assert!(Keybindings::default().conflicts().is_empty());
    }

    #[test]
    fn test_conflict_detected_after_rebind() {
        let mut bindings = Keybindings::default();
        bindings.set(
            GameAction::Player(Corner::Red, FighterControl::Attack),
            KeyBinding::new(KeyCode::KeyJ),
        );
        let conflicts = bindings.conflicts();
        assert_eq!(conflicts.len(), 1);
        assert_eq!(
            conflicts[0],
            (
                GameAction::Player(Corner::Blue, FighterControl::Attack),
                GameAction::Player(Corner::Red, FighterControl::Attack)
            )
        );
    }

    #[test]
    fn test_player_input_reads_held_and_tapped() {
        let bindings = Keybindings::default();
        let mut keyboard = ButtonInput::<KeyCode>::default();
        keyboard.press(KeyCode::KeyA);
        keyboard.press(KeyCode::KeyJ);

        let blue = bindings.player_input(Corner::Blue, &keyboard);
        assert!(blue.left && blue.attack);
        assert!(!blue.right && !blue.heal);

        keyboard.clear();
        let blue = bindings.player_input(Corner::Blue, &keyboard);
        assert!(blue.left, "movement is held");
        assert!(!blue.attack, "attack fires once per press");

        let red = bindings.player_input(Corner::Red, &keyboard);
        assert_eq!(red, PlayerInput::default());
    }

    #[test]
    fn test_binding_display() {
        let bindings = Keybindings::default();
        assert_eq!(bindings.binding_display(GameAction::Pause), "P");
        assert_eq!(bindings.binding_display(GameAction::Confirm), "ENTER / NUM ENTER");
        assert_eq!(
            bindings.binding_display(GameAction::Player(Corner::Red, FighterControl::Left)),
            "←"
        );
    }

    #[test]
    fn test_key_names_parse_back() {
        for (key, stored, _) in NAMED_KEYS {
            assert_eq!(key_from_name(stored), Some(*key));
        }
        assert_eq!(key_from_name("NotAKey"), None);
    }

    #[test]
    fn test_bindings_round_trip_through_ron() {
        let mut bindings = Keybindings::default();
        bindings.set(GameAction::Pause, KeyBinding::with_secondary(KeyCode::KeyP, KeyCode::Space));

        let text = ron::to_string(&bindings).unwrap();
        let parsed: Keybindings = ron::from_str(&text).unwrap();
        assert_eq!(parsed, bindings);
    }
}
