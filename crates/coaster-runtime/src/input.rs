//! Input state management

use std::collections::{HashMap, HashSet};
use winit::keyboard::KeyCode;

/// Things the rider can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ToggleCamera,
    Quit,
}

/// Tracks keyboard state per frame
pub struct InputState {
    /// Keys currently held down
    keys_down: HashSet<KeyCode>,
    /// Keys pressed this frame
    keys_just_pressed: HashSet<KeyCode>,

    /// Action map: action -> list of key bindings
    action_map: HashMap<Action, Vec<KeyCode>>,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

impl InputState {
    pub fn new() -> Self {
        Self {
            keys_down: HashSet::new(),
            keys_just_pressed: HashSet::new(),
            action_map: Self::default_action_map(),
        }
    }

    fn default_action_map() -> HashMap<Action, Vec<KeyCode>> {
        let mut map = HashMap::new();
        map.insert(Action::ToggleCamera, vec![KeyCode::KeyC]);
        map.insert(Action::Quit, vec![KeyCode::KeyQ, KeyCode::Escape]);
        map
    }

    /// Process a key press event. Repeats of a held key are not fresh presses.
    pub fn process_key_down(&mut self, key: KeyCode) {
        if self.keys_down.insert(key) {
            self.keys_just_pressed.insert(key);
        }
    }

    /// Process a key release event
    pub fn process_key_up(&mut self, key: KeyCode) {
        self.keys_down.remove(&key);
    }

    /// Call at end of frame to clear per-frame state
    pub fn end_frame(&mut self) {
        self.keys_just_pressed.clear();
    }

    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// Was an action just pressed this frame?
    pub fn is_action_just_pressed(&self, action: Action) -> bool {
        self.action_map
            .get(&action)
            .map(|keys| keys.iter().any(|k| self.keys_just_pressed.contains(k)))
            .unwrap_or(false)
    }

    /// Get all actions that were just pressed this frame
    pub fn actions_just_pressed(&self) -> Vec<Action> {
        let mut result: Vec<Action> = self
            .action_map
            .iter()
            .filter(|(_, keys)| keys.iter().any(|k| self.keys_just_pressed.contains(k)))
            .map(|(action, _)| *action)
            .collect();
        // Quit last so a same-frame toggle still lands
        result.sort_by_key(|a| *a == Action::Quit);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_transitions() {
        let mut input = InputState::new();

        input.process_key_down(KeyCode::KeyC);
        assert!(input.is_key_down(KeyCode::KeyC));
        assert!(input.is_action_just_pressed(Action::ToggleCamera));

        // End frame clears just_pressed
        input.end_frame();
        assert!(input.is_key_down(KeyCode::KeyC));
        assert!(!input.is_action_just_pressed(Action::ToggleCamera));

        input.process_key_up(KeyCode::KeyC);
        assert!(!input.is_key_down(KeyCode::KeyC));
    }

    #[test]
    fn test_repeat_is_not_a_fresh_press() {
        let mut input = InputState::new();
        input.process_key_down(KeyCode::KeyC);
        input.end_frame();
        input.process_key_down(KeyCode::KeyC);
        assert!(!input.is_action_just_pressed(Action::ToggleCamera));
    }

    #[test]
    fn test_quit_bindings() {
        for key in [KeyCode::KeyQ, KeyCode::Escape] {
            let mut input = InputState::new();
            input.process_key_down(key);
            assert_eq!(input.actions_just_pressed(), vec![Action::Quit]);
        }
    }

    #[test]
    fn test_unbound_key_does_nothing() {
        let mut input = InputState::new();
        input.process_key_down(KeyCode::KeyW);
        assert!(input.actions_just_pressed().is_empty());
    }

    #[test]
    fn test_toggle_sorted_before_quit() {
        let mut input = InputState::new();
        input.process_key_down(KeyCode::Escape);
        input.process_key_down(KeyCode::KeyC);
        assert_eq!(
            input.actions_just_pressed(),
            vec![Action::ToggleCamera, Action::Quit]
        );
    }
}
