use super::types::{ButtonEvent, ButtonId};

/// Current and previous state of every logical button.
///
/// Invariant: `previous[b]` is what `current[b]` was before the most recent
/// `set_button(b, ..)` call. Updates are per button and per raw transition,
/// never a per-frame snapshot, so "just pressed" is edge-triggered: it holds
/// from a not-held → held transition until that button's next transition.
///
/// Two transitions of the same button between queries collapse; only the
/// latest is observable.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    current: [bool; ButtonId::COUNT],
    previous: [bool; ButtonId::COUNT],
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shifts the button's current state into its previous state, then stores `pressed`.
    #[inline]
    pub fn set_button(&mut self, id: ButtonId, pressed: bool) {
        let i = id.index();
        self.previous[i] = self.current[i];
        self.current[i] = pressed;
    }

    /// Applies one button transition.
    #[inline]
    pub fn apply(&mut self, ev: ButtonEvent) {
        self.set_button(ev.button, ev.pressed);
    }

    /// Releases every held button.
    ///
    /// Used when the window loses focus; the release events would otherwise
    /// never arrive and the buttons would stay stuck.
    pub fn release_all(&mut self) {
        for id in ButtonId::ALL {
            if self.is_held(id) {
                self.set_button(id, false);
            }
        }
    }

    #[inline]
    pub fn is_held(&self, id: ButtonId) -> bool {
        self.current[id.index()]
    }

    #[inline]
    pub fn was_just_pressed(&self, id: ButtonId) -> bool {
        let i = id.index();
        self.current[i] && !self.previous[i]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── held ──────────────────────────────────────────────────────────────

    #[test]
    fn starts_with_nothing_held() {
        let s = InputState::new();
        for id in ButtonId::ALL {
            assert!(!s.is_held(id));
            assert!(!s.was_just_pressed(id));
        }
    }

    #[test]
    fn held_follows_latest_transition() {
        let mut s = InputState::new();
        s.set_button(ButtonId::Left, true);
        assert!(s.is_held(ButtonId::Left));
        s.set_button(ButtonId::Left, false);
        assert!(!s.is_held(ButtonId::Left));
    }

    // ── just pressed ──────────────────────────────────────────────────────

    #[test]
    fn just_pressed_after_press_transition() {
        let mut s = InputState::new();
        s.apply(ButtonEvent::new(ButtonId::Start, true));
        assert!(s.was_just_pressed(ButtonId::Start));
        // Querying does not consume the edge.
        assert!(s.was_just_pressed(ButtonId::Start));
    }

    #[test]
    fn repeat_press_clears_just_pressed() {
        let mut s = InputState::new();
        s.set_button(ButtonId::Action1, true);
        s.set_button(ButtonId::Action1, true);
        assert!(s.is_held(ButtonId::Action1));
        assert!(!s.was_just_pressed(ButtonId::Action1));
    }

    #[test]
    fn release_clears_just_pressed() {
        let mut s = InputState::new();
        s.set_button(ButtonId::Up, true);
        s.set_button(ButtonId::Up, false);
        assert!(!s.was_just_pressed(ButtonId::Up));
    }

    #[test]
    fn intermediate_state_is_lost() {
        let mut s = InputState::new();
        // press + release + press before any query: previous is "released".
        s.set_button(ButtonId::Down, true);
        s.set_button(ButtonId::Down, false);
        s.set_button(ButtonId::Down, true);
        assert!(s.was_just_pressed(ButtonId::Down));

        // press + repeat + release: the press edge is gone.
        let mut s = InputState::new();
        s.set_button(ButtonId::Down, true);
        s.set_button(ButtonId::Down, true);
        s.set_button(ButtonId::Down, false);
        assert!(!s.was_just_pressed(ButtonId::Down));
    }

    #[test]
    fn buttons_are_tracked_independently() {
        let mut s = InputState::new();
        s.set_button(ButtonId::Right, true);
        s.set_button(ButtonId::Action2, true);
        s.set_button(ButtonId::Action2, true);

        assert!(s.was_just_pressed(ButtonId::Right));
        assert!(!s.was_just_pressed(ButtonId::Action2));
        assert!(!s.is_held(ButtonId::Left));
    }

    #[test]
    fn edge_holds_until_next_transition_of_that_button() {
        let mut s = InputState::new();
        s.set_button(ButtonId::Right, true);
        for id in [ButtonId::Up, ButtonId::Down, ButtonId::Start] {
            s.set_button(id, true);
            s.set_button(id, false);
        }
        assert!(s.was_just_pressed(ButtonId::Right));
    }

    // ── release_all ───────────────────────────────────────────────────────

    #[test]
    fn release_all_drops_held_buttons() {
        let mut s = InputState::new();
        s.set_button(ButtonId::Up, true);
        s.set_button(ButtonId::Action1, true);
        s.release_all();

        for id in ButtonId::ALL {
            assert!(!s.is_held(id));
            assert!(!s.was_just_pressed(id));
        }
    }

    #[test]
    fn release_all_leaves_idle_buttons_untouched() {
        let mut s = InputState::new();
        s.set_button(ButtonId::Left, true);
        s.set_button(ButtonId::Left, false);
        s.set_button(ButtonId::Up, true);
        s.release_all();

        // Left was not held, so no extra transition was recorded for it.
        s.set_button(ButtonId::Left, true);
        assert!(s.was_just_pressed(ButtonId::Left));
    }
}
