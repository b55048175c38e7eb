/// Whether the welcome overlay has been acknowledged this session.
///
/// Starts unset, becomes seen on the first acknowledgment and can be reset to
/// show the overlay again. Owned by the app and passed where needed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WelcomeState {
    seen: bool,
}

impl WelcomeState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State for a session that should start without the overlay.
    pub fn already_seen() -> Self {
        Self { seen: true }
    }

    pub fn has_seen(&self) -> bool {
        self.seen
    }

    pub fn should_show(&self) -> bool {
        !self.seen
    }

    pub fn acknowledge(&mut self) {
        self.seen = true;
    }

    pub fn reset(&mut self) {
        self.seen = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle() {
        let mut state = WelcomeState::new();
        assert!(state.should_show());
        state.acknowledge();
        assert!(state.has_seen());
        state.acknowledge();
        assert!(!state.should_show());
        state.reset();
        assert!(state.should_show());
        assert!(WelcomeState::already_seen().has_seen());
    }
}
