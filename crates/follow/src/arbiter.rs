//! Manual / Following mode state machine
//!
//! The arbiter is polled once per frame with whether a target is held. It
//! reports the transition (if any) so the controller can run the one-time
//! entry and exit effects, and it owns the latch that limits the
//! missing-target diagnostic to once per absence episode.

/// Control mode of the avatar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FollowMode {
    /// Input-driven locomotion with gravity
    #[default]
    Manual,
    /// Pose copied from the followed target
    Following,
}

/// Mode change observed on one evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    None,
    /// Manual -> Following
    Entered,
    /// Following -> Manual
    Exited,
}

/// Outcome of one arbitration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arbitration {
    pub mode: FollowMode,
    pub transition: Transition,
    /// The missing-target diagnostic should fire this frame
    pub warn_missing_target: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ModeArbiter {
    mode: FollowMode,
    warned_missing_target: bool,
}

impl ModeArbiter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> FollowMode {
        self.mode
    }

    /// Whether the diagnostic has fired during the current absence episode
    pub fn warned_missing_target(&self) -> bool {
        self.warned_missing_target
    }

    /// Evaluate the mode for this frame
    pub fn evaluate(&mut self, has_target: bool) -> Arbitration {
        let transition = match (self.mode, has_target) {
            (FollowMode::Manual, true) => {
                self.mode = FollowMode::Following;
                Transition::Entered
            }
            (FollowMode::Following, false) => {
                self.mode = FollowMode::Manual;
                Transition::Exited
            }
            _ => Transition::None,
        };

        let warn_missing_target = if has_target {
            self.warned_missing_target = false;
            false
        } else if !self.warned_missing_target {
            self.warned_missing_target = true;
            true
        } else {
            false
        };

        Arbitration {
            mode: self.mode,
            transition,
            warn_missing_target,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_mode_is_manual() {
        assert_eq!(ModeArbiter::new().mode(), FollowMode::Manual);
    }

    #[test]
    fn test_enter_and_exit_fire_once() {
        let mut arbiter = ModeArbiter::new();

        let first = arbiter.evaluate(true);
        assert_eq!(first.transition, Transition::Entered);
        assert_eq!(first.mode, FollowMode::Following);

        assert_eq!(arbiter.evaluate(true).transition, Transition::None);

        let exit = arbiter.evaluate(false);
        assert_eq!(exit.transition, Transition::Exited);
        assert_eq!(exit.mode, FollowMode::Manual);

        assert_eq!(arbiter.evaluate(false).transition, Transition::None);
    }

    #[test]
    fn test_warning_once_per_absence_episode() {
        let mut arbiter = ModeArbiter::new();

        let warnings: Vec<bool> = (0..5)
            .map(|_| arbiter.evaluate(false).warn_missing_target)
            .collect();
        assert_eq!(warnings, vec![true, false, false, false, false]);

        // Target appears, then disappears again: new episode
        arbiter.evaluate(true);
        assert!(arbiter.evaluate(false).warn_missing_target);
        assert!(!arbiter.evaluate(false).warn_missing_target);
    }

    #[test]
    fn test_no_warning_while_target_held() {
        let mut arbiter = ModeArbiter::new();
        for _ in 0..3 {
            assert!(!arbiter.evaluate(true).warn_missing_target);
        }
        assert!(!arbiter.warned_missing_target());
    }
}
