//! Dashboard load state machine (mount/refresh/teardown).
//!
//! Ensures only one weather load runs at a time. Used by the dashboard.

/// Operation state for serializing mount and refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OpState {
    #[default]
    Idle,
    BusyMount,
    BusyRefresh,
    Unmounted,
}

impl OpState {
    /// True if the initial mount can be started.
    pub fn can_start_mount(self) -> bool {
        matches!(self, OpState::Idle)
    }

    /// True if a new refresh can be started.
    pub fn can_start_refresh(self) -> bool {
        matches!(self, OpState::Idle)
    }

    /// State after a mount or refresh finished.
    ///
    /// A teardown that happened mid-load wins.
    pub fn on_load_done(self) -> Self {
        match self {
            OpState::Unmounted => OpState::Unmounted,
            _ => OpState::Idle,
        }
    }

    /// State after teardown. Terminal.
    pub fn on_unmount(self) -> Self {
        OpState::Unmounted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_allows_all_ops() {
        let s = OpState::Idle;
        assert!(s.can_start_mount());
        assert!(s.can_start_refresh());
    }

    #[test]
    fn busy_mount_blocks_ops() {
        let s = OpState::BusyMount;
        assert!(!s.can_start_mount());
        assert!(!s.can_start_refresh());
    }

    #[test]
    fn busy_refresh_blocks_ops() {
        let s = OpState::BusyRefresh;
        assert!(!s.can_start_mount());
        assert!(!s.can_start_refresh());
    }

    #[test]
    fn unmounted_blocks_everything() {
        let s = OpState::Unmounted;
        assert!(!s.can_start_mount());
        assert!(!s.can_start_refresh());
    }

    #[test]
    fn load_done_transitions_to_idle() {
        assert_eq!(OpState::BusyRefresh.on_load_done(), OpState::Idle);
        assert_eq!(OpState::BusyMount.on_load_done(), OpState::Idle);
    }

    #[test]
    fn unmount_during_load_sticks() {
        let s = OpState::BusyRefresh.on_unmount();
        assert_eq!(s.on_load_done(), OpState::Unmounted);
    }
}
