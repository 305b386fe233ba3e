//! Offline progression.
//!
//! Credits idle coins and gems for the time between the last save and now,
//! using the same accrual as live ticks.

use super::constants::*;
use super::game_state::GameState;
use super::idle::{format_time, generate_idle_resources};

/// Report of offline progression results
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OfflineReport {
    /// Time since the last save, 0 if the clock went backwards.
    pub elapsed_ms: i64,
    pub coins_gained: u64,
    pub gems_gained: u64,
    /// Elapsed time passed the store's catch-up threshold and gains were applied.
    pub applied: bool,
    /// Elapsed time is long enough to greet the player with a summary.
    pub show_welcome_back: bool,
}

impl OfflineReport {
    /// One-line summary for the welcome-back message.
    pub fn summary(&self) -> String {
        format!(
            "Away for {}: +{} coins, +{} gems",
            format_time((self.elapsed_ms / 1000) as u64),
            self.coins_gained,
            self.gems_gained
        )
    }
}

/// Applies offline catch-up to `state` and sets `last_save` to `now_ms`.
///
/// Gains are only credited past [`OFFLINE_CATCHUP_THRESHOLD_MS`]; shorter gaps
/// (and clock skew) just move `last_save` forward.
pub fn process_offline_progression(state: &mut GameState, now_ms: i64) -> OfflineReport {
    let elapsed_ms = now_ms - state.last_save;
    state.last_save = now_ms;

    if elapsed_ms <= 0 {
        return OfflineReport::default();
    }
    if elapsed_ms <= OFFLINE_CATCHUP_THRESHOLD_MS {
        return OfflineReport {
            elapsed_ms,
            ..OfflineReport::default()
        };
    }

    let before = state.resources;
    state.resources = generate_idle_resources(elapsed_ms, &before, state.stats.prestige_level);

    let report = OfflineReport {
        elapsed_ms,
        coins_gained: state.resources.coins - before.coins,
        gems_gained: state.resources.gems - before.gems,
        applied: true,
        show_welcome_back: elapsed_ms > WELCOME_BACK_THRESHOLD_MS,
    };
    tracing::info!(
        elapsed_ms,
        coins = report.coins_gained,
        gems = report.gems_gained,
        "offline catch-up applied"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_700_000_000_000;

    #[test]
    fn test_process_offline_progression_one_hour() {
        let mut state = GameState::new(NOW - 3_600_000);
        let report = process_offline_progression(&mut state, NOW);

        assert!(report.applied);
        assert!(report.show_welcome_back);
        assert_eq!(report.coins_gained, 3600);
        assert_eq!(report.gems_gained, 360);
        assert_eq!(state.resources.coins, 1000 + 3600);
        assert_eq!(state.resources.gems, 50 + 360);
    }

    #[test]
    fn test_process_offline_progression_with_prestige() {
        let mut state = GameState::new(NOW - 60_000);
        state.stats.prestige_level = 3;
        let report = process_offline_progression(&mut state, NOW);
        assert_eq!(report.coins_gained, 240, "60s at 4 coins/s");
        assert_eq!(report.gems_gained, 6);
    }

    #[test]
    fn test_process_offline_progression_updates_last_save() {
        let mut state = GameState::new(NOW - 7_200_000);
        process_offline_progression(&mut state, NOW);
        assert_eq!(
            state.last_save, NOW,
            "last_save should be moved to now after processing"
        );
    }

    #[test]
    fn test_below_threshold_grants_nothing() {
        let mut state = GameState::new(NOW - 10_000);
        let report = process_offline_progression(&mut state, NOW);
        assert!(!report.applied);
        assert_eq!(report.elapsed_ms, 10_000);
        assert_eq!(report.coins_gained, 0);
        assert_eq!(state.resources.coins, 1000);
        assert_eq!(state.last_save, NOW);
    }

    #[test]
    fn test_between_thresholds_applies_without_welcome_back() {
        let mut state = GameState::new(NOW - 20_000);
        let report = process_offline_progression(&mut state, NOW);
        assert!(report.applied);
        assert!(!report.show_welcome_back);
        assert_eq!(report.coins_gained, 20);
        assert_eq!(report.gems_gained, 2);
    }

    #[test]
    fn test_process_offline_progression_negative_elapsed_returns_default() {
        let mut state = GameState::new(NOW + 3_600_000);
        let report = process_offline_progression(&mut state, NOW);

        assert_eq!(
            report,
            OfflineReport::default(),
            "Negative elapsed time should produce an empty report"
        );
        assert_eq!(state.resources.coins, 1000);
        assert_eq!(state.last_save, NOW);
    }

    #[test]
    fn test_last_save_sync_prevents_double_counting() {
        let mut state = GameState::new(NOW - 3_600_000);

        let first = process_offline_progression(&mut state, NOW);
        assert!(first.coins_gained > 0);

        let second = process_offline_progression(&mut state, NOW + 500);
        assert_eq!(
            second.coins_gained, 0,
            "Second immediate call should gain nothing, last_save sync prevents double-counting"
        );
        assert_eq!(state.resources.coins, 1000 + first.coins_gained);
    }

    #[test]
    fn test_summary() {
        let report = OfflineReport {
            elapsed_ms: 3_661_000,
            coins_gained: 3661,
            gems_gained: 366,
            applied: true,
            show_welcome_back: true,
        };
        assert_eq!(report.summary(), "Away for 1h 1m: +3661 coins, +366 gems");
    }
}
