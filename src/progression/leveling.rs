//! Player level curve.

use crate::core::constants::{XP_CURVE_BASE, XP_CURVE_EXPONENT};
use crate::core::game_state::Resources;

/// Exp needed to go from `level` to `level + 1`.
pub fn xp_for_next_level(level: u32) -> u64 {
    (XP_CURVE_BASE * f64::powf(level as f64, XP_CURVE_EXPONENT)) as u64
}

/// Adds exp and spends it on as many level-ups as it covers.
/// Returns the number of levels gained.
pub fn apply_exp(resources: &mut Resources, exp_gain: u64) -> u32 {
    resources.exp = resources.exp.saturating_add(exp_gain);

    let mut levelups = 0;
    loop {
        let xp_needed = xp_for_next_level(resources.level);
        if resources.exp >= xp_needed {
            resources.exp -= xp_needed;
            resources.level += 1;
            levelups += 1;
        } else {
            break;
        }
    }
    levelups
}

/// Total exp needed to climb from level 1 to `target`.
pub fn total_xp_to_reach(target: u32) -> u64 {
    (1..target).map(xp_for_next_level).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xp_curve() {
        assert_eq!(xp_for_next_level(1), 100);
        assert!((799..=800).contains(&xp_for_next_level(4)));
        assert!((2699..=2700).contains(&xp_for_next_level(9)));
        assert!(xp_for_next_level(50) > xp_for_next_level(49));
    }

    #[test]
    fn test_apply_exp_single_level() {
        let mut r = Resources::new();
        assert_eq!(apply_exp(&mut r, 150), 1);
        assert_eq!(r.level, 2);
        assert_eq!(r.exp, 50);
    }

    #[test]
    fn test_apply_exp_multiple_levels() {
        let mut r = Resources::new();
        let needed = total_xp_to_reach(5);
        assert_eq!(apply_exp(&mut r, needed), 4);
        assert_eq!(r.level, 5);
        assert_eq!(r.exp, 0);
    }

    #[test]
    fn test_apply_exp_below_threshold() {
        let mut r = Resources::new();
        assert_eq!(apply_exp(&mut r, 99), 0);
        assert_eq!(r.level, 1);
        assert_eq!(r.exp, 99);
    }

    #[test]
    fn test_reaching_prestige_level() {
        let mut r = Resources::new();
        apply_exp(&mut r, total_xp_to_reach(50));
        assert_eq!(r.level, 50);
    }
}
