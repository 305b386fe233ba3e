//! Simulation report generation.

use crate::core::game_state::Currency;
use crate::core::idle::format_number;
use crate::items::pools::GachaPool;
use crate::items::types::Rarity;
use serde::Serialize;

/// Raw counters collected while drawing.
#[derive(Debug, Clone, Default)]
pub struct DrawTally {
    pub draws: u64,
    pub no_drops: u64,
    /// Draws whose rolled rarity had no template and fell back to common.
    pub fallbacks: u64,
    /// Draws with a rarity but no template at all.
    pub unfilled: u64,
    /// Indexed by rarity rank.
    pub rolled: [u64; Rarity::COUNT],
    pub obtained: [u64; Rarity::COUNT],
    pub total_power: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RarityRow {
    pub rarity: Rarity,
    pub configured_rate: f64,
    pub rolled: u64,
    pub observed_rate: f64,
    /// Items actually received at this rarity, fallbacks included.
    pub obtained: u64,
}

/// Aggregated results of a simulation run.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub pool_id: String,
    pub pool_name: String,
    pub currency: Currency,
    pub draws: u64,
    pub currency_spent: u64,
    pub no_drops: u64,
    pub configured_no_drop_rate: f64,
    pub observed_no_drop_rate: f64,
    pub fallbacks: u64,
    pub unfilled: u64,
    pub avg_power: f64,
    /// Largest |observed - configured| over every rarity and the no-drop bucket.
    pub max_deviation: f64,
    pub rarities: Vec<RarityRow>,
}

impl SimReport {
    pub fn from_tally(pool: &GachaPool, tally: DrawTally) -> Self {
        let draws = tally.draws.max(1) as f64;

        let rarities: Vec<RarityRow> = Rarity::ALL
            .iter()
            .map(|&rarity| {
                let rolled = tally.rolled[rarity.rank()];
                RarityRow {
                    rarity,
                    configured_rate: pool.rates.get(rarity),
                    rolled,
                    observed_rate: rolled as f64 / draws,
                    obtained: tally.obtained[rarity.rank()],
                }
            })
            .collect();

        let configured_no_drop_rate = pool.rates.no_drop_chance();
        let observed_no_drop_rate = tally.no_drops as f64 / draws;
        let max_deviation = rarities
            .iter()
            .map(|r| (r.observed_rate - r.configured_rate).abs())
            .fold(
                (observed_no_drop_rate - configured_no_drop_rate).abs(),
                f64::max,
            );

        let obtained: u64 = tally.obtained.iter().sum();
        let avg_power = if obtained > 0 {
            tally.total_power as f64 / obtained as f64
        } else {
            0.0
        };

        Self {
            pool_id: pool.id.clone(),
            pool_name: pool.name.clone(),
            currency: pool.currency,
            draws: tally.draws,
            currency_spent: pool.cost.saturating_mul(tally.draws),
            no_drops: tally.no_drops,
            configured_no_drop_rate,
            observed_no_drop_rate,
            fallbacks: tally.fallbacks,
            unfilled: tally.unfilled,
            avg_power,
            max_deviation,
            rarities,
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SUMMON SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Pool: {} ({}), {} draws, {} {} spent\n\n",
            self.pool_name,
            self.pool_id,
            self.draws,
            format_number(self.currency_spent),
            self.currency.name()
        ));

        report.push_str("── RARITY DISTRIBUTION ──────────────────────────────────────────\n");
        report.push_str("  Rarity        Config   Observed    Rolled   Obtained\n");
        report.push_str("  ──────        ──────   ────────    ──────   ────────\n");
        for row in &self.rarities {
            let bar: String = "█".repeat((row.observed_rate * 50.0) as usize);
            report.push_str(&format!(
                "  {:<12} {:>6.2}%   {:>6.2}%  {:>8}   {:>8} {}\n",
                row.rarity.name(),
                row.configured_rate * 100.0,
                row.observed_rate * 100.0,
                row.rolled,
                row.obtained,
                bar
            ));
        }
        report.push_str(&format!(
            "  {:<12} {:>6.2}%   {:>6.2}%  {:>8}\n\n",
            "no drop",
            self.configured_no_drop_rate * 100.0,
            self.observed_no_drop_rate * 100.0,
            self.no_drops
        ));

        report.push_str("── ITEMS ────────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Power:         {:.1}\n", self.avg_power));
        report.push_str(&format!("  Common Fallbacks:  {}\n", self.fallbacks));
        report.push_str(&format!("  Unfilled Draws:    {}\n\n", self.unfilled));

        report.push_str("── ASSESSMENT ───────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Max Deviation:     {:.3}%\n",
            self.max_deviation * 100.0
        ));
        if self.max_deviation > 0.01 {
            report.push_str("  ⚠️  Observed rates drift more than 1% from config\n");
        }
        if self.fallbacks > 0 {
            report.push_str("  ⚠️  Pool has rates for rarities without templates\n");
        }
        if self.unfilled > 0 {
            report.push_str("  ⚠️  Pool has no common templates to fall back on\n");
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");

        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
