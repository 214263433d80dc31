//! Production statistics - weekly totals, projections and target analysis

use std::collections::BTreeMap;

use serde::Serialize;

use crate::entities::production::{ProductionEntry, Shift};

/// Weeks per commercial month
pub const WEEKS_PER_MONTH: f64 = 4.0;
/// Weeks per year
pub const WEEKS_PER_YEAR: f64 = 52.0;
/// Monthly target used when none (or a non-positive one) is given
pub const DEFAULT_MONTHLY_TARGET: f64 = 750.0;

const DAYS_PER_WEEK: f64 = 7.0;

/// Aggregates over one week of entries
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyStats {
    pub total: u64,
    pub daily_average: f64,
    pub shift_totals: BTreeMap<Shift, u64>,
    pub shift_averages: BTreeMap<Shift, f64>,
}

impl WeeklyStats {
    pub fn compute(entries: &[ProductionEntry]) -> Self {
        let mut shift_totals: BTreeMap<Shift, u64> =
            Shift::ALL.into_iter().map(|s| (s, 0)).collect();
        for entry in entries {
            *shift_totals.entry(entry.shift).or_default() += u64::from(entry.quantity);
        }
        let total: u64 = shift_totals.values().sum();
        let shift_averages = shift_totals
            .iter()
            .map(|(shift, t)| (*shift, *t as f64 / DAYS_PER_WEEK))
            .collect();

        Self {
            total,
            daily_average: total as f64 / DAYS_PER_WEEK,
            shift_totals,
            shift_averages,
        }
    }

    /// Shift with the highest average; ties go to the earliest shift
    pub fn best_shift(&self) -> Shift {
        let mut best = Shift::Manha;
        for shift in Shift::ALL {
            if self.average(shift) > self.average(best) {
                best = shift;
            }
        }
        best
    }

    /// Shift with the lowest average; ties go to the earliest shift
    pub fn worst_shift(&self) -> Shift {
        let mut worst = Shift::Manha;
        for shift in Shift::ALL {
            if self.average(shift) < self.average(worst) {
                worst = shift;
            }
        }
        worst
    }

    fn average(&self, shift: Shift) -> f64 {
        self.shift_averages.get(&shift).copied().unwrap_or(0.0)
    }
}

/// Linear projection of the weekly total
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Projection {
    pub monthly: f64,
    pub annual: f64,
}

pub fn project(weekly_total: u64) -> Projection {
    let weekly = weekly_total as f64;
    Projection {
        monthly: weekly * WEEKS_PER_MONTH,
        annual: weekly * WEEKS_PER_YEAR,
    }
}

/// Production target derived from a monthly figure
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Target {
    pub weekly: f64,
    pub monthly: f64,
    pub annual: f64,
}

impl Target {
    /// Build from a monthly target, substituting `fallback` for non-positive values
    ///
    /// A non-positive `fallback` is replaced by [`DEFAULT_MONTHLY_TARGET`] so
    /// efficiency never divides by zero.
    pub fn from_monthly(monthly: f64, fallback: f64) -> Self {
        let fallback = if fallback > 0.0 {
            fallback
        } else {
            DEFAULT_MONTHLY_TARGET
        };
        let monthly = if monthly > 0.0 {
            monthly
        } else {
            tracing::debug!(monthly, fallback, "non-positive target, using fallback");
            fallback
        };
        Self {
            weekly: monthly / WEEKS_PER_MONTH,
            monthly,
            annual: monthly * 12.0,
        }
    }
}

impl Default for Target {
    fn default() -> Self {
        Self::from_monthly(DEFAULT_MONTHLY_TARGET, DEFAULT_MONTHLY_TARGET)
    }
}

/// How the week compares with the target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    OnTarget,
    NearTarget,
    Critical,
}

impl Tier {
    pub fn from_efficiency(efficiency: f64) -> Self {
        if efficiency >= 100.0 {
            Tier::OnTarget
        } else if efficiency >= 80.0 {
            Tier::NearTarget
        } else {
            Tier::Critical
        }
    }

    pub fn recommendation(&self) -> &'static str {
        match self {
            Tier::OnTarget => "Team is performing above target; consider raising the monthly goal",
            Tier::NearTarget => "Target is close; focus on the weakest shift to reach 100%",
            Tier::Critical => "Performance is critical; review processes and check absences",
        }
    }
}

/// Full weekly report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceReport {
    pub stats: WeeklyStats,
    pub projection: Projection,
    pub target: Target,
    /// Weekly total as a percentage of the weekly target
    pub efficiency: f64,
    /// Weekly total minus the weekly target
    pub difference: f64,
    pub best_shift: Shift,
    pub worst_shift: Shift,
    pub tier: Tier,
}

impl PerformanceReport {
    pub fn compute(entries: &[ProductionEntry], target: Target) -> Self {
        let stats = WeeklyStats::compute(entries);
        let weekly = stats.total as f64;
        let efficiency = weekly / target.weekly * 100.0;

        Self {
            projection: project(stats.total),
            efficiency,
            difference: weekly - target.weekly,
            best_shift: stats.best_shift(),
            worst_shift: stats.worst_shift(),
            tier: Tier::from_efficiency(efficiency),
            target,
            stats,
        }
    }

    pub fn above_target(&self) -> bool {
        self.difference >= 0.0
    }
}
