//! Simulation report generation.

use crate::games::GameKind;
use std::collections::BTreeMap;

/// Outcome of one simulated run.
#[derive(Debug, Clone, Default)]
pub struct RunStats {
    pub ticks: u64,
    pub score: u32,
    pub scoring_events: u32,
    pub level: u32,
    pub final_interval_ms: u64,
    pub final_speed: f64,
    /// Still alive when the tick limit was reached.
    pub timed_out: bool,
    /// Tick at which each level was reached, in order.
    pub level_up_ticks: Vec<u64>,
}

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone)]
pub struct SimReport {
    pub game: GameKind,
    pub difficulty: &'static str,
    pub num_runs: u32,
    pub runs_timed_out: u32,

    pub avg_score: f64,
    pub median_score: u32,
    pub best_score: u32,
    pub avg_ticks: f64,
    pub avg_level: f64,
    pub avg_final_interval_ms: f64,
    pub avg_final_speed: f64,

    /// Final level -> number of runs.
    pub level_distribution: BTreeMap<u32, u32>,
    /// Average tick at which level N (1-based) was reached, over runs that reached it.
    pub avg_ticks_to_level: Vec<f64>,

    pub run_stats: Vec<RunStats>,
}

fn mean(values: impl Iterator<Item = f64>, count: usize) -> f64 {
    values.sum::<f64>() / count.max(1) as f64
}

impl SimReport {
    pub fn from_runs(game: GameKind, difficulty: &'static str, runs: Vec<RunStats>) -> Self {
        let n = runs.len();
        let num_runs = n as u32;
        let runs_timed_out = runs.iter().filter(|r| r.timed_out).count() as u32;

        let avg_score = mean(runs.iter().map(|r| r.score as f64), n);
        let median_score = {
            let mut sorted: Vec<u32> = runs.iter().map(|r| r.score).collect();
            sorted.sort_unstable();
            sorted.get(sorted.len() / 2).copied().unwrap_or(0)
        };
        let best_score = runs.iter().map(|r| r.score).max().unwrap_or(0);
        let avg_ticks = mean(runs.iter().map(|r| r.ticks as f64), n);
        let avg_level = mean(runs.iter().map(|r| r.level as f64), n);
        let avg_final_interval_ms = mean(runs.iter().map(|r| r.final_interval_ms as f64), n);
        let avg_final_speed = mean(runs.iter().map(|r| r.final_speed), n);

        let mut level_distribution = BTreeMap::new();
        for run in &runs {
            *level_distribution.entry(run.level).or_insert(0) += 1;
        }

        let max_level = runs.iter().map(|r| r.level_up_ticks.len()).max().unwrap_or(0);
        let avg_ticks_to_level = (0..max_level)
            .map(|i| {
                let reached: Vec<f64> = runs
                    .iter()
                    .filter_map(|r| r.level_up_ticks.get(i).map(|&t| t as f64))
                    .collect();
                mean(reached.iter().copied(), reached.len())
            })
            .collect();

        Self {
            game,
            difficulty,
            num_runs,
            runs_timed_out,
            avg_score,
            median_score,
            best_score,
            avg_ticks,
            avg_level,
            avg_final_interval_ms,
            avg_final_speed,
            level_distribution,
            avg_ticks_to_level,
            run_stats: runs,
        }
    }

    /// One-line summary for `--quiet`.
    pub fn summary_line(&self) -> String {
        format!(
            "{} [{}] runs={} avg_score={:.1} median={} best={} avg_ticks={:.0} avg_level={:.2} timeouts={}",
            self.game.key(),
            self.difficulty,
            self.num_runs,
            self.avg_score,
            self.median_score,
            self.best_score,
            self.avg_ticks,
            self.avg_level,
            self.runs_timed_out
        )
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str(&format!(
            "                 {} ({})\n",
            self.game.name(),
            self.difficulty
        ));
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {} total, {} timed out\n\n",
            self.num_runs, self.runs_timed_out
        ));

        report.push_str("── SCORE ────────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Score:           {:.1}\n", self.avg_score));
        report.push_str(&format!("  Median Score:        {}\n", self.median_score));
        report.push_str(&format!("  Best Score:          {}\n", self.best_score));
        report.push_str(&format!("  Avg Run Length:      {:.0} ticks\n\n", self.avg_ticks));

        report.push_str("── PACE ─────────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Final Level:     {:.2}\n", self.avg_level));
        report.push_str(&format!(
            "  Avg Final Interval:  {:.1} ms\n",
            self.avg_final_interval_ms
        ));
        report.push_str(&format!("  Avg Final Speed:     {:.2}x\n\n", self.avg_final_speed));

        report.push_str("── LEVEL DISTRIBUTION ───────────────────────────────────────────\n");
        for (level, count) in &self.level_distribution {
            let pct = (*count as f64 / self.num_runs.max(1) as f64) * 100.0;
            let bar: String = "█".repeat((pct / 5.0) as usize);
            report.push_str(&format!("  Level {:2}: {:>5.1}% {}\n", level, pct, bar));
        }
        report.push('\n');

        if !self.avg_ticks_to_level.is_empty() {
            report.push_str("── LEVEL MILESTONES ─────────────────────────────────────────────\n");
            for (i, ticks) in self.avg_ticks_to_level.iter().enumerate() {
                report.push_str(&format!("  Level {:2} @ {:.0} ticks\n", i + 1, ticks));
            }
            report.push('\n');
        }

        report.push_str("── BALANCE ASSESSMENT ───────────────────────────────────────────\n");
        let rating = if self.avg_level < 1.0 {
            "TOO HARD - Most runs end before the first level up"
        } else if self.avg_level < 4.0 {
            "GOOD - Runs reach a few levels"
        } else {
            "TOO EASY - Autopilot climbs levels freely"
        };
        report.push_str(&format!("  Rating: {}\n", rating));
        if self.runs_timed_out > 0 {
            report.push_str(&format!(
                "  ⚠️  {} runs hit the tick limit - raise --max-ticks?\n",
                self.runs_timed_out
            ));
        }

        report
    }
}
