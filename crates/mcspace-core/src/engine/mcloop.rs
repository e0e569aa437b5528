//! Nested Monte Carlo loop counters with wall-clock bookkeeping.
//!
//! ```
//! use mcspace::engine::config::LoopConfig;
//! use mcspace::engine::mcloop::McLoop;
//!
//! let mut mc = McLoop::new(&LoopConfig { macro_steps: 3, micro_steps: 4 });
//! let mut moves = 0;
//! while mc.macro_step() {
//!     while mc.micro_step() {
//!         moves += 1;
//!     }
//! }
//! assert_eq!(moves, 12);
//! assert_eq!(mc.total_micro_steps(), 12);
//! ```

use super::config::LoopConfig;
use std::time::{Duration, Instant};

/// Step counters for an arbitrary number of nested loop levels.
///
/// Level 0 is the outermost loop. Steps taken on the innermost level are accumulated
/// across all outer iterations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Counter {
    limits: Vec<usize>,
    counts: Vec<usize>,
    inner: u64,
}

impl Counter {
    pub fn new(limits: &[usize]) -> Self {
        Self {
            limits: limits.to_vec(),
            counts: vec![0; limits.len()],
            inner: 0,
        }
    }

    /// Advances `level` and returns true while it is below its limit.
    ///
    /// Once the limit is reached the level resets to zero and `false` is returned, so the
    /// enclosing `while` loop ends and the next outer iteration starts from scratch.
    /// Unknown levels always return `false`.
    pub fn step(&mut self, level: usize) -> bool {
        let innermost = self.counts.len().saturating_sub(1);
        let (Some(count), Some(&limit)) = (self.counts.get_mut(level), self.limits.get(level))
        else {
            return false;
        };
        if *count < limit {
            *count += 1;
            if level == innermost {
                self.inner += 1;
            }
            true
        } else {
            *count = 0;
            false
        }
    }

    pub fn count(&self, level: usize) -> usize {
        self.counts.get(level).copied().unwrap_or(0)
    }

    pub fn limit(&self, level: usize) -> usize {
        self.limits.get(level).copied().unwrap_or(0)
    }

    pub fn levels(&self) -> usize {
        self.limits.len()
    }

    /// Total steps taken on the innermost level.
    pub fn inner_count(&self) -> u64 {
        self.inner
    }
}

const MACRO: usize = 0;
const MICRO: usize = 1;

/// The two-level macro/micro loop of a Monte Carlo run.
#[derive(Debug, Clone)]
pub struct McLoop {
    counter: Counter,
    finished_macro: usize,
    started: Option<Instant>,
}

impl McLoop {
    pub fn new(config: &LoopConfig) -> Self {
        Self {
            counter: Counter::new(&[config.macro_steps, config.micro_steps]),
            finished_macro: 0,
            started: None,
        }
    }

    /// Starts the next macro step. The clock starts on the first call.
    pub fn macro_step(&mut self) -> bool {
        if self.started.is_none() {
            self.started = Some(Instant::now());
        }
        self.counter.step(MACRO)
    }

    /// Starts the next micro step; returns false when the current macro step is done.
    pub fn micro_step(&mut self) -> bool {
        let running = self.counter.step(MICRO);
        if !running {
            self.finished_macro += 1;
        }
        running
    }

    pub fn macro_total(&self) -> usize {
        self.counter.limit(MACRO)
    }

    pub fn micro_total(&self) -> usize {
        self.counter.limit(MICRO)
    }

    /// Macro steps whose micro loop has run to completion.
    pub fn finished_macro_steps(&self) -> usize {
        self.finished_macro
    }

    pub fn total_micro_steps(&self) -> u64 {
        self.counter.inner_count()
    }

    pub fn elapsed(&self) -> Duration {
        self.started.map(|t| t.elapsed()).unwrap_or_default()
    }

    pub fn macro_steps_per_minute(&self) -> f64 {
        let minutes = self.elapsed().as_secs_f64() / 60.0;
        if minutes > 0.0 {
            self.finished_macro as f64 / minutes
        } else {
            0.0
        }
    }

    /// Remaining macro steps times the mean duration of a finished one.
    ///
    /// `None` until the first macro step has finished.
    pub fn eta(&self) -> Option<Duration> {
        if self.finished_macro == 0 {
            return None;
        }
        let remaining = self.macro_total().saturating_sub(self.finished_macro);
        let per_step = self.elapsed().as_secs_f64() / self.finished_macro as f64;
        Some(Duration::from_secs_f64(per_step * remaining as f64))
    }

    /// One-line status for logging after each macro step.
    pub fn timing(&self) -> String {
        let eta = self
            .eta()
            .map(format_duration)
            .unwrap_or_else(|| "n/a".to_string());
        format!(
            "macro step {}/{} | {:.2} steps/min | ETA {}",
            self.finished_macro,
            self.macro_total(),
            self.macro_steps_per_minute(),
            eta
        )
    }

    pub fn info(&self) -> String {
        let minutes = self.elapsed().as_secs_f64() / 60.0;
        let mut out = String::from("Monte Carlo loop\n");
        out.push_str(&format!(
            "  {:<18} = {} x {} = {}\n",
            "Steps",
            self.macro_total(),
            self.micro_total(),
            self.macro_total() as u64 * self.micro_total() as u64
        ));
        out.push_str(&format!(
            "  {:<18} = {}\n",
            "Micro steps taken",
            self.total_micro_steps()
        ));
        out.push_str(&format!(
            "  {:<18} = {:.3} min ({:.4} h)\n",
            "Time elapsed",
            minutes,
            minutes / 60.0
        ));
        out
    }
}

fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs / 60) % 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_step_returns_true_until_limit_then_resets() {
        let mut counter = Counter::new(&[3]);
        assert!(counter.step(0));
        assert!(counter.step(0));
        assert!(counter.step(0));
        assert_eq!(counter.count(0), 3);
        assert!(!counter.step(0));
        assert_eq!(counter.count(0), 0);
        assert!(counter.step(0));
    }

    #[test]
    fn counter_accumulates_innermost_steps_across_outer_iterations() {
        let mut counter = Counter::new(&[2, 3, 4]);
        let mut body = 0;
        while counter.step(0) {
            while counter.step(1) {
                while counter.step(2) {
                    body += 1;
                }
            }
        }
        assert_eq!(body, 24);
        assert_eq!(counter.inner_count(), 24);
        assert_eq!(counter.levels(), 3);
    }

    #[test]
    fn counter_with_zero_limit_never_runs() {
        let mut counter = Counter::new(&[0]);
        assert!(!counter.step(0));
        assert_eq!(counter.inner_count(), 0);
    }

    #[test]
    fn counter_unknown_level_returns_false() {
        let mut counter = Counter::new(&[5]);
        assert!(!counter.step(1));
        assert_eq!(counter.count(1), 0);
        assert_eq!(counter.limit(1), 0);
    }

    #[test]
    fn mcloop_runs_macro_times_micro_steps() {
        let mut mc = McLoop::new(&LoopConfig {
            macro_steps: 5,
            micro_steps: 7,
        });
        let mut finished = Vec::new();
        while mc.macro_step() {
            while mc.micro_step() {}
            finished.push(mc.finished_macro_steps());
        }
        assert_eq!(finished, vec![1, 2, 3, 4, 5]);
        assert_eq!(mc.total_micro_steps(), 35);
    }

    #[test]
    fn eta_is_unknown_before_first_macro_step_finishes() {
        let mut mc = McLoop::new(&LoopConfig::default());
        assert_eq!(mc.elapsed(), Duration::ZERO);
        assert!(mc.eta().is_none());
        assert!(mc.macro_step());
        assert!(mc.eta().is_none());
        assert!(mc.timing().contains("ETA n/a"));
    }

    #[test]
    fn eta_is_zero_when_all_macro_steps_are_done() {
        let mut mc = McLoop::new(&LoopConfig {
            macro_steps: 2,
            micro_steps: 1,
        });
        while mc.macro_step() {
            while mc.micro_step() {}
        }
        assert_eq!(mc.eta(), Some(Duration::ZERO));
        assert!(mc.timing().starts_with("macro step 2/2"));
    }

    #[test]
    fn info_reports_step_totals() {
        let mc = McLoop::new(&LoopConfig {
            macro_steps: 10,
            micro_steps: 1000,
        });
        let info = mc.info();
        assert!(info.contains("10 x 1000 = 10000"));
        assert!(info.contains("Time elapsed"));
    }

    #[test]
    fn format_duration_uses_hours_minutes_seconds() {
        assert_eq!(format_duration(Duration::from_secs(3_725)), "01:02:05");
        assert_eq!(format_duration(Duration::ZERO), "00:00:00");
    }
}
