//! Run reporting for the CLI.
//!
//! Wraps the resolve phase in a spinner, with a log-only mode where the
//! spinner is hidden and phase boundaries go to stderr instead, so tailed
//! logs still show where a run is.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::models::ResolutionStats;

static LOG_ONLY: AtomicBool = AtomicBool::new(false);

/// Set log-only mode globally
pub fn set_log_only(value: bool) {
    LOG_ONLY.store(value, Ordering::Relaxed);
}

/// Check if log-only mode is enabled
pub fn is_log_only() -> bool {
    LOG_ONLY.load(Ordering::Relaxed)
}

/// Spinner shown while a request list resolves, finished with the per-tier
/// match breakdown.
pub struct ResolveProgress {
    bar: ProgressBar,
    total: usize,
}

impl ResolveProgress {
    pub fn start(total: usize) -> Self {
        let bar = ProgressBar::new_spinner();
        if is_log_only() {
            bar.set_draw_target(ProgressDrawTarget::hidden());
            eprintln!("[resolve] {} requests", total);
        } else {
            bar.set_style(
                ProgressStyle::default_spinner()
                    .template("{msg} {spinner} [{elapsed_precise}]")
                    .unwrap(),
            );
            bar.enable_steady_tick(Duration::from_millis(100));
        }
        bar.set_message(format!("Resolving {} requests", total));
        Self { bar, total }
    }

    pub fn finish(&self, stats: &ResolutionStats) {
        let summary = format!(
            "Resolved {}/{} ({} strict, {} loose, {} rescued by fallback)",
            stats.resolved, self.total, stats.strict_matches, stats.loose_matches,
            stats.fallback_rescues
        );
        if is_log_only() {
            eprintln!("[resolve] {}", summary);
        } else {
            self.bar.finish_with_message(summary);
        }
    }
}

/// Format an elapsed run time for the end-of-run banner.
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();
    if secs >= 3600 {
        format!("{}h{:02}m", secs / 3600, (secs % 3600) / 60)
    } else if secs >= 60 {
        format!("{}m{:02}s", secs / 60, secs % 60)
    } else {
        format!("{:.1}s", d.as_secs_f64())
    }
}
