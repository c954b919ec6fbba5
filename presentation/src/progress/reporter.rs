//! Progress reporting for fan-out execution

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use relay_application::FanOutProgress;
use relay_domain::FanOutTarget;
use std::sync::{Mutex, PoisonError};

/// Reports fan-out progress with a progress bar on stderr
pub struct ProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl FanOutProgress for ProgressReporter {
    fn on_fan_out_start(&self, total_targets: usize) {
        let pb = ProgressBar::new(total_targets as u64);
        pb.set_style(Self::style());
        pb.set_prefix("Translating");
        pb.set_message("Queued...");

        *self.bar.lock().unwrap_or_else(PoisonError::into_inner) = Some(pb);
    }

    fn on_target_complete(&self, target: &FanOutTarget, success: bool) {
        if let Some(pb) = self
            .bar
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            let status = if success {
                format!("{} {}", "v".green(), target)
            } else {
                format!("{} {}", "x".red(), target)
            };
            pb.set_message(status);
            pb.inc(1);
        }
    }

    fn on_fan_out_complete(&self) {
        if let Some(pb) = self
            .bar
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            pb.finish_and_clear();
        }
    }
}

/// Simple line-based progress for non-interactive stderr
pub struct SimpleProgress;

impl FanOutProgress for SimpleProgress {
    fn on_fan_out_start(&self, total_targets: usize) {
        eprintln!(
            "{} {} ({} targets)",
            "->".cyan(),
            "Translating".bold(),
            total_targets
        );
    }

    fn on_target_complete(&self, target: &FanOutTarget, success: bool) {
        if success {
            eprintln!("  {} {}", "v".green(), target);
        } else {
            eprintln!("  {} {} (failed)", "x".red(), target);
        }
    }

    fn on_fan_out_complete(&self) {
        eprintln!();
    }
}
