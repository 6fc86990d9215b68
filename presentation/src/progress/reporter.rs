//! Progress reporting for streaming sessions

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use notegpt_application::ports::session_observer::SessionObserver;
use notegpt_domain::SessionPhase;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Shows a spinner while a session connects and streams
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
    received: AtomicUsize,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
            received: AtomicUsize::new(0),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn phase_display_name(phase: SessionPhase) -> &'static str {
        match phase {
            SessionPhase::Idle => "Idle",
            SessionPhase::Connecting => "Connecting",
            SessionPhase::Streaming => "Streaming",
            SessionPhase::Closed => "Done",
        }
    }

    /// Characters written to the document so far
    pub fn received(&self) -> usize {
        self.received.load(Ordering::Relaxed)
    }

    fn with_spinner(&self, f: impl FnOnce(&mut Option<ProgressBar>)) {
        if let Ok(mut spinner) = self.spinner.lock() {
            f(&mut spinner);
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionObserver for ProgressReporter {
    fn on_phase(&self, phase: SessionPhase) {
        let name = Self::phase_display_name(phase);
        self.with_spinner(|spinner| match phase {
            SessionPhase::Idle => {}
            SessionPhase::Connecting => {
                let pb = ProgressBar::new_spinner();
                pb.set_style(Self::spinner_style());
                pb.set_prefix(name);
                pb.set_message("waiting for the endpoint...");
                pb.enable_steady_tick(Duration::from_millis(100));
                *spinner = Some(pb);
            }
            SessionPhase::Streaming => {
                if let Some(pb) = spinner.as_ref() {
                    pb.set_prefix(name);
                    pb.set_message("receiving reply...");
                }
            }
            SessionPhase::Closed => {
                if let Some(pb) = spinner.take() {
                    pb.finish_with_message(format!("{}", name.green()));
                }
            }
        });
    }

    fn on_fragment(&self, text: &str) {
        let total = self
            .received
            .fetch_add(text.chars().count(), Ordering::Relaxed)
            + text.chars().count();
        self.with_spinner(|spinner| {
            if let Some(pb) = spinner.as_ref() {
                pb.set_message(format!("{} chars written", total));
            }
        });
    }
}
