use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::warn;
use xyseries::engine::progress::{Progress, ProgressCallback};
use xyseries::workflows::histogram::PHASES;

const SPINNER_TICK_MS: u64 = 80;
const SPINNER_TICKS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "✓"];

/// Shows the phases of a histogram run on stderr.
///
/// Each phase gets a `[n/3]` prefix. Phases that stream samples switch to a bar counting
/// samples, the others keep a spinner. Notes from the workflow, such as samples that
/// fell outside the bins, are printed above the bar.
#[derive(Clone)]
pub struct CliProgressHandler {
    display: Arc<Mutex<PhaseDisplay>>,
}

struct PhaseDisplay {
    bar: ProgressBar,
}

impl PhaseDisplay {
    fn apply(&self, event: Progress) {
        let bar = &self.bar;
        match event {
            Progress::PhaseStart { name } => {
                bar.reset();
                bar.set_length(0);
                bar.set_style(spinner_style());
                bar.set_prefix(phase_label(name));
                bar.set_message("");
                bar.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
            }
            Progress::TaskStart { total_steps } => {
                bar.disable_steady_tick();
                bar.set_style(sample_bar_style());
                bar.set_length(total_steps);
                bar.set_position(0);
            }
            Progress::TaskAdvance { steps } => bar.inc(steps),
            Progress::TaskFinish => {
                if let Some(total) = bar.length() {
                    bar.set_position(total);
                }
            }
            Progress::Message(note) => bar.println(format!("  ! {}", note)),
            Progress::PhaseFinish => {
                bar.disable_steady_tick();
                bar.finish();
            }
        }
    }
}

/// `[n/total] name` for the known workflow phases, the bare name otherwise.
fn phase_label(name: &str) -> String {
    match PHASES.iter().position(|&phase| phase == name) {
        Some(index) => format!("[{}/{}] {}", index + 1, PHASES.len(), name),
        None => name.to_string(),
    }
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.green} {prefix} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(SPINNER_TICKS)
}

fn sample_bar_style() -> ProgressStyle {
    ProgressStyle::with_template(
        "{prefix:<28} [{bar:40.cyan/blue}] {human_pos}/{human_len} samples ({per_sec})",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .progress_chars("=> ")
}

impl CliProgressHandler {
    pub fn new() -> Self {
        let bar = ProgressBar::with_draw_target(Some(0), ProgressDrawTarget::stderr());
        Self {
            display: Arc::new(Mutex::new(PhaseDisplay { bar })),
        }
    }

    /// Callback to hand to a `ProgressReporter`.
    pub fn callback(&self) -> ProgressCallback<'static> {
        let display = self.display.clone();
        Box::new(move |event: Progress| match display.lock() {
            Ok(display) => display.apply(event),
            Err(_) => warn!("Progress display mutex was poisoned; dropping {:?}.", event),
        })
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use xyseries::workflows::histogram::{PHASE_BIN, PHASE_SCAN, PHASE_WRITE};

    fn bar(handler: &CliProgressHandler) -> ProgressBar {
        handler.display.lock().unwrap().bar.clone()
    }

    #[test]
    fn labels_number_the_workflow_phases() {
        assert_eq!(phase_label(PHASE_SCAN), "[1/3] Scanning samples");
        assert_eq!(phase_label(PHASE_WRITE), "[3/3] Writing histogram");
        assert_eq!(phase_label("Warm-up"), "Warm-up");
    }

    #[test]
    fn binning_phase_counts_samples() {
        let handler = CliProgressHandler::new();
        let callback = handler.callback();

        callback(Progress::PhaseStart { name: PHASE_BIN });
        assert_eq!(bar(&handler).prefix(), "[2/3] Binning samples");
        assert!(!bar(&handler).is_finished());

        callback(Progress::TaskStart { total_steps: 10_000 });
        callback(Progress::TaskAdvance { steps: 4096 });
        callback(Progress::TaskAdvance { steps: 4096 });
        assert_eq!(bar(&handler).length(), Some(10_000));
        assert_eq!(bar(&handler).position(), 8192);

        callback(Progress::TaskFinish);
        assert_eq!(bar(&handler).position(), 10_000);

        callback(Progress::Message("5 of 10000 samples fell outside the bins".into()));
        assert_eq!(bar(&handler).position(), 10_000);

        callback(Progress::PhaseFinish);
        assert!(bar(&handler).is_finished());
    }

    #[test]
    fn next_phase_starts_from_a_clean_spinner() {
        let handler = CliProgressHandler::new();
        let callback = handler.callback();

        callback(Progress::PhaseStart { name: PHASE_BIN });
        callback(Progress::TaskStart { total_steps: 6 });
        callback(Progress::TaskAdvance { steps: 6 });
        callback(Progress::PhaseFinish);

        callback(Progress::PhaseStart { name: PHASE_WRITE });
        let bar = bar(&handler);
        assert_eq!(bar.prefix(), "[3/3] Writing histogram");
        assert_eq!(bar.length(), Some(0));
        assert_eq!(bar.position(), 0);
        assert!(!bar.is_finished());
    }

    #[test]
    fn callback_can_run_on_another_thread() {
        let handler = CliProgressHandler::new();
        let callback = handler.callback();

        thread::spawn(move || {
            callback(Progress::PhaseStart { name: PHASE_SCAN });
            callback(Progress::PhaseFinish);
        })
        .join()
        .unwrap();

        assert!(bar(&handler).is_finished());
        assert_eq!(bar(&handler).prefix(), "[1/3] Scanning samples");
    }
}
