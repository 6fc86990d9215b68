//! Console notices and session summaries

use colored::Colorize;
use notegpt_application::ports::notification::NotificationChannel;
use notegpt_application::{SessionEnd, SessionReport};

/// Shows user-facing notices on stderr
///
/// stdout is left alone so the summary can be piped.
pub struct ConsoleNotifier;

impl NotificationChannel for ConsoleNotifier {
    fn notify(&self, message: &str) {
        eprintln!("{} {}", "!".yellow().bold(), message.yellow());
    }
}

/// Formats session results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// One-line summary of a finished session
    pub fn format(report: &SessionReport) -> String {
        let status = match &report.end {
            SessionEnd::Completed => "v Reply written".green().bold(),
            SessionEnd::MissingCredential => "x No API key configured".red().bold(),
            SessionEnd::Disconnected => "! Stream ended before the reply finished".yellow().bold(),
            SessionEnd::TransportFailed(message) => {
                format!("x Request failed: {}", message).red().bold()
            }
        };

        let mut details = vec![format!("{} appended", report.appended)];
        if report.dropped > 0 {
            details.push(format!("{} dropped", report.dropped));
        }
        if report.decode_errors > 0 {
            details.push(format!("{} undecodable", report.decode_errors));
        }

        format!("{} {}", status, format!("({})", details.join(", ")).dimmed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notegpt_domain::SessionPhase;

    fn report(end: SessionEnd, appended: usize, dropped: usize, decode_errors: usize) -> SessionReport {
        SessionReport {
            end,
            phases: vec![SessionPhase::Idle, SessionPhase::Closed],
            appended,
            dropped,
            decode_errors,
        }
    }

    #[test]
    fn test_completed_summary() {
        colored::control::set_override(false);
        let line = ConsoleFormatter::format(&report(SessionEnd::Completed, 5, 0, 0));
        assert_eq!(line, "v Reply written (5 appended)");
    }

    #[test]
    fn test_failure_summary_lists_losses() {
        colored::control::set_override(false);
        let line = ConsoleFormatter::format(&report(
            SessionEnd::TransportFailed("HTTP 401: bad key".to_string()),
            1,
            2,
            3,
        ));
        assert_eq!(
            line,
            "x Request failed: HTTP 401: bad key (1 appended, 2 dropped, 3 undecodable)"
        );
    }
}
