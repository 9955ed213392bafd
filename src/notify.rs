//! Transient user-notification collaborators.
//!
//! The core never talks to a widget toolkit directly. Failures that the
//! user must see (a detail fetch or rating submission going wrong) are
//! routed through a [`Notifier`] supplied by the surrounding application.

use std::io;

/// A channel that can surface one-shot messages to the user.
pub trait Notifier: Send + Sync {
    /// Surfaces a transient error message.
    fn error(&self, message: &str);
}

/// Notifier that drops all messages.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn error(&self, _message: &str) {}
}

/// Notifier that writes messages to stderr, one per line.
///
/// This is the CLI's stand-in for the toast notifications a graphical
/// front end would show.
#[derive(Debug, Default)]
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn error(&self, message: &str) {
        let _ignored = writeln_stderr(message);
    }
}

fn writeln_stderr(message: &str) -> io::Result<()> {
    use io::Write;

    let mut stderr = io::stderr().lock();
    writeln!(stderr, "{message}")
}


#[cfg(test)]
mod tests {
    use super::test_support::RecordingNotifier;
    use super::{Notifier, NoopNotifier};

    #[test]
    fn recording_notifier_captures_messages() {
        let notifier = RecordingNotifier::default();
        notifier.error("first");
        notifier.error("second");

        assert_eq!(notifier.take(), vec!["first".to_owned(), "second".to_owned()]);
        assert_eq!(notifier.len(), 0);
    }

    #[test]
    fn noop_notifier_accepts_messages() {
        NoopNotifier.error("dropped");
    }
}
