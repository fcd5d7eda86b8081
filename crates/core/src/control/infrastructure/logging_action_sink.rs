use crate::control::domain::action::Action;
use crate::control::domain::action_sink::ActionSink;

/// Dry-run sink: logs every action instead of driving the OS.
///
/// Cursor moves and volume levels arrive every frame, so they are logged at
/// debug level; discrete actions go to info.
#[derive(Default)]
pub struct LoggingActionSink;

impl LoggingActionSink {
    pub fn new() -> Self {
        Self
    }

    fn is_continuous(action: &Action) -> bool {
        matches!(action, Action::MoveCursor { .. } | Action::SetVolume { .. })
    }
}

impl ActionSink for LoggingActionSink {
    fn apply(&mut self, action: &Action) -> Result<(), Box<dyn std::error::Error>> {
        if Self::is_continuous(action) {
            log::debug!("{action}");
        } else {
            log::info!("{action}");
        }
        Ok(())
    }
}
