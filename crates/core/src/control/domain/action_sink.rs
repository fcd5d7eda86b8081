use crate::control::domain::action::Action;

/// Domain interface for whatever carries out control actions
/// (OS pointer, scroll and volume backends, a recorder, ...).
///
/// Implementations report rejected commands as errors; callers decide
/// whether to continue.
pub trait ActionSink: Send {
    fn apply(&mut self, action: &Action) -> Result<(), Box<dyn std::error::Error>>;

    /// Flushes buffered output. Default: no-op.
    fn flush(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        Ok(())
    }
}
