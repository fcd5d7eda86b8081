use crate::control::domain::action::Action;
use crate::control::domain::action_sink::ActionSink;

/// Forwards one frame's actions to the sink, in order.
///
/// Stops at the first rejected action and returns its error. Gesture state
/// is never touched here, so a failing sink cannot desynchronize it.
pub struct ActionDispatcher {
    sink: Box<dyn ActionSink>,
}

impl ActionDispatcher {
    pub fn new(sink: Box<dyn ActionSink>) -> Self {
        Self { sink }
    }

    pub fn dispatch(&mut self, actions: &[Action]) -> Result<(), Box<dyn std::error::Error>> {
        for action in actions {
            log::trace!("dispatch: {action}");
            self.sink.apply(action)?;
        }
        Ok(())
    }

    pub fn finish(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.sink.flush()
    }
}
