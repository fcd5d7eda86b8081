pub mod classifier;
pub mod gesture_interpreter;
pub mod gesture_session;
pub mod hysteresis_latch;
pub mod pointer_smoother;
pub mod screen_mapper;
pub mod scroll_tracker;
pub mod volume_mapper;
