pub mod control_hands_use_case;
mod frame_processor;
pub mod infrastructure;
pub mod pipeline_executor;
pub mod session_logger;
