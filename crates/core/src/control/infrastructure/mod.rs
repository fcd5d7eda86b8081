pub mod json_lines_action_sink;
pub mod logging_action_sink;
