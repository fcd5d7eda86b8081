pub mod action;
pub mod action_dispatcher;
pub mod action_sink;
