pub mod control;
pub mod gesture;
pub mod pipeline;
pub mod shared;
pub mod tracking;
