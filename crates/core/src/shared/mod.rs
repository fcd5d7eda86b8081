pub mod bounding_box;
pub mod constants;
pub mod frame_dimensions;
pub mod gesture_config;
pub mod landmark_frame;
pub mod math;
#[cfg(test)]
pub(crate) mod test_fixtures;
