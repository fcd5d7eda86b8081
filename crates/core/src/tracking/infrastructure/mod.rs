pub mod json_lines_landmark_source;
