pub mod detection_request;
pub mod json_landmark_detector;
