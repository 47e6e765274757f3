pub mod eye_detection;
pub mod face_landmark_detector;
pub mod face_observation;
pub mod landmark_projector;
pub mod normalized;
