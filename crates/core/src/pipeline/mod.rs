pub mod analysis_error;
pub mod analyze_photo_use_case;
pub mod detect_eyes_use_case;
pub mod extract_hair_mask_use_case;
