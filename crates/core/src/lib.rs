pub mod detection;
pub mod media;
pub mod pipeline;
pub mod rendering;
pub mod segmentation;
pub mod shared;
