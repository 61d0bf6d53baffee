pub mod color;
pub mod error;
pub mod frame;
pub mod video_metadata;
