pub mod plan;
pub mod window;
