pub mod canvas;
pub mod crop;
pub mod reducer;
pub mod upscale;
