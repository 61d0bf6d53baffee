//! Frame sampling and strip compositing: turns a video into a single
//! still image with one uniform-color strip per sampled frame.
//!
//! The pipeline plans which frames to sample ([`sampling`]), reduces each
//! frame to its average color over a centered crop ([`compose`]), grows a
//! one-column-per-frame canvas, upscales it with hard edges, and hands
//! the result to an image writer. I/O lives behind the traits in
//! [`video::domain`]; ffmpeg and the `image` crate provide the concrete
//! implementations in [`video::infrastructure`].

pub mod compose;
pub mod config;
pub mod pipeline;
pub mod sampling;
pub mod shared;
pub mod video;
