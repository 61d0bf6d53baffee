pub mod batch_runner;
pub mod compose_strip_use_case;
