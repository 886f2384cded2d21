pub mod colors;
pub mod hook;
pub mod image;
pub mod log;
pub mod task;
