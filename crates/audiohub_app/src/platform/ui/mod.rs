pub mod render;
pub mod screen;
