//! Daily wallpaper rotation over a directory of images.

pub mod common;
pub mod config;
pub mod rotate;
pub mod rotation;
pub mod ui;
pub mod wallpaper;
