//! Windowed client: winit/pixels through `engine::app`, rodio for sound.

pub mod audio;
pub mod client;
pub mod input_adapter;
pub mod screens;

pub use client::{HeadfulFrontend, HeadfulGame};
pub use input_adapter::Command;
