pub mod direction;
pub mod headful;
pub mod input;
pub mod playtest;
pub mod round;
pub mod sequence;
pub mod session;
pub mod settings;
pub mod sfx;
pub mod view;
