mod use_key_commands;
mod use_pointer_tracking;
mod use_scene_config;

pub use use_key_commands::use_key_commands;
pub use use_pointer_tracking::{canvas_point, use_pointer_tracking};
pub use use_scene_config::use_scene_config;
