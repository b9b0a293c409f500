pub mod camera;
pub mod constants;
pub mod ease;
pub mod gpu;
pub mod hero;
pub mod orientation;
pub mod pointer;
pub mod presets;
pub mod projects;
pub mod scene;
pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");

pub use camera::*;
pub use constants::*;
pub use ease::*;
pub use gpu::*;
pub use hero::*;
pub use orientation::*;
pub use pointer::*;
pub use presets::*;
pub use projects::*;
pub use scene::*;
