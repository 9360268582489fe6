pub mod blend;
pub mod constants;
pub mod gesture;
pub mod hud;
pub mod mesh;
pub mod pose;
pub mod scroll;

pub static AIRCRAFT_WGSL: &str = include_str!("../shaders/aircraft.wgsl");

pub use blend::*;
pub use constants::*;
pub use gesture::*;
pub use mesh::*;
pub use pose::*;
pub use scroll::*;
