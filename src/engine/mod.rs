// Engine module - core systems for the game client

pub mod assets;
pub mod game_loop;
pub mod hsm;
pub mod renderer;
pub mod scene;
pub mod tiled;
