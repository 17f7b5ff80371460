pub mod config;
pub mod context;
pub mod country;
pub mod game;
pub mod player;
pub mod player_path;
pub mod position;
pub mod strategies;
pub mod world;
