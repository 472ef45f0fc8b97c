mod prefabs;

pub use prefabs::{load_demo_level, spawn_enemy, spawn_player, DemoLevel};
