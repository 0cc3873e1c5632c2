pub mod error;
pub mod models;
pub mod scoreboard;
pub mod bag;
pub mod simulator;
pub mod arena;
pub mod bot_strategy;
pub mod bot_profiles;
