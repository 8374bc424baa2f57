pub mod config;
pub mod events;
pub mod game;
pub mod gui;
pub mod sys;
