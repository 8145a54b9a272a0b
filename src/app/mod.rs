pub mod action;
pub mod command;
pub mod command_palette;
pub mod config;
pub mod editor;
pub mod features;
pub mod handler;
pub mod input;
pub mod keymap;
pub mod r#loop;
pub mod reducer;
pub mod state;
pub mod ui;
