//! Client library for the central-api: typed HTTP calls, the fleet board
//! session and debounced note autosave. Rendering is left to the front-end.

pub mod api;
pub mod autosave;
pub mod board;
pub mod config;
pub mod notice;
pub mod types;
