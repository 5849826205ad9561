pub mod autosave;
pub mod commands;
pub mod config;
pub mod errors;
pub mod media;
pub mod models;
pub mod persistence;
pub mod session;
pub mod storage;
pub mod store;
pub mod validation;
