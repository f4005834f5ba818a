pub mod api;
pub mod client;
pub mod clipboard;
pub mod config;
pub mod data_models;
pub mod error;
pub mod session;
pub mod upstream;
pub mod view;
