pub mod api;
pub mod cache;
pub mod coach;
pub mod config;
pub mod data;
pub mod error;
pub mod matching;
pub mod models;
pub mod render;
pub mod routes;
