pub mod api;
pub mod app;
pub mod area;
pub mod catalog;
pub mod config;
pub mod shared;
pub mod validation;
pub mod wizard;
