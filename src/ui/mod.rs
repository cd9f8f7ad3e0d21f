pub mod app;
pub mod chart;
pub mod components;
pub mod state;
