pub mod app;
pub mod config;
pub mod dom;
pub mod engine;
pub mod net;
pub mod ui;

#[cfg(test)]
mod testing;
