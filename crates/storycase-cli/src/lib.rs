pub mod config;
pub mod generate;
pub mod preflight;
pub mod session;
