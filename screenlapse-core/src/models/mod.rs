pub mod config;
pub mod error;
pub mod frame;
pub mod state;
pub mod template;
