pub mod adapter;
pub mod config;
pub mod controls;
pub mod native;
pub mod path;
pub mod session;
pub mod transport;
