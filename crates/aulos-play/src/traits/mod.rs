pub mod engine;
pub mod surface;
