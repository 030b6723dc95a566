pub mod batch;
pub mod config;
pub mod loader;
pub mod model;
pub mod sample;
pub mod supabase;
