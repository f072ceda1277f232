pub mod config;
pub mod review;
pub mod scoring;
