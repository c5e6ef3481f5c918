pub mod ask;
pub mod completions;
pub mod config;
pub mod doctor;
