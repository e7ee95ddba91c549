pub mod cli;
pub mod collage_generator;
pub mod config;
pub mod file_scanner;
pub mod layout;
pub mod metadata_extractor;
pub mod shuffle;
