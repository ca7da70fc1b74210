pub mod accession;
pub mod config;
pub mod ini;
pub mod renamer;
