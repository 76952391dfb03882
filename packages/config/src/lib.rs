// ABOUTME: Configuration package for the knowledge base
// ABOUTME: Exposes environment variable names and their defaults

pub mod constants;

pub use constants::*;
