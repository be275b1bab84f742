//! Main module for the episteme token pipeline

pub mod config;
pub mod lexing;
pub mod testing;
pub mod token;
pub mod transforms;
