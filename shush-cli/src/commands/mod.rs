//! CLI Commands

pub mod decrypt;
pub mod encrypt;
pub mod generate;
pub mod merge;
pub mod split;
