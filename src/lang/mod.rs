//! Registry-backed language vocabulary for Viper.
//!
//! The lexer and parser never compare raw spellings; they work with the stable
//! IDs defined here. Each registry also carries the metadata the parser needs
//! (for operators: precedence, associativity, fixity).

pub mod keywords;
pub mod operators;
pub mod punctuation;
