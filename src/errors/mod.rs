//! Error types and error handling for the lexer.
//!
//! This module defines the error types produced while scanning. It includes:
//!
//! - Error structures with source position and snippet information
//! - Specific error variants for tokenization, structural scans and configuration
//! - Error formatting and display functionality
//! - Helpful error messages and suggestions

pub mod errors;
