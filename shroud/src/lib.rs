// shroud/src/lib.rs
//! # Shroud CLI
//!
//! This crate provides the command-line interface for the Shroud masking
//! pipeline. The detection and masking logic lives in `shroud-core`; this
//! crate is argument parsing, logging bootstrap, and input/output plumbing.

pub mod cli;
pub mod commands;
pub mod logger;
