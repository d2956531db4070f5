//! Core utilities for the phpgen PHP code generator.
//!
//! This crate provides the pieces shared by the dumper, the model and the
//! printer:
//!
//! - [`Error`] / [`Result`] - the error taxonomy
//! - [`naming`] - identifier grammar, reserved words, qualified names
//! - [`builder`] - indentation-aware text assembly ([`CodeBuilder`])
//! - [`text`] - text normalisation and doc-comment formatting

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

pub mod builder;
mod error;
pub mod naming;
pub mod text;

pub use builder::{CodeBuilder, Indent};
pub use error::{Error, MemberKind, Result};
