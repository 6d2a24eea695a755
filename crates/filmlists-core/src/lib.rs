//! Core logic for the custom film lists service.
//!
//! Every mutating operation follows the same read-modify-write protocol:
//! fetch the curator's document, validate its shape, locate the target by a
//! linear scan, apply one mutation and overwrite the whole document.
#![allow(missing_docs, clippy::doc_markdown, clippy::module_name_repetitions)]

pub mod catalog;
pub mod config;
pub mod error;
pub mod handler;
pub mod provider;
pub mod storage;
pub mod validation;
