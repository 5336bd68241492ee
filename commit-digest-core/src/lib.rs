#![doc = "commit-digest-core: core logic library for commit-digest."]

//! This crate holds the line-classification and segmentation engine that
//! splits a `git log -p` dump into per-commit buffers and bounded-size chunks,
//! plus the collaborator traits and default implementations around it.
//!
//! # Usage
//! - [`segment::segment`] and [`chunk::chunk`] are the pure core.
//! - [`pipeline::digest`] runs the whole read → segment → chunk → write → summarise flow.

pub mod chunk;
pub mod config;
pub mod contract;
pub mod error;
pub mod log_reader;
pub mod matcher;
pub mod pipeline;
pub mod segment;
pub mod writer;
