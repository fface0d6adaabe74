//! # Tagspace Library
//!
//! Low-dimensional embeddings from categorical tag sets.
//! Provides one-shot batch fitting, probabilistic similarity retrieval
//! (ranked top-k and weighted sampling), and a compact binary export.

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod export;
pub mod fit;
pub mod logger;
pub mod reduce;
pub mod store;
pub mod types;
pub mod vocab;
