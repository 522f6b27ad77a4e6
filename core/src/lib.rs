//! Board engine for minesweeper: mine placement, flood reveal, chording, flag bookkeeping, and
//! win/loss detection. Rendering and input handling belong to the embedding application, which
//! drives a [`PlayEngine`] with one action at a time.
#![no_std]

extern crate alloc;

pub use board::*;
pub use config::*;
pub use engine::*;
pub use error::*;
pub use flags::*;
pub use generator::*;
pub use outcome::*;
pub use reveal::*;
pub use tile::*;
pub use types::*;

mod board;
mod config;
mod engine;
mod error;
mod flags;
mod generator;
mod outcome;
mod reveal;
mod tile;
mod types;
