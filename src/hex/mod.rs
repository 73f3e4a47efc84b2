//! Decorative hex-dump background.
//!
//! Every hex refresh tick draws a brand-new pane from a fresh seed. Lines have
//! no identity across ticks; within one tick the seed fully determines them.

mod core;

pub use core::{BANNER_TAG, HexLine, HexPane, Lcg, clock_seed};
