//! CLI command implementations.
//!
//! This module contains the implementations for the various CLI subcommands:
//! - `points` - Print or draw a single scribble's points
//! - `samples` - A grid of the three variants under three rule sets
//! - `spiral` - Rotated copies of a stretched scribble
//! - `tunnel` - Nested, shrinking closed scribbles
//! - `rain` - Raindrops and their reflections
//! - `shards` - Recursive filled shards
//! - `worm` - A chain of growing dots
//! - `grass` - A ring of fading grass blades
//! - `recipe` - Layered drawings from a YAML file

pub mod common;
pub mod grass;
pub mod points;
pub mod rain;
pub mod recipe;
pub mod samples;
pub mod shards;
pub mod spiral;
pub mod tunnel;
pub mod worm;

pub use common::GlobalArgs;
