//! Doom WAD archive reader and level topology builder
//!
#![allow(clippy::float_cmp)] // Test comparisons against exact fixture values
#![allow(clippy::uninlined_format_args)] // Matches log statement style
//! This crate reads the lump archives used by Doom-engine games and turns
//! their map lumps into cross-referenced level data.
//!
//! # Layers
//!
//! - **wad**: header and lump directory, lump lookup and bounded lump reads
//! - **map**: map detection over the directory, including Hexen, text maps
//!   and glBSP v2 companion groups
//! - **level**: record decoding and index derivation for one map
//! - **geometry**: points and lines shared by the level records
//!
//! # Example
//!
//! ```rust,no_run
//! use doomwad_formats::{LevelBuilder, WadArchive};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let archive = WadArchive::open("doom2.wad")?;
//! for map in archive.maps() {
//!     let level = LevelBuilder::new(&archive, map).build()?;
//!     println!("{}", level.summary());
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod geometry;
pub mod level;
pub mod map;
pub mod wad;

pub use geometry::{Line, Point2};
pub use level::{Level, LevelBuilder, LevelError, LevelSummary};
pub use map::{MapDescriptor, MapFormat, NodesFormat, locate_maps};
pub use wad::{ArchiveOptions, WadArchive, WadError, WadKind};
