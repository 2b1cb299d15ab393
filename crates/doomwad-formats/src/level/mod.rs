//! Level topology built from a located map
//!
//! [`LevelBuilder`] decodes the structural lumps of one map into flat record
//! tables and derives the indices between them:
//!
//! - sector → linedefs, sidedefs and subsectors
//! - sidedef → linedefs and opposing sidedef
//! - segment → sidedef (none for minisegs)
//! - subsector → sector and member segments
//!
//! With glBSP v2 data present, segments, subsectors and nodes come from the
//! GL companion group and GL vertices are appended after the classic ones.
//! A build either returns a complete [`Level`] or an error; a level is never
//! partially populated.

mod builder;
pub mod error;
mod model;
pub mod types;
pub(crate) mod wire;

pub use builder::LevelBuilder;
pub use error::{LevelError, Result};
pub use model::{Level, LevelSummary};
pub use types::{
    BoundingBox, Linedef, LinedefFlags, Node, Sector, Segment, Sidedef, SubSector, Vertex,
};
pub use wire::{GL_VERTEX_FLAG, NO_INDEX, gl_coordinate, resolve_gl_vertex};
