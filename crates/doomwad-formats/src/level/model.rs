//! Built level and its cross-reference indices

use crate::geometry::Line;
use crate::level::error::{LevelError, Result};
use crate::level::types::{Linedef, Node, Sector, Segment, Sidedef, SubSector, Vertex};
use crate::map::{MapFormat, NodesFormat};
use serde::Serialize;
use std::fmt;

/// A fully decoded map
///
/// All records live in flat tables and refer to each other by index. The
/// derived indices are computed once by [`LevelBuilder`](super::LevelBuilder)
/// and every index they hold is valid for its target table.
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    pub(crate) name: String,
    pub(crate) format: MapFormat,
    pub(crate) nodes_format: NodesFormat,

    pub(crate) sectors: Vec<Sector>,
    pub(crate) sidedefs: Vec<Sidedef>,
    pub(crate) linedefs: Vec<Linedef>,
    pub(crate) vertices: Vec<Vertex>,
    pub(crate) first_extended_vertex: Option<usize>,
    pub(crate) segments: Vec<Segment>,
    pub(crate) subsectors: Vec<SubSector>,
    pub(crate) nodes: Vec<Node>,

    pub(crate) sector_linedefs: Vec<Vec<usize>>,
    pub(crate) sector_sidedefs: Vec<Vec<usize>>,
    pub(crate) sector_subsectors: Vec<Vec<usize>>,
    pub(crate) sidedef_linedefs: Vec<Vec<usize>>,
    pub(crate) segment_sidedefs: Vec<Option<usize>>,
    pub(crate) subsector_sectors: Vec<Option<usize>>,
    pub(crate) opposing_sidedefs: Vec<Option<usize>>,
}

impl Level {
    /// Map name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Record layout the map was decoded with
    pub fn format(&self) -> MapFormat {
        self.format
    }

    /// BSP tables the segments, subsectors and nodes came from
    pub fn nodes_format(&self) -> NodesFormat {
        self.nodes_format
    }

    /// Sectors
    pub fn sectors(&self) -> &[Sector] {
        &self.sectors
    }

    /// Sidedefs
    pub fn sidedefs(&self) -> &[Sidedef] {
        &self.sidedefs
    }

    /// Linedefs
    pub fn linedefs(&self) -> &[Linedef] {
        &self.linedefs
    }

    /// Classic vertices followed by GL vertices
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Index of the first GL vertex, when GL data was decoded
    pub fn first_extended_vertex(&self) -> Option<usize> {
        self.first_extended_vertex
    }

    /// Segments
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Subsectors
    pub fn subsectors(&self) -> &[SubSector] {
        &self.subsectors
    }

    /// BSP nodes
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Linedefs with a side facing `sector`
    pub fn sector_linedefs(&self, sector: usize) -> &[usize] {
        self.sector_linedefs.get(sector).map_or(&[], Vec::as_slice)
    }

    /// Sidedefs facing `sector`
    pub fn sector_sidedefs(&self, sector: usize) -> &[usize] {
        self.sector_sidedefs.get(sector).map_or(&[], Vec::as_slice)
    }

    /// Subsectors assigned to `sector`
    pub fn sector_subsectors(&self, sector: usize) -> &[usize] {
        self.sector_subsectors.get(sector).map_or(&[], Vec::as_slice)
    }

    /// Linedefs using `sidedef` on either side
    pub fn sidedef_linedefs(&self, sidedef: usize) -> &[usize] {
        self.sidedef_linedefs.get(sidedef).map_or(&[], Vec::as_slice)
    }

    /// Sidedef index a segment runs along
    pub fn segment_sidedef_index(&self, segment: usize) -> Option<usize> {
        self.segment_sidedefs.get(segment).copied().flatten()
    }

    /// Sector index a subsector belongs to
    pub fn subsector_sector_index(&self, subsector: usize) -> Option<usize> {
        self.subsector_sectors.get(subsector).copied().flatten()
    }

    /// Endpoints of a linedef
    pub fn linedef_line(&self, index: usize) -> Result<Line> {
        let linedef = lookup("linedef", index, &self.linedefs)?;
        Ok(Line::new(
            *self.vertex("linedef", index, linedef.start)?,
            *self.vertex("linedef", index, linedef.end)?,
        ))
    }

    /// Endpoints of a segment
    pub fn segment_line(&self, index: usize) -> Result<Line> {
        let segment = lookup("segment", index, &self.segments)?;
        Ok(Line::new(
            *self.vertex("segment", index, segment.start)?,
            *self.vertex("segment", index, segment.end)?,
        ))
    }

    /// Sector a sidedef faces
    pub fn sidedef_sector(&self, index: usize) -> Result<&Sector> {
        let sidedef = lookup("sidedef", index, &self.sidedefs)?;
        let sector = sidedef.sector;
        self.sectors.get(sector).ok_or_else(|| {
            LevelError::out_of_range("sidedef", index, "sector", sector, self.sectors.len())
        })
    }

    /// Member segments of a subsector
    pub fn subsector_segments(&self, index: usize) -> Result<&[Segment]> {
        let subsector = lookup("subsector", index, &self.subsectors)?;
        let range = subsector.segments();
        let last = range.end - 1;
        self.segments.get(range).ok_or_else(|| {
            LevelError::out_of_range("subsector", index, "segment", last, self.segments.len())
        })
    }

    /// Sidedef a segment runs along; `None` for minisegs
    pub fn segment_sidedef(&self, index: usize) -> Result<Option<&Sidedef>> {
        lookup("segment", index, &self.segments)?;
        Ok(self
            .segment_sidedef_index(index)
            .and_then(|sidedef| self.sidedefs.get(sidedef)))
    }

    /// Sector a subsector belongs to; `None` when no member segment resolved
    pub fn subsector_sector(&self, index: usize) -> Result<Option<&Sector>> {
        lookup("subsector", index, &self.subsectors)?;
        Ok(self
            .subsector_sector_index(index)
            .and_then(|sector| self.sectors.get(sector)))
    }

    /// Sidedef on the other side of the same linedef
    pub fn opposing_sidedef(&self, index: usize) -> Result<Option<usize>> {
        lookup("sidedef", index, &self.sidedefs)?;
        Ok(self.opposing_sidedefs.get(index).copied().flatten())
    }

    /// Table counts for reporting
    pub fn summary(&self) -> LevelSummary {
        let two_sided = self.linedefs.iter().filter(|l| l.is_two_sided()).count();
        LevelSummary {
            name: self.name.clone(),
            format: self.format,
            nodes_format: self.nodes_format,
            sectors: self.sectors.len(),
            sidedefs: self.sidedefs.len(),
            linedefs: self.linedefs.len(),
            vertices: self.vertices.len(),
            first_extended_vertex: self.first_extended_vertex,
            segments: self.segments.len(),
            subsectors: self.subsectors.len(),
            nodes: self.nodes.len(),
            one_sided_linedefs: self.linedefs.len() - two_sided,
            two_sided_linedefs: two_sided,
            minisegs: self.segments.iter().filter(|s| s.is_miniseg()).count(),
            subsectors_without_sector: self
                .subsector_sectors
                .iter()
                .filter(|s| s.is_none())
                .count(),
        }
    }

    fn vertex(&self, table: &'static str, index: usize, vertex: usize) -> Result<&Vertex> {
        self.vertices.get(vertex).ok_or_else(|| {
            LevelError::out_of_range(table, index, "vertex", vertex, self.vertices.len())
        })
    }
}

fn lookup<'t, T>(table: &'static str, index: usize, items: &'t [T]) -> Result<&'t T> {
    items
        .get(index)
        .ok_or_else(|| LevelError::out_of_range("level", 0, table, index, items.len()))
}

/// Table counts of a built level
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelSummary {
    /// Map name
    pub name: String,
    /// Record layout
    pub format: MapFormat,
    /// BSP tables used
    pub nodes_format: NodesFormat,
    /// Sector count
    pub sectors: usize,
    /// Sidedef count
    pub sidedefs: usize,
    /// Linedef count
    pub linedefs: usize,
    /// Vertex count, GL vertices included
    pub vertices: usize,
    /// Index of the first GL vertex
    pub first_extended_vertex: Option<usize>,
    /// Segment count
    pub segments: usize,
    /// Subsector count
    pub subsectors: usize,
    /// Node count
    pub nodes: usize,
    /// Linedefs missing a front or back side
    pub one_sided_linedefs: usize,
    /// Linedefs with both sides
    pub two_sided_linedefs: usize,
    /// Segments on no linedef
    pub minisegs: usize,
    /// Subsectors whose sector could not be resolved
    pub subsectors_without_sector: usize,
}

impl fmt::Display for LevelSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {} nodes): {} sectors, {} linedefs, {} vertices, {} subsectors",
            self.name,
            self.format,
            self.nodes_format,
            self.sectors,
            self.linedefs,
            self.vertices,
            self.subsectors
        )
    }
}
