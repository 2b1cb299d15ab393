//! Level construction from a located map

use crate::geometry::{Line, Point2};
use crate::level::error::{LevelError, Result};
use crate::level::model::Level;
use crate::level::types::{
    BoundingBox, Linedef, LinedefFlags, Node, Sector, Segment, Sidedef, SubSector, Vertex,
};
use crate::level::wire::{
    RawBox, RawDoomLinedef, RawGlSeg, RawGlVertex, RawHexenLinedef, RawNode, RawSector, RawSeg,
    RawSidedef, RawSubSector, RawVertex, WireRecord, decode_records, optional_index,
    resolve_gl_vertex,
};
use crate::map::{GL_V2_MAGIC, GlLump, MapDescriptor, MapFormat, MapLump, NodesFormat};
use crate::wad::WadArchive;
use tracing::{debug, trace};

/// Linedef records in either on-disk layout
enum RawLinedefs {
    Doom(Vec<RawDoomLinedef>),
    Hexen(Vec<RawHexenLinedef>),
}

impl RawLinedefs {
    /// Convert to normalized linedefs, length not yet computed
    fn normalize(self) -> Vec<Linedef> {
        match self {
            Self::Doom(records) => records
                .into_iter()
                .map(|raw| Linedef {
                    start: usize::from(raw.start),
                    end: usize::from(raw.end),
                    flags: LinedefFlags::new(raw.flags),
                    special: raw.special,
                    sector_tag: raw.tag,
                    args: [0; 5],
                    front: optional_index(raw.front),
                    back: optional_index(raw.back),
                    length: 0.0,
                })
                .collect(),
            Self::Hexen(records) => records
                .into_iter()
                .map(|raw| Linedef {
                    start: usize::from(raw.start),
                    end: usize::from(raw.end),
                    flags: LinedefFlags::new(raw.flags),
                    special: u16::from(raw.special),
                    sector_tag: 0,
                    args: raw.args,
                    front: optional_index(raw.front),
                    back: optional_index(raw.back),
                    length: 0.0,
                })
                .collect(),
        }
    }
}

/// Builds a [`Level`] from one map of an archive
///
/// ```rust,no_run
/// use doomwad_formats::level::LevelBuilder;
/// use doomwad_formats::wad::WadArchive;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let archive = WadArchive::open("doom2.wad")?;
/// if let Some(map) = archive.map("MAP01") {
///     let level = LevelBuilder::new(&archive, map).build()?;
///     println!("{}", level.summary());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct LevelBuilder<'a> {
    archive: &'a WadArchive,
    map: &'a MapDescriptor,
    use_gl_nodes: bool,
}

impl<'a> LevelBuilder<'a> {
    /// Create a builder for `map`, which must come from `archive`
    pub fn new(archive: &'a WadArchive, map: &'a MapDescriptor) -> Self {
        Self {
            archive,
            map,
            use_gl_nodes: true,
        }
    }

    /// Prefer GL v2 BSP tables when the map has them (default: true)
    #[must_use]
    pub fn use_gl_nodes(mut self, enabled: bool) -> Self {
        self.use_gl_nodes = enabled;
        self
    }

    /// Decode every table and derive the cross-reference indices
    pub fn build(&self) -> Result<Level> {
        if self.map.format == MapFormat::Udmf {
            return Err(LevelError::UnsupportedFormat {
                map: self.map.name.clone(),
                format: "UDMF text map".to_string(),
            });
        }

        let gl = self.use_gl_nodes && self.map.has_gl_nodes();
        debug!(
            "Building {} ({}, {} BSP)",
            self.map.name,
            self.map.format,
            if gl { "GL v2" } else { "classic" }
        );

        let sectors: Vec<Sector> = self
            .required::<RawSector>(MapLump::Sectors)?
            .into_iter()
            .map(|raw| Sector {
                floor_height: raw.floor_height,
                ceiling_height: raw.ceiling_height,
                floor_texture: raw.floor_texture,
                ceiling_texture: raw.ceiling_texture,
                light_level: raw.light_level,
                special: raw.special,
                tag: raw.tag,
            })
            .collect();

        let mut vertices: Vec<Vertex> = self
            .required::<RawVertex>(MapLump::Vertexes)?
            .into_iter()
            .map(RawVertex::point)
            .collect();

        let first_extended_vertex = if gl {
            let first = vertices.len();
            vertices.extend(self.gl_vertices()?.into_iter().map(RawGlVertex::point));
            Some(first)
        } else {
            None
        };

        let mut sector_sidedefs = vec![Vec::new(); sectors.len()];
        let mut sidedefs = Vec::new();
        for (index, raw) in self
            .required::<RawSidedef>(MapLump::Sidedefs)?
            .into_iter()
            .enumerate()
        {
            let sector = usize::from(raw.sector);
            sector_sidedefs
                .get_mut(sector)
                .ok_or_else(|| {
                    LevelError::out_of_range("sidedef", index, "sector", sector, sectors.len())
                })?
                .push(index);
            sidedefs.push(Sidedef {
                x_offset: raw.x_offset,
                y_offset: raw.y_offset,
                upper_texture: raw.upper_texture,
                lower_texture: raw.lower_texture,
                middle_texture: raw.middle_texture,
                sector,
            });
        }

        let mut linedefs = self.linedefs()?.normalize();
        let mut sector_linedefs = vec![Vec::new(); sectors.len()];
        let mut sidedef_linedefs = vec![Vec::new(); sidedefs.len()];
        let mut opposing_sidedefs = vec![None; sidedefs.len()];
        for (index, linedef) in linedefs.iter_mut().enumerate() {
            let start = vertex_at(&vertices, index, linedef.start)?;
            let end = vertex_at(&vertices, index, linedef.end)?;
            linedef.length = start.distance(end);

            for side in [linedef.front, linedef.back].into_iter().flatten() {
                let sidedef = sidedefs.get(side).ok_or_else(|| {
                    LevelError::out_of_range("linedef", index, "sidedef", side, sidedefs.len())
                })?;
                sidedef_linedefs[side].push(index);
                sector_linedefs[sidedef.sector].push(index);
            }

            if let (Some(front), Some(back)) = (linedef.front, linedef.back) {
                opposing_sidedefs[front] = Some(back);
                opposing_sidedefs[back] = Some(front);
            }
        }

        let segments = match first_extended_vertex {
            Some(first) => self.gl_segments(first)?,
            None => self.classic_segments()?,
        };
        let mut segment_sidedefs = Vec::with_capacity(segments.len());
        for (index, segment) in segments.iter().enumerate() {
            let side = match segment.linedef {
                Some(line) => linedefs
                    .get(line)
                    .ok_or_else(|| {
                        LevelError::out_of_range("segment", index, "linedef", line, linedefs.len())
                    })?
                    .side(segment.direction),
                None => None,
            };
            segment_sidedefs.push(side);
        }

        let subsectors: Vec<SubSector> = self
            .bsp_table::<RawSubSector>(gl, MapLump::Ssectors, GlLump::Subsectors)?
            .into_iter()
            .map(|raw| SubSector {
                count: usize::from(raw.count),
                first: usize::from(raw.first),
            })
            .collect();
        let mut sector_subsectors = vec![Vec::new(); sectors.len()];
        let mut subsector_sectors = Vec::with_capacity(subsectors.len());
        for (index, subsector) in subsectors.iter().enumerate() {
            let members = segment_sidedefs.get(subsector.segments()).ok_or_else(|| {
                LevelError::out_of_range(
                    "subsector",
                    index,
                    "segment",
                    subsector.segments().end.saturating_sub(1),
                    segments.len(),
                )
            })?;

            // First member with a side decides; the rest are not cross-checked
            let sector = members
                .iter()
                .flatten()
                .next()
                .map(|&side| sidedefs[side].sector);
            if let Some(sector) = sector {
                sector_subsectors[sector].push(index);
            }
            subsector_sectors.push(sector);
        }

        let nodes: Vec<Node> = self
            .bsp_table::<RawNode>(gl, MapLump::Nodes, GlLump::Nodes)?
            .into_iter()
            .map(|raw| Node {
                partition: Line::from_delta(
                    Point2::new(f32::from(raw.x), f32::from(raw.y)),
                    f32::from(raw.dx),
                    f32::from(raw.dy),
                ),
                bounds: [bounding_box(raw.right_box), bounding_box(raw.left_box)],
                children: [raw.right_child, raw.left_child],
            })
            .collect();

        let level = Level {
            name: self.map.name.clone(),
            format: self.map.format,
            nodes_format: if gl {
                NodesFormat::GlBspV2
            } else {
                NodesFormat::Doom
            },
            sectors,
            sidedefs,
            linedefs,
            vertices,
            first_extended_vertex,
            segments,
            subsectors,
            nodes,
            sector_linedefs,
            sector_sidedefs,
            sector_subsectors,
            sidedef_linedefs,
            segment_sidedefs,
            subsector_sectors,
            opposing_sidedefs,
        };

        debug!("Built {}", level.summary());
        Ok(level)
    }

    fn lump_data(&self, lump: MapLump) -> Result<Option<&'a [u8]>> {
        match self.map.lump_index(self.archive, lump) {
            Some(index) => Ok(Some(self.archive.read_lump(index)?)),
            None => Ok(None),
        }
    }

    fn gl_lump_data(&self, lump: GlLump) -> Result<Option<&'a [u8]>> {
        match self.map.gl_lump_index(self.archive, lump) {
            Some(index) => Ok(Some(self.archive.read_lump(index)?)),
            None => Ok(None),
        }
    }

    fn missing(&self, lump: &'static str) -> LevelError {
        LevelError::MissingLump {
            map: self.map.name.clone(),
            lump,
        }
    }

    fn required<T: WireRecord>(&self, lump: MapLump) -> Result<Vec<T>> {
        let data = self
            .lump_data(lump)?
            .ok_or_else(|| self.missing(lump.name()))?;
        let records = decode_records(lump.name(), data)?;
        trace!("{}: {} {} records", self.map.name, records.len(), lump.name());
        Ok(records)
    }

    /// Subsector or node table from the GL group or the classic lumps
    fn bsp_table<T: WireRecord>(
        &self,
        gl: bool,
        classic: MapLump,
        companion: GlLump,
    ) -> Result<Vec<T>> {
        let (name, data) = if gl {
            (companion.name(), self.gl_lump_data(companion)?)
        } else {
            (classic.name(), self.lump_data(classic)?)
        };

        match data {
            Some(data) => {
                let records = decode_records(name, data)?;
                trace!("{}: {} {} records", self.map.name, records.len(), name);
                Ok(records)
            }
            None => {
                trace!("{}: no {} lump, table left empty", self.map.name, name);
                Ok(Vec::new())
            }
        }
    }

    fn linedefs(&self) -> Result<RawLinedefs> {
        Ok(match self.map.format {
            MapFormat::Hexen => RawLinedefs::Hexen(self.required(MapLump::Linedefs)?),
            _ => RawLinedefs::Doom(self.required(MapLump::Linedefs)?),
        })
    }

    /// GL v2 vertices, after the version magic
    fn gl_vertices(&self) -> Result<Vec<RawGlVertex>> {
        let lump = GlLump::Vertices;
        let data = self
            .gl_lump_data(lump)?
            .ok_or_else(|| self.missing(lump.name()))?;
        let records = data
            .get(GL_V2_MAGIC.len()..)
            .ok_or_else(|| LevelError::InvalidLumpSize {
                lump: lump.name().to_string(),
                size: data.len(),
                record_size: RawGlVertex::SIZE,
            })?;
        decode_records(lump.name(), records)
    }

    fn classic_segments(&self) -> Result<Vec<Segment>> {
        Ok(self
            .bsp_table::<RawSeg>(false, MapLump::Segs, GlLump::Segs)?
            .into_iter()
            .map(|raw| Segment {
                start: usize::from(raw.start),
                end: usize::from(raw.end),
                linedef: optional_index(raw.linedef),
                direction: raw.direction,
                offset: raw.offset,
                angle: raw.angle,
            })
            .collect())
    }

    fn gl_segments(&self, first_extended_vertex: usize) -> Result<Vec<Segment>> {
        Ok(self
            .bsp_table::<RawGlSeg>(true, MapLump::Segs, GlLump::Segs)?
            .into_iter()
            .map(|raw| Segment {
                start: resolve_gl_vertex(raw.start, first_extended_vertex),
                end: resolve_gl_vertex(raw.end, first_extended_vertex),
                linedef: optional_index(raw.linedef),
                direction: raw.direction,
                offset: 0,
                angle: 0,
            })
            .collect())
    }
}

fn vertex_at(vertices: &[Vertex], linedef: usize, vertex: usize) -> Result<Point2> {
    vertices.get(vertex).copied().ok_or_else(|| {
        LevelError::out_of_range("linedef", linedef, "vertex", vertex, vertices.len())
    })
}

fn bounding_box(raw: RawBox) -> BoundingBox {
    BoundingBox {
        top: raw.top,
        bottom: raw.bottom,
        left: raw.left,
        right: raw.right,
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use crate::wad::WadError;
    use test_utils::{GlFixture, MapFixture, WadBuilder, records};

    fn archive_with(builder: WadBuilder) -> WadArchive {
        WadArchive::from_bytes(builder.build()).expect("Operation should succeed")
    }

    fn build(archive: &WadArchive, name: &str) -> Result<Level> {
        let map = archive.map(name).expect("map should be located");
        LevelBuilder::new(archive, map).build()
    }

    #[test]
    fn test_classic_two_rooms() {
        let archive = archive_with(WadBuilder::pwad().map("E1M1", &MapFixture::two_rooms()));
        let level = build(&archive, "E1M1").unwrap();

        assert_eq!(level.name(), "E1M1");
        assert_eq!(level.nodes_format(), NodesFormat::Doom);
        assert_eq!(level.sectors().len(), 2);
        assert_eq!(level.sidedefs().len(), 8);
        assert_eq!(level.linedefs().len(), 7);
        assert_eq!(level.vertices().len(), 6);
        assert_eq!(level.first_extended_vertex(), None);
        assert_eq!(level.segments().len(), 8);
        assert_eq!(level.subsectors().len(), 2);
        assert_eq!(level.nodes().len(), 1);

        assert_eq!(level.sectors()[0].floor_texture, "FLOOR4_8");
        assert_eq!(level.sidedefs()[1].middle_texture, "-");
        assert_eq!(level.linedefs()[0].length, 64.0);
        assert_eq!(level.linedefs()[5].length, 96.0);
        assert_eq!(level.linedefs()[6].length, 5120f32.sqrt());
    }

    #[test]
    fn test_two_sided_linedef_indices() {
        let archive = archive_with(WadBuilder::pwad().map("E1M1", &MapFixture::two_rooms()));
        let level = build(&archive, "E1M1").unwrap();

        let line = &level.linedefs()[1];
        assert!(line.is_two_sided());
        assert!(line.flags.has(LinedefFlags::TWO_SIDED));
        assert_eq!(level.opposing_sidedef(1).unwrap(), Some(2));
        assert_eq!(level.opposing_sidedef(2).unwrap(), Some(1));
        assert_eq!(level.opposing_sidedef(0).unwrap(), None);

        assert_eq!(level.sector_linedefs(0), &[0, 1, 2, 3]);
        assert_eq!(level.sector_linedefs(1), &[1, 4, 5, 6]);
        assert_eq!(level.sector_sidedefs(1), &[2, 5, 6, 7]);
        assert_eq!(level.sidedef_linedefs(2), &[1]);
        assert!(level.sector_linedefs(9).is_empty());
    }

    #[test]
    fn test_classic_subsector_sectors() {
        let archive = archive_with(WadBuilder::pwad().map("E1M1", &MapFixture::two_rooms()));
        let level = build(&archive, "E1M1").unwrap();

        assert_eq!(level.subsector_sector_index(0), Some(0));
        assert_eq!(level.subsector_sector_index(1), Some(1));
        assert_eq!(level.sector_subsectors(0), &[0]);
        assert_eq!(level.sector_subsectors(1), &[1]);
        assert_eq!(level.subsector_segments(1).unwrap().len(), 4);

        let node = level.nodes()[0];
        assert_eq!(node.partition.start, Point2::new(64.0, 0.0));
        assert_eq!(node.partition.end, Point2::new(64.0, 64.0));
        assert_eq!(node.children, [-32767, -32768]);
    }

    #[test]
    fn test_gl_two_rooms() {
        let archive = archive_with(
            WadBuilder::pwad()
                .map("MAP01", &MapFixture::two_rooms())
                .gl_nodes("MAP01", &GlFixture::two_rooms()),
        );
        let level = build(&archive, "MAP01").unwrap();

        assert_eq!(level.nodes_format(), NodesFormat::GlBspV2);
        assert_eq!(level.first_extended_vertex(), Some(6));
        assert_eq!(level.vertices().len(), 7);
        assert_eq!(level.vertices()[6], Point2::new(32.25, 0.0));
        assert_eq!(level.segments().len(), 10);
        assert_eq!(level.subsectors().len(), 3);

        // Flagged references rebase onto the GL vertex run
        assert_eq!(level.segments()[0].end, 6);
        assert_eq!(level.segments()[1].start, 6);
        assert!(level.segments().iter().all(|s| s.angle == 0 && s.offset == 0));

        // The GL node partition runs the other way from the classic one
        let node = level.nodes()[0];
        assert_eq!(node.partition.start, Point2::new(64.0, 64.0));
        assert_eq!(node.partition.end, Point2::new(64.0, 0.0));
    }

    #[test]
    fn test_gl_minisegs_and_orphan_subsector() {
        let archive = archive_with(
            WadBuilder::pwad()
                .map("MAP01", &MapFixture::two_rooms())
                .gl_nodes("MAP01", &GlFixture::two_rooms()),
        );
        let level = build(&archive, "MAP01").unwrap();

        let miniseg = &level.segments()[5];
        assert!(miniseg.is_miniseg());
        assert_eq!(level.segment_sidedef(5).unwrap(), None);

        // First member of subsector 1 is a miniseg; the next member decides
        assert_eq!(level.subsector_sector_index(1), Some(1));
        assert_eq!(level.subsector_sector_index(2), None);
        assert_eq!(level.subsector_sector(2).unwrap(), None);
        assert_eq!(level.sector_subsectors(1), &[1]);
        assert_eq!(level.summary().subsectors_without_sector, 1);
        assert_eq!(level.summary().minisegs, 2);
    }

    #[test]
    fn test_gl_disabled_uses_classic_tables() {
        let archive = archive_with(
            WadBuilder::pwad()
                .map("MAP01", &MapFixture::two_rooms())
                .gl_nodes("MAP01", &GlFixture::two_rooms()),
        );
        let map = archive.map("MAP01").unwrap();
        let level = LevelBuilder::new(&archive, map)
            .use_gl_nodes(false)
            .build()
            .unwrap();

        assert_eq!(level.nodes_format(), NodesFormat::Doom);
        assert_eq!(level.first_extended_vertex(), None);
        assert_eq!(level.vertices().len(), 6);
        assert_eq!(level.segments().len(), 8);
    }

    #[test]
    fn test_unknown_gl_version_falls_back_to_classic() {
        let mut gl = GlFixture::two_rooms();
        gl.magic = *b"gNd3";
        let archive = archive_with(
            WadBuilder::pwad()
                .map("MAP01", &MapFixture::two_rooms())
                .gl_nodes("MAP01", &gl),
        );
        let level = build(&archive, "MAP01").unwrap();
        assert_eq!(level.nodes_format(), NodesFormat::Doom);
        assert_eq!(level.segments().len(), 8);
    }

    #[test]
    fn test_hexen_linedefs() {
        let archive =
            archive_with(WadBuilder::pwad().map("MAP01", &MapFixture::two_rooms().hexen()));
        let level = build(&archive, "MAP01").unwrap();

        assert_eq!(level.format(), MapFormat::Hexen);
        assert_eq!(level.linedefs().len(), 7);
        let door = &level.linedefs()[1];
        assert_eq!(door.special, 12);
        assert_eq!(door.args, [1, 16, 150, 0, 0]);
        assert_eq!(door.sector_tag, 0);
        assert_eq!(level.opposing_sidedef(1).unwrap(), Some(2));
    }

    #[test]
    fn test_truncated_map_misses_sectors() {
        let lumps: Vec<_> = MapFixture::two_rooms()
            .lumps()
            .into_iter()
            .filter(|(name, _)| !matches!(name.as_str(), "SEGS" | "SSECTORS" | "NODES"))
            .collect();
        // Without SEGS the range ends at VERTEXES, so SECTORS falls outside it
        let archive = archive_with(WadBuilder::pwad().marker("MAP01").lumps(lumps));
        let result = build(&archive, "MAP01");
        assert!(matches!(
            result,
            Err(LevelError::MissingLump { lump: "SECTORS", .. })
        ));
    }

    #[test]
    fn test_missing_gl_nodes_lump_is_empty() {
        let gl_lumps: Vec<_> = GlFixture::two_rooms()
            .lumps()
            .into_iter()
            .filter(|(name, _)| name != "GL_NODES")
            .collect();
        let archive = archive_with(
            WadBuilder::pwad()
                .map("MAP01", &MapFixture::two_rooms())
                .marker("GL_MAP01")
                .lumps(gl_lumps),
        );
        let level = build(&archive, "MAP01").unwrap();
        assert_eq!(level.nodes_format(), NodesFormat::GlBspV2);
        assert!(level.nodes().is_empty());
        assert_eq!(level.subsectors().len(), 3);
    }

    #[test]
    fn test_empty_bsp_tables() {
        let mut fixture = MapFixture::two_rooms();
        fixture.segs.clear();
        fixture.subsectors.clear();
        fixture.nodes.clear();
        let archive = archive_with(WadBuilder::pwad().map("MAP01", &fixture));
        let level = build(&archive, "MAP01").unwrap();
        assert!(level.segments().is_empty());
        assert!(level.subsectors().is_empty());
        assert!(level.nodes().is_empty());
        assert_eq!(level.linedefs().len(), 7);
    }

    #[test]
    fn test_bad_linedef_size() {
        let lumps: Vec<_> = MapFixture::two_rooms()
            .lumps()
            .into_iter()
            .map(|(name, mut data)| {
                if name == "LINEDEFS" {
                    data.push(0);
                }
                (name, data)
            })
            .collect();
        let archive = archive_with(WadBuilder::pwad().marker("MAP01").lumps(lumps));
        let err = build(&archive, "MAP01").unwrap_err();
        assert!(err.is_format_error());
        assert!(matches!(
            err,
            LevelError::InvalidLumpSize {
                size: 99,
                record_size: 14,
                ..
            }
        ));
    }

    #[test]
    fn test_bad_hexen_linedef_size() {
        let lumps: Vec<_> = MapFixture::two_rooms()
            .hexen()
            .lumps()
            .into_iter()
            .map(|(name, mut data)| {
                if name == "LINEDEFS" {
                    data.extend_from_slice(&[0; 14]);
                }
                (name, data)
            })
            .collect();
        let archive = archive_with(WadBuilder::pwad().marker("MAP01").lumps(lumps));
        assert_eq!(archive.map("MAP01").unwrap().format, MapFormat::Hexen);

        let err = build(&archive, "MAP01").unwrap_err();
        assert!(err.is_format_error());
        assert!(matches!(
            err,
            LevelError::InvalidLumpSize {
                ref lump,
                size: 126,
                record_size: 16,
            } if lump == "LINEDEFS"
        ));
    }

    #[test]
    fn test_bad_gl_vertex_size() {
        let gl_lumps: Vec<_> = GlFixture::two_rooms()
            .lumps()
            .into_iter()
            .map(|(name, mut data)| {
                if name == "GL_VERT" {
                    data.extend_from_slice(&[0; 3]);
                }
                (name, data)
            })
            .collect();
        let archive = archive_with(
            WadBuilder::pwad()
                .map("MAP01", &MapFixture::two_rooms())
                .marker("GL_MAP01")
                .lumps(gl_lumps),
        );

        let err = build(&archive, "MAP01").unwrap_err();
        assert!(err.is_format_error());
        assert!(matches!(
            err,
            LevelError::InvalidLumpSize {
                ref lump,
                size: 11,
                record_size: 8,
            } if lump == "GL_VERT"
        ));
    }

    #[test]
    fn test_truncated_lump_is_format_error() {
        let mut data = WadBuilder::pwad()
            .map("MAP01", &MapFixture::two_rooms())
            .build();
        let archive = WadArchive::from_bytes(data.clone()).unwrap();
        let sectors = archive.find_lump("SECTORS").unwrap();

        // Point SECTORS past the end of the file
        let entry = data.len() - (archive.lump_count() - sectors) * 16;
        let position = u32::try_from(data.len()).unwrap();
        data[entry..entry + 4].copy_from_slice(&position.to_le_bytes());

        let archive = WadArchive::from_bytes(data).unwrap();
        let err = build(&archive, "MAP01").unwrap_err();
        assert!(matches!(err, LevelError::Wad(WadError::LumpOutOfBounds { .. })));
        assert!(err.is_format_error());
        assert!(!err.is_reference_error());
    }

    #[test]
    fn test_sidedef_sector_out_of_range() {
        let mut fixture = MapFixture::two_rooms();
        fixture.sidedefs[3].sector = 7;
        let archive = archive_with(WadBuilder::pwad().map("MAP01", &fixture));
        let err = build(&archive, "MAP01").unwrap_err();
        assert!(err.is_reference_error());
        assert!(matches!(
            err,
            LevelError::IndexOutOfRange {
                source_table: "sidedef",
                index: 3,
                target_index: 7,
                count: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_segment_linedef_out_of_range() {
        let mut fixture = MapFixture::two_rooms();
        fixture.segs[2].linedef = 40;
        let archive = archive_with(WadBuilder::pwad().map("MAP01", &fixture));
        let err = build(&archive, "MAP01").unwrap_err();
        assert!(matches!(
            err,
            LevelError::IndexOutOfRange {
                source_table: "segment",
                target: "linedef",
                ..
            }
        ));
    }

    #[test]
    fn test_subsector_run_past_segments() {
        let mut fixture = MapFixture::two_rooms();
        fixture.subsectors[1] = records::SubSector { count: 6, first: 4 };
        let archive = archive_with(WadBuilder::pwad().map("MAP01", &fixture));
        let err = build(&archive, "MAP01").unwrap_err();
        assert!(err.is_reference_error());
    }

    #[test]
    fn test_udmf_is_unsupported() {
        let archive = archive_with(
            WadBuilder::pwad()
                .marker("MAP01")
                .lump("TEXTMAP", b"namespace = \"doom\";".to_vec())
                .marker("ENDMAP"),
        );
        let err = build(&archive, "MAP01").unwrap_err();
        assert!(matches!(err, LevelError::UnsupportedFormat { .. }));
        assert!(err.is_format_error());
    }

    #[test]
    fn test_builder_is_reusable() {
        let archive = archive_with(WadBuilder::pwad().map("E1M1", &MapFixture::two_rooms()));
        let map = archive.map("E1M1").unwrap();
        let builder = LevelBuilder::new(&archive, map);
        assert_eq!(builder.build().unwrap(), builder.build().unwrap());
    }
}
