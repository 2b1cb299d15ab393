//! Map descriptors and structural lump slots

use crate::wad::WadArchive;
use serde::Serialize;
use std::fmt;

/// Record layout used by a map's binary lumps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MapFormat {
    /// Original Doom layout
    Doom,
    /// Hexen layout, signalled by a `BEHAVIOR` lump (extended linedefs)
    Hexen,
    /// Text map (`TEXTMAP` .. `ENDMAP`), located but not decoded
    Udmf,
}

impl fmt::Display for MapFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Doom => "Doom",
            Self::Hexen => "Hexen",
            Self::Udmf => "UDMF",
        };
        f.write_str(name)
    }
}

/// BSP data available for a map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NodesFormat {
    /// Only the classic SEGS/SSECTORS/NODES lumps
    Doom,
    /// GL companion lumps in glBSP v2 layout (`gNd2`)
    GlBspV2,
    /// A GL companion exists but its version is not recognized
    Unknown,
}

impl fmt::Display for NodesFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Doom => "Doom",
            Self::GlBspV2 => "GL v2",
            Self::Unknown => "Unknown",
        };
        f.write_str(name)
    }
}

/// Structural lumps of a binary map, by position after the label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapLump {
    /// Things (not decoded)
    Things = 1,
    /// Linedefs
    Linedefs = 2,
    /// Sidedefs
    Sidedefs = 3,
    /// Vertices
    Vertexes = 4,
    /// Segments
    Segs = 5,
    /// Subsectors
    Ssectors = 6,
    /// BSP nodes
    Nodes = 7,
    /// Sectors
    Sectors = 8,
    /// Reject table (not decoded)
    Reject = 9,
    /// Blockmap (not decoded)
    Blockmap = 10,
    /// Hexen ACS bytecode (not decoded)
    Behavior = 11,
    /// Hexen ACS source (not decoded)
    Scripts = 12,
}

impl MapLump {
    /// The canonical lump sequence following a map label
    pub const SEQUENCE: [Self; 10] = [
        Self::Things,
        Self::Linedefs,
        Self::Sidedefs,
        Self::Vertexes,
        Self::Segs,
        Self::Ssectors,
        Self::Nodes,
        Self::Sectors,
        Self::Reject,
        Self::Blockmap,
    ];

    /// Distance from the map label
    pub const fn offset(self) -> usize {
        self as usize
    }

    /// Expected lump name
    pub const fn name(self) -> &'static str {
        match self {
            Self::Things => "THINGS",
            Self::Linedefs => "LINEDEFS",
            Self::Sidedefs => "SIDEDEFS",
            Self::Vertexes => "VERTEXES",
            Self::Segs => "SEGS",
            Self::Ssectors => "SSECTORS",
            Self::Nodes => "NODES",
            Self::Sectors => "SECTORS",
            Self::Reject => "REJECT",
            Self::Blockmap => "BLOCKMAP",
            Self::Behavior => "BEHAVIOR",
            Self::Scripts => "SCRIPTS",
        }
    }
}

/// GL companion lumps, by position after the `GL_` label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlLump {
    /// GL vertices, prefixed by the version magic
    Vertices = 1,
    /// GL segments
    Segs = 2,
    /// GL subsectors
    Subsectors = 3,
    /// GL nodes
    Nodes = 4,
}

impl GlLump {
    /// Distance from the GL label
    pub const fn offset(self) -> usize {
        self as usize
    }

    /// Expected lump name
    pub const fn name(self) -> &'static str {
        match self {
            Self::Vertices => "GL_VERT",
            Self::Segs => "GL_SEGS",
            Self::Subsectors => "GL_SSECT",
            Self::Nodes => "GL_NODES",
        }
    }
}

/// A map located in the lump directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MapDescriptor {
    /// Map name, taken from the label lump
    pub name: String,
    /// Directory index of the label lump
    pub label: usize,
    /// Directory index of the last lump belonging to the map (inclusive)
    pub end: usize,
    /// Record layout of the binary lumps
    pub format: MapFormat,
    /// BSP data available for the map
    pub nodes_format: NodesFormat,
    /// Directory index of the `GL_` label, when a companion exists
    pub gl_label: Option<usize>,
}

impl MapDescriptor {
    /// Number of lumps in the map's range, label included
    pub fn lump_count(&self) -> usize {
        self.end - self.label + 1
    }

    /// Whether the GL companion can be decoded
    pub fn has_gl_nodes(&self) -> bool {
        self.nodes_format == NodesFormat::GlBspV2 && self.gl_label.is_some()
    }

    /// Directory index of a structural lump
    ///
    /// `None` when the slot lies outside the map's range or the lump there
    /// has a different name. `BEHAVIOR` and `SCRIPTS` follow the last
    /// present structural lump, so they are looked up among the final two
    /// slots of the range instead of at a fixed offset.
    pub fn lump_index(&self, archive: &WadArchive, lump: MapLump) -> Option<usize> {
        if matches!(lump, MapLump::Behavior | MapLump::Scripts) {
            return (self.label + 1..=self.end)
                .rev()
                .take(2)
                .find_map(|index| named_slot(archive, index, lump.name()));
        }

        let index = self.label + lump.offset();
        if index > self.end {
            return None;
        }
        named_slot(archive, index, lump.name())
    }

    /// Directory index of a GL companion lump
    pub fn gl_lump_index(&self, archive: &WadArchive, lump: GlLump) -> Option<usize> {
        let gl_label = self.gl_label?;
        named_slot(archive, gl_label + lump.offset(), lump.name())
    }
}

impl fmt::Display for MapDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Map {{ name = {}, format = {}, nodes = {} }}",
            self.name, self.format, self.nodes_format
        )
    }
}

pub(crate) fn named_slot(archive: &WadArchive, index: usize, name: &str) -> Option<usize> {
    archive
        .lumps()
        .get(index)
        .filter(|lump| lump.is_named(name))
        .map(|_| index)
}
