//! Normalized level records

use crate::geometry::{Line, Point2};
use serde::Serialize;
use std::fmt;
use std::ops::Range;

/// Map vertices are plain points; GL vertices keep their fractional part
pub type Vertex = Point2;

/// A sector: a region with one floor and one ceiling
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sector {
    /// Floor height
    pub floor_height: i16,
    /// Ceiling height
    pub ceiling_height: i16,
    /// Floor flat name
    pub floor_texture: String,
    /// Ceiling flat name
    pub ceiling_texture: String,
    /// Light level
    pub light_level: i16,
    /// Sector special
    pub special: i16,
    /// Tag matched by linedef specials
    pub tag: i16,
}

/// One side of a wall
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sidedef {
    /// Horizontal texture offset
    pub x_offset: i16,
    /// Vertical texture offset
    pub y_offset: i16,
    /// Upper texture name
    pub upper_texture: String,
    /// Lower texture name
    pub lower_texture: String,
    /// Middle texture name
    pub middle_texture: String,
    /// Sector this side faces
    pub sector: usize,
}

/// Linedef flag bits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct LinedefFlags {
    /// Raw flag value
    pub value: u16,
}

impl LinedefFlags {
    /// Blocks players and monsters
    pub const IMPASSABLE: u16 = 0x0001;

    /// Blocks monsters
    pub const BLOCK_MONSTERS: u16 = 0x0002;

    /// Has a back side
    pub const TWO_SIDED: u16 = 0x0004;

    /// Upper texture drawn from the top down
    pub const UPPER_UNPEGGED: u16 = 0x0008;

    /// Lower texture drawn from the bottom up
    pub const LOWER_UNPEGGED: u16 = 0x0010;

    /// Shown as one-sided on the automap
    pub const SECRET: u16 = 0x0020;

    /// Blocks sound propagation
    pub const BLOCK_SOUND: u16 = 0x0040;

    /// Never shown on the automap
    pub const HIDDEN: u16 = 0x0080;

    /// Always shown on the automap
    pub const MAPPED: u16 = 0x0100;

    /// Create flags from a raw value
    pub const fn new(value: u16) -> Self {
        Self { value }
    }

    /// Check if flag is set
    pub const fn has(&self, flag: u16) -> bool {
        (self.value & flag) != 0
    }

    /// Set flag
    pub fn set(&mut self, flag: u16) {
        self.value |= flag;
    }

    /// Clear flag
    pub fn clear(&mut self, flag: u16) {
        self.value &= !flag;
    }
}

impl fmt::Display for LinedefFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(u16, &str); 9] = [
            (LinedefFlags::IMPASSABLE, "IMPASSABLE"),
            (LinedefFlags::BLOCK_MONSTERS, "BLOCK_MONSTERS"),
            (LinedefFlags::TWO_SIDED, "TWO_SIDED"),
            (LinedefFlags::UPPER_UNPEGGED, "UPPER_UNPEGGED"),
            (LinedefFlags::LOWER_UNPEGGED, "LOWER_UNPEGGED"),
            (LinedefFlags::SECRET, "SECRET"),
            (LinedefFlags::BLOCK_SOUND, "BLOCK_SOUND"),
            (LinedefFlags::HIDDEN, "HIDDEN"),
            (LinedefFlags::MAPPED, "MAPPED"),
        ];

        let set: Vec<&str> = NAMES
            .iter()
            .filter(|(bit, _)| self.has(*bit))
            .map(|(_, name)| *name)
            .collect();
        if set.is_empty() {
            write!(f, "0x{:04x}", self.value)
        } else {
            f.write_str(&set.join(" | "))
        }
    }
}

/// A wall between two vertices
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Linedef {
    /// Start vertex index
    pub start: usize,
    /// End vertex index
    pub end: usize,
    /// Flag bits
    pub flags: LinedefFlags,
    /// Action special
    pub special: u16,
    /// Sector tag (always 0 on Hexen maps, which use `args`)
    pub sector_tag: u16,
    /// Hexen special arguments (all 0 on Doom maps)
    pub args: [u8; 5],
    /// Front sidedef index
    pub front: Option<usize>,
    /// Back sidedef index
    pub back: Option<usize>,
    /// Distance between the endpoints
    pub length: f32,
}

impl Linedef {
    /// Both sides are present
    pub fn is_two_sided(&self) -> bool {
        self.front.is_some() && self.back.is_some()
    }

    /// Sidedef on the given side: 0 for front, 1 for back
    pub fn side(&self, direction: u16) -> Option<usize> {
        match direction {
            0 => self.front,
            1 => self.back,
            _ => None,
        }
    }
}

/// A piece of a linedef bounding a subsector
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    /// Start vertex index
    pub start: usize,
    /// End vertex index
    pub end: usize,
    /// Owning linedef; `None` for GL minisegs
    pub linedef: Option<usize>,
    /// Side of the linedef the segment runs along: 0 front, 1 back
    pub direction: u16,
    /// Distance along the linedef to the segment start
    pub offset: i16,
    /// Binary angle (0 for GL segments)
    pub angle: i16,
}

impl Segment {
    /// Segment lies on no linedef
    pub fn is_miniseg(&self) -> bool {
        self.linedef.is_none()
    }
}

/// A convex leaf of the BSP tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SubSector {
    /// Number of member segments
    pub count: usize,
    /// Index of the first member segment
    pub first: usize,
}

impl SubSector {
    /// Member segment indices
    pub fn segments(&self) -> Range<usize> {
        self.first..self.first + self.count
    }
}

/// Axis-aligned bounding box of a node child
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct BoundingBox {
    /// Largest y
    pub top: i16,
    /// Smallest y
    pub bottom: i16,
    /// Smallest x
    pub left: i16,
    /// Largest x
    pub right: i16,
}

impl BoundingBox {
    /// Point lies inside or on the edge of the box
    pub fn contains(&self, point: Point2) -> bool {
        point.x >= f32::from(self.left)
            && point.x <= f32::from(self.right)
            && point.y >= f32::from(self.bottom)
            && point.y <= f32::from(self.top)
    }
}

/// A BSP node
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Node {
    /// Partition line
    pub partition: Line,
    /// Child bounds: right, then left
    pub bounds: [BoundingBox; 2],
    /// Raw child references: right, then left
    pub children: [i16; 2],
}

impl Node {
    /// Index of the right child in `bounds` and `children`
    pub const RIGHT: usize = 0;

    /// Index of the left child in `bounds` and `children`
    pub const LEFT: usize = 1;

    /// Raw right child reference
    pub fn right_child(&self) -> i16 {
        self.children[Self::RIGHT]
    }

    /// Raw left child reference
    pub fn left_child(&self) -> i16 {
        self.children[Self::LEFT]
    }
}
