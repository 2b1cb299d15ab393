//! Ready-made map groups
//!
//! `two_rooms` is a square room (sector 0) joined through a two-sided wall
//! at x = 64 to a quadrilateral room (sector 1):
//!
//! ```text
//!            v5 (128,96)
//!   v3 ---- v2 /
//!    |  0   | 1 |
//!   v0 ---- v1 --- v4 (128,0)
//! ```

use crate::records::{
    GlSeg, GlVertex, Linedef, Node, Sector, Seg, Sidedef, SubSector, Vertex, encode_all,
};

/// Lumps of a binary map group, label excluded
#[derive(Debug, Clone)]
pub struct MapFixture {
    pub things: Vec<u8>,
    pub linedefs: Vec<Linedef>,
    pub sidedefs: Vec<Sidedef>,
    pub vertices: Vec<Vertex>,
    pub segs: Vec<Seg>,
    pub subsectors: Vec<SubSector>,
    pub nodes: Vec<Node>,
    pub sectors: Vec<Sector>,
    pub reject: Vec<u8>,
    pub blockmap: Vec<u8>,
    /// Hexen layout; adds a `BEHAVIOR` lump
    pub hexen: bool,
}

fn sector(floor: &str, ceiling: &str, light_level: i16) -> Sector {
    Sector {
        floor_height: 0,
        ceiling_height: 128,
        floor_texture: floor.into(),
        ceiling_texture: ceiling.into(),
        light_level,
        special: 0,
        tag: 0,
    }
}

fn wall(sector: u16) -> Sidedef {
    Sidedef {
        x_offset: 0,
        y_offset: 0,
        upper_texture: "-".into(),
        lower_texture: "-".into(),
        middle_texture: "STARTAN3".into(),
        sector,
    }
}

fn opening(sector: u16) -> Sidedef {
    Sidedef {
        middle_texture: "-".into(),
        ..wall(sector)
    }
}

fn line(start: u16, end: u16, front: u16, back: u16) -> Linedef {
    let flags = if back == Linedef::NO_SIDE { 0x0001 } else { 0x0004 };
    Linedef {
        start,
        end,
        flags,
        special: 0,
        tag: 0,
        args: [0; 5],
        front,
        back,
    }
}

fn seg(start: u16, end: u16, angle: i16, linedef: u16, direction: u16) -> Seg {
    Seg {
        start,
        end,
        angle,
        linedef,
        direction,
        offset: 0,
    }
}

impl MapFixture {
    /// Two rooms sharing one two-sided linedef
    pub fn two_rooms() -> Self {
        let mut door = line(1, 2, 1, 2);
        door.special = 1;

        Self {
            // One player 1 start at (32, 32) facing east
            things: [32i16, 32, 0, 1, 7]
                .iter()
                .flat_map(|v| v.to_le_bytes())
                .collect(),
            linedefs: vec![
                line(0, 1, 0, Linedef::NO_SIDE),
                door,
                line(2, 3, 3, Linedef::NO_SIDE),
                line(3, 0, 4, Linedef::NO_SIDE),
                line(1, 4, 5, Linedef::NO_SIDE),
                line(4, 5, 6, Linedef::NO_SIDE),
                line(5, 2, 7, Linedef::NO_SIDE),
            ],
            sidedefs: vec![
                wall(0),
                opening(0),
                opening(1),
                wall(0),
                wall(0),
                wall(1),
                wall(1),
                wall(1),
            ],
            vertices: vec![
                Vertex { x: 0, y: 0 },
                Vertex { x: 64, y: 0 },
                Vertex { x: 64, y: 64 },
                Vertex { x: 0, y: 64 },
                Vertex { x: 128, y: 0 },
                Vertex { x: 128, y: 96 },
            ],
            segs: vec![
                seg(0, 1, 0, 0, 0),
                seg(1, 2, 16384, 1, 0),
                seg(2, 3, -32768, 2, 0),
                seg(3, 0, -16384, 3, 0),
                seg(1, 4, 0, 4, 0),
                seg(4, 5, 16384, 5, 0),
                seg(5, 2, -27932, 6, 0),
                seg(2, 1, -16384, 1, 1),
            ],
            subsectors: vec![
                SubSector { count: 4, first: 0 },
                SubSector { count: 4, first: 4 },
            ],
            nodes: vec![Node {
                x: 64,
                y: 0,
                dx: 0,
                dy: 64,
                right_box: [96, 0, 64, 128],
                left_box: [64, 0, 0, 64],
                right_child: Node::leaf(1),
                left_child: Node::leaf(0),
            }],
            sectors: vec![
                sector("FLOOR4_8", "CEIL3_5", 160),
                sector("FLAT14", "CEIL1_1", 192),
            ],
            reject: vec![0],
            blockmap: vec![0; 8],
            hexen: false,
        }
    }

    /// Same geometry in Hexen layout; the door becomes `Door_Raise(1, 16, 150)`
    #[must_use]
    pub fn hexen(mut self) -> Self {
        self.hexen = true;
        self.linedefs[1].special = 12;
        self.linedefs[1].args = [1, 16, 150, 0, 0];
        self
    }

    /// Structural lumps in canonical order
    pub fn lumps(&self) -> Vec<(String, Vec<u8>)> {
        let linedefs = if self.hexen {
            encode_all(&self.linedefs, Linedef::encode_hexen)
        } else {
            encode_all(&self.linedefs, Linedef::encode_doom)
        };

        let mut lumps = vec![
            ("THINGS".to_string(), self.things.clone()),
            ("LINEDEFS".to_string(), linedefs),
            ("SIDEDEFS".to_string(), encode_all(&self.sidedefs, Sidedef::encode_into)),
            ("VERTEXES".to_string(), encode_all(&self.vertices, Vertex::encode_into)),
            ("SEGS".to_string(), encode_all(&self.segs, Seg::encode_into)),
            ("SSECTORS".to_string(), encode_all(&self.subsectors, SubSector::encode_into)),
            ("NODES".to_string(), encode_all(&self.nodes, Node::encode_into)),
            ("SECTORS".to_string(), encode_all(&self.sectors, Sector::encode_into)),
            ("REJECT".to_string(), self.reject.clone()),
            ("BLOCKMAP".to_string(), self.blockmap.clone()),
        ];
        if self.hexen {
            lumps.push(("BEHAVIOR".to_string(), b"ACS\0\x08\0\0\0".to_vec()));
        }
        lumps
    }
}

/// Lumps of a GL companion group, label excluded
#[derive(Debug, Clone)]
pub struct GlFixture {
    /// Version tag at the start of `GL_VERT`
    pub magic: [u8; 4],
    pub vertices: Vec<GlVertex>,
    pub segs: Vec<GlSeg>,
    pub subsectors: Vec<SubSector>,
    pub nodes: Vec<Node>,
}

fn gl_seg(start: u16, end: u16, linedef: u16, direction: u16) -> GlSeg {
    GlSeg {
        start,
        end,
        linedef,
        direction,
        partner: 0xFFFF,
    }
}

impl GlFixture {
    /// GL v2 nodes for [`MapFixture::two_rooms`]
    ///
    /// Linedef 0 is split at the GL vertex (32.25, 0). Subsector 1 starts
    /// with a miniseg, and subsector 2 holds only a miniseg.
    pub fn two_rooms() -> Self {
        let gl = GlSeg::GL_VERTEX;
        let none = GlSeg::NO_LINEDEF;
        Self {
            magic: *b"gNd2",
            vertices: vec![GlVertex {
                x_integer: 32,
                x_fraction: 16384,
                y_integer: 0,
                y_fraction: 0,
            }],
            segs: vec![
                gl_seg(0, gl, 0, 0),
                gl_seg(gl, 1, 0, 0),
                gl_seg(1, 2, 1, 0),
                gl_seg(2, 3, 2, 0),
                gl_seg(3, 0, 3, 0),
                gl_seg(2, 1, none, 0),
                gl_seg(1, 4, 4, 0),
                gl_seg(4, 5, 5, 0),
                gl_seg(5, 2, 6, 0),
                gl_seg(5, 1, none, 0),
            ],
            subsectors: vec![
                SubSector { count: 5, first: 0 },
                SubSector { count: 5, first: 5 },
                SubSector { count: 1, first: 5 },
            ],
            nodes: vec![Node {
                x: 64,
                y: 64,
                dx: 0,
                dy: -64,
                right_box: [64, 0, 0, 64],
                left_box: [96, 0, 64, 128],
                right_child: Node::leaf(0),
                left_child: Node::leaf(1),
            }],
        }
    }

    /// Companion lumps in fixed order
    pub fn lumps(&self) -> Vec<(String, Vec<u8>)> {
        let mut vertices = self.magic.to_vec();
        vertices.extend(encode_all(&self.vertices, GlVertex::encode_into));
        vec![
            ("GL_VERT".to_string(), vertices),
            ("GL_SEGS".to_string(), encode_all(&self.segs, GlSeg::encode_into)),
            ("GL_SSECT".to_string(), encode_all(&self.subsectors, SubSector::encode_into)),
            ("GL_NODES".to_string(), encode_all(&self.nodes, Node::encode_into)),
        ]
    }
}
