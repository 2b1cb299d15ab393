//! Encoders for map lump records
//!
//! Field order and widths follow the on-disk layouts; every value is written
//! little-endian.

/// Encode a name into an 8-byte zero-padded field
pub fn name_bytes(name: &str) -> [u8; 8] {
    let mut raw = [0u8; 8];
    for (slot, byte) in raw.iter_mut().zip(name.bytes()) {
        *slot = byte;
    }
    raw
}

fn put_i16(out: &mut Vec<u8>, value: i16) {
    out.extend_from_slice(&value.to_le_bytes());
}

fn put_u16(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_le_bytes());
}

/// Classic vertex (4 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vertex {
    pub x: i16,
    pub y: i16,
}

impl Vertex {
    pub fn encode_into(&self, out: &mut Vec<u8>) {
        put_i16(out, self.x);
        put_i16(out, self.y);
    }
}

/// GL v2 vertex (8 bytes): fraction then integer, per axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlVertex {
    pub x_integer: i16,
    pub x_fraction: i16,
    pub y_integer: i16,
    pub y_fraction: i16,
}

impl GlVertex {
    pub fn encode_into(&self, out: &mut Vec<u8>) {
        put_i16(out, self.x_fraction);
        put_i16(out, self.x_integer);
        put_i16(out, self.y_fraction);
        put_i16(out, self.y_integer);
    }
}

/// Sector (26 bytes)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sector {
    pub floor_height: i16,
    pub ceiling_height: i16,
    pub floor_texture: String,
    pub ceiling_texture: String,
    pub light_level: i16,
    pub special: i16,
    pub tag: i16,
}

impl Sector {
    pub fn encode_into(&self, out: &mut Vec<u8>) {
        put_i16(out, self.floor_height);
        put_i16(out, self.ceiling_height);
        out.extend_from_slice(&name_bytes(&self.floor_texture));
        out.extend_from_slice(&name_bytes(&self.ceiling_texture));
        put_i16(out, self.light_level);
        put_i16(out, self.special);
        put_i16(out, self.tag);
    }
}

/// Sidedef (30 bytes)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sidedef {
    pub x_offset: i16,
    pub y_offset: i16,
    pub upper_texture: String,
    pub lower_texture: String,
    pub middle_texture: String,
    pub sector: u16,
}

impl Sidedef {
    pub fn encode_into(&self, out: &mut Vec<u8>) {
        put_i16(out, self.x_offset);
        put_i16(out, self.y_offset);
        out.extend_from_slice(&name_bytes(&self.upper_texture));
        out.extend_from_slice(&name_bytes(&self.lower_texture));
        out.extend_from_slice(&name_bytes(&self.middle_texture));
        put_u16(out, self.sector);
    }
}

/// Linedef, encodable in either layout
///
/// Doom maps write `special` and `tag`; Hexen maps write the low byte of
/// `special` followed by `args`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Linedef {
    pub start: u16,
    pub end: u16,
    pub flags: u16,
    pub special: u16,
    pub tag: u16,
    pub args: [u8; 5],
    pub front: u16,
    pub back: u16,
}

impl Linedef {
    /// Sentinel for an absent side
    pub const NO_SIDE: u16 = 0xFFFF;

    /// Doom layout (14 bytes)
    pub fn encode_doom(&self, out: &mut Vec<u8>) {
        put_u16(out, self.start);
        put_u16(out, self.end);
        put_u16(out, self.flags);
        put_u16(out, self.special);
        put_u16(out, self.tag);
        put_u16(out, self.front);
        put_u16(out, self.back);
    }

    /// Hexen layout (16 bytes)
    pub fn encode_hexen(&self, out: &mut Vec<u8>) {
        put_u16(out, self.start);
        put_u16(out, self.end);
        put_u16(out, self.flags);
        out.push(self.special.to_le_bytes()[0]);
        out.extend_from_slice(&self.args);
        put_u16(out, self.front);
        put_u16(out, self.back);
    }
}

/// Classic segment (12 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seg {
    pub start: u16,
    pub end: u16,
    pub angle: i16,
    pub linedef: u16,
    pub direction: u16,
    pub offset: i16,
}

impl Seg {
    pub fn encode_into(&self, out: &mut Vec<u8>) {
        put_u16(out, self.start);
        put_u16(out, self.end);
        put_i16(out, self.angle);
        put_u16(out, self.linedef);
        put_u16(out, self.direction);
        put_i16(out, self.offset);
    }
}

/// GL v2 segment (10 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlSeg {
    pub start: u16,
    pub end: u16,
    pub linedef: u16,
    pub direction: u16,
    pub partner: u16,
}

impl GlSeg {
    /// Flag marking a reference into the GL vertex run
    pub const GL_VERTEX: u16 = 0x8000;

    /// Linedef value of a miniseg
    pub const NO_LINEDEF: u16 = 0xFFFF;

    pub fn encode_into(&self, out: &mut Vec<u8>) {
        put_u16(out, self.start);
        put_u16(out, self.end);
        put_u16(out, self.linedef);
        put_u16(out, self.direction);
        put_u16(out, self.partner);
    }
}

/// Subsector (4 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubSector {
    pub count: u16,
    pub first: u16,
}

impl SubSector {
    pub fn encode_into(&self, out: &mut Vec<u8>) {
        put_u16(out, self.count);
        put_u16(out, self.first);
    }
}

/// BSP node (28 bytes); boxes are top, bottom, left, right
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Node {
    pub x: i16,
    pub y: i16,
    pub dx: i16,
    pub dy: i16,
    pub right_box: [i16; 4],
    pub left_box: [i16; 4],
    pub right_child: i16,
    pub left_child: i16,
}

impl Node {
    /// Child reference to a subsector
    pub const fn leaf(subsector: u16) -> i16 {
        (subsector | 0x8000) as i16
    }

    pub fn encode_into(&self, out: &mut Vec<u8>) {
        for value in [self.x, self.y, self.dx, self.dy] {
            put_i16(out, value);
        }
        for value in self.right_box.iter().chain(self.left_box.iter()) {
            put_i16(out, *value);
        }
        put_i16(out, self.right_child);
        put_i16(out, self.left_child);
    }
}

/// Encode a slice of records with a per-record encoder
pub fn encode_all<T>(items: &[T], encode: impl Fn(&T, &mut Vec<u8>)) -> Vec<u8> {
    let mut out = Vec::new();
    for item in items {
        encode(item, &mut out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_sizes() {
        let mut out = Vec::new();
        Sector {
            floor_height: 0,
            ceiling_height: 128,
            floor_texture: "FLAT1".into(),
            ceiling_texture: "F_SKY1".into(),
            light_level: 255,
            special: 0,
            tag: 0,
        }
        .encode_into(&mut out);
        assert_eq!(out.len(), 26);

        let line = Linedef {
            start: 0,
            end: 1,
            flags: 1,
            special: 0,
            tag: 0,
            args: [0; 5],
            front: 0,
            back: Linedef::NO_SIDE,
        };
        let mut doom = Vec::new();
        line.encode_doom(&mut doom);
        let mut hexen = Vec::new();
        line.encode_hexen(&mut hexen);
        assert_eq!((doom.len(), hexen.len()), (14, 16));

        assert_eq!(name_bytes("LONGERNAME"), *b"LONGERNA");
        assert_eq!(Node::leaf(1), -32767);
    }
}
