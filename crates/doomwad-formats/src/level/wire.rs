//! On-disk record layouts for map lumps
//!
//! Every record is little-endian with a fixed size. Index fields are read as
//! unsigned 16-bit values; `0xFFFF` is the "none" sentinel and is turned into
//! `None` before it leaves this module.

use crate::geometry::Point2;
use crate::level::error::{LevelError, Result};
use crate::wad::directory::{NAME_LENGTH, decode_name};
use binrw::BinRead;
use binrw::io::Cursor;

/// Wire value meaning "no index"
pub const NO_INDEX: u16 = 0xFFFF;

/// Bit marking a GL vertex reference into the extended vertex run
pub const GL_VERTEX_FLAG: u16 = 0x8000;

/// Scale of the fractional half of a GL vertex coordinate
const FIXED_ONE: f32 = 65536.0;

/// A fixed-size record decodable from a map lump
pub(crate) trait WireRecord: for<'a> BinRead<Args<'a> = ()> {
    /// Encoded size in bytes
    const SIZE: usize;
}

/// Decode a lump as a packed array of records
///
/// The lump length must be a whole multiple of the record size.
pub(crate) fn decode_records<T: WireRecord>(lump: &str, data: &[u8]) -> Result<Vec<T>> {
    if data.len() % T::SIZE != 0 {
        return Err(LevelError::InvalidLumpSize {
            lump: lump.to_string(),
            size: data.len(),
            record_size: T::SIZE,
        });
    }

    let count = data.len() / T::SIZE;
    let mut cursor = Cursor::new(data);
    let mut records = Vec::with_capacity(count);
    for _ in 0..count {
        records.push(T::read_le(&mut cursor)?);
    }
    Ok(records)
}

/// Map a wire index to `None` when it holds the sentinel
pub(crate) fn optional_index(raw: u16) -> Option<usize> {
    (raw != NO_INDEX).then_some(usize::from(raw))
}

/// Resolve a GL v2 vertex reference
///
/// With [`GL_VERTEX_FLAG`] set the low 15 bits index the GL vertex run,
/// otherwise the value is a classic vertex index.
pub fn resolve_gl_vertex(raw: u16, first_extended_vertex: usize) -> usize {
    if raw & GL_VERTEX_FLAG == 0 {
        usize::from(raw)
    } else {
        usize::from(raw & !GL_VERTEX_FLAG) + first_extended_vertex
    }
}

/// Combine the halves of a GL vertex coordinate
pub fn gl_coordinate(integer: i16, fraction: i16) -> f32 {
    f32::from(integer) + f32::from(fraction) / FIXED_ONE
}

#[derive(Debug, Clone, BinRead)]
#[br(little)]
pub(crate) struct RawSector {
    pub floor_height: i16,
    pub ceiling_height: i16,
    #[br(map = |raw: [u8; NAME_LENGTH]| decode_name(&raw))]
    pub floor_texture: String,
    #[br(map = |raw: [u8; NAME_LENGTH]| decode_name(&raw))]
    pub ceiling_texture: String,
    pub light_level: i16,
    pub special: i16,
    pub tag: i16,
}

impl WireRecord for RawSector {
    const SIZE: usize = 26;
}

#[derive(Debug, Clone, Copy, BinRead)]
#[br(little)]
pub(crate) struct RawVertex {
    pub x: i16,
    pub y: i16,
}

impl WireRecord for RawVertex {
    const SIZE: usize = 4;
}

impl RawVertex {
    pub fn point(self) -> Point2 {
        Point2::new(f32::from(self.x), f32::from(self.y))
    }
}

/// glBSP v2 vertex: 16.16 fixed point, fraction half first per axis
#[derive(Debug, Clone, Copy, BinRead)]
#[br(little)]
pub(crate) struct RawGlVertex {
    pub x_fraction: i16,
    pub x_integer: i16,
    pub y_fraction: i16,
    pub y_integer: i16,
}

impl WireRecord for RawGlVertex {
    const SIZE: usize = 8;
}

impl RawGlVertex {
    pub fn point(self) -> Point2 {
        Point2::new(
            gl_coordinate(self.x_integer, self.x_fraction),
            gl_coordinate(self.y_integer, self.y_fraction),
        )
    }
}

#[derive(Debug, Clone, BinRead)]
#[br(little)]
pub(crate) struct RawSidedef {
    pub x_offset: i16,
    pub y_offset: i16,
    #[br(map = |raw: [u8; NAME_LENGTH]| decode_name(&raw))]
    pub upper_texture: String,
    #[br(map = |raw: [u8; NAME_LENGTH]| decode_name(&raw))]
    pub lower_texture: String,
    #[br(map = |raw: [u8; NAME_LENGTH]| decode_name(&raw))]
    pub middle_texture: String,
    pub sector: u16,
}

impl WireRecord for RawSidedef {
    const SIZE: usize = 30;
}

#[derive(Debug, Clone, Copy, BinRead)]
#[br(little)]
pub(crate) struct RawDoomLinedef {
    pub start: u16,
    pub end: u16,
    pub flags: u16,
    pub special: u16,
    pub tag: u16,
    pub front: u16,
    pub back: u16,
}

impl WireRecord for RawDoomLinedef {
    const SIZE: usize = 14;
}

#[derive(Debug, Clone, Copy, BinRead)]
#[br(little)]
pub(crate) struct RawHexenLinedef {
    pub start: u16,
    pub end: u16,
    pub flags: u16,
    pub special: u8,
    pub args: [u8; 5],
    pub front: u16,
    pub back: u16,
}

impl WireRecord for RawHexenLinedef {
    const SIZE: usize = 16;
}

#[derive(Debug, Clone, Copy, BinRead)]
#[br(little)]
pub(crate) struct RawSeg {
    pub start: u16,
    pub end: u16,
    pub angle: i16,
    pub linedef: u16,
    pub direction: u16,
    pub offset: i16,
}

impl WireRecord for RawSeg {
    const SIZE: usize = 12;
}

#[derive(Debug, Clone, Copy, BinRead)]
#[br(little)]
pub(crate) struct RawGlSeg {
    pub start: u16,
    pub end: u16,
    pub linedef: u16,
    pub direction: u16,
    // Partner seg on the other side of the line; not used
    pub _partner: u16,
}

impl WireRecord for RawGlSeg {
    const SIZE: usize = 10;
}

#[derive(Debug, Clone, Copy, BinRead)]
#[br(little)]
pub(crate) struct RawSubSector {
    pub count: u16,
    pub first: u16,
}

impl WireRecord for RawSubSector {
    const SIZE: usize = 4;
}

#[derive(Debug, Clone, Copy, BinRead)]
#[br(little)]
pub(crate) struct RawBox {
    pub top: i16,
    pub bottom: i16,
    pub left: i16,
    pub right: i16,
}

#[derive(Debug, Clone, Copy, BinRead)]
#[br(little)]
pub(crate) struct RawNode {
    pub x: i16,
    pub y: i16,
    pub dx: i16,
    pub dy: i16,
    pub right_box: RawBox,
    pub left_box: RawBox,
    pub right_child: i16,
    pub left_child: i16,
}

impl WireRecord for RawNode {
    const SIZE: usize = 28;
}
