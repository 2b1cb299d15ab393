//! Map detection inside the lump directory
//!
//! Maps have no header of their own. A binary map is a label lump followed by
//! a fixed sequence of structural lumps; a text map is a label, `TEXTMAP`,
//! any number of lumps, and `ENDMAP`. Maps built with glBSP carry a second
//! group (`GL_<label>`, `GL_VERT`, `GL_SEGS`, `GL_SSECT`, `GL_NODES`) that the
//! locator pairs with the map and classifies by version.

pub mod descriptor;
pub mod locator;

pub use descriptor::{GlLump, MapDescriptor, MapFormat, MapLump, NodesFormat};
pub use locator::{GL_V2_MAGIC, gl_label_name, locate_maps};
