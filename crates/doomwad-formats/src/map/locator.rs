//! Map detection over the lump directory

use crate::map::descriptor::{GlLump, MapDescriptor, MapFormat, MapLump, NodesFormat, named_slot};
use crate::wad::{Lump, WadArchive};
use tracing::{debug, trace, warn};

/// Version magic at the start of a glBSP v2 `GL_VERT` lump
pub const GL_V2_MAGIC: [u8; 4] = *b"gNd2";

/// Number of label characters kept in a GL companion label
const GL_LABEL_PREFIX: usize = 5;

/// Locate every map in the archive's directory, in directory order
///
/// Binary maps are found through their `THINGS` lump and text maps through
/// `TEXTMAP`; in both cases the preceding lump is the map label. A map whose
/// GL companion cannot be recognized is still returned, with
/// [`NodesFormat::Unknown`].
pub fn locate_maps(archive: &WadArchive) -> Vec<MapDescriptor> {
    let lumps = archive.lumps();
    let mut maps = Vec::new();

    for (index, lump) in lumps.iter().enumerate() {
        let is_binary = lump.is_named(MapLump::Things.name());
        let is_text = lump.is_named("TEXTMAP");
        if !is_binary && !is_text {
            continue;
        }

        let Some(label) = index.checked_sub(1) else {
            trace!("{} at directory start has no label, skipping", lump.name);
            continue;
        };

        let (end, format) = if is_binary {
            binary_map_range(lumps, label)
        } else if let Some(end) = text_map_end(lumps, index) {
            (end, MapFormat::Udmf)
        } else {
            debug!(
                "Text map {} has no ENDMAP terminator, skipping",
                lumps[label].name
            );
            continue;
        };

        let name = lumps[label].name.clone();
        let (gl_label, nodes_format) = probe_gl_nodes(archive, label, &name);

        let map = MapDescriptor {
            name,
            label,
            end,
            format,
            nodes_format,
            gl_label,
        };
        debug!("{}", map);
        maps.push(map);
    }

    maps
}

/// Extend a binary map's range over its structural lumps
///
/// The canonical sequence is matched one name at a time from the label; the
/// first mismatch ends the range without rejecting the map.
fn binary_map_range(lumps: &[Lump], label: usize) -> (usize, MapFormat) {
    let mut end = label;
    for expected in MapLump::SEQUENCE {
        match lumps.get(end + 1) {
            Some(lump) if lump.is_named(expected.name()) => end += 1,
            _ => {
                if expected != MapLump::Things {
                    trace!(
                        "Map {} ends early: expected {} at index {}",
                        lumps[label].name,
                        expected.name(),
                        end + 1
                    );
                }
                break;
            }
        }
    }

    let mut format = MapFormat::Doom;
    if lumps
        .get(end + 1)
        .is_some_and(|lump| lump.is_named(MapLump::Behavior.name()))
    {
        format = MapFormat::Hexen;
        end += 1;
    }
    if lumps
        .get(end + 1)
        .is_some_and(|lump| lump.is_named(MapLump::Scripts.name()))
    {
        end += 1;
    }

    (end, format)
}

/// Index of the `ENDMAP` lump closing a text map
fn text_map_end(lumps: &[Lump], textmap: usize) -> Option<usize> {
    lumps
        .iter()
        .enumerate()
        .skip(textmap)
        .find(|(_, lump)| lump.is_named("ENDMAP"))
        .map(|(index, _)| index)
}

/// Name of the GL companion label for a map label
pub fn gl_label_name(map_name: &str) -> String {
    let prefix: String = map_name.chars().take(GL_LABEL_PREFIX).collect();
    format!("GL_{prefix}")
}

/// Look for a GL companion group and classify its version
fn probe_gl_nodes(
    archive: &WadArchive,
    label: usize,
    map_name: &str,
) -> (Option<usize>, NodesFormat) {
    let gl_name = gl_label_name(map_name);
    let Some(gl_label) = archive.find_lump_from(&gl_name, label) else {
        return (None, NodesFormat::Doom);
    };

    let magic = named_slot(archive, gl_label + GlLump::Vertices.offset(), GlLump::Vertices.name())
        .and_then(|index| archive.read_lump(index).ok())
        .and_then(|data| data.get(..4));

    let nodes_format = match magic {
        Some(magic) if magic == GL_V2_MAGIC => NodesFormat::GlBspV2,
        Some(magic) => {
            warn!(
                "{}: unsupported GL nodes version {:?}",
                gl_name,
                String::from_utf8_lossy(magic)
            );
            NodesFormat::Unknown
        }
        None => {
            warn!("{}: GL vertex lump missing or unreadable", gl_name);
            NodesFormat::Unknown
        }
    };

    (Some(gl_label), nodes_format)
}
