//! WAD archive reader with memory mapping support

use crate::map::{MapDescriptor, locate_maps};
use crate::wad::directory::{Lump, names_match};
use crate::wad::error::{Result, WadError};
use crate::wad::header::{HEADER_SIZE, WadHeader, WadKind};
use crate::wad::reader::LumpReader;
use binrw::BinRead;
use binrw::io::Cursor;
use memmap2::{Mmap, MmapOptions};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Upper bound on directory entries reserved up front
const MAX_PREALLOCATED_LUMPS: usize = 65_536;

/// Options controlling how an archive file is loaded
#[derive(Debug, Clone)]
pub struct ArchiveOptions {
    /// Memory-map the file instead of reading it into a buffer
    pub use_memory_mapping: bool,
    /// Files larger than this are always read into a buffer
    pub max_mapped_size: u64,
}

impl Default for ArchiveOptions {
    fn default() -> Self {
        Self {
            use_memory_mapping: true,
            max_mapped_size: 2 * 1024 * 1024 * 1024, // 2GB
        }
    }
}

impl ArchiveOptions {
    /// Always read the file into memory
    #[must_use]
    pub fn buffered() -> Self {
        Self {
            use_memory_mapping: false,
            ..Self::default()
        }
    }
}

/// Backing storage for the archive bytes
enum WadSource {
    Mapped(Mmap),
    Buffered(Vec<u8>),
}

impl WadSource {
    fn bytes(&self) -> &[u8] {
        match self {
            Self::Mapped(mmap) => mmap,
            Self::Buffered(data) => data,
        }
    }
}

/// An opened WAD archive
///
/// The header and lump directory are decoded once when the archive is
/// opened, and maps are located in the same pass. After that the archive is
/// read-only, so it can be shared between threads building different maps.
pub struct WadArchive {
    path: Option<PathBuf>,
    kind: WadKind,
    source: WadSource,
    lumps: Vec<Lump>,
    maps: Vec<MapDescriptor>,
}

impl std::fmt::Debug for WadArchive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WadArchive")
            .field("path", &self.path)
            .field("kind", &self.kind)
            .field("size", &self.file_size())
            .field("lumps", &self.lumps.len())
            .field("maps", &self.maps.len())
            .finish_non_exhaustive()
    }
}

impl WadArchive {
    /// Open a WAD file with default options
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_options(path, &ArchiveOptions::default())
    }

    /// Open a WAD file
    pub fn open_with_options(path: impl AsRef<Path>, options: &ArchiveOptions) -> Result<Self> {
        let path = path.as_ref();
        let mut file = File::open(path)?;
        let size = file.metadata()?.len();

        debug!("Opening WAD: {:?} (size: {} bytes)", path, size);

        let mapped = if options.use_memory_mapping && size > 0 && size <= options.max_mapped_size
        {
            // SAFETY: the mapping is only ever read through shared slices.
            #[allow(unsafe_code)]
            let mapped = unsafe { MmapOptions::new().map(&file) };
            match mapped {
                Ok(mmap) => {
                    debug!("Successfully memory-mapped WAD");
                    Some(mmap)
                }
                Err(e) => {
                    debug!("Failed to memory-map WAD, reading into memory: {}", e);
                    None
                }
            }
        } else {
            None
        };

        let source = if let Some(mmap) = mapped {
            WadSource::Mapped(mmap)
        } else {
            let mut data = Vec::with_capacity(size as usize);
            file.read_to_end(&mut data)?;
            WadSource::Buffered(data)
        };

        Self::from_source(source, Some(path.to_path_buf()))
    }

    /// Parse an archive held in memory
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        Self::from_source(WadSource::Buffered(data), None)
    }

    fn from_source(source: WadSource, path: Option<PathBuf>) -> Result<Self> {
        let data = source.bytes();
        if data.len() < HEADER_SIZE {
            return Err(WadError::TruncatedHeader { size: data.len() });
        }

        let mut cursor = Cursor::new(data);
        let header = WadHeader::read(&mut cursor)?;
        let kind = header.kind()?;

        if header.directory_end() > data.len() as u64 {
            return Err(WadError::DirectoryOutOfBounds {
                offset: header.directory_offset,
                lump_count: header.lump_count,
                file_size: data.len(),
            });
        }

        cursor.set_position(u64::from(header.directory_offset));
        let capacity = (header.lump_count as usize).min(MAX_PREALLOCATED_LUMPS);
        let mut lumps = Vec::with_capacity(capacity);
        for _ in 0..header.lump_count {
            lumps.push(Lump::read(&mut cursor)?);
        }

        debug!(
            "Parsed {:?} directory: {} lumps at offset {:#x}",
            kind,
            lumps.len(),
            header.directory_offset
        );

        let mut archive = Self {
            path,
            kind,
            source,
            lumps,
            maps: Vec::new(),
        };
        archive.maps = locate_maps(&archive);

        debug!("Located {} maps", archive.maps.len());

        Ok(archive)
    }

    /// Path the archive was opened from, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Archive flavour from the header magic
    pub fn kind(&self) -> WadKind {
        self.kind
    }

    /// Size of the archive in bytes
    pub fn file_size(&self) -> usize {
        self.source.bytes().len()
    }

    /// Check if the archive is memory-mapped
    pub fn is_memory_mapped(&self) -> bool {
        matches!(self.source, WadSource::Mapped(_))
    }

    /// The lump directory in file order
    pub fn lumps(&self) -> &[Lump] {
        &self.lumps
    }

    /// Number of lumps in the directory
    pub fn lump_count(&self) -> usize {
        self.lumps.len()
    }

    /// Directory entry at `index`
    pub fn lump(&self, index: usize) -> Result<&Lump> {
        self.lumps.get(index).ok_or(WadError::LumpIndexOutOfBounds {
            index,
            count: self.lumps.len(),
        })
    }

    /// Maps located when the archive was opened, in directory order
    pub fn maps(&self) -> &[MapDescriptor] {
        &self.maps
    }

    /// Find a located map by name, ignoring case
    pub fn map(&self, name: &str) -> Option<&MapDescriptor> {
        self.maps.iter().find(|map| names_match(&map.name, name))
    }

    /// Index of the first lump with the given name, ignoring case
    pub fn find_lump(&self, name: &str) -> Option<usize> {
        self.find_lump_from(name, 0)
    }

    /// Index of the first lump at or after `start` with the given name
    pub fn find_lump_from(&self, name: &str, start: usize) -> Option<usize> {
        self.lumps
            .iter()
            .enumerate()
            .skip(start)
            .find(|(_, lump)| lump.is_named(name))
            .map(|(index, _)| index)
    }

    /// Check whether any lump has the given name
    pub fn contains_lump(&self, name: &str) -> bool {
        self.find_lump(name).is_some()
    }

    /// Raw bytes of the lump at `index`
    pub fn read_lump(&self, index: usize) -> Result<&[u8]> {
        let lump = self.lump(index)?;
        let data = self.source.bytes();

        if lump.end() > data.len() as u64 {
            return Err(WadError::LumpOutOfBounds {
                name: lump.name.clone(),
                position: lump.position,
                size: lump.size,
                file_size: data.len(),
            });
        }

        trace!("Reading lump {} ({}): {} bytes", index, lump.name, lump.size);

        let start = lump.position as usize;
        Ok(&data[start..start + lump.size as usize])
    }

    /// Raw bytes of the first lump with the given name
    ///
    /// A missing lump is `Ok(None)`, not an error.
    pub fn read_lump_by_name(&self, name: &str) -> Result<Option<&[u8]>> {
        match self.find_lump(name) {
            Some(index) => self.read_lump(index).map(Some),
            None => Ok(None),
        }
    }

    /// Bounded reader over the lump at `index`
    pub fn open_lump(&self, index: usize) -> Result<LumpReader<'_>> {
        let data = self.read_lump(index)?;
        Ok(LumpReader::new(&self.lumps[index].name, data))
    }

    /// Bounded reader over the first lump with the given name
    pub fn open_lump_by_name(&self, name: &str) -> Result<Option<LumpReader<'_>>> {
        match self.find_lump(name) {
            Some(index) => self.open_lump(index).map(Some),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::{Seek, SeekFrom};
    use test_utils::WadBuilder;

    fn sample_wad() -> Vec<u8> {
        WadBuilder::pwad()
            .lump("PLAYPAL", vec![1, 2, 3, 4])
            .marker("F_START")
            .lump("FLAT1", vec![9; 16])
            .marker("F_END")
            .lump("playpal", vec![5, 6])
            .build()
    }

    #[test]
    fn test_from_bytes_reads_directory() {
        let archive = WadArchive::from_bytes(sample_wad()).expect("Operation should succeed");
        assert_eq!(archive.kind(), WadKind::Pwad);
        assert_eq!(archive.lump_count(), 5);
        assert!(archive.path().is_none());
        assert!(!archive.is_memory_mapped());

        let names: Vec<&str> = archive.lumps().iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["PLAYPAL", "F_START", "FLAT1", "F_END", "playpal"]);
        assert!(archive.maps().is_empty());
    }

    #[test]
    fn test_find_is_case_insensitive() {
        let archive = WadArchive::from_bytes(sample_wad()).unwrap();
        assert_eq!(archive.find_lump("flat1"), Some(2));
        assert_eq!(archive.find_lump("PlayPal"), Some(0));
        assert!(archive.contains_lump("f_end"));
        assert_eq!(archive.find_lump("COLORMAP"), None);
        assert!(!archive.contains_lump("COLORMAP"));
    }

    #[test]
    fn test_find_from_start_index() {
        let archive = WadArchive::from_bytes(sample_wad()).unwrap();
        assert_eq!(archive.find_lump_from("PLAYPAL", 0), Some(0));
        assert_eq!(archive.find_lump_from("PLAYPAL", 1), Some(4));
        assert_eq!(archive.find_lump_from("PLAYPAL", 5), None);
        assert_eq!(archive.find_lump_from("PLAYPAL", 100), None);
    }

    #[test]
    fn test_read_lump() {
        let archive = WadArchive::from_bytes(sample_wad()).unwrap();
        assert_eq!(archive.read_lump(0).unwrap(), &[1u8, 2, 3, 4]);
        assert_eq!(archive.read_lump(1).unwrap(), &[] as &[u8]);
        assert_eq!(archive.read_lump(4).unwrap(), &[5u8, 6]);

        assert_eq!(
            archive.read_lump_by_name("flat1").unwrap(),
            Some(&[9u8; 16][..])
        );
        assert_eq!(archive.read_lump_by_name("MISSING").unwrap(), None);
    }

    #[test]
    fn test_read_lump_index_out_of_bounds() {
        let archive = WadArchive::from_bytes(sample_wad()).unwrap();
        assert!(matches!(
            archive.read_lump(5),
            Err(WadError::LumpIndexOutOfBounds { index: 5, count: 5 })
        ));
        assert!(archive.lump(99).is_err());
        assert!(archive.open_lump(5).is_err());
    }

    #[test]
    fn test_open_lump_reader() {
        let archive = WadArchive::from_bytes(sample_wad()).unwrap();
        let mut reader = archive.open_lump(2).unwrap();
        assert_eq!(reader.name(), "FLAT1");
        assert_eq!(reader.len(), 16);

        reader.seek(SeekFrom::End(-4)).unwrap();
        let mut tail = Vec::new();
        reader.read_to_end(&mut tail).unwrap();
        assert_eq!(tail, vec![9; 4]);

        assert!(archive.open_lump_by_name("nothing").unwrap().is_none());
        let reader = archive.open_lump_by_name("PLAYPAL").unwrap().unwrap();
        assert_eq!(reader.as_slice(), &[1u8, 2, 3, 4]);
    }

    #[test]
    fn test_invalid_magic() {
        let data = WadBuilder::with_magic(*b"ZWAD").build();
        let result = WadArchive::from_bytes(data);
        assert!(matches!(result, Err(WadError::InvalidMagic(m)) if m == *b"ZWAD"));
    }

    #[test]
    fn test_truncated_header() {
        let result = WadArchive::from_bytes(b"IWAD\x00\x00".to_vec());
        assert!(matches!(
            result,
            Err(WadError::TruncatedHeader { size: 6 })
        ));
    }

    #[test]
    fn test_directory_out_of_bounds() {
        let mut data = Vec::new();
        data.extend_from_slice(b"IWAD");
        data.extend_from_slice(&4u32.to_le_bytes());
        data.extend_from_slice(&12u32.to_le_bytes());
        // Room for one directory entry, header claims four
        data.extend_from_slice(&[0u8; 16]);

        assert!(matches!(
            WadArchive::from_bytes(data),
            Err(WadError::DirectoryOutOfBounds { lump_count: 4, .. })
        ));
    }

    #[test]
    fn test_lump_out_of_bounds_is_lazy() {
        let mut data = WadBuilder::iwad().lump("DEMO1", vec![0; 8]).build();
        // Point the single entry's size far past the end of the file
        let dir_offset = u32::from_le_bytes([data[8], data[9], data[10], data[11]]) as usize;
        data[dir_offset + 4..dir_offset + 8].copy_from_slice(&0xFFFF_u32.to_le_bytes());

        let archive = WadArchive::from_bytes(data).expect("Opening should not touch lump data");
        assert_eq!(archive.find_lump("DEMO1"), Some(0));
        assert!(matches!(
            archive.read_lump(0),
            Err(WadError::LumpOutOfBounds { ref name, .. }) if name == "DEMO1"
        ));
    }

    #[test]
    fn test_open_from_disk() {
        let file = test_utils::write_temp_wad(&sample_wad());

        let mapped = WadArchive::open(file.path()).expect("Operation should succeed");
        assert!(mapped.is_memory_mapped());
        assert_eq!(mapped.path(), Some(file.path()));
        assert_eq!(mapped.read_lump(0).unwrap(), &[1u8, 2, 3, 4]);

        let buffered = WadArchive::open_with_options(file.path(), &ArchiveOptions::buffered())
            .expect("Operation should succeed");
        assert!(!buffered.is_memory_mapped());
        assert_eq!(buffered.lumps(), mapped.lumps());
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = WadArchive::open(dir.path().join("missing.wad"));
        assert!(matches!(result, Err(WadError::Io(_))));
    }
}
