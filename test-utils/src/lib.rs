//! Test utilities for doomwad
//!
//! Builds synthetic WAD images for unit and integration tests, and discovers
//! real IWADs for the tests that want one.

pub mod fixtures;
pub mod records;
pub mod wad;

pub use fixtures::{GlFixture, MapFixture};
pub use wad::{WadBuilder, write_temp_wad};

use std::path::{Path, PathBuf};

/// Environment variable naming a specific IWAD file
pub const DOOM_WAD_ENV: &str = "DOOM_WAD";

/// Environment variable naming a directory of WAD files
pub const DOOM_WAD_DIR_ENV: &str = "DOOMWADDIR";

/// IWAD file names tried inside a WAD directory, in order
const IWAD_NAMES: &[&str] = &[
    "doom2.wad",
    "doom.wad",
    "plutonia.wad",
    "tnt.wad",
    "freedoom2.wad",
    "freedoom1.wad",
    "doom1.wad",
    "DOOM2.WAD",
    "DOOM.WAD",
];

/// Attempts to locate an IWAD
pub fn find_iwad() -> Option<PathBuf> {
    // Strategy 1: Explicit file
    if let Ok(path) = std::env::var(DOOM_WAD_ENV) {
        let path = PathBuf::from(shellexpand::tilde(&path).to_string());
        if is_valid_wad(&path) {
            return Some(path);
        }
    }

    // Strategy 2: WAD directory from the environment, then common locations
    let mut dirs = Vec::new();
    if let Ok(dir) = std::env::var(DOOM_WAD_DIR_ENV) {
        dirs.push(PathBuf::from(shellexpand::tilde(&dir).to_string()));
    }
    dirs.extend(common_wad_dirs());

    dirs.iter()
        .flat_map(|dir| IWAD_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| is_valid_wad(path))
}

/// Common WAD directories for the current platform
fn common_wad_dirs() -> Vec<PathBuf> {
    let dirs = if cfg!(windows) {
        vec!["C:\\Games\\Doom", "C:\\Program Files\\Doom"]
    } else if cfg!(target_os = "macos") {
        vec!["~/Library/Application Support/doom", "~/Games/doom"]
    } else {
        vec![
            "~/.local/share/games/doom",
            "~/games/doom",
            "/usr/share/games/doom",
            "/usr/local/share/games/doom",
            "/usr/share/doom",
        ]
    };

    dirs.into_iter()
        .map(|dir| PathBuf::from(shellexpand::tilde(dir).to_string()))
        .collect()
}

/// Check that a file starts with an `IWAD` or `PWAD` tag
pub fn is_valid_wad(path: &Path) -> bool {
    use std::io::Read;

    if !path.is_file() {
        return false;
    }

    let mut magic = [0u8; 4];
    std::fs::File::open(path)
        .and_then(|mut file| file.read_exact(&mut magic))
        .is_ok()
        && (&magic == b"IWAD" || &magic == b"PWAD")
}

/// Print instructions for pointing tests at an IWAD
pub fn print_setup_instructions() {
    println!("IWAD Setup Instructions:");
    println!("========================");
    println!();
    println!("To run tests that require a real game archive, set one of:");
    println!();
    println!("  {DOOM_WAD_ENV} = /path/to/doom2.wad");
    println!("  {DOOM_WAD_DIR_ENV} = /path/to/wad/directory");
    println!();
    println!("Freedoom IWADs (freedoom1.wad, freedoom2.wad) work as well.");
}

/// Get an IWAD path or skip the test with a helpful message
#[macro_export]
macro_rules! require_iwad {
    () => {
        match $crate::find_iwad() {
            Some(path) => path,
            None => {
                println!("Skipping test - no IWAD found");
                $crate::print_setup_instructions();
                return;
            }
        }
    };
}
