//! Integration tests for the wadinfo CLI

use assert_cmd::Command;
use predicates::prelude::*;
use test_utils::{GlFixture, MapFixture, WadBuilder, write_temp_wad};

fn wadinfo() -> Command {
    let mut cmd = Command::cargo_bin("wadinfo").unwrap();
    cmd.env("NO_COLOR", "1").env_remove("WADINFO_NO_MMAP");
    cmd
}

fn sample_wad() -> tempfile::NamedTempFile {
    let data = WadBuilder::pwad()
        .lump("PLAYPAL", vec![0; 768])
        .map("MAP01", &MapFixture::two_rooms())
        .gl_nodes("MAP01", &GlFixture::two_rooms())
        .map("MAP02", &MapFixture::two_rooms().hexen())
        .build();
    write_temp_wad(&data)
}

#[test]
fn test_help_command() {
    wadinfo()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("reading Doom-engine WAD archives"))
        .stdout(predicate::str::contains("Commands:"))
        .stdout(predicate::str::contains("lumps"))
        .stdout(predicate::str::contains("maps"))
        .stdout(predicate::str::contains("level"));
}

#[test]
fn test_version_command() {
    wadinfo()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("wadinfo"));
}

#[test]
fn test_invalid_command() {
    wadinfo()
        .arg("invalid")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_lumps_with_filter() {
    let wad = sample_wad();
    wadinfo()
        .args(["lumps", "--filter", "gl_"])
        .arg(wad.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("GL_MAP01"))
        .stdout(predicate::str::contains("GL_NODES"))
        .stdout(predicate::str::contains("PLAYPAL").not());
}

#[test]
fn test_lumps_json() {
    let wad = sample_wad();
    wadinfo()
        .args(["--format", "json", "lumps"])
        .arg(wad.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("[{\"index\":0,"))
        .stdout(predicate::str::contains("\"name\":\"PLAYPAL\""))
        .stdout(predicate::str::contains("\"size\":768"));
}

#[test]
fn test_maps_json() {
    let wad = sample_wad();
    wadinfo()
        .args(["--format", "json", "maps"])
        .arg(wad.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\":\"MAP01\""))
        .stdout(predicate::str::contains("\"nodes_format\":\"GlBspV2\""))
        .stdout(predicate::str::contains("\"format\":\"Hexen\""))
        .stdout(predicate::str::contains("\"gl_label\":12"));
}

#[test]
fn test_maps_text() {
    let wad = sample_wad();
    wadinfo()
        .arg("maps")
        .arg(wad.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("(2 maps)"))
        .stdout(predicate::str::contains("GL v2"))
        .stdout(predicate::str::contains("Hexen"));
}

#[test]
fn test_level_summary() {
    let wad = sample_wad();
    wadinfo()
        .args(["level"])
        .arg(wad.path())
        .arg("map01")
        .assert()
        .success()
        .stdout(predicate::str::contains("Level MAP01"))
        .stdout(predicate::str::contains("Nodes: GL v2"))
        .stdout(predicate::str::contains("First GL vertex: 6"))
        .stdout(predicate::str::contains("1 subsectors have no resolvable sector"));
}

#[test]
fn test_level_classic_nodes_json() {
    let wad = sample_wad();
    wadinfo()
        .args(["--format", "json", "--no-mmap", "level", "--classic-nodes"])
        .arg(wad.path())
        .arg("MAP01")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"nodes_format\":\"Doom\""))
        .stdout(predicate::str::contains("\"first_extended_vertex\":null"))
        .stdout(predicate::str::contains("\"two_sided_linedefs\":1"));
}

#[test]
fn test_level_unknown_map() {
    let wad = sample_wad();
    wadinfo()
        .arg("level")
        .arg(wad.path())
        .arg("E9M9")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Map E9M9 not found"));
}

#[test]
fn test_bad_magic_fails() {
    let wad = write_temp_wad(&WadBuilder::with_magic(*b"JUNK").build());
    wadinfo()
        .arg("maps")
        .arg(wad.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open WAD"))
        .stderr(predicate::str::contains("Invalid WAD magic"));
}

#[test]
fn test_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    wadinfo()
        .arg("lumps")
        .arg(dir.path().join("nothing.wad"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open WAD"));
}
