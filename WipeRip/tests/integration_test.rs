use std::path::Path;

use pretty_assertions::assert_eq;
use tempfile::tempdir;
use wiperip::Error;
use wiperip::converter::ExportOptions;
use wiperip::formats::Game;
use wiperip::rip::{OBJECTS_DIR, SKY_DIR, TRACK_DIR, rip_common, rip_track};

// ---------------------------------------------------------------------------
// Synthetic asset writers
// ---------------------------------------------------------------------------

/// MSB-first bit writer for container streams.
#[derive(Default)]
struct Bits {
    bytes: Vec<u8>,
    bit: u8,
}

impl Bits {
    fn push(&mut self, value: u32, width: u32) {
        for shift in (0..width).rev() {
            if self.bit == 0 {
                self.bytes.push(0);
                self.bit = 0x80;
            }
            if value & (1 << shift) != 0 {
                *self.bytes.last_mut().unwrap() |= self.bit;
            }
            self.bit >>= 1;
        }
    }
}

/// Pack files into a container using literals only.
fn container(files: &[Vec<u8>]) -> Vec<u8> {
    let mut data = Vec::new();
    data.extend_from_slice(&(files.len() as u32).to_le_bytes());
    for file in files {
        data.extend_from_slice(&(file.len() as u32).to_le_bytes());
    }
    let mut bits = Bits::default();
    for &byte in files.iter().flatten() {
        bits.push(1, 1);
        bits.push(u32::from(byte), 8);
    }
    bits.push(0, 1);
    bits.push(0, 13);
    data.extend_from_slice(&bits.bytes);
    data
}

/// A 16-bit true color image filled with one color word.
fn tim(width: u16, height: u16, word: u16) -> Vec<u8> {
    let mut data = Vec::new();
    data.extend_from_slice(&0x10u32.to_le_bytes());
    data.extend_from_slice(&0x02u32.to_le_bytes());
    data.extend_from_slice(&0u32.to_le_bytes());
    data.extend_from_slice(&[0; 8]);
    data.extend_from_slice(&0u32.to_le_bytes());
    for v in [0u16, 0, width, height] {
        data.extend_from_slice(&v.to_le_bytes());
    }
    for _ in 0..usize::from(width) * usize::from(height) {
        data.extend_from_slice(&word.to_le_bytes());
    }
    data
}

fn object(name: &str, position: [i32; 3], vertices: &[[i16; 3]], polygons: &[Vec<u8>]) -> Vec<u8> {
    let mut out = vec![0u8; 144];
    out[..name.len()].copy_from_slice(name.as_bytes());
    out[16..18].copy_from_slice(&(vertices.len() as u16).to_be_bytes());
    out[32..34].copy_from_slice(&(polygons.len() as u16).to_be_bytes());
    for (i, v) in position.iter().enumerate() {
        out[116 + i * 4..120 + i * 4].copy_from_slice(&v.to_be_bytes());
    }
    for v in vertices {
        for c in v {
            out.extend_from_slice(&c.to_be_bytes());
        }
        out.extend_from_slice(&[0, 0]);
    }
    for p in polygons {
        out.extend_from_slice(p);
    }
    out
}

fn be16(values: &[u16]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_be_bytes()).collect()
}

/// `0x01` triangle.
fn flat_tri(indices: [u16; 3], color: u32) -> Vec<u8> {
    let mut out = be16(&[0x01, 0, indices[0], indices[1], indices[2], 0]);
    out.extend_from_slice(&color.to_be_bytes());
    out
}

/// `0x04` quad textured from `texture`.
fn textured_quad(indices: [u16; 4], texture: u16) -> Vec<u8> {
    let mut out = be16(&[0x04, 0, indices[0], indices[1], indices[2], indices[3], texture]);
    out.extend_from_slice(&[0; 4]);
    out.extend_from_slice(&[0, 0, 3, 0, 0, 3, 3, 3]);
    out.extend_from_slice(&[0; 2]);
    out.extend_from_slice(&0xFF00_0000u32.to_be_bytes());
    out
}

fn square() -> Vec<[i16; 3]> {
    vec![[0, 0, 0], [100, 0, 0], [100, 0, 100], [0, 0, 100]]
}

fn write(dir: &Path, name: &str, data: &[u8]) {
    std::fs::write(dir.join(name), data).unwrap();
}

fn read(path: impl AsRef<Path>) -> String {
    std::fs::read_to_string(path).unwrap()
}

/// A minimal but complete track folder.
fn track_folder(dir: &Path, game: Game) {
    write(dir, "LIBRARY.CMP", &container(&[tim(32, 32, 0x001f)]));
    write(dir, "SCENE.CMP", &container(&[tim(4, 4, 0x03e0)]));
    write(dir, "SKY.CMP", &container(&[]));

    let scene = object("pylon", [1000, 0, 0], &square(), &[textured_quad([0, 1, 2, 3], 0)]);
    write(dir, "SCENE.PRM", &scene);
    let sky = object("sky", [0, 0, 0], &square(), &[flat_tri([0, 1, 2], 0x4080_C000)]);
    write(dir, "SKY.PRM", &sky);

    write(dir, "LIBRARY.TTF", &[0u8; 42]);

    let mut trv = Vec::new();
    for (x, z) in [(0, 0), (1000, 0), (1000, 1000), (0, 1000)] {
        for c in [x, -50, z, 0i32] {
            trv.extend_from_slice(&c.to_be_bytes());
        }
    }
    write(dir, "TRACK.TRV", &trv);

    let mut trf = be16(&[0, 1, 2, 3, 0, 0xF000, 0]);
    trf.extend_from_slice(&[0, 0x01]);
    trf.extend_from_slice(&0x8080_8000u32.to_be_bytes());
    write(dir, "TRACK.TRF", &trf);

    let mut trs = Vec::new();
    for v in [-1i32, 0, 0, 500, -50, 500] {
        trs.extend_from_slice(&v.to_be_bytes());
    }
    trs.resize(156, 0);
    write(dir, "TRACK.TRS", &trs);

    if game == Game::Wipeout2097 {
        // Tile 0 with the boost flag
        write(dir, "TRACK.TEX", &[0, 32]);
    }
}

// ---------------------------------------------------------------------------
// Track rips
// ---------------------------------------------------------------------------

#[test]
fn test_track_rip() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    track_folder(input.path(), Game::Wipeout);

    let report = rip_track(input.path(), output.path(), Game::Wipeout, &ExportOptions::default()).unwrap();
    assert_eq!(report.objects, 2);
    assert_eq!(report.images, 2);
    assert_eq!(report.faces, 3);

    let track_dir = output.path().join(TRACK_DIR);
    let track = read(track_dir.join("track.obj"));
    assert!(track.starts_with("mtllib track.mtl\no track\nv 0 -50 0\n"));
    assert!(track.contains("#vcolor 128 128 128\n"));
    assert!(track.contains("usemtl track_0\nf 4/1 3/2 2/3 1/4\n#fvcolorindex 1 1 1 1\n"));
    assert!(track_dir.join("track_0.png").is_file());
    assert!(track_dir.join("white.png").is_file());
    assert_eq!(read(track_dir.join("sections.obj")), "v 500 -50 500\n");
    assert!(read(track_dir.join("track.mtl")).contains("newmtl track_0\nmap_Kd track_0.png\n"));

    let scene = read(output.path().join(OBJECTS_DIR).join("object_model.obj"));
    assert!(scene.contains("o pylon_0\n"));
    assert!(scene.contains("v 1000 0 0\n"));
    assert!(scene.contains("usemtl object_0\nf 1/4 3/2 4/1 2/3\n"));
    assert!(output.path().join(OBJECTS_DIR).join("object_0.png").is_file());

    let sky = read(output.path().join(SKY_DIR).join("sky_model.obj"));
    assert!(sky.contains("#vcolor 64 128 192\n"));
    assert!(sky.contains("usemtl dummy\nf 1 2 3\n#fvcolorindex 1 1 1\n"));
}

#[test]
fn test_sequel_track_uses_texture_attributes() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    track_folder(input.path(), Game::Wipeout2097);

    rip_track(input.path(), output.path(), Game::Wipeout2097, &ExportOptions::default()).unwrap();
    let track = read(output.path().join(TRACK_DIR).join("track.obj"));
    assert!(track.contains("#vcolor 32 32 255\n"));
}

#[test]
fn test_missing_track_input() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    track_folder(input.path(), Game::Wipeout);
    std::fs::remove_file(input.path().join("TRACK.TRS")).unwrap();

    let result = rip_track(input.path(), output.path(), Game::Wipeout, &ExportOptions::default());
    assert!(matches!(result, Err(Error::MissingInput { .. })));

    // The 2097 layout also needs TRACK.TEX
    track_folder(input.path(), Game::Wipeout);
    let result = rip_track(input.path(), output.path(), Game::Wipeout2097, &ExportOptions::default());
    assert!(matches!(result, Err(Error::MissingInput { .. })));
}

#[test]
fn test_track_without_sections_or_materials() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    track_folder(input.path(), Game::Wipeout);

    let options = ExportOptions::new().with_sections(false).with_materials(false);
    rip_track(input.path(), output.path(), Game::Wipeout, &options).unwrap();

    let track_dir = output.path().join(TRACK_DIR);
    assert!(!track_dir.join("sections.obj").exists());
    assert!(!track_dir.join("track.mtl").exists());
    let track = read(track_dir.join("track.obj"));
    assert!(!track.contains("usemtl"));
    assert!(track.contains("f 4/1 3/2 2/3 1/4\n"));
}

// ---------------------------------------------------------------------------
// Common data rips
// ---------------------------------------------------------------------------

#[test]
fn test_common_rip() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();

    write(input.path(), "ships.cmp", &container(&[tim(4, 4, 0x7c00), tim(2, 2, 0x001f)]));
    let ships = [
        object("ship_a", [0, 0, 0], &square(), &[textured_quad([0, 1, 2, 3], 1)]),
        object("ship_b", [0, 0, 0], &square(), &[flat_tri([3, 2, 1], 0)]),
    ]
    .concat();
    write(input.path(), "SHIPS.PRM", &ships);
    write(input.path(), "LONE.PRM", &object("rock", [0, 0, 0], &square(), &[textured_quad([0, 1, 2, 3], 0)]));
    write(input.path(), "notes.txt", b"ignored");

    let report = rip_common(input.path(), output.path(), &ExportOptions::default()).unwrap();
    assert_eq!(report.objects, 3);
    assert_eq!(report.images, 2);

    let ships_dir = output.path().join("ripped_SHIPS");
    let obj = read(ships_dir.join("SHIPS_model.obj"));
    assert!(obj.starts_with("mtllib SHIPS_model.mtl\n"));
    assert!(obj.contains("o ship_a_0\n"));
    assert!(obj.contains("o ship_b_1\n"));
    assert!(obj.contains("usemtl SHIPS_1\nf 1/4 3/2 4/1 2/3\n"));
    // Second object continues the position and color counters
    assert!(obj.contains("usemtl dummy\nf 8 7 6\n#fvcolorindex 2 2 2\n"));
    for name in ["SHIPS_0.png", "SHIPS_1.png", "SHIPS_model.mtl", "white.png"] {
        assert!(ships_dir.join(name).is_file(), "{name}");
    }

    // No container: the textured quad loses its UVs and is reported
    let lone = read(output.path().join("ripped_LONE").join("LONE_model.obj"));
    assert!(lone.contains("usemtl dummy\nf 1 3 4 2\n"));
    assert!(report.warnings.iter().any(|w| w.contains("LONE_")));
}

#[test]
fn test_common_per_object_unbaked() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    let data = [
        object("gate", [10, 20, 30], &square(), &[flat_tri([0, 1, 2], 0)]),
        object("gate", [-5, 0, 5], &square(), &[flat_tri([0, 1, 2], 0)]),
    ]
    .concat();
    write(input.path(), "GATES.PRM", &data);

    let options = ExportOptions::new().per_object().with_bake_position(false);
    rip_common(input.path(), output.path(), &options).unwrap();

    let dir = output.path().join("ripped_GATES");
    assert_eq!(read(dir.join("GATES_gate_0_pos.txt")), "10 20 30\n");
    assert_eq!(read(dir.join("GATES_gate_1_pos.txt")), "-5 0 5\n");
    let first = read(dir.join("GATES_gate_0.obj"));
    assert!(first.contains("v 100 0 0\n"));
    assert!(first.contains("f 1 2 3\n"));
}

#[test]
fn test_common_bad_asset_is_reported() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    // Declares a length table far larger than the file
    write(input.path(), "BROKEN.CMP", &[0xFF, 0xFF, 0, 0]);
    write(input.path(), "GOOD.PRM", &object("ok", [0, 0, 0], &square(), &[flat_tri([0, 1, 2], 0)]));

    let report = rip_common(input.path(), output.path(), &ExportOptions::default()).unwrap();
    assert_eq!(report.objects, 1);
    assert!(report.warnings.iter().any(|w| w.starts_with("BROKEN")));
}
