//! Workspace export.
//!
//! Serializes the whole file tree (directory names, file names, file
//! contents) into a gzip-compressed ustar archive so a collaborator
//! can offer it as a download. The walk is lossless and deterministic.

use std::io::Write;

use flate2::write::GzEncoder;
use flate2::Compression;

use crate::error::Result;
use crate::fs::Directory;

const BLOCK_SIZE: usize = 512;

/// Serialize `root` (recursively) as a tar.gz byte stream.
pub fn tar_gz(root: &Directory) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    append_directory(&mut data, root, &root.name);

    // Two zero blocks mark the end of the archive.
    data.extend_from_slice(&[0u8; BLOCK_SIZE * 2]);

    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&data)?;
    Ok(encoder.finish()?)
}

fn append_directory(out: &mut Vec<u8>, dir: &Directory, path: &str) {
    out.extend_from_slice(&header(&format!("{path}/"), 0, b'5'));

    for file in &dir.files {
        let name = format!("{path}/{}", file.name);
        let content = file.content.as_bytes();
        out.extend_from_slice(&header(&name, content.len(), b'0'));
        out.extend_from_slice(content);
        let padding = (BLOCK_SIZE - content.len() % BLOCK_SIZE) % BLOCK_SIZE;
        out.extend(std::iter::repeat(0u8).take(padding));
    }

    for sub in &dir.dirs {
        append_directory(out, sub, &format!("{path}/{}", sub.name));
    }
}

fn header(name: &str, size: usize, type_flag: u8) -> [u8; BLOCK_SIZE] {
    let mut header = [0u8; BLOCK_SIZE];

    // Name (100 bytes)
    let name_bytes = name.as_bytes();
    let name_len = name_bytes.len().min(100);
    header[..name_len].copy_from_slice(&name_bytes[..name_len]);

    // Mode (8 bytes, octal)
    let mode = if type_flag == b'5' { 0o755 } else { 0o644 };
    write_octal(&mut header[100..108], mode, 7);

    // UID/GID (8 bytes each)
    write_octal(&mut header[108..116], 1000, 7);
    write_octal(&mut header[116..124], 1000, 7);

    // Size (12 bytes, octal)
    write_octal(&mut header[124..136], size as u64, 11);

    // Mtime (12 bytes, octal); the tree tracks no timestamps.
    write_octal(&mut header[136..148], 0, 11);

    // Checksum placeholder (8 bytes of spaces)
    header[148..156].copy_from_slice(b"        ");

    // Type flag
    header[156] = type_flag;

    // Magic + version
    header[257..263].copy_from_slice(b"ustar ");
    header[263..265].copy_from_slice(b" \0");

    let checksum: u32 = header.iter().map(|&b| u32::from(b)).sum();
    write_octal(&mut header[148..156], u64::from(checksum), 7);

    header
}

fn write_octal(buf: &mut [u8], value: u64, width: usize) {
    let s = format!("{:0>width$o}", value, width = width);
    let bytes = s.as_bytes();
    let len = bytes.len().min(buf.len() - 1);
    buf[..len].copy_from_slice(&bytes[bytes.len() - len..]);
    buf[len] = 0;
}
