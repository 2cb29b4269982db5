// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use anyhow::Result;
use conduit_core::io::BundleReader;
use conduit_core::SourceIoError;
use conduit_infra::{PackBundleReader, PackEntry, PackError, PackIndex, PackWriter};
use std::fs::File;
use tempfile::tempdir;

#[test]
fn test_read_entry_from_pack_on_disk() -> Result<()> {
    let dir = tempdir()?;
    let mut writer = PackWriter::new().with_lz4(true);
    writer.add_with_mime("textures/icon.png", Some("image/png"), b"not really a png")?;
    writer.add("config/settings.json", br#"{"volume":11}"#)?;
    writer.add("filler.txt", &[b'z'; 8192])?;
    writer.write_to_file(dir.path().join("pack1.pack"))?;

    let reader = PackBundleReader::new(dir.path());

    let icon = reader.read_entry("pack1", "textures/icon.png")?;
    assert_eq!(icon.bytes, b"not really a png");
    assert_eq!(icon.mime.as_deref(), Some("image/png"));

    let filler = reader.read_entry("pack1", "filler.txt")?;
    assert_eq!(filler.bytes.len(), 8192);
    assert_eq!(filler.mime, None);

    Ok(())
}

#[test]
fn test_index_is_readable_from_file() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("pack1.pack");
    let mut writer = PackWriter::new();
    writer.add("a.json", b"{}")?.add("b.json", b"[]")?;
    writer.write_to_file(&path)?;

    let index = PackIndex::read_from(&mut File::open(&path)?)?;
    let names: Vec<&str> = index.entries().iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["a.json", "b.json"]);
    assert!(matches!(index.find("c.json"), Err(PackError::MissingEntry(_))));
    Ok(())
}

#[test]
fn test_missing_bundle_and_entry_are_not_found() -> Result<()> {
    let dir = tempdir()?;
    let mut writer = PackWriter::new();
    writer.add("a.json", b"{}")?;
    writer.write_to_file(dir.path().join("pack1.pack"))?;
    let reader = PackBundleReader::new(dir.path());

    assert!(matches!(
        reader.read_entry("pack2", "a.json"),
        Err(SourceIoError::NotFound(_))
    ));
    assert!(matches!(
        reader.read_entry("pack1", "b.json"),
        Err(SourceIoError::NotFound(ref what)) if what == "pack1/b.json"
    ));
    Ok(())
}

#[test]
fn test_corrupt_bundle_is_transport() -> Result<()> {
    let dir = tempdir()?;
    std::fs::write(dir.path().join("junk.pack"), b"definitely not a pack")?;
    let reader = PackBundleReader::new(dir.path());

    assert!(matches!(
        reader.read_entry("junk", "a.json"),
        Err(SourceIoError::Transport(_))
    ));
    Ok(())
}

#[test]
fn test_duplicate_entries_are_rejected() {
    let mut writer = PackWriter::new();
    writer.add("a.json", b"{}").unwrap();
    assert!(matches!(
        writer.add("a.json", b"[]"),
        Err(PackError::DuplicateEntry(name)) if name == "a.json"
    ));
}

/// Writes a pack whose single index entry is taken as given, followed by `data`.
fn forged_pack(path: &std::path::Path, entry: PackEntry, data: &[u8]) -> Result<()> {
    let index = bincode::serde::encode_to_vec(vec![entry], bincode::config::standard())?;
    let mut bytes = b"CPAK".to_vec();
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&(index.len() as u32).to_le_bytes());
    bytes.extend_from_slice(&index);
    bytes.extend_from_slice(data);
    std::fs::write(path, bytes)?;
    Ok(())
}

fn entry(size: u64, stored_size: u64) -> PackEntry {
    PackEntry {
        name: "a.json".into(),
        offset: 0,
        size,
        stored_size,
        lz4: false,
        mime: None,
        hash: *blake3::hash(b"{}").as_bytes(),
    }
}

#[test]
fn test_huge_declared_stored_size_is_rejected_before_reading() -> Result<()> {
    let dir = tempdir()?;
    forged_pack(&dir.path().join("p.pack"), entry(2, u64::MAX / 2), b"{}")?;
    let reader = PackBundleReader::new(dir.path()).with_max_entry_bytes(1024);

    assert!(matches!(
        reader.read_entry("p", "a.json"),
        Err(SourceIoError::Transport(_))
    ));
    Ok(())
}

#[test]
fn test_entry_past_end_of_file_is_rejected() -> Result<()> {
    let dir = tempdir()?;
    forged_pack(&dir.path().join("p.pack"), entry(1000, 1000), b"{}")?;
    let reader = PackBundleReader::new(dir.path()).with_max_entry_bytes(1024);

    match reader.read_entry("p", "a.json") {
        Err(SourceIoError::Transport(message)) => assert!(message.contains("past the end")),
        other => panic!("expected Transport, got {other:?}"),
    }
    Ok(())
}

#[test]
fn test_declared_size_over_limit_is_rejected() -> Result<()> {
    let dir = tempdir()?;
    forged_pack(&dir.path().join("p.pack"), entry(4096, 4096), &[0; 4096])?;
    let reader = PackBundleReader::new(dir.path()).with_max_entry_bytes(1024);

    assert!(matches!(
        reader.read_entry("p", "a.json"),
        Err(SourceIoError::Transport(_))
    ));
    Ok(())
}
