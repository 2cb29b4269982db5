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

use crate::cli::PackArgs;
use anyhow::{bail, Context, Result};
use conduit_infra::PackWriter;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub fn run(args: &PackArgs) -> Result<()> {
    if !args.dir.is_dir() {
        bail!("'{}' is not a directory", args.dir.display());
    }

    let files = find_files(&args.dir)?;
    if files.is_empty() {
        bail!("No files found under '{}'. Nothing to pack.", args.dir.display());
    }

    let (writer, logical) = build_pack(&args.dir, &files, args.lz4)?;
    let written = writer
        .write_to_file(&args.out)
        .with_context(|| format!("Failed to write pack to '{}'", args.out.display()))?;

    println!(
        "Packed {} entries ({:.2} KB) into '{}' ({:.2} KB)",
        writer.entries().len(),
        logical as f64 / 1024.0,
        args.out.display(),
        written as f64 / 1024.0
    );
    Ok(())
}

/// Adds every file under `root` to a writer, named by its forward-slash relative path.
fn build_pack(root: &Path, files: &[PathBuf], lz4: bool) -> Result<(PackWriter, u64)> {
    let mut writer = PackWriter::new().with_lz4(lz4);
    let mut logical = 0u64;

    for path in files {
        let name = entry_name(root, path)?;
        let bytes = fs::read(path)
            .with_context(|| format!("Failed to read asset file '{}'", path.display()))?;
        logical += bytes.len() as u64;

        log::debug!("pack: adding '{}' ({} bytes)", name, bytes.len());
        writer
            .add(name, &bytes)
            .with_context(|| format!("Failed to add '{}'", path.display()))?;
    }
    Ok((writer, logical))
}

fn entry_name(root: &Path, path: &Path) -> Result<String> {
    let relative = path
        .strip_prefix(root)
        .with_context(|| format!("'{}' is outside '{}'", path.display(), root.display()))?;
    let parts = relative
        .components()
        .map(|c| c.as_os_str().to_str().context("Invalid path encoding"))
        .collect::<Result<Vec<_>>>()?;
    Ok(parts.join("/"))
}

/// Recursively finds all files under `dir`, in a stable order.
fn find_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to walk '{}'", dir.display()))?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use conduit_infra::PackIndex;
    use tempfile::tempdir;

    #[test]
    fn test_entry_names_use_forward_slashes() {
        let root = Path::new("assets");
        let path = root.join("icons").join("close.png");
        assert_eq!(entry_name(root, &path).unwrap(), "icons/close.png");
    }

    #[test]
    fn test_packs_nested_directory() {
        let src = tempdir().unwrap();
        fs::create_dir_all(src.path().join("config")).unwrap();
        fs::write(src.path().join("config/settings.json"), br#"{"volume":11}"#).unwrap();
        fs::write(src.path().join("readme.txt"), b"hi").unwrap();
        let out = tempdir().unwrap();
        let args = PackArgs {
            dir: src.path().to_path_buf(),
            out: out.path().join("pack1.pack"),
            lz4: true,
        };

        run(&args).unwrap();

        let mut file = fs::File::open(&args.out).unwrap();
        let index = PackIndex::read_from(&mut file).unwrap();
        let names: Vec<&str> = index.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["config/settings.json", "readme.txt"]);
        assert_eq!(index.find("config/settings.json").unwrap().size, 13);
    }

    #[test]
    fn test_empty_directory_is_rejected() {
        let src = tempdir().unwrap();
        let args = PackArgs {
            dir: src.path().to_path_buf(),
            out: src.path().join("out.pack"),
            lz4: false,
        };
        let err = run(&args).unwrap_err();
        assert!(err.to_string().contains("Nothing to pack"));
        assert!(!args.out.exists());
    }
}
