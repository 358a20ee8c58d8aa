//! Directory discovery and (split, role) classification of raster files.
//!
//! The inventory keeps both grouping levels in insertion order: split
//! groups appear in the order their first file was discovered, and the
//! role lists within a split likewise. Nothing is re-sorted after
//! classification.
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::types::{FileRole, Split};

/// One classified raster file. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: PathBuf,
    pub split: Split,
    pub role: FileRole,
}

#[derive(Debug)]
struct RoleGroup {
    role: FileRole,
    files: Vec<PathBuf>,
}

#[derive(Debug)]
struct SplitGroup {
    split: Split,
    roles: Vec<RoleGroup>,
}

/// The split -> role -> ordered-file-list mapping produced by a scan
#[derive(Debug, Default)]
pub struct FileInventory {
    groups: Vec<SplitGroup>,
}

impl FileInventory {
    fn insert(&mut self, entry: FileEntry) {
        let group_idx = match self.groups.iter().position(|g| g.split == entry.split) {
            Some(i) => i,
            None => {
                self.groups.push(SplitGroup { split: entry.split, roles: Vec::new() });
                self.groups.len() - 1
            }
        };
        let group = &mut self.groups[group_idx];
        let role_idx = match group.roles.iter().position(|r| r.role == entry.role) {
            Some(i) => i,
            None => {
                group.roles.push(RoleGroup { role: entry.role, files: Vec::new() });
                group.roles.len() - 1
            }
        };
        group.roles[role_idx].files.push(entry.path);
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of discovered files
    pub fn len(&self) -> usize {
        self.groups
            .iter()
            .flat_map(|g| g.roles.iter())
            .map(|r| r.files.len())
            .sum()
    }

    /// Splits present, in insertion order
    pub fn splits(&self) -> impl Iterator<Item = Split> + '_ {
        self.groups.iter().map(|g| g.split)
    }

    /// All files in nested insertion order (split groups, then role groups,
    /// then files)
    pub fn all_files(&self) -> impl Iterator<Item = &Path> + '_ {
        self.groups
            .iter()
            .flat_map(|g| g.roles.iter())
            .flat_map(|r| r.files.iter())
            .map(|p| p.as_path())
    }

    /// All files of one role, scanning split groups in insertion order
    pub fn files_of_role(&self, role: FileRole) -> impl Iterator<Item = &Path> + '_ {
        self.groups
            .iter()
            .flat_map(move |g| g.roles.iter().filter(move |r| r.role == role))
            .flat_map(|r| r.files.iter())
            .map(|p| p.as_path())
    }

    /// First file of one role in enumeration order, the representative
    /// sample for dataset-level derivations
    pub fn first_of_role(&self, role: FileRole) -> Option<&Path> {
        self.files_of_role(role).next()
    }
}

/// Classify the split of a file from its path segments relative to the
/// scan root. The first segment naming a split wins; a path with no such
/// segment is `Split::Unknown`.
pub fn classify_split(relative: &Path) -> Split {
    relative
        .components()
        .filter_map(|c| c.as_os_str().to_str())
        .find_map(Split::from_path_segment)
        .unwrap_or(Split::Unknown)
}

fn is_geotiff(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()).map(|e| e.to_lowercase()).as_deref(),
        Some("tif") | Some("tiff")
    )
}

/// Recursively enumerate and classify all `.tif`/`.tiff` files under
/// `root`.
///
/// The walk is sorted by file name so discovery order is stable across
/// runs and platforms. Fails with [`Error::Discovery`] when no raster
/// files are found.
pub fn scan_directory(root: &Path) -> Result<FileInventory> {
    let mut inventory = FileInventory::default();

    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_file() || !is_geotiff(entry.path()) {
            continue;
        }
        let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
        let split = classify_split(relative);
        let role = entry
            .path()
            .file_name()
            .and_then(|n| n.to_str())
            .map(FileRole::from_filename)
            .unwrap_or(FileRole::Images);
        inventory.insert(FileEntry { path: entry.path().to_path_buf(), split, role });
    }

    if inventory.is_empty() {
        return Err(Error::Discovery { root: root.to_path_buf() });
    }
    Ok(inventory)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"").unwrap();
    }

    #[test]
    fn classifies_split_and_role_from_layout() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("train/images/x.tif"));
        touch(&root.join("train/masks/x.mask.tif"));
        touch(&root.join("val/images/y.tiff"));
        touch(&root.join("loose/z_label.tif"));

        let inventory = scan_directory(root).unwrap();
        assert_eq!(inventory.len(), 4);

        let splits: Vec<Split> = inventory.splits().collect();
        assert!(splits.contains(&Split::Training));
        assert!(splits.contains(&Split::Validation));
        assert!(splits.contains(&Split::Unknown));

        // Masks are recognized from the filename regardless of directory
        let masks: Vec<&Path> = inventory.files_of_role(FileRole::Masks).collect();
        assert_eq!(masks.len(), 2);
        assert!(masks.iter().any(|p| p.ends_with("loose/z_label.tif")));

        let first_image = inventory.first_of_role(FileRole::Images).unwrap();
        assert!(first_image.ends_with("train/images/x.tif"));
    }

    #[test]
    fn split_rules_are_ordered_and_case_insensitive() {
        assert_eq!(classify_split(Path::new("Training/images/a.tif")), Split::Training);
        assert_eq!(classify_split(Path::new("data/VAL/a.tif")), Split::Validation);
        assert_eq!(classify_split(Path::new("testing/a.tif")), Split::Test);
        assert_eq!(classify_split(Path::new("imagery/a.tif")), Split::Unknown);
        // The filename itself is a segment, but only as a whole word
        assert_eq!(classify_split(Path::new("test.tif")), Split::Unknown);
    }

    #[test]
    fn empty_directory_is_a_discovery_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), b"no rasters").unwrap();
        let err = scan_directory(dir.path()).unwrap_err();
        assert!(matches!(err, Error::Discovery { .. }));
    }

    #[test]
    fn non_raster_extensions_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("train/images/a.TIF"));
        touch(&dir.path().join("train/images/a.png"));
        let inventory = scan_directory(dir.path()).unwrap();
        assert_eq!(inventory.len(), 1);
    }
}
