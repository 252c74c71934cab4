use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use zip::ZipArchive;

use crate::error::{MuralError, Result};

pub const PICTURE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];
pub const FONT_EXTENSIONS: &[&str] = &["ttf"];
pub const AUDIO_EXTENSIONS: &[&str] = &["ogg", "wav", "mp3"];

/// Lowercased extension of an entry name, without the dot.
pub fn extension(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
}

fn has_extension(name: &str, extensions: &[&str]) -> bool {
    extension(name).is_some_and(|ext| extensions.contains(&ext.as_str()))
}

pub fn is_picture(name: &str) -> bool {
    has_extension(name, PICTURE_EXTENSIONS)
}

pub fn is_font(name: &str) -> bool {
    has_extension(name, FONT_EXTENSIONS)
}

pub fn is_audio(name: &str) -> bool {
    has_extension(name, AUDIO_EXTENSIONS)
}

/// Final path component of an entry path.
pub fn basename(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryOrigin {
    Zip,
    Loose,
}

/// An entry found in an archive, not yet read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    path: String,
    origin: EntryOrigin,
}

impl ArchiveEntry {
    /// Path of the entry inside the archive, `/` separated.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Basename of the entry; this is the key assets are registered under.
    pub fn name(&self) -> &str {
        basename(&self.path)
    }
}

/// A packaged asset archive.
///
/// `graphic.zip` may be shipped as a ZIP file, as a loose `graphic/` directory next to where
/// the ZIP would be, or both. Loose files shadow ZIP entries with the same path.
/// The underlying file handle is released when the archive is dropped.
pub struct Archive {
    path: PathBuf,
    zip: Option<ZipArchive<BufReader<File>>>,
    loose_dir: Option<PathBuf>,
}

impl std::fmt::Debug for Archive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Archive")
            .field("path", &self.path)
            .field("zip", &self.zip.is_some())
            .field("loose_dir", &self.loose_dir)
            .finish()
    }
}

impl Archive {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let open_error = |reason: String| MuralError::ArchiveOpen {
            path: path.clone(),
            reason,
        };

        let zip = if path.is_file() {
            let file = File::open(&path).map_err(|e| open_error(e.to_string()))?;
            let zip = ZipArchive::new(BufReader::new(file)).map_err(|e| open_error(e.to_string()))?;
            Some(zip)
        } else {
            None
        };

        let loose_dir = Some(path.with_extension("")).filter(|dir| dir.is_dir() && *dir != path);

        if zip.is_none() && loose_dir.is_none() {
            return Err(open_error("no such archive or directory".to_string()));
        }

        log::debug!(
            "archive opened: {:?} (zip: {}, loose: {:?})",
            path,
            zip.is_some(),
            loose_dir
        );

        Ok(Self {
            path,
            zip,
            loose_dir,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Lists the entries under `subdir` (recursively) whose name passes `predicate`.
    ///
    /// Entries are returned sorted by path.
    pub fn list_entries(&self, subdir: &str, predicate: impl Fn(&str) -> bool) -> Vec<ArchiveEntry> {
        let prefix = format!("{}/", subdir.trim_matches('/'));
        let mut entries = BTreeMap::new();

        if let Some(zip) = &self.zip {
            for name in zip.file_names() {
                if name.starts_with(&prefix) && !name.ends_with('/') && predicate(basename(name)) {
                    entries.insert(name.to_string(), EntryOrigin::Zip);
                }
            }
        }

        if let Some(dir) = &self.loose_dir {
            for path in Self::loose_files(dir, &prefix) {
                let Ok(relative) = path.strip_prefix(dir) else {
                    continue;
                };
                let name = relative
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/");
                if predicate(basename(&name)) {
                    entries.insert(name, EntryOrigin::Loose);
                }
            }
        }

        entries
            .into_iter()
            .map(|(path, origin)| ArchiveEntry { path, origin })
            .collect()
    }

    fn loose_files(dir: &Path, prefix: &str) -> Vec<PathBuf> {
        let pattern = dir.join(prefix).join("**").join("*");
        match glob::glob(&pattern.to_string_lossy()) {
            Ok(paths) => paths.flatten().filter(|p| p.is_file()).collect(),
            Err(e) => {
                log::error!("invalid loose asset pattern {:?}: {}", pattern, e);
                Vec::new()
            }
        }
    }

    /// Opens a reader on a single entry. The reader borrows the archive.
    pub fn open_entry(&mut self, entry: &ArchiveEntry) -> Result<Box<dyn Read + '_>> {
        let entry_error = |reason: String| MuralError::EntryIo {
            archive: self.path.clone(),
            entry: entry.path.clone(),
            reason,
        };

        match entry.origin {
            EntryOrigin::Loose => {
                let dir = self
                    .loose_dir
                    .as_ref()
                    .ok_or_else(|| entry_error("archive has no loose directory".to_string()))?;
                let file = File::open(dir.join(&entry.path)).map_err(|e| entry_error(e.to_string()))?;
                Ok(Box::new(BufReader::new(file)))
            }
            EntryOrigin::Zip => {
                let path = self.path.clone();
                let zip = self.zip.as_mut().ok_or_else(|| MuralError::EntryIo {
                    archive: path.clone(),
                    entry: entry.path.clone(),
                    reason: "archive has no zip file".to_string(),
                })?;
                let file = zip.by_name(&entry.path).map_err(|e| MuralError::EntryIo {
                    archive: path,
                    entry: entry.path.clone(),
                    reason: e.to_string(),
                })?;
                Ok(Box::new(file))
            }
        }
    }

    /// we assume that assets are small enough to be read whole
    pub fn read_entry(&mut self, entry: &ArchiveEntry) -> Result<Vec<u8>> {
        let archive = self.path.clone();
        let mut reader = self.open_entry(entry)?;
        let mut buffer = vec![];
        reader
            .read_to_end(&mut buffer)
            .map_err(|e| MuralError::EntryIo {
                archive,
                entry: entry.path.clone(),
                reason: e.to_string(),
            })?;
        Ok(buffer)
    }

    /// Reads every matching entry and hands it to `f`.
    ///
    /// Entries that cannot be read are logged and skipped. Returns the number of entries
    /// handed to `f`.
    pub fn for_each_entry(
        &mut self,
        subdir: &str,
        predicate: impl Fn(&str) -> bool,
        mut f: impl FnMut(&ArchiveEntry, Vec<u8>),
    ) -> usize {
        let mut count = 0;
        for entry in self.list_entries(subdir, predicate) {
            match self.read_entry(&entry) {
                Ok(data) => {
                    f(&entry, data);
                    count += 1;
                }
                Err(e) => log::error!("{}", e),
            }
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{scratch_dir, write_zip};

    #[test]
    fn extension_predicates() {
        assert!(is_picture("a.png"));
        assert!(is_picture("b.JPG"));
        assert!(!is_picture("c.ttf"));
        assert!(is_font("c.ttf"));
        assert!(is_audio("d.ogg"));
        assert!(is_audio("e.mp3"));
        assert!(is_audio("f.wav"));
        assert!(!is_audio("g"));
        assert_eq!(basename("portrait/sub/m.png"), "m.png");
        assert_eq!(basename("m.png"), "m.png");
    }

    #[test]
    fn list_zip_entries_by_subdir() {
        let dir = scratch_dir("archive-zip");
        let zip_path = dir.join("graphic.zip");
        write_zip(
            &zip_path,
            &[
                ("portrait/m.png", &b"a"[..]),
                ("portrait/sub/f.png", &b"b"[..]),
                ("portrait/readme.txt", &b"c"[..]),
                ("icon/unknown.png", &b"d"[..]),
            ],
        );

        let mut archive = Archive::open(&zip_path).unwrap();
        let entries = archive.list_entries("portrait", is_picture);
        let names: Vec<_> = entries.iter().map(|e| e.path()).collect();
        assert_eq!(names, vec!["portrait/m.png", "portrait/sub/f.png"]);
        assert_eq!(entries[1].name(), "f.png");

        let data = archive.read_entry(&entries[0]).unwrap();
        assert_eq!(data, &b"a"[..]);
    }

    #[test]
    fn loose_directory_shadows_zip() {
        let dir = scratch_dir("archive-loose");
        let zip_path = dir.join("graphic.zip");
        write_zip(&zip_path, &[("icon/a.png", &b"zip"[..]), ("icon/b.png", &b"zip"[..])]);
        std::fs::create_dir_all(dir.join("graphic/icon")).unwrap();
        std::fs::write(dir.join("graphic/icon/a.png"), &b"loose"[..]).unwrap();

        let mut archive = Archive::open(&zip_path).unwrap();
        let mut seen = Vec::new();
        let count = archive.for_each_entry("icon", is_picture, |entry, data| {
            seen.push((entry.name().to_string(), data));
        });
        assert_eq!(count, 2);
        assert_eq!(seen[0], ("a.png".to_string(), b"loose".to_vec()));
        assert_eq!(seen[1], ("b.png".to_string(), b"zip".to_vec()));
    }

    #[test]
    fn missing_archive_fails_to_open() {
        let dir = scratch_dir("archive-missing");
        let err = Archive::open(dir.join("audio.zip")).unwrap_err();
        assert!(matches!(err, MuralError::ArchiveOpen { .. }));
    }

    #[test]
    fn corrupt_archive_fails_to_open() {
        let dir = scratch_dir("archive-corrupt");
        let path = dir.join("graphic.zip");
        std::fs::write(&path, b"definitely not a zip").unwrap();
        assert!(matches!(Archive::open(&path), Err(MuralError::ArchiveOpen { .. })));
    }
}
