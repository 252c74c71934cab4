use std::path::{Path, PathBuf};

use crate::error::{MuralError, Result};
use crate::format::markup::{avatars, effects, items, objects, skills};

use super::{AvatarData, EffectGraphicData, ItemGraphicData, ObjectGraphicData, SkillGraphicData};

pub const AVATARS_EXTENSION: &str = "avatars";
pub const GRAPHIC_EXTENSION: &str = "graphic";

fn read_document(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| MuralError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write_document(path: &Path, document: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| MuralError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    std::fs::write(path, document).map_err(|source| MuralError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Files of `dir` with the given extension, sorted by name.
fn document_files(dir: &Path, extension: &str) -> Vec<PathBuf> {
    let pattern = dir.join(format!("*.{}", extension));
    match glob::glob(&pattern.to_string_lossy()) {
        Ok(paths) => {
            let mut paths: Vec<_> = paths.flatten().collect();
            paths.sort();
            paths
        }
        Err(e) => {
            log::error!("invalid descriptor pattern {:?}: {}", pattern, e);
            Vec::new()
        }
    }
}

/// Imports every document of a directory, logging and skipping the ones that fail.
fn import_dir<T>(dir: &Path, extension: &str, import: impl Fn(&Path) -> Result<Vec<T>>) -> Vec<T> {
    if !dir.is_dir() {
        log::debug!("descriptor directory {:?} not found", dir);
        return Vec::new();
    }

    let mut list = Vec::new();
    for path in document_files(dir, extension) {
        match import(&path) {
            Ok(mut records) => list.append(&mut records),
            Err(e) => log::error!("unable to import {:?}: {}", path, e),
        }
    }
    list
}

macro_rules! document_io {
    ($($ty:ty, $module:ident, $ext:expr => $import:ident, $import_dir:ident, $export:ident;)*) => {
        $(
            pub fn $import(path: impl AsRef<Path>) -> Result<Vec<$ty>> {
                $module::decode(&read_document(path.as_ref())?)
            }

            pub fn $import_dir(dir: impl AsRef<Path>) -> Vec<$ty> {
                import_dir(dir.as_ref(), $ext, |path| $import(path))
            }

            pub fn $export(list: &[$ty], path: impl AsRef<Path>) -> Result<()> {
                write_document(path.as_ref(), &$module::encode(list)?)
            }
        )*
    };
}

document_io! {
    AvatarData, avatars, AVATARS_EXTENSION => import_avatars, import_avatars_dir, export_avatars;
    ItemGraphicData, items, GRAPHIC_EXTENSION => import_items, import_items_dir, export_items;
    EffectGraphicData, effects, GRAPHIC_EXTENSION => import_effects, import_effects_dir, export_effects;
    SkillGraphicData, skills, GRAPHIC_EXTENSION => import_skills, import_skills_dir, export_skills;
    ObjectGraphicData, objects, GRAPHIC_EXTENSION => import_objects, import_objects_dir, export_objects;
}
