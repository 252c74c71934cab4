//! Named snapshots of the UI state: player avatars, slot layouts and camera position.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{MuralError, Result};
use crate::format::markup::save as document;
use crate::graphic::AvatarData;
use crate::types::Position;

pub const SAVE_EXTENSION: &str = "savegui";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerSave {
    pub avatar: AvatarData,
    /// content id -> inventory slot index
    pub inv_slots: BTreeMap<String, u32>,
    /// content id -> menu bar slot index
    pub bar_slots: BTreeMap<String, u32>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GuiSave {
    pub name: String,
    pub players: Vec<PlayerSave>,
    pub camera: Position,
}

/// Accepts `name` as a single file name: not empty, not `.` or `..`, no path separators.
pub fn check_file_name(name: &str) -> Result<&str> {
    if name.is_empty() || name == "." || name == ".." || name.contains(|c: char| c == '/' || c == '\\') {
        return Err(MuralError::InvalidName(name.to_string()));
    }
    Ok(name)
}

/// Path of the save named `name` under the GUI directory, with the extension added if missing.
pub fn save_path(gui_path: impl AsRef<Path>, name: &str) -> Result<PathBuf> {
    let name = check_file_name(name)?;
    let saves = gui_path.as_ref().join("saves");
    if Path::new(name).extension().is_some_and(|ext| ext == SAVE_EXTENSION) {
        Ok(saves.join(name))
    } else {
        Ok(saves.join(format!("{}.{}", name, SAVE_EXTENSION)))
    }
}

fn create_parent_dirs(path: &Path) -> std::io::Result<()> {
    let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) else {
        return Ok(());
    };

    let mut builder = std::fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o755);
    }
    builder.create(parent)
}

/// Writes `save` to `path`, naming it after the file.
pub fn export_gui(save: &mut GuiSave, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    save.name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let save_io = |source| MuralError::SaveIo {
        path: path.to_path_buf(),
        source,
    };

    let text = document::encode(save)?;
    create_parent_dirs(path).map_err(save_io)?;
    std::fs::write(path, text).map_err(save_io)?;

    log::info!("gui state saved to {:?}", path);
    Ok(())
}

pub fn import_gui(path: impl AsRef<Path>) -> Result<GuiSave> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| MuralError::SaveIo {
        path: path.to_path_buf(),
        source,
    })?;

    document::decode(&text).map_err(|e| MuralError::SaveParse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}
