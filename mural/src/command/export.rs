use mural_core::graphic::{export_avatars, AVATARS_EXTENSION};
use mural_core::save::{check_file_name, export_gui, save_path};

use super::{required_option, unknown_option, Command, CommandError, CommandHandler, CommandResult};
use crate::gui::GuiData;

const OPTIONS: &[&str] = &["avatar", "hud"];

/// Writes the descriptor of a HUD avatar to `avatars/<id>#<serial>.avatars`, recorded under
/// the id and serial of its character.
fn export_avatar(gui: &mut GuiData, cmd: &Command) -> Result<String, CommandError> {
    let key = cmd
        .target_args
        .first()
        .or_else(|| cmd.args.first())
        .ok_or_else(|| CommandError::args("no avatar given, expected id#serial"))?;
    let hud = gui.hud().ok_or_else(|| CommandError::args("no hud"))?;
    let avatar = hud
        .avatar(key)
        .ok_or_else(|| CommandError::args(format!("no avatar {} in the hud", key)))?;

    let data = avatar.character_data();
    let file_name = format!("{}.{}", data.key(), AVATARS_EXTENSION);
    let file_name = check_file_name(&file_name).map_err(|e| CommandError::args(e.to_string()))?;
    let path = gui.gui_path().join("avatars").join(file_name);
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| CommandError::io(format!("{:?}: {}", dir, e)))?;
    }
    export_avatars(&[data], &path).map_err(|e| CommandError::io(e.to_string()))?;
    Ok(format!("avatar {} exported to {}", key, path.display()))
}

/// Writes the current HUD state to `saves/<name>.savegui`.
fn export_hud(gui: &mut GuiData, cmd: &Command) -> Result<String, CommandError> {
    let name = cmd.arg(0).ok_or_else(|| CommandError::args("no save name given"))?;
    let hud = gui.hud().ok_or_else(|| CommandError::args("no hud"))?;

    let mut save = hud.snapshot();
    let path = save_path(gui.gui_path(), name).map_err(|e| CommandError::args(e.to_string()))?;
    export_gui(&mut save, &path).map_err(|e| CommandError::io(e.to_string()))?;
    Ok(format!("hud exported to {}", path.display()))
}

/// `guiexport avatar id#serial|hud name`
pub fn gui_export(gui: &mut GuiData, cmd: &Command) -> Result<String, CommandError> {
    match required_option(cmd, OPTIONS)? {
        "avatar" => export_avatar(gui, cmd),
        "hud" => export_hud(gui, cmd),
        option => Err(unknown_option(option, OPTIONS)),
    }
}

pub struct GuiExport;
impl CommandHandler for GuiExport {
    fn call(&self, gui: &mut GuiData, cmd: &Command) -> CommandResult {
        gui_export(gui, cmd).into()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use mural_core::graphic::import_avatars;

    use super::*;
    use crate::command::{STATUS_BAD_ARGS, STATUS_BAD_OPTION, STATUS_IO, STATUS_OK};
    use crate::gui::testing::gui_data;
    use crate::simulation::testing::TestCharacter;
    use crate::simulation::{Character, Gender};

    fn scratch(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("mural-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn export_avatar_descriptor() {
        let dir = scratch("export-avatar");
        let mut gui = gui_data(&dir);
        let cmd = Command::new("guiexport").with_option("avatar").with_target("pc#0");
        assert_eq!(GuiExport.call(&mut gui, &cmd).code, STATUS_BAD_ARGS);

        gui.open_hud(&[TestCharacter::new("pc", "0", "human", Gender::Female) as Arc<dyn Character>])
            .unwrap();
        assert_eq!(GuiExport.call(&mut gui, &cmd).code, STATUS_OK);

        let exported = import_avatars(dir.join("avatars/pc#0.avatars")).unwrap();
        assert_eq!(exported.len(), 1);
        assert_eq!(exported[0].key(), "pc#0");
        assert_eq!(exported[0].sprite, gui.avatar("pc#0").unwrap().data().sprite);
        assert!(!dir.join("avatars/default-female.avatars").exists());

        let missing = Command::new("guiexport").with_option("avatar").with_arg("npc#4");
        assert_eq!(GuiExport.call(&mut gui, &missing).code, STATUS_BAD_ARGS);
    }

    #[test]
    fn default_avatars_export_to_their_own_files() {
        let dir = scratch("export-defaults");
        let mut gui = gui_data(&dir);
        gui.open_hud(&[
            TestCharacter::new("anna", "1", "human", Gender::Female) as Arc<dyn Character>,
            TestCharacter::new("bea", "2", "elf", Gender::Female) as Arc<dyn Character>,
        ])
        .unwrap();
        assert_eq!(gui.avatar("anna#1").unwrap().data().id, gui.avatar("bea#2").unwrap().data().id);

        for key in ["anna#1", "bea#2"] {
            let cmd = Command::new("guiexport").with_option("avatar").with_target(key);
            assert_eq!(GuiExport.call(&mut gui, &cmd).code, STATUS_OK);
        }

        let anna = import_avatars(dir.join("avatars/anna#1.avatars")).unwrap();
        let bea = import_avatars(dir.join("avatars/bea#2.avatars")).unwrap();
        assert_eq!(anna[0].key(), "anna#1");
        assert_eq!(bea[0].key(), "bea#2");
    }

    #[test]
    fn save_names_with_separators_are_refused() {
        let dir = scratch("export-escape");
        let mut gui = gui_data(dir.join("gui"));
        gui.open_hud(&[TestCharacter::new("pc", "0", "human", Gender::Male) as Arc<dyn Character>])
            .unwrap();

        for name in ["../x", "a/b"] {
            let cmd = Command::new("guiexport").with_option("hud").with_arg(name);
            assert_eq!(GuiExport.call(&mut gui, &cmd).code, STATUS_BAD_ARGS, "{}", name);
        }
        assert!(!dir.join("gui/x.savegui").exists());
        assert!(!dir.join("x.savegui").exists());
    }

    #[test]
    fn export_hud_save() {
        let dir = scratch("export-hud");
        let mut gui = gui_data(&dir);
        gui.open_hud(&[TestCharacter::new("pc", "0", "human", Gender::Male) as Arc<dyn Character>])
            .unwrap();

        let cmd = Command::new("guiexport").with_option("hud").with_arg("quick");
        assert_eq!(GuiExport.call(&mut gui, &cmd).code, STATUS_OK);
        assert!(dir.join("saves/quick.savegui").is_file());

        let unnamed = Command::new("guiexport").with_option("hud");
        assert_eq!(GuiExport.call(&mut gui, &unnamed).code, STATUS_BAD_ARGS);
        assert_eq!(
            GuiExport.call(&mut gui, &Command::new("guiexport").with_option("map")).code,
            STATUS_BAD_OPTION
        );
    }

    #[test]
    fn export_into_a_file_fails_with_io_status() {
        let dir = scratch("export-io");
        std::fs::create_dir_all(dir.parent().unwrap()).unwrap();
        // the gui directory is a plain file, so nothing can be created below it
        std::fs::write(&dir, b"").unwrap();
        let mut gui = gui_data(&dir);
        gui.open_hud(&[TestCharacter::new("pc", "0", "human", Gender::Male) as Arc<dyn Character>])
            .unwrap();

        let cmd = Command::new("guiexport").with_option("hud").with_arg("quick");
        assert_eq!(GuiExport.call(&mut gui, &cmd).code, STATUS_IO);
        std::fs::remove_file(&dir).unwrap();
    }
}
