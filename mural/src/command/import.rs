use mural_core::save::{import_gui, save_path};

use super::{required_option, unknown_option, Command, CommandError, CommandHandler, CommandResult};
use crate::gui::GuiData;

const OPTIONS: &[&str] = &["hud"];

/// `guiimport hud name`
pub fn gui_import(gui: &mut GuiData, cmd: &Command) -> Result<String, CommandError> {
    match required_option(cmd, OPTIONS)? {
        "hud" => {
            let name = cmd.arg(0).ok_or_else(|| CommandError::args("no save name given"))?;
            let path = save_path(gui.gui_path(), name).map_err(|e| CommandError::args(e.to_string()))?;
            let hud = gui.hud_mut().ok_or_else(|| CommandError::args("no hud"))?;

            let save = import_gui(&path).map_err(|e| CommandError::io(e.to_string()))?;
            let restored = hud.apply(&save);
            Ok(format!("{} player(s) restored from {}", restored, path.display()))
        }
        option => Err(unknown_option(option, OPTIONS)),
    }
}

pub struct GuiImport;
impl CommandHandler for GuiImport {
    fn call(&self, gui: &mut GuiData, cmd: &Command) -> CommandResult {
        gui_import(gui, cmd).into()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use mural_core::types::Position;

    use super::*;
    use crate::command::export::GuiExport;
    use crate::command::{STATUS_BAD_ARGS, STATUS_IO, STATUS_OK};
    use crate::gui::testing::gui_data;
    use crate::simulation::testing::TestCharacter;
    use crate::simulation::{Character, Gender};

    #[test]
    fn export_then_import_restores_layout() {
        let dir = std::env::temp_dir().join(format!("mural-import-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        let pc: Arc<dyn Character> = TestCharacter::new("pc", "0", "human", Gender::Male);

        let mut gui = gui_data(&dir);
        gui.open_hud(&[pc.clone()]).unwrap();
        let hud = gui.hud_mut().unwrap();
        hud.set_inventory_slot("pc#0", "sword#1", 0);
        hud.set_bar_slot("pc#0", "fire#2", 3);
        hud.set_camera(Position::new(100.0, -50.0));
        let export = Command::new("guiexport").with_option("hud").with_arg("test");
        assert_eq!(GuiExport.call(&mut gui, &export).code, STATUS_OK);
        let layout = gui.hud().unwrap().layout("pc#0").cloned();

        gui.open_hud(&[pc]).unwrap();
        assert!(gui.hud().unwrap().layout("pc#0").is_none());
        let import = Command::new("guiimport").with_option("hud").with_arg("test");
        let result = GuiImport.call(&mut gui, &import);
        assert_eq!(result.code, STATUS_OK, "{}", result);
        assert_eq!(gui.hud().unwrap().layout("pc#0").cloned(), layout);
        assert_eq!(gui.hud().unwrap().camera(), Position::new(100.0, -50.0));
    }

    #[test]
    fn import_failures() {
        let dir = std::env::temp_dir().join(format!("mural-import-bad-{}", std::process::id()));
        std::fs::create_dir_all(dir.join("saves")).unwrap();
        std::fs::write(dir.join("saves/broken.savegui"), "<save><camera x=\"a\"/></save>").unwrap();

        let mut gui = gui_data(&dir);
        let import = |name: &str| Command::new("guiimport").with_option("hud").with_arg(name);
        assert_eq!(GuiImport.call(&mut gui, &import("missing")).code, STATUS_BAD_ARGS);

        gui.open_hud(&[]).unwrap();
        assert_eq!(GuiImport.call(&mut gui, &import("missing")).code, STATUS_IO);
        assert_eq!(GuiImport.call(&mut gui, &import("broken")).code, STATUS_IO);
        assert_eq!(GuiImport.call(&mut gui, &import("../saves/broken")).code, STATUS_BAD_ARGS);
        assert_eq!(
            GuiImport.call(&mut gui, &Command::new("guiimport").with_option("hud")).code,
            STATUS_BAD_ARGS
        );
    }
}
