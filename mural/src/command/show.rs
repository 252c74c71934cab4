use super::{required_option, unknown_option, Command, CommandError, CommandHandler, CommandResult};
use crate::gui::GuiData;

const OPTIONS: &[&str] = &["version", "playable-chars"];

/// `guishow version|playable-chars`
pub fn gui_show(gui: &mut GuiData, cmd: &Command) -> Result<String, CommandError> {
    match required_option(cmd, OPTIONS)? {
        "version" => Ok(env!("CARGO_PKG_VERSION").to_string()),
        "playable-chars" => {
            let menu = gui.menu().ok_or_else(|| CommandError::args("no main menu"))?;
            Ok(menu.playable_chars())
        }
        option => Err(unknown_option(option, OPTIONS)),
    }
}

pub struct GuiShow;
impl CommandHandler for GuiShow {
    fn call(&self, gui: &mut GuiData, cmd: &Command) -> CommandResult {
        gui_show(gui, cmd).into()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::command::{STATUS_BAD_ARGS, STATUS_BAD_OPTION};
    use crate::gui::testing::gui_data;
    use crate::simulation::testing::TestCharacter;
    use crate::simulation::{Character, Gender};

    #[test]
    fn version() {
        let mut gui = gui_data("unused");
        let result = GuiShow.call(&mut gui, &Command::new("guishow").with_option("version"));
        assert_eq!(result, CommandResult::ok(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn playable_chars_needs_menu() {
        let mut gui = gui_data("unused");
        let cmd = Command::new("guishow").with_option("playable-chars");
        assert_eq!(GuiShow.call(&mut gui, &cmd).code, STATUS_BAD_ARGS);

        let menu = gui.open_menu(vec![
            TestCharacter::new("pc", "0", "human", Gender::Male) as Arc<dyn Character>,
            TestCharacter::new("pc", "1", "orc", Gender::Female),
        ]);
        gui.set_menu(Some(menu));
        assert_eq!(GuiShow.call(&mut gui, &cmd), CommandResult::ok("pc#0 pc#1"));
    }

    #[test]
    fn bad_options() {
        let mut gui = gui_data("unused");
        assert_eq!(GuiShow.call(&mut gui, &Command::new("guishow")).code, STATUS_BAD_OPTION);
        let cmd = Command::new("guishow").with_option("weather");
        assert_eq!(GuiShow.call(&mut gui, &cmd).code, STATUS_BAD_OPTION);
    }
}
