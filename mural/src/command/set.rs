use super::{required_option, unknown_option, Command, CommandError, CommandHandler, CommandResult};
use crate::gui::GuiData;

const OPTIONS: &[&str] = &["resolution", "fow", "exit"];

/// Parses `<float>x<float>`; the arguments are joined first so `1920 x 1080` works too.
fn parse_resolution(cmd: &Command) -> Result<(f32, f32), CommandError> {
    let value = cmd.args.concat();
    if value.is_empty() {
        return Err(CommandError::args("no resolution given, expected WxH"));
    }
    let invalid = || CommandError::args(format!("invalid resolution: {}, expected WxH", value));
    let (width, height) = value.split_once(['x', 'X']).ok_or_else(invalid)?;
    let width: f32 = width.trim().parse().map_err(|_| invalid())?;
    let height: f32 = height.trim().parse().map_err(|_| invalid())?;
    if width < 0.0 || height < 0.0 {
        return Err(invalid());
    }
    Ok((width, height))
}

/// `guiset resolution WxH|fow on|off|exit`
pub fn gui_set(gui: &mut GuiData, cmd: &Command) -> Result<String, CommandError> {
    match required_option(cmd, OPTIONS)? {
        "resolution" => {
            let resolution = parse_resolution(cmd)?;
            gui.config_mut().resolution = resolution;
            Ok(format!("resolution set to {}x{}", resolution.0, resolution.1))
        }
        "fow" => {
            let fow = match cmd.arg(0) {
                Some("on") => true,
                Some("off") => false,
                Some(value) => return Err(CommandError::args(format!("invalid fow value: {}, expected on|off", value))),
                None => return Err(CommandError::args("no fow value given, expected on|off")),
            };
            gui.config_mut().map_fow = fow;
            Ok(format!("fow {}", if fow { "on" } else { "off" }))
        }
        "exit" => {
            if gui.exit() {
                Ok("exit".to_string())
            } else {
                Err(CommandError::args("neither hud nor main menu to close"))
            }
        }
        option => Err(unknown_option(option, OPTIONS)),
    }
}

pub struct GuiSet;
impl CommandHandler for GuiSet {
    fn call(&self, gui: &mut GuiData, cmd: &Command) -> CommandResult {
        gui_set(gui, cmd).into()
    }
}
