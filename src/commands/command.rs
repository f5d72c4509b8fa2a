use anyhow::Result;
use autosync::config::{Config, ConfigWarning};
use autosync::sync::build_command_line;

use super::Globals;
use crate::ui::context::UiContext;
use crate::ui::output::print_config_warnings;

/// Print the transfer command line. The job is not validated, so this works
/// before the local directory exists.
pub fn cmd_command(globals: &Globals<'_>, config: Config, warnings: &[ConfigWarning]) -> Result<()> {
    let ui = UiContext::new(globals.json, globals.verbose, globals.color, &config);
    print_config_warnings(warnings, ui.color, ui.unicode);

    let job = config.to_job()?;
    let command_line = build_command_line(&job);

    if ui.json {
        println!(
            "{}",
            serde_json::json!({
                "command": "command",
                "target": job.remote_target(),
                "command_line": command_line,
            })
        );
    } else {
        println!("{command_line}");
    }
    Ok(())
}
