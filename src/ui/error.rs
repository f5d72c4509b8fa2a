use autosync::AutosyncError;

use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

pub fn format_error(err: &anyhow::Error) -> String {
    let caps = crate::ui::terminal::detect_capabilities();
    format_error_with(err, caps.supports_color, caps.supports_unicode)
}

fn format_error_with(err: &anyhow::Error, supports_color: bool, supports_unicode: bool) -> String {
    let mut out = format!(
        "{} {}\n",
        Icon::Error.colored(supports_color, supports_unicode),
        ColoredText::error(err.to_string()).bold().render(supports_color)
    );

    if let Some(hint) = err.downcast_ref::<AutosyncError>().and_then(fix_hint) {
        out.push_str(&format!(
            "  {} {}\n",
            Icon::Arrow.colored(supports_color, supports_unicode),
            hint
        ));
    }
    out
}

fn fix_hint(err: &AutosyncError) -> Option<String> {
    match err {
        AutosyncError::InvalidJob { field, .. } => Some(format!(
            "Set it with --{} or in autosync.toml",
            field.replace('_', "-")
        )),
        AutosyncError::DirectoryNotFound { .. } => {
            Some("Check --local-dir points at an existing directory".to_string())
        }
        AutosyncError::InvalidConfig { .. } => Some("Fix the TOML syntax and try again".to_string()),
        AutosyncError::InvalidEnv { key, .. } => Some(format!("Fix or unset {key}")),
        _ => None,
    }
}
