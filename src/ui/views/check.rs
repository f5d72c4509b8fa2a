use crate::ui::blocks::check_item::{CheckItem, CheckStatus};
use crate::ui::blocks::header::CommandHeader;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

pub fn render_check(items: &[CheckItem], supports_color: bool, supports_unicode: bool) -> String {
    let mut out = CommandHeader::new(Icon::Check, "Autosync Check").render(supports_color, supports_unicode);
    out.push('\n');
    for item in items {
        out.push_str(&item.render(supports_color, supports_unicode));
    }

    let failed = items
        .iter()
        .filter(|i| i.status == CheckStatus::Error)
        .count();
    let warned = items
        .iter()
        .filter(|i| i.status == CheckStatus::Warning)
        .count();

    out.push('\n');
    let summary = if failed > 0 {
        ColoredText::error(format!("{failed} check(s) failed")).render(supports_color)
    } else if warned > 0 {
        ColoredText::warning(format!("All required checks passed ({warned} warning(s))"))
            .render(supports_color)
    } else {
        ColoredText::success("All checks passed").render(supports_color)
    };
    out.push_str(&summary);
    out.push('\n');
    out
}
