//! Message prefixes and color detection shared by the printers.

use owo_colors::OwoColorize;

/// Colors are on unless `NO_COLOR` is set.
pub fn colors_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

fn prefix(label: &str, paint: fn(&str) -> String) -> String {
    if colors_enabled() {
        paint(label)
    } else {
        label.to_string()
    }
}

pub fn error_prefix() -> String {
    prefix("✖ error:", |s| s.red().bold().to_string())
}

pub fn info_prefix() -> String {
    prefix("◆ info:", |s| s.blue().bold().to_string())
}

pub fn fix_prefix() -> String {
    prefix("🔧", |s| s.yellow().bold().to_string())
}

pub fn ok_prefix() -> String {
    prefix("✔", |s| s.green().bold().to_string())
}
