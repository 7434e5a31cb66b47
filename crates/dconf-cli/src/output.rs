//! Diff line rendering
//!
//! One line per action: a kind marker, then `section/option=value`. When
//! color is on, the marker is preceded by the escape sequence of its kind,
//! byte for byte what earlier versions of this tool printed, so scripts
//! comparing colored output keep working.

use colored::control;
use dconf_core::{Action, ActionKind};

use crate::cli::ColorChoice;

const WRITE_STYLE: &str = "\x1b[32m";
const RESET_STYLE: &str = "\x1b[31m";
const IGNORED_STYLE: &str = "\x1b[38;5;244m";

/// Marker shown in front of an action of `kind`
pub fn marker(kind: ActionKind) -> &'static str {
    match kind {
        ActionKind::Write => "> ",
        ActionKind::Reset => "< ",
        ActionKind::Ignored => "? ",
    }
}

fn style(kind: ActionKind) -> &'static str {
    match kind {
        ActionKind::Write => WRITE_STYLE,
        ActionKind::Reset => RESET_STYLE,
        ActionKind::Ignored => IGNORED_STYLE,
    }
}

/// Render `action` as a single diff line, without the trailing newline.
pub fn render_line(action: &Action, color: bool) -> String {
    let kind = action.kind();
    if color {
        format!("{}{}{}", style(kind), marker(kind), action)
    } else {
        format!("{}{}", marker(kind), action)
    }
}

/// Settle the color mode for the whole process and report whether the
/// diff should be colored.
///
/// `auto` defers to `colored`, which honours `NO_COLOR`, `CLICOLOR` and
/// `CLICOLOR_FORCE` and whether stdout is a terminal.
pub fn resolve_color(choice: ColorChoice) -> bool {
    match choice {
        ColorChoice::Always => control::set_override(true),
        ColorChoice::Never => control::set_override(false),
        ColorChoice::Auto => {}
    }
    control::SHOULD_COLORIZE.should_colorize()
}
