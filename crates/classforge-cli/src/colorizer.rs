//! Terminal colorization for status output
//!
//! Applies ANSI escape codes to status labels using crossterm.

use crossterm::style::{Color, Stylize};

use classforge::plugins::class::ConstructKind;

/// Outcome of writing one file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Generated,
    Overwritten,
    Skipped,
    Report,
}

impl Status {
    pub fn label(self) -> &'static str {
        match self {
            Status::Generated => "generated",
            Status::Overwritten => "overwritten",
            Status::Skipped => "skipped",
            Status::Report => "report",
        }
    }

    fn color(self) -> Color {
        match self {
            Status::Generated => Color::Green,
            Status::Overwritten => Color::Yellow,
            Status::Skipped => Color::DarkGrey,
            Status::Report => Color::Cyan,
        }
    }
}

/// One status line, label padded so paths line up
pub fn status_line(status: Status, detail: &str, colorize: bool) -> String {
    let label = format!("{:>11}", status.label());
    if colorize {
        format!("{} {}", label.with(status.color()).bold(), detail)
    } else {
        format!("{} {}", label, detail)
    }
}

/// Construct kind keyword for `inspect` output
pub fn kind_label(kind: ConstructKind, colorize: bool) -> String {
    let label = kind.to_string();
    if !colorize {
        return label;
    }
    let color = match kind {
        ConstructKind::Class => Color::Blue,
        ConstructKind::AbstractClass => Color::Magenta,
        ConstructKind::Interface => Color::Green,
        ConstructKind::Enum => Color::Yellow,
        ConstructKind::Record => Color::Cyan,
    };
    format!("{}", label.with(color))
}
