use crossterm::style::Color;

use crate::report::LineKind;

/// Trait for mapping report line kinds to terminal colors
pub trait AsTermColor {
    fn as_crossterm_color(&self) -> Option<Color>;
}

impl AsTermColor for LineKind {
    fn as_crossterm_color(&self) -> Option<Color> {
        match self {
            LineKind::Billable => Some(Color::Green),
            LineKind::NonBillable => Some(Color::Blue),
            LineKind::Total => Some(Color::Yellow),
            LineKind::Heading | LineKind::Plain => None,
        }
    }
}
