//! Keyboard shortcuts for the demo window.

use starscore_core::RatingWidget;
use winit::keyboard::{Key, NamedKey};

/// Actions bound to keys in the demo window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    ToggleHalfStars,
    ToggleReadOnly,
    ToggleLabel,
    MoreStars,
    FewerStars,
    ExportSvg,
    Quit,
}

impl Shortcut {
    pub const ALL: [Shortcut; 7] = [
        Shortcut::ToggleHalfStars,
        Shortcut::ToggleReadOnly,
        Shortcut::ToggleLabel,
        Shortcut::MoreStars,
        Shortcut::FewerStars,
        Shortcut::ExportSvg,
        Shortcut::Quit,
    ];

    /// Map a logical key to its shortcut, ignoring case.
    pub fn from_key(key: &Key) -> Option<Self> {
        match key {
            Key::Named(NamedKey::ArrowUp) => Some(Self::MoreStars),
            Key::Named(NamedKey::ArrowDown) => Some(Self::FewerStars),
            Key::Named(NamedKey::Escape) => Some(Self::Quit),
            Key::Character(c) => match c.to_ascii_lowercase().as_str() {
                "h" => Some(Self::ToggleHalfStars),
                "r" => Some(Self::ToggleReadOnly),
                "l" => Some(Self::ToggleLabel),
                "s" => Some(Self::ExportSvg),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn key_label(&self) -> &'static str {
        match self {
            Self::ToggleHalfStars => "H",
            Self::ToggleReadOnly => "R",
            Self::ToggleLabel => "L",
            Self::MoreStars => "Up",
            Self::FewerStars => "Down",
            Self::ExportSvg => "S",
            Self::Quit => "Escape",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::ToggleHalfStars => "Toggle half stars",
            Self::ToggleReadOnly => "Toggle read-only",
            Self::ToggleLabel => "Toggle value readout",
            Self::MoreStars => "Add a star",
            Self::FewerStars => "Remove a star",
            Self::ExportSvg => "Print SVG snapshot to stdout",
            Self::Quit => "Quit",
        }
    }

    /// Apply a property toggle to `widget`.
    ///
    /// Returns true when the control's intrinsic width changed and the
    /// window should be refitted. Export and quit are handled by the caller.
    pub fn apply(&self, widget: &mut RatingWidget) -> bool {
        match self {
            Self::ToggleHalfStars => {
                widget.set_allows_half_stars(!widget.allows_half_stars());
                false
            }
            Self::ToggleReadOnly => {
                widget.set_read_only(!widget.is_read_only());
                false
            }
            Self::ToggleLabel => {
                widget.set_show_value_label(!widget.shows_value_label());
                true
            }
            Self::MoreStars => {
                widget.set_star_count(widget.star_count() + 1);
                true
            }
            Self::FewerStars => {
                let count = widget.star_count();
                if count == 0 {
                    return false;
                }
                widget.set_star_count(count - 1);
                true
            }
            Self::ExportSvg | Self::Quit => false,
        }
    }

    /// Print all shortcuts to console.
    pub fn print_all() {
        println!("\n=== Keyboard Shortcuts ===");
        for shortcut in Self::ALL {
            println!("  {:10} {}", shortcut.key_label(), shortcut.description());
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(
            Shortcut::from_key(&Key::Character("h".into())),
            Some(Shortcut::ToggleHalfStars)
        );
        assert_eq!(
            Shortcut::from_key(&Key::Character("S".into())),
            Some(Shortcut::ExportSvg)
        );
        assert_eq!(
            Shortcut::from_key(&Key::Named(NamedKey::ArrowDown)),
            Some(Shortcut::FewerStars)
        );
        assert_eq!(Shortcut::from_key(&Key::Character("q".into())), None);
        assert_eq!(Shortcut::from_key(&Key::Named(NamedKey::Tab)), None);
    }

    #[test]
    fn test_toggles() {
        let mut widget = RatingWidget::new();
        assert!(!Shortcut::ToggleHalfStars.apply(&mut widget));
        assert!(widget.allows_half_stars());
        Shortcut::ToggleReadOnly.apply(&mut widget);
        assert!(widget.is_read_only());
        assert!(Shortcut::ToggleLabel.apply(&mut widget));
        assert!(widget.shows_value_label());
    }

    #[test]
    fn test_star_count_keys() {
        let mut widget = RatingWidget::new();
        widget.set_value(5.0);
        assert!(Shortcut::FewerStars.apply(&mut widget));
        assert_eq!(widget.star_count(), 4);
        assert_eq!(widget.value(), 4.0);
        assert!(Shortcut::MoreStars.apply(&mut widget));
        assert_eq!(widget.star_count(), 5);

        widget.set_star_count(0);
        assert!(!Shortcut::FewerStars.apply(&mut widget));
        assert_eq!(widget.star_count(), 0);
    }

    #[test]
    fn test_labels_are_unique() {
        let mut labels: Vec<_> = Shortcut::ALL.iter().map(|s| s.key_label()).collect();
        labels.sort();
        labels.dedup();
        assert_eq!(labels.len(), Shortcut::ALL.len());
    }
}
