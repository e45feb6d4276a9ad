//! Utility functions for the interactive UI

use ratatui::style::{Color, Modifier, Style};
use unicode_width::UnicodeWidthChar;

use crate::feedback::BannerKind;
use crate::render::RowKind;

/// Get style for a banner kind
pub fn get_banner_style(kind: BannerKind) -> Style {
    match kind {
        BannerKind::Success => Style::default().fg(Color::Green),
        BannerKind::Error => Style::default().fg(Color::Red),
    }
}

/// Get style for a rendered list row
pub fn get_row_style(kind: RowKind) -> Style {
    match kind {
        RowKind::Title => Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
        RowKind::Description => Style::default().fg(Color::White),
        RowKind::Schedule | RowKind::Availability => Style::default().fg(Color::Gray),
        RowKind::ParticipantsHeading => Style::default().add_modifier(Modifier::BOLD),
        RowKind::Participant => Style::default().fg(Color::Yellow),
        RowKind::EmptyParticipants => Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
        RowKind::Spacer => Style::default(),
        RowKind::Notice => Style::default().fg(Color::Red),
    }
}

/// Truncate a string to fit a display width, marking the cut with "..."
pub fn truncate_str(s: &str, max_width: usize) -> String {
    let width: usize = s.chars().map(|c| c.width().unwrap_or(0)).sum();
    if width <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }

    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width - 3 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("Chess Club", 20), "Chess Club");
        assert_eq!(truncate_str("Programming Class", 10), "Program...");
        assert_eq!(truncate_str("abcdef", 2), "..");
    }

    #[test]
    fn test_truncate_wide_chars() {
        // Each CJK character is two columns wide
        assert_eq!(truncate_str("日本語クラブ", 7), "日本...");
    }

    #[test]
    fn test_banner_styles_differ() {
        assert_ne!(
            get_banner_style(BannerKind::Success),
            get_banner_style(BannerKind::Error)
        );
    }
}
