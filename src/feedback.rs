//! Feedback banner with auto-hide

use std::time::{Duration, Instant};

/// How long a banner message stays visible
pub const HIDE_AFTER: Duration = Duration::from_secs(5);

/// Banner style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
}

impl BannerKind {
    pub fn icon(&self) -> &'static str {
        match self {
            BannerKind::Success => "✓",
            BannerKind::Error => "✗",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Shown {
    kind: BannerKind,
    text: String,
    hide_at: Instant,
}

/// The single feedback area. Each `show` replaces the previous message and
/// starts a fresh hide delay.
#[derive(Debug, Clone, Default)]
pub struct Banner {
    current: Option<Shown>,
}

impl Banner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, kind: BannerKind, text: impl Into<String>, now: Instant) {
        self.current = Some(Shown {
            kind,
            text: text.into(),
            hide_at: now + HIDE_AFTER,
        });
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.show(BannerKind::Success, text, Instant::now());
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.show(BannerKind::Error, text, Instant::now());
    }

    /// Visible strictly before the hide deadline
    pub fn is_visible_at(&self, now: Instant) -> bool {
        matches!(&self.current, Some(shown) if now < shown.hide_at)
    }

    /// The last message shown, whether or not it is still visible
    pub fn text(&self) -> Option<&str> {
        self.current.as_ref().map(|s| s.text.as_str())
    }

    pub fn kind(&self) -> Option<BannerKind> {
        self.current.as_ref().map(|s| s.kind)
    }

    /// Message and style if still visible at `now`
    pub fn visible_at(&self, now: Instant) -> Option<(BannerKind, &str)> {
        self.current
            .as_ref()
            .filter(|shown| now < shown.hide_at)
            .map(|shown| (shown.kind, shown.text.as_str()))
    }
}
