//! View routing and keyboard shortcuts
//!
//! The app shows one view at a time. `Ctrl`/`Cmd` + letter jumps between
//! views unless a text field has focus.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum View {
    #[default]
    Home,
    Stats,
    Sensory,
    Routine,
    Settings,
    Mood,
}

impl View {
    /// Views reachable from the bottom navigation bar
    pub fn navigation() -> [View; 5] {
        [View::Home, View::Stats, View::Sensory, View::Routine, View::Settings]
    }

    /// Header title
    pub fn title(&self) -> &'static str {
        match self {
            View::Home => "NeuroTrack",
            View::Stats => "Insights",
            View::Sensory => "Sensory Log",
            View::Routine => "Daily Routine",
            View::Settings => "Settings",
            View::Mood => "Mood",
        }
    }

    /// Navigation bar label
    pub fn label(&self) -> &'static str {
        match self {
            View::Home => "Home",
            View::Stats => "Insights",
            View::Sensory => "Sensory",
            View::Routine => "Routine",
            View::Settings => "Settings",
            View::Mood => "Mood",
        }
    }

    /// The floating quick sensory button is hidden on the sensory view itself
    pub fn shows_quick_sensory(&self) -> bool {
        *self != View::Sensory
    }
}

impl std::str::FromStr for View {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "home" => Ok(View::Home),
            "stats" | "insights" => Ok(View::Stats),
            "sensory" => Ok(View::Sensory),
            "routine" => Ok(View::Routine),
            "settings" => Ok(View::Settings),
            "mood" => Ok(View::Mood),
            _ => Err(format!("unknown view: {}", s)),
        }
    }
}

/// Key → view bindings, used together with the platform modifier
pub const VIEW_SHORTCUTS: &[(char, View, &str)] = &[
    ('h', View::Home, "Home"),
    ('s', View::Stats, "Stats"),
    ('m', View::Mood, "Mood"),
    (',', View::Settings, "Settings"),
];

/// A key event as seen by the shortcut handler
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyPress {
    pub key: String,
    pub ctrl: bool,
    pub meta: bool,
    /// A text input or textarea currently has focus
    pub text_focused: bool,
}

impl KeyPress {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Default::default()
        }
    }

    pub fn ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub fn in_text_field(mut self) -> Self {
        self.text_focused = true;
        self
    }
}

/// Resolve a key event to the view it selects
pub fn dispatch_shortcut(press: &KeyPress) -> Option<View> {
    if press.text_focused || !(press.ctrl || press.meta) {
        return None;
    }

    let key = press.key.to_lowercase();
    let mut chars = key.chars();
    let c = chars.next()?;
    if chars.next().is_some() {
        return None;
    }

    VIEW_SHORTCUTS
        .iter()
        .find(|(k, _, _)| *k == c)
        .map(|(_, view, _)| *view)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Mac,
    Other,
}

impl Platform {
    /// Platform this binary was built for
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::Mac
        } else {
            Platform::Other
        }
    }

    /// Name shown for the shortcut modifier
    pub fn modifier(&self) -> &'static str {
        match self {
            Platform::Mac => "⌘",
            Platform::Other => "Ctrl",
        }
    }
}

/// Shortcut hint lines, e.g. `Ctrl + H  Home`
pub fn shortcut_hints(platform: Platform) -> Vec<String> {
    VIEW_SHORTCUTS
        .iter()
        .map(|(key, _, description)| {
            format!(
                "{} + {}  {}",
                platform.modifier(),
                key.to_ascii_uppercase(),
                description
            )
        })
        .collect()
}

/// Placeholder delay before a freshly opened panel shows its content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadingGate {
    delay: Duration,
}

pub const LOADING_DELAY: Duration = Duration::from_millis(1000);

impl Default for LoadingGate {
    fn default() -> Self {
        Self { delay: LOADING_DELAY }
    }
}

impl LoadingGate {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Whether the placeholder is still showing `elapsed` after opening
    pub fn is_loading(&self, elapsed: Duration) -> bool {
        elapsed < self.delay
    }

    pub fn remaining(&self, elapsed: Duration) -> Duration {
        self.delay.saturating_sub(elapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_requires_modifier() {
        assert_eq!(dispatch_shortcut(&KeyPress::new("h")), None);
        assert_eq!(dispatch_shortcut(&KeyPress::new("h").ctrl()), Some(View::Home));
        assert_eq!(dispatch_shortcut(&KeyPress::new("S").meta()), Some(View::Stats));
        assert_eq!(dispatch_shortcut(&KeyPress::new("m").ctrl()), Some(View::Mood));
        assert_eq!(dispatch_shortcut(&KeyPress::new(",").meta()), Some(View::Settings));
    }

    #[test]
    fn test_dispatch_ignores_text_fields_and_unbound_keys() {
        assert_eq!(dispatch_shortcut(&KeyPress::new("h").ctrl().in_text_field()), None);
        assert_eq!(dispatch_shortcut(&KeyPress::new("q").ctrl()), None);
        assert_eq!(dispatch_shortcut(&KeyPress::new("Home").ctrl()), None);
        assert_eq!(dispatch_shortcut(&KeyPress::new("").ctrl()), None);
    }

    #[test]
    fn test_titles() {
        assert_eq!(View::default().title(), "NeuroTrack");
        assert_eq!(View::Stats.title(), "Insights");
        assert_eq!(View::Routine.title(), "Daily Routine");
    }

    #[test]
    fn test_quick_sensory_visibility() {
        assert!(View::Home.shows_quick_sensory());
        assert!(!View::Sensory.shows_quick_sensory());
    }

    #[test]
    fn test_shortcut_hints() {
        let mac = shortcut_hints(Platform::Mac);
        assert_eq!(mac[0], "⌘ + H  Home");
        let other = shortcut_hints(Platform::Other);
        assert_eq!(other[3], "Ctrl + ,  Settings");
    }

    #[test]
    fn test_loading_gate() {
        let gate = LoadingGate::default();
        assert!(gate.is_loading(Duration::from_millis(999)));
        assert!(!gate.is_loading(Duration::from_millis(1000)));
        assert_eq!(gate.remaining(Duration::from_millis(400)), Duration::from_millis(600));
        assert_eq!(gate.remaining(Duration::from_secs(5)), Duration::ZERO);
    }
}
