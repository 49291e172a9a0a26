use serde::{Deserialize, Serialize};
use std::fmt;

/// Bounding rectangle of a node in screen coordinates (edges, in pixels)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl NodeRect {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    pub fn is_empty(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }

    /// Compact form used in node summaries: `[left,top][right,bottom]`
    pub fn to_short_string(&self) -> String {
        format!(
            "[{},{}][{},{}]",
            self.left, self.top, self.right, self.bottom
        )
    }
}

/// Interactive state flags exposed by a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeFlags {
    pub checkable: bool,
    pub checked: bool,
    pub selected: bool,
    pub focused: bool,
    pub focusable: bool,
    pub clickable: bool,
    pub long_clickable: bool,
    pub editable: bool,
    pub visible_to_user: bool,
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self {
            checkable: false,
            checked: false,
            selected: false,
            focused: false,
            focusable: false,
            clickable: false,
            long_clickable: false,
            editable: false,
            visible_to_user: true,
        }
    }
}

impl NodeFlags {
    /// Whether any flag marks the node as directly operable by the user
    pub fn is_interactive(&self) -> bool {
        self.focusable || self.clickable || self.long_clickable || self.checkable || self.editable
    }
}

/// Kind of window a node lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum WindowType {
    Application,
    InputMethod,
    System,
    AccessibilityOverlay,
    SplitScreenDivider,
    Unknown(i32),
}

impl From<i32> for WindowType {
    fn from(raw: i32) -> Self {
        match raw {
            1 => Self::Application,
            2 => Self::InputMethod,
            3 => Self::System,
            4 => Self::AccessibilityOverlay,
            5 => Self::SplitScreenDivider,
            other => Self::Unknown(other),
        }
    }
}

impl From<WindowType> for i32 {
    fn from(window_type: WindowType) -> Self {
        match window_type {
            WindowType::Application => 1,
            WindowType::InputMethod => 2,
            WindowType::System => 3,
            WindowType::AccessibilityOverlay => 4,
            WindowType::SplitScreenDivider => 5,
            WindowType::Unknown(raw) => raw,
        }
    }
}

impl fmt::Display for WindowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Application => f.write_str("TYPE_APPLICATION"),
            Self::InputMethod => f.write_str("TYPE_INPUT_METHOD"),
            Self::System => f.write_str("TYPE_SYSTEM"),
            Self::AccessibilityOverlay => f.write_str("TYPE_ACCESSIBILITY_OVERLAY"),
            Self::SplitScreenDivider => f.write_str("TYPE_SPLIT_SCREEN_DIVIDER"),
            Self::Unknown(raw) => write!(f, "Unknown: {}", raw),
        }
    }
}

/// Window enclosing a node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub window_type: WindowType,
}

impl WindowInfo {
    pub fn new(title: Option<String>, window_type: WindowType) -> Self {
        Self { title, window_type }
    }
}

/// Capability level of the host platform.
///
/// Attributes introduced in later platform releases are only readable when the
/// host reports at least the level that introduced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlatformLevel(pub u32);

impl PlatformLevel {
    /// Window titles
    pub const N: PlatformLevel = PlatformLevel(24);
    /// Hint text
    pub const O: PlatformLevel = PlatformLevel(26);
    /// Pane titles and tooltips
    pub const P: PlatformLevel = PlatformLevel(28);

    pub fn supports(self, required: PlatformLevel) -> bool {
        self >= required
    }
}

impl Default for PlatformLevel {
    fn default() -> Self {
        Self::P
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_short_string() {
        let rect = NodeRect::new(0, 10, 100, 60);
        assert_eq!(rect.to_short_string(), "[0,10][100,60]");
        assert_eq!(rect.width(), 100);
        assert_eq!(rect.height(), 50);
        assert!(!rect.is_empty());
        assert!(NodeRect::new(5, 5, 5, 20).is_empty());
    }

    #[test]
    fn test_window_type_names() {
        assert_eq!(WindowType::from(1).to_string(), "TYPE_APPLICATION");
        assert_eq!(WindowType::from(4).to_string(), "TYPE_ACCESSIBILITY_OVERLAY");
        assert_eq!(WindowType::from(42).to_string(), "Unknown: 42");
        assert_eq!(i32::from(WindowType::SplitScreenDivider), 5);
    }

    #[test]
    fn test_flags_deserialize_defaults() {
        let flags: NodeFlags = serde_json::from_str(r#"{"clickable": true}"#).unwrap();
        assert!(flags.clickable);
        assert!(flags.visible_to_user);
        assert!(!flags.checkable);
        assert!(flags.is_interactive());
    }

    #[test]
    fn test_platform_level_gates() {
        assert!(PlatformLevel(29).supports(PlatformLevel::P));
        assert!(PlatformLevel::O.supports(PlatformLevel::N));
        assert!(!PlatformLevel::O.supports(PlatformLevel::P));
    }
}
