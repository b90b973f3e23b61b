//! Input event dispatch
//!
//! The windowing backend delivers close, key and mouse-button events to a
//! [`WindowEventHandler`]. The default handler, [`InputDispatcher`], keeps no
//! state: it translates the raw codes into labelled records and logs them.
//!
//! Raw codes follow GLFW's numbering. Codes outside the known tables degrade to
//! an `unknown` label instead of failing, so newer backend codes pass through.

use std::fmt;

/// Raw action code for a released key or button
pub const ACTION_RELEASE: i32 = 0;
/// Raw action code for a pressed key or button
pub const ACTION_PRESS: i32 = 1;
/// Raw action code for a held key that auto-repeated
pub const ACTION_REPEAT: i32 = 2;

/// Raw code of the left mouse button
pub const MOUSE_BUTTON_LEFT: i32 = 0;
/// Raw code of the right mouse button
pub const MOUSE_BUTTON_RIGHT: i32 = 1;
/// Raw code of the middle mouse button
pub const MOUSE_BUTTON_MIDDLE: i32 = 2;

/// Raw keyboard event as delivered by the windowing backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    /// Backend key code
    pub key: i32,
    /// Platform scancode
    pub scancode: i32,
    /// Backend action code
    pub action: i32,
    /// Modifier bit set
    pub mods: i32,
    /// Printable key name resolved by the backend, if it has one
    pub name: Option<String>,
}

/// Raw mouse button event as delivered by the windowing backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseButtonEvent {
    /// Backend button code
    pub button: i32,
    /// Backend action code
    pub action: i32,
    /// Modifier bit set
    pub mods: i32,
}

/// Receiver for window events, passed explicitly to each poll
///
/// This is the extension point for systems that want to react to input. No
/// method may destroy window or Vulkan resources; teardown belongs to the
/// owner of the [`WindowContext`](crate::WindowContext) after the main loop.
pub trait WindowEventHandler {
    /// The user asked the window to close
    fn on_close(&mut self);

    /// A key changed state
    fn on_key(&mut self, event: &KeyEvent);

    /// A mouse button changed state
    fn on_mouse_button(&mut self, event: &MouseButtonEvent);
}

/// Semantic meaning of a key action code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Key went down
    Pressed,
    /// Key went up
    Released,
    /// Key is held and repeating
    Repeated,
    /// Code not known to this crate
    Unknown,
}

impl KeyAction {
    /// Map a raw action code
    pub const fn from_raw(action: i32) -> Self {
        match action {
            ACTION_PRESS => Self::Pressed,
            ACTION_RELEASE => Self::Released,
            ACTION_REPEAT => Self::Repeated,
            _ => Self::Unknown,
        }
    }

    /// Lowercase label used in log records
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pressed => "pressed",
            Self::Released => "released",
            Self::Repeated => "repeated",
            Self::Unknown => "unknown",
        }
    }
}

/// Semantic meaning of a mouse button action code
///
/// Mouse buttons do not repeat, so the repeat code maps to `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonAction {
    /// Button went down
    Pressed,
    /// Button went up
    Released,
    /// Code not known to this crate
    Unknown,
}

impl ButtonAction {
    /// Map a raw action code
    pub const fn from_raw(action: i32) -> Self {
        match action {
            ACTION_PRESS => Self::Pressed,
            ACTION_RELEASE => Self::Released,
            _ => Self::Unknown,
        }
    }

    /// Lowercase label used in log records
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pressed => "pressed",
            Self::Released => "released",
            Self::Unknown => "unknown",
        }
    }
}

/// Named mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button
    Left,
    /// Wheel button
    Middle,
    /// Secondary button
    Right,
    /// Any extra button
    Unknown,
}

impl MouseButton {
    /// Map a raw button code
    pub const fn from_raw(button: i32) -> Self {
        match button {
            MOUSE_BUTTON_LEFT => Self::Left,
            MOUSE_BUTTON_MIDDLE => Self::Middle,
            MOUSE_BUTTON_RIGHT => Self::Right,
            _ => Self::Unknown,
        }
    }

    /// Lowercase label used in log records
    pub const fn label(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Middle => "middle",
            Self::Right => "right",
            Self::Unknown => "unknown",
        }
    }
}

/// Translated key event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyRecord {
    /// Printable name, `unknown` when the backend has none
    pub name: String,
    /// Backend key code
    pub key: i32,
    /// Platform scancode
    pub scancode: i32,
    /// Translated action
    pub action: KeyAction,
}

impl fmt::Display for KeyRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "key {} (key {}, scancode {}) {}",
            self.name,
            self.key,
            self.scancode,
            self.action.label()
        )
    }
}

/// Translated mouse button event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseButtonRecord {
    /// Named button
    pub button: MouseButton,
    /// Backend button code
    pub code: i32,
    /// Translated action
    pub action: ButtonAction,
}

impl fmt::Display for MouseButtonRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} mouse button ({}) {}",
            self.button.label(),
            self.code,
            self.action.label()
        )
    }
}

/// Translate a raw key event
pub fn describe_key(event: &KeyEvent) -> KeyRecord {
    KeyRecord {
        name: event.name.clone().unwrap_or_else(|| "unknown".to_string()),
        key: event.key,
        scancode: event.scancode,
        action: KeyAction::from_raw(event.action),
    }
}

/// Translate a raw mouse button event
pub const fn describe_mouse_button(event: &MouseButtonEvent) -> MouseButtonRecord {
    MouseButtonRecord {
        button: MouseButton::from_raw(event.button),
        code: event.button,
        action: ButtonAction::from_raw(event.action),
    }
}

/// Default event handler: logs every event and mutates nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct InputDispatcher;

impl WindowEventHandler for InputDispatcher {
    fn on_close(&mut self) {
        log::info!("Window close event... bye!");
    }

    fn on_key(&mut self, event: &KeyEvent) {
        log::info!("{}", describe_key(event));
    }

    fn on_mouse_button(&mut self, event: &MouseButtonEvent) {
        log::info!("{}", describe_mouse_button(event));
    }
}
