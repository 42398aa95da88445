//! Maps semantic roles to presentation tokens.
//!
//! The diff and inspection logic never emits escape sequences directly; it
//! tags each rendered line with a [`Role`] and the adapter here turns the
//! tag into text. With color disabled the adapter is a pass-through no-op.

const RESET: &str = "\u{1b}[0m";
const RED: &str = "\u{1b}[31m";
const GREEN: &str = "\u{1b}[32m";
const YELLOW: &str = "\u{1b}[33m";
const BLUE: &str = "\u{1b}[34m";
const MAGENTA: &str = "\u{1b}[35m";
const CYAN: &str = "\u{1b}[36m";

/// The semantic role of a rendered line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    /// The expected half of a changed slot.
    Expected,
    /// The actual half of a changed slot.
    Actual,
    /// An element present only on the actual side.
    Inserted,
    /// An element present only on the expected side.
    Deleted,
    /// Unchanged context.
    Plain,
    /// The key or index label opening a nested sub-block.
    NestedKey,
}

/// A presentation token a role maps to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorToken {
    /// No decoration.
    #[default]
    Normal,
    /// ANSI red.
    Red,
    /// ANSI green.
    Green,
    /// ANSI yellow.
    Yellow,
    /// ANSI blue.
    Blue,
    /// ANSI magenta.
    Magenta,
    /// ANSI cyan.
    Cyan,
}

impl ColorToken {
    fn code(self) -> Option<&'static str> {
        match self {
            Self::Normal => None,
            Self::Red => Some(RED),
            Self::Green => Some(GREEN),
            Self::Yellow => Some(YELLOW),
            Self::Blue => Some(BLUE),
            Self::Magenta => Some(MAGENTA),
            Self::Cyan => Some(CYAN),
        }
    }
}

/// The role-to-token style map.
///
/// ```
/// # use superdiff_core::{ColorToken, Palette, Role};
/// let palette = Palette::default().with_role(Role::Deleted, ColorToken::Magenta);
/// assert_eq!(palette.token_for(Role::Deleted), ColorToken::Magenta);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    expected: ColorToken,
    actual: ColorToken,
    inserted: ColorToken,
    deleted: ColorToken,
    plain: ColorToken,
    nested_key: ColorToken,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            expected: ColorToken::Red,
            actual: ColorToken::Green,
            inserted: ColorToken::Green,
            deleted: ColorToken::Red,
            plain: ColorToken::Normal,
            nested_key: ColorToken::Normal,
        }
    }
}

impl Palette {
    /// Returns the token configured for the given role.
    #[must_use]
    pub fn token_for(&self, role: Role) -> ColorToken {
        match role {
            Role::Expected => self.expected,
            Role::Actual => self.actual,
            Role::Inserted => self.inserted,
            Role::Deleted => self.deleted,
            Role::Plain => self.plain,
            Role::NestedKey => self.nested_key,
        }
    }

    /// Remaps a role to a different token.
    #[must_use]
    pub fn with_role(mut self, role: Role, token: ColorToken) -> Self {
        match role {
            Role::Expected => self.expected = token,
            Role::Actual => self.actual = token,
            Role::Inserted => self.inserted = token,
            Role::Deleted => self.deleted = token,
            Role::Plain => self.plain = token,
            Role::NestedKey => self.nested_key = token,
        }
        self
    }
}

/// Applies a token to one line of text. A no-op when `enabled` is false or
/// the token carries no decoration.
pub(crate) fn paint(token: ColorToken, text: &str, enabled: bool) -> String {
    match token.code() {
        Some(code) if enabled => format!("{code}{text}{RESET}"),
        _ => text.to_string(),
    }
}
