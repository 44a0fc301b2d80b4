//! Where the compact window goes

use super::{Position, Size};
use crate::window::Rect;

/// Gap to the work-area corner when the CLI window is maximized
pub const MAXIMIZED_MARGIN: i32 = 50;

/// Gap below the CLI window, also used when clamping to the work area
pub const BELOW_MARGIN: i32 = 10;

/// Left edge of the fallback position
pub const DEFAULT_LEFT: i32 = 10;

/// Distance of the fallback position above the screen bottom
pub const DEFAULT_BOTTOM_OFFSET: i32 = 60;

/// Primary screen height assumed when it cannot be queried
pub const FALLBACK_SCREEN_HEIGHT: i32 = 1080;

/// Compact window position next to the tracked CLI window.
///
/// A maximized CLI window gets the compact window in the bottom-right corner
/// of its work area. Otherwise it sits just below the CLI window's bottom-left
/// corner, pulled back inside the work area where it would overflow.
pub fn follow_position(tracked: Rect, work: Rect, maximized: bool, compact: Size) -> Position {
    if maximized {
        return Position::new(
            work.right - compact.width - MAXIMIZED_MARGIN,
            work.bottom - compact.height - MAXIMIZED_MARGIN,
        );
    }

    let mut x = tracked.left;
    let mut y = tracked.bottom + BELOW_MARGIN;

    if y + compact.height > work.bottom {
        y = work.bottom - compact.height - BELOW_MARGIN;
    }
    if x < work.left {
        x = work.left + BELOW_MARGIN;
    }
    if x + compact.width > work.right {
        x = work.right - compact.width - BELOW_MARGIN;
    }

    Position::new(x, y)
}

/// Bottom-left of the primary screen, used when the CLI window cannot be measured
pub fn default_position(screen_height: i32, compact: Size) -> Position {
    Position::new(
        DEFAULT_LEFT,
        screen_height - compact.height - DEFAULT_BOTTOM_OFFSET,
    )
}
