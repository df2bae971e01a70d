//! Constants for board geometry, game rules, and engine identity.
//!
//! The board uses a 1D array with a shared left/right padding column, so
//! the row stride is `size + 1`. Point `0` lies in the top padding row and
//! doubles as the pass marker.

// =============================================================================
// Board Geometry
// =============================================================================

/// Largest supported board size. Column letters A-Z without I give exactly 25.
pub const MAXSIZE: usize = 25;

/// Smallest supported board size.
pub const MINSIZE: usize = 2;

/// Board size used at start-up unless overridden on the command line.
pub const DEFAULT_SIZE: usize = 7;

/// Column labels, skipping 'I' (Go convention to avoid confusion with 'J').
pub const COLUMN_LETTERS: &[u8; MAXSIZE] = b"ABCDEFGHJKLMNOPQRSTUVWXYZ";

// =============================================================================
// Special Move Values
// =============================================================================

/// Pass move marker (index 0 is padding, so safe to use).
pub const PASS: usize = 0;

// =============================================================================
// Game Rules
// =============================================================================

/// Stones in an unbroken line needed to win.
pub const WIN_LENGTH: usize = 5;

/// Captured stones needed to win.
pub const CAPTURE_THRESHOLD: u32 = 10;

/// Unit steps `(drow, dcol)` probed by the win scanner, in priority order.
pub const SCAN_DIRECTIONS: [(isize, isize); 8] = [
    (1, 0),   // down
    (-1, 0),  // up
    (0, -1),  // left
    (0, 1),   // right
    (-1, 1),  // up-right
    (-1, -1), // up-left
    (1, 1),   // down-right
    (1, -1),  // down-left
];

// =============================================================================
// Engine Identity
// =============================================================================

/// Name reported by `name`.
pub const ENGINE_NAME: &str = "Ninuki";

/// Game id reported by `gogui-rules_game_id`.
pub const GAME_ID: &str = "Ninuki";
