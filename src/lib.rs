//! Ninuki-GTP: a GTP rules engine for Ninuki.
//!
//! Ninuki is five in a row on a Go board, with Pente-style pair captures:
//! a player wins with an unbroken line of five stones or by capturing ten
//! opponent stones.
//!
//! ## Modules
//!
//! - [`constants`] - Board limits, rule constants and engine identity
//! - [`coord`] - Conversions between board points, coordinates and labels
//! - [`board`] - Board state, legal moves and pair captures
//! - [`scanner`] - Five-in-a-row detection and game result
//! - [`session`] - Capture counters for the current game
//! - [`gtp`] - GTP command table and loop
//!
//! ## Example
//!
//! ```
//! use ninuki_gtp::gtp::{GtpEngine, Reply};
//!
//! let mut engine = GtpEngine::new(7);
//! for row in 1..=5 {
//!     engine.execute(&format!("play b A{row}")).unwrap();
//! }
//! let reply = engine.execute("gogui-rules_final_result").unwrap();
//! assert_eq!(reply, Some(Reply::Success("black".into())));
//! ```

pub mod board;
pub mod constants;
pub mod coord;
pub mod gtp;
pub mod scanner;
pub mod session;
