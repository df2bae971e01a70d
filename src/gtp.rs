//! Go Text Protocol (GTP) front end for Ninuki.
//!
//! Implements GTP version 2 framing plus the `gogui-rules_*` extensions,
//! so the engine can be attached to GoGui as a rules engine.
//!
//! ## Supported Commands
//!
//! - `protocol_version`, `name`, `version`, `known_command <cmd>`,
//!   `list_commands`, `quit`
//! - `boardsize <size>` - Reset to an empty board of the given size
//! - `clear_board` - Reset the board and the capture counters
//! - `komi <value>` - Store komi (unused by the rules)
//! - `showboard` - Print the board
//! - `play <color> <vertex>` - Play a move
//! - `genmove <color>` - Play a uniformly random legal move
//! - `legal_moves <color>` - List legal moves for a color
//! - `gogui-rules_*` - Rules queries (legal moves, result, captures, board...)
//!
//! ## Example
//!
//! ```
//! use ninuki_gtp::gtp::GtpEngine;
//!
//! let mut engine = GtpEngine::with_seed(7, 1);
//! let mut out = Vec::new();
//! engine.run("play b A1\ngogui-rules_captured_count\n".as_bytes(), &mut out).unwrap();
//! assert_eq!(String::from_utf8(out).unwrap(), "= \n\n= 0 0\n\n");
//! ```

use std::fmt;
use std::io::{BufRead, Write};

use anyhow::Context;
use thiserror::Error;
use tracing::{debug, error};

use crate::board::{Board, Color};
use crate::constants::{DEFAULT_SIZE, ENGINE_NAME, GAME_ID, PASS};
use crate::coord::{Coord, Point, color_to_int, coord_to_point, format_point, move_to_coord};
use crate::scanner::{evaluate_result, has_winner};
use crate::session::SessionState;

type Handler = fn(&mut GtpEngine, &[&str]) -> Result<String, CommandError>;

/// An entry of the command table.
struct Command {
    name: &'static str,
    /// Required argument count and the usage text sent when it is violated
    arity: Option<(usize, &'static str)>,
    handler: Handler,
}

const fn cmd(name: &'static str, handler: Handler) -> Command {
    Command {
        name,
        arity: None,
        handler,
    }
}

const fn cmd_with_args(name: &'static str, n: usize, usage: &'static str, handler: Handler) -> Command {
    Command {
        name,
        arity: Some((n, usage)),
        handler,
    }
}

/// The command table, in the order reported by `list_commands`.
const COMMANDS: &[Command] = &[
    cmd("protocol_version", GtpEngine::cmd_protocol_version),
    cmd("quit", GtpEngine::cmd_quit),
    cmd("name", GtpEngine::cmd_name),
    cmd_with_args("boardsize", 1, "Usage: boardsize INT", GtpEngine::cmd_boardsize),
    cmd("showboard", GtpEngine::cmd_showboard),
    cmd("clear_board", GtpEngine::cmd_clear_board),
    cmd_with_args("komi", 1, "Usage: komi FLOAT", GtpEngine::cmd_komi),
    cmd("version", GtpEngine::cmd_version),
    cmd_with_args(
        "known_command",
        1,
        "Usage: known_command CMD_NAME",
        GtpEngine::cmd_known_command,
    ),
    cmd_with_args("genmove", 1, "Usage: genmove {w,b}", GtpEngine::cmd_genmove),
    cmd("list_commands", GtpEngine::cmd_list_commands),
    cmd_with_args("play", 2, "Usage: play {b,w} MOVE", GtpEngine::cmd_play),
    cmd_with_args("legal_moves", 1, "Usage: legal_moves {w,b}", GtpEngine::cmd_legal_moves),
    cmd("gogui-rules_legal_moves", GtpEngine::cmd_rules_legal_moves),
    cmd("gogui-rules_final_result", GtpEngine::cmd_rules_final_result),
    cmd("gogui-rules_captured_count", GtpEngine::cmd_rules_captured_count),
    cmd("gogui-rules_game_id", GtpEngine::cmd_rules_game_id),
    cmd("gogui-rules_board_size", GtpEngine::cmd_rules_board_size),
    cmd("gogui-rules_side_to_move", GtpEngine::cmd_rules_side_to_move),
    cmd("gogui-rules_board", GtpEngine::cmd_rules_board),
    cmd("gogui-analyze_commands", GtpEngine::cmd_analyze_commands),
];

/// Analyze commands advertised to GoGui.
const ANALYZE_COMMANDS: &[&str] = &[
    "pstring/Legal Moves For ToPlay/gogui-rules_legal_moves",
    "pstring/Side to Play/gogui-rules_side_to_move",
    "pstring/Final Result/gogui-rules_final_result",
    "pstring/Board Size/gogui-rules_board_size",
    "pstring/Rules GameID/gogui-rules_game_id",
    "pstring/Show Board/gogui-rules_board",
];

fn find_command(name: &str) -> Option<&'static Command> {
    COMMANDS.iter().find(|c| c.name == name)
}

/// Why a well-formed `play` was refused.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum IllegalReason {
    WrongColor,
    WrongCoordinate,
    Occupied,
}

impl fmt::Display for IllegalReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            IllegalReason::WrongColor => "wrong color",
            IllegalReason::WrongCoordinate => "wrong coordinate",
            IllegalReason::Occupied => "occupied",
        })
    }
}

/// Failure of a single command.
///
/// Everything except [`CommandError::Internal`] is answered with a `?` line.
/// Internal failures end the session.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Unknown command")]
    Unknown,
    #[error("{0}")]
    Usage(&'static str),
    #[error("{0}")]
    InvalidArgument(String),
    #[error("illegal move: \"{args}\" {reason}")]
    IllegalMove { args: String, reason: IllegalReason },
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// A framed GTP response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reply {
    Success(String),
    Failure(String),
}

impl Reply {
    pub fn is_success(&self) -> bool {
        matches!(self, Reply::Success(_))
    }

    pub fn body(&self) -> &str {
        match self {
            Reply::Success(s) | Reply::Failure(s) => s,
        }
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Success(body) => write!(f, "= {body}\n\n"),
            Reply::Failure(msg) => write!(f, "? {msg}\n\n"),
        }
    }
}

/// Lifecycle of a game, derived from the board and the counters.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    /// No move since the last reset
    Setup,
    InPlay,
    /// Someone won or the board is full
    Finished,
}

/// GTP engine state.
pub struct GtpEngine {
    board: Board,
    session: SessionState,
    /// Komi as set by the controller. Ninuki has no use for it.
    komi: f32,
    rng: fastrand::Rng,
    quit: bool,
}

impl Default for GtpEngine {
    fn default() -> Self {
        Self::new(DEFAULT_SIZE)
    }
}

impl GtpEngine {
    /// Create an engine with an empty board of the given size.
    ///
    /// Sizes outside `MINSIZE..=MAXSIZE` are clamped into that range. Callers
    /// taking a size from the user should validate it first, as `boardsize`
    /// and the `--size` flag do.
    pub fn new(size: usize) -> Self {
        Self::with_rng(size, fastrand::Rng::new())
    }

    /// Create an engine whose generated moves are reproducible. The size is
    /// clamped like [`GtpEngine::new`].
    pub fn with_seed(size: usize, seed: u64) -> Self {
        Self::with_rng(size, fastrand::Rng::with_seed(seed))
    }

    fn with_rng(size: usize, rng: fastrand::Rng) -> Self {
        Self {
            board: Board::new(size),
            session: SessionState::new(),
            komi: 0.0,
            rng,
            quit: false,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn komi(&self) -> f32 {
        self.komi
    }

    pub fn phase(&self) -> Phase {
        if self.board.moves_played() == 0 {
            Phase::Setup
        } else if evaluate_result(&self.board.snapshot(), &self.session).is_over() {
            Phase::Finished
        } else {
            Phase::InPlay
        }
    }

    /// Run the GTP command loop until `quit` or end of input.
    ///
    /// Returns an error on I/O failure or when a command fails internally.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> anyhow::Result<()> {
        for line in input.lines() {
            let line = line.context("failed to read command")?;
            let Some(reply) = self.execute(&line)? else {
                continue;
            };
            write!(output, "{reply}").context("failed to write response")?;
            output.flush()?;

            if self.quit {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u64>, &str) {
        let trimmed = line.trim();
        let rest = trimmed.trim_start_matches(|c: char| c.is_ascii_digit());
        if rest.len() == trimmed.len() {
            return (None, trimmed);
        }
        let id = trimmed[..trimmed.len() - rest.len()].parse().ok();
        (id, rest.trim_start())
    }

    /// Execute one input line.
    ///
    /// Returns `Ok(None)` for blank and comment lines, and `Err` when the
    /// command failed in a way the session cannot recover from.
    pub fn execute(&mut self, line: &str) -> anyhow::Result<Option<Reply>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let (id, command_line) = Self::parse_id(line);
        let parts: Vec<&str> = command_line.split_whitespace().collect();
        let Some((&name, args)) = parts.split_first() else {
            return Ok(None);
        };

        match self.dispatch(name, args) {
            Ok(body) => Ok(Some(Reply::Success(body))),
            Err(CommandError::Internal(err)) => {
                error!(?id, "Error executing command {name}: {err:#}");
                debug!("Stack Trace:\n{err:?}");
                Err(err.context(format!("command '{command_line}' failed")))
            }
            Err(err) => Ok(Some(Reply::Failure(err.to_string()))),
        }
    }

    fn dispatch(&mut self, name: &str, args: &[&str]) -> Result<String, CommandError> {
        let Some(command) = find_command(name) else {
            debug!("Unknown command: {name}");
            return Err(CommandError::Unknown);
        };
        if let Some((required, usage)) = command.arity {
            if args.len() != required {
                debug!(command = name, got = args.len(), required, "wrong number of arguments");
                return Err(CommandError::Usage(usage));
            }
        }
        (command.handler)(self, args)
    }

    fn reset(&mut self, size: usize) -> Result<(), CommandError> {
        self.board.reset(size).map_err(|err| {
            debug!(%err, "boardsize rejected");
            CommandError::InvalidArgument("unacceptable size".to_string())
        })?;
        self.session.reset();
        Ok(())
    }

    /// Place a stone with captures and credit the capturer.
    fn place(&mut self, point: Point, color: Color) -> Result<(), CommandError> {
        let (count, captured) = self
            .board
            .capture_by_a1(point, color)
            .with_context(|| format!("{} cannot play {}", color.name(), self.board.coord(point)))?;
        self.session.record_capture(count, captured);
        if count > 0 {
            debug!(
                capturer = color.name(),
                count,
                black = self.session.captured_by_black,
                white = self.session.captured_by_white,
                "stones captured"
            );
        }
        debug!(phase = ?self.phase(), "move played");
        Ok(())
    }

    /// Sorted labels of the given points, space separated.
    fn sorted_labels(&self, moves: Vec<Point>) -> Result<String, CommandError> {
        let mut labels = moves
            .into_iter()
            .map(|pt| format_point(self.board.coord(pt)))
            .collect::<Result<Vec<_>, _>>()
            .context("legal move outside the labelled range")?;
        labels.sort();
        Ok(labels.join(" "))
    }

    fn cmd_protocol_version(&mut self, _args: &[&str]) -> Result<String, CommandError> {
        Ok("2".to_string())
    }

    fn cmd_quit(&mut self, _args: &[&str]) -> Result<String, CommandError> {
        self.quit = true;
        Ok(String::new())
    }

    fn cmd_name(&mut self, _args: &[&str]) -> Result<String, CommandError> {
        Ok(ENGINE_NAME.to_string())
    }

    fn cmd_version(&mut self, _args: &[&str]) -> Result<String, CommandError> {
        Ok(env!("CARGO_PKG_VERSION").to_string())
    }

    fn cmd_boardsize(&mut self, args: &[&str]) -> Result<String, CommandError> {
        let size = args[0]
            .parse::<usize>()
            .map_err(|_| CommandError::InvalidArgument("unacceptable size".to_string()))?;
        self.reset(size)?;
        Ok(String::new())
    }

    fn cmd_showboard(&mut self, _args: &[&str]) -> Result<String, CommandError> {
        Ok(format!("\n{}", self.board))
    }

    fn cmd_clear_board(&mut self, _args: &[&str]) -> Result<String, CommandError> {
        self.reset(self.board.size())?;
        Ok(String::new())
    }

    fn cmd_komi(&mut self, args: &[&str]) -> Result<String, CommandError> {
        self.komi = args[0]
            .parse()
            .map_err(|_| CommandError::InvalidArgument("komi must be a float".to_string()))?;
        Ok(String::new())
    }

    fn cmd_known_command(&mut self, args: &[&str]) -> Result<String, CommandError> {
        let known = find_command(args[0]).is_some();
        Ok(if known { "true" } else { "false" }.to_string())
    }

    /// One name per line, as GTP version 2 lists commands.
    fn cmd_list_commands(&mut self, _args: &[&str]) -> Result<String, CommandError> {
        Ok(COMMANDS.iter().map(|c| c.name).collect::<Vec<_>>().join("\n"))
    }

    fn cmd_legal_moves(&mut self, args: &[&str]) -> Result<String, CommandError> {
        let color = color_to_int(&args[0].to_lowercase())
            .map_err(|err| CommandError::InvalidArgument(err.to_string()))?;
        self.sorted_labels(self.board.legal_moves(color))
    }

    fn cmd_play(&mut self, args: &[&str]) -> Result<String, CommandError> {
        let illegal = |reason| CommandError::IllegalMove {
            args: args.join(" "),
            reason,
        };
        let size = self.board.size();

        let color = parse_player(args[0]).ok_or_else(|| illegal(IllegalReason::WrongColor))?;
        let coord = move_to_coord(args[1], size).map_err(|err| {
            debug!(%err, "play rejected");
            illegal(IllegalReason::WrongCoordinate)
        })?;

        if coord == Coord::Pass {
            self.board
                .play_move(PASS, color)
                .context("pass rejected by the board")?;
            return Ok(String::new());
        }

        let point = coord_to_point(coord, size);
        if !self.board.legal_moves(self.board.current_player()).contains(&point) {
            debug!(%coord, "play rejected: not a legal move");
            return Err(illegal(IllegalReason::Occupied));
        }
        self.place(point, color)?;
        Ok(String::new())
    }

    fn cmd_genmove(&mut self, args: &[&str]) -> Result<String, CommandError> {
        let color = parse_player(args[0])
            .ok_or_else(|| CommandError::InvalidArgument(format!("invalid color: {}", args[0])))?;

        if has_winner(&self.board.snapshot()) {
            return Ok("resign".to_string());
        }

        let moves = self.board.legal_moves(color);
        if moves.is_empty() {
            return Ok("Illegal move: no legal moves".to_string());
        }
        let point = moves[self.rng.usize(..moves.len())];
        self.place(point, color)?;

        let label = format_point(self.board.coord(point)).context("generated move has no label")?;
        debug!(color = color.name(), %label, "generated move");
        Ok(label)
    }

    fn cmd_rules_legal_moves(&mut self, _args: &[&str]) -> Result<String, CommandError> {
        if self.session.threshold_winner().is_some() || has_winner(&self.board.snapshot()) {
            return Ok(String::new());
        }
        self.sorted_labels(self.board.legal_moves(self.board.current_player()))
    }

    fn cmd_rules_final_result(&mut self, _args: &[&str]) -> Result<String, CommandError> {
        Ok(evaluate_result(&self.board.snapshot(), &self.session).to_string())
    }

    fn cmd_rules_captured_count(&mut self, _args: &[&str]) -> Result<String, CommandError> {
        Ok(format!(
            "{} {}",
            self.session.captured_by_black, self.session.captured_by_white
        ))
    }

    fn cmd_rules_game_id(&mut self, _args: &[&str]) -> Result<String, CommandError> {
        Ok(GAME_ID.to_string())
    }

    fn cmd_rules_board_size(&mut self, _args: &[&str]) -> Result<String, CommandError> {
        Ok(self.board.size().to_string())
    }

    fn cmd_rules_side_to_move(&mut self, _args: &[&str]) -> Result<String, CommandError> {
        Ok(self.board.current_player().name().to_string())
    }

    fn cmd_rules_board(&mut self, _args: &[&str]) -> Result<String, CommandError> {
        let snap = self.board.snapshot();
        let n = snap.size() as isize;
        let rows: Vec<String> = (0..n)
            .rev()
            .map(|row| {
                (0..n)
                    .map(|col| match snap.get(row, col) {
                        Some(Color::Black) => 'X',
                        Some(Color::White) => 'O',
                        _ => '.',
                    })
                    .collect()
            })
            .collect();
        Ok(rows.join("\n"))
    }

    fn cmd_analyze_commands(&mut self, _args: &[&str]) -> Result<String, CommandError> {
        Ok(ANALYZE_COMMANDS.join("\n"))
    }
}

/// Parse a GTP color letter that names a player.
fn parse_player(arg: &str) -> Option<Color> {
    color_to_int(&arg.to_lowercase())
        .ok()
        .filter(|c| c.is_stone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{MAXSIZE, MINSIZE};

    fn exec(engine: &mut GtpEngine, line: &str) -> Reply {
        engine
            .execute(line)
            .unwrap()
            .unwrap_or_else(|| panic!("no reply for {line:?}"))
    }

    fn ok(engine: &mut GtpEngine, line: &str) -> String {
        let reply = exec(engine, line);
        assert!(reply.is_success(), "{line:?} failed: {}", reply.body());
        reply.body().to_string()
    }

    #[test]
    fn test_parse_id_with_id() {
        let (id, cmd) = GtpEngine::parse_id("123 name");
        assert_eq!(id, Some(123));
        assert_eq!(cmd, "name");
    }

    #[test]
    fn test_parse_id_without_id() {
        let (id, cmd) = GtpEngine::parse_id("name");
        assert_eq!(id, None);
        assert_eq!(cmd, "name");
    }

    #[test]
    fn test_parse_id_glued_to_command() {
        let (id, cmd) = GtpEngine::parse_id("7name");
        assert_eq!(id, Some(7));
        assert_eq!(cmd, "name");
    }

    #[test]
    fn test_blank_and_comment_lines() {
        let mut engine = GtpEngine::default();
        assert_eq!(engine.execute("").unwrap(), None);
        assert_eq!(engine.execute("   \t").unwrap(), None);
        assert_eq!(engine.execute("# play b A1").unwrap(), None);
        assert_eq!(engine.execute("42").unwrap(), None);
        assert_eq!(engine.board().moves_played(), 0);
    }

    #[test]
    fn test_reply_framing() {
        assert_eq!(Reply::Success(String::new()).to_string(), "= \n\n");
        assert_eq!(Reply::Success("2".into()).to_string(), "= 2\n\n");
        assert_eq!(Reply::Failure("oops".into()).to_string(), "? oops\n\n");
    }

    #[test]
    fn test_identity_commands() {
        let mut engine = GtpEngine::default();
        assert_eq!(ok(&mut engine, "protocol_version"), "2");
        assert_eq!(ok(&mut engine, "name"), "Ninuki");
        assert_eq!(ok(&mut engine, "version"), env!("CARGO_PKG_VERSION"));
        assert_eq!(ok(&mut engine, "gogui-rules_game_id"), "Ninuki");
        assert_eq!(ok(&mut engine, "gogui-rules_board_size"), "7");
    }

    #[test]
    fn test_unknown_command() {
        let mut engine = GtpEngine::default();
        assert_eq!(
            exec(&mut engine, "frobnicate"),
            Reply::Failure("Unknown command".into())
        );
        // Command names are case sensitive.
        assert!(!exec(&mut engine, "NAME").is_success());
    }

    #[test]
    fn test_known_command() {
        let mut engine = GtpEngine::default();
        assert_eq!(ok(&mut engine, "known_command play"), "true");
        assert_eq!(ok(&mut engine, "known_command gogui-rules_board"), "true");
        assert_eq!(ok(&mut engine, "known_command foo"), "false");
    }

    #[test]
    fn test_list_commands_matches_table() {
        let mut engine = GtpEngine::default();
        let listed = ok(&mut engine, "list_commands");
        let names: Vec<&str> = listed.lines().collect();
        assert_eq!(names.len(), 21);
        for name in names {
            assert_eq!(ok(&mut engine, &format!("known_command {name}")), "true");
        }
    }

    #[test]
    fn test_arity_errors_skip_handler() {
        let mut engine = GtpEngine::default();
        assert_eq!(
            exec(&mut engine, "play b"),
            Reply::Failure("Usage: play {b,w} MOVE".into())
        );
        assert_eq!(
            exec(&mut engine, "genmove"),
            Reply::Failure("Usage: genmove {w,b}".into())
        );
        assert_eq!(
            exec(&mut engine, "boardsize 9 9"),
            Reply::Failure("Usage: boardsize INT".into())
        );
        assert_eq!(
            exec(&mut engine, "komi"),
            Reply::Failure("Usage: komi FLOAT".into())
        );
        assert_eq!(
            exec(&mut engine, "known_command"),
            Reply::Failure("Usage: known_command CMD_NAME".into())
        );
        assert_eq!(
            exec(&mut engine, "legal_moves b w"),
            Reply::Failure("Usage: legal_moves {w,b}".into())
        );
        assert_eq!(engine.board().moves_played(), 0);
        // Commands without a declared arity accept anything.
        assert_eq!(ok(&mut engine, "name please"), "Ninuki");
    }

    #[test]
    fn test_boardsize() {
        let mut engine = GtpEngine::default();
        assert_eq!(ok(&mut engine, "boardsize 9"), "");
        assert_eq!(engine.board().size(), 9);
        assert_eq!(
            exec(&mut engine, "boardsize 26"),
            Reply::Failure("unacceptable size".into())
        );
        assert_eq!(
            exec(&mut engine, "boardsize nine"),
            Reply::Failure("unacceptable size".into())
        );
        assert_eq!(engine.board().size(), 9);
    }

    #[test]
    fn test_komi() {
        let mut engine = GtpEngine::default();
        assert_eq!(ok(&mut engine, "komi 6.5"), "");
        assert_eq!(engine.komi(), 6.5);
        assert!(!exec(&mut engine, "komi lots").is_success());
    }

    #[test]
    fn test_play_wrong_color() {
        let mut engine = GtpEngine::default();
        for color in ["x", "e", "black", "BORDER"] {
            assert_eq!(
                exec(&mut engine, &format!("play {color} A1")),
                Reply::Failure(format!("illegal move: \"{color} A1\" wrong color"))
            );
        }
        // Color letters are case-insensitive.
        assert_eq!(ok(&mut engine, "play B A1"), "");
    }

    #[test]
    fn test_play_wrong_coordinate() {
        let mut engine = GtpEngine::default();
        ok(&mut engine, "boardsize 5");
        for mv in ["Z9", "F1", "A6", "I1", "A0", "11"] {
            assert_eq!(
                exec(&mut engine, &format!("play b {mv}")),
                Reply::Failure(format!("illegal move: \"b {mv}\" wrong coordinate"))
            );
        }
        assert_eq!(engine.board().moves_played(), 0);
    }

    #[test]
    fn test_play_occupied() {
        let mut engine = GtpEngine::default();
        ok(&mut engine, "play b c3");
        assert_eq!(
            exec(&mut engine, "play w C3"),
            Reply::Failure("illegal move: \"w C3\" occupied".into())
        );
        assert_eq!(engine.board().current_player(), Color::White);
    }

    #[test]
    fn test_pass_pass_restores_side_to_move() {
        let mut engine = GtpEngine::default();
        let before = engine.board().snapshot();
        ok(&mut engine, "play b PASS");
        assert_eq!(ok(&mut engine, "gogui-rules_side_to_move"), "white");
        ok(&mut engine, "play w pass");
        assert_eq!(ok(&mut engine, "gogui-rules_side_to_move"), "black");
        assert_eq!(engine.board().snapshot(), before);
    }

    #[test]
    fn test_play_capture_credits_capturer() {
        let mut engine = GtpEngine::default();
        for line in ["play b A1", "play w B1", "play b G7", "play w C1", "play b D1"] {
            ok(&mut engine, line);
        }
        assert_eq!(ok(&mut engine, "gogui-rules_captured_count"), "2 0");
        assert_eq!(engine.session().captures(Color::White), 0);
        let board = ok(&mut engine, "gogui-rules_board");
        assert_eq!(board.lines().last(), Some("X..X..."));
    }

    #[test]
    fn test_five_in_a_row_final_result() {
        let mut engine = GtpEngine::default();
        for row in 1..=5 {
            ok(&mut engine, &format!("play b A{row}"));
        }
        assert_eq!(ok(&mut engine, "gogui-rules_final_result"), "black");
        assert_eq!(ok(&mut engine, "gogui-rules_legal_moves"), "");
        assert_eq!(ok(&mut engine, "genmove w"), "resign");
        assert_eq!(engine.phase(), Phase::Finished);
    }

    #[test]
    fn test_phase_transitions() {
        let mut engine = GtpEngine::default();
        assert_eq!(engine.phase(), Phase::Setup);
        ok(&mut engine, "play b D4");
        assert_eq!(engine.phase(), Phase::InPlay);
        ok(&mut engine, "clear_board");
        assert_eq!(engine.phase(), Phase::Setup);
    }

    #[test]
    fn test_legal_moves_sorted_as_text() {
        let mut engine = GtpEngine::default();
        ok(&mut engine, "boardsize 3");
        ok(&mut engine, "play b B2");
        assert_eq!(
            ok(&mut engine, "legal_moves w"),
            "A1 A2 A3 B1 B3 C1 C2 C3"
        );
        assert_eq!(
            ok(&mut engine, "gogui-rules_legal_moves"),
            "A1 A2 A3 B1 B3 C1 C2 C3"
        );
        assert_eq!(ok(&mut engine, "legal_moves e"), "");
        assert!(!exec(&mut engine, "legal_moves q").is_success());
    }

    #[test]
    fn test_legal_moves_empty_after_capture_win() {
        let mut engine = GtpEngine::default();
        engine.session.credit(Color::White, 10);
        assert_eq!(ok(&mut engine, "gogui-rules_legal_moves"), "");
        assert_eq!(ok(&mut engine, "gogui-rules_final_result"), "white");
        // Only five in a row makes genmove resign.
        assert_ne!(ok(&mut engine, "genmove b"), "resign");
    }

    #[test]
    fn test_genmove_plays_for_requested_color() {
        let mut engine = GtpEngine::with_seed(7, 42);
        let label = ok(&mut engine, "genmove w");
        let coord = move_to_coord(&label, 7).unwrap();
        let point = coord_to_point(coord, 7);
        assert_eq!(engine.board().get(point), Color::White);
        assert_eq!(engine.board().current_player(), Color::Black);
    }

    #[test]
    fn test_genmove_is_reproducible_with_seed() {
        let mut a = GtpEngine::with_seed(9, 1234);
        let mut b = GtpEngine::with_seed(9, 1234);
        for color in ["b", "w", "b", "w"] {
            let line = format!("genmove {color}");
            assert_eq!(ok(&mut a, &line), ok(&mut b, &line));
        }
    }

    #[test]
    fn test_genmove_full_board() {
        let mut engine = GtpEngine::default();
        ok(&mut engine, "boardsize 2");
        for line in ["play b A1", "play w B1", "play b B2", "play w A2"] {
            ok(&mut engine, line);
        }
        assert_eq!(ok(&mut engine, "gogui-rules_final_result"), "Draw");
        assert_eq!(ok(&mut engine, "genmove b"), "Illegal move: no legal moves");
    }

    #[test]
    fn test_full_board_draw_ignores_capture_count() {
        let mut engine = GtpEngine::default();
        ok(&mut engine, "boardsize 2");
        for line in ["play b A1", "play w B1", "play b B2", "play w A2"] {
            ok(&mut engine, line);
        }
        engine.session.credit(Color::Black, 10);
        assert_eq!(ok(&mut engine, "gogui-rules_final_result"), "Draw");
        assert_eq!(engine.phase(), Phase::Finished);
    }

    #[test]
    fn test_internal_failure_is_not_a_reply() {
        let mut engine = GtpEngine::default();
        assert!(matches!(
            engine.place(PASS, Color::Black),
            Err(CommandError::Internal(_))
        ));
    }

    #[test]
    fn test_new_clamps_size() {
        assert_eq!(GtpEngine::new(40).board().size(), MAXSIZE);
        assert_eq!(GtpEngine::new(1).board().size(), MINSIZE);
        assert_eq!(GtpEngine::with_seed(0, 3).board().size(), MINSIZE);
    }

    #[test]
    fn test_genmove_rejects_bad_color() {
        let mut engine = GtpEngine::default();
        assert!(!exec(&mut engine, "genmove x").is_success());
    }

    #[test]
    fn test_clear_board_resets_everything() {
        let mut engine = GtpEngine::default();
        for line in ["play b A1", "play w B1", "play b G7", "play w C1", "play b D1"] {
            ok(&mut engine, line);
        }
        ok(&mut engine, "clear_board");
        assert_eq!(ok(&mut engine, "gogui-rules_captured_count"), "0 0");
        assert_eq!(engine.board().legal_moves(Color::Black).len(), 49);
        assert_eq!(ok(&mut engine, "gogui-rules_side_to_move"), "black");
    }

    #[test]
    fn test_quit_sets_flag() {
        let mut engine = GtpEngine::default();
        assert_eq!(ok(&mut engine, "quit"), "");
        assert!(engine.quit);
    }
}
