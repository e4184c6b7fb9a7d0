//! Line-oriented command console.
//!
//! The console drives a [`Session`] over stdin/stdout using the framing of
//! the Go Text Protocol: an optional numeric id, one command per line, and a
//! response of `=` (success) or `?` (failure) followed by a blank line.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `protocol_version`
//! - `list_commands` - List all supported commands
//! - `known_command <cmd>` - Check if a command is supported
//! - `quit` - Exit the program
//! - `new_game` (or `clear_board`) - Start a new game, keeping scores
//! - `play <cell>` - Human move at cell 0-8; the computer replies when it is
//!   its turn
//! - `genmove` - Computer move, refused unless it is the computer's turn
//! - `difficulty [easy|medium|hard|human]` - Show or schedule the difficulty
//! - `showboard` - Render the board
//! - `status` - Turn, turn count, and result
//! - `scores` - Cumulative results
//! - `reset_scores` - Zero the scores
//!
//! ## Example
//!
//! ```ignore
//! use tictac_rust::console::Console;
//! let mut console = Console::new(session);
//! console.run()?;
//! ```

use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use anyhow::Context;
use tracing::{debug, warn};

use crate::rules::GameStatus;
use crate::search::Difficulty;
use crate::session::Session;

/// The list of known commands.
const KNOWN_COMMANDS: &[&str] = &[
    "clear_board",
    "difficulty",
    "genmove",
    "known_command",
    "list_commands",
    "name",
    "new_game",
    "play",
    "protocol_version",
    "quit",
    "reset_scores",
    "scores",
    "showboard",
    "status",
    "version",
];

pub struct Console {
    session: Session,
    /// Pause before an automatic computer reply. Purely cosmetic.
    reply_delay: Duration,
}

impl Console {
    pub fn new(session: Session) -> Self {
        Self::with_reply_delay(session, Duration::ZERO)
    }

    pub fn with_reply_delay(session: Session, reply_delay: Duration) -> Self {
        Self {
            session,
            reply_delay,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Run the command loop on stdin and stdout until `quit` or end of input.
    pub fn run(&mut self) -> anyhow::Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.serve(stdin.lock(), stdout.lock())
    }

    /// Run the command loop over arbitrary streams.
    pub fn serve(&mut self, input: impl BufRead, mut output: impl Write) -> anyhow::Result<()> {
        for line in input.lines() {
            let line = line.context("failed to read command")?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            let Some((command, args)) = parts.split_first() else {
                continue;
            };
            let command = command.to_lowercase();

            let (success, message) = self.execute(&command, args);
            if !success {
                warn!(%command, %message, "command failed");
            }

            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();
            writeln!(output, "{prefix}{id_str} {message}\n").context("failed to write response")?;
            output.flush().context("failed to flush response")?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        if end > 0 {
            if let Ok(id) = trimmed[..end].parse::<u32>() {
                return (Some(id), trimmed[end..].trim());
            }
        }
        (None, trimmed)
    }

    /// Execute a command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        debug!(command, ?args, "execute");
        match command {
            "name" => (true, env!("CARGO_PKG_NAME").to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => (true, "2".to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => match args.first() {
                Some(cmd) => {
                    let known = KNOWN_COMMANDS.contains(&cmd.to_lowercase().as_str());
                    (true, known.to_string())
                }
                None => (false, "missing argument".to_string()),
            },

            "quit" => (true, String::new()),

            "new_game" | "clear_board" => {
                self.session.new_game();
                (true, String::new())
            }

            "play" => {
                let Some(arg) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let Ok(index) = arg.parse::<usize>() else {
                    return (false, format!("invalid cell {arg:?}"));
                };
                match self.session.human_move(index) {
                    Ok(_) => (true, self.reply()),
                    Err(e) => (false, e.to_string()),
                }
            }

            "genmove" => match self.session.computer_move() {
                Ok((index, _)) => (true, self.describe(Some(index))),
                Err(e) => (false, e.to_string()),
            },

            "difficulty" => match args.first() {
                None => {
                    let mut msg = self.session.difficulty().to_string();
                    if let Some(next) = self.session.pending_difficulty() {
                        msg.push_str(&format!(" (next game: {next})"));
                    }
                    (true, msg)
                }
                Some(arg) => match arg.parse::<Difficulty>() {
                    Ok(d) => {
                        self.session.set_difficulty(d);
                        (true, String::new())
                    }
                    Err(e) => (false, e.to_string()),
                },
            },

            "showboard" => (true, format!("\n{}", self.session.turn().board)),

            "status" => {
                let turn = self.session.turn();
                let msg = match self.session.outcome_message() {
                    Some(outcome) => outcome,
                    None => format!(
                        "Current Turn: Player {}\nTurn Count: {}",
                        turn.active, turn.turn_count
                    ),
                };
                (true, msg)
            }

            "scores" => {
                let s = self.session.scores();
                (true, format!("X {} O {} ties {}", s.first, s.second, s.ties))
            }

            "reset_scores" => {
                self.session.reset_scores();
                (true, String::new())
            }

            _ => (false, format!("unknown command: {command}")),
        }
    }

    /// Play the computer's answer to a human move, if it is due.
    fn reply(&mut self) -> String {
        if !self.session.computer_to_move() {
            return self.describe(None);
        }
        if !self.reply_delay.is_zero() {
            thread::sleep(self.reply_delay);
        }
        match self.session.computer_move() {
            Ok((index, _)) => self.describe(Some(index)),
            Err(e) => e.to_string(),
        }
    }

    /// Response text: the computer's move, if any, then the result once the
    /// game is over.
    fn describe(&self, computer: Option<usize>) -> String {
        let mut parts = Vec::new();
        if let Some(index) = computer {
            parts.push(index.to_string());
        }
        if self.session.status() != GameStatus::InProgress {
            parts.extend(self.session.outcome_message());
        }
        parts.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use fastrand::Rng;

    use super::*;
    use crate::board::Mark;

    fn console(difficulty: Difficulty) -> Console {
        Console::new(Session::new(difficulty, Rng::with_seed(3)))
    }

    #[test]
    fn test_parse_id_with_id() {
        let (id, cmd) = Console::parse_id("123 play 4");
        assert_eq!(id, Some(123));
        assert_eq!(cmd, "play 4");
    }

    #[test]
    fn test_parse_id_without_id() {
        let (id, cmd) = Console::parse_id("showboard");
        assert_eq!(id, None);
        assert_eq!(cmd, "showboard");
    }

    #[test]
    fn test_name_command() {
        let mut c = console(Difficulty::Hard);
        let (success, response) = c.execute("name", &[]);
        assert!(success);
        assert_eq!(response, "tictac-rust");
    }

    #[test]
    fn test_known_command() {
        let mut c = console(Difficulty::Hard);
        assert_eq!(c.execute("known_command", &["play"]), (true, "true".to_string()));
        assert_eq!(c.execute("known_command", &["pass"]), (true, "false".to_string()));
        assert!(!c.execute("known_command", &[]).0);
    }

    #[test]
    fn test_play_gets_computer_reply() {
        let mut c = console(Difficulty::Hard);
        let (success, response) = c.execute("play", &["0"]);
        assert!(success);
        assert_eq!(response, "4");
        assert_eq!(c.session().turn().board.get(4), Some(Mark::Second));
    }

    #[test]
    fn test_genmove_only_on_computer_turn() {
        let mut c = console(Difficulty::Hard);
        assert_eq!(
            c.execute("genmove", &[]),
            (false, "move played out of turn".to_string())
        );
        assert_eq!(c.session().turn().turn_count, 0);

        let mut c = console(Difficulty::HumanVsHuman);
        c.execute("play", &["0"]);
        assert!(!c.execute("genmove", &[]).0);
        assert_eq!(c.session().turn().turn_count, 1);
    }

    #[test]
    fn test_play_rejections() {
        let mut c = console(Difficulty::HumanVsHuman);
        assert!(c.execute("play", &["4"]).0);
        assert!(!c.execute("play", &["4"]).0);
        assert!(!c.execute("play", &["9"]).0);
        assert!(!c.execute("play", &["centre"]).0);
        assert!(!c.execute("play", &[]).0);
    }

    #[test]
    fn test_human_game_reports_winner() {
        let mut c = console(Difficulty::HumanVsHuman);
        for cell in ["0", "3", "1", "4"] {
            assert_eq!(c.execute("play", &[cell]), (true, String::new()));
        }
        assert_eq!(c.execute("play", &["2"]), (true, "Player X wins!".to_string()));
        assert_eq!(c.execute("scores", &[]), (true, "X 1 O 0 ties 0".to_string()));
        assert_eq!(c.execute("status", &[]).1, "Player X wins!");
    }

    #[test]
    fn test_difficulty_command() {
        let mut c = console(Difficulty::Hard);
        assert_eq!(c.execute("difficulty", &[]), (true, "hard".to_string()));
        assert!(c.execute("difficulty", &["easy"]).0);
        assert_eq!(
            c.execute("difficulty", &[]),
            (true, "hard (next game: easy)".to_string())
        );
        assert!(c.execute("new_game", &[]).0);
        assert_eq!(c.execute("difficulty", &[]), (true, "easy".to_string()));
        assert!(!c.execute("difficulty", &["expert"]).0);
    }

    #[test]
    fn test_serve_framing() {
        let mut c = console(Difficulty::Hard);
        let input = "# comment\n1 name\n\nbogus\n2 quit\nname\n";
        let mut output = Vec::new();
        c.serve(input.as_bytes(), &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();
        assert_eq!(
            text,
            "=1 tictac-rust\n\n? unknown command: bogus\n\n=2 \n\n"
        );
    }

    #[test]
    fn test_status_and_showboard() {
        let mut c = console(Difficulty::HumanVsHuman);
        c.execute("play", &["4"]);
        assert_eq!(
            c.execute("status", &[]).1,
            "Current Turn: Player O\nTurn Count: 1"
        );
        assert_eq!(c.execute("showboard", &[]).1, "\n. . . \n. X . \n. . . \n");
    }
}
