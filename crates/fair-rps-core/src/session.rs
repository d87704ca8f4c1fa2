//! Round orchestration over an injected input source and output sink.
//!
//! The terminal front end hands [`run`] the raw move names, a line source,
//! and a writer. Everything the player sees is written through that writer,
//! which keeps the whole flow testable without a terminal.

use crate::crypto::{KeyedHasher, SecureRandomSource};
use crate::error::{InputError, Result};
use crate::games::{MoveIndex, MoveSet, OutcomeTable};
use crate::protocol::{RevealedRound, SealedRound};
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::num::{IntErrorKind, ParseIntError};
use tracing::info;

/// Source of player input lines
pub trait InputSource {
    /// Next line, or `None` once input is exhausted
    fn next_line(&mut self) -> io::Result<Option<String>>;
}

/// Line reader over any buffered reader (stdin in the binary).
///
/// Bytes that are not UTF-8 are replaced rather than rejected, so a garbled
/// line reaches the selection parser and fails as bad input.
pub struct LineInput<R> {
    reader: R,
}

impl<R: BufRead> LineInput<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> InputSource for LineInput<R> {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        let mut line = Vec::new();
        if self.reader.read_until(b'\n', &mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&line).into_owned()))
    }
}

/// Pre-scripted input for tests
#[derive(Clone, Debug, Default)]
pub struct ScriptedInput {
    lines: VecDeque<String>,
}

impl ScriptedInput {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// Lines not yet consumed
    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl InputSource for ScriptedInput {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        Ok(self.lines.pop_front())
    }
}

/// What the player asked for at the prompt
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection {
    Move(MoveIndex),
    Exit,
    Help,
}

/// Parse a prompt line: `?` for help, `0` to exit, `1..=n` for a move
pub fn parse_selection(line: &str, moves: &MoveSet) -> Result<Selection, InputError> {
    let line = line.trim();
    if line == "?" {
        return Ok(Selection::Help);
    }

    let out_of_range = || InputError::OutOfRange {
        selection: line.to_string(),
        count: moves.count(),
    };

    let selection: usize = line.parse().map_err(|e: ParseIntError| match e.kind() {
        IntErrorKind::PosOverflow => out_of_range(),
        _ => InputError::NotANumber(line.to_string()),
    })?;
    if selection == 0 {
        return Ok(Selection::Exit);
    }

    moves
        .index(selection - 1)
        .map(Selection::Move)
        .ok_or_else(out_of_range)
}

/// How a session ended without error
#[derive(Debug)]
pub enum RoundEnd {
    /// Player picked a move; the key has been revealed
    Resolved(RevealedRound),
    /// Player chose `0`; the key stays secret
    Exited,
}

/// Print the rules table
pub fn write_help<W: Write>(out: &mut W, table: &OutcomeTable) -> io::Result<()> {
    writeln!(out, "Results are from the user's point of view. Example:")?;
    writeln!(out, "{table}")
}

fn write_menu<W: Write>(out: &mut W, moves: &MoveSet) -> io::Result<()> {
    writeln!(out, "Available moves:")?;
    for (position, name) in moves.names().iter().enumerate() {
        writeln!(out, "{} - {}", position + 1, name)?;
    }
    writeln!(out, "0 - exit")?;
    writeln!(out, "? - help")?;
    write!(out, "Enter your move: ")?;
    out.flush()
}

fn write_result<W: Write>(out: &mut W, round: &RevealedRound) -> io::Result<()> {
    let moves = round.moves();
    writeln!(out, "Your move: {}", moves.name(round.player_move()))?;
    writeln!(out, "Computer move: {}", moves.name(round.computer_move()))?;
    writeln!(out, "{}", round.outcome().phrase())?;
    writeln!(out, "HMAC key: {}", round.key())
}

/// Play one round over a validated move set.
///
/// The digest is written before any input is read. Invalid input ends the
/// round with an error and the key is dropped unrevealed.
pub fn play_round<I, W, R, H>(
    moves: MoveSet,
    input: &mut I,
    out: &mut W,
    rng: &mut R,
    hasher: &H,
) -> Result<RoundEnd>
where
    I: InputSource + ?Sized,
    W: Write,
    R: SecureRandomSource + ?Sized,
    H: KeyedHasher + ?Sized,
{
    let sealed = SealedRound::initiate(moves, rng, hasher)?;
    writeln!(out, "HMAC: {}", sealed.digest())?;

    loop {
        write_menu(out, sealed.moves())?;
        let line = input.next_line()?.ok_or(InputError::EndOfInput)?;
        writeln!(out)?;

        match parse_selection(&line, sealed.moves())? {
            Selection::Help => write_help(out, &sealed.moves().outcome_table())?,
            Selection::Exit => {
                info!(round_id = %sealed.id(), "player exited before choosing");
                return Ok(RoundEnd::Exited);
            }
            Selection::Move(player_move) => {
                let revealed = sealed.reveal(player_move);
                write_result(out, &revealed)?;
                return Ok(RoundEnd::Resolved(revealed));
            }
        }
    }
}

/// Full session: rules table, validation, then one round.
///
/// The table is printed first, even for a list that then fails validation.
/// A configuration error returns before any key or move is generated.
pub fn run<I, W, R, H>(
    names: &[String],
    input: &mut I,
    out: &mut W,
    rng: &mut R,
    hasher: &H,
) -> Result<RoundEnd>
where
    I: InputSource + ?Sized,
    W: Write,
    R: SecureRandomSource + ?Sized,
    H: KeyedHasher + ?Sized,
{
    write_help(out, &OutcomeTable::from_names(names))?;
    let moves = MoveSet::new(names.iter().cloned())?;
    play_round(moves, input, out, rng, hasher)
}
