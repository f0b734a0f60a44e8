//! Play command: live scoring of a single match.
//!
//! Points arrive as lines on stdin while a one-second clock pushes the
//! elapsed time into the active match. Both sources are handled on one task,
//! so the scoring state is only ever touched from a single place.

use std::io::Write;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use ps_core::format::format_clock;
use ps_core::{GameScoreTracker, MatchLifecycleManager, MatchRecord, PointOutcome, Team};

use super::{load_history, open_database, save_history};
use crate::Config;
use crate::timer::{MatchTimer, TICK_INTERVAL};

/// A single line of player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayInput {
    Point(Team),
    Undo,
    Reset,
    End,
    Quit,
}

/// Parses a line of input; `None` for anything unrecognized.
pub fn parse_input(line: &str) -> Option<PlayInput> {
    match line.trim().to_ascii_lowercase().as_str() {
        "u" | "undo" => Some(PlayInput::Undo),
        "r" | "reset" => Some(PlayInput::Reset),
        "e" | "end" => Some(PlayInput::End),
        "q" | "quit" => Some(PlayInput::Quit),
        other => other.parse().ok().map(PlayInput::Point),
    }
}

/// Scoring state of the match being played.
#[derive(Debug, Default)]
pub struct LiveMatch {
    tracker: GameScoreTracker,
    elapsed_secs: f64,
}

impl LiveMatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a scoring input and mirrors the new score into the active match.
    ///
    /// Returns a message to show the player, if any.
    pub fn apply(&mut self, input: PlayInput, manager: &mut MatchLifecycleManager) -> Option<String> {
        let message = match input {
            PlayInput::Point(team) => match self.tracker.point_won_by(team) {
                PointOutcome::Game { team } => Some(format!("Game {team}")),
                PointOutcome::Point { .. } => None,
            },
            PlayInput::Undo => {
                (!self.tracker.undo_last_point()).then(|| "Nothing to undo".to_string())
            }
            PlayInput::Reset => {
                self.tracker.reset_match();
                Some("Scores reset".to_string())
            }
            PlayInput::End | PlayInput::Quit => None,
        };
        manager.update_active(self.tracker.score(), self.elapsed_secs);
        message
    }

    /// Advances the clock by one tick and pushes it into the active match.
    pub fn tick(&mut self, interval: Duration, manager: &mut MatchLifecycleManager) {
        self.elapsed_secs += interval.as_secs_f64();
        manager.update_active(self.tracker.score(), self.elapsed_secs);
    }

    pub fn scoreboard(&self) -> String {
        let games = self.tracker.score();
        format!(
            "Games {}-{} | Points {}-{} | {}",
            games.a,
            games.b,
            self.tracker.display_value(Team::A),
            self.tracker.display_value(Team::B),
            format_clock(self.elapsed_secs)
        )
    }
}

enum Finish {
    Complete,
    Discard,
    /// Input broke off; the match is still completed and saved.
    ReadError(std::io::Error),
}

/// Runs the play command against stdin.
pub fn run<W: Write>(writer: &mut W, config: &Config) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to initialize tokio runtime")?;
    runtime.block_on(play(
        writer,
        config,
        BufReader::new(tokio::io::stdin()),
        TICK_INTERVAL,
    ))
}

/// Plays one match, reading commands from `input` until `end`, `quit` or EOF.
///
/// Lines that are not valid UTF-8 are decoded lossily and reported as
/// unknown commands. A read error ends the match as if by `end` before the
/// error is returned.
pub async fn play<W, R>(writer: &mut W, config: &Config, input: R, interval: Duration) -> Result<()>
where
    W: Write,
    R: AsyncBufRead + Unpin,
{
    let mut db = open_database(config);
    let mut manager = MatchLifecycleManager::new(load_history(db.as_ref()));
    manager.subscribe(|event| tracing::debug!(?event, "match event"));
    manager.start_new_match()?;

    let (tick_tx, mut tick_rx) = tokio::sync::mpsc::unbounded_channel();
    let mut timer = MatchTimer::start(interval, move || {
        // The receiver is gone only once the loop below has exited.
        let _ = tick_tx.send(());
    });

    let mut live = LiveMatch::new();
    let mut lines = input.split(b'\n');
    writeln!(writer, "Match started. Enter a or b to score, undo, reset, end or quit.")?;
    writeln!(writer, "{}", live.scoreboard())?;

    let finish = loop {
        tokio::select! {
            segment = lines.next_segment() => {
                let line = match segment {
                    Ok(Some(bytes)) => String::from_utf8_lossy(&bytes).into_owned(),
                    Ok(None) => break Finish::Complete,
                    Err(err) => break Finish::ReadError(err),
                };
                match parse_input(&line) {
                    Some(PlayInput::End) => break Finish::Complete,
                    Some(PlayInput::Quit) => break Finish::Discard,
                    Some(input) => {
                        if let Some(message) = live.apply(input, &mut manager) {
                            writeln!(writer, "{message}")?;
                        }
                        writeln!(writer, "{}", live.scoreboard())?;
                    }
                    None if line.trim().is_empty() => {}
                    None => writeln!(writer, "Unknown command: {}", line.trim())?,
                }
            }
            Some(()) = tick_rx.recv() => live.tick(interval, &mut manager),
        }
    };
    timer.stop();

    if matches!(finish, Finish::Discard) {
        manager.discard_active_match();
        writeln!(writer, "Match discarded.")?;
        return Ok(());
    }

    let record = manager
        .complete_active_match()
        .context("no active match to complete")?;
    if !save_history(db.as_mut(), manager.history()) {
        writeln!(writer, "Warning: match history could not be saved.")?;
    }
    write_summary(writer, &record)?;
    writer.flush()?;
    sync_workout(config, &record).await;

    match finish {
        Finish::ReadError(err) => Err(err).context("failed to read input"),
        Finish::Complete | Finish::Discard => Ok(()),
    }
}

/// Logs the match with the workout service when configured. Never fails.
async fn sync_workout(config: &Config, record: &MatchRecord) {
    match config.sync_client() {
        Ok(Some(client)) => {
            ps_sync::sync_completed_match(&client, record).await;
        }
        Ok(None) => {}
        Err(err) => tracing::warn!(error = %err, "workout sync misconfigured"),
    }
}

fn write_summary<W: Write>(writer: &mut W, record: &MatchRecord) -> Result<()> {
    let result = record
        .outcome()
        .map_or_else(String::new, |outcome| format!(" ({outcome})"));
    writeln!(
        writer,
        "Match complete: {}-{}{result}",
        record.team_a_games(),
        record.team_b_games()
    )?;
    writeln!(writer, "Duration: {}", record.duration_formatted())?;
    writeln!(writer, "Energy: {:.0} kcal", record.estimated_energy().trunc())?;
    Ok(())
}
