//! History command for listing completed matches.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;

use ps_core::{MatchHistory, MatchRecord};

use super::{load_history, open_database};
use crate::Config;

/// Timestamp format for the DATE column (UTC).
const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

pub fn run<W: Write>(writer: &mut W, json: bool, config: &Config) -> Result<()> {
    let history = load_history(open_database(config).as_ref());

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&history)?)?;
    } else {
        write!(writer, "{}", render(&history))?;
    }
    Ok(())
}

fn row(index: &str, date: &str, score: &str, time: &str, kcal: &str, result: &str) -> String {
    format!("{index:<3}  {date:<16}  {score:>5}  {time:>8}  {kcal:>6}  {result}")
}

/// One line per match, newest first, prefixed with the index `delete` takes.
pub fn render(history: &MatchHistory) -> String {
    if history.is_empty() {
        return "No matches played yet.\n".to_string();
    }

    let mut output = String::new();
    let _ = writeln!(output, "{}", row("#", "DATE", "SCORE", "TIME", "KCAL", "RESULT"));
    for (index, record) in history.iter().enumerate() {
        let _ = writeln!(output, "{}", render_record(index, record));
    }
    output
}

fn render_record(index: usize, record: &MatchRecord) -> String {
    let result = record
        .outcome()
        .map_or_else(|| "In progress".to_string(), |outcome| outcome.to_string());
    row(
        &index.to_string(),
        &record.start_time().format(DATE_FORMAT).to_string(),
        &format!("{}-{}", record.team_a_games(), record.team_b_games()),
        &record.duration_formatted(),
        &format!("{:.0}", record.estimated_energy().trunc()),
        &result,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;

    use crate::commands::test_support::{corrupt_database, seed_history, test_config};

    #[test]
    fn history_lists_newest_first() {
        let temp = tempfile::tempdir().unwrap();
        let config = test_config(&temp);
        seed_history(&config);

        let mut output = Vec::new();
        run(&mut output, false, &config).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_snapshot!(output, @r"
        #    DATE              SCORE      TIME    KCAL  RESULT
        0    2025-11-18 18:00    5-5   1:06:40     555  Draw
        1    2025-11-17 18:00    3-6     45:00     375  Team B
        2    2025-11-16 18:00    6-4   1:00:00     500  Team A
        ");
    }

    #[test]
    fn history_json_is_the_stored_array() {
        let temp = tempfile::tempdir().unwrap();
        let config = test_config(&temp);
        let history = seed_history(&config);

        let mut output = Vec::new();
        run(&mut output, true, &config).unwrap();

        let parsed: MatchHistory = serde_json::from_slice(&output).unwrap();
        assert_eq!(parsed, history);
    }

    #[test]
    fn empty_history_message() {
        let temp = tempfile::tempdir().unwrap();
        let config = test_config(&temp);

        let mut output = Vec::new();
        run(&mut output, false, &config).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "No matches played yet.\n");
    }

    #[test]
    fn unreadable_database_lists_nothing() {
        let temp = tempfile::tempdir().unwrap();
        let config = test_config(&temp);
        corrupt_database(&config);

        let mut output = Vec::new();
        run(&mut output, false, &config).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "No matches played yet.\n");

        let mut output = Vec::new();
        run(&mut output, true, &config).unwrap();
        let parsed: MatchHistory = serde_json::from_slice(&output).unwrap();
        assert!(parsed.is_empty());
    }
}
