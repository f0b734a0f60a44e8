//! Stats command for lifetime statistics.

use std::io::Write;

use anyhow::Result;

use ps_core::MatchStatistics;

use super::{load_history, open_database};
use crate::Config;

pub fn run<W: Write>(writer: &mut W, json: bool, config: &Config) -> Result<()> {
    let history = load_history(open_database(config).as_ref());
    let stats = MatchStatistics::from_records(history.as_slice());

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&stats)?)?;
        return Ok(());
    }

    let sync = if config.sync_enabled() { "on" } else { "off" };
    writeln!(writer, "Matches played:  {}", stats.total_matches)?;
    writeln!(writer, "Total games:     {}", stats.total_games)?;
    writeln!(writer, "Play time:       {}", stats.total_play_time_formatted())?;
    writeln!(writer, "Avg duration:    {}", stats.average_duration_formatted())?;
    writeln!(writer, "Energy burned:   {} kcal", stats.total_energy)?;
    writeln!(writer, "Workout sync:    {sync}")?;
    Ok(())
}
