//! Delete command for removing a match from the history.

use std::io::Write;

use anyhow::{Result, bail};
use clap::Args;

use ps_core::MatchLifecycleManager;

use super::{load_history, open_database, save_history};
use crate::Config;

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Position in `padel history` (0 is the most recent match).
    pub index: usize,
}

pub fn run<W: Write>(writer: &mut W, args: &DeleteArgs, config: &Config) -> Result<()> {
    let mut db = open_database(config);
    let mut manager = MatchLifecycleManager::new(load_history(db.as_ref()));

    let Some(record) = manager.delete_from_history(args.index) else {
        bail!(
            "no match at index {} ({} in history)",
            args.index,
            manager.history().len()
        );
    };

    if !save_history(db.as_mut(), manager.history()) {
        writeln!(writer, "Warning: match history could not be saved.")?;
    }
    writeln!(
        writer,
        "Deleted match from {} ({}-{})",
        record.start_time().format("%Y-%m-%d %H:%M"),
        record.team_a_games(),
        record.team_b_games()
    )?;
    Ok(())
}
