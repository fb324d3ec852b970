//! Snapshot diff command

use clap::Args;
use std::path::{Path, PathBuf};
use turnhook_core::{compute_changes, render_change_summary, ExError, Snapshot};

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// Roster JSON before the change
    pub previous: PathBuf,

    /// Roster JSON after the change
    pub current: PathBuf,

    /// Print the structured change list instead of the summary
    #[arg(long)]
    pub json: bool,

    /// Reject snapshots with empty or duplicate combatant ids
    #[arg(long)]
    pub strict: bool,
}

pub fn execute(args: DiffArgs) -> Result<(), Box<dyn std::error::Error>> {
    let previous = read_snapshot(&args.previous, args.strict)?;
    let current = read_snapshot(&args.current, args.strict)?;

    let changes = compute_changes(previous.combatants(), current.combatants());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&changes)?);
    } else {
        print!("{}", render_change_summary(&changes));
    }

    Ok(())
}

pub(crate) fn read_snapshot(path: &Path, strict: bool) -> Result<Snapshot, ExError> {
    let describe = |err: turnhook_core::TurnhookError| {
        let ex: ExError = err.into();
        let message = format!("{}: {}", path.display(), ex.message());
        ex.with_op("read_snapshot").with_message(message)
    };

    let bytes = std::fs::read(path).map_err(|e| describe(e.into()))?;
    let snapshot = Snapshot::from_json_bytes(&bytes).map_err(describe)?;
    if strict {
        snapshot.validate().map_err(describe)?;
    }
    Ok(snapshot)
}
