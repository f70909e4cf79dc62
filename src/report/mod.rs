pub mod intensity;
pub mod json;
pub mod leaderboard;
pub mod table;

use crate::error::StoreError;
use crate::snapshot::Snapshot;

/// Prints a stored snapshot for the `show` command.
pub fn print(snapshot: &Snapshot, json_output: bool) -> Result<(), StoreError> {
    if json_output {
        println!("{}", json::render(snapshot)?);
    } else {
        print!("{}", table::render(snapshot));
        print_snapshot_info(snapshot);
    }
    Ok(())
}

fn print_snapshot_info(snapshot: &Snapshot) {
    let taken_at = snapshot
        .taken_at
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "unknown".to_string());

    println!("\nsnapshot taken: {taken_at}");
    println!("members: {}", snapshot.len());

    let unknown = snapshot.entries.iter().filter(|e| e.count.is_none()).count();
    if unknown > 0 {
        println!("[diagnostic] {unknown} entries have no usable post count");
    }
}
