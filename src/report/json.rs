//! JSON output for a stored snapshot.
//!
//! Same shape as the json snapshot format, for scripting and piping.

use crate::error::StoreError;
use crate::snapshot::Snapshot;

pub fn render(snapshot: &Snapshot) -> Result<String, StoreError> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::SnapshotEntry;

    #[test]
    fn keeps_key_column_name() {
        let snapshot = Snapshot {
            taken_at: None,
            entries: vec![SnapshotEntry {
                identity: 3,
                display_name: "c".into(),
                category: "Member".into(),
                count: Some(1),
                count_delta: None,
            }],
        };
        let value: serde_json::Value = serde_json::from_str(&render(&snapshot).unwrap()).unwrap();
        assert_eq!(value["entries"][0][crate::snapshot::KEY_COLUMN], 3);
        assert!(value["entries"][0]["count_delta"].is_null());
    }
}
