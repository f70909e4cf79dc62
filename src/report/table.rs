//! Plain terminal table for a stored snapshot.
//!
//! Used by `show`: one row per member in stored order, with the
//! delta recorded when the snapshot was published.

use crate::record::Category;
use crate::snapshot::Snapshot;

const NAME_WIDTH: usize = 24;

pub fn render(snapshot: &Snapshot) -> String {
    if snapshot.is_empty() {
        return String::from("Snapshot is empty.\n");
    }

    let mut output = String::new();

    output.push_str(&format!(
        "{:>4} {:>8} {:3} {:width$} {:>8} {:>8}\n",
        "#", "ID", "CAT", "Name", "Posts", "Delta",
        width = NAME_WIDTH,
    ));
    output.push_str(&"-".repeat(4 + 8 + 3 + NAME_WIDTH + 8 + 8 + 5));
    output.push('\n');

    for (i, entry) in snapshot.entries.iter().enumerate() {
        output.push_str(&format!(
            "{:>4} {:>8} {:3} {:width$} {:>8} {:>8}\n",
            i + 1,
            entry.identity,
            Category::classify(&entry.category).code(),
            truncate(&entry.display_name, NAME_WIDTH),
            optional(entry.count),
            optional(entry.count_delta),
            width = NAME_WIDTH,
        ));
    }

    let total: u64 = snapshot.entries.iter().filter_map(|e| e.count).sum();
    output.push_str(&format!(
        "\n{:>59}\n",
        format!("TOTAL POSTS: {total}")
    ));

    output
}

fn optional<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{truncated}...")
    }
}
