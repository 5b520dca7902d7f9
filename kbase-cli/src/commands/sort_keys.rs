use crate::knowledge::SortKey;

use super::output::render_table;

pub fn run(default_sort: SortKey) {
    let rows: Vec<Vec<String>> = SortKey::all()
        .iter()
        .map(|key| {
            let marker = if *key == default_sort { "*" } else { "" };
            vec![key.id().to_string(), key.label().to_string(), marker.to_string()]
        })
        .collect();

    print!("{}", render_table(&["KEY", "LABEL", "DEFAULT"], &rows));
}
