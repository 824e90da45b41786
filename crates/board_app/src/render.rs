use std::io::{self, Write};

use board_core::BoardViewModel;
use chrono::Local;

pub(crate) fn draw(view: &BoardViewModel) {
    let mut stdout = io::stdout();
    let _ = stdout.write_all(render(view).as_bytes());
    let _ = stdout.flush();
}

fn render(view: &BoardViewModel) -> String {
    let mut out = String::from("\n");
    if let Some(error) = &view.last_error {
        out.push_str(&format!("  ! {error}\n"));
    }
    if view.items.is_empty() {
        out.push_str("  no items yet, add one with: add <text>\n");
    }
    for row in &view.items {
        let stamp = row
            .created_at
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M");
        out.push_str(&format!("  [{}] {}  ({})\n", row.item_id, row.text, stamp));
    }
    if view.pending {
        out.push_str("  working...\n");
    }
    out
}
