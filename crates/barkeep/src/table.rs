use barkeep_core::{DisplayInfo, MenuBarItem};

/// Box-drawn table of menu bar items, left to right.
pub struct TableFormatter {
    widths: [usize; 6],
}

const ITEM_HEADERS: [&str; 6] = ["#", "Name", "Item", "Position", "Movable", "Visible"];

impl TableFormatter {
    pub fn new(items: &[MenuBarItem]) -> Self {
        let name_width = items
            .iter()
            .map(|i| i.display_name().chars().count())
            .max()
            .unwrap_or(16)
            .clamp(4, 30);
        let key_width = items
            .iter()
            .map(|i| i.key().to_string().chars().count())
            .max()
            .unwrap_or(24)
            .clamp(4, 60);

        Self {
            widths: [3, name_width, key_width, 15, 7, 7],
        }
    }

    pub fn print_table(&self, items: &[MenuBarItem]) {
        println!("{}", border(&self.widths, '┌', '┬', '┐'));
        println!("{}", row(&self.widths, &ITEM_HEADERS));
        println!("{}", border(&self.widths, '├', '┼', '┤'));
        for (index, item) in items.iter().enumerate() {
            let frame = item.frame();
            let cells = [
                (index + 1).to_string(),
                item.display_name().to_string(),
                item.key().to_string(),
                format!("{:.0}-{:.0}", frame.min_x(), frame.max_x()),
                yes_no(item.is_movable()).to_string(),
                yes_no(item.is_on_screen()).to_string(),
            ];
            println!("{}", row(&self.widths, &cells));
        }
        println!("{}", border(&self.widths, '└', '┴', '┘'));
    }
}

const DISPLAY_HEADERS: [&str; 3] = ["Display", "Main", "Frame"];

pub fn print_displays_table(displays: &[DisplayInfo]) {
    let widths = [10, 4, 30];

    println!("{}", border(&widths, '┌', '┬', '┐'));
    println!("{}", row(&widths, &DISPLAY_HEADERS));
    println!("{}", border(&widths, '├', '┼', '┤'));
    for display in displays {
        let frame = display.frame();
        let cells = [
            display.id().to_string(),
            yes_no(display.is_main()).to_string(),
            format!(
                "{:.0}x{:.0} at ({:.0}, {:.0})",
                frame.width, frame.height, frame.x, frame.y
            ),
        ];
        println!("{}", row(&widths, &cells));
    }
    println!("{}", border(&widths, '└', '┴', '┘'));
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

fn border(widths: &[usize], left: char, middle: char, right: char) -> String {
    let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
    format!("{}{}{}", left, segments.join(&middle.to_string()), right)
}

fn row<S: AsRef<str>>(widths: &[usize], cells: &[S]) -> String {
    let cells: Vec<String> = widths
        .iter()
        .zip(cells)
        .map(|(width, cell)| truncate(cell.as_ref(), *width))
        .collect();
    format!("│ {} │", cells.join(" │ "))
}

/// Truncate a string to a maximum display width, adding "..." if truncated.
///
/// Uses character count (not byte count) to safely handle UTF-8 strings
/// including emoji and multi-byte characters.
pub fn truncate(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        format!("{:<width$}", s, width = max_len)
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{:<width$}", format!("{}...", truncated), width = max_len)
    }
}
