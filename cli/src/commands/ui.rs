use console::Style;
use termimad::{FmtText, MadSkin};

const PANEL_WIDTH: usize = 80;

pub fn print_header(title: &str) {
    println!("\n{}", Style::new().bold().cyan().apply_to(title));
    println!(
        "{}",
        Style::new()
            .dim()
            .apply_to("─".repeat(console::measure_text_width(title)))
    );
}

pub fn print_success(msg: &str) {
    println!("{} {}", Style::new().green().bold().apply_to("✓"), msg);
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", Style::new().red().bold().apply_to("ERROR:"), msg);
}

pub fn print_warning(msg: &str) {
    eprintln!("{} {}", Style::new().yellow().bold().apply_to("WARNING:"), msg);
}

/// Boxed, wrapped block of text
pub fn print_panel(title: &str, content: &str, border_color: Style) {
    let inner = PANEL_WIDTH - 4;
    let padding = PANEL_WIDTH.saturating_sub(console::measure_text_width(title) + 5);

    println!(
        "{} {} {}",
        border_color.apply_to("┌─"),
        Style::new().bold().apply_to(title),
        border_color.apply_to(format!("{}┐", "─".repeat(padding)))
    );

    for line in content.lines() {
        for wrapped in textwrap::wrap(line, inner) {
            let space = inner.saturating_sub(console::measure_text_width(&wrapped));
            println!(
                "{} {}{} {}",
                border_color.apply_to("│"),
                wrapped,
                " ".repeat(space),
                border_color.apply_to("│")
            );
        }
    }
    println!(
        "{}",
        border_color.apply_to(format!("└{}┘", "─".repeat(PANEL_WIDTH - 2)))
    );
}

pub fn print_key_value(key: &str, value: &str) {
    println!(
        "{}: {}",
        Style::new().dim().apply_to(key),
        Style::new().bold().apply_to(value)
    );
}

/// Answers come back as loose markdown
pub fn render_markdown(text: &str) -> String {
    let skin = MadSkin::default();
    let (w, _) = termimad::terminal_size();
    let width = std::cmp::max(20, w.saturating_sub(4) as usize);
    FmtText::from(&skin, text, Some(width)).to_string()
}
