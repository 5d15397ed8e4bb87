use super::ui;
use console::Style;
use localsearch_core::city::{self, CITIES, EXAMPLE_QUERIES};

pub fn handle_cities() {
    ui::print_header("Cities");
    for c in CITIES {
        println!(
            "{:<10} {}  {}",
            Style::new().bold().apply_to(c.code),
            c.display_name,
            Style::new().dim().apply_to(city::location_hint(c.code))
        );
    }
}

pub fn handle_examples() {
    ui::print_header("Example queries");
    for (i, ex) in EXAMPLE_QUERIES.iter().enumerate() {
        println!(
            "{} {} {} {}",
            Style::new().dim().apply_to(format!("{}.", i + 1)),
            Style::new().bold().cyan().apply_to(format!("{} {}", ex.location, ex.query)),
            Style::new().dim().apply_to("in"),
            city::display_name(ex.city)
        );
    }
    println!(
        "\n{}",
        Style::new().dim().apply_to("Run one with e.g. `localsearch rag --example 2`")
    );
}
