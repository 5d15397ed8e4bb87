use super::ui;
use anyhow::{anyhow, Result};
use chrono::Utc;
use clap::Args;
use console::Style;
use indicatif::{ProgressBar, ProgressStyle};
use localsearch_client::{ConfigHandle, ConfigResolver, Playground, SearchOutcome};
use localsearch_config::Config;
use localsearch_core::render::{DocumentView, FieldValue, ResultView};
use localsearch_core::{schedule, QueryForm, SearchMode};
use std::time::Duration;

#[derive(Args)]
pub struct SearchArgs {
    /// Query text, e.g. 火锅店
    pub query: Option<String>,

    /// City code, see `localsearch cities`
    #[arg(long)]
    pub city: Option<String>,

    /// Area or landmark prepended to the query
    #[arg(long)]
    pub location: Option<String>,

    /// Number of documents to retrieve
    #[arg(long)]
    pub top_k: Option<u32>,

    /// Start from a built-in example query (1-based, see `localsearch examples`)
    #[arg(long, value_name = "N")]
    pub example: Option<usize>,

    /// LLM used by agentic search
    #[arg(long)]
    pub model: Option<String>,

    /// Show every card in folded lists
    #[arg(long)]
    pub expand: bool,

    /// Print the full JSON of each document
    #[arg(long)]
    pub raw: bool,

    /// Use the configured backend URL without reading the descriptor
    #[arg(long)]
    pub no_resolve: bool,
}

impl SearchArgs {
    fn form(&self) -> Result<QueryForm> {
        let mut form = match self.example {
            Some(n) => QueryForm::from_example(n.saturating_sub(1))
                .ok_or_else(|| anyhow!("No example query #{}", n))?,
            None => QueryForm::default(),
        };

        if let Some(query) = &self.query {
            form.query = query.clone();
        }
        if let Some(city) = &self.city {
            form.city = Some(city.clone());
        }
        if let Some(location) = &self.location {
            form.location = Some(location.clone());
        }
        if let Some(top_k) = self.top_k {
            form.top_k = Some(top_k);
        }
        if let Some(model) = &self.model {
            form.model_name = Some(model.clone());
        }
        Ok(form)
    }
}

pub async fn handle_search(mode: SearchMode, args: SearchArgs, config: Config) -> Result<()> {
    let form = args.form()?;
    let handle = ConfigHandle::new(config);
    if !args.no_resolve {
        ConfigResolver::new(handle.clone()).resolve().await;
    }

    let playground = Playground::new(handle.clone());
    let expected = mode.expected_duration(&handle.snapshot().timeouts);

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.green} {msg} [{elapsed}]")?,
    );
    spinner.set_message(format!(
        "{} (usually under {}s)",
        schedule::progress_message(Utc::now()),
        expected.as_secs()
    ));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let outcome = playground.search(mode, form).await;
    spinner.finish_and_clear();

    let outcome = outcome?;
    let mut view = outcome.view();
    if args.expand {
        view.expand_all();
    }
    print_outcome(&outcome, &view, args.raw);
    Ok(())
}

fn print_outcome(outcome: &SearchOutcome, view: &ResultView, raw: bool) {
    let request = &outcome.request;
    ui::print_header(&format!("{}: {}", view.mode, request.composed_query()));
    if let Some(city) = request.backend_city() {
        ui::print_key_value("City", city);
    }
    if let Some(model) = &view.model_used {
        ui::print_key_value("Model", model);
    }

    println!("\n{}", Style::new().bold().apply_to("Answer"));
    println!("{}", ui::render_markdown(&view.answer));

    if !view.steps.is_empty() {
        print_steps(view);
    }

    if !view.documents.is_empty() {
        println!(
            "{}",
            Style::new()
                .bold()
                .apply_to(format!("Sources ({})", view.documents.len()))
        );
        for doc in &view.documents {
            print_document(doc, raw);
        }
    }

    if view.mode == SearchMode::Rag {
        let m = view.metrics;
        ui::print_key_value("Correctness", &format!("{:.2}", m.correctness));
        ui::print_key_value("Completeness", &format!("{:.2}", m.completeness));
        ui::print_key_value("Faithfulness", &format!("{:.2}", m.faithfulness));
    }
    ui::print_key_value(
        "Retrieval",
        &format!("{:.2}s", view.timings.retrieval_seconds),
    );
    ui::print_key_value(
        "Generation",
        &format!("{:.2}s", view.timings.generation_seconds),
    );
    ui::print_key_value("Total", &format!("{:.2}s", outcome.elapsed.as_secs_f64()));
}

fn print_steps(view: &ResultView) {
    let mut body = String::new();
    for step in &view.steps {
        body.push_str(&format!("{}. {}\n", step.step, step.action));
        if let Some(description) = &step.description {
            body.push_str(&format!("   {}\n", description));
        }
        if let Some(result) = &step.result {
            body.push_str(&format!("   -> {}\n", result));
        }
    }
    ui::print_panel("Search process", &body, Style::new().blue());
}

fn print_document(doc: &DocumentView, raw: bool) {
    println!(
        "\n{} {}  {}",
        Style::new().dim().apply_to(format!("#{}", doc.rank)),
        Style::new().bold().cyan().apply_to(&doc.title),
        Style::new().dim().apply_to(format!("score {:.4}", doc.score))
    );

    for group in &doc.groups {
        println!("  {}", Style::new().underlined().apply_to(group.category.label()));
        for row in &group.rows {
            match &row.value {
                FieldValue::Cards(list) => {
                    println!("    {}:", Style::new().dim().apply_to(&row.key));
                    for card in list.visible() {
                        let entries: Vec<String> = card
                            .entries
                            .iter()
                            .map(|(k, v)| format!("{}={}", k, v))
                            .collect();
                        println!("      [{}] {}", card.index, entries.join(", "));
                    }
                    if list.hidden_count() > 0 {
                        println!(
                            "      {}",
                            Style::new()
                                .dim()
                                .apply_to(format!("... {} more (--expand)", list.hidden_count()))
                        );
                    }
                }
                value => println!("    {}: {}", Style::new().dim().apply_to(&row.key), value),
            }
        }
    }

    if raw {
        println!("{}", Style::new().dim().apply_to(&doc.raw_json));
    }
}
