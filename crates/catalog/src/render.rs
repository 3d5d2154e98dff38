use crate::prelude::{println, *};
use catalog_core::pagination::ALLOWED_PAGE_SIZES;
use catalog_core::session::{ListingView, PageContent, ViewSink};
use colored::Colorize;
use prettytable::{row, Row};

/// Longest title shown before truncation
const MAX_TITLE_LEN: usize = 48;

/// How a rendered listing is followed up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hints {
    /// Suggest `catalog list` invocations
    Commands,
    /// Suggest interactive commands
    Interactive,
}

/// Prints every rendered page to stdout
#[derive(Debug, Clone)]
pub struct TerminalSink {
    pub json: bool,
    pub hints: Hints,
}

impl ViewSink for TerminalSink {
    fn render(&mut self, view: &ListingView) {
        if self.json {
            match format_listing_json(view) {
                Ok(json) => println!("{}", json),
                Err(err) => log::error!("{}", err),
            }
        } else {
            print!("{}", format_listing_text(view, self.hints));
        }
    }
}

/// Convert a listing to JSON string
pub fn format_listing_json(view: &ListingView) -> Result<String> {
    serde_json::to_string_pretty(view).map_err(|e| eyre!("JSON serialization failed: {}", e))
}

/// Convert a listing to formatted text with colors
pub fn format_listing_text(view: &ListingView, hints: Hints) -> String {
    let mut result = String::new();
    let info = &view.pagination;

    // Header
    result.push_str(&f!("\n{}\n", "=".repeat(80).bright_cyan()));
    result.push_str(&f!(
        "{}\n",
        f!("PRODUCTS ({})", info).bright_cyan().bold()
    ));
    result.push_str(&f!("{}\n", "=".repeat(80).bright_cyan()));

    if !view.keyword.is_empty() {
        result.push_str(&f!(
            "{}: {}\n",
            "Search".green(),
            view.keyword.bright_white()
        ));
    }
    if let Some(field) = view.sort.field {
        result.push_str(&f!(
            "{}: {}\n",
            "Sort".green(),
            f!("{} {}", field, view.sort.direction).bright_white()
        ));
    }

    match &view.content {
        PageContent::NoResults => {
            result.push_str(&f!("\n{}\n", "No products found.".yellow()));
        }
        PageContent::Rows(rows) => {
            let mut table = new_table();
            table.set_titles(row!["ID", "Title", "Price", "Category", "Image"]);
            for product in rows {
                table.add_row(Row::from(vec![
                    product.id.to_string(),
                    truncate_text(&product.title, MAX_TITLE_LEN),
                    format_price(product.price),
                    product.category.clone(),
                    product.image.clone(),
                ]));
            }
            result.push('\n');
            result.push_str(&table.to_string());
        }
    }

    // Navigation section
    result.push_str(&f!("\n{}\n", "=".repeat(80).bright_yellow()));
    result.push_str(&f!("{}\n", "NAVIGATION".bright_yellow().bold()));
    result.push_str(&f!("{}\n", "=".repeat(80).bright_yellow()));

    result.push_str(&f!(
        "\n{} {} {} {} ({} {} {})\n",
        "Showing page".bright_white(),
        info.current_page.to_string().bright_cyan().bold(),
        "of".bright_white(),
        info.total_pages.to_string().bright_cyan().bold(),
        info.total_items.to_string().bright_cyan().bold(),
        "matching".bright_white(),
        "products".bright_white()
    ));
    result.push_str(&f!(
        "{}: {} | {}: {}\n",
        "Previous".green(),
        enabled_label(info.has_previous),
        "Next".green(),
        enabled_label(info.has_next)
    ));

    match hints {
        Hints::Commands => push_command_hints(&mut result, view),
        Hints::Interactive => push_interactive_hints(&mut result, view),
    }

    result.push('\n');
    result
}

fn push_command_hints(result: &mut String, view: &ListingView) {
    let info = &view.pagination;
    let base = list_command(view);

    result.push_str(&f!("\n{}:\n", "To navigate".bright_white().bold()));
    if info.has_next {
        result.push_str(&f!(
            "  {}: {}\n",
            "Next page".green(),
            f!("{} --page {}", base, info.current_page + 1).cyan()
        ));
    }
    if info.has_previous {
        result.push_str(&f!(
            "  {}: {}\n",
            "Previous page".green(),
            f!("{} --page {}", base, info.current_page - 1).cyan()
        ));
    }

    result.push_str(&f!("\n{}:\n", "To search".bright_white().bold()));
    result.push_str(&f!("  {}\n", "catalog list --search <keyword>".cyan()));

    result.push_str(&f!("\n{}:\n", "To sort".bright_white().bold()));
    result.push_str(&f!("  {}\n", "catalog list --sort <title|price> [--desc]".cyan()));

    result.push_str(&f!(
        "\n{}:\n",
        "To change page size".bright_white().bold()
    ));
    result.push_str(&f!(
        "  {}\n",
        f!("{} --limit <{}>", base, allowed_sizes()).cyan()
    ));

    result.push_str(&f!(
        "\n{}:\n",
        "To get JSON output".bright_white().bold()
    ));
    result.push_str(&f!("  {}\n", f!("{} --json", base).cyan()));
}

fn push_interactive_hints(result: &mut String, view: &ListingView) {
    let info = &view.pagination;

    result.push_str(&f!("\n{}:", "Commands".bright_white().bold()));
    if info.has_next {
        result.push_str(&f!(" {}", "next".cyan()));
    }
    if info.has_previous {
        result.push_str(&f!(" {}", "prev".cyan()));
    }
    result.push_str(&f!(
        " {} {} {} {} {}\n",
        "search <keyword>".cyan(),
        "sort <title|price>".cyan(),
        f!("size <{}>", allowed_sizes()).cyan(),
        "help".cyan(),
        "quit".cyan()
    ));
}

/// `catalog list` invocation that reproduces the current search and sort
fn list_command(view: &ListingView) -> String {
    let mut command = String::from("catalog list");

    if !view.keyword.is_empty() {
        command.push_str(&f!(" --search {:?}", view.keyword));
    }
    if let Some(field) = view.sort.field {
        command.push_str(&f!(" --sort {}", field));
        if view.sort.direction == catalog_core::sort::SortDirection::Desc {
            command.push_str(" --desc");
        }
    }
    command.push_str(&f!(" --limit {}", view.pagination.page_size));

    command
}

fn allowed_sizes() -> String {
    ALLOWED_PAGE_SIZES
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join("|")
}

fn enabled_label(enabled: bool) -> colored::ColoredString {
    if enabled {
        "available".bright_green()
    } else {
        "disabled".bright_black()
    }
}

/// Format a price with two decimals
pub fn format_price(price: f64) -> String {
    f!("{:.2}", price)
}

pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_len).collect();
        f!("{}...", truncated)
    }
}

/// Print the interactive command reference
pub fn print_help() {
    println!("\n{}", "COMMANDS".bright_white().bold());
    for (usage, description) in catalog_core::intent::COMMAND_HELP {
        println!("  {:<22} {}", usage.cyan(), description);
    }
    println!();
}
