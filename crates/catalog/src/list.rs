use crate::prelude::{println, *};
use crate::render::{Hints, TerminalSink};
use crate::source::{load_catalog, ProductSource};
use catalog_core::pagination::PageSize;
use catalog_core::product::Product;
use catalog_core::session::{ListingQuery, Session, SessionController};
use catalog_core::sort::SortField;
use indicatif::{ProgressBar, ProgressStyle};

#[derive(Debug, clap::Args, Clone)]
pub struct ListOptions {
    /// Only show products whose title contains this text (case-insensitive)
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Sort by column: title, price
    #[arg(long)]
    pub sort: Option<SortField>,

    /// Sort in descending order (requires --sort)
    #[arg(long, requires = "sort")]
    pub desc: bool,

    /// Page number (1-indexed)
    #[arg(short, long, default_value = "1")]
    pub page: usize,

    /// Number of products per page: 5, 10 or 20
    #[arg(short, long, env = "CATALOG_PAGE_SIZE", default_value = "5")]
    pub limit: PageSize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl ListOptions {
    pub fn query(&self) -> ListingQuery {
        ListingQuery {
            keyword: self.search.clone(),
            sort_field: self.sort,
            descending: self.desc,
            page: self.page,
            page_size: self.limit,
        }
    }
}

pub async fn run(options: ListOptions, global: crate::Global) -> Result<()> {
    let source = ProductSource::from_config(&global.config()?);

    if global.verbose {
        println!("Loading products from {}...", source.describe());
    }

    let spinner = (!options.json).then(|| {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            spinner.set_style(style);
        }
        spinner.enable_steady_tick(std::time::Duration::from_millis(100));
        spinner
    });

    let products = load_catalog(&source, spinner.as_ref()).await;

    if let Some(spinner) = &spinner {
        spinner.finish_and_clear();
    }

    if global.verbose {
        println!("Loaded {} products", products.len());
    }

    let sink = TerminalSink {
        json: options.json,
        hints: Hints::Commands,
    };
    let mut controller = SessionController::new(list_products_data(products, &options), sink);
    controller.render();

    Ok(())
}

/// Build the session for one `catalog list` invocation
pub fn list_products_data(products: Vec<Product>, options: &ListOptions) -> Session {
    Session::from_query(products, &options.query())
}
