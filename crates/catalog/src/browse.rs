use crate::prelude::{eprintln, println, *};
use crate::render::{print_help, Hints, TerminalSink};
use crate::source::{load_catalog, ProductSource};
use catalog_core::intent::{parse_command, Command};
use catalog_core::pagination::PageSize;
use catalog_core::session::{Session, SessionController, ViewSink};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

#[derive(Debug, clap::Args, Clone)]
pub struct BrowseOptions {
    /// Initial number of products per page: 5, 10 or 20
    #[arg(short, long, env = "CATALOG_PAGE_SIZE", default_value = "5")]
    pub limit: PageSize,

    /// Render every page as JSON
    #[arg(long)]
    pub json: bool,
}

/// What the loop should do after handling a line
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub async fn run(options: BrowseOptions, global: crate::Global) -> Result<()> {
    let source = ProductSource::from_config(&global.config()?);

    if global.verbose {
        println!("Loading products from {}...", source.describe());
    }

    let spinner = loading_spinner(options.json);
    let products = load_catalog(&source, spinner.as_ref()).await;

    if let Some(spinner) = &spinner {
        spinner.finish_and_clear();
    }

    let sink = TerminalSink {
        json: options.json,
        hints: Hints::Interactive,
    };
    let mut controller = SessionController::new(Session::new(Vec::new(), options.limit), sink);
    controller.load(products);

    let reader = BufReader::new(tokio::io::stdin());
    run_loop(&mut controller, reader, global.verbose).await
}

/// Spinner shown while the catalog loads; JSON output stays free of it
fn loading_spinner(json: bool) -> Option<ProgressBar> {
    (!json).then(|| {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            spinner.set_style(style);
        }
        spinner.enable_steady_tick(std::time::Duration::from_millis(100));
        spinner
    })
}

/// Read commands line by line until `quit` or EOF
async fn run_loop<S, R>(
    controller: &mut SessionController<S>,
    mut reader: R,
    verbose: bool,
) -> Result<()>
where
    S: ViewSink,
    R: AsyncBufRead + Unpin,
{
    let mut line = String::new();

    loop {
        line.clear();
        let bytes_read = reader
            .read_line(&mut line)
            .await
            .context("Failed to read from stdin")?;

        if bytes_read == 0 {
            break; // EOF
        }

        if verbose {
            eprintln!("Received: {}", line.trim());
        }

        if handle_line(controller, &line) == Flow::Quit {
            break;
        }
    }

    Ok(())
}

fn handle_line<S: ViewSink>(controller: &mut SessionController<S>, line: &str) -> Flow {
    match parse_command(line) {
        Ok(Some(Command::Intent(intent))) => {
            log::debug!("Dispatching {:?}", intent);
            controller.dispatch(&intent);
        }
        Ok(Some(Command::Help)) => print_help(),
        Ok(Some(Command::Quit)) => return Flow::Quit,
        Ok(None) => {}
        Err(err) => eprintln!("{}", err.to_string().yellow()),
    }

    Flow::Continue
}
