//! step-locator CLI
//!
//! Describes one element of an HTML file or a live page and prints its
//! locators, element key and a Gherkin step.

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use step_locator::browser::{BrowserSession, LaunchOptions};
use step_locator::step::{Assertion, gherkin_step, render_text};
use step_locator::{CaptureSession, DomTree, ElementDescription};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    /// Full description as JSON
    Json,
    /// Human-readable summary with step and locators
    Text,
    /// Only the Gherkin step
    Gherkin,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Expect {
    Visible,
    Hidden,
    Enabled,
    Disabled,
    /// Assert the element's accessible name as text
    Text,
}

#[derive(Parser)]
#[command(name = "step-locator")]
#[command(version)]
#[command(about = "Generate locators and Gherkin steps for a page element", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Describe the element matching a CSS selector
    Describe(DescribeArgs),
}

#[derive(Args)]
#[command(group(clap::ArgGroup::new("source").required(true).args(["html", "url"])))]
struct DescribeArgs {
    /// Local HTML file to read
    #[arg(long, value_name = "FILE")]
    html: Option<PathBuf>,

    /// Page to open in Chrome
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// CSS selector of the target element
    #[arg(long, short = 's')]
    selector: String,

    /// URL recorded in the description (HTML files only)
    #[arg(long, value_name = "URL")]
    page_url: Option<String>,

    /// Title recorded in the description (HTML files only)
    #[arg(long)]
    title: Option<String>,

    /// Output format
    #[arg(long, short = 'f', value_enum, default_value = "text")]
    format: Format,

    /// Assertion used for the generated step
    #[arg(long, value_enum, default_value = "visible")]
    expect: Expect,

    /// Launch browser in headed mode (default: headless)
    #[arg(long, short = 'H')]
    headed: bool,

    /// Path to custom browser executable
    #[arg(long, value_name = "PATH")]
    executable_path: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Describe(args) => {
            let description = describe(&args)?;
            println!("{}", render(&description, &args)?);
        }
    }

    Ok(())
}

fn describe(args: &DescribeArgs) -> anyhow::Result<ElementDescription> {
    let mut session = match (&args.html, &args.url) {
        (Some(path), _) => {
            let html = std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
            let mut tree = DomTree::from_html(&html);
            if let Some(page_url) = &args.page_url {
                tree = tree.with_url(page_url.clone());
            }
            if let Some(title) = &args.title {
                tree = tree.with_title(title.clone());
            }
            let mut session = CaptureSession::new(tree);
            session.target_by_selector(&args.selector)?;
            session
        }
        (None, Some(url)) => {
            let mut options = LaunchOptions::new().headless(!args.headed);
            if let Some(path) = &args.executable_path {
                options = options.chrome_path(path.clone());
            }
            log::info!("Launching browser ({})", if options.headless { "headless" } else { "headed" });

            let browser = BrowserSession::launch(options)?;
            browser.navigate(url)?;
            browser.wait_for_navigation()?;
            browser.capture_session(&args.selector)?
        }
        (None, None) => anyhow::bail!("either --html or --url is required"),
    };

    Ok(session.capture()?)
}

fn render(description: &ElementDescription, args: &DescribeArgs) -> anyhow::Result<String> {
    let assertion = match args.expect {
        Expect::Visible => Assertion::Visible,
        Expect::Hidden => Assertion::Hidden,
        Expect::Enabled => Assertion::Enabled,
        Expect::Disabled => Assertion::Disabled,
        Expect::Text => Assertion::HasText(description.name.clone().unwrap_or_default()),
    };

    Ok(match args.format {
        Format::Json => description.to_json()?,
        Format::Text => render_text(description, &assertion),
        Format::Gherkin => gherkin_step(description, &assertion),
    })
}
