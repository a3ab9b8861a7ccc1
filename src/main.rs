use clap::{Parser, Subcommand};
use log::{error, info, warn};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::{self, File};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use storefront::Language;
use storefront::catalog::{CatalogStore, HttpSource};
use storefront::content::RichText;
use storefront::core::action::Action;
use storefront::core::config::{self, ResolvedConfig, StorefrontConfig};
use storefront::core::state::App;
use storefront::view::Shell;

#[derive(Parser)]
#[command(name = "storefront", about = "Headless storefront shell renderer")]
struct Args {
    /// Config file (defaults to ~/.storefront/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Content language
    #[arg(short, long, value_enum)]
    lang: Option<Language>,

    /// Base URL the catalog JSON is fetched from
    #[arg(long)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the page at PATH as an HTML document
    Render { path: String },
    /// Render a rich-text JSON document to HTML
    RichText {
        file: PathBuf,
        /// Prefix for uploaded image filenames
        #[arg(long)]
        img_dir: Option<String>,
    },
    /// List the route table
    Routes,
}

fn load(args: &Args) -> io::Result<ResolvedConfig> {
    let file_config = match &args.config {
        Some(path) => config::load_config_from(path).map_err(io::Error::other)?,
        None => config::load_config().unwrap_or_else(|e| {
            warn!("{}, using defaults", e);
            StorefrontConfig::default()
        }),
    };
    Ok(config::resolve(&file_config, args.lang, args.base_url.as_deref()))
}

fn build_shell(config: &ResolvedConfig) -> Shell {
    let source = Arc::new(HttpSource::new(config.base_url.clone()));
    let store = CatalogStore::new(source, config.data_urls.clone());
    Shell::new(App::from_config(config, store))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to storefront.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("storefront.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let config = load(&args)?;
    info!(
        "Storefront starting: lang={}, base_url={}",
        config.language.key(),
        config.base_url
    );

    match args.command {
        Command::Render { path } => {
            let mut shell = build_shell(&config);
            shell.dispatch(Action::Navigate(path));
            let rendered = shell.render().await;
            print!("{}", rendered.to_document());
        }
        Command::RichText { file, img_dir } => {
            let contents = fs::read_to_string(&file)?;
            let value: serde_json::Value = serde_json::from_str(&contents)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
            let doc = RichText::from_value(&value);
            doc.check().map_err(|e| {
                error!("Invalid rich text in {}: {}", file.display(), e);
                io::Error::new(io::ErrorKind::InvalidData, e)
            })?;
            print!("{}", doc.render(img_dir.as_deref().unwrap_or(&config.img_dir)));
        }
        Command::Routes => {
            let shell = build_shell(&config);
            for entry in shell.app.router.routes().entries() {
                let title = entry
                    .menu
                    .as_ref()
                    .map(|m| m.get(config.language))
                    .unwrap_or("-");
                println!("{:<14} {:<12} {}", entry.path, format!("{:?}", entry.page), title);
            }
        }
    }

    Ok(())
}
