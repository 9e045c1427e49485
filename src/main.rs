use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use acestream_links::app::Router;
use acestream_links::config::Config;
use acestream_links::engine::pipeline::LinkProvider;
use acestream_links::net::cache::CacheStore;
use acestream_links::net::fetch::LinkFetcher;
use acestream_links::ui::{ConsoleHost, Presenter, Severity};

/// Lists AceStream links scraped from a web page, as a media-center plugin.
///
/// Invoked the way the host invokes plugins: plugin URL, handle, query.
#[derive(Debug, Parser)]
#[command(name = "acestream-links", version, about)]
struct Cli {
    /// Plugin URL used as the base of generated entry targets
    plugin_url: String,

    /// Host handle identifying this listing
    #[arg(allow_negative_numbers = true)]
    handle: i32,

    /// Form-encoded action descriptor, e.g. `?action=play&link=...`
    #[arg(default_value = "")]
    query: String,

    /// Page to scrape (overrides settings.toml)
    #[arg(long)]
    base_url: Option<String>,

    /// Directory holding the cache and settings
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = Config::resolve(cli.plugin_url, cli.data_dir, cli.base_url)
        .context("failed to load configuration")?;
    log::debug!("Using {:?}", config);

    let fetcher = LinkFetcher::new(&config)?;
    let provider = LinkProvider::new(CacheStore::new(config.cache_path()), fetcher);
    let router = Router::new(&config, provider);

    let mut host = ConsoleHost::new(cli.handle, io::stdout().lock());
    if let Err(e) = router.dispatch(&cli.query, &mut host) {
        log::error!("Rejected invocation {:?}: {}", cli.query, e);
        host.notify("Error", &e.to_string(), Severity::Error);
        return Err(e.into());
    }
    Ok(())
}
