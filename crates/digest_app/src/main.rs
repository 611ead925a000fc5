//! `news_digest`: prints the articles of the Habr "all articles" listing
//! that mention any of the configured keywords.
mod logging;
mod report;

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{anyhow, Context};
use digest_engine::{Crawler, DigestConfig, HabrExtractor, LogObserver};
use digest_logging::{digest_debug, digest_info};

fn main() -> ExitCode {
    logging::initialize(Path::new(logging::LOG_FILE));

    match run() {
        Ok(code) => code,
        Err(err) => {
            digest_debug!("news_digest failed: {:?}", err);
            eprintln!("news_digest: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<ExitCode> {
    let config = DigestConfig::default()
        .with_overrides(|key| std::env::var(key).ok())
        .map_err(|message| anyhow!(message))?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start the async runtime")?;
    runtime.block_on(digest(config))
}

async fn digest(config: DigestConfig) -> anyhow::Result<ExitCode> {
    digest_info!(
        "digest of {} with {} keywords ({:?} backend)",
        config.listing_url,
        config.keywords.len(),
        config.backend
    );
    let fetcher = config.build_fetcher().context("failed to set up the fetcher")?;
    let extractor = Arc::new(HabrExtractor::new(&config.layout).context("invalid page layout")?);
    let crawler = Crawler::new(fetcher.clone(), extractor, config.crawl.clone())
        .with_observer(Arc::new(LogObserver));

    let outcome = crawler.run(&config.listing_url, &config.keywords).await;
    fetcher.shutdown().await;

    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    report::finish(outcome, &mut stdout.lock(), &mut stderr.lock())
        .context("failed to write the report")
}
