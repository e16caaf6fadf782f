//! Headless command line renderer.
//!
//! ```text
//! vocab-browser render --list tourism.json --document https://example.org/hotel.jsonld=hotel.json --query "voc=1&term=ex:Hotel"
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use clap::{ArgGroup, Parser, Subcommand};

use crate::{
    browser::{MemoryHost, VocabBrowser},
    config::BrowserSettings,
    fetch::StaticFetcher,
    logger,
    navigation::MemoryHistory,
    vocabulary::InMemoryVocabularyProvider,
    Error, Result,
};

const EMPTY_DOCUMENT: &str = r#"{"@graph": []}"#;

#[derive(Parser, Debug)]
#[command(name = "vocab-browser", version, about = "Render semantic vocabularies as HTML")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render the view selected by a navigation query and print its HTML.
    Render(RenderArgs),
}

#[derive(clap::Args, Debug)]
#[command(group(ArgGroup::new("source").required(true).args(["vocabulary", "list"])))]
pub struct RenderArgs {
    /// Vocabulary document to browse.
    #[arg(long, value_name = "FILE")]
    pub vocabulary: Option<PathBuf>,

    /// Vocabulary list document to browse.
    #[arg(long, value_name = "FILE")]
    pub list: Option<PathBuf>,

    /// Baseline document served at the configured baseline location.
    /// An empty document is used when omitted.
    #[arg(long, value_name = "FILE")]
    pub baseline: Option<PathBuf>,

    /// Serve FILE when LOCATION is fetched, e.g. list entries.
    #[arg(long = "document", value_name = "LOCATION=FILE", value_parser = parse_document)]
    pub documents: Vec<(String, PathBuf)>,

    /// Navigation query, e.g. `voc=1&term=ex:Thing`.
    #[arg(long, default_value = "")]
    pub query: String,

    /// YAML settings file.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

fn parse_document(value: &str) -> std::result::Result<(String, PathBuf), String> {
    value
        .rsplit_once('=')
        .filter(|(location, file)| !location.is_empty() && !file.is_empty())
        .map(|(location, file)| (location.to_string(), PathBuf::from(file)))
        .ok_or_else(|| format!("expected LOCATION=FILE, got `{value}`"))
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|err| Error::Message(format!("cannot read `{}`: {err}", path.display())))
}

impl RenderArgs {
    fn settings(&self) -> Result<BrowserSettings> {
        self.config
            .as_deref()
            .map_or_else(|| Ok(BrowserSettings::default()), BrowserSettings::from_file)
    }

    fn fetcher(&self, settings: &BrowserSettings) -> Result<StaticFetcher> {
        let baseline = match &self.baseline {
            Some(path) => read(path)?,
            None => EMPTY_DOCUMENT.to_string(),
        };
        let mut fetcher =
            StaticFetcher::new().with_document(settings.baseline.location.clone(), baseline);
        for (location, path) in &self.documents {
            fetcher.insert(location.clone(), read(path)?);
        }
        Ok(fetcher)
    }
}

/// Renders the requested view and returns its HTML.
pub async fn render(args: &RenderArgs) -> Result<String> {
    let settings = args.settings()?;
    logger::init(&settings.logger);

    let fetcher = args.fetcher(&settings)?.into_shared();
    let host = Arc::new(MemoryHost::new());
    let builder = VocabBrowser::builder(
        host.clone(),
        Arc::new(MemoryHistory::from_query_string(&args.query)),
        Arc::new(InMemoryVocabularyProvider::factory(fetcher.clone())),
        fetcher,
    )
    .settings(settings);
    let builder = match (&args.vocabulary, &args.list) {
        (Some(path), _) => builder.single_vocabulary(read(path)?),
        (None, Some(path)) => builder.list(read(path)?),
        (None, None) => {
            return Err(Error::Message(
                "a vocabulary or a list is required".to_string(),
            ))
        }
    };

    builder.build()?.render().await?;
    host.html()
        .ok_or_else(|| Error::Message("nothing was rendered".to_string()))
}

pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Render(args) => {
            let html = render(&args).await?;
            println!("{html}");
        }
    }
    Ok(())
}
