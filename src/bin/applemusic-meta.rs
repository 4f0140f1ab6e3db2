use applemusic_meta::host::HostTrack;
use applemusic_meta::stream::{Bridge, StreamSource};
use applemusic_meta::{
    AppleMusicClient, AppleMusicExtractor, ClientConfig, ExtractorOptions, ExtractorResponse,
    SearchContext,
};
use clap::Parser;

/// Apple Music storefront metadata lookup
#[derive(Parser)]
#[command(
    name = "applemusic-meta",
    about = "Look up Apple Music songs, albums, playlists and search results",
    long_about = None
)]
struct Cli {
    /// Show detailed debug information
    #[arg(long, global = true)]
    verbose: bool,

    /// Print the response as JSON
    #[arg(long)]
    json: bool,

    /// Storefront region, e.g. "us" or "gb"
    #[arg(long)]
    storefront: Option<String>,

    /// A song, album or playlist link, or free-text search terms
    #[arg(required = true, num_args = 1..)]
    query: Vec<String>,
}

/// The command line has no second provider to bridge to.
struct NoBridge;

#[async_trait::async_trait(?Send)]
impl Bridge for NoBridge {
    async fn bridge(&self, _track: &HostTrack) -> Option<StreamSource> {
        None
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let mut config = ClientConfig::from_env();
    if let Some(storefront) = &args.storefront {
        config = config.with_storefront(storefront.as_str());
    }

    let query = args.query.join(" ");
    let client = AppleMusicClient::with_config(
        Box::new(http_client::native::NativeClient::new()),
        config,
    );
    let extractor = AppleMusicExtractor::activate(
        Box::new(client),
        Box::new(NoBridge),
        ExtractorOptions::default(),
    );

    if !extractor.validate(&query) {
        eprintln!("❌ Not a recognized Apple Music link: {query}");
        std::process::exit(2);
    }

    let response = extractor
        .handle(&query, &SearchContext::new("cli"))
        .await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print_response(&response);
    }

    if response.is_empty() {
        std::process::exit(1);
    }

    Ok(())
}

fn print_response(response: &ExtractorResponse) {
    if response.is_empty() {
        println!("No results");
        return;
    }

    if let Some(playlist) = &response.playlist {
        println!("{}", playlist.metadata);
        if playlist.description != playlist.title {
            println!("  {}", playlist.description);
        }
        println!();
    }

    for (i, track) in response.tracks.iter().enumerate() {
        println!("{:>3}. {}", i + 1, track.metadata);
        println!("     {}", track.url);
    }
}
