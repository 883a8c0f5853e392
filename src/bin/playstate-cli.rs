use clap::{Parser, Subcommand};
use playstate::{FetchOutcome, Player, PlayerConfig, PlayerState, StartOutcome};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "playstate-cli")]
#[command(about = "Drive the playstate player from the command line", long_about = None)]
struct Cli {
    /// Token-issuing endpoint
    #[arg(long, env = "PLAYSTATE_TOKEN_URL", default_value = playstate::config::DEFAULT_TOKEN_URL)]
    token_url: String,

    /// Catalog API root
    #[arg(long, env = "PLAYSTATE_API_URL", default_value = playstate::config::DEFAULT_API_BASE_URL)]
    api_url: String,

    /// Page size for listings
    #[arg(short, long, default_value_t = playstate::config::DEFAULT_LIST_LIMIT)]
    limit: u32,

    /// Print the final state tree as JSON
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List featured playlists
    Featured,
    /// List genres
    Genres,
    /// List the playlists of a genre
    Category {
        /// Category ID, e.g. "chill"
        id: String,
    },
    /// List new album releases
    NewReleases,
    /// Start a playlist by API URL
    Playlist { href: String },
    /// Start an album by API URL
    Album { href: String },
    /// Preview a playlist or album, optionally starting it from a track
    View {
        href: String,

        /// Track index to start playing from
        #[arg(short, long)]
        play: Option<usize>,
    },
}

fn print_playback(state: &PlayerState, outcome: StartOutcome) {
    match outcome {
        StartOutcome::Started { index } => {
            let name = state.playlist_show.as_ref().map(|p| p.name.as_str()).unwrap_or("?");
            let track = state.tracklist.get(index);
            println!(
                "▶ {} - {} [{}/{}]",
                name,
                track.map(|t| t.name()).unwrap_or("?"),
                index + 1,
                state.tracklist.len()
            );
            if let Some(item) = track.and_then(|t| t.track.as_ref()) {
                println!(
                    "   {} ({})",
                    item.artists_string(", "),
                    item.duration_formatted()
                );
            }
        }
        StartOutcome::NoPlayableTrack => println!("No preview available"),
        StartOutcome::NotLoaded(outcome) => println!("Could not load: {:?}", outcome),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("playstate=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = PlayerConfig {
        token_url: cli.token_url,
        api_base_url: cli.api_url,
        list_limit: cli.limit,
        ..Default::default()
    };
    let player = Player::new(config)?;

    if player.fetch_token().await != FetchOutcome::Applied {
        return Err("could not obtain an access token".into());
    }

    match &cli.command {
        Commands::Featured => {
            player.fetch_featured().await;
            if let Some(featured) = player.store().read(|s| s.featured.clone()) {
                if let Some(message) = &featured.message {
                    println!("{}", message);
                }
                for (i, playlist) in featured.playlists.items.iter().enumerate() {
                    println!("{}. {} ({})", i + 1, playlist.name, playlist.href);
                }
            }
        }
        Commands::Genres => {
            player.fetch_genres().await;
            for genre in player.store().read(|s| s.genres.clone()) {
                println!("{:<24} {}", genre.id, genre.name);
            }
        }
        Commands::Category { id } => {
            player.fetch_category_playlist(id).await;
            let playlists = player
                .store()
                .read(|s| s.category_playlist.clone())
                .unwrap_or_default();
            for (i, playlist) in playlists.iter().enumerate() {
                println!("{}. {} ({})", i + 1, playlist.name, playlist.href);
            }
        }
        Commands::NewReleases => {
            player.fetch_new_releases().await;
            if let Some(releases) = player.store().read(|s| s.new_releases.clone()) {
                for (i, album) in releases.albums.items.iter().enumerate() {
                    println!(
                        "{}. {} - {} ({})",
                        i + 1,
                        album.artists_string(", "),
                        album.name,
                        album.href
                    );
                }
            }
        }
        Commands::Playlist { href } => {
            let outcome = player.start_playlist(href).await;
            print_playback(&player.store().snapshot(), outcome);
        }
        Commands::Album { href } => {
            let outcome = player.start_album(href).await;
            print_playback(&player.store().snapshot(), outcome);
        }
        Commands::View { href, play } => {
            if !player.fetch_playlist_view(href).await.is_loaded() {
                return Err(format!("could not load {}", href).into());
            }
            let state = player.store().snapshot();
            if let Some(view) = &state.playlist_view {
                println!("{} ({})", view.name, view.kind.as_str());
            }
            for (i, entry) in state.tracklist_view.iter().enumerate() {
                let marker = if entry.is_playable() { " " } else { "✗" };
                println!("{} {:>3}. {}", marker, i + 1, entry.name());
            }
            if let Some(index) = play {
                let outcome = player.start_play_from_tracklist(*index);
                print_playback(&player.store().snapshot(), outcome);
            }
        }
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&player.store().snapshot())?);
    }

    Ok(())
}
