use battlerite_sdk::matches::Match;
use battlerite_sdk::telemetry::EventKind;
use battlerite_sdk::{Client, Player, Telemetry};
use chrono::{Duration, SecondsFormat, Utc};
use clap::{Parser, Subcommand};
use std::time::Duration as StdDuration;

type Result<T> = core::result::Result<T, Box<dyn std::error::Error>>;

/// Query the Battlerite game data service
#[derive(Debug, Parser)]
#[command(name = "battlerite", version)]
struct Cli {
    /// Gamelocker API key
    #[arg(long, env = "BATTLERITE_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Shard base URL
    #[arg(long, env = "BATTLERITE_BASE_URL")]
    base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 10)]
    timeout: u64,

    /// Log SDK requests and decoding
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show the API status
    Status,
    /// Look up players by their Battlerite id
    Player { ids: Vec<i64> },
    /// Search players by name
    PlayerSearch {
        #[arg(long = "name", required = true)]
        names: Vec<String>,
    },
    /// List a season's teams for the given players
    Teams {
        #[arg(long)]
        season: i64,
        #[arg(long = "player-id", required = true)]
        player_ids: Vec<i64>,
    },
    /// Show a single match
    Match { id: String },
    /// List recent matches
    Matches {
        #[arg(long = "player-id")]
        player_ids: Vec<String>,
        #[arg(long, default_value_t = 5)]
        limit: u32,
        /// Only matches created within the last N hours
        #[arg(long)]
        since_hours: Option<i64>,
    },
    /// Download and summarize a match's telemetry
    Telemetry { match_id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .without_time()
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    let mut builder =
        Client::builder(&cli.api_key).timeout(StdDuration::from_secs(cli.timeout));
    if let Some(base_url) = &cli.base_url {
        builder = builder.base_url(base_url);
    }
    let client = builder.build()?;

    if let Err(e) = run(&client, cli.command).await {
        tracing::error!("{}", e);
        return Err(e);
    }
    Ok(())
}

async fn run(client: &Client, command: Command) -> Result<()> {
    match command {
        Command::Status => {
            let status = client.status().send().await?;
            println!("{} {} (released {})", status.id, status.version, status.released_at);
        }
        Command::Player { ids } => {
            let lookups = ids
                .iter()
                .map(|id| client.players().get(*id).send())
                .collect::<Vec<_>>();
            for (id, res) in ids.iter().zip(futures::future::join_all(lookups).await) {
                match res {
                    Ok(player) => print_player(&player),
                    Err(e) => tracing::error!("Error getting player {}: {}", id, e),
                }
            }
        }
        Command::PlayerSearch { names } => {
            let players = client.players().list().names(names).send().await?;
            if players.is_empty() {
                tracing::info!("No players found");
            }
            players.iter().for_each(print_player);
        }
        Command::Teams { season, player_ids } => {
            let teams = client.teams().list(season, &player_ids).send().await?;
            for team in teams {
                println!(
                    "{:<24} league {} div {} ({} rating)  {}W/{}L  members {:?}",
                    team.name,
                    team.league,
                    team.division,
                    team.division_rating,
                    team.wins,
                    team.losses,
                    team.members
                );
            }
        }
        Command::Match { id } => {
            let game = client.matches().get(&id).send().await?;
            print_match(&game);
        }
        Command::Matches {
            player_ids,
            limit,
            since_hours,
        } => {
            let mut request = client
                .matches()
                .list()
                .sort("-createdAt")
                .page_limit(limit)
                .player_ids(player_ids);
            if let Some(hours) = since_hours {
                let start = (Utc::now() - Duration::hours(hours))
                    .to_rfc3339_opts(SecondsFormat::Secs, true);
                request = request.created_at_start(&start);
            }
            let matches = request.send().await?;
            for game in &matches {
                print_match(game);
                println!();
            }
        }
        Command::Telemetry { match_id } => {
            let game = client.matches().get(&match_id).send().await?;
            let telemetry = client.telemetry(telemetry_url(&game)?).send().await?;
            print_telemetry(&telemetry);
        }
    }
    Ok(())
}

fn telemetry_url(game: &Match) -> Result<&str> {
    match &game.asset {
        Some(asset) => Ok(&asset.url),
        None => Err(format!("Match {} has no telemetry asset", game.id).into()),
    }
}

fn print_player(player: &Player) {
    let win_rate = player
        .win_rate()
        .map(|r| format!("{:.1}%", r * 100.0))
        .unwrap_or_else(|| "-".to_string());
    println!(
        "{} ({}) level {}  {}W/{}L  {}",
        player.name, player.id, player.account_level, player.wins, player.losses, win_rate
    );
}

fn print_match(game: &Match) {
    println!(
        "Match {} [{} on {}] {}s, patch {}, {}",
        game.id, game.map_type, game.map_id, game.duration, game.patch_version, game.created_at
    );
    for roster in &game.rosters {
        let outcome = if roster.won { "won" } else { "lost" };
        println!("  Roster {} {} with score {}", roster.id, outcome, roster.score);
        for participant in game.roster_participants(roster) {
            let name = game
                .player_of(participant)
                .and_then(|p| p.name())
                .unwrap_or("?");
            println!(
                "    {:<20} {}/{}  dmg {} heal {}",
                name,
                participant.kills,
                participant.deaths,
                participant.damage_done,
                participant.healing_done
            );
        }
    }
}

fn print_telemetry(telemetry: &Telemetry) {
    println!(
        "Telemetry for match {} ({})",
        telemetry.match_start.match_id, telemetry.match_start.region
    );
    for kind in EventKind::ALL {
        println!("  {:<20} {}", kind.to_string(), telemetry.count(kind));
    }
    let finished = &telemetry.match_finished_event;
    println!(
        "  Final score {} - {} after {}s",
        finished.team_one_score, finished.team_two_score, finished.match_length
    );
}
