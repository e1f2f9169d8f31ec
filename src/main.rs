use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use config::ConfigError;
use pick_pool::{
    models::{Game, LeaderboardTier, RankedEntry, Team, TeamRecord},
    config::Settings,
    scoring::PoolCalculator,
    store::{Fixture, MemoryStore, PoolReader, SqliteStore},
};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[clap(name = "pick-pool")]
#[clap(about = "Score a football pick'em pool", long_about = None)]
struct Cli {
    /// Read games and picks from a JSON fixture instead of the database
    #[clap(long, global = true)]
    fixture: Option<PathBuf>,

    /// Settings file layered over the defaults
    #[clap(long, global = true)]
    config: Option<PathBuf>,

    /// Evaluate as of this RFC 3339 instant instead of now
    #[clap(long, global = true)]
    at: Option<DateTime<Utc>>,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the current week and season window
    Week,

    /// Season-to-date team standings
    Standings,

    /// Season-to-date team point differentials
    Points,

    /// Pick leaderboard for a single week
    Leaderboard {
        #[clap(short, long)]
        year: Option<i32>,

        /// Week ordinal; defaults to the current week
        #[clap(short, long)]
        week: Option<u16>,
    },

    /// Season-to-date pick leaderboard
    Season,

    /// Stored seasons and their segment lengths
    Seasons,

    /// Games of the week after the current one
    Upcoming,

    /// Picks of a week, hiding unstarted games from other users
    Picks {
        #[clap(short, long)]
        year: Option<i32>,

        #[clap(short, long)]
        week: Option<u16>,

        /// User id whose own picks are always shown
        #[clap(long)]
        viewer: Option<i64>,
    },

    /// Create the database schema, optionally seeding it from --fixture
    InitDb,
}

fn load_settings(path: Option<&PathBuf>) -> anyhow::Result<(Settings, Option<ConfigError>)> {
    match path {
        Some(path) => Ok((Settings::from_file(path)?, None)),
        None => Ok(Settings::load()),
    }
}

async fn open_reader(cli: &Cli, settings: &Settings) -> anyhow::Result<Arc<dyn PoolReader>> {
    if let Some(path) = &cli.fixture {
        info!("Reading fixture {}", path.display());
        let store = MemoryStore::from_fixture(Fixture::from_path(path)?)?;
        return Ok(Arc::new(store));
    }

    let store = SqliteStore::connect(&settings.database).await?;
    store.migrate().await?;
    Ok(Arc::new(store))
}

async fn resolve_week(
    calculator: &PoolCalculator,
    year: Option<i32>,
    week: Option<u16>,
    at: DateTime<Utc>,
) -> anyhow::Result<(i32, u16)> {
    calculator
        .resolve_week(year, week, at)
        .await?
        .ok_or_else(|| anyhow::anyhow!("No current or final week to show; pass --year and --week"))
}

fn team_abbr(teams: &HashMap<i64, Team>, id: i64) -> &str {
    teams.get(&id).map(|t| t.code.abbr()).unwrap_or("???")
}

fn print_game(teams: &HashMap<i64, Team>, game: &Game) {
    let visitor = team_abbr(teams, game.visitor_team_id);
    let home = team_abbr(teams, game.home_team_id);
    match game.final_scores() {
        Some((home_score, visitor_score)) => {
            println!("  {} {:>3} @ {} {:>3}  Final", visitor, visitor_score, home, home_score)
        }
        None => println!("  {} @ {}  {}", visitor, home, game.kickoff.format("%a %b %e %H:%M UTC")),
    }
}

fn print_records(title: &str, records: &[TeamRecord]) {
    println!("\n=== {} ===", title);
    if records.is_empty() {
        println!("No games this season yet");
        return;
    }
    println!("{:<24} {:>3} {:>3} {:>3} {:>6} {:>5} {:>5} {:>5}", "Team", "W", "L", "T", "Pct", "PF", "PA", "Diff");
    for r in records {
        println!(
            "{:<24} {:>3} {:>3} {:>3} {:>6.3} {:>5} {:>5} {:>+5}",
            r.team.full_name(),
            r.won,
            r.lost,
            r.tied,
            r.won_lost_ratio,
            r.points_for,
            r.points_against,
            r.points_diff
        );
    }
}

fn print_tiers(tiers: &[LeaderboardTier]) {
    if tiers.is_empty() {
        println!("No picks");
    }
    for tier in tiers {
        let names: Vec<&str> = tier.users.iter().map(|u| u.display_name.as_str()).collect();
        println!("{:>3}  {}", tier.points, names.join(", "));
    }
}

fn print_ranking(entries: &[RankedEntry]) {
    if entries.is_empty() {
        println!("No picks");
    }
    for entry in entries {
        let tie_break = entry.tie_break.map_or_else(|| "-".to_string(), |tb| tb.to_string());
        println!("{:>3}. {:<20} {:>3} pts  tie-break {}", entry.rank, entry.user.display_name, entry.points, tie_break);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let (settings, load_error) = load_settings(cli.config.as_ref())?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.app.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Some(e) = load_error {
        warn!("Failed to load settings, using defaults: {}", e);
    }
    settings.validate().map_err(|e| anyhow::anyhow!("Invalid settings: {}", e))?;

    let at = cli.at.unwrap_or_else(Utc::now);

    let reader = open_reader(&cli, &settings).await?;
    let break_ties = settings.leaderboard.break_ties;
    let calculator = PoolCalculator::new(reader.clone(), settings);

    match cli.command {
        Commands::Week => {
            let summary = calculator.week_summary(at).await?;
            println!("\n=== {} Season ===", summary.season);
            match &summary.current {
                Some(current) => {
                    println!("{} week {} (league week {})", current.label.name, current.label.week, current.value());
                    println!("Runs {} to {}", current.week.start, current.week.end);
                }
                None => println!("Off season"),
            }
            println!("Window: {:?}", summary.window);
        }

        Commands::Standings => {
            let records = calculator.team_standings(at).await?;
            print_records("Standings", &records);
        }

        Commands::Points => {
            let records = calculator.team_points(at).await?;
            print_records("Point Differential", &records);
        }

        Commands::Leaderboard { year, week } => {
            let (year, week) = resolve_week(&calculator, year, week, at).await?;
            println!("\n=== Week {} of {} ===", week, year);
            if break_ties {
                print_ranking(&calculator.week_ranking(year, week).await?);
            } else {
                print_tiers(&calculator.week_leaderboard(year, week).await?);
            }
        }

        Commands::Season => {
            let summary = calculator.week_summary(at).await?;
            println!("\n=== {} Season to Date ===", summary.season);
            if break_ties {
                print_ranking(&calculator.season_ranking(at).await?);
            } else {
                print_tiers(&calculator.season_leaderboard(at).await?);
            }
        }

        Commands::Seasons => {
            let years = reader.years().await?;
            println!("\n=== Seasons ===");
            if years.is_empty() {
                println!("No seasons stored; weeks use the default layout");
            }
            for year in &years {
                println!(
                    "{}  {} to {}  preseason {} / regular {} / postseason {}",
                    year.value,
                    year.start.date_naive(),
                    year.end.date_naive(),
                    year.layout.preseason_weeks,
                    year.layout.regular_weeks,
                    year.layout.postseason_weeks
                );
            }
        }

        Commands::Upcoming => {
            let teams: HashMap<i64, Team> = reader.teams().await?.into_iter().map(|t| (t.id, t)).collect();
            let games = calculator.upcoming_games(at).await?;
            println!("\n=== Upcoming ===");
            if games.is_empty() {
                println!("No games scheduled");
            }
            for game in &games {
                print_game(&teams, game);
            }
        }

        Commands::Picks { year, week, viewer } => {
            let (year, week) = resolve_week(&calculator, year, week, at).await?;
            let teams: HashMap<i64, Team> = reader.teams().await?.into_iter().map(|t| (t.id, t)).collect();
            let week_picks = calculator.week_picks(year, week, viewer, at).await?;

            println!("\n=== Week {} of {} ===", week, year);
            for game in &week_picks.games {
                print_game(&teams, game);
            }
            for entry in &week_picks.entries {
                let picks: Vec<String> = entry
                    .picks
                    .iter()
                    .map(|p| format!("{}:{}", p.game_id, p.selection.as_str()))
                    .collect();
                println!("{:<20} {}", entry.user.display_name, picks.join(" "));
            }
        }

        Commands::InitDb => {
            let database = &calculator.settings().database;
            let store = SqliteStore::connect(database).await?;
            store.migrate().await?;
            if let Some(path) = &cli.fixture {
                store.load_fixture(&Fixture::from_path(path)?).await?;
            }
            println!("Database ready at {}", database.url);
        }
    }

    Ok(())
}
