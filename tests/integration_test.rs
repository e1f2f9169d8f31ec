use chrono::{DateTime, Duration, TimeZone, Utc};
use pick_pool::{
    config::Settings,
    models::{Game, Pick, PoolError, SeasonLayout, SeasonType, Selection, Team, TeamCode, User, Week, Year},
    scoring::PoolCalculator,
    store::{Fixture, MemoryStore, PoolReader, SqliteStore},
};
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;

const CHI: i64 = 3;
const CLE: i64 = 5;
const DAL: i64 = 6;
const DEN: i64 = 7;
const DET: i64 = 8;
const GB: i64 = 9;

fn season_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2019, 7, 31, 7, 0, 0).unwrap()
}

fn week_start(value: u16) -> DateTime<Utc> {
    season_start() + Duration::weeks(value as i64 - 1)
}

/// Sunday afternoon of a league week
fn kickoff(value: u16) -> DateTime<Utc> {
    week_start(value) + Duration::days(4) + Duration::hours(10)
}

fn game(id: i64, week: u16, home: i64, visitor: i64, scores: (u16, u16)) -> Game {
    Game {
        id,
        week_id: week as i64,
        year: 2019,
        week,
        kickoff: kickoff(week),
        home_team_id: home,
        visitor_team_id: visitor,
        home_score: Some(scores.0),
        visitor_score: Some(scores.1),
        is_final: true,
    }
}

fn user(id: i64, name: &str) -> User {
    User::new(id, name)
}

/// A 2019 season with twelve weeks stored.
///
/// Weeks 6-10 give the Bears a 3-2 start; week 11 is a four-game slate where
/// the visitor wins every game 7-3 and four users pick it.
fn fixture() -> Fixture {
    let years = vec![Year {
        value: 2019,
        start: season_start(),
        end: season_start() + Duration::weeks(27),
        layout: SeasonLayout::default(),
    }];

    let weeks = (1..=12)
        .map(|value| Week {
            id: value as i64,
            year: 2019,
            value,
            start: week_start(value),
            end: week_start(value + 1),
        })
        .collect();

    let mut games = vec![
        game(1, 6, CHI, DET, (20, 10)),
        game(2, 7, GB, CHI, (21, 24)),
        game(3, 8, CHI, CLE, (17, 14)),
        game(4, 9, CHI, DAL, (10, 20)),
        game(5, 10, DEN, CHI, (30, 7)),
    ];
    for (i, home) in [10, 12, 14, 16].into_iter().enumerate() {
        games.push(game(11 + i as i64, 11, home, home + 1, (3, 7)));
    }

    let users = [user(1, "Alice"), user(2, "Bob"), user(3, "Carol"), user(4, "Dave")];
    let mut picks = Vec::new();
    for game_id in 11..=14 {
        for u in &users {
            let selection = match u.id {
                1 | 2 => Selection::Visitor,
                3 if game_id % 2 == 0 => Selection::Visitor,
                _ => Selection::Home,
            };
            picks.push(Pick {
                id: picks.len() as i64 + 1,
                user: u.clone(),
                game_id,
                selection,
                picked_tie_break: if u.id == 2 { 0 } else { 4 },
            });
        }
    }

    Fixture {
        years,
        weeks,
        teams: Team::catalog(),
        games,
        picks,
    }
}

fn memory_calculator() -> PoolCalculator {
    let store = MemoryStore::from_fixture(fixture()).unwrap();
    PoolCalculator::new(Arc::new(store), Settings::default())
}

async fn sqlite_store() -> SqliteStore {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    let store = SqliteStore::from_pool(pool);
    store.migrate().await.unwrap();
    store.load_fixture(&fixture()).await.unwrap();
    store
}

fn names(users: &[User]) -> Vec<&str> {
    users.iter().map(|u| u.display_name.as_str()).collect()
}

async fn assert_bears_record(calculator: &PoolCalculator) {
    let at = kickoff(10) + Duration::days(1);
    let records = calculator.team_standings(at).await.unwrap();

    assert_eq!(records.len(), 32);
    let bears = &records[0];
    assert_eq!(bears.team.code, TeamCode::Chi);
    assert_eq!((bears.won, bears.lost, bears.tied), (3, 2, 0));
    assert_eq!((bears.points_for, bears.points_against, bears.points_diff), (61, 45, 16));
    assert!((bears.won_lost_ratio - 0.6).abs() < 1e-9);

    let points = calculator.team_points(at).await.unwrap();
    let order: Vec<_> = points.iter().take(3).map(|r| r.team.code).collect();
    assert_eq!(order, vec![TeamCode::Den, TeamCode::Chi, TeamCode::Dal]);
}

async fn assert_week_leaderboard(calculator: &PoolCalculator) {
    let tiers = calculator.week_leaderboard(2019, 11).await.unwrap();
    assert_eq!(tiers.len(), 3);
    assert_eq!((tiers[0].points, names(&tiers[0].users)), (4, vec!["Alice", "Bob"]));
    assert_eq!((tiers[1].points, names(&tiers[1].users)), (2, vec!["Carol"]));
    assert_eq!((tiers[2].points, names(&tiers[2].users)), (0, vec!["Dave"]));

    let ranking = calculator.week_ranking(2019, 11).await.unwrap();
    let ranks: Vec<_> = ranking.iter().map(|e| (e.user.display_name.as_str(), e.rank, e.tie_break)).collect();
    assert_eq!(
        ranks,
        vec![
            ("Alice", 1, Some(0)),
            ("Bob", 2, Some(16)),
            ("Carol", 3, Some(22)),
            ("Dave", 4, Some(44)),
        ]
    );
}

#[tokio::test]
async fn test_standings_from_memory() {
    assert_bears_record(&memory_calculator()).await;
}

#[tokio::test]
async fn test_week_leaderboard_from_memory() {
    assert_week_leaderboard(&memory_calculator()).await;
}

#[tokio::test]
async fn test_season_window_follows_current_week() {
    let calculator = memory_calculator();

    let summary = calculator.week_summary(kickoff(11)).await.unwrap();
    let current = summary.current.unwrap();
    assert_eq!(current.season_type(), SeasonType::Regular);
    assert_eq!(current.label.week, 6);

    // Week 11 is inside the window once it is current
    let season = calculator.season_leaderboard(kickoff(11)).await.unwrap();
    assert_eq!(season, calculator.week_leaderboard(2019, 11).await.unwrap());

    // ...and outside it while week 10 is current
    assert!(calculator.season_leaderboard(kickoff(10)).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_off_season_has_no_standings() {
    let calculator = memory_calculator();
    let at = Utc.with_ymd_and_hms(2019, 6, 1, 12, 0, 0).unwrap();

    let summary = calculator.week_summary(at).await.unwrap();
    assert!(summary.current.is_none());
    assert!(summary.window.is_off());
    assert!(calculator.team_standings(at).await.unwrap().is_empty());
    assert!(calculator.season_leaderboard(at).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_upcoming_and_latest_final_week() {
    let calculator = memory_calculator();

    let upcoming = calculator.upcoming_games(kickoff(10)).await.unwrap();
    assert_eq!(upcoming.len(), 4);
    assert!(upcoming.iter().all(|g| g.week == 11));

    assert_eq!(calculator.latest_final_week(2019).await.unwrap(), Some(11));
    assert_eq!(calculator.latest_final_week(2020).await.unwrap(), None);
}

#[tokio::test]
async fn test_week_picks_hidden_until_kickoff() {
    let calculator = memory_calculator();

    let before = calculator
        .week_picks(2019, 11, Some(3), week_start(11))
        .await
        .unwrap();
    assert_eq!(before.games.len(), 4);
    assert_eq!(before.entries.len(), 1);
    assert_eq!(before.entries[0].user.display_name, "Carol");
    assert_eq!(before.entries[0].picks.len(), 4);

    let after = calculator
        .week_picks(2019, 11, None, kickoff(11))
        .await
        .unwrap();
    assert_eq!(after.entries.len(), 4);
    assert!(after.entries.iter().all(|e| e.picks.len() == 4));
}

#[tokio::test]
async fn test_sqlite_store_matches_memory() {
    let store = sqlite_store().await;

    assert_eq!(store.years().await.unwrap()[0].layout, SeasonLayout::default());
    assert_eq!(store.weeks(2019).await.unwrap().len(), 12);
    assert_eq!(store.teams().await.unwrap().len(), 34);

    let calculator = PoolCalculator::new(Arc::new(store), Settings::default());
    assert_bears_record(&calculator).await;
    assert_week_leaderboard(&calculator).await;
}

#[tokio::test]
async fn test_sqlite_rejects_duplicate_pick() {
    let store = sqlite_store().await;
    let duplicate = Pick {
        id: 99,
        user: user(1, "Alice"),
        game_id: 11,
        selection: Selection::Home,
        picked_tie_break: 0,
    };

    let err = store.insert_pick(&duplicate).await.unwrap_err();
    assert!(matches!(err, PoolError::DuplicatePick { user_id: 1, game_id: 11 }));
}

#[tokio::test]
async fn test_sqlite_rejects_overlapping_week() {
    let store = sqlite_store().await;
    let overlapping = Week {
        id: 40,
        year: 2019,
        value: 13,
        start: week_start(12) + Duration::days(3),
        end: week_start(14),
    };

    let err = store.insert_week(&overlapping).await.unwrap_err();
    assert!(matches!(err, PoolError::InvalidWeek(_)));
}

/// Weeks 5-6 of 2019 with no stored season.
fn yearless_fixture() -> Fixture {
    let mut fixture = fixture();
    fixture.years.clear();
    fixture.weeks.retain(|w| w.value == 5 || w.value == 6);
    fixture.games.retain(|g| g.week == 6);
    fixture.picks.clear();
    fixture
}

/// A four-week preseason moves week 5 into the regular season.
fn short_preseason_settings() -> Settings {
    let mut settings = Settings::default();
    settings.season.default_layout = SeasonLayout {
        preseason_weeks: 4,
        regular_weeks: 18,
        postseason_weeks: 5,
    };
    settings
}

async fn assert_default_layout_applies(calculator: &PoolCalculator) {
    let summary = calculator.week_summary(kickoff(5)).await.unwrap();
    let current = summary.current.unwrap();
    assert_eq!(current.layout, short_preseason_settings().season.default_layout);
    assert_eq!((current.season_type(), current.label.week), (SeasonType::Regular, 1));

    let records = calculator.team_standings(kickoff(6) + Duration::days(1)).await.unwrap();
    let bears = records.iter().find(|r| r.team.code == TeamCode::Chi).unwrap();
    assert_eq!((bears.won, bears.points_for), (1, 20));
}

#[tokio::test]
async fn test_season_without_year_uses_default_layout_in_memory() {
    let store = MemoryStore::from_fixture(yearless_fixture()).unwrap();
    let calculator = PoolCalculator::new(Arc::new(store), short_preseason_settings());
    assert_default_layout_applies(&calculator).await;
}

#[tokio::test]
async fn test_season_without_year_uses_default_layout_in_sqlite() {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    let store = SqliteStore::from_pool(pool);
    store.migrate().await.unwrap();
    store.load_fixture(&yearless_fixture()).await.unwrap();
    assert!(store.years().await.unwrap().is_empty());

    let calculator = PoolCalculator::new(Arc::new(store), short_preseason_settings());
    assert_default_layout_applies(&calculator).await;
}

#[tokio::test]
async fn test_sqlite_game_with_unknown_team_is_not_found() {
    let store = sqlite_store().await;
    let mut stray = game(40, 12, CHI, GB, (0, 0));
    stray.visitor_team_id = 99;

    let err = store.insert_game(&stray).await.unwrap_err();
    assert!(matches!(err, PoolError::NotFound(_)));
}

#[tokio::test]
async fn test_sqlite_keeps_sub_second_times() {
    let store = sqlite_store().await;
    let mut late = game(41, 12, CHI, GB, (0, 0));
    late.kickoff = kickoff(12) + Duration::milliseconds(250);
    late.is_final = false;
    store.insert_game(&late).await.unwrap();

    let games = store
        .games(&pick_pool::store::GameFilter::for_week(2019, 12))
        .await
        .unwrap();
    assert_eq!(games[0].kickoff, late.kickoff);

    let week = store.week_at(week_start(12) + Duration::milliseconds(1)).await.unwrap();
    assert_eq!(week.map(|w| w.value), Some(12));
    assert_eq!(store.week(2019, 12).await.unwrap().unwrap().start, week_start(12));
}
