use crate::{
    calendar::{self, CurrentWeek, SeasonWindow},
    config::Settings,
    models::{Game, LeaderboardTier, Pick, RankedEntry, Result, TeamRecord, User},
    scoring::{leaderboard, standings},
    store::{GameFilter, PoolReader},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Where the league stands at an instant.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WeekSummary {
    pub season: i32,
    pub current: Option<CurrentWeek>,
    pub window: SeasonWindow,
}

/// One user's visible picks for a week, in game order.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UserPicks {
    pub user: User,
    pub picks: Vec<Pick>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WeekPicks {
    pub games: Vec<Game>,
    pub entries: Vec<UserPicks>,
}

/// Composes the calendar, scoring and standings functions over a reader.
pub struct PoolCalculator {
    reader: Arc<dyn PoolReader>,
    settings: Settings,
}

impl PoolCalculator {
    pub fn new(reader: Arc<dyn PoolReader>, settings: Settings) -> Self {
        Self { reader, settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub async fn current_week(&self, at: DateTime<Utc>) -> Result<Option<CurrentWeek>> {
        let Some(week) = self.reader.week_at(at).await? else {
            debug!("No week contains {}", at);
            return Ok(None);
        };
        let years = self.reader.year(week.year).await?.into_iter().collect::<Vec<_>>();
        Ok(calendar::current_week(
            &years,
            std::slice::from_ref(&week),
            at,
            self.settings.season.default_layout,
        ))
    }

    pub async fn season_window(&self, at: DateTime<Utc>) -> Result<SeasonWindow> {
        let current = self.current_week(at).await?;
        Ok(SeasonWindow::resolve(current.as_ref()))
    }

    pub async fn week_summary(&self, at: DateTime<Utc>) -> Result<WeekSummary> {
        let current = self.current_week(at).await?;
        let season = current
            .as_ref()
            .map(|c| c.year())
            .unwrap_or_else(|| calendar::season_for_date(at.date_naive()));
        let window = SeasonWindow::resolve(current.as_ref());
        Ok(WeekSummary { season, current, window })
    }

    async fn window_games(&self, window: &SeasonWindow, final_only: bool) -> Result<Vec<Game>> {
        let SeasonWindow::Season { year, first_week, last_week } = *window else {
            return Ok(Vec::new());
        };
        let mut filter = GameFilter::for_weeks(year, first_week, last_week);
        filter.final_only = final_only;
        self.reader.games(&filter).await
    }

    async fn records(&self, at: DateTime<Utc>) -> Result<Vec<TeamRecord>> {
        let window = self.season_window(at).await?;
        if window.is_off() {
            info!("Off season at {}, no standings", at);
            return Ok(Vec::new());
        }

        let (teams, games) = futures::try_join!(self.reader.teams(), self.window_games(&window, true))?;
        debug!("Computing standings for {} teams over {} games", teams.len(), games.len());
        Ok(standings::team_records(&teams, &games, &window))
    }

    /// Season-to-date records ordered by `(won, tied, lost)`.
    pub async fn team_standings(&self, at: DateTime<Utc>) -> Result<Vec<TeamRecord>> {
        let mut records = self.records(at).await?;
        standings::sort_standings(&mut records);
        Ok(records)
    }

    /// Season-to-date records ordered by point differential.
    pub async fn team_points(&self, at: DateTime<Utc>) -> Result<Vec<TeamRecord>> {
        let mut records = self.records(at).await?;
        standings::sort_by_points(&mut records);
        Ok(records)
    }

    async fn games_and_picks(&self, games: Vec<Game>) -> Result<(Vec<Game>, Vec<Pick>)> {
        let ids: Vec<i64> = games.iter().map(|g| g.id).collect();
        let picks = self.reader.picks_for_games(&ids).await?;
        debug!("Evaluating {} picks over {} games", picks.len(), games.len());
        Ok((games, picks))
    }

    async fn week_scope(&self, year: i32, week: u16) -> Result<(Vec<Game>, Vec<Pick>)> {
        let games = self.reader.games(&GameFilter::for_week(year, week)).await?;
        self.games_and_picks(games).await
    }

    async fn season_scope(&self, at: DateTime<Utc>) -> Result<(Vec<Game>, Vec<Pick>)> {
        let window = self.season_window(at).await?;
        let games = self.window_games(&window, false).await?;
        self.games_and_picks(games).await
    }

    pub async fn week_leaderboard(&self, year: i32, week: u16) -> Result<Vec<LeaderboardTier>> {
        info!("Evaluating week {} of {}", week, year);
        let (games, picks) = self.week_scope(year, week).await?;
        Ok(leaderboard::evaluate(&games, &picks))
    }

    pub async fn season_leaderboard(&self, at: DateTime<Utc>) -> Result<Vec<LeaderboardTier>> {
        let (games, picks) = self.season_scope(at).await?;
        Ok(leaderboard::evaluate(&games, &picks))
    }

    pub async fn week_ranking(&self, year: i32, week: u16) -> Result<Vec<RankedEntry>> {
        let (games, picks) = self.week_scope(year, week).await?;
        Ok(leaderboard::rank(&games, &picks))
    }

    pub async fn season_ranking(&self, at: DateTime<Utc>) -> Result<Vec<RankedEntry>> {
        let (games, picks) = self.season_scope(at).await?;
        Ok(leaderboard::rank(&games, &picks))
    }

    /// Games of the week after the current one.
    pub async fn upcoming_games(&self, at: DateTime<Utc>) -> Result<Vec<Game>> {
        let Some(current) = self.current_week(at).await? else {
            return Ok(Vec::new());
        };
        self.reader
            .games(&GameFilter::for_week(current.year(), current.value() + 1))
            .await
    }

    /// Highest week ordinal of a season with at least one final game.
    pub async fn latest_final_week(&self, year: i32) -> Result<Option<u16>> {
        let games = self.reader.games(&GameFilter::for_year(year).final_only()).await?;
        Ok(games.iter().map(|g| g.week).max())
    }

    /// Fill in an unspecified season or week. The current week is only used
    /// when it belongs to the requested season; otherwise the season's latest
    /// week with a final game is taken. `None` when nothing qualifies.
    pub async fn resolve_week(
        &self,
        year: Option<i32>,
        week: Option<u16>,
        at: DateTime<Utc>,
    ) -> Result<Option<(i32, u16)>> {
        let current = self.current_week(at).await?;
        let year = year
            .or_else(|| current.as_ref().map(|c| c.year()))
            .unwrap_or_else(|| calendar::season_for_date(at.date_naive()));

        let week = match (week, current) {
            (Some(week), _) => Some(week),
            (None, Some(current)) if current.year() == year => Some(current.value()),
            (None, _) => self.latest_final_week(year).await?,
        };
        Ok(week.map(|week| (year, week)))
    }

    pub async fn week_picks(
        &self,
        year: i32,
        week: u16,
        viewer: Option<i64>,
        at: DateTime<Utc>,
    ) -> Result<WeekPicks> {
        let (games, picks) = self.week_scope(year, week).await?;
        let entries = visible_picks(&games, picks, viewer, at);
        Ok(WeekPicks { games, entries })
    }
}

/// Group a week's picks by user, hiding picks on games that have not kicked
/// off yet from everyone but their owner. Once the week's last game has
/// started every pick is public.
pub fn visible_picks(
    games: &[Game],
    picks: Vec<Pick>,
    viewer: Option<i64>,
    at: DateTime<Utc>,
) -> Vec<UserPicks> {
    let by_id: BTreeMap<i64, &Game> = games.iter().map(|g| (g.id, g)).collect();

    let mut by_user: BTreeMap<(String, i64), UserPicks> = BTreeMap::new();
    for pick in picks {
        let Some(game) = by_id.get(&pick.game_id) else {
            continue;
        };
        let own = viewer == Some(pick.user.id);
        if !own && !game.has_started(at) {
            continue;
        }
        by_user
            .entry((pick.user.display_name.clone(), pick.user.id))
            .or_insert_with(|| UserPicks {
                user: pick.user.clone(),
                picks: Vec::new(),
            })
            .picks
            .push(pick);
    }

    by_user
        .into_values()
        .map(|mut entry| {
            entry.picks.sort_by_key(|p| by_id.get(&p.game_id).map(|g| (g.kickoff, g.home_team_id)));
            entry
        })
        .collect()
}
