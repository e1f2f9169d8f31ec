use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};
use std::str::FromStr;
use tracing::{debug, info};

use crate::config::DatabaseSettings;
use crate::models::{
    City, Game, Pick, PoolError, Result, SeasonLayout, Selection, Stadium, Team, TeamCode, User,
    Week, Year,
};
use super::{validate_game, validate_week, validate_year, Fixture, GameFilter, PoolReader};

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS years (
        value INTEGER PRIMARY KEY,
        start_ms INTEGER NOT NULL,
        end_ms INTEGER NOT NULL,
        preseason_weeks INTEGER NOT NULL,
        regular_weeks INTEGER NOT NULL,
        postseason_weeks INTEGER NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS weeks (
        id INTEGER PRIMARY KEY,
        year INTEGER NOT NULL,
        value INTEGER NOT NULL,
        start_ms INTEGER NOT NULL,
        end_ms INTEGER NOT NULL,
        UNIQUE (year, value),
        CHECK (start_ms < end_ms)
    )",
    "CREATE TABLE IF NOT EXISTS teams (
        id INTEGER PRIMARY KEY,
        code TEXT NOT NULL UNIQUE,
        city TEXT NOT NULL,
        stadium TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY,
        display_name TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS games (
        id INTEGER PRIMARY KEY,
        week_id INTEGER NOT NULL REFERENCES weeks(id),
        kickoff_ms INTEGER NOT NULL,
        home_team_id INTEGER NOT NULL REFERENCES teams(id),
        visitor_team_id INTEGER NOT NULL REFERENCES teams(id),
        home_score INTEGER,
        visitor_score INTEGER,
        is_final INTEGER NOT NULL DEFAULT 0,
        CHECK (home_team_id <> visitor_team_id)
    )",
    "CREATE TABLE IF NOT EXISTS picks (
        id INTEGER PRIMARY KEY,
        user_id INTEGER NOT NULL REFERENCES users(id),
        game_id INTEGER NOT NULL REFERENCES games(id),
        selection INTEGER NOT NULL DEFAULT 0,
        picked_tie_break INTEGER NOT NULL DEFAULT 0,
        UNIQUE (user_id, game_id)
    )",
];

const GAME_COLUMNS: &str = "SELECT g.id, g.week_id, w.year, w.value AS week, g.kickoff_ms, \
     g.home_team_id, g.visitor_team_id, g.home_score, g.visitor_score, g.is_final \
     FROM games g JOIN weeks w ON w.id = g.week_id";

const WEEK_COLUMNS: &str = "SELECT id, year, value, start_ms, end_ms FROM weeks";

pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub async fn connect(settings: &DatabaseSettings) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(&settings.url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(settings.max_connections)
            .connect_with(options)
            .await?;
        info!("Connected to {}", settings.url);
        Ok(Self { pool })
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn migrate(&self) -> Result<()> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        debug!("Schema ready");
        Ok(())
    }

    pub async fn load_fixture(&self, fixture: &Fixture) -> Result<()> {
        for year in &fixture.years {
            self.insert_year(year).await?;
        }
        for week in &fixture.weeks {
            self.insert_week(week).await?;
        }
        for team in &fixture.teams {
            self.insert_team(team).await?;
        }
        for game in &fixture.games {
            self.insert_game(game).await?;
        }
        for pick in &fixture.picks {
            self.insert_pick(pick).await?;
        }
        info!(
            "Loaded fixture: {} games, {} picks",
            fixture.games.len(),
            fixture.picks.len()
        );
        Ok(())
    }

    pub async fn insert_year(&self, year: &Year) -> Result<()> {
        validate_year(year)?;
        sqlx::query(
            "INSERT OR REPLACE INTO years \
             (value, start_ms, end_ms, preseason_weeks, regular_weeks, postseason_weeks) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(year.value)
        .bind(year.start.timestamp_millis())
        .bind(year.end.timestamp_millis())
        .bind(year.layout.preseason_weeks as i64)
        .bind(year.layout.regular_weeks as i64)
        .bind(year.layout.postseason_weeks as i64)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn insert_week(&self, week: &Week) -> Result<()> {
        let existing = self.weeks(week.year).await?;
        if existing.iter().any(|w| w.value == week.value) {
            return Err(PoolError::InvalidWeek(format!(
                "week {} of {} already exists",
                week.value, week.year
            )));
        }
        validate_week(week, &existing)?;

        sqlx::query("INSERT INTO weeks (id, year, value, start_ms, end_ms) VALUES (?, ?, ?, ?, ?)")
            .bind(week.id)
            .bind(week.year)
            .bind(week.value as i64)
            .bind(week.start.timestamp_millis())
            .bind(week.end.timestamp_millis())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn insert_team(&self, team: &Team) -> Result<()> {
        sqlx::query("INSERT OR REPLACE INTO teams (id, code, city, stadium) VALUES (?, ?, ?, ?)")
            .bind(team.id)
            .bind(enum_code(&team.code)?)
            .bind(enum_code(&team.city)?)
            .bind(enum_code(&team.stadium)?)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn insert_user(&self, user: &User) -> Result<()> {
        sqlx::query("INSERT INTO users (id, display_name) VALUES (?, ?) \
                     ON CONFLICT (id) DO UPDATE SET display_name = excluded.display_name")
            .bind(user.id)
            .bind(&user.display_name)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn insert_game(&self, game: &Game) -> Result<()> {
        validate_game(game)?;
        let known_week = sqlx::query("SELECT id FROM weeks WHERE id = ?")
            .bind(game.week_id)
            .fetch_optional(&self.pool)
            .await?;
        if known_week.is_none() {
            return Err(PoolError::NotFound(format!("week {} for game {}", game.week_id, game.id)));
        }
        for team_id in [game.home_team_id, game.visitor_team_id] {
            let known_team = sqlx::query("SELECT id FROM teams WHERE id = ?")
                .bind(team_id)
                .fetch_optional(&self.pool)
                .await?;
            if known_team.is_none() {
                return Err(PoolError::NotFound(format!("team {} for game {}", team_id, game.id)));
            }
        }

        sqlx::query(
            "INSERT OR REPLACE INTO games \
             (id, week_id, kickoff_ms, home_team_id, visitor_team_id, home_score, visitor_score, is_final) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(game.id)
        .bind(game.week_id)
        .bind(game.kickoff.timestamp_millis())
        .bind(game.home_team_id)
        .bind(game.visitor_team_id)
        .bind(game.home_score.map(i64::from))
        .bind(game.visitor_score.map(i64::from))
        .bind(game.is_final)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn insert_pick(&self, pick: &Pick) -> Result<()> {
        let known_game = sqlx::query("SELECT id FROM games WHERE id = ?")
            .bind(pick.game_id)
            .fetch_optional(&self.pool)
            .await?;
        if known_game.is_none() {
            return Err(PoolError::NotFound(format!("game {} for pick {}", pick.game_id, pick.id)));
        }
        self.insert_user(&pick.user).await?;

        let inserted = sqlx::query(
            "INSERT INTO picks (id, user_id, game_id, selection, picked_tie_break) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(pick.id)
        .bind(pick.user.id)
        .bind(pick.game_id)
        .bind(pick.selection.code())
        .bind(pick.picked_tie_break as i64)
        .execute(&self.pool)
        .await;

        match inserted {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(PoolError::DuplicatePick {
                user_id: pick.user.id,
                game_id: pick.game_id,
            }),
            Err(e) => Err(e.into()),
        }
    }
}

fn enum_code<T: serde::Serialize>(value: &T) -> Result<String> {
    match serde_json::to_value(value)? {
        serde_json::Value::String(code) => Ok(code),
        other => Err(PoolError::Config(format!("expected a string code, got {}", other))),
    }
}

fn parse_code<T: serde::de::DeserializeOwned>(code: String) -> Result<T> {
    Ok(serde_json::from_value(serde_json::Value::String(code))?)
}

fn decode_u16(row: &SqliteRow, column: &str) -> Result<u16> {
    let raw: i64 = row.try_get(column)?;
    u16::try_from(raw).map_err(|e| PoolError::Database(sqlx::Error::Decode(Box::new(e))))
}

fn decode_opt_u16(row: &SqliteRow, column: &str) -> Result<Option<u16>> {
    let raw: Option<i64> = row.try_get(column)?;
    raw.map(|v| u16::try_from(v).map_err(|e| PoolError::Database(sqlx::Error::Decode(Box::new(e)))))
        .transpose()
}

fn decode_timestamp(row: &SqliteRow, column: &str) -> Result<DateTime<Utc>> {
    let millis: i64 = row.try_get(column)?;
    DateTime::from_timestamp_millis(millis).ok_or_else(|| {
        PoolError::Database(sqlx::Error::Decode(format!("timestamp {} out of range", millis).into()))
    })
}

fn year_from_row(row: &SqliteRow) -> Result<Year> {
    Ok(Year {
        value: row.try_get("value")?,
        start: decode_timestamp(row, "start_ms")?,
        end: decode_timestamp(row, "end_ms")?,
        layout: SeasonLayout {
            preseason_weeks: decode_u16(row, "preseason_weeks")?,
            regular_weeks: decode_u16(row, "regular_weeks")?,
            postseason_weeks: decode_u16(row, "postseason_weeks")?,
        },
    })
}

fn week_from_row(row: &SqliteRow) -> Result<Week> {
    Ok(Week {
        id: row.try_get("id")?,
        year: row.try_get("year")?,
        value: decode_u16(row, "value")?,
        start: decode_timestamp(row, "start_ms")?,
        end: decode_timestamp(row, "end_ms")?,
    })
}

fn team_from_row(row: &SqliteRow) -> Result<Team> {
    Ok(Team {
        id: row.try_get("id")?,
        code: parse_code::<TeamCode>(row.try_get("code")?)?,
        city: parse_code::<City>(row.try_get("city")?)?,
        stadium: parse_code::<Stadium>(row.try_get("stadium")?)?,
    })
}

fn game_from_row(row: &SqliteRow) -> Result<Game> {
    Ok(Game {
        id: row.try_get("id")?,
        week_id: row.try_get("week_id")?,
        year: row.try_get("year")?,
        week: decode_u16(row, "week")?,
        kickoff: decode_timestamp(row, "kickoff_ms")?,
        home_team_id: row.try_get("home_team_id")?,
        visitor_team_id: row.try_get("visitor_team_id")?,
        home_score: decode_opt_u16(row, "home_score")?,
        visitor_score: decode_opt_u16(row, "visitor_score")?,
        is_final: row.try_get("is_final")?,
    })
}

fn pick_from_row(row: &SqliteRow) -> Result<Pick> {
    let tie_break: i64 = row.try_get("picked_tie_break")?;
    Ok(Pick {
        id: row.try_get("id")?,
        user: User {
            id: row.try_get("user_id")?,
            display_name: row.try_get("display_name")?,
        },
        game_id: row.try_get("game_id")?,
        selection: Selection::from_code(row.try_get("selection")?),
        picked_tie_break: u32::try_from(tie_break)
            .map_err(|e| PoolError::Database(sqlx::Error::Decode(Box::new(e))))?,
    })
}

#[async_trait]
impl PoolReader for SqliteStore {
    async fn years(&self) -> Result<Vec<Year>> {
        let rows = sqlx::query("SELECT * FROM years ORDER BY value")
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(year_from_row).collect()
    }

    async fn year(&self, value: i32) -> Result<Option<Year>> {
        let row = sqlx::query("SELECT * FROM years WHERE value = ?")
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(year_from_row).transpose()
    }

    async fn weeks(&self, year: i32) -> Result<Vec<Week>> {
        let rows = sqlx::query(&format!("{} WHERE year = ? ORDER BY value", WEEK_COLUMNS))
            .bind(year)
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(week_from_row).collect()
    }

    async fn week(&self, year: i32, value: u16) -> Result<Option<Week>> {
        let row = sqlx::query(&format!("{} WHERE year = ? AND value = ?", WEEK_COLUMNS))
            .bind(year)
            .bind(value as i64)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(week_from_row).transpose()
    }

    async fn week_at(&self, at: DateTime<Utc>) -> Result<Option<Week>> {
        let ts = at.timestamp_millis();
        let row = sqlx::query(&format!(
            "{} WHERE start_ms <= ? AND ? < end_ms ORDER BY year, value LIMIT 1",
            WEEK_COLUMNS
        ))
        .bind(ts)
        .bind(ts)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(week_from_row).transpose()
    }

    async fn teams(&self) -> Result<Vec<Team>> {
        let rows = sqlx::query("SELECT id, code, city, stadium FROM teams ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(team_from_row).collect()
    }

    async fn games(&self, filter: &GameFilter) -> Result<Vec<Game>> {
        let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(GAME_COLUMNS);
        query.push(" WHERE 1 = 1");
        if let Some(year) = filter.year {
            query.push(" AND w.year = ").push_bind(year);
        }
        if let Some(week) = filter.week {
            query.push(" AND w.value = ").push_bind(week as i64);
        }
        if let Some(first) = filter.first_week {
            query.push(" AND w.value >= ").push_bind(first as i64);
        }
        if let Some(last) = filter.last_week {
            query.push(" AND w.value <= ").push_bind(last as i64);
        }
        if let Some(team_id) = filter.team_id {
            query
                .push(" AND (g.home_team_id = ")
                .push_bind(team_id)
                .push(" OR g.visitor_team_id = ")
                .push_bind(team_id)
                .push(")");
        }
        if filter.final_only {
            query.push(" AND g.is_final = 1");
        }
        query.push(" ORDER BY g.kickoff_ms, g.home_team_id, g.id");

        let rows = query.build().fetch_all(&self.pool).await?;
        debug!("Fetched {} games for {:?}", rows.len(), filter);
        rows.iter().map(game_from_row).collect()
    }

    async fn picks_for_games(&self, game_ids: &[i64]) -> Result<Vec<Pick>> {
        if game_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(
            "SELECT p.id, p.user_id, u.display_name, p.game_id, p.selection, p.picked_tie_break \
             FROM picks p JOIN users u ON u.id = p.user_id WHERE p.game_id IN (",
        );
        let mut ids = query.separated(", ");
        for id in game_ids {
            ids.push_bind(*id);
        }
        query.push(") ORDER BY p.id");

        let rows = query.build().fetch_all(&self.pool).await?;
        rows.iter().map(pick_from_row).collect()
    }
}
