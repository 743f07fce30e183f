//! Database query operations feeding the scoring and analysis layers

use super::{models::*, schema::AssessmentDatabase};
use crate::analysis::SessionData;
use crate::cli::types::{AssessmentType, Handedness, PlayerId, SessionId, TeamId};
use crate::scoring::power::VERTICAL_JUMP_CODE;
use crate::scoring::session::SessionResults;
use anyhow::{anyhow, bail, Result};
use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension, Row};
use std::collections::BTreeMap;

fn parse_date(text: &str) -> Result<NaiveDate> {
    text.parse::<NaiveDate>()
        .map_err(|e| anyhow!("invalid stored date {text:?}: {e}"))
}

type RawSession = (SessionId, PlayerId, String, String, bool);

fn session_from_row(row: &Row<'_>) -> rusqlite::Result<RawSession> {
    Ok((
        SessionId::new(row.get(0)?),
        PlayerId::new(row.get(1)?),
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
    ))
}

impl AssessmentDatabase {
    fn build_session(&self, raw: RawSession) -> Result<SessionRow> {
        let (session_id, player_id, type_tag, date_text, is_complete) = raw;
        Ok(SessionRow {
            session_id,
            player_id,
            assessment_type: type_tag.parse()?,
            assessment_date: parse_date(&date_text)?,
            is_complete,
        })
    }

    /// Create a team; team names are unique.
    pub fn add_team(&mut self, name: &str, organization: Option<&str>) -> Result<Team> {
        self.conn.execute(
            "INSERT INTO teams (name, organization) VALUES (?, ?)",
            params![name, organization],
        )?;
        Ok(Team {
            team_id: TeamId::new(self.conn.last_insert_rowid()),
            name: name.to_string(),
            organization: organization.map(str::to_string),
        })
    }

    pub fn team_by_name(&self, name: &str) -> Result<Option<Team>> {
        let team = self
            .conn
            .query_row(
                "SELECT team_id, name, organization FROM teams WHERE name = ?",
                params![name],
                |row| {
                    Ok(Team {
                        team_id: TeamId::new(row.get(0)?),
                        name: row.get(1)?,
                        organization: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(team)
    }

    pub fn list_teams(&self) -> Result<Vec<Team>> {
        let mut stmt = self
            .conn
            .prepare("SELECT team_id, name, organization FROM teams ORDER BY name")?;
        let rows = stmt.query_map([], |row| {
            Ok(Team {
                team_id: TeamId::new(row.get(0)?),
                name: row.get(1)?,
                organization: row.get(2)?,
            })
        })?;

        let mut teams = Vec::new();
        for row in rows {
            teams.push(row?);
        }
        Ok(teams)
    }

    pub fn add_player(
        &mut self,
        name: &str,
        team_id: Option<TeamId>,
        throws: Handedness,
        is_pitcher: bool,
    ) -> Result<Player> {
        self.conn.execute(
            "INSERT INTO players (team_id, name, throws, is_pitcher, active)
             VALUES (?, ?, ?, ?, 1)",
            params![
                team_id.map(|t| t.as_i64()),
                name,
                throws.as_str(),
                is_pitcher
            ],
        )?;
        Ok(Player {
            player_id: PlayerId::new(self.conn.last_insert_rowid()),
            team_id,
            name: name.to_string(),
            throws,
            is_pitcher,
            active: true,
        })
    }

    fn player_from_row(row: &Row<'_>) -> rusqlite::Result<(Player, Option<String>)> {
        let throws_text: String = row.get(3)?;
        let throws = throws_text.parse::<Handedness>().unwrap_or(Handedness::Right);
        Ok((
            Player {
                player_id: PlayerId::new(row.get(0)?),
                team_id: row.get::<_, Option<i64>>(1)?.map(TeamId::new),
                name: row.get(2)?,
                throws,
                is_pitcher: row.get(4)?,
                active: row.get(5)?,
            },
            row.get(6)?,
        ))
    }

    const PLAYER_SELECT: &'static str =
        "SELECT p.player_id, p.team_id, p.name, p.throws, p.is_pitcher, p.active, t.name
         FROM players p LEFT JOIN teams t ON p.team_id = t.team_id";

    pub fn get_player(&self, player_id: PlayerId) -> Result<Option<(Player, Option<String>)>> {
        let player = self
            .conn
            .query_row(
                &format!("{} WHERE p.player_id = ?", Self::PLAYER_SELECT),
                params![player_id.as_i64()],
                Self::player_from_row,
            )
            .optional()?;
        Ok(player)
    }

    /// Players on a team (active only when `active_only`), in roster order.
    pub fn list_players(
        &self,
        team_id: Option<TeamId>,
        active_only: bool,
    ) -> Result<Vec<(Player, Option<String>)>> {
        let mut query = Self::PLAYER_SELECT.to_string();
        let mut clauses = Vec::new();
        let mut args: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(team_id) = team_id {
            clauses.push("p.team_id = ?");
            args.push(Box::new(team_id.as_i64()));
        }
        if active_only {
            clauses.push("p.active = 1");
        }
        if !clauses.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&clauses.join(" AND "));
        }
        query.push_str(" ORDER BY p.player_id");

        let mut stmt = self.conn.prepare(&query)?;
        let arg_refs: Vec<&dyn rusqlite::ToSql> = args.iter().map(|a| a.as_ref()).collect();
        let rows = stmt.query_map(&arg_refs[..], Self::player_from_row)?;

        let mut players = Vec::new();
        for row in rows {
            players.push(row?);
        }
        Ok(players)
    }

    /// Fetch the session for (player, type, date), creating it open if absent.
    pub fn get_or_create_session(
        &mut self,
        player_id: PlayerId,
        assessment_type: AssessmentType,
        date: NaiveDate,
    ) -> Result<SessionRow> {
        let existing = self
            .conn
            .query_row(
                "SELECT session_id, player_id, assessment_type, assessment_date, is_complete
                 FROM sessions
                 WHERE player_id = ? AND assessment_type = ? AND assessment_date = ?",
                params![player_id.as_i64(), assessment_type.as_str(), date.to_string()],
                session_from_row,
            )
            .optional()?;

        if let Some(raw) = existing {
            return self.build_session(raw);
        }

        self.conn.execute(
            "INSERT INTO sessions (player_id, assessment_type, assessment_date, is_complete)
             VALUES (?, ?, ?, 0)",
            params![player_id.as_i64(), assessment_type.as_str(), date.to_string()],
        )?;
        Ok(SessionRow {
            session_id: SessionId::new(self.conn.last_insert_rowid()),
            player_id,
            assessment_type,
            assessment_date: date,
            is_complete: false,
        })
    }

    pub fn get_session(&self, session_id: SessionId) -> Result<Option<SessionRow>> {
        let raw = self
            .conn
            .query_row(
                "SELECT session_id, player_id, assessment_type, assessment_date, is_complete
                 FROM sessions WHERE session_id = ?",
                params![session_id.as_i64()],
                session_from_row,
            )
            .optional()?;
        raw.map(|raw| self.build_session(raw)).transpose()
    }

    pub fn mark_session_complete(&mut self, session_id: SessionId) -> Result<()> {
        let updated = self.conn.execute(
            "UPDATE sessions SET is_complete = 1 WHERE session_id = ?",
            params![session_id.as_i64()],
        )?;
        if updated == 0 {
            bail!("session not found: {session_id}");
        }
        Ok(())
    }

    /// Insert an already-scored result.
    ///
    /// Duplicate (test_code, side) within a session is rejected; the intake
    /// caller decides whether to re-record via [`Self::update_result`].
    pub fn insert_result(&mut self, session_id: SessionId, result: &StoredResult) -> Result<()> {
        let exists: Option<i64> = self
            .conn
            .query_row(
                "SELECT result_id FROM results
                 WHERE session_id = ? AND test_code = ? AND side = ?",
                params![session_id.as_i64(), result.test_code(), result.side_key()],
                |row| row.get(0),
            )
            .optional()?;
        if exists.is_some() {
            bail!(
                "result already exists for test {} on this session and side",
                result.test_code()
            );
        }

        self.conn.execute(
            "INSERT INTO results (session_id, test_code, side, payload) VALUES (?, ?, ?, ?)",
            params![
                session_id.as_i64(),
                result.test_code(),
                result.side_key(),
                serde_json::to_string(result)?
            ],
        )?;
        Ok(())
    }

    /// Fetch one stored result by its uniqueness key.
    pub fn get_result(
        &self,
        session_id: SessionId,
        test_code: &str,
        side_key: &str,
    ) -> Result<Option<StoredResult>> {
        let payload: Option<String> = self
            .conn
            .query_row(
                "SELECT payload FROM results
                 WHERE session_id = ? AND test_code = ? AND side = ?",
                params![session_id.as_i64(), test_code, side_key],
                |row| row.get(0),
            )
            .optional()?;
        payload
            .map(|text| serde_json::from_str(&text).map_err(Into::into))
            .transpose()
    }

    /// Replace a result's payload, re-derived by the caller from the new raw
    /// value. The (test_code, side) key must already exist.
    pub fn update_result(&mut self, session_id: SessionId, result: &StoredResult) -> Result<()> {
        let updated = self.conn.execute(
            "UPDATE results SET payload = ?
             WHERE session_id = ? AND test_code = ? AND side = ?",
            params![
                serde_json::to_string(result)?,
                session_id.as_i64(),
                result.test_code(),
                result.side_key()
            ],
        )?;
        if updated == 0 {
            bail!(
                "no existing result for test {} on this session and side",
                result.test_code()
            );
        }
        Ok(())
    }

    /// All stored results of a session, assembled into the typed result set.
    pub fn session_results(
        &self,
        session_id: SessionId,
        assessment_type: AssessmentType,
    ) -> Result<SessionResults> {
        let mut stmt = self
            .conn
            .prepare("SELECT payload FROM results WHERE session_id = ? ORDER BY result_id")?;
        let rows = stmt.query_map(params![session_id.as_i64()], |row| {
            row.get::<_, String>(0)
        })?;

        let mut stored = Vec::new();
        for row in rows {
            stored.push(serde_json::from_str::<StoredResult>(&row?)?);
        }
        assemble_results(assessment_type, stored)
    }

    /// The session's vertical jump value (test code TPI-01), if recorded.
    /// Relative power tests score against this.
    pub fn session_vertical_jump(&self, session_id: SessionId) -> Result<Option<f64>> {
        let payload: Option<String> = self
            .conn
            .query_row(
                "SELECT payload FROM results WHERE session_id = ? AND test_code = ?",
                params![session_id.as_i64(), VERTICAL_JUMP_CODE],
                |row| row.get(0),
            )
            .optional()?;

        match payload {
            Some(text) => match serde_json::from_str::<StoredResult>(&text)? {
                StoredResult::Power(result) => Ok(Some(result.result_value)),
                _ => bail!("vertical jump payload is not a power result"),
            },
            None => Ok(None),
        }
    }

    fn load_session_data(&self, raw_rows: Vec<RawSession>) -> Result<Vec<SessionData>> {
        let mut sessions = Vec::with_capacity(raw_rows.len());
        for raw in raw_rows {
            let row = self.build_session(raw)?;
            let results = self.session_results(row.session_id, row.assessment_type)?;
            sessions.push(SessionData {
                session_id: row.session_id,
                player_id: row.player_id,
                date: row.assessment_date,
                results,
            });
        }
        Ok(sessions)
    }

    /// A player's completed sessions of one type within a date range,
    /// ordered by date ascending.
    pub fn completed_sessions(
        &self,
        player_id: PlayerId,
        assessment_type: AssessmentType,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<SessionData>> {
        let mut query = String::from(
            "SELECT session_id, player_id, assessment_type, assessment_date, is_complete
             FROM sessions
             WHERE player_id = ? AND assessment_type = ? AND is_complete = 1",
        );
        let mut args: Vec<Box<dyn rusqlite::ToSql>> = vec![
            Box::new(player_id.as_i64()),
            Box::new(assessment_type.as_str()),
        ];

        if let Some(start) = start {
            query.push_str(" AND assessment_date >= ?");
            args.push(Box::new(start.to_string()));
        }
        if let Some(end) = end {
            query.push_str(" AND assessment_date <= ?");
            args.push(Box::new(end.to_string()));
        }
        query.push_str(" ORDER BY assessment_date");

        let mut stmt = self.conn.prepare(&query)?;
        let arg_refs: Vec<&dyn rusqlite::ToSql> = args.iter().map(|a| a.as_ref()).collect();
        let rows = stmt.query_map(&arg_refs[..], session_from_row)?;

        let mut raw_rows = Vec::new();
        for row in rows {
            raw_rows.push(row?);
        }
        self.load_session_data(raw_rows)
    }

    /// The most recent completed session of one type at/before the cutoff.
    pub fn latest_completed_session(
        &self,
        player_id: PlayerId,
        assessment_type: AssessmentType,
        as_of: Option<NaiveDate>,
    ) -> Result<Option<SessionData>> {
        let mut query = String::from(
            "SELECT session_id, player_id, assessment_type, assessment_date, is_complete
             FROM sessions
             WHERE player_id = ? AND assessment_type = ? AND is_complete = 1",
        );
        let mut args: Vec<Box<dyn rusqlite::ToSql>> = vec![
            Box::new(player_id.as_i64()),
            Box::new(assessment_type.as_str()),
        ];
        if let Some(as_of) = as_of {
            query.push_str(" AND assessment_date <= ?");
            args.push(Box::new(as_of.to_string()));
        }
        query.push_str(" ORDER BY assessment_date DESC LIMIT 1");

        let arg_refs: Vec<&dyn rusqlite::ToSql> = args.iter().map(|a| a.as_ref()).collect();
        let raw = self
            .conn
            .query_row(&query, &arg_refs[..], session_from_row)
            .optional()?;

        match raw {
            Some(raw) => Ok(self.load_session_data(vec![raw])?.pop()),
            None => Ok(None),
        }
    }

    /// Each assessment type's most recent completed session for a player.
    /// Types with no completed session are absent.
    pub fn latest_sessions(&self, player_id: PlayerId) -> Result<Vec<SessionData>> {
        let mut sessions = Vec::new();
        for assessment_type in AssessmentType::ALL {
            if let Some(session) = self.latest_completed_session(player_id, assessment_type, None)? {
                sessions.push(session);
            }
        }
        Ok(sessions)
    }

    /// Completed sessions of one type across every player on a team.
    pub fn team_completed_sessions(
        &self,
        team_id: TeamId,
        assessment_type: AssessmentType,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<SessionData>> {
        let mut query = String::from(
            "SELECT s.session_id, s.player_id, s.assessment_type, s.assessment_date, s.is_complete
             FROM sessions s
             JOIN players p ON s.player_id = p.player_id
             WHERE p.team_id = ? AND s.assessment_type = ? AND s.is_complete = 1",
        );
        let mut args: Vec<Box<dyn rusqlite::ToSql>> = vec![
            Box::new(team_id.as_i64()),
            Box::new(assessment_type.as_str()),
        ];
        if let Some(start) = start {
            query.push_str(" AND s.assessment_date >= ?");
            args.push(Box::new(start.to_string()));
        }
        if let Some(end) = end {
            query.push_str(" AND s.assessment_date <= ?");
            args.push(Box::new(end.to_string()));
        }
        query.push_str(" ORDER BY s.assessment_date");

        let mut stmt = self.conn.prepare(&query)?;
        let arg_refs: Vec<&dyn rusqlite::ToSql> = args.iter().map(|a| a.as_ref()).collect();
        let rows = stmt.query_map(&arg_refs[..], session_from_row)?;

        let mut raw_rows = Vec::new();
        for row in rows {
            raw_rows.push(row?);
        }
        self.load_session_data(raw_rows)
    }

    /// Session counts per assessment type across a team's players.
    pub fn assessment_counts(&self, team_id: TeamId) -> Result<BTreeMap<AssessmentType, usize>> {
        let mut stmt = self.conn.prepare(
            "SELECT s.assessment_type, COUNT(*)
             FROM sessions s
             JOIN players p ON s.player_id = p.player_id
             WHERE p.team_id = ?
             GROUP BY s.assessment_type",
        )?;
        let rows = stmt.query_map(params![team_id.as_i64()], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
        })?;

        let mut counts = BTreeMap::new();
        for row in rows {
            let (type_tag, count) = row?;
            counts.insert(type_tag.parse::<AssessmentType>()?, count as usize);
        }
        Ok(counts)
    }
}
