//! Results-oriented XML provider adapter.
//!
//! The feed is a legacy XML API queried by season code
//! (`/results?seasoncode=E2025`). It is authoritative for finished games
//! and for standings; upcoming games appear late or not at all, which is
//! why dual-source leagues pair it with the schedule feed.
//!
//! Status inference here leans on the `<played>` flag, with a past-kickoff
//! fallback because the flag goes stale around round boundaries.

use crate::client::{ApiError, ApiResult, CourtsideApi};
use crate::xml::{collect_records, XmlRecord};
use crate::{
    dates, teams, Match, MatchDetails, MatchExtras, MatchStatus, PlayerLine, QuarterScores,
    StandingsEntry, Team, TeamStats,
};

impl CourtsideApi {
    /// Finished (and any already-listed upcoming) games for a season.
    pub async fn euroleague_results(&self, season_code: &str) -> ApiResult<Vec<Match>> {
        let url = format!("{}/results?seasoncode={season_code}", self.euroleague_base);
        let body = self.get_text(&url, Some("application/xml")).await?;
        parse_results(&body, &url, season_code)
    }

    /// Season standings, provider rank order.
    pub async fn euroleague_standings(&self, season_code: &str) -> ApiResult<Vec<StandingsEntry>> {
        let url = format!("{}/standings?seasoncode={season_code}", self.euroleague_base);
        let body = self.get_text(&url, Some("application/xml")).await?;
        parse_standings(&body, &url)
    }

    /// Boxscore-level detail for one game. `Ok(None)` when the id does not
    /// belong to this provider or the feed has no such game.
    pub async fn euroleague_match_details(
        &self,
        match_id: &str,
    ) -> ApiResult<Option<MatchDetails>> {
        let Some((season_code, game_code)) = split_match_id(match_id) else {
            return Ok(None);
        };
        let url = format!(
            "{}/games?seasoncode={season_code}&gamecode={game_code}",
            self.euroleague_base
        );
        let body = self.get_text(&url, Some("application/xml")).await?;
        parse_game_details(&body, &url, season_code)
    }
}

/// `E2025_170` → `("E2025", "170")`.
fn split_match_id(match_id: &str) -> Option<(&str, &str)> {
    let (season, game) = match_id.split_once('_')?;
    if season.is_empty() || game.is_empty() || !game.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some((season, game))
}

fn season_year(season_code: &str) -> i32 {
    season_code
        .trim_start_matches(|c: char| c.is_ascii_alphabetic())
        .parse()
        .unwrap_or_else(|_| dates::current_year())
}

pub(crate) fn parse_results(xml: &str, url: &str, season_code: &str) -> ApiResult<Vec<Match>> {
    let games = collect_records(xml, "game").map_err(|e| ApiError::parse(url, e.to_string()))?;
    log::debug!("{url}: {} game records", games.len());
    Ok(games.iter().map(|g| map_game(g, season_code)).collect())
}

pub(crate) fn parse_standings(xml: &str, url: &str) -> ApiResult<Vec<StandingsEntry>> {
    let rows = collect_records(xml, "team").map_err(|e| ApiError::parse(url, e.to_string()))?;
    Ok(rows.iter().map(map_standing).collect())
}

fn parse_game_details(xml: &str, url: &str, season_code: &str) -> ApiResult<Option<MatchDetails>> {
    let games = collect_records(xml, "game").map_err(|e| ApiError::parse(url, e.to_string()))?;
    let Some(record) = games.first() else {
        return Ok(None); // well-formed empty: unknown game, not an error
    };
    let game = map_game(record, season_code);

    let players = collect_records(xml, "player").map_err(|e| ApiError::parse(url, e.to_string()))?;
    let (home_players, away_players): (Vec<_>, Vec<_>) = players
        .iter()
        .partition(|p| p.attr("team") != Some("away"));

    let extras = MatchExtras {
        current_period: record.text("phase").map(str::to_owned),
        quarter_scores: map_quarters(record),
        home_stats: map_stats(record, "home"),
        away_stats: map_stats(record, "away"),
        home_players: home_players.iter().map(|p| map_player(p)).collect(),
        away_players: away_players.iter().map(|p| map_player(p)).collect(),
    };
    Ok(Some(MatchDetails::for_match(game, extras)))
}

fn map_game(record: &XmlRecord, season_code: &str) -> Match {
    let game_code = record.number("gamecode");
    let date = record
        .text("date")
        .and_then(|raw| dates::from_month_day(raw, season_year(season_code)))
        .unwrap_or_default();
    let time = record
        .text("time")
        .and_then(dates::from_24h_clock)
        .unwrap_or_else(|| dates::TBC.to_owned());

    // played flag first; a kickoff already in the past still counts as
    // completed because the flag lags the final buzzer around round
    // boundaries.
    let status = if record.flag("played") || dates::is_past(&date, &time) {
        MatchStatus::Completed
    } else {
        MatchStatus::Scheduled
    };

    let (home_score, away_score) = if status == MatchStatus::Scheduled {
        (None, None)
    } else {
        (
            record.text("homescore").and_then(crate::parse_score_text),
            record.text("awayscore").and_then(crate::parse_score_text),
        )
    };

    Match {
        id: format!("{season_code}_{game_code}"),
        home_team: map_team(record, "hometeam", "homecode"),
        away_team: map_team(record, "awayteam", "awaycode"),
        home_score,
        away_score,
        date,
        time,
        venue: record.text("arena").unwrap_or_default().to_owned(),
        status,
    }
}

fn map_team(record: &XmlRecord, name_tag: &str, code_tag: &str) -> Team {
    let name = record.text(name_tag).unwrap_or_default().to_owned();
    Team {
        id: record.text(code_tag).unwrap_or_default().to_owned(),
        short_name: teams::short_name(&name),
        name,
        logo: None,
    }
}

fn map_standing(record: &XmlRecord) -> StandingsEntry {
    let name = record.attr("name").unwrap_or_default().to_owned();
    let won = record.number("wins") as u16;
    let lost = record.number("losses") as u16;
    let points_for = record.number("ptsfavour") as u16;
    let points_against = record.number("ptsagainst") as u16;

    StandingsEntry {
        position: record.number("ranking") as u16,
        team: Team {
            id: record.attr("code").unwrap_or_default().to_owned(),
            short_name: teams::short_name(&name),
            name,
            logo: None,
        },
        played: record.number("totalgames") as u16,
        won,
        lost,
        points_for,
        points_against,
        points_difference: i32::from(points_for) - i32::from(points_against),
        // The feed does not report standings points; derive them.
        points: match record.text("points") {
            Some(p) => p.trim().parse().unwrap_or_else(|_| StandingsEntry::derive_points(won, lost)),
            None => StandingsEntry::derive_points(won, lost),
        },
    }
}

fn map_quarters(record: &XmlRecord) -> Option<QuarterScores> {
    let pair = |home_tag: &str, away_tag: &str| {
        let home = record.text(home_tag).and_then(crate::parse_score_text)?;
        let away = record.text(away_tag).and_then(crate::parse_score_text)?;
        Some((home, away))
    };

    let quarters: Vec<(u16, u16)> = (1..=4)
        .filter_map(|q| pair(&format!("q{q}home"), &format!("q{q}away")))
        .collect();
    if quarters.is_empty() {
        return None;
    }
    Some(QuarterScores { quarters, overtime: pair("othome", "otaway") })
}

fn map_stats(record: &XmlRecord, side: &str) -> Option<TeamStats> {
    let pct = |tag: &str| -> f32 {
        record
            .text(&format!("{side}{tag}"))
            .and_then(|s| s.trim().trim_end_matches('%').parse().ok())
            .unwrap_or(0.0)
    };
    // Treat the field-goal percentage as the presence gate for the whole
    // stat block; the feed ships all-or-nothing.
    record.text(&format!("{side}fgpct"))?;

    Some(TeamStats {
        field_goal_pct: pct("fgpct"),
        three_point_pct: pct("3ptpct"),
        free_throw_pct: pct("ftpct"),
        rebounds_offensive: record.number(&format!("{side}offreb")) as u16,
        rebounds_defensive: record.number(&format!("{side}defreb")) as u16,
        assists: record.number(&format!("{side}assists")) as u16,
        turnovers: record.number(&format!("{side}turnovers")) as u16,
        steals: record.number(&format!("{side}steals")) as u16,
        blocks: record.number(&format!("{side}blocks")) as u16,
    })
}

fn map_player(record: &XmlRecord) -> PlayerLine {
    PlayerLine {
        id: record.text("code").unwrap_or_default().to_owned(),
        name: record.text("name").unwrap_or_default().to_owned(),
        points: record.number("points") as u16,
        rebounds: record.number("rebounds") as u16,
        assists: record.number("assists") as u16,
        minutes: record.text("minutes").unwrap_or_default().to_owned(),
    }
}
