//! Assembly of a full per-player report, plus the seam to whatever supplies
//! delivery rows. The engine never fetches data itself: a `DeliverySource`
//! hands it pre-joined rows and everything after that is pure computation.

use anyhow::Result;
use serde::Serialize;

use crate::batting::{BattingSummary, batting_summary};
use crate::bowling::{BowlingSummary, WicketPolicy, bowling_summary};
use crate::breakdowns::{
    PhaseRecord, SeasonRecord, TeamRecord, VenueRecord, batting_against_teams, batting_by_phase,
    batting_by_season, batting_by_venue, bowling_against_teams, bowling_by_phase,
    bowling_by_season, bowling_by_venue,
};
use crate::delivery::{DataQualityIssue, Delivery, Role, sanitize_feed};
use crate::highlights::{BowlingHighlight, InningsHighlight, best_bowling, highest_scores};
use crate::merge::{
    merge_phase_records, merge_season_records, merge_team_records, merge_venue_records,
};

/// Supplies every ball a player appears in for one role, joined with match
/// metadata and optionally pre-filtered by season. Implementations own all
/// I/O concerns (and their timeouts); the engine treats the result as an
/// immutable fact list.
pub trait DeliverySource {
    fn fetch_deliveries(
        &self,
        player: &str,
        role: Role,
        season: Option<u16>,
    ) -> Result<Vec<Delivery>>;
}

/// A whole-feed source held in memory. Backs the CLIs and tests; a real
/// deployment would put its storage layer behind the same trait.
pub struct InMemorySource {
    rows: Vec<Delivery>,
}

impl InMemorySource {
    pub fn new(rows: Vec<Delivery>) -> Self {
        Self { rows }
    }

    /// Every name appearing as batsman or bowler, sorted and deduplicated.
    pub fn player_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .rows
            .iter()
            .flat_map(|ball| [ball.batsman.clone(), ball.bowler.clone()])
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }
}

impl DeliverySource for InMemorySource {
    fn fetch_deliveries(
        &self,
        player: &str,
        role: Role,
        season: Option<u16>,
    ) -> Result<Vec<Delivery>> {
        let rows = self
            .rows
            .iter()
            .filter(|ball| match role {
                Role::Batting => ball.batsman == player,
                Role::Bowling => ball.bowler == player,
            })
            .filter(|ball| season.is_none() || ball.season == season)
            .cloned()
            .collect();
        Ok(rows)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ReportOptions {
    pub season: Option<u16>,
    pub highlight_limit: usize,
    pub wicket_policy: WicketPolicy,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            season: None,
            highlight_limit: 5,
            wicket_policy: WicketPolicy::default(),
        }
    }
}

/// Everything the engine can say about one player, computed fresh per call.
/// Sections for a role the player never filled are `None`/empty rather than
/// faults.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerPerformance {
    pub player: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batting: Option<BattingSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bowling: Option<BowlingSummary>,
    pub highest_scores: Vec<InningsHighlight>,
    pub best_bowling: Vec<BowlingHighlight>,
    pub against_teams: Vec<TeamRecord>,
    pub by_season: Vec<SeasonRecord>,
    pub by_venue: Vec<VenueRecord>,
    pub by_phase: Vec<PhaseRecord>,
    /// Rows the engine refused to aggregate, with reasons. Empty on a clean
    /// feed.
    pub data_quality: Vec<DataQualityIssue>,
}

fn apply_season(mut rows: Vec<Delivery>, season: Option<u16>) -> Vec<Delivery> {
    if let Some(season) = season {
        rows.retain(|ball| ball.season == Some(season));
    }
    rows
}

/// Full report from raw role-filtered feeds. Malformed rows are skipped and
/// reported in `data_quality`; either feed may be empty.
pub fn player_performance(
    player: &str,
    batting_rows: Vec<Delivery>,
    bowling_rows: Vec<Delivery>,
    options: ReportOptions,
) -> PlayerPerformance {
    let (batting_rows, mut issues) = sanitize_feed(batting_rows);
    let (bowling_rows, bowling_issues) = sanitize_feed(bowling_rows);
    issues.extend(bowling_issues);

    let batting_rows = apply_season(batting_rows, options.season);
    let bowling_rows = apply_season(bowling_rows, options.season);

    PlayerPerformance {
        player: player.to_string(),
        batting: (!batting_rows.is_empty()).then(|| batting_summary(player, &batting_rows)),
        bowling: (!bowling_rows.is_empty())
            .then(|| bowling_summary(&bowling_rows, options.wicket_policy)),
        highest_scores: highest_scores(player, &batting_rows, options.highlight_limit),
        best_bowling: best_bowling(&bowling_rows, options.highlight_limit, options.wicket_policy),
        against_teams: merge_team_records(
            &batting_against_teams(&batting_rows),
            &bowling_against_teams(&bowling_rows, options.wicket_policy),
        ),
        by_season: merge_season_records(
            &batting_by_season(&batting_rows),
            &bowling_by_season(&bowling_rows, options.wicket_policy),
        ),
        by_venue: merge_venue_records(
            &batting_by_venue(&batting_rows),
            &bowling_by_venue(&bowling_rows, options.wicket_policy),
        ),
        by_phase: merge_phase_records(
            &batting_by_phase(&batting_rows),
            &bowling_by_phase(&bowling_rows, options.wicket_policy),
        ),
        data_quality: issues,
    }
}

/// Fetches both role feeds from a source and assembles the report. The
/// source already applied the season filter; re-applying it inside
/// `player_performance` is a no-op.
pub fn player_performance_from(
    source: &impl DeliverySource,
    player: &str,
    options: ReportOptions,
) -> Result<PlayerPerformance> {
    let batting_rows = source.fetch_deliveries(player, Role::Batting, options.season)?;
    let bowling_rows = source.fetch_deliveries(player, Role::Bowling, options.season)?;
    Ok(player_performance(player, batting_rows, bowling_rows, options))
}
