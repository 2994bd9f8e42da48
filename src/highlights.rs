use chrono::NaiveDate;
use serde::Serialize;

use crate::batting::batting_innings;
use crate::bowling::{WicketPolicy, bowling_innings};
use crate::delivery::{Delivery, Role};
use crate::innings::group_by_match;
use crate::rates::{economy_rate, strike_rate};

/// One batting innings ranked for the highest-scores table, carrying the
/// match context a reader wants next to the score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InningsHighlight {
    pub match_id: String,
    pub date: Option<NaiveDate>,
    pub opponent: String,
    pub runs: u32,
    pub balls_faced: u32,
    pub strike_rate: f64,
    pub fours: u32,
    pub sixes: u32,
    pub not_out: bool,
    pub result: String,
    pub venue: Option<String>,
    pub season: Option<u16>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BowlingHighlight {
    pub match_id: String,
    pub date: Option<NaiveDate>,
    pub opponent: String,
    pub overs: f64,
    pub wickets: u32,
    pub runs_conceded: u32,
    pub economy: f64,
    pub figures: String,
    pub result: String,
    pub venue: Option<String>,
    pub season: Option<u16>,
}

/// Top `limit` batting innings: runs decide, strike rate breaks ties. Full
/// ties keep feed order (the sort is stable), so output is deterministic.
pub fn highest_scores(player: &str, rows: &[Delivery], limit: usize) -> Vec<InningsHighlight> {
    let mut highlights: Vec<InningsHighlight> = group_by_match(rows)
        .iter()
        .map(|group| {
            let inn = batting_innings(group, player);
            let meta = group.meta();
            InningsHighlight {
                match_id: inn.match_id,
                date: meta.match_date,
                opponent: meta.opponent(Role::Batting).to_string(),
                runs: inn.runs,
                balls_faced: inn.balls_faced,
                strike_rate: strike_rate(inn.runs, inn.balls_faced),
                fours: inn.fours,
                sixes: inn.sixes,
                not_out: inn.not_out,
                result: meta.result_for(Role::Batting).to_string(),
                venue: meta.venue.clone(),
                season: meta.season,
            }
        })
        .collect();
    highlights.sort_by(|a, b| {
        b.runs
            .cmp(&a.runs)
            .then_with(|| b.strike_rate.total_cmp(&a.strike_rate))
    });
    highlights.truncate(limit);
    highlights
}

/// Top `limit` bowling innings: wickets descending, then runs conceded
/// ascending.
pub fn best_bowling(rows: &[Delivery], limit: usize, policy: WicketPolicy) -> Vec<BowlingHighlight> {
    let mut highlights: Vec<BowlingHighlight> = group_by_match(rows)
        .iter()
        .map(|group| {
            let inn = bowling_innings(group, policy);
            let meta = group.meta();
            BowlingHighlight {
                match_id: inn.match_id,
                date: meta.match_date,
                opponent: meta.opponent(Role::Bowling).to_string(),
                overs: inn.overs,
                wickets: inn.wickets,
                runs_conceded: inn.runs_conceded,
                economy: economy_rate(inn.runs_conceded, inn.overs),
                figures: format!("{}/{}", inn.wickets, inn.runs_conceded),
                result: meta.result_for(Role::Bowling).to_string(),
                venue: meta.venue.clone(),
                season: meta.season,
            }
        })
        .collect();
    highlights.sort_by(|a, b| {
        b.wickets
            .cmp(&a.wickets)
            .then_with(|| a.runs_conceded.cmp(&b.runs_conceded))
    });
    highlights.truncate(limit);
    highlights
}
