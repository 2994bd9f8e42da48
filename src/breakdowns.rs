//! Dimensional breakdown calculators: the same innings-level aggregates,
//! grouped by opponent team, season, venue, or match phase. Batting and
//! bowling sides are computed independently and share dimension keys so the
//! merger can union them.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use serde::{Serialize, Serializer};

use crate::bowling::{WicketPolicy, is_bowler_wicket};
use crate::delivery::{Delivery, Role};
use crate::innings::group_by_match;
use crate::rates::{
    bowling_strike_rate, economy_rate, overs_notation, runs_per_innings, strike_rate,
};

/// Fixed over-range buckets for situational breakdowns. Overs 20 and beyond
/// (super overs) fall outside every bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Phase {
    Powerplay,
    Middle,
    Death,
}

impl Phase {
    pub const ALL: [Phase; 3] = [Phase::Powerplay, Phase::Middle, Phase::Death];

    pub fn of_over(over_ball: f64) -> Option<Phase> {
        if !over_ball.is_finite() || over_ball < 0.0 {
            return None;
        }
        if over_ball < 6.0 {
            Some(Phase::Powerplay)
        } else if over_ball < 15.0 {
            Some(Phase::Middle)
        } else if over_ball < 20.0 {
            Some(Phase::Death)
        } else {
            None
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Phase::Powerplay => "PowerPlay (1-6)",
            Phase::Middle => "Middle Overs (7-15)",
            Phase::Death => "Death Overs (16-20)",
        }
    }
}

impl Serialize for Phase {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Performance against one opposing team. Batting-side calculators fill the
/// batting fields, bowling-side the bowling fields; the merger unions them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamRecord {
    pub team: String,
    pub matches: u32,
    pub innings: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runs: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strike_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_score: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wickets: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub economy: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bowling_strike_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_bowling: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonRecord {
    pub season: u16,
    pub matches: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runs: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strike_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wickets: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub economy: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bowling_strike_rate: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VenueRecord {
    pub venue: String,
    pub matches: u32,
    pub innings: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runs: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strike_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wickets: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub economy: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bowling_strike_rate: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseRecord {
    pub phase: Phase,
    /// Distinct innings that contributed at least one ball to this bucket.
    pub innings: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runs: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strike_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wickets: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub economy: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bowling_strike_rate: Option<f64>,
}

/// Keyed accumulation that remembers first-seen key order, so output order
/// never depends on hash iteration.
struct OrderedGroups<K, V> {
    order: Vec<K>,
    map: HashMap<K, V>,
}

impl<K: Eq + Hash + Clone, V: Default> OrderedGroups<K, V> {
    fn new() -> Self {
        Self {
            order: Vec::new(),
            map: HashMap::new(),
        }
    }

    fn entry(&mut self, key: K) -> &mut V {
        if !self.map.contains_key(&key) {
            self.order.push(key.clone());
        }
        self.map.entry(key).or_default()
    }

    fn into_pairs(mut self) -> Vec<(K, V)> {
        self.order
            .into_iter()
            .map(|key| {
                let value = self.map.remove(&key).unwrap_or_default();
                (key, value)
            })
            .collect()
    }
}

#[derive(Default)]
struct BatAcc {
    matches: u32,
    runs: u32,
    balls: u32,
    best_score: u32,
}

#[derive(Default)]
struct BowlAcc {
    matches: u32,
    wickets: u32,
    runs: u32,
    balls: u32,
    best: Option<(u32, u32)>,
}

impl BowlAcc {
    fn offer_best(&mut self, wickets: u32, runs: u32) {
        let better = match self.best {
            None => true,
            Some((bw, br)) => wickets > bw || (wickets == bw && runs < br),
        };
        if better {
            self.best = Some((wickets, runs));
        }
    }

    fn best_figures(&self) -> String {
        match self.best {
            Some((wickets, runs)) if wickets > 0 => format!("{wickets}/{runs}"),
            _ => "0/0".to_string(),
        }
    }
}

fn batting_by_key<K, F>(rows: &[Delivery], key_of: F) -> Vec<(K, BatAcc)>
where
    K: Eq + Hash + Clone,
    F: Fn(&Delivery) -> Option<K>,
{
    let mut groups: OrderedGroups<K, BatAcc> = OrderedGroups::new();
    for innings in group_by_match(rows) {
        let Some(key) = key_of(innings.meta()) else {
            continue;
        };
        let runs: u32 = innings.balls.iter().map(|b| b.runs_batsman).sum();
        let acc = groups.entry(key);
        acc.matches += 1;
        acc.runs += runs;
        acc.balls += innings.balls_count();
        acc.best_score = acc.best_score.max(runs);
    }
    groups.into_pairs()
}

fn bowling_by_key<K, F>(rows: &[Delivery], policy: WicketPolicy, key_of: F) -> Vec<(K, BowlAcc)>
where
    K: Eq + Hash + Clone,
    F: Fn(&Delivery) -> Option<K>,
{
    let mut groups: OrderedGroups<K, BowlAcc> = OrderedGroups::new();
    for innings in group_by_match(rows) {
        let Some(key) = key_of(innings.meta()) else {
            continue;
        };
        let mut wickets = 0u32;
        let mut runs = 0u32;
        for ball in &innings.balls {
            runs += ball.runs_total;
            if is_bowler_wicket(ball, policy) {
                wickets += 1;
            }
        }
        let acc = groups.entry(key);
        acc.matches += 1;
        acc.wickets += wickets;
        acc.runs += runs;
        acc.balls += innings.balls_count();
        acc.offer_best(wickets, runs);
    }
    groups.into_pairs()
}

fn venue_key(ball: &Delivery) -> Option<String> {
    ball.venue
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Batting record per team faced, most runs first.
pub fn batting_against_teams(rows: &[Delivery]) -> Vec<TeamRecord> {
    let mut out: Vec<TeamRecord> = batting_by_key(rows, |meta| {
        Some(meta.opponent(Role::Batting).to_string())
    })
    .into_iter()
    .map(|(team, acc)| TeamRecord {
        team,
        matches: acc.matches,
        innings: acc.matches,
        runs: Some(acc.runs),
        average: Some(runs_per_innings(acc.runs, acc.matches)),
        strike_rate: Some(strike_rate(acc.runs, acc.balls)),
        best_score: Some(acc.best_score),
        wickets: None,
        economy: None,
        bowling_strike_rate: None,
        best_bowling: None,
    })
    .collect();
    out.sort_by(|a, b| b.runs.cmp(&a.runs).then_with(|| a.team.cmp(&b.team)));
    out
}

/// Bowling record per team faced, most wickets first.
pub fn bowling_against_teams(rows: &[Delivery], policy: WicketPolicy) -> Vec<TeamRecord> {
    let mut out: Vec<TeamRecord> = bowling_by_key(rows, policy, |meta| {
        Some(meta.opponent(Role::Bowling).to_string())
    })
    .into_iter()
    .map(|(team, acc)| TeamRecord {
        team,
        matches: acc.matches,
        innings: acc.matches,
        runs: None,
        average: None,
        strike_rate: None,
        best_score: None,
        wickets: Some(acc.wickets),
        economy: Some(economy_rate(acc.runs, overs_notation(acc.balls))),
        bowling_strike_rate: Some(bowling_strike_rate(acc.balls, acc.wickets)),
        best_bowling: Some(acc.best_figures()),
    })
    .collect();
    out.sort_by(|a, b| b.wickets.cmp(&a.wickets).then_with(|| a.team.cmp(&b.team)));
    out
}

/// Batting record per season, oldest first. Innings with no season value are
/// skipped.
pub fn batting_by_season(rows: &[Delivery]) -> Vec<SeasonRecord> {
    let mut out: Vec<SeasonRecord> = batting_by_key(rows, |meta| meta.season)
        .into_iter()
        .map(|(season, acc)| SeasonRecord {
            season,
            matches: acc.matches,
            runs: Some(acc.runs),
            average: Some(runs_per_innings(acc.runs, acc.matches)),
            strike_rate: Some(strike_rate(acc.runs, acc.balls)),
            wickets: None,
            economy: None,
            bowling_strike_rate: None,
        })
        .collect();
    out.sort_by_key(|r| r.season);
    out
}

pub fn bowling_by_season(rows: &[Delivery], policy: WicketPolicy) -> Vec<SeasonRecord> {
    let mut out: Vec<SeasonRecord> = bowling_by_key(rows, policy, |meta| meta.season)
        .into_iter()
        .map(|(season, acc)| SeasonRecord {
            season,
            matches: acc.matches,
            runs: None,
            average: None,
            strike_rate: None,
            wickets: Some(acc.wickets),
            economy: Some(economy_rate(acc.runs, overs_notation(acc.balls))),
            bowling_strike_rate: Some(bowling_strike_rate(acc.balls, acc.wickets)),
        })
        .collect();
    out.sort_by_key(|r| r.season);
    out
}

/// Batting record per venue, most matches first. Innings with no venue are
/// skipped.
pub fn batting_by_venue(rows: &[Delivery]) -> Vec<VenueRecord> {
    let mut out: Vec<VenueRecord> = batting_by_key(rows, venue_key)
        .into_iter()
        .map(|(venue, acc)| VenueRecord {
            venue,
            matches: acc.matches,
            innings: acc.matches,
            runs: Some(acc.runs),
            average: Some(runs_per_innings(acc.runs, acc.matches)),
            strike_rate: Some(strike_rate(acc.runs, acc.balls)),
            wickets: None,
            economy: None,
            bowling_strike_rate: None,
        })
        .collect();
    out.sort_by(|a, b| b.matches.cmp(&a.matches).then_with(|| a.venue.cmp(&b.venue)));
    out
}

pub fn bowling_by_venue(rows: &[Delivery], policy: WicketPolicy) -> Vec<VenueRecord> {
    let mut out: Vec<VenueRecord> = bowling_by_key(rows, policy, venue_key)
        .into_iter()
        .map(|(venue, acc)| VenueRecord {
            venue,
            matches: acc.matches,
            innings: acc.matches,
            runs: None,
            average: None,
            strike_rate: None,
            wickets: Some(acc.wickets),
            economy: Some(economy_rate(acc.runs, overs_notation(acc.balls))),
            bowling_strike_rate: Some(bowling_strike_rate(acc.balls, acc.wickets)),
        })
        .collect();
    out.sort_by(|a, b| b.matches.cmp(&a.matches).then_with(|| a.venue.cmp(&b.venue)));
    out
}

/// Batting per phase bucket. Unlike the other dimensions this partitions
/// deliveries inside an innings, so one innings can feed all three buckets.
pub fn batting_by_phase(rows: &[Delivery]) -> Vec<PhaseRecord> {
    let mut runs = [0u32; 3];
    let mut balls = [0u32; 3];
    let mut matches: [HashSet<&str>; 3] = Default::default();
    for ball in rows {
        let Some(phase) = Phase::of_over(ball.over_ball) else {
            continue;
        };
        let slot = phase as usize;
        runs[slot] += ball.runs_batsman;
        balls[slot] += 1;
        matches[slot].insert(ball.match_id.as_str());
    }
    Phase::ALL
        .into_iter()
        .filter(|phase| balls[*phase as usize] > 0)
        .map(|phase| {
            let slot = phase as usize;
            PhaseRecord {
                phase,
                innings: matches[slot].len() as u32,
                runs: Some(runs[slot]),
                strike_rate: Some(strike_rate(runs[slot], balls[slot])),
                wickets: None,
                economy: None,
                bowling_strike_rate: None,
            }
        })
        .collect()
}

pub fn bowling_by_phase(rows: &[Delivery], policy: WicketPolicy) -> Vec<PhaseRecord> {
    let mut wickets = [0u32; 3];
    let mut runs = [0u32; 3];
    let mut balls = [0u32; 3];
    let mut matches: [HashSet<&str>; 3] = Default::default();
    for ball in rows {
        let Some(phase) = Phase::of_over(ball.over_ball) else {
            continue;
        };
        let slot = phase as usize;
        runs[slot] += ball.runs_total;
        balls[slot] += 1;
        matches[slot].insert(ball.match_id.as_str());
        if is_bowler_wicket(ball, policy) {
            wickets[slot] += 1;
        }
    }
    Phase::ALL
        .into_iter()
        .filter(|phase| balls[*phase as usize] > 0)
        .map(|phase| {
            let slot = phase as usize;
            PhaseRecord {
                phase,
                innings: matches[slot].len() as u32,
                runs: None,
                strike_rate: None,
                wickets: Some(wickets[slot]),
                economy: Some(economy_rate(runs[slot], overs_notation(balls[slot]))),
                bowling_strike_rate: Some(bowling_strike_rate(balls[slot], wickets[slot])),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delivery::test_ball;

    #[test]
    fn phase_boundaries_are_half_open() {
        assert_eq!(Phase::of_over(0.1), Some(Phase::Powerplay));
        assert_eq!(Phase::of_over(5.6), Some(Phase::Powerplay));
        assert_eq!(Phase::of_over(6.1), Some(Phase::Middle));
        assert_eq!(Phase::of_over(14.6), Some(Phase::Middle));
        assert_eq!(Phase::of_over(15.1), Some(Phase::Death));
        assert_eq!(Phase::of_over(19.6), Some(Phase::Death));
        assert_eq!(Phase::of_over(20.1), None);
    }

    #[test]
    fn one_innings_can_feed_every_bucket() {
        let rows = vec![
            test_ball("m1", 1.1, 4),
            test_ball("m1", 8.1, 1),
            test_ball("m1", 16.1, 6),
        ];
        let buckets = batting_by_phase(&rows);
        assert_eq!(buckets.len(), 3);
        for bucket in &buckets {
            assert_eq!(bucket.innings, 1);
        }
        assert_eq!(buckets[0].runs, Some(4));
        assert_eq!(buckets[1].runs, Some(1));
        assert_eq!(buckets[2].runs, Some(6));
    }

    #[test]
    fn seasonless_innings_are_skipped() {
        let mut dated = test_ball("m1", 0.1, 4);
        dated.season = Some(2020);
        let mut undated = test_ball("m2", 0.1, 4);
        undated.season = None;
        let records = batting_by_season(&[dated, undated]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].season, 2020);
    }

    #[test]
    fn opponent_is_role_aware() {
        // test_ball bats for Chennai against Mumbai; as a bowling row the
        // player bowls for Mumbai against Chennai.
        let rows = vec![test_ball("m1", 0.1, 0)];
        let batting = batting_against_teams(&rows);
        assert_eq!(batting[0].team, "Mumbai");
        let bowling = bowling_against_teams(&rows, WicketPolicy::default());
        assert_eq!(bowling[0].team, "Chennai");
    }

    #[test]
    fn venue_records_count_matches_not_balls() {
        let rows = vec![
            test_ball("m1", 0.1, 1),
            test_ball("m1", 0.2, 2),
            test_ball("m2", 0.1, 3),
        ];
        let records = batting_by_venue(&rows);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].matches, 2);
        assert_eq!(records[0].runs, Some(6));
    }
}
