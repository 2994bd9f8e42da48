//! Dual-discipline merging: a batting-side breakdown and a bowling-side
//! breakdown over the same dimension become one list keyed by dimension
//! value. This is a full outer join: a key present on exactly one side
//! keeps that side's record; a key on both sides gets the bowling fields
//! grafted onto the batting record.

use std::collections::HashMap;
use std::hash::Hash;

use crate::breakdowns::{PhaseRecord, SeasonRecord, TeamRecord, VenueRecord};

fn outer_join<T, K, KeyFn, AbsorbFn>(
    batting: &[T],
    bowling: &[T],
    key_of: KeyFn,
    absorb: AbsorbFn,
) -> Vec<T>
where
    T: Clone,
    K: Eq + Hash,
    KeyFn: Fn(&T) -> K,
    AbsorbFn: Fn(&mut T, &T),
{
    let mut merged: Vec<T> = batting.to_vec();
    let mut index: HashMap<K, usize> = merged
        .iter()
        .enumerate()
        .map(|(slot, record)| (key_of(record), slot))
        .collect();
    for record in bowling {
        match index.get(&key_of(record)) {
            Some(&slot) => absorb(&mut merged[slot], record),
            None => {
                index.insert(key_of(record), merged.len());
                merged.push(record.clone());
            }
        }
    }
    merged
}

/// Merged per-opponent records, most matches first. When both sides faced a
/// team, matches/innings counts come from the batting side.
pub fn merge_team_records(batting: &[TeamRecord], bowling: &[TeamRecord]) -> Vec<TeamRecord> {
    let mut merged = outer_join(
        batting,
        bowling,
        |record| record.team.clone(),
        |into, from| {
            into.wickets = from.wickets;
            into.economy = from.economy;
            into.bowling_strike_rate = from.bowling_strike_rate;
            into.best_bowling = from.best_bowling.clone();
        },
    );
    merged.sort_by(|a, b| b.matches.cmp(&a.matches).then_with(|| a.team.cmp(&b.team)));
    merged
}

pub fn merge_season_records(
    batting: &[SeasonRecord],
    bowling: &[SeasonRecord],
) -> Vec<SeasonRecord> {
    let mut merged = outer_join(
        batting,
        bowling,
        |record| record.season,
        |into, from| {
            into.wickets = from.wickets;
            into.economy = from.economy;
            into.bowling_strike_rate = from.bowling_strike_rate;
        },
    );
    merged.sort_by_key(|record| record.season);
    merged
}

pub fn merge_venue_records(batting: &[VenueRecord], bowling: &[VenueRecord]) -> Vec<VenueRecord> {
    let mut merged = outer_join(
        batting,
        bowling,
        |record| record.venue.clone(),
        |into, from| {
            into.wickets = from.wickets;
            into.economy = from.economy;
            into.bowling_strike_rate = from.bowling_strike_rate;
        },
    );
    merged.sort_by(|a, b| {
        b.matches
            .cmp(&a.matches)
            .then_with(|| a.venue.cmp(&b.venue))
    });
    merged
}

pub fn merge_phase_records(batting: &[PhaseRecord], bowling: &[PhaseRecord]) -> Vec<PhaseRecord> {
    let mut merged = outer_join(
        batting,
        bowling,
        |record| record.phase,
        |into, from| {
            into.wickets = from.wickets;
            into.economy = from.economy;
            into.bowling_strike_rate = from.bowling_strike_rate;
        },
    );
    merged.sort_by_key(|record| record.phase);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bat_team(team: &str, matches: u32, runs: u32) -> TeamRecord {
        TeamRecord {
            team: team.to_string(),
            matches,
            innings: matches,
            runs: Some(runs),
            average: Some(runs as f64 / matches as f64),
            strike_rate: Some(100.0),
            best_score: Some(runs),
            wickets: None,
            economy: None,
            bowling_strike_rate: None,
            best_bowling: None,
        }
    }

    fn bowl_team(team: &str, matches: u32, wickets: u32) -> TeamRecord {
        TeamRecord {
            team: team.to_string(),
            matches,
            innings: matches,
            runs: None,
            average: None,
            strike_rate: None,
            best_score: None,
            wickets: Some(wickets),
            economy: Some(7.5),
            bowling_strike_rate: Some(12.0),
            best_bowling: Some(format!("{wickets}/20")),
        }
    }

    #[test]
    fn union_keeps_every_key_and_invents_none() {
        let batting = vec![bat_team("Delhi", 3, 120), bat_team("Punjab", 2, 40)];
        let bowling = vec![bowl_team("Punjab", 2, 4), bowl_team("Kolkata", 1, 2)];
        let merged = merge_team_records(&batting, &bowling);
        let mut keys: Vec<&str> = merged.iter().map(|r| r.team.as_str()).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["Delhi", "Kolkata", "Punjab"]);
    }

    #[test]
    fn both_sides_union_into_one_record() {
        let merged = merge_team_records(&[bat_team("Punjab", 2, 40)], &[bowl_team("Punjab", 2, 4)]);
        assert_eq!(merged.len(), 1);
        let record = &merged[0];
        assert_eq!(record.runs, Some(40));
        assert_eq!(record.wickets, Some(4));
        assert_eq!(record.best_bowling.as_deref(), Some("4/20"));
    }

    #[test]
    fn one_sided_keys_keep_only_their_fields() {
        let merged = merge_team_records(&[bat_team("Delhi", 3, 120)], &[bowl_team("Kolkata", 1, 2)]);
        let delhi = merged.iter().find(|r| r.team == "Delhi").unwrap();
        assert!(delhi.wickets.is_none());
        let kolkata = merged.iter().find(|r| r.team == "Kolkata").unwrap();
        assert!(kolkata.runs.is_none());
        assert_eq!(kolkata.wickets, Some(2));
    }

    #[test]
    fn merged_teams_order_by_matches_then_name() {
        let merged = merge_team_records(
            &[bat_team("Delhi", 2, 80), bat_team("Punjab", 2, 90)],
            &[bowl_team("Kolkata", 5, 9)],
        );
        assert_eq!(merged[0].team, "Kolkata");
        assert_eq!(merged[1].team, "Delhi");
        assert_eq!(merged[2].team, "Punjab");
    }
}
