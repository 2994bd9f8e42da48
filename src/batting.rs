use serde::Serialize;

use crate::delivery::Delivery;
use crate::innings::{MatchInnings, group_by_match};
use crate::rates::{batting_average, strike_rate};

/// Figures for a single batting innings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BattingInnings {
    pub match_id: String,
    pub runs: u32,
    pub balls_faced: u32,
    pub fours: u32,
    pub sixes: u32,
    pub not_out: bool,
}

/// Career- or season-scoped batting summary. Computed fresh on every call;
/// fully determined by the input deliveries.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BattingSummary {
    pub matches_played: u32,
    pub innings_batted: u32,
    pub runs_scored: u32,
    pub balls_faced: u32,
    pub highest_score: u32,
    pub average: f64,
    pub strike_rate: f64,
    pub centuries: u32,
    pub half_centuries: u32,
    pub fours: u32,
    pub sixes: u32,
    pub not_outs: u32,
}

/// Per-innings batting figures. `player` is needed for not-out detection:
/// the innings ends not-out unless some ball in it dismissed this player.
pub fn batting_innings(group: &MatchInnings<'_>, player: &str) -> BattingInnings {
    let mut runs = 0u32;
    let mut fours = 0u32;
    let mut sixes = 0u32;
    let mut not_out = true;
    for ball in &group.balls {
        runs += ball.runs_batsman;
        match ball.runs_batsman {
            4 => fours += 1,
            6 => sixes += 1,
            _ => {}
        }
        if ball.wicket_fell() && ball.dismisses(player) {
            not_out = false;
        }
    }
    BattingInnings {
        match_id: group.match_id.to_string(),
        runs,
        // Every delivery faced counts, extras included.
        balls_faced: group.balls_count(),
        fours,
        sixes,
        not_out,
    }
}

pub fn batting_innings_figures(player: &str, rows: &[Delivery]) -> Vec<BattingInnings> {
    group_by_match(rows)
        .iter()
        .map(|group| batting_innings(group, player))
        .collect()
}

/// Batting summary over every innings in the feed. An empty feed yields a
/// zeroed summary, never a fault.
pub fn batting_summary(player: &str, rows: &[Delivery]) -> BattingSummary {
    let innings = batting_innings_figures(player, rows);
    let mut out = BattingSummary {
        matches_played: innings.len() as u32,
        innings_batted: innings.len() as u32,
        ..BattingSummary::default()
    };
    for inn in &innings {
        out.runs_scored += inn.runs;
        out.balls_faced += inn.balls_faced;
        out.fours += inn.fours;
        out.sixes += inn.sixes;
        out.highest_score = out.highest_score.max(inn.runs);
        if inn.not_out {
            out.not_outs += 1;
        }
        // A century is not also a half-century.
        if inn.runs >= 100 {
            out.centuries += 1;
        } else if inn.runs >= 50 {
            out.half_centuries += 1;
        }
    }
    out.average = batting_average(out.runs_scored, out.innings_batted, out.not_outs);
    out.strike_rate = strike_rate(out.runs_scored, out.balls_faced);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delivery::test_ball;

    const PLAYER: &str = "S Rao";

    #[test]
    fn empty_feed_yields_zeroed_summary() {
        let summary = batting_summary(PLAYER, &[]);
        assert_eq!(summary, BattingSummary::default());
    }

    #[test]
    fn innings_counts_boundaries_and_every_ball() {
        let rows = vec![
            test_ball("m1", 0.1, 4),
            test_ball("m1", 0.2, 6),
            test_ball("m1", 0.3, 0),
        ];
        let groups = group_by_match(&rows);
        let inn = batting_innings(&groups[0], PLAYER);
        assert_eq!(inn.runs, 10);
        assert_eq!(inn.balls_faced, 3);
        assert_eq!(inn.fours, 1);
        assert_eq!(inn.sixes, 1);
        assert!(inn.not_out);
    }

    #[test]
    fn dismissal_of_other_batter_stays_not_out() {
        let mut rows = vec![test_ball("m1", 0.1, 1)];
        rows.push({
            let mut b = test_ball("m1", 0.2, 0);
            b.wicket = Some("V Kale run out".to_string());
            b
        });
        let groups = group_by_match(&rows);
        assert!(batting_innings(&groups[0], PLAYER).not_out);
    }

    #[test]
    fn century_does_not_double_count_as_half_century() {
        let mut rows = Vec::new();
        for i in 0..25 {
            rows.push(test_ball("m1", i as f64, 4)); // 100 runs
        }
        for i in 0..13 {
            rows.push(test_ball("m2", i as f64, 4)); // 52 runs
        }
        let summary = batting_summary(PLAYER, &rows);
        assert_eq!(summary.centuries, 1);
        assert_eq!(summary.half_centuries, 1);
        assert_eq!(summary.highest_score, 100);
    }
}
