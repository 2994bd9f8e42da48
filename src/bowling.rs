use serde::{Deserialize, Serialize};

use crate::delivery::Delivery;
use crate::innings::{MatchInnings, group_by_match};
use crate::rates::{bowling_average, bowling_strike_rate, economy_rate, overs_notation};

/// Which dismissals count as the bowler's wicket. The source data was
/// aggregated both ways, so the rule stays a named switch: `CreditedOnly`
/// follows cricket convention and is the default, `AnyDismissal` reproduces
/// the legacy count where every fallen wicket went to the bowler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WicketPolicy {
    #[default]
    CreditedOnly,
    AnyDismissal,
}

pub fn is_bowler_wicket(ball: &Delivery, policy: WicketPolicy) -> bool {
    if !ball.wicket_fell() {
        return false;
    }
    match policy {
        WicketPolicy::AnyDismissal => true,
        // A wicket with an unparseable kind stays credited; only the three
        // known non-credited kinds are excluded.
        WicketPolicy::CreditedOnly => ball.dismissal().is_none_or(|kind| kind.credits_bowler()),
    }
}

/// Figures for a single bowling innings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BowlingInnings {
    pub match_id: String,
    pub wickets: u32,
    pub runs_conceded: u32,
    pub balls_bowled: u32,
    /// Ball-in-over notation: 23 balls bowled reads 3.5.
    pub overs: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BowlingSummary {
    pub matches_played: u32,
    pub innings_bowled: u32,
    pub overs_bowled: f64,
    pub balls_bowled: u32,
    pub runs_conceded: u32,
    pub wickets: u32,
    /// "wickets/runs" of the best innings, "0/0" when wicketless.
    pub best_figures: String,
    pub average: f64,
    pub economy_rate: f64,
    pub strike_rate: f64,
    pub four_wicket_hauls: u32,
    pub five_wicket_hauls: u32,
}

impl Default for BowlingSummary {
    fn default() -> Self {
        Self {
            matches_played: 0,
            innings_bowled: 0,
            overs_bowled: 0.0,
            balls_bowled: 0,
            runs_conceded: 0,
            wickets: 0,
            best_figures: "0/0".to_string(),
            average: 0.0,
            economy_rate: 0.0,
            strike_rate: 0.0,
            four_wicket_hauls: 0,
            five_wicket_hauls: 0,
        }
    }
}

pub fn bowling_innings(group: &MatchInnings<'_>, policy: WicketPolicy) -> BowlingInnings {
    let mut wickets = 0u32;
    let mut runs_conceded = 0u32;
    for ball in &group.balls {
        // Runs off the ball are charged in full, extras included.
        runs_conceded += ball.runs_total;
        if is_bowler_wicket(ball, policy) {
            wickets += 1;
        }
    }
    let balls_bowled = group.balls_count();
    BowlingInnings {
        match_id: group.match_id.to_string(),
        wickets,
        runs_conceded,
        balls_bowled,
        overs: overs_notation(balls_bowled),
    }
}

pub fn bowling_innings_figures(rows: &[Delivery], policy: WicketPolicy) -> Vec<BowlingInnings> {
    group_by_match(rows)
        .iter()
        .map(|group| bowling_innings(group, policy))
        .collect()
}

/// Most wickets wins; ties break on fewest runs conceded.
pub fn best_figures(innings: &[BowlingInnings]) -> String {
    let mut best: Option<(u32, u32)> = None;
    for inn in innings {
        let better = match best {
            None => true,
            Some((wickets, runs)) => {
                inn.wickets > wickets || (inn.wickets == wickets && inn.runs_conceded < runs)
            }
        };
        if better {
            best = Some((inn.wickets, inn.runs_conceded));
        }
    }
    match best {
        Some((wickets, runs)) if wickets > 0 => format!("{wickets}/{runs}"),
        _ => "0/0".to_string(),
    }
}

/// Bowling summary over every innings in the feed. An empty feed yields a
/// zeroed summary, never a fault.
pub fn bowling_summary(rows: &[Delivery], policy: WicketPolicy) -> BowlingSummary {
    let innings = bowling_innings_figures(rows, policy);
    let mut out = BowlingSummary {
        matches_played: innings.len() as u32,
        innings_bowled: innings.len() as u32,
        ..BowlingSummary::default()
    };
    for inn in &innings {
        out.wickets += inn.wickets;
        out.runs_conceded += inn.runs_conceded;
        out.balls_bowled += inn.balls_bowled;
        // The haul buckets are exclusive: a 5-for is not also a 4-for.
        if inn.wickets >= 5 {
            out.five_wicket_hauls += 1;
        } else if inn.wickets >= 4 {
            out.four_wicket_hauls += 1;
        }
    }
    out.overs_bowled = overs_notation(out.balls_bowled);
    out.best_figures = best_figures(&innings);
    out.average = bowling_average(out.runs_conceded, out.wickets);
    out.economy_rate = economy_rate(out.runs_conceded, out.overs_bowled);
    out.strike_rate = bowling_strike_rate(out.balls_bowled, out.wickets);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delivery::test_ball;

    fn wicket_ball(match_id: &str, over_ball: f64, text: &str) -> Delivery {
        let mut b = test_ball(match_id, over_ball, 0);
        b.wicket = Some(text.to_string());
        b
    }

    #[test]
    fn run_out_is_not_the_bowlers_wicket_by_default() {
        let credited = wicket_ball("m1", 0.1, "V Kale c fielder b P Mehta");
        let run_out = wicket_ball("m1", 0.2, "V Kale run out (throw)");
        assert!(is_bowler_wicket(&credited, WicketPolicy::CreditedOnly));
        assert!(!is_bowler_wicket(&run_out, WicketPolicy::CreditedOnly));
        assert!(is_bowler_wicket(&run_out, WicketPolicy::AnyDismissal));
    }

    #[test]
    fn structured_kind_wins_over_text() {
        let mut b = test_ball("m1", 0.3, 0);
        b.dismissal_kind = Some("run out".to_string());
        b.wicket = Some("V Kale b P Mehta".to_string());
        assert!(!is_bowler_wicket(&b, WicketPolicy::CreditedOnly));
    }

    #[test]
    fn best_figures_break_ties_on_fewest_runs() {
        let innings = vec![
            BowlingInnings {
                match_id: "m1".to_string(),
                wickets: 3,
                runs_conceded: 30,
                balls_bowled: 24,
                overs: 4.0,
            },
            BowlingInnings {
                match_id: "m2".to_string(),
                wickets: 3,
                runs_conceded: 21,
                balls_bowled: 24,
                overs: 4.0,
            },
            BowlingInnings {
                match_id: "m3".to_string(),
                wickets: 1,
                runs_conceded: 5,
                balls_bowled: 12,
                overs: 2.0,
            },
        ];
        assert_eq!(best_figures(&innings), "3/21");
    }

    #[test]
    fn wicketless_career_reads_zero_for_zero() {
        assert_eq!(best_figures(&[]), "0/0");
        let rows = vec![test_ball("m1", 0.1, 4)];
        let summary = bowling_summary(&rows, WicketPolicy::default());
        assert_eq!(summary.best_figures, "0/0");
        assert_eq!(summary.wickets, 0);
        assert_eq!(summary.average, 0.0);
    }

    #[test]
    fn haul_buckets_are_exclusive() {
        let mut rows = Vec::new();
        for i in 0..5 {
            rows.push(wicket_ball("m1", i as f64 + 0.1, "batter caught b P Mehta"));
        }
        for i in 0..4 {
            rows.push(wicket_ball("m2", i as f64 + 0.1, "batter bowled P Mehta"));
        }
        let summary = bowling_summary(&rows, WicketPolicy::default());
        assert_eq!(summary.five_wicket_hauls, 1);
        assert_eq!(summary.four_wicket_hauls, 1);
    }
}
