use std::fmt;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Which side of a delivery the player under analysis is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Batting,
    Bowling,
}

/// Extras vocabulary as it appears in import files. Importers spell these a
/// few different ways ("wides", "legbyes"), so deserialization is lenient and
/// anything unrecognized lands in `Other` rather than failing the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum ExtrasKind {
    Wide,
    NoBall,
    Bye,
    LegBye,
    Penalty,
    Other,
}

impl From<String> for ExtrasKind {
    fn from(raw: String) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "wide" | "wides" => ExtrasKind::Wide,
            "noball" | "noballs" | "no_ball" | "no ball" => ExtrasKind::NoBall,
            "bye" | "byes" => ExtrasKind::Bye,
            "legbye" | "legbyes" | "leg_bye" | "leg bye" => ExtrasKind::LegBye,
            "penalty" => ExtrasKind::Penalty,
            _ => ExtrasKind::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissalKind {
    Caught,
    Bowled,
    Lbw,
    Stumped,
    CaughtAndBowled,
    HitWicket,
    RunOut,
    RetiredHurt,
    ObstructingTheField,
}

// Checked in order; compound kinds must come before their substrings
// ("caught and bowled" before "caught"/"bowled").
static DISMISSAL_NEEDLES: Lazy<Vec<(&'static str, DismissalKind)>> = Lazy::new(|| {
    vec![
        ("caught and bowled", DismissalKind::CaughtAndBowled),
        ("run out", DismissalKind::RunOut),
        ("retired hurt", DismissalKind::RetiredHurt),
        ("obstructing the field", DismissalKind::ObstructingTheField),
        ("hit wicket", DismissalKind::HitWicket),
        ("stumped", DismissalKind::Stumped),
        ("lbw", DismissalKind::Lbw),
        ("caught", DismissalKind::Caught),
        ("bowled", DismissalKind::Bowled),
    ]
});

impl DismissalKind {
    /// Run outs, retirements, and obstruction are not the bowler's wicket.
    pub fn credits_bowler(self) -> bool {
        !matches!(
            self,
            DismissalKind::RunOut | DismissalKind::RetiredHurt | DismissalKind::ObstructingTheField
        )
    }

    pub fn from_text(text: &str) -> Option<DismissalKind> {
        let lower = text.to_lowercase();
        DISMISSAL_NEEDLES
            .iter()
            .find(|(needle, _)| lower.contains(needle))
            .map(|(_, kind)| *kind)
    }
}

/// One ball of play, denormalized with the metadata of the match it belongs
/// to. Deliveries are immutable historical facts; the engine only reads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Delivery {
    pub match_id: String,
    /// Innings-of-the-match label, e.g. "1st innings".
    pub innings: String,
    /// The team at the crease for this ball. A bowler's own team is the
    /// other side of the match.
    pub batting_team: String,
    /// Over-and-ball position: 14.3 is the 4th ball of the 15th over.
    pub over_ball: f64,
    pub batsman: String,
    pub bowler: String,
    #[serde(default)]
    pub non_striker: String,
    pub runs_batsman: u32,
    pub runs_total: u32,
    #[serde(default)]
    pub extras_kind: Option<ExtrasKind>,
    #[serde(default)]
    pub extras_runs: u32,
    /// Raw dismissal text; empty or missing when no wicket fell on this ball.
    #[serde(default)]
    pub wicket: Option<String>,
    /// Structured dismissal fields, present when the importer supplies them.
    /// They take precedence over parsing the raw text.
    #[serde(default)]
    pub player_dismissed: Option<String>,
    #[serde(default)]
    pub dismissal_kind: Option<String>,
    #[serde(default)]
    pub match_date: Option<NaiveDate>,
    #[serde(default)]
    pub venue: Option<String>,
    pub team1: String,
    pub team2: String,
    #[serde(default)]
    pub winner: Option<String>,
    #[serde(default)]
    pub season: Option<u16>,
}

impl Delivery {
    pub fn wicket_fell(&self) -> bool {
        self.wicket.as_deref().is_some_and(|s| !s.trim().is_empty())
            || self
                .player_dismissed
                .as_deref()
                .is_some_and(|s| !s.trim().is_empty())
            || self
                .dismissal_kind
                .as_deref()
                .is_some_and(|s| !s.trim().is_empty())
    }

    pub fn dismissal(&self) -> Option<DismissalKind> {
        if !self.wicket_fell() {
            return None;
        }
        self.dismissal_kind
            .as_deref()
            .and_then(DismissalKind::from_text)
            .or_else(|| self.wicket.as_deref().and_then(DismissalKind::from_text))
    }

    /// Whether this ball dismissed the named player. Uses the structured
    /// `player_dismissed` field when present; otherwise falls back to a
    /// substring match against the raw dismissal text. The fallback can
    /// mis-attribute when one player's name is contained in another's.
    pub fn dismisses(&self, player: &str) -> bool {
        if let Some(name) = self.player_dismissed.as_deref() {
            return name == player;
        }
        self.wicket.as_deref().is_some_and(|text| text.contains(player))
    }

    pub fn own_team(&self, role: Role) -> &str {
        match role {
            Role::Batting => &self.batting_team,
            Role::Bowling => self.other_team(),
        }
    }

    /// The team faced: for a batsman the fielding side, for a bowler the
    /// side at the crease.
    pub fn opponent(&self, role: Role) -> &str {
        match role {
            Role::Batting => self.other_team(),
            Role::Bowling => &self.batting_team,
        }
    }

    fn other_team(&self) -> &str {
        if self.batting_team == self.team1 {
            &self.team2
        } else {
            &self.team1
        }
    }

    /// "Win" when the recorded winner is the player's team; everything else
    /// (loss, tie, no result) reads "Loss", matching the source data.
    pub fn result_for(&self, role: Role) -> &'static str {
        if self.winner.as_deref() == Some(self.own_team(role)) {
            "Win"
        } else {
            "Loss"
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DataQualityIssue {
    /// Zero-based position of the offending row in the input feed.
    pub row: usize,
    pub match_id: Option<String>,
    pub reason: String,
}

impl fmt::Display for DataQualityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.match_id.as_deref() {
            Some(id) => write!(f, "row {} (match {}): {}", self.row, id, self.reason),
            None => write!(f, "row {}: {}", self.row, self.reason),
        }
    }
}

/// Splits a raw feed into usable rows and skipped rows. A malformed row is a
/// local data-quality problem, never a reason to blank the whole player.
pub fn sanitize_feed(rows: Vec<Delivery>) -> (Vec<Delivery>, Vec<DataQualityIssue>) {
    let mut clean = Vec::with_capacity(rows.len());
    let mut issues = Vec::new();
    for (row, ball) in rows.into_iter().enumerate() {
        if ball.match_id.trim().is_empty() {
            issues.push(DataQualityIssue {
                row,
                match_id: None,
                reason: "missing match id".to_string(),
            });
            continue;
        }
        if !ball.over_ball.is_finite() || ball.over_ball < 0.0 {
            issues.push(DataQualityIssue {
                row,
                match_id: Some(ball.match_id.clone()),
                reason: format!("invalid over/ball position {}", ball.over_ball),
            });
            continue;
        }
        clean.push(ball);
    }
    (clean, issues)
}

/// Minimal well-formed delivery for unit tests across the crate.
#[cfg(test)]
pub(crate) fn test_ball(match_id: &str, over_ball: f64, runs_batsman: u32) -> Delivery {
    Delivery {
        match_id: match_id.to_string(),
        innings: "1st innings".to_string(),
        batting_team: "Chennai".to_string(),
        over_ball,
        batsman: "S Rao".to_string(),
        bowler: "P Mehta".to_string(),
        non_striker: "V Kale".to_string(),
        runs_batsman,
        runs_total: runs_batsman,
        extras_kind: None,
        extras_runs: 0,
        wicket: None,
        player_dismissed: None,
        dismissal_kind: None,
        match_date: None,
        venue: Some("Chepauk".to_string()),
        team1: "Chennai".to_string(),
        team2: "Mumbai".to_string(),
        winner: Some("Mumbai".to_string()),
        season: Some(2019),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ball() -> Delivery {
        test_ball("m1", 0.1, 0)
    }

    #[test]
    fn dismissal_text_parses_compound_kinds_first() {
        assert_eq!(
            DismissalKind::from_text("caught and bowled P Mehta"),
            Some(DismissalKind::CaughtAndBowled)
        );
        assert_eq!(
            DismissalKind::from_text("S Rao run out (direct hit)"),
            Some(DismissalKind::RunOut)
        );
        assert_eq!(DismissalKind::from_text("retired out"), None);
    }

    #[test]
    fn structured_dismissal_beats_substring_fallback() {
        let mut b = ball();
        b.wicket = Some("V Kale caught".to_string());
        b.player_dismissed = Some("S Rao".to_string());
        // Structured field says S Rao even though the text names V Kale.
        assert!(b.dismisses("S Rao"));
        assert!(!b.dismisses("V Kale"));
    }

    #[test]
    fn substring_fallback_matches_text() {
        let mut b = ball();
        b.wicket = Some("S Rao c keeper b P Mehta".to_string());
        assert!(b.dismisses("S Rao"));
        assert!(!b.dismisses("V Kale"));
    }

    #[test]
    fn teams_and_result_depend_on_role() {
        let b = ball();
        assert_eq!(b.own_team(Role::Batting), "Chennai");
        assert_eq!(b.opponent(Role::Batting), "Mumbai");
        assert_eq!(b.own_team(Role::Bowling), "Mumbai");
        assert_eq!(b.opponent(Role::Bowling), "Chennai");
        assert_eq!(b.result_for(Role::Batting), "Loss");
        assert_eq!(b.result_for(Role::Bowling), "Win");
    }

    #[test]
    fn sanitize_skips_bad_rows_and_reports() {
        let mut bad_id = ball();
        bad_id.match_id = "  ".to_string();
        let mut bad_over = ball();
        bad_over.over_ball = f64::NAN;
        let (clean, issues) = sanitize_feed(vec![ball(), bad_id, bad_over]);
        assert_eq!(clean.len(), 1);
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].row, 1);
        assert_eq!(issues[1].row, 2);
        assert_eq!(issues[1].match_id.as_deref(), Some("m1"));
    }

    #[test]
    fn extras_vocabulary_is_lenient() {
        let kind: ExtrasKind = serde_json::from_str("\"legbyes\"").expect("string parses");
        assert_eq!(kind, ExtrasKind::LegBye);
        let kind: ExtrasKind = serde_json::from_str("\"wides\"").expect("string parses");
        assert_eq!(kind, ExtrasKind::Wide);
        let kind: ExtrasKind = serde_json::from_str("\"freak\"").expect("string parses");
        assert_eq!(kind, ExtrasKind::Other);
    }

    #[test]
    fn blank_wicket_text_is_no_wicket() {
        let mut b = ball();
        b.wicket = Some("".to_string());
        assert!(!b.wicket_fell());
        b.wicket = Some("S Rao bowled".to_string());
        assert!(b.wicket_fell());
        assert_eq!(b.dismissal(), Some(DismissalKind::Bowled));
    }
}
