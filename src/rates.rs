//! Rate and average arithmetic shared by every aggregator. Division by zero
//! always resolves to 0.0 so numeric fields are never absent or NaN.

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Runs per 100 balls faced.
pub fn strike_rate(runs: u32, balls: u32) -> f64 {
    if balls == 0 {
        return 0.0;
    }
    round2(runs as f64 / balls as f64 * 100.0)
}

pub fn batting_average(runs: u32, innings: u32, not_outs: u32) -> f64 {
    let dismissals = innings.saturating_sub(not_outs);
    if dismissals == 0 {
        return 0.0;
    }
    round2(runs as f64 / dismissals as f64)
}

/// Runs per innings, the per-dimension batting "average" (dismissals are not
/// tracked at that grain).
pub fn runs_per_innings(runs: u32, innings: u32) -> f64 {
    if innings == 0 {
        return 0.0;
    }
    round2(runs as f64 / innings as f64)
}

/// Runs conceded per over bowled.
pub fn economy_rate(runs: u32, overs: f64) -> f64 {
    if overs == 0.0 {
        return 0.0;
    }
    round2(runs as f64 / overs)
}

pub fn bowling_average(runs: u32, wickets: u32) -> f64 {
    if wickets == 0 {
        return 0.0;
    }
    round2(runs as f64 / wickets as f64)
}

pub fn bowling_strike_rate(balls: u32, wickets: u32) -> f64 {
    if wickets == 0 {
        return 0.0;
    }
    round2(balls as f64 / wickets as f64)
}

/// Cricket's ball-in-over notation, not a decimal: 23 balls is 3.5 overs
/// (3 overs and 5 balls).
pub fn overs_notation(balls: u32) -> f64 {
    (balls / 6) as f64 + (balls % 6) as f64 / 10.0
}
