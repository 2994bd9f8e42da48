//! Deterministic synthetic ball-by-ball feed for demos, benchmarks, and
//! integration tests. The generated log is shaped like the real import
//! (denormalized delivery + match rows) but the teams and players are
//! invented. Same seed, same feed.

use chrono::{Datelike, Days, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::delivery::Delivery;

#[derive(Debug, Clone, Copy)]
pub struct FeedConfig {
    pub matches: usize,
    pub seed: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self { matches: 60, seed: 7 }
    }
}

struct TeamSeed {
    name: &'static str,
    venue: &'static str,
    batters: [&'static str; 5],
    bowlers: [&'static str; 3],
}

static TEAMS: [TeamSeed; 6] = [
    TeamSeed {
        name: "Chennai Kings",
        venue: "Marina Stadium",
        batters: ["S Rao", "V Kale", "A Menon", "R Pillai", "D Joshi"],
        bowlers: ["K Swamy", "T Reddy", "N Iyer"],
    },
    TeamSeed {
        name: "Mumbai Titans",
        venue: "Harbour Gardens",
        batters: ["P Mehta", "J Shah", "H Desai", "L Naik", "C Patil"],
        bowlers: ["F Khan", "B Sawant", "M D'Souza"],
    },
    TeamSeed {
        name: "Delhi Chargers",
        venue: "Capital Oval",
        batters: ["G Malhotra", "U Chopra", "Y Sehgal", "O Bakshi", "W Anand"],
        bowlers: ["E Gill", "I Bedi", "Z Kapoor"],
    },
    TeamSeed {
        name: "Kolkata Tuskers",
        venue: "Hooghly Park",
        batters: ["A Bose", "S Ganguly", "R Dutta", "K Sen", "P Mitra"],
        bowlers: ["D Roy", "T Banerjee", "J Chatterjee"],
    },
    TeamSeed {
        name: "Punjab Lions",
        venue: "Amber Fields",
        batters: ["H Gill", "M Sandhu", "B Dhillon", "G Bajwa", "R Grewal"],
        bowlers: ["S Brar", "V Sidhu", "K Mann"],
    },
    TeamSeed {
        name: "Bengaluru Blazers",
        venue: "Garden City Ground",
        batters: ["N Shetty", "V Hegde", "P Kamath", "S Kulkarni", "A Pai"],
        bowlers: ["R Nair", "U Bhat", "L Acharya"],
    },
];

pub fn generate_feed(config: &FeedConfig) -> Vec<Delivery> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut rows = Vec::new();
    let opening_day = NaiveDate::from_ymd_opt(2018, 3, 31);

    for match_no in 0..config.matches {
        let home = &TEAMS[match_no % TEAMS.len()];
        let offset = 1 + rng.gen_range(0..TEAMS.len() - 1);
        let away = &TEAMS[(match_no + offset) % TEAMS.len()];
        let date = opening_day.and_then(|day| day.checked_add_days(Days::new(match_no as u64 * 3)));
        let season = date.map(|day| day.year() as u16);
        let winner = if rng.gen_bool(0.5) { home } else { away };
        let match_id = format!("match-{match_no:04}");

        let (first, second) = if rng.gen_bool(0.5) {
            (home, away)
        } else {
            (away, home)
        };
        for (label, batting, bowling) in [
            ("1st innings", first, second),
            ("2nd innings", second, first),
        ] {
            push_innings(
                &mut rows,
                &mut rng,
                InningsContext {
                    match_id: &match_id,
                    label,
                    date,
                    season,
                    venue: home.venue,
                    home: home.name,
                    away: away.name,
                    winner: winner.name,
                },
                batting,
                bowling,
            );
        }
    }
    rows
}

struct InningsContext<'a> {
    match_id: &'a str,
    label: &'static str,
    date: Option<NaiveDate>,
    season: Option<u16>,
    venue: &'static str,
    home: &'static str,
    away: &'static str,
    winner: &'static str,
}

fn push_innings(
    rows: &mut Vec<Delivery>,
    rng: &mut StdRng,
    ctx: InningsContext<'_>,
    batting: &TeamSeed,
    bowling: &TeamSeed,
) {
    let mut striker = 0usize;
    let mut non_striker = 1usize;
    let mut next_batter = 2usize;

    for over in 0..20u32 {
        let bowler = bowling.bowlers[(over as usize) % bowling.bowlers.len()];
        for ball in 1..=6u32 {
            let over_ball = over as f64 + ball as f64 / 10.0;
            let batsman = batting.batters[striker % batting.batters.len()];

            let roll = rng.gen_range(0..100u32);
            let (runs_batsman, wide) = match roll {
                0..=39 => (0, false),
                40..=64 => (1, false),
                65..=74 => (2, false),
                75..=89 => (4, false),
                90..=94 => (6, false),
                _ => (0, true),
            };
            let wicket = !wide && rng.gen_bool(0.035);

            let mut row = Delivery {
                match_id: ctx.match_id.to_string(),
                innings: ctx.label.to_string(),
                batting_team: batting.name.to_string(),
                over_ball,
                batsman: batsman.to_string(),
                bowler: bowler.to_string(),
                non_striker: batting.batters[non_striker % batting.batters.len()].to_string(),
                runs_batsman,
                runs_total: runs_batsman,
                extras_kind: None,
                extras_runs: 0,
                wicket: None,
                player_dismissed: None,
                dismissal_kind: None,
                match_date: ctx.date,
                venue: Some(ctx.venue.to_string()),
                team1: ctx.home.to_string(),
                team2: ctx.away.to_string(),
                winner: Some(ctx.winner.to_string()),
                season: ctx.season,
            };
            if wide {
                row.extras_kind = Some(crate::delivery::ExtrasKind::Wide);
                row.extras_runs = 1;
                row.runs_total = 1;
            }
            if wicket {
                let (kind, text) = match rng.gen_range(0..10u32) {
                    0..=4 => ("caught", format!("{batsman} caught b {bowler}")),
                    5..=6 => ("bowled", format!("{batsman} bowled {bowler}")),
                    7 => ("lbw", format!("{batsman} lbw b {bowler}")),
                    8 => ("stumped", format!("{batsman} stumped b {bowler}")),
                    _ => ("run out", format!("{batsman} run out")),
                };
                row.wicket = Some(text);
                row.dismissal_kind = Some(kind.to_string());
                row.player_dismissed = Some(batsman.to_string());
            }
            rows.push(row);

            if wicket {
                striker = next_batter;
                next_batter += 1;
            } else if runs_batsman % 2 == 1 {
                std::mem::swap(&mut striker, &mut non_striker);
            }
        }
        std::mem::swap(&mut striker, &mut non_striker);
    }
}
