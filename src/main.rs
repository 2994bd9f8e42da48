use std::fs;

use anyhow::{Context, Result, anyhow};

use ipl_insights::bowling::WicketPolicy;
use ipl_insights::delivery::Delivery;
use ipl_insights::report::{InMemorySource, ReportOptions, player_performance_from};
use ipl_insights::sample_feed::{FeedConfig, generate_feed};

const USAGE: &str = "usage: ipl_insights <feed.json|--sample> <player> \
[--season YEAR] [--limit N] [--legacy-wickets] [--json]";

fn main() -> Result<()> {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let mut positional = Vec::new();
    let mut skip_value = false;
    for arg in &args {
        if skip_value {
            skip_value = false;
            continue;
        }
        if arg == "--season" || arg == "--limit" {
            skip_value = true;
            continue;
        }
        if arg.starts_with("--") && arg != "--sample" {
            continue;
        }
        positional.push(arg.as_str());
    }
    let [feed_arg, player] = positional.as_slice() else {
        return Err(anyhow!(USAGE));
    };

    let rows: Vec<Delivery> = if *feed_arg == "--sample" {
        generate_feed(&FeedConfig::default())
    } else {
        let raw = fs::read_to_string(*feed_arg)
            .with_context(|| format!("read delivery feed {feed_arg}"))?;
        serde_json::from_str(&raw).with_context(|| format!("parse delivery feed {feed_arg}"))?
    };

    let options = ReportOptions {
        season: parse_value_arg(&args, "--season")?,
        highlight_limit: parse_value_arg(&args, "--limit")?.unwrap_or(5),
        wicket_policy: if args.iter().any(|a| a == "--legacy-wickets") {
            WicketPolicy::AnyDismissal
        } else {
            WicketPolicy::CreditedOnly
        },
    };

    let source = InMemorySource::new(rows);
    let report = player_performance_from(&source, player, options)?;

    if args.iter().any(|a| a == "--json") {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("=== {} ===", report.player);
    if let Some(batting) = &report.batting {
        println!(
            "Batting: {} runs in {} innings, HS {}, avg {}, SR {}, 100s {}, 50s {}, {}x4 {}x6",
            batting.runs_scored,
            batting.innings_batted,
            batting.highest_score,
            batting.average,
            batting.strike_rate,
            batting.centuries,
            batting.half_centuries,
            batting.fours,
            batting.sixes,
        );
    }
    if let Some(bowling) = &report.bowling {
        println!(
            "Bowling: {} wkts in {} innings, best {}, avg {}, econ {}, SR {}",
            bowling.wickets,
            bowling.innings_bowled,
            bowling.best_figures,
            bowling.average,
            bowling.economy_rate,
            bowling.strike_rate,
        );
    }
    if report.batting.is_none() && report.bowling.is_none() {
        println!("no deliveries found for this player");
        return Ok(());
    }

    if !report.highest_scores.is_empty() {
        println!("-- Highest scores --");
        for inn in &report.highest_scores {
            println!(
                "  {}{} ({}) vs {} at {} [{}]",
                inn.runs,
                if inn.not_out { "*" } else { "" },
                inn.balls_faced,
                inn.opponent,
                inn.venue.as_deref().unwrap_or("unknown venue"),
                inn.result,
            );
        }
    }
    if !report.best_bowling.is_empty() {
        println!("-- Best bowling --");
        for inn in &report.best_bowling {
            println!(
                "  {} in {} overs vs {} [{}]",
                inn.figures, inn.overs, inn.opponent, inn.result,
            );
        }
    }
    if !report.against_teams.is_empty() {
        println!("-- Against teams --");
        for rec in &report.against_teams {
            let runs = rec.runs.map_or("-".to_string(), |r| r.to_string());
            let wickets = rec.wickets.map_or("-".to_string(), |w| w.to_string());
            println!(
                "  {:<20} matches={} runs={} wkts={}",
                rec.team, rec.matches, runs, wickets
            );
        }
    }
    if !report.by_season.is_empty() {
        println!("-- By season --");
        for rec in &report.by_season {
            let runs = rec.runs.map_or("-".to_string(), |r| r.to_string());
            let wickets = rec.wickets.map_or("-".to_string(), |w| w.to_string());
            println!(
                "  {} matches={} runs={} wkts={}",
                rec.season, rec.matches, runs, wickets
            );
        }
    }
    if !report.by_phase.is_empty() {
        println!("-- By phase --");
        for rec in &report.by_phase {
            let runs = rec.runs.map_or("-".to_string(), |r| r.to_string());
            let wickets = rec.wickets.map_or("-".to_string(), |w| w.to_string());
            println!(
                "  {:<22} innings={} runs={} wkts={}",
                rec.phase.label(),
                rec.innings,
                runs,
                wickets
            );
        }
    }
    if !report.data_quality.is_empty() {
        println!("-- Skipped rows --");
        for issue in &report.data_quality {
            println!("  {issue}");
        }
    }

    Ok(())
}

fn parse_value_arg<T: std::str::FromStr>(args: &[String], flag: &str) -> Result<Option<T>> {
    for (idx, arg) in args.iter().enumerate() {
        if let Some(raw) = arg.strip_prefix(&format!("{flag}=")) {
            let value = raw
                .trim()
                .parse::<T>()
                .map_err(|_| anyhow!("invalid value for {flag}: {raw}"))?;
            return Ok(Some(value));
        }
        if arg == flag {
            let Some(next) = args.get(idx + 1) else {
                return Err(anyhow!("{flag} expects a value"));
            };
            let value = next
                .trim()
                .parse::<T>()
                .map_err(|_| anyhow!("invalid value for {flag}: {next}"))?;
            return Ok(Some(value));
        }
    }
    Ok(None)
}
