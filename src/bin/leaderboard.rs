use std::fs;

use anyhow::{Context, Result, anyhow};
use rayon::prelude::*;

use ipl_insights::batting::batting_summary;
use ipl_insights::bowling::{WicketPolicy, bowling_summary};
use ipl_insights::delivery::{Delivery, Role, sanitize_feed};
use ipl_insights::report::{DeliverySource, InMemorySource};
use ipl_insights::sample_feed::{FeedConfig, generate_feed};

const USAGE: &str = "usage: leaderboard <feed.json|--sample> [--season YEAR] [--top N]";

struct PlayerLine {
    name: String,
    runs: u32,
    strike_rate: f64,
    wickets: u32,
    economy: f64,
}

fn main() -> Result<()> {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let mut feed_arg: Option<&str> = None;
    let mut skip_value = false;
    for arg in &args {
        if skip_value {
            skip_value = false;
            continue;
        }
        if arg == "--season" || arg == "--top" {
            skip_value = true;
            continue;
        }
        if !arg.starts_with("--") || arg == "--sample" {
            feed_arg = Some(arg);
            break;
        }
    }
    let feed_arg = feed_arg.ok_or_else(|| anyhow!(USAGE))?;
    let season = parse_season(&args)?;
    let top = parse_top(&args)?.unwrap_or(10);

    let rows: Vec<Delivery> = if feed_arg == "--sample" {
        generate_feed(&FeedConfig::default())
    } else {
        let raw =
            fs::read_to_string(feed_arg).with_context(|| format!("read delivery feed {feed_arg}"))?;
        serde_json::from_str(&raw).with_context(|| format!("parse delivery feed {feed_arg}"))?
    };
    let (rows, issues) = sanitize_feed(rows);
    if !issues.is_empty() {
        eprintln!("skipped {} malformed rows", issues.len());
    }

    let source = InMemorySource::new(rows);
    let names = source.player_names();

    // Summaries are independent per player, so the whole board fans out.
    let mut lines: Vec<PlayerLine> = names
        .par_iter()
        .map(|name| {
            let batting_rows = source
                .fetch_deliveries(name, Role::Batting, season)
                .unwrap_or_default();
            let bowling_rows = source
                .fetch_deliveries(name, Role::Bowling, season)
                .unwrap_or_default();
            let batting = batting_summary(name, &batting_rows);
            let bowling = bowling_summary(&bowling_rows, WicketPolicy::CreditedOnly);
            PlayerLine {
                name: name.clone(),
                runs: batting.runs_scored,
                strike_rate: batting.strike_rate,
                wickets: bowling.wickets,
                economy: bowling.economy_rate,
            }
        })
        .collect();

    println!("== Top run scorers ==");
    lines.sort_by(|a, b| {
        b.runs
            .cmp(&a.runs)
            .then_with(|| b.strike_rate.total_cmp(&a.strike_rate))
            .then_with(|| a.name.cmp(&b.name))
    });
    for line in lines.iter().take(top).filter(|l| l.runs > 0) {
        println!("  {:<16} {:>5} runs  SR {}", line.name, line.runs, line.strike_rate);
    }

    println!("== Top wicket takers ==");
    lines.sort_by(|a, b| {
        b.wickets
            .cmp(&a.wickets)
            .then_with(|| a.economy.total_cmp(&b.economy))
            .then_with(|| a.name.cmp(&b.name))
    });
    for line in lines.iter().take(top).filter(|l| l.wickets > 0) {
        println!(
            "  {:<16} {:>3} wkts  econ {}",
            line.name, line.wickets, line.economy
        );
    }

    Ok(())
}

fn parse_season(args: &[String]) -> Result<Option<u16>> {
    parse_flag(args, "--season")
}

fn parse_top(args: &[String]) -> Result<Option<usize>> {
    parse_flag(args, "--top")
}

fn parse_flag<T: std::str::FromStr>(args: &[String], flag: &str) -> Result<Option<T>> {
    for (idx, arg) in args.iter().enumerate() {
        if let Some(raw) = arg.strip_prefix(&format!("{flag}=")) {
            return raw
                .trim()
                .parse::<T>()
                .map(Some)
                .map_err(|_| anyhow!("invalid value for {flag}: {raw}"));
        }
        if arg == flag {
            let Some(next) = args.get(idx + 1) else {
                return Err(anyhow!("{flag} expects a value"));
            };
            return next
                .trim()
                .parse::<T>()
                .map(Some)
                .map_err(|_| anyhow!("invalid value for {flag}: {next}"));
        }
    }
    Ok(None)
}
