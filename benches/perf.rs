use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use ipl_insights::batting::batting_summary;
use ipl_insights::bowling::{WicketPolicy, bowling_summary};
use ipl_insights::delivery::{Delivery, Role};
use ipl_insights::innings::group_by_match;
use ipl_insights::report::{ReportOptions, player_performance};
use ipl_insights::sample_feed::{FeedConfig, generate_feed};

fn busiest_player(rows: &[Delivery]) -> String {
    use std::collections::HashMap;
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for ball in rows {
        *counts.entry(ball.batsman.as_str()).or_default() += 1;
    }
    let mut pairs: Vec<(&str, usize)> = counts.into_iter().collect();
    pairs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    pairs
        .first()
        .map(|(name, _)| name.to_string())
        .unwrap_or_default()
}

fn role_rows(rows: &[Delivery], player: &str, role: Role) -> Vec<Delivery> {
    rows.iter()
        .filter(|ball| match role {
            Role::Batting => ball.batsman == player,
            Role::Bowling => ball.bowler == player,
        })
        .cloned()
        .collect()
}

fn bench_group_by_match(c: &mut Criterion) {
    let feed = generate_feed(&FeedConfig::default());
    let player = busiest_player(&feed);
    let rows = role_rows(&feed, &player, Role::Batting);
    c.bench_function("group_by_match", |b| {
        b.iter(|| {
            let groups = group_by_match(black_box(&rows));
            black_box(groups.len());
        })
    });
}

fn bench_summaries(c: &mut Criterion) {
    let feed = generate_feed(&FeedConfig::default());
    let player = busiest_player(&feed);
    let batting_rows = role_rows(&feed, &player, Role::Batting);
    let bowling_rows = role_rows(&feed, "K Swamy", Role::Bowling);

    c.bench_function("batting_summary", |b| {
        b.iter(|| {
            let summary = batting_summary(black_box(&player), black_box(&batting_rows));
            black_box(summary.runs_scored);
        })
    });
    c.bench_function("bowling_summary", |b| {
        b.iter(|| {
            let summary =
                bowling_summary(black_box(&bowling_rows), WicketPolicy::CreditedOnly);
            black_box(summary.wickets);
        })
    });
}

fn bench_full_report(c: &mut Criterion) {
    let feed = generate_feed(&FeedConfig::default());
    let player = busiest_player(&feed);
    let batting_rows = role_rows(&feed, &player, Role::Batting);
    let bowling_rows = role_rows(&feed, &player, Role::Bowling);

    c.bench_function("player_performance", |b| {
        b.iter(|| {
            let report = player_performance(
                black_box(&player),
                batting_rows.clone(),
                bowling_rows.clone(),
                ReportOptions::default(),
            );
            black_box(report.against_teams.len());
        })
    });
}

criterion_group!(benches, bench_group_by_match, bench_summaries, bench_full_report);
criterion_main!(benches);
