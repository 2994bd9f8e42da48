use std::collections::HashMap;

use crate::delivery::Delivery;

/// One player's innings in one match: every ball of the feed that belongs to
/// that match, in feed order. A player has at most one batting and one
/// bowling innings per match, so for a role-filtered feed match id is the
/// innings identity.
#[derive(Debug)]
pub struct MatchInnings<'a> {
    pub match_id: &'a str,
    pub balls: Vec<&'a Delivery>,
}

impl<'a> MatchInnings<'a> {
    /// Match metadata is constant across an innings; the first ball carries it.
    pub fn meta(&self) -> &'a Delivery {
        self.balls[0]
    }

    pub fn balls_count(&self) -> u32 {
        self.balls.len() as u32
    }
}

/// Partitions a role-filtered delivery list into per-match innings. Matches
/// keep their first-seen order and balls keep feed order, so the output is
/// deterministic for a deterministic feed. An empty feed is no data, not a
/// fault: it yields an empty list.
pub fn group_by_match<'a>(rows: &'a [Delivery]) -> Vec<MatchInnings<'a>> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<MatchInnings<'a>> = Vec::new();
    for ball in rows {
        let slot = match index.get(ball.match_id.as_str()) {
            Some(&i) => i,
            None => {
                index.insert(&ball.match_id, groups.len());
                groups.push(MatchInnings {
                    match_id: &ball.match_id,
                    balls: Vec::new(),
                });
                groups.len() - 1
            }
        };
        groups[slot].balls.push(ball);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delivery::test_ball;

    #[test]
    fn empty_feed_yields_no_groups() {
        assert!(group_by_match(&[]).is_empty());
    }

    #[test]
    fn groups_preserve_encounter_and_ball_order() {
        let rows = vec![
            test_ball("m1", 0.1, 1),
            test_ball("m2", 0.1, 4),
            test_ball("m1", 0.2, 2),
            test_ball("m2", 0.2, 0),
            test_ball("m1", 0.3, 6),
        ];
        let groups = group_by_match(&rows);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].match_id, "m1");
        assert_eq!(groups[0].balls_count(), 3);
        assert_eq!(groups[1].match_id, "m2");
        assert_eq!(groups[1].balls_count(), 2);
        let m1_runs: Vec<u32> = groups[0].balls.iter().map(|b| b.runs_batsman).collect();
        assert_eq!(m1_runs, vec![1, 2, 6]);
    }
}
