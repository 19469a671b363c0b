//! Leaderboard ranking and per-position aggregation.
//!
//! Pure functions over player record slices:
//! - Top-N leaderboards per metric
//! - Position distribution counts
//! - Average KDA per position
//!
//! Grouped results keep first-appearance order so chart categories are
//! stable across renders of the same dataset.

use std::cmp::Ordering;

use crate::models::{Metric, PlayerRecord};

/// Rank players descending by a metric, keeping at most `limit` entries.
///
/// The sort is stable: players with equal metric values stay in their
/// original load order. Players without a value for the metric are excluded.
pub fn leaderboard<'a>(
    players: &[&'a PlayerRecord],
    metric: Metric,
    limit: usize,
) -> Vec<&'a PlayerRecord> {
    let mut ranked: Vec<&PlayerRecord> = players
        .iter()
        .copied()
        .filter(|p| p.metric(metric).is_some())
        .collect();

    ranked.sort_by(|a, b| {
        let av = a.metric(metric).unwrap_or(f64::NEG_INFINITY);
        let bv = b.metric(metric).unwrap_or(f64::NEG_INFINITY);
        bv.partial_cmp(&av).unwrap_or(Ordering::Equal)
    });
    ranked.truncate(limit);
    ranked
}

/// Exact-match position filter, preserving original order.
pub fn filter_by_position<'a>(players: &'a [PlayerRecord], position: &str) -> Vec<&'a PlayerRecord> {
    players.iter().filter(|p| p.position == position).collect()
}

/// Distinct position values in first-appearance order.
pub fn positions(players: &[PlayerRecord]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for p in players {
        if !seen.iter().any(|s| s == &p.position) {
            seen.push(p.position.clone());
        }
    }
    seen
}

/// Count of players per position, first-appearance order.
///
/// Positions with no players never appear; a group implies count >= 1.
pub fn position_counts(players: &[PlayerRecord]) -> Vec<(String, u32)> {
    let mut counts: Vec<(String, u32)> = Vec::new();
    for p in players {
        match counts.iter_mut().find(|(name, _)| name == &p.position) {
            Some((_, count)) => *count += 1,
            None => counts.push((p.position.clone(), 1)),
        }
    }
    counts
}

/// Arithmetic mean of KDA per position, first-appearance order.
pub fn average_kda_by_position(players: &[PlayerRecord]) -> Vec<(String, f64)> {
    let mut sums: Vec<(String, f64, u32)> = Vec::new();
    for p in players {
        match sums.iter_mut().find(|(name, _, _)| name == &p.position) {
            Some((_, sum, count)) => {
                *sum += p.kda;
                *count += 1;
            }
            None => sums.push((p.position.clone(), p.kda, 1)),
        }
    }

    sums.into_iter()
        .map(|(name, sum, count)| (name, sum / count as f64))
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn player(name: &str, position: &str, win_rate: f64, kda: f64) -> PlayerRecord {
        PlayerRecord {
            player_name: name.to_string(),
            team_name: None,
            position: position.to_string(),
            win_rate,
            kda,
            kill_participation: 50.0,
            damage_per_minute: 400.0,
            gold_per_minute: None,
        }
    }

    fn names(ranked: &[&PlayerRecord]) -> Vec<String> {
        ranked.iter().map(|p| p.player_name.clone()).collect()
    }

    #[test]
    fn test_leaderboard_sorts_descending() {
        let players = vec![
            player("A", "Mid", 0.6, 4.0),
            player("B", "Mid", 0.6, 3.0),
            player("C", "Top", 0.9, 5.0),
        ];
        let refs: Vec<&PlayerRecord> = players.iter().collect();

        let top = leaderboard(&refs, Metric::WinRate, 5);
        assert_eq!(names(&top), vec!["C", "A", "B"]);

        let top = leaderboard(&refs, Metric::Kda, 5);
        assert_eq!(names(&top), vec!["C", "A", "B"]);
    }

    #[test]
    fn test_leaderboard_ties_keep_load_order() {
        let players = vec![
            player("First", "Mid", 0.5, 3.0),
            player("Second", "Top", 0.5, 3.0),
            player("Third", "Bot", 0.5, 3.0),
        ];
        let refs: Vec<&PlayerRecord> = players.iter().collect();

        let top = leaderboard(&refs, Metric::WinRate, 5);
        assert_eq!(names(&top), vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_leaderboard_truncates_to_limit() {
        let players: Vec<PlayerRecord> = (0..8)
            .map(|i| player(&format!("P{}", i), "Mid", 0.1 * i as f64, i as f64))
            .collect();
        let refs: Vec<&PlayerRecord> = players.iter().collect();

        let top = leaderboard(&refs, Metric::Kda, 5);
        assert_eq!(top.len(), 5);
        assert_eq!(top[0].player_name, "P7");
    }

    #[test]
    fn test_leaderboard_fewer_players_than_limit() {
        let players = vec![player("A", "Mid", 0.6, 4.0)];
        let refs: Vec<&PlayerRecord> = players.iter().collect();

        let top = leaderboard(&refs, Metric::DamagePerMinute, 5);
        assert_eq!(top.len(), 1);
    }

    #[test]
    fn test_leaderboard_skips_missing_metric() {
        let mut with_gpm = player("A", "Mid", 0.6, 4.0);
        with_gpm.gold_per_minute = Some(400.0);
        let without_gpm = player("B", "Mid", 0.7, 5.0);

        let players = vec![with_gpm, without_gpm];
        let refs: Vec<&PlayerRecord> = players.iter().collect();

        let top = leaderboard(&refs, Metric::GoldPerMinute, 5);
        assert_eq!(names(&top), vec!["A"]);
    }

    #[test]
    fn test_leaderboard_empty() {
        let top = leaderboard(&[], Metric::WinRate, 5);
        assert!(top.is_empty());
    }

    #[test]
    fn test_filter_by_position_preserves_order() {
        let players = vec![
            player("A", "Mid", 0.6, 4.0),
            player("B", "Top", 0.7, 3.0),
            player("C", "Mid", 0.5, 2.0),
        ];

        let mids = filter_by_position(&players, "Mid");
        assert_eq!(names(&mids), vec!["A", "C"]);
    }

    #[test]
    fn test_filter_by_position_unknown_is_empty() {
        let players = vec![player("A", "Mid", 0.6, 4.0)];
        assert!(filter_by_position(&players, "Coach").is_empty());
    }

    #[test]
    fn test_positions_distinct_first_appearance() {
        let players = vec![
            player("A", "Mid", 0.6, 4.0),
            player("B", "Top", 0.7, 3.0),
            player("C", "Mid", 0.5, 2.0),
            player("D", "Support", 0.4, 3.5),
        ];

        assert_eq!(positions(&players), vec!["Mid", "Top", "Support"]);
    }

    #[test]
    fn test_position_counts_sum_to_total() {
        let players = vec![
            player("A", "Mid", 0.6, 4.0),
            player("B", "Mid", 0.6, 3.0),
            player("C", "Top", 0.9, 5.0),
        ];

        let counts = position_counts(&players);
        assert_eq!(
            counts,
            vec![("Mid".to_string(), 2), ("Top".to_string(), 1)]
        );

        let total: u32 = counts.iter().map(|(_, c)| c).sum();
        assert_eq!(total as usize, players.len());
        assert!(counts.iter().all(|(_, c)| *c > 0));
    }

    #[test]
    fn test_position_counts_empty() {
        assert!(position_counts(&[]).is_empty());
    }

    #[test]
    fn test_average_kda_is_arithmetic_mean() {
        let players = vec![
            player("A", "Mid", 0.6, 4.0),
            player("B", "Mid", 0.6, 3.0),
            player("C", "Top", 0.9, 5.0),
        ];

        let averages = average_kda_by_position(&players);
        assert_eq!(averages.len(), 2);
        assert_eq!(averages[0].0, "Mid");
        assert!((averages[0].1 - 3.5).abs() < 1e-9);
        assert_eq!(averages[1].0, "Top");
        assert!((averages[1].1 - 5.0).abs() < 1e-9);
    }
}
