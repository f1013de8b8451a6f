//! Two-tier best-release selection policy
//!
//! Tier 1 ranks candidates by Radarr's custom-format score. Because a score
//! of zero is indistinguishable from "no score", a zero-score winner sends
//! the whole list through the point-based heuristic in [`crate::scoring`]
//! (tier 2). Both tiers are deterministic and keep the earliest candidate on
//! ties.

use crate::config::ScoringConfig;
use crate::scoring::calculate_release_score;
use crate::types::Release;

/// Pick the best release from a candidate list
///
/// Returns `None` only for an empty list; callers must treat that as a
/// terminal failure and never issue a grab for it.
pub fn find_best_release<'a>(
    releases: &'a [Release],
    scoring: &ScoringConfig,
) -> Option<&'a Release> {
    let (first, rest) = releases.split_first()?;

    // Tier 1: maximum custom-format score, earliest wins ties
    let mut best = first;
    for candidate in rest {
        if candidate.custom_score() > best.custom_score() {
            best = candidate;
        }
    }

    // Tier 2: a zero score means the custom formats had nothing to say;
    // consult the point heuristic, keeping the tier-1 answer if it also
    // finds nothing
    if best.custom_score() == 0 {
        if let Some(fallback) = find_best_by_points(releases, scoring) {
            best = fallback;
        }
    }

    Some(best)
}

/// Scan for the release with the highest heuristic score strictly above zero
///
/// The first release to set a new running maximum wins; later equal values do
/// not replace it. Returns `None` when every score is zero or below.
fn find_best_by_points<'a>(
    releases: &'a [Release],
    scoring: &ScoringConfig,
) -> Option<&'a Release> {
    let mut best: Option<&Release> = None;
    let mut max_points: i64 = 0;

    for release in releases {
        let points = calculate_release_score(release, scoring);
        if points > max_points {
            max_points = points;
            best = Some(release);
        }
    }

    best
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    /// Titles deliberately carry no quality tokens so the heuristic only sees
    /// what each test sets explicitly.
    fn release(title: &str, score: Option<i64>) -> Release {
        let mut r: Release =
            serde_json::from_value(serde_json::json!({ "title": title })).unwrap();
        r.custom_format_score = score;
        r
    }

    fn release_with_seeders(title: &str, score: Option<i64>, seeders: u32) -> Release {
        let mut r = release(title, score);
        r.seeders = Some(seeders);
        r
    }

    #[test]
    fn empty_list_selects_nothing() {
        assert!(find_best_release(&[], &ScoringConfig::default()).is_none());
    }

    #[test]
    fn highest_custom_format_score_wins() {
        let releases = vec![
            release("Alpha", Some(5)),
            release("Beta", Some(9)),
            release("Gamma", Some(3)),
        ];
        let best = find_best_release(&releases, &ScoringConfig::default()).unwrap();
        assert_eq!(best.title, "Beta");
    }

    #[test]
    fn ties_keep_the_earliest_candidate() {
        let releases = vec![
            release("Alpha", Some(7)),
            release("Beta", Some(7)),
            release("Gamma", Some(2)),
        ];
        let best = find_best_release(&releases, &ScoringConfig::default()).unwrap();
        assert_eq!(best.title, "Alpha");
    }

    #[test]
    fn missing_score_is_treated_as_zero() {
        let releases = vec![release("Alpha", None), release("Beta", Some(3))];
        let best = find_best_release(&releases, &ScoringConfig::default()).unwrap();
        assert_eq!(best.title, "Beta");
    }

    #[test]
    fn all_zero_scores_fall_back_to_heuristic() {
        // seeder_weight=2: Alpha scores 4 points, Beta scores 2
        let releases = vec![
            release_with_seeders("Alpha", Some(0), 2),
            release_with_seeders("Beta", Some(0), 1),
        ];
        let best = find_best_release(&releases, &ScoringConfig::default()).unwrap();
        assert_eq!(best.title, "Alpha");
    }

    #[test]
    fn heuristic_winner_can_override_tier_one_order() {
        let releases = vec![
            release_with_seeders("Alpha", Some(0), 1),
            release_with_seeders("Beta", Some(0), 8),
        ];
        let best = find_best_release(&releases, &ScoringConfig::default()).unwrap();
        assert_eq!(best.title, "Beta");
    }

    #[test]
    fn heuristic_ties_keep_the_first_release_to_set_the_maximum() {
        let releases = vec![
            release_with_seeders("Alpha", Some(0), 3),
            release_with_seeders("Beta", Some(0), 3),
        ];
        let best = find_best_release(&releases, &ScoringConfig::default()).unwrap();
        assert_eq!(best.title, "Alpha", "a later equal score must not replace the winner");
    }

    // Pins the zero-score conflation: a legitimately-computed zero custom
    // format score is indistinguishable from "no score", so the heuristic
    // runs, and when it also finds nothing the tier-1 answer stands.
    #[test]
    fn zero_score_release_still_wins_when_heuristic_finds_nothing() {
        let releases = vec![release("Alpha", Some(0))];
        let best = find_best_release(&releases, &ScoringConfig::default()).unwrap();
        assert_eq!(best.title, "Alpha");
    }

    #[test]
    fn heuristic_is_skipped_when_custom_format_score_decides() {
        // Beta would dominate on seeders, but Alpha's positive custom format
        // score settles the selection in tier 1
        let releases = vec![
            release_with_seeders("Alpha", Some(1), 0),
            release_with_seeders("Beta", Some(0), 90),
        ];
        let best = find_best_release(&releases, &ScoringConfig::default()).unwrap();
        assert_eq!(best.title, "Alpha");
    }

    #[test]
    fn negative_heuristic_scores_never_qualify() {
        let mut rejected = release_with_seeders("Alpha", Some(0), 1);
        rejected.rejected = true;
        let releases = vec![rejected, release("Beta", Some(0))];

        // Alpha's heuristic score is negative (2 - 100), Beta's is 0; neither
        // clears the threshold, so the tier-1 winner (Alpha, earliest) stands
        let best = find_best_release(&releases, &ScoringConfig::default()).unwrap();
        assert_eq!(best.title, "Alpha");
    }
}
