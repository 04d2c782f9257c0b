use crate::matching::scorer::Match;

/// Orders matches by score, highest first, and assigns dense 1-based ranks.
/// The sort is stable: equal scores keep their input order.
pub fn rank_matches(mut matches: Vec<Match>) -> Vec<Match> {
    matches.sort_by(|a, b| b.score.cmp(&a.score));
    for (position, matched) in matches.iter_mut().enumerate() {
        matched.rank = Some(position + 1);
    }
    matches
}
