/// Score returned for an empty query: everything matches equally.
pub(crate) const EMPTY_QUERY_SCORE: i32 = 1000;

const SUBSTRING_BASE: i32 = 100;
const SUBSEQUENCE_HIT: i32 = 10;
const POSITION_BONUS_SPAN: i32 = 50;
const COMPLETION_BONUS: i32 = 20;

/// Case-insensitive match score of `query` against `text`; 0 means no match.
pub(crate) fn score(query: &str, text: &str) -> i32 {
    let query = query.to_lowercase();
    let text = text.to_lowercase();

    if query.is_empty() {
        return EMPTY_QUERY_SCORE;
    }

    if text.contains(&query) {
        let query_len = i32::try_from(query.chars().count()).unwrap_or(i32::MAX);
        // Shorter exact matches rank higher; long queries still clear 100.
        return SUBSTRING_BASE + (SUBSTRING_BASE.saturating_sub(query_len)).max(1);
    }

    let query_chars: Vec<char> = query.chars().collect();
    let mut matched = 0;
    let mut total = 0;
    for (position, ch) in text.chars().enumerate() {
        if matched < query_chars.len() && ch == query_chars[matched] {
            let position = i32::try_from(position).unwrap_or(i32::MAX);
            total += SUBSEQUENCE_HIT + (POSITION_BONUS_SPAN - position).max(0);
            matched += 1;
        }
    }
    if matched == query_chars.len() {
        total += COMPLETION_BONUS;
    }
    total
}

/// `(index, score)` for every candidate scoring above zero, best first.
/// Equal scores keep their input order.
pub(crate) fn rank<S: AsRef<str>>(query: &str, candidates: &[S]) -> Vec<(usize, i32)> {
    let mut ranked: Vec<(usize, i32)> = candidates
        .iter()
        .enumerate()
        .map(|(idx, candidate)| (idx, score(query, candidate.as_ref())))
        .filter(|&(_, score)| score > 0)
        .collect();
    ranked.sort_by(|left, right| right.1.cmp(&left.1));
    ranked
}
