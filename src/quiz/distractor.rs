// src/quiz/distractor.rs

use std::collections::HashSet;

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::models::word::WordPair;

/// Wrong answers shown next to the correct translation.
pub const DISTRACTOR_COUNT: usize = 3;

/// Picks `k` distinct wrong answers for `correct` out of `pool`.
///
/// Draws uniformly without replacement from the distinct translations of the
/// pool that differ from `correct`. When the pool has fewer than `k` of those,
/// all of them are used and the remainder is filled with `Option N`
/// placeholders that collide neither with `correct` nor with each other.
pub fn generate<R: Rng + ?Sized>(
    correct: &str,
    pool: &[WordPair],
    k: usize,
    rng: &mut R,
) -> Vec<String> {
    let mut seen = HashSet::new();
    let candidates: Vec<&str> = pool
        .iter()
        .map(|w| w.translation.as_str())
        .filter(|t| *t != correct && seen.insert(*t))
        .collect();

    if candidates.len() >= k {
        return candidates
            .choose_multiple(rng, k)
            .map(|t| (*t).to_string())
            .collect();
    }

    let mut picked: Vec<String> = candidates.iter().map(|t| (*t).to_string()).collect();
    let mut n = picked.len() + 1;
    while picked.len() < k {
        let placeholder = format!("Option {}", n);
        if placeholder != correct && !picked.contains(&placeholder) {
            picked.push(placeholder);
        }
        n += 1;
    }
    picked
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn pool(pairs: &[(&str, &str)]) -> Vec<WordPair> {
        pairs.iter().map(|(w, t)| WordPair::new(*w, *t)).collect()
    }

    #[test]
    fn draws_distinct_wrong_answers() {
        let words = pool(&[
            ("Hund", "dog"),
            ("Katze", "cat"),
            ("Baum", "tree"),
            ("Haus", "house"),
            ("Wasser", "water"),
        ]);
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..50 {
            let picked = generate("dog", &words, DISTRACTOR_COUNT, &mut rng);
            assert_eq!(picked.len(), 3);
            assert!(!picked.iter().any(|p| p == "dog"));
            let unique: HashSet<_> = picked.iter().collect();
            assert_eq!(unique.len(), 3);
            for p in &picked {
                assert!(["cat", "tree", "house", "water"].contains(&p.as_str()));
            }
        }
    }

    #[test]
    fn duplicate_translations_count_once() {
        // "big" appears three times but is only one distinct wrong answer.
        let words = pool(&[
            ("klein", "small"),
            ("groß", "big"),
            ("riesig", "big"),
            ("gewaltig", "big"),
        ]);
        let mut rng = StdRng::seed_from_u64(1);

        let picked = generate("small", &words, 3, &mut rng);
        assert_eq!(picked, vec!["big", "Option 2", "Option 3"]);
    }

    #[test]
    fn pads_with_placeholders_when_pool_is_small() {
        let words = pool(&[("Hund", "dog")]);
        let mut rng = StdRng::seed_from_u64(3);

        let picked = generate("dog", &words, 3, &mut rng);
        assert_eq!(picked, vec!["Option 1", "Option 2", "Option 3"]);
    }

    #[test]
    fn placeholders_skip_existing_values() {
        let words = pool(&[("eins", "Option 2"), ("zwei", "Option 1")]);
        let mut rng = StdRng::seed_from_u64(3);

        let picked = generate("Option 1", &words, 3, &mut rng);
        assert_eq!(picked.len(), 3);
        assert_eq!(picked[0], "Option 2");
        let unique: HashSet<_> = picked.iter().collect();
        assert_eq!(unique.len(), 3);
        assert!(!picked.iter().any(|p| p == "Option 1"));
    }
}
