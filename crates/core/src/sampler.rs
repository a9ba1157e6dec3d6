//! Modifier card sampling.

use rand::{seq::IndexedRandom, Rng};
use tracing::debug;

use crate::models::{Modifier, PlayerCount};

/// Most modifiers a single game may draw.
pub const MAX_MODIFIERS: usize = 3;

/// Draw up to `count` distinct modifiers uniformly without replacement.
///
/// Returns fewer when the pool is smaller than `count`, and nothing for an
/// empty pool or a zero count.
pub fn sample_modifiers<R: Rng + ?Sized>(
    modifiers: &[Modifier],
    count: usize,
    rng: &mut R,
) -> Vec<Modifier> {
    if count == 0 || modifiers.is_empty() {
        return Vec::new();
    }

    let drawn: Vec<Modifier> = modifiers.choose_multiple(rng, count).cloned().collect();
    debug!(
        requested = count,
        drawn = drawn.len(),
        "sampled modifiers: {}",
        drawn
            .iter()
            .map(|modifier| modifier.id.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    drawn
}

/// Combined difficulty of the given modifiers at this table size.
pub fn modifier_total(modifiers: &[Modifier], players: PlayerCount) -> i32 {
    modifiers
        .iter()
        .map(|modifier| modifier.difficulty_modifier.for_players(players))
        .fold(0, i32::saturating_add)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::models::Difficulty;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn modifier(id: &str, difficulty: [i32; 3]) -> Modifier {
        Modifier {
            id: id.to_string(),
            name: id.to_uppercase(),
            symbol: "*".to_string(),
            description: String::new(),
            difficulty_modifier: Difficulty::new(difficulty),
            rules_text: String::new(),
        }
    }

    fn pool() -> Vec<Modifier> {
        vec![
            modifier("a", [1, 1, 2]),
            modifier("b", [2, 2, 2]),
            modifier("c", [1, 2, 3]),
            modifier("d", [3, 3, 3]),
            modifier("e", [0, 1, 1]),
        ]
    }

    #[test]
    fn draws_distinct_modifiers_from_pool() {
        let pool = pool();
        for seed in 0..50 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let drawn = sample_modifiers(&pool, 2, &mut rng);
            assert_eq!(drawn.len(), 2);
            let ids: HashSet<_> = drawn.iter().map(|m| m.id.clone()).collect();
            assert_eq!(ids.len(), 2);
            assert!(drawn.iter().all(|m| pool.contains(m)));
        }
    }

    #[test]
    fn caps_at_pool_size() {
        let pool = pool();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        assert_eq!(sample_modifiers(&pool, 9, &mut rng).len(), pool.len());
    }

    #[test]
    fn empty_pool_or_zero_count_draws_nothing() {
        let mut rng = ChaCha8Rng::seed_from_u64(10);
        assert!(sample_modifiers(&pool(), 0, &mut rng).is_empty());
        assert!(sample_modifiers(&[], 3, &mut rng).is_empty());
    }

    #[test]
    fn total_uses_player_index() {
        let pool = pool();
        let five = PlayerCount::try_from(5u8).expect("valid player count");
        let three = PlayerCount::try_from(3u8).expect("valid player count");
        assert_eq!(modifier_total(&pool, five), 11);
        assert_eq!(modifier_total(&pool, three), 7);
        assert_eq!(modifier_total(&[], three), 0);
    }
}
