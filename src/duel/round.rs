//! Round resolution: the card-vs-card comparison rules.
//!
//! Resolution order:
//! 1. Differing categories resolve by cyclic dominance:
//!    monster beats spell, spell beats trap, trap beats monster.
//! 2. Monster against monster resolves by attack: higher wins, equal
//!    draws.
//! 3. Spell against spell and trap against trap are always draws.
//!
//! Every result carries a reason string naming the categories or the
//! attack values involved.

use serde::{Deserialize, Serialize};

use crate::catalog::{Card, CardCategory, CardKind};

/// Which side took a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundWinner {
    Player,
    Opponent,
    Draw,
}

/// Outcome of one resolved round. Read-only after creation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    /// The card the player committed.
    pub player_card: Card,

    /// The card the opponent committed.
    pub opponent_card: Card,

    /// Winning side.
    pub winner: RoundWinner,

    /// Human-readable explanation of the outcome.
    pub reason: String,
}

/// Whether category `a` beats category `b` under the cyclic rule.
///
/// ```
/// use cardmart::catalog::CardCategory;
/// use cardmart::duel::dominates;
///
/// assert!(dominates(CardCategory::Monster, CardCategory::Spell));
/// assert!(dominates(CardCategory::Spell, CardCategory::Trap));
/// assert!(dominates(CardCategory::Trap, CardCategory::Monster));
/// assert!(!dominates(CardCategory::Spell, CardCategory::Monster));
/// ```
#[must_use]
pub const fn dominates(a: CardCategory, b: CardCategory) -> bool {
    matches!(
        (a, b),
        (CardCategory::Monster, CardCategory::Spell)
            | (CardCategory::Spell, CardCategory::Trap)
            | (CardCategory::Trap, CardCategory::Monster)
    )
}

/// Resolve one round between the player's and the opponent's card.
#[must_use]
pub fn resolve(player_card: &Card, opponent_card: &Card) -> RoundResult {
    let pc = player_card.category();
    let oc = opponent_card.category();

    let (winner, reason) = if pc != oc {
        if dominates(pc, oc) {
            (RoundWinner::Player, format!("{pc} beats {oc}"))
        } else {
            (RoundWinner::Opponent, format!("{oc} beats {pc}"))
        }
    } else {
        match (&player_card.kind, &opponent_card.kind) {
            (
                CardKind::Monster { attack: pa, .. },
                CardKind::Monster { attack: oa, .. },
            ) => match pa.cmp(oa) {
                std::cmp::Ordering::Greater => {
                    (RoundWinner::Player, format!("attack {pa} > {oa}"))
                }
                std::cmp::Ordering::Less => {
                    (RoundWinner::Opponent, format!("attack {oa} > {pa}"))
                }
                std::cmp::Ordering::Equal => {
                    (RoundWinner::Draw, format!("attack {pa} = {oa}"))
                }
            },
            // Matching non-monster categories never produce a winner.
            _ => (RoundWinner::Draw, format!("{pc} against {oc} is a draw")),
        }
    };

    RoundResult {
        player_card: player_card.clone(),
        opponent_card: opponent_card.clone(),
        winner,
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CardId;

    fn monster(attack: u32) -> Card {
        Card::monster(CardId::new(attack), format!("M{attack}"), attack, 1000)
    }

    fn spell() -> Card {
        Card::spell(CardId::new(100), "Mirror Rift")
    }

    fn trap() -> Card {
        Card::trap(CardId::new(101), "Pit of Chains")
    }

    #[test]
    fn test_monster_attack_comparison() {
        let result = resolve(&monster(2500), &monster(2400));
        assert_eq!(result.winner, RoundWinner::Player);
        assert!(result.reason.contains("2500 > 2400"), "{}", result.reason);

        let result = resolve(&monster(2400), &monster(2500));
        assert_eq!(result.winner, RoundWinner::Opponent);
        assert!(result.reason.contains("2500 > 2400"), "{}", result.reason);
    }

    #[test]
    fn test_equal_attack_draws() {
        let result = resolve(&monster(1800), &monster(1800));
        assert_eq!(result.winner, RoundWinner::Draw);
        assert!(result.reason.contains("1800 = 1800"), "{}", result.reason);
    }

    #[test]
    fn test_cyclic_dominance_all_pairs() {
        let cases = [
            (monster(1000), spell(), RoundWinner::Player),
            (spell(), monster(1000), RoundWinner::Opponent),
            (spell(), trap(), RoundWinner::Player),
            (trap(), spell(), RoundWinner::Opponent),
            (trap(), monster(1000), RoundWinner::Player),
            (monster(1000), trap(), RoundWinner::Opponent),
        ];

        for (player_card, opponent_card, expected) in cases {
            let result = resolve(&player_card, &opponent_card);
            assert_eq!(
                result.winner, expected,
                "{} vs {}",
                player_card.name, opponent_card.name
            );
        }
    }

    #[test]
    fn test_dominance_reason_names_both_categories() {
        let result = resolve(&monster(1000), &spell());
        assert_eq!(result.reason, "monster beats spell");

        let result = resolve(&monster(1000), &trap());
        assert_eq!(result.reason, "trap beats monster");
    }

    #[test]
    fn test_matching_non_monster_is_always_draw() {
        let result = resolve(&spell(), &spell());
        assert_eq!(result.winner, RoundWinner::Draw);

        let result = resolve(&trap(), &trap());
        assert_eq!(result.winner, RoundWinner::Draw);
    }
}
