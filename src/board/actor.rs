use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;
use std::str::FromStr;

/// One of the two players. The discriminant doubles as the actor's index
/// into per-actor tables (disc counters, zobrist keys).
#[derive(Clone, Copy, PartialEq, Debug, Eq, Hash, PartialOrd, Ord)]
pub enum Actor {
    Opponent = 0,
    AI = 1,
}

impl Actor {
    pub const ALL: [Actor; 2] = [Actor::Opponent, Actor::AI];

    pub fn opposite(&self) -> Self {
        match self {
            Actor::Opponent => Actor::AI,
            Actor::AI => Actor::Opponent,
        }
    }

    #[inline]
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn to_char(&self) -> char {
        match self {
            Actor::Opponent => 'O',
            Actor::AI => 'A',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'O' | 'o' => Some(Actor::Opponent),
            'A' | 'a' => Some(Actor::AI),
            _ => None,
        }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        *Self::ALL.choose(rng).unwrap_or(&Actor::AI)
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let actor_str = match self {
            Actor::Opponent => "opponent",
            Actor::AI => "ai",
        };
        write!(f, "{}", actor_str)
    }
}

// used for parsing cli args
type ParseError = &'static str;

impl FromStr for Actor {
    type Err = ParseError;

    fn from_str(actor: &str) -> Result<Self, Self::Err> {
        match actor.to_ascii_lowercase().as_str() {
            "opponent" | "o" => Ok(Actor::Opponent),
            "ai" | "a" => Ok(Actor::AI),
            _ => Err("actor must be `ai` or `opponent`"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_round_trips() {
        for actor in Actor::ALL.iter() {
            assert_ne!(*actor, actor.opposite());
            assert_eq!(*actor, actor.opposite().opposite());
        }
    }

    #[test]
    fn test_parse_actor() {
        assert_eq!(Actor::from_str("AI"), Ok(Actor::AI));
        assert_eq!(Actor::from_str("opponent"), Ok(Actor::Opponent));
        assert!(Actor::from_str("nobody").is_err());
    }
}
