/// The two sides of a game.
///
/// `Player` is the opponent of the engine (usually the human at the console),
/// `Agent` is the side the engine plays for. The discriminants double as the
/// row index into per-side tables such as the Zobrist keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Player = 0,
    Agent = 1,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Player, Side::Agent];

    pub fn opposite(&self) -> Self {
        match self {
            Self::Player => Self::Agent,
            Self::Agent => Self::Player,
        }
    }

    #[inline(always)]
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Player => "Player",
            Self::Agent => "Agent",
        }
    }

    /// Symbol used by the textual position format
    pub fn to_char(&self) -> char {
        match self {
            Self::Player => 'P',
            Self::Agent => 'A',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'P' | 'p' => Some(Self::Player),
            'A' | 'a' => Some(Self::Agent),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite() {
        assert_eq!(Side::Player.opposite(), Side::Agent);
        assert_eq!(Side::Agent.opposite(), Side::Player);
        assert_eq!(Side::Agent.opposite().opposite(), Side::Agent);
    }

    #[test]
    fn test_char_round_trip() {
        for side in Side::BOTH {
            assert_eq!(Side::from_char(side.to_char()), Some(side));
        }
        assert_eq!(Side::from_char('.'), None);
    }
}
