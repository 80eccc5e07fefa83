pub mod player;
pub use player::*;

pub mod human_player;
pub use human_player::*;

pub mod random_player;
pub use random_player::*;

pub mod ai;
pub use ai::{NegamaxPlayer, SearchEngine, SearchResult, TranspositionTable};
