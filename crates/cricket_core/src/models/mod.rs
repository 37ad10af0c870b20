pub mod delivery;
pub mod format;
pub mod innings;
pub mod match_state;
pub mod player;
pub mod team;

pub use delivery::{Delivery, DismissalType, ExtraType, PriorState};
pub use format::{
    FormatPolicy, MatchFormat, BALLS_PER_OVER, ILLEGAL_BALL_PENALTY, INDOOR_WICKET_PENALTY,
};
pub use innings::{overs_display, Extras, Innings};
pub use match_state::{Match, MatchStatus};
pub use player::Player;
pub use team::{Team, TeamSide, Toss, TossDecision};
