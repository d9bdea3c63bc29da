pub mod game;
pub mod named;
pub mod team;
pub mod venue;

pub use game::{Match, RawMatch};
pub use named::{AgeGroup, Competition, Named};
pub use team::Team;
pub use venue::Venue;
