pub mod error;
pub mod season;
pub mod team;
pub mod game;
pub mod pick;
pub mod standings;

pub use error::*;
pub use season::*;
pub use team::*;
pub use game::*;
pub use pick::*;
pub use standings::*;
