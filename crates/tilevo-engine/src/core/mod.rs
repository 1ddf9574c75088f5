pub use self::{direction::*, tile::*};

pub(crate) mod direction;
pub(crate) mod tile;
