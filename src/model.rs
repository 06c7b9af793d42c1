mod config;
mod marker;
mod selection;
mod ticket;

pub use self::config::*;
pub use self::marker::*;
pub use self::selection::*;
pub use self::ticket::*;
