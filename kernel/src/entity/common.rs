mod filter;

pub use self::filter::*;
