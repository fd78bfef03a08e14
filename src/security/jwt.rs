mod claims;

pub use self::claims::Claims;
