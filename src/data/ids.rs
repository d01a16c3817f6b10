use std::{fmt, num::ParseIntError, str::FromStr};

use serde::{Deserialize, Serialize};

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map(Self)
            }
        }
    };
}

id_type! {
    /// Identifies an author.
    UserId
}

id_type! {
    /// Identifies a post. Rendered panels and toggle buttons carry it in their
    /// `data-post-id` attribute.
    PostId
}

id_type! {
    /// Identifies a comment.
    CommentId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_attribute_values() {
        assert_eq!("7".parse::<PostId>(), Ok(PostId(7)));
        assert_eq!(" 2 ".parse::<UserId>(), Ok(UserId(2)));
        assert!("Employees".parse::<UserId>().is_err());
        assert!("".parse::<PostId>().is_err());
    }

    #[test]
    fn displays_as_bare_number() {
        assert_eq!(PostId(42).to_string(), "42");
    }
}
