//! HTTP method as a typed enum.
//!
//! The routing layer handles a fixed, closed set of verbs — the ones a
//! controller can declare. Anything else is rejected at the server level with
//! `405 Method Not Allowed` before it ever reaches a route lookup.

use std::fmt;
use std::str::FromStr;

/// A routable HTTP method.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Method {
    Delete,
    Get,
    Patch,
    Post,
    Put,
}

impl Method {
    /// Returns the uppercase wire representation (e.g. `"GET"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Delete => "DELETE",
            Self::Get    => "GET",
            Self::Patch  => "PATCH",
            Self::Post   => "POST",
            Self::Put    => "PUT",
        }
    }
}

/// Parses an uppercase method string (e.g. `"GET"`). Case-sensitive per RFC 9110 §9.1.
impl FromStr for Method {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DELETE" => Ok(Self::Delete),
            "GET"    => Ok(Self::Get),
            "PATCH"  => Ok(Self::Patch),
            "POST"   => Ok(Self::Post),
            "PUT"    => Ok(Self::Put),
            _        => Err(()),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_five_supported_verbs() {
        for (s, m) in [
            ("DELETE", Method::Delete),
            ("GET", Method::Get),
            ("PATCH", Method::Patch),
            ("POST", Method::Post),
            ("PUT", Method::Put),
        ] {
            assert_eq!(s.parse::<Method>(), Ok(m));
            assert_eq!(m.as_str(), s);
        }
    }

    #[test]
    fn rejects_everything_else() {
        assert!("HEAD".parse::<Method>().is_err());
        assert!("OPTIONS".parse::<Method>().is_err());
        assert!("get".parse::<Method>().is_err());
    }
}
