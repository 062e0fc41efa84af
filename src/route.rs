//! Navigation: the `/country/{name}` route and a back-stack.

use percent_encoding::percent_decode_str;

/// Path prefix of the detail route.
pub const COUNTRY_PREFIX: &str = "/country/";

/// Parameters of a matched `/country/{name}` path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryRoute {
    name: String,
}

impl CountryRoute {
    /// Match `path` against `/country/{name}`.
    ///
    /// The segment is percent-decoded (`United%20States` -> `United States`); a
    /// query string, fragment or single trailing slash is ignored. Paths with more
    /// segments, or that do not start with the prefix, do not match.
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let rest = path.strip_prefix(COUNTRY_PREFIX)?;
        let rest = rest.strip_suffix('/').unwrap_or(rest);
        if rest.contains('/') {
            return None;
        }
        let name = percent_decode_str(rest).decode_utf8_lossy().into_owned();
        Some(Self { name })
    }

    pub fn for_name(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }

    /// The `name` parameter; empty for `/country/`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Cache key: the name, `""` when absent (fetching is then disabled).
    pub fn query_key(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> String {
        format!(
            "{COUNTRY_PREFIX}{}",
            percent_encoding::utf8_percent_encode(&self.name, percent_encoding::NON_ALPHANUMERIC)
        )
    }
}

/// Browser-like history: a stack of visited paths.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<String>,
}

impl History {
    pub fn new(start: impl Into<String>) -> Self {
        Self {
            entries: vec![start.into()],
        }
    }

    pub fn push(&mut self, path: impl Into<String>) {
        self.entries.push(path.into());
    }

    /// Go to the previous entry. With nothing to go back to this is a no-op and
    /// returns `false`.
    pub fn back(&mut self) -> bool {
        if self.entries.len() > 1 {
            self.entries.pop();
            true
        } else {
            false
        }
    }

    pub fn current(&self) -> Option<&str> {
        self.entries.last().map(String::as_str)
    }

    pub fn can_go_back(&self) -> bool {
        self.entries.len() > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_country_route() {
        let r = CountryRoute::parse("/country/France").unwrap();
        assert_eq!(r.name(), "France");
        assert_eq!(CountryRoute::parse("/country/France/").unwrap().name(), "France");
        assert_eq!(
            CountryRoute::parse("/country/France?tab=1#top").unwrap().name(),
            "France"
        );
    }

    #[test]
    fn decodes_percent_escapes() {
        let r = CountryRoute::parse("/country/United%20States").unwrap();
        assert_eq!(r.name(), "United States");
        let r = CountryRoute::parse("/country/C%C3%B4te%20d'Ivoire").unwrap();
        assert_eq!(r.name(), "Côte d'Ivoire");
    }

    #[test]
    fn empty_name_disables_key() {
        let r = CountryRoute::parse("/country/").unwrap();
        assert_eq!(r.query_key(), "");
    }

    #[test]
    fn other_paths_do_not_match() {
        assert!(CountryRoute::parse("/").is_none());
        assert!(CountryRoute::parse("/countries").is_none());
        assert!(CountryRoute::parse("/country/a/b").is_none());
    }

    #[test]
    fn path_roundtrips_through_parse() {
        let r = CountryRoute::for_name("Bosnia and Herzegovina");
        assert_eq!(CountryRoute::parse(&r.path()).unwrap(), r);
    }

    #[test]
    fn back_on_single_entry_is_noop() {
        let mut h = History::new("/");
        assert!(!h.back());
        assert_eq!(h.current(), Some("/"));

        h.push("/country/Peru");
        assert!(h.can_go_back());
        assert!(h.back());
        assert_eq!(h.current(), Some("/"));

        let mut empty = History::default();
        assert!(!empty.back());
        assert_eq!(empty.current(), None);
    }
}
