//! The country detail view: load state in, one of three screens out.

use crate::error::FetchError;
use crate::format::format_population;
use crate::models::Country;
use std::fmt;
use std::sync::Arc;

pub const NOT_FOUND_HEADING: &str = "Country not found";
pub const NO_CAPITAL: &str = "No capital";
pub const NO_LANGUAGES: &str = "No languages";
pub const NO_CURRENCIES: &str = "No currencies";

/// Where a keyed fetch stands. Built once per fetch cycle by the query cache.
#[derive(Debug, Clone)]
pub enum LoadState<T> {
    Loading,
    /// Finished without a record. `cause` is set when the fetch failed rather
    /// than returning an empty result; the view shows both the same way.
    Absent { cause: Option<Arc<FetchError>> },
    Present(T),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }
}

/// User-triggered side effects offered by a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Back,
    ToggleFavorite,
}

/// Display strings of the detail layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryDetail {
    pub flag_src: String,
    pub flag_alt: String,
    pub common_name: String,
    pub official_name: String,
    pub capital: String,
    /// `"{region} ({subregion})"`
    pub region: String,
    pub population: String,
    pub languages: String,
    pub currencies: String,
}

impl CountryDetail {
    pub fn from_country(c: &Country, locale: &str) -> Self {
        let flag_alt = match c.flags.alt.as_deref() {
            Some(alt) if !alt.is_empty() => alt.to_string(),
            _ => format!("Flag of {}", c.name.common),
        };
        let capital = c
            .capital
            .first()
            .filter(|s| !s.is_empty())
            .cloned()
            .unwrap_or_else(|| NO_CAPITAL.to_string());
        Self {
            flag_src: c.flags.png.clone(),
            flag_alt,
            common_name: c.name.common.clone(),
            official_name: c.name.official.clone(),
            capital,
            region: format!(
                "{} ({})",
                c.region,
                c.subregion.as_deref().unwrap_or_default()
            ),
            population: format_population(c.population, locale),
            languages: join_or(c.language_names(), NO_LANGUAGES),
            currencies: join_or(c.currency_names(), NO_CURRENCIES),
        }
    }

    /// Label/value rows in display order, below the heading.
    pub fn rows(&self) -> [(&'static str, &str); 6] {
        [
            ("Official Name", self.official_name.as_str()),
            ("Capital", self.capital.as_str()),
            ("Region", self.region.as_str()),
            ("Population", self.population.as_str()),
            ("Languages", self.languages.as_str()),
            ("Currencies", self.currencies.as_str()),
        ]
    }
}

/// Comma-join, or `fallback` when that yields an empty string.
fn join_or<'a>(items: impl Iterator<Item = &'a str>, fallback: &str) -> String {
    let joined = items.collect::<Vec<_>>().join(", ");
    if joined.is_empty() {
        fallback.to_string()
    } else {
        joined
    }
}

/// What the view draws.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Loading,
    NotFound,
    Detail(CountryDetail),
}

impl Screen {
    pub fn actions(&self) -> &'static [Action] {
        match self {
            Screen::Loading => &[],
            Screen::NotFound => &[Action::Back],
            Screen::Detail(_) => &[Action::Back, Action::ToggleFavorite],
        }
    }
}

/// Pick the screen for a load state: loading, then absent, then present.
pub fn render<C: AsRef<Country>>(state: &LoadState<C>, locale: &str) -> Screen {
    match state {
        LoadState::Loading => Screen::Loading,
        LoadState::Absent { .. } => Screen::NotFound,
        LoadState::Present(c) => Screen::Detail(CountryDetail::from_country(c.as_ref(), locale)),
    }
}

/// Render a finished fetch directly (no cache), as the CLI does.
pub fn render_result(result: Result<Option<Country>, FetchError>, locale: &str) -> Screen {
    let state = match result {
        Ok(Some(c)) => LoadState::Present(Box::new(c)),
        Ok(None) => LoadState::Absent { cause: None },
        Err(e) => LoadState::Absent {
            cause: Some(Arc::new(e)),
        },
    };
    render(&state, locale)
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Screen::Loading => writeln!(f, "Loading..."),
            Screen::NotFound => {
                writeln!(f, "{NOT_FOUND_HEADING}")?;
                writeln!(f, "[Go Back]")
            }
            Screen::Detail(d) => {
                writeln!(f, "{}", d.common_name)?;
                writeln!(f, "Flag: {} ({})", d.flag_src, d.flag_alt)?;
                for (label, value) in d.rows() {
                    writeln!(f, "{label:<14} {value}")?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CountryName, Currency, Flags};
    use reqwest::StatusCode;

    fn country() -> Country {
        Country {
            name: CountryName {
                common: "France".into(),
                official: "French Republic".into(),
            },
            capital: vec!["Paris".into()],
            region: "Europe".into(),
            subregion: Some("Western Europe".into()),
            population: 1_000_000,
            languages: vec![("fra".into(), "French".into())],
            currencies: vec![(
                "EUR".into(),
                Currency {
                    name: "Euro".into(),
                    symbol: Some("€".into()),
                },
            )],
            flags: Flags {
                png: "https://flagcdn.com/w320/fr.png".into(),
                svg: None,
                alt: Some("The flag of France".into()),
            },
        }
    }

    fn detail(c: Country) -> CountryDetail {
        match render(&LoadState::Present(Arc::new(c)), "en") {
            Screen::Detail(d) => d,
            other => panic!("expected detail, got {other:?}"),
        }
    }

    #[test]
    fn loading_wins() {
        let s: LoadState<Arc<Country>> = LoadState::Loading;
        assert_eq!(render(&s, "en"), Screen::Loading);
        assert!(Screen::Loading.actions().is_empty());
    }

    #[test]
    fn absent_is_not_found_with_back() {
        let s: LoadState<Arc<Country>> = LoadState::Absent { cause: None };
        assert_eq!(render(&s, "en"), Screen::NotFound);
        assert_eq!(Screen::NotFound.actions(), &[Action::Back]);
    }

    #[test]
    fn fetch_error_is_not_found_too() {
        let screen = render_result(Err(FetchError::Status(StatusCode::INTERNAL_SERVER_ERROR)), "en");
        assert_eq!(screen, Screen::NotFound);
        assert_eq!(render_result(Ok(None), "en"), Screen::NotFound);
    }

    #[test]
    fn renders_all_fields() {
        let d = detail(country());
        assert_eq!(d.flag_src, "https://flagcdn.com/w320/fr.png");
        assert_eq!(d.flag_alt, "The flag of France");
        assert_eq!(d.common_name, "France");
        assert_eq!(d.official_name, "French Republic");
        assert_eq!(d.capital, "Paris");
        assert_eq!(d.region, "Europe (Western Europe)");
        assert_eq!(d.population, "1,000,000");
        assert_eq!(d.languages, "French");
        assert_eq!(d.currencies, "Euro");
    }

    #[test]
    fn fallbacks_for_empty_collections() {
        let mut c = country();
        c.capital.clear();
        c.languages.clear();
        c.currencies.clear();
        c.flags.alt = None;
        let d = detail(c);
        assert_eq!(d.capital, "No capital");
        assert_eq!(d.languages, "No languages");
        assert_eq!(d.currencies, "No currencies");
        assert_eq!(d.flag_alt, "Flag of France");
    }

    #[test]
    fn empty_alt_and_capital_use_fallbacks() {
        let mut c = country();
        c.capital = vec![String::new()];
        c.flags.alt = Some(String::new());
        let d = detail(c);
        assert_eq!(d.capital, NO_CAPITAL);
        assert_eq!(d.flag_alt, "Flag of France");
    }

    #[test]
    fn joins_in_order() {
        let mut c = country();
        c.languages = vec![
            ("deu".into(), "German".into()),
            ("fra".into(), "French".into()),
            ("ita".into(), "Italian".into()),
        ];
        c.currencies.push((
            "CHF".into(),
            Currency {
                name: "Swiss franc".into(),
                symbol: None,
            },
        ));
        let d = detail(c);
        assert_eq!(d.languages, "German, French, Italian");
        assert_eq!(d.currencies, "Euro, Swiss franc");
    }

    #[test]
    fn text_output_lists_rows() {
        let text = Screen::Detail(detail(country())).to_string();
        assert!(text.starts_with("France\n"));
        assert!(text.contains("Capital        Paris"));
        assert!(text.contains("Population     1,000,000"));
        assert!(Screen::NotFound.to_string().contains("Country not found"));
    }
}
