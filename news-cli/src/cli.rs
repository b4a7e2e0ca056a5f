//! Command-line arguments and the interactive command grammar.

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use news_core::catalog;
use news_core::{FilterError, NewsFilters};

#[derive(Parser, Debug)]
#[command(name = "newshub", author, version, about = "Search and browse news from the terminal")]
pub struct Args {
    /// Backend base URL (overrides the config file and NEWS_API_URL)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Path to a JSON config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Articles printed per screenful
    #[arg(long, default_value_t = 5)]
    pub page_size: usize,

    /// Initial search terms; defaults to the latest headlines
    pub query: Vec<String>,

    #[command(flatten)]
    pub filters: FilterArgs,
}

#[derive(ClapArgs, Debug, Default, Clone)]
pub struct FilterArgs {
    /// Language code, e.g. en
    #[arg(short, long, value_parser = parse_language)]
    pub language: Option<String>,

    /// Country code, e.g. us
    #[arg(short, long, value_parser = parse_country)]
    pub country: Option<String>,

    /// Category slug, e.g. technology
    #[arg(short = 'k', long, value_parser = parse_category)]
    pub category: Option<String>,
}

impl FilterArgs {
    pub fn to_filters(&self, terms: &[String]) -> Result<NewsFilters, FilterError> {
        let mut filters = NewsFilters::new(terms.join(" "))?;
        if let Some(language) = &self.language {
            filters = filters.with_language(language);
        }
        if let Some(country) = &self.country {
            filters = filters.with_country(country);
        }
        if let Some(category) = &self.category {
            filters = filters.with_category(category);
        }
        Ok(filters)
    }

    fn is_empty(&self) -> bool {
        self.language.is_none() && self.country.is_none() && self.category.is_none()
    }
}

impl Args {
    /// The startup search: explicit terms, or the latest headlines.
    pub fn initial_filters(&self) -> Result<NewsFilters, FilterError> {
        if self.query.is_empty() && self.filters.is_empty() {
            return Ok(NewsFilters::latest());
        }
        let terms = if self.query.is_empty() {
            vec![news_core::models::LATEST_QUERY.to_owned()]
        } else {
            self.query.clone()
        };
        self.filters.to_filters(&terms)
    }
}

/// One line typed at the prompt.
#[derive(Parser, Debug)]
#[command(multicall = true)]
pub struct Line {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start a fresh search
    #[command(alias = "s")]
    Search {
        #[arg(required = true)]
        terms: Vec<String>,
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Show the next articles, fetching another page when near the end
    #[command(alias = "m")]
    More,
    /// Reprint everything shown so far
    Show,
    /// Open article N in the browser
    #[command(alias = "o")]
    Open { index: usize },
    /// Forget the current results
    Clear,
    /// Ping the backend
    Health,
    /// List the language, country and category choices
    Filters,
    /// Leave
    #[command(alias = "exit", alias = "q")]
    Quit,
}

impl Line {
    pub fn parse_line(line: &str) -> Result<Self, clap::Error> {
        Self::try_parse_from(line.split_whitespace())
    }
}

fn parse_language(value: &str) -> Result<String, String> {
    catalog::language_name(value)
        .map(|_| value.to_owned())
        .ok_or_else(|| format!("unknown language '{value}' (see `filters`)"))
}

fn parse_country(value: &str) -> Result<String, String> {
    catalog::country_name(value)
        .map(|_| value.to_owned())
        .ok_or_else(|| format!("unknown country '{value}' (see `filters`)"))
}

fn parse_category(value: &str) -> Result<String, String> {
    if catalog::is_known_category(value) {
        Ok(value.to_owned())
    } else {
        Err(format!("unknown category '{value}' (see `filters`)"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_line_builds_filters() {
        let line = Line::parse_line("search rust async -l en -k technology").unwrap();
        match line.command {
            Command::Search { terms, filters } => {
                let filters = filters.to_filters(&terms).unwrap();
                assert_eq!(filters.query, "rust async");
                assert_eq!(filters.language.as_deref(), Some("en"));
                assert_eq!(filters.category.as_deref(), Some("technology"));
                assert_eq!(filters.country, None);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn unknown_language_is_rejected() {
        assert!(Line::parse_line("search rust -l xx").is_err());
    }

    #[test]
    fn search_needs_terms() {
        assert!(Line::parse_line("search").is_err());
    }

    #[test]
    fn aliases_resolve() {
        assert!(matches!(Line::parse_line("m").unwrap().command, Command::More));
        assert!(matches!(Line::parse_line("exit").unwrap().command, Command::Quit));
        assert!(matches!(
            Line::parse_line("open 3").unwrap().command,
            Command::Open { index: 3 }
        ));
    }

    #[test]
    fn startup_defaults_to_latest() {
        let args = Args::try_parse_from(["newshub"]).unwrap();
        assert_eq!(args.initial_filters().unwrap(), NewsFilters::latest());

        let args = Args::try_parse_from(["newshub", "-c", "fr"]).unwrap();
        let filters = args.initial_filters().unwrap();
        assert!(filters.is_latest());
        assert_eq!(filters.country.as_deref(), Some("fr"));
    }
}
