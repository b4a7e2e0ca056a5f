//! Filter values offered by the search form.

pub struct Choice {
    pub code: &'static str,
    pub name: &'static str,
}

pub const LANGUAGES: &[Choice] = &[
    Choice { code: "en", name: "English" },
    Choice { code: "es", name: "Spanish" },
    Choice { code: "fr", name: "French" },
    Choice { code: "de", name: "German" },
    Choice { code: "it", name: "Italian" },
    Choice { code: "pt", name: "Portuguese" },
    Choice { code: "ru", name: "Russian" },
    Choice { code: "zh", name: "Chinese" },
    Choice { code: "ja", name: "Japanese" },
    Choice { code: "ar", name: "Arabic" },
];

pub const COUNTRIES: &[Choice] = &[
    Choice { code: "us", name: "United States" },
    Choice { code: "gb", name: "United Kingdom" },
    Choice { code: "ca", name: "Canada" },
    Choice { code: "au", name: "Australia" },
    Choice { code: "de", name: "Germany" },
    Choice { code: "fr", name: "France" },
    Choice { code: "it", name: "Italy" },
    Choice { code: "es", name: "Spain" },
    Choice { code: "in", name: "India" },
    Choice { code: "jp", name: "Japan" },
];

pub const CATEGORIES: &[&str] = &[
    "business",
    "entertainment",
    "environment",
    "food",
    "health",
    "politics",
    "science",
    "sports",
    "technology",
    "top",
    "world",
];

pub fn language_name(code: &str) -> Option<&'static str> {
    LANGUAGES.iter().find(|c| c.code == code).map(|c| c.name)
}

pub fn country_name(code: &str) -> Option<&'static str> {
    COUNTRIES.iter().find(|c| c.code == code).map(|c| c.name)
}

pub fn is_known_category(slug: &str) -> bool {
    CATEGORIES.contains(&slug)
}
