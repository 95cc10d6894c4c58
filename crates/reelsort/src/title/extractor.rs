use std::sync::LazyLock;

use log::debug;
use regex::Regex;

use crate::classifier::ExtensionClassifier;
use crate::lookup::MetadataLookup;
use crate::title::TitleYear;

/// Title made of word characters and `, . - ! '` plus whitespace, then a
/// 19xx/20xx year, optionally in parentheses or brackets. Anchored at the
/// start; the greedy title makes the last plausible year win.
static TITLE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<title>[\w,.\-!'\s]+)\s(?:[\(\[]?(?P<year>(?:20|19)\d{2})[\)\]]?)").unwrap()
});

/// A name after separator substitution and title-casing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    /// Title-cased, video extension re-appended when there was one.
    pub full: String,
    /// Title-cased, without the video extension. Sent to the lookup.
    pub stem: String,
}

/// Pulls `(title, year)` out of download names.
pub struct TitleExtractor<L> {
    extensions: ExtensionClassifier,
    lookup: L,
}

impl<L: MetadataLookup> TitleExtractor<L> {
    pub fn new(extensions: ExtensionClassifier, lookup: L) -> Self {
        Self { extensions, lookup }
    }

    /// Pattern match first, then the lookup collaborator. Either both fields
    /// come back or nothing does.
    pub fn extract(&self, name: &str) -> Option<TitleYear> {
        debug!("Running folder/name translation on {}", name);
        let normalized = self.normalize(name);

        if let Some(found) = match_pattern(&normalized.full) {
            return Some(found);
        }

        debug!(
            "No title/year pattern in '{}'; attempting lookup of '{}'",
            normalized.full, normalized.stem
        );
        self.lookup
            .lookup(&normalized.stem)
            .filter(|found| !found.title.is_empty() && !found.year.is_empty())
    }

    /// Replaces `.` and `_` with spaces (leaving a video extension intact)
    /// and title-cases the result.
    pub fn normalize(&self, name: &str) -> Normalized {
        match self.extensions.video_extension(name) {
            Some(extension) => {
                let stem = title_case(&replace_separators(&name[..name.len() - extension.len()]));
                let full = title_case(&format!("{}{}", stem, extension));
                Normalized { full, stem }
            }
            None => {
                let full = title_case(&replace_separators(name));
                Normalized {
                    stem: full.clone(),
                    full,
                }
            }
        }
    }
}

fn replace_separators(name: &str) -> String {
    name.replace(['.', '_'], " ")
}

fn match_pattern(normalized: &str) -> Option<TitleYear> {
    let captures = TITLE_PATTERN.captures(normalized)?;
    let title = captures.name("title")?.as_str();
    let year = captures.name("year")?.as_str();
    Some(TitleYear::new(title, year))
}

/// Uppercases every cased letter that follows an uncased character and
/// lowercases the rest: `"it's 1080p"` becomes `"It'S 1080P"`.
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut previous_cased = false;
    for c in value.chars() {
        let cased = c.is_lowercase() || c.is_uppercase();
        if cased {
            if previous_cased {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
        } else {
            out.push(c);
        }
        previous_cased = cased;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::NoLookup;
    use std::cell::RefCell;
    use std::collections::HashSet;

    fn extensions() -> ExtensionClassifier {
        let set = |items: &[&str]| -> HashSet<String> {
            items.iter().map(|s| s.to_string()).collect()
        };
        ExtensionClassifier::new(set(&[".avi", ".mkv", ".mp4"]), set(&[".nfo"]), set(&[".mp3"]))
    }

    fn extractor() -> TitleExtractor<NoLookup> {
        TitleExtractor::new(extensions(), NoLookup)
    }

    /// Records every query and answers from a fixed table.
    struct RecordingLookup {
        answers: Vec<(&'static str, TitleYear)>,
        queries: RefCell<Vec<String>>,
    }

    impl MetadataLookup for RecordingLookup {
        fn lookup(&self, title: &str) -> Option<TitleYear> {
            self.queries.borrow_mut().push(title.to_string());
            self.answers
                .iter()
                .find(|(query, _)| *query == title)
                .map(|(_, found)| found.clone())
        }
    }

    #[test]
    fn test_extract_dotted_file_name() {
        assert_eq!(
            extractor().extract("The.Matrix.1999.mkv"),
            Some(TitleYear::new("The Matrix", "1999"))
        );
    }

    #[test]
    fn test_extract_folder_with_parenthesized_year() {
        assert_eq!(
            extractor().extract("Inception (2010)"),
            Some(TitleYear::new("Inception", "2010"))
        );
        assert_eq!(
            extractor().extract("heat [1995]"),
            Some(TitleYear::new("Heat", "1995"))
        );
    }

    #[test]
    fn test_extract_underscores_and_release_tags() {
        assert_eq!(
            extractor().extract("the_dark_knight_2008_720p_bluray"),
            Some(TitleYear::new("The Dark Knight", "2008"))
        );
    }

    #[test]
    fn test_extract_last_plausible_year_wins() {
        assert_eq!(
            extractor().extract("2001.A.Space.Odyssey.1968.mkv"),
            Some(TitleYear::new("2001 A Space Odyssey", "1968"))
        );
    }

    #[test]
    fn test_extract_keeps_captured_whitespace() {
        assert_eq!(
            extractor().extract("Some Movie  1999"),
            Some(TitleYear::new("Some Movie ", "1999"))
        );
    }

    #[test]
    fn test_extract_ignores_non_19_20_years() {
        assert_eq!(extractor().extract("Metropolis 1827"), None);
        assert_eq!(extractor().extract("Movie 2160p"), None);
    }

    #[test]
    fn test_extract_without_year_and_lookup_is_none() {
        assert_eq!(extractor().extract("Random Stuff"), None);
    }

    #[test]
    fn test_extract_falls_back_to_lookup_with_stem() {
        let lookup = RecordingLookup {
            answers: vec![("Aladdin", TitleYear::new("Aladdin", "1992"))],
            queries: RefCell::new(Vec::new()),
        };
        let extractor = TitleExtractor::new(extensions(), lookup);

        assert_eq!(
            extractor.extract("aladdin.mkv"),
            Some(TitleYear::new("Aladdin", "1992"))
        );
        assert_eq!(extractor.extract("random_stuff"), None);
        assert_eq!(
            *extractor.lookup.queries.borrow(),
            vec!["Aladdin".to_string(), "Random Stuff".to_string()]
        );
    }

    #[test]
    fn test_lookup_not_called_when_pattern_matches() {
        let lookup = RecordingLookup {
            answers: vec![],
            queries: RefCell::new(Vec::new()),
        };
        let extractor = TitleExtractor::new(extensions(), lookup);

        assert!(extractor.extract("Heat.1995.mkv").is_some());
        assert!(extractor.lookup.queries.borrow().is_empty());
    }

    #[test]
    fn test_lookup_with_empty_fields_rejected() {
        let lookup = RecordingLookup {
            answers: vec![("Blank", TitleYear::new("", "1999"))],
            queries: RefCell::new(Vec::new()),
        };
        let extractor = TitleExtractor::new(extensions(), lookup);
        assert_eq!(extractor.extract("blank"), None);
    }

    #[test]
    fn test_normalize_strips_exactly_the_video_extension() {
        let normalized = extractor().normalize("the.big_lebowski.1998.mkv");
        assert_eq!(normalized.stem, "The Big Lebowski 1998");
        assert_eq!(normalized.full, "The Big Lebowski 1998.Mkv");

        let not_video = extractor().normalize("the.big_lebowski.1998.nfo");
        assert_eq!(not_video.full, "The Big Lebowski 1998 Nfo");
        assert_eq!(not_video.stem, not_video.full);
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("the MATRIX reloaded"), "The Matrix Reloaded");
        assert_eq!(title_case("it's 1080p"), "It'S 1080P");
        assert_eq!(title_case("x-men"), "X-Men");
        assert_eq!(title_case(""), "");
    }
}
