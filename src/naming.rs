//! Folder key → album title.
//!
//! Folder keys follow a loose `YYYY-name` convention with `-` or `_` as word
//! separators. The display title splits on either separator and capitalizes
//! each word:
//! - `2024-sol_april` → "2024 Sol April"
//! - `2023-12-lisbon` → "2023 12 Lisbon"
//! - `misc` → "Misc"
//!
//! Capitalization only touches the first character of each word and uses
//! plain Unicode uppercasing, no locale rules. The rest of the word is left
//! as-is.

/// Build the display title for a folder key.
///
/// Empty words from doubled or trailing separators are dropped, so the
/// result never has leading, trailing, or repeated spaces.
pub fn folder_title(folder_key: &str) -> String {
    folder_key
        .split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(capitalize_first)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixed_separators() {
        assert_eq!(folder_title("2024-sol_april"), "2024 Sol April");
    }

    #[test]
    fn dashes_only() {
        assert_eq!(folder_title("2023-12-lisbon"), "2023 12 Lisbon");
    }

    #[test]
    fn underscores_only() {
        assert_eq!(folder_title("road_trip"), "Road Trip");
    }

    #[test]
    fn single_word() {
        assert_eq!(folder_title("misc"), "Misc");
    }

    #[test]
    fn rest_of_word_untouched() {
        assert_eq!(folder_title("2022-NYC_mARCH"), "2022 NYC MARCH");
    }

    #[test]
    fn doubled_separators_collapse() {
        assert_eq!(folder_title("2024--sol__april-"), "2024 Sol April");
    }

    #[test]
    fn non_ascii_first_letter() {
        assert_eq!(folder_title("2021-élan"), "2021 Élan");
    }

    #[test]
    fn empty_key() {
        assert_eq!(folder_title(""), "");
    }
}
