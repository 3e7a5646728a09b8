use crate::error::{Error, Result};

/// Reduce a model completion to a category label: the first non-empty line,
/// stripped of surrounding quotes and trailing punctuation.
pub fn category_from_response(response: &str) -> Result<String> {
    let line = response
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .ok_or_else(|| Error::ParseError("Empty response from model".to_string()))?;

    let label = line
        .trim_matches(|c| c == '"' || c == '\'' || c == '`')
        .trim_end_matches('.')
        .trim();

    if label.is_empty() {
        return Err(Error::ParseError(format!(
            "No category in response: {:?}",
            response
        )));
    }

    Ok(label.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_label() {
        assert_eq!(category_from_response("Tooling").unwrap(), "Tooling");
    }

    #[test]
    fn test_first_line_wins() {
        let response = "Web Framework\n\nThis repository is a web framework because...";
        assert_eq!(category_from_response(response).unwrap(), "Web Framework");
    }

    #[test]
    fn test_leading_blank_lines_are_skipped() {
        assert_eq!(
            category_from_response("\n\n  Machine Learning  \n").unwrap(),
            "Machine Learning"
        );
    }

    #[test]
    fn test_quotes_and_trailing_period_are_stripped() {
        assert_eq!(category_from_response("\"Databases\".").unwrap(), "Databases");
        assert_eq!(category_from_response("`CLI Tools`").unwrap(), "CLI Tools");
    }

    #[test]
    fn test_empty_response_is_an_error() {
        assert!(category_from_response("").is_err());
        assert!(category_from_response("  \n \n").is_err());
        assert!(category_from_response("\"\"").is_err());
    }
}
