pub const SYSTEM_PROMPT: &str = "You are organizing a user's starred GitHub repositories into named lists. \
Reply with a single category name of one or two words and nothing else: \
no explanation, no punctuation, no markdown.";

#[derive(Debug, Clone)]
pub struct CategoryRequest {
    pub full_name: String,
    pub readme: String,
    pub max_readme_chars: usize,
}

impl CategoryRequest {
    pub fn new(full_name: String, readme: String, max_readme_chars: usize) -> Self {
        Self {
            full_name,
            readme,
            max_readme_chars,
        }
    }

    pub fn to_prompt(&self) -> String {
        let excerpt = truncate_chars(&self.readme, self.max_readme_chars);

        let mut prompt = String::from(
            "Suggest a one or two word category for this repository based on its README.\n",
        );
        if excerpt.is_empty() {
            prompt.push_str("The repository has no README.\n");
        } else {
            prompt.push_str("Readme:\n");
            prompt.push_str(excerpt);
        }
        prompt
    }
}

// READMEs are arbitrary UTF-8, so cut on a char boundary.
fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_bounds_readme_length() {
        let request = CategoryRequest::new("a/b".to_string(), "x".repeat(10_000), 4000);
        let prompt = request.to_prompt();
        assert!(prompt.len() < 4200);
        assert!(prompt.contains(&"x".repeat(4000)));
        assert!(!prompt.contains(&"x".repeat(4001)));
    }

    #[test]
    fn test_truncation_is_char_boundary_safe() {
        let text = "é".repeat(10);
        assert_eq!(truncate_chars(&text, 3), "ééé");
        assert_eq!(truncate_chars(&text, 20), text.as_str());
    }

    #[test]
    fn test_empty_readme_is_called_out() {
        let request = CategoryRequest::new("a/b".to_string(), String::new(), 4000);
        assert!(request.to_prompt().contains("no README"));
    }
}
