use serde::Deserialize;
use serde_json::Value;
use starlit::{PLACEHOLDER_AUTHOR, PLACEHOLDER_QUOTE, Quote};

/// Pulls the generated text out of a Responses API body.
///
/// Looks at `output[0].content[0].text` first, then `output_text`. Returns an
/// empty string when neither is a string.
pub fn extract_output_text(data: &Value) -> &str {
    data.pointer("/output/0/content/0/text")
        .and_then(Value::as_str)
        .or_else(|| data.get("output_text").and_then(Value::as_str))
        .unwrap_or_default()
}

#[derive(Deserialize)]
struct ModelOutput {
    #[serde(default)]
    author: String,
    #[serde(default)]
    quote: String,
}

/// Outcome of [`parse_quote`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Parsed {
    pub quote: Quote,
    /// `true` when the model output was unusable and the quote was coerced.
    pub placeholder: bool,
}

/// Parses the model's text as `{"author": .., "quote": ..}`.
///
/// Both fields must be non-blank strings. Anything else is coerced: the
/// author becomes [`PLACEHOLDER_AUTHOR`] and the raw text, minus surrounding
/// quotation marks, becomes the quote. If no text is left the quote is
/// [`PLACEHOLDER_QUOTE`], so the result is never empty.
pub fn parse_quote(text: &str) -> Parsed {
    if let Ok(output) = serde_json::from_str::<ModelOutput>(text) {
        let author = output.author.trim();
        let quote = output.quote.trim();
        if !author.is_empty() && !quote.is_empty() {
            return Parsed {
                quote: Quote::new(author, quote),
                placeholder: false,
            };
        }
    }

    Parsed {
        quote: Quote::new(PLACEHOLDER_AUTHOR, coerce_raw(text)),
        placeholder: true,
    }
}

fn coerce_raw(text: &str) -> String {
    let text = text.trim();
    let text = text.strip_prefix(['"', '“']).unwrap_or(text);
    let text = text.strip_suffix(['"', '”']).unwrap_or(text);

    if text.trim().is_empty() {
        PLACEHOLDER_QUOTE.to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn prefers_structured_output() {
        let data = json!({
            "output": [{ "content": [{ "text": "first" }] }],
            "output_text": "second"
        });
        assert_eq!(extract_output_text(&data), "first");
    }

    #[test]
    fn falls_back_to_output_text() {
        let data = json!({ "output": [], "output_text": "second" });
        assert_eq!(extract_output_text(&data), "second");

        let data = json!({ "output": [{ "content": [{ "text": 7 }] }], "output_text": "x" });
        assert_eq!(extract_output_text(&data), "x");
    }

    #[test]
    fn missing_text_is_empty() {
        assert_eq!(extract_output_text(&json!({ "id": "resp_1" })), "");
        assert_eq!(extract_output_text(&json!(null)), "");
    }

    #[test]
    fn valid_json_is_kept() {
        let parsed = parse_quote(r#"{"author":" Italo Calvino ","quote":"La notte è lunga."}"#);
        assert!(!parsed.placeholder);
        assert_eq!(parsed.quote, Quote::new("Italo Calvino", "La notte è lunga."));
    }

    #[test]
    fn incomplete_json_is_coerced() {
        let raw = r#"{"author":"","quote":"Solo la luna."}"#;
        let parsed = parse_quote(raw);
        assert!(parsed.placeholder);
        assert_eq!(parsed.quote.author, PLACEHOLDER_AUTHOR);
        assert_eq!(parsed.quote.quote, raw);
    }

    #[test]
    fn wrong_types_are_coerced() {
        let parsed = parse_quote(r#"{"author":1,"quote":"x"}"#);
        assert!(parsed.placeholder);
    }

    #[test]
    fn plain_text_loses_its_quotation_marks() {
        let parsed = parse_quote("  “Le stelle non hanno fretta.”\n");
        assert!(parsed.placeholder);
        assert_eq!(parsed.quote.author, "Sconosciuto");
        assert_eq!(parsed.quote.quote, "Le stelle non hanno fretta.");

        assert_eq!(parse_quote("\"ciao\"").quote.quote, "ciao");
        // Only one mark is stripped from each end.
        assert_eq!(parse_quote("\"\"ciao\"\"").quote.quote, "\"ciao\"");
    }

    #[test]
    fn padding_inside_the_marks_is_kept() {
        let parsed = parse_quote("\"  ciao  \"");
        assert!(parsed.placeholder);
        assert_eq!(parsed.quote.quote, "  ciao  ");
        assert_eq!(parse_quote(" “ Il buio.” ").quote.quote, " Il buio.");
    }

    #[test]
    fn empty_output_uses_placeholder_line() {
        for raw in ["", "   ", "\"\"", "“”", "\"   \""] {
            let parsed = parse_quote(raw);
            assert!(parsed.placeholder);
            assert_eq!(parsed.quote, Quote::placeholder());
        }
    }
}
