use crate::error::ParseError;
use serde_yaml::Value;

/// The front-matter fields the exporter uses. Other keys are ignored.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub author: Option<String>,
}

fn scalar_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

/// Parses the YAML between the front-matter delimiters.
///
/// `author` may be a single scalar or a list, which is joined with commas.
pub fn parse_front_matter(yaml: &str) -> Result<FrontMatter, ParseError> {
    if yaml.trim().is_empty() {
        return Ok(FrontMatter::default());
    }
    let value: Value = serde_yaml::from_str(yaml)?;
    let mapping = match value {
        Value::Mapping(mapping) => mapping,
        Value::Null => return Ok(FrontMatter::default()),
        _ => return Err(ParseError::FrontMatterShape),
    };

    let title = mapping.get("title").and_then(scalar_text);
    let author = mapping.get("author").and_then(|v| match v {
        Value::Sequence(items) => {
            let names: Vec<String> = items.iter().filter_map(scalar_text).collect();
            (!names.is_empty()).then(|| names.join(", "))
        }
        other => scalar_text(other),
    });

    Ok(FrontMatter { title, author })
}
