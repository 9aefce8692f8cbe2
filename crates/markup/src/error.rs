use thiserror::Error;

/// Problems found while parsing a source. None of these abort a parse; the
/// parser logs them and falls back to a default.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Front-matter is not valid YAML: {0}")]
    FrontMatterSyntax(#[from] serde_yaml::Error),

    #[error("Front-matter must be a mapping of keys to values")]
    FrontMatterShape,

    #[error("Table placeholder {0} has no matching table block")]
    MissingTable(usize),
}
