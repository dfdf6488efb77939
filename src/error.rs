use std::fmt;

#[derive(Debug)]
pub enum AnalyzerError {
    Io(String),
    Parse(String),
    InvalidInput(String),
    Config(String),
}

impl fmt::Display for AnalyzerError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AnalyzerError::Io(msg) => write!(f, "IO error: {}", msg),
            AnalyzerError::Parse(msg) => write!(f, "Parse error: {}", msg),
            AnalyzerError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            AnalyzerError::Config(msg) => write!(f, "Config error: {}", msg),
        }
    }
}

impl std::error::Error for AnalyzerError {}

impl From<std::io::Error> for AnalyzerError {
    fn from(err: std::io::Error) -> Self {
        AnalyzerError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for AnalyzerError {
    fn from(err: serde_json::Error) -> Self {
        AnalyzerError::Parse(err.to_string())
    }
}
