use std::fmt;

/// Where a node came from in the translator's input
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Location {
    pub file: String,
    pub line: u32, // Line number (1-based, 0 when unknown)
}

impl Location {
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self { file: file.into(), line }
    }

    /// Location used for synthesized nodes
    pub fn unknown() -> Self {
        Self::default()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_display() {
        let loc = Location::new("example.i", 12);
        assert_eq!(loc.to_string(), "example.i:12");
    }

    #[test]
    fn test_unknown_location() {
        assert_eq!(Location::unknown().to_string(), ":0");
    }
}
