//! Namespace-free logical paths.

/// A slash-separated path of local element names.
///
/// A leading `.//` makes the first step a descendant search (the context
/// element itself included); every later step matches direct children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalPath<'p> {
    descendant: bool,
    steps: Vec<&'p str>,
}

impl<'p> LogicalPath<'p> {
    pub fn parse(path: &'p str) -> Self {
        let (descendant, rest) = match path.strip_prefix(".//") {
            Some(rest) => (true, rest),
            None => (false, path.strip_prefix("./").unwrap_or(path)),
        };

        Self {
            descendant,
            steps: rest.split('/').filter(|s| !s.is_empty()).collect(),
        }
    }

    pub fn is_descendant(&self) -> bool {
        self.descendant
    }

    pub fn steps(&self) -> &[&'p str] {
        &self.steps
    }

    /// Whether the path names no element at all.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
