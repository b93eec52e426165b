//! Provides definition for diagnostics, which are the errors reported by
//! the resolution engine.
//!
//! Diagnostics from the engine describe a defect in a collaborator (for
//! example, registering the same symbol twice) or a reference that was
//! never resolved. They describe engine state rather than a position in
//! the source program, so labels carry only a message.

use ilgen_problems::Problem;

/// A message that describes the state that led to the diagnostic.
#[derive(Debug)]
pub struct Label {
    pub message: String,
}

impl Label {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A diagnostic. Diagnostics have a code that is indicative of the category
/// and a primary label.
#[derive(Debug)]
pub struct Diagnostic {
    /// A normally unique value describing the type of diagnostic.
    pub code: String,

    description: String,

    internal: bool,

    /// The primary or first label.
    pub primary: Label,

    /// Additional descriptions to the constant description.
    pub described: Vec<String>,
}

impl Diagnostic {
    /// Creates a diagnostic from the problem code and with the specified label.
    pub fn problem(problem: Problem, primary: Label) -> Self {
        Self {
            code: problem.code().to_string(),
            description: problem.message().to_string(),
            internal: problem.is_internal(),
            primary,
            described: vec![],
        }
    }

    /// Adds to the description additional context about the problem.
    pub fn with_context(mut self, description: &str, item: &str) -> Self {
        self.described.push(format!("{}={}", description, item));
        self
    }

    /// Returns true if the diagnostic has the code of the problem.
    pub fn is(&self, problem: Problem) -> bool {
        self.code == problem.code()
    }

    /// Returns true if the diagnostic reports a defect in a collaborator of
    /// the engine rather than a problem in the input program. Such diagnostics
    /// end the run.
    pub fn is_internal(&self) -> bool {
        self.internal
    }

    /// Returns the description for the diagnostic including any context.
    pub fn description(&self) -> String {
        if self.described.is_empty() {
            self.description.clone()
        } else {
            format!("{} ({})", self.description, self.described.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn description_when_has_context_then_includes_context() {
        let diagnostic = Diagnostic::problem(
            Problem::DuplicateSymbolRegistration,
            Label::new("Second registration"),
        )
        .with_context("symbol", "Customer.Name");

        assert!(diagnostic.description().ends_with("(symbol=Customer.Name)"));
        assert!(diagnostic.is(Problem::DuplicateSymbolRegistration));
        assert!(diagnostic.is_internal());
    }

    #[test]
    fn problem_when_unresolved_reference_then_not_internal() {
        let diagnostic = Diagnostic::problem(
            Problem::UnresolvedForwardReference,
            Label::new("Awaited here"),
        );

        assert!(!diagnostic.is_internal());
        assert_eq!(diagnostic.primary.message, "Awaited here");
        assert_eq!(diagnostic.description(), Problem::UnresolvedForwardReference.message());
    }
}
