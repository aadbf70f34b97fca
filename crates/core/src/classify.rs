/// How a failed statement affects the rest of its stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Expected on repeat runs against partially-existing objects; the
    /// stage keeps going.
    Ignorable,
    /// The script or environment is genuinely broken; the stage and the
    /// pipeline stop.
    Fatal,
}

/// Substrings that mark an execution error as benign for idempotent
/// re-provisioning. Matched against the lower-cased error message.
const IGNORABLE_PATTERNS: &[&str] = &["already exists", "unknown database", "duplicate entry"];

/// Both must be present for the missing-table case, so that messages
/// like "unknown column" stay fatal.
const MISSING_TABLE_PATTERNS: (&str, &str) = ("table", "doesn't exist");

#[must_use]
pub fn classify(message: &str) -> Disposition {
    let message = message.to_lowercase();

    if IGNORABLE_PATTERNS
        .iter()
        .any(|pattern| message.contains(pattern))
    {
        return Disposition::Ignorable;
    }

    let (left, right) = MISSING_TABLE_PATTERNS;
    if message.contains(left) && message.contains(right) {
        return Disposition::Ignorable;
    }

    Disposition::Fatal
}
