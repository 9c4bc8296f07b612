//! One-hot encoding of the area-type attribute.

/// Recognized area-type categories.
///
/// `BuiltUp` is the reference category the model was trained with: it has no
/// flag of its own, and every unrecognized label falls back to it. A typo in
/// the label therefore encodes the same as an explicit "Built-up Area"; the
/// trained model cannot distinguish the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AreaType {
    Carpet,
    Plot,
    SuperBuiltUp,
    BuiltUp,
}

impl AreaType {
    /// Classify a free-text label, case-insensitively.
    ///
    /// "super built-up" is matched as a prefix rather than full equality to
    /// tolerate variants like "Super built-up Area of society".
    pub fn from_label(label: &str) -> Self {
        let label = label.to_lowercase();
        if label == "carpet area" {
            AreaType::Carpet
        } else if label == "plot area" {
            AreaType::Plot
        } else if label.starts_with("super built-up") {
            AreaType::SuperBuiltUp
        } else {
            AreaType::BuiltUp
        }
    }

    /// Three-flag encoding in training order: `[carpet, plot, super_builtup]`.
    pub fn one_hot(self) -> [f32; 3] {
        match self {
            AreaType::Carpet => [1.0, 0.0, 0.0],
            AreaType::Plot => [0.0, 1.0, 0.0],
            AreaType::SuperBuiltUp => [0.0, 0.0, 1.0],
            AreaType::BuiltUp => [0.0, 0.0, 0.0],
        }
    }
}
