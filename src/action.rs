use strum::{EnumIter, FromRepr, VariantArray};

/// A binary control action, representing applying a left or right force to the cart
#[derive(FromRepr, EnumIter, VariantArray, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Left = 0,
    Right = 1,
}

impl Action {
    /// The opposite action, `|a - 1|`
    pub fn flipped(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Threshold an approximator output into an action: `Right` if `value > threshold`
    pub fn from_prediction(value: f32, threshold: f32) -> Self {
        if value > threshold {
            Self::Right
        } else {
            Self::Left
        }
    }

    /// The action as a regression target for the approximator
    pub fn label(self) -> f32 {
        self as usize as f32
    }
}

impl From<usize> for Action {
    fn from(value: usize) -> Self {
        Self::from_repr(value).expect("Action::from is only called with valid values [0, 1]")
    }
}

impl From<Action> for usize {
    fn from(value: Action) -> Self {
        value as usize
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn flipped_is_one_minus_action() {
        for a in Action::iter() {
            assert_eq!(usize::from(a.flipped()), 1 - usize::from(a));
            assert_eq!(a.flipped().flipped(), a);
        }
    }

    #[test]
    fn from_prediction_is_strict() {
        assert_eq!(Action::from_prediction(0.51, 0.5), Action::Right);
        assert_eq!(Action::from_prediction(0.5, 0.5), Action::Left);
        assert_eq!(Action::from_prediction(0.0, 0.5), Action::Left);
        assert_eq!(Action::from_prediction(1.0, 0.5), Action::Right);
    }

    #[test]
    fn labels() {
        assert_eq!(Action::Left.label(), 0.0);
        assert_eq!(Action::Right.label(), 1.0);
        assert_eq!(Action::from(1), Action::Right);
        assert_eq!(Action::VARIANTS.len(), 2);
    }
}
