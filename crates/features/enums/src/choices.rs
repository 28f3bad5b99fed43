/// Anything that can list selectable `(value, description)` pairs.
///
/// Display collaborators depend on this capability rather than on
/// [`Enumeration`](crate::Enumeration) itself, so a plain list of pairs works
/// wherever an enumeration does.
pub trait Choices {
    type Value: Clone;

    /// Visible pairs, in display order.
    fn as_pairs(&self) -> Vec<(Self::Value, String)>;
}

impl<V: Clone> Choices for [(V, String)] {
    type Value = V;

    fn as_pairs(&self) -> Vec<(V, String)> {
        self.to_vec()
    }
}

impl<V: Clone> Choices for Vec<(V, String)> {
    type Value = V;

    fn as_pairs(&self) -> Vec<(V, String)> {
        self.clone()
    }
}

impl<V: Clone> Choices for [(V, &str)] {
    type Value = V;

    fn as_pairs(&self) -> Vec<(V, String)> {
        self.iter().map(|(value, desc)| (value.clone(), (*desc).to_owned())).collect()
    }
}

impl<C: Choices + ?Sized> Choices for &C {
    type Value = C::Value;

    fn as_pairs(&self) -> Vec<(Self::Value, String)> {
        (**self).as_pairs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(choices: &impl Choices<Value = i32>) -> Vec<String> {
        choices.as_pairs().into_iter().map(|(_, desc)| desc).collect()
    }

    #[test]
    fn plain_pairs_are_choices() {
        let pairs = vec![(1, "One".to_owned()), (2, "Two".to_owned())];
        assert_eq!(labels(&pairs), vec!["One", "Two"]);

        let borrowed: &[(i32, &str)] = &[(3, "Three")];
        assert_eq!(labels(&borrowed), vec!["Three"]);
    }
}
