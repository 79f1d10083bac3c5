use std::ops::Deref;

use serde_json::Value;

/// Extra positional arguments passed through to a registration call.
///
/// Some conventions take more than an event name and a listener, e.g. an
/// options object for `add_event_listener` or a priority for `on`. `Params`
/// carries them verbatim, in order, as JSON values.
///
/// ```rust
/// use clearall::Params;
/// use serde_json::json;
///
/// let params = Params::from([1, 2]);
/// assert_eq!(params[0], json!(1));
///
/// let options: Params = vec![json!({ "capture": true, "passive": true })].into();
/// assert_eq!(options.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Params(Vec<Value>);

impl Params {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends one argument.
    pub fn with(mut self, value: impl Into<Value>) -> Self {
        self.0.push(value.into());
        self
    }

    pub fn into_inner(self) -> Vec<Value> {
        self.0
    }
}

impl Deref for Params {
    type Target = [Value];

    fn deref(&self) -> &[Value] {
        &self.0
    }
}

impl From<Vec<Value>> for Params {
    fn from(values: Vec<Value>) -> Self {
        Self(values)
    }
}

impl<V: Into<Value>, const N: usize> From<[V; N]> for Params {
    fn from(values: [V; N]) -> Self {
        values.into_iter().collect()
    }
}

impl<V: Into<Value>> FromIterator<V> for Params {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn keeps_argument_order() {
        let params = Params::new().with(1).with("two").with(json!({ "three": 3 }));
        assert_eq!(
            params.into_inner(),
            vec![json!(1), json!("two"), json!({ "three": 3 })]
        );
    }

    #[test]
    fn empty_by_default() {
        assert!(Params::default().is_empty());
        assert_eq!(Params::from([true, false]).len(), 2);
    }
}
