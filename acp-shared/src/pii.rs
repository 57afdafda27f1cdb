use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Wraps a secret (payment token, buyer e-mail) so that `Debug` and `Display`
/// never print it. Serialization still emits the real value because API
/// responses and outbound calls need it.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Masked<T>(pub T);

const MASK: &str = "********";

impl<T> fmt::Debug for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(MASK)
    }
}

impl<T> fmt::Display for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(MASK)
    }
}

impl<T: Serialize> Serialize for Masked<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<T> Masked<T> {
    pub fn new(value: T) -> Self {
        Self(value)
    }

    pub fn expose(&self) -> &T {
        &self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl From<&str> for Masked<String> {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_and_display_are_masked() {
        let token = Masked::from("tok_visa_4242");

        assert_eq!(format!("{:?}", token), "********");
        assert_eq!(format!("{}", token), "********");
        assert_eq!(token.expose(), "tok_visa_4242");
    }

    #[test]
    fn test_serde_is_transparent() {
        let token: Masked<String> = serde_json::from_str("\"tok_123\"").unwrap();
        assert_eq!(token.expose(), "tok_123");
        assert_eq!(serde_json::to_string(&token).unwrap(), "\"tok_123\"");
    }
}
