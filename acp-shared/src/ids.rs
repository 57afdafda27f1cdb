use uuid::Uuid;

/// Number of hex characters kept from the random part of an id.
const RANDOM_HEX_LEN: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdPrefix {
    CheckoutSession,
    Order,
    LineItem,
}

impl IdPrefix {
    pub fn as_str(&self) -> &'static str {
        match self {
            IdPrefix::CheckoutSession => "cs",
            IdPrefix::Order => "ord",
            IdPrefix::LineItem => "li",
        }
    }
}

/// Mint an opaque identifier of the form `<prefix>_<random-hex>`.
pub fn prefixed_id(prefix: IdPrefix) -> String {
    let hex = Uuid::new_v4().simple().to_string();
    let random: String = hex.chars().take(RANDOM_HEX_LEN).collect();
    format!("{}_{}", prefix.as_str(), random)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_prefixed_id_shape() {
        let id = prefixed_id(IdPrefix::CheckoutSession);
        let (prefix, random) = id.split_once('_').unwrap();

        assert_eq!(prefix, "cs");
        assert_eq!(random.len(), RANDOM_HEX_LEN);
        assert!(random.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_prefixes() {
        assert!(prefixed_id(IdPrefix::Order).starts_with("ord_"));
        assert!(prefixed_id(IdPrefix::LineItem).starts_with("li_"));
    }

    #[test]
    fn test_ids_are_unique() {
        let ids: HashSet<String> = (0..1000).map(|_| prefixed_id(IdPrefix::Order)).collect();
        assert_eq!(ids.len(), 1000);
    }
}
