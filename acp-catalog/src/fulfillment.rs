use acp_core::checkout::FulfillmentOption;

pub const ECONOMY_OPTION_ID: &str = "ship_econ";
pub const EXPRESS_OPTION_ID: &str = "ship_exp";

/// The fixed shipping options offered on every session. The first entry is
/// the default selection.
pub fn default_fulfillment_options() -> Vec<FulfillmentOption> {
    vec![
        FulfillmentOption {
            id: ECONOMY_OPTION_ID.to_string(),
            label: "Economy (5-7 days)".to_string(),
            amount: 599,
            eta_days: 7,
        },
        FulfillmentOption {
            id: EXPRESS_OPTION_ID.to_string(),
            label: "Express (2-3 days)".to_string(),
            amount: 1299,
            eta_days: 3,
        },
    ]
}

/// Resolve `wanted` among `offered`, falling back to the first offered option
/// when the id is unknown. Returns `None` only if nothing is offered.
pub fn select_option<'a>(
    offered: &'a [FulfillmentOption],
    wanted: Option<&str>,
) -> Option<&'a FulfillmentOption> {
    wanted
        .and_then(|id| offered.iter().find(|option| option.id == id))
        .or_else(|| offered.first())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_is_fixed() {
        let options = default_fulfillment_options();
        assert_eq!(options.len(), 2);
        assert_eq!(options[0].id, ECONOMY_OPTION_ID);
        assert_eq!(options[0].amount, 599);
        assert_eq!(options[1].id, EXPRESS_OPTION_ID);
        assert_eq!(options[1].amount, 1299);
        assert_eq!(options, default_fulfillment_options());
    }

    #[test]
    fn test_select_known_option() {
        let options = default_fulfillment_options();
        let selected = select_option(&options, Some(EXPRESS_OPTION_ID)).unwrap();
        assert_eq!(selected.id, EXPRESS_OPTION_ID);
    }

    #[test]
    fn test_unknown_option_falls_back_to_first() {
        let options = default_fulfillment_options();
        let selected = select_option(&options, Some("ship_teleport")).unwrap();
        assert_eq!(selected.id, ECONOMY_OPTION_ID);

        let selected = select_option(&options, None).unwrap();
        assert_eq!(selected.id, ECONOMY_OPTION_ID);
    }

    #[test]
    fn test_nothing_offered() {
        assert!(select_option(&[], Some(ECONOMY_OPTION_ID)).is_none());
    }
}
