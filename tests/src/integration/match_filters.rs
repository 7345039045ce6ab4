//! # Matching Filter Tables
//!
//! Publisher side: active subscribe with a transmit filter against a
//! solicited-only publish with a receive filter. Subscriber side: passive
//! subscribe with a receive filter against an unsolicited-only publish with a
//! transmit filter. Both tables use positional comparison.

#[cfg(test)]
mod tests {
    use nan_discovery::{DiscoveryApi, PublishParams, SubscribeParams};

    use crate::integration::fixtures::{
        discoveries, filter, positional_medium, replies, ssi, PSSI, SETTLE_ROUNDS, SSSI,
    };

    /// (subscriber tx filter, publisher rx filter, expect match)
    const PUBLISHER_CASES: &[(Option<&str>, Option<&str>, bool)] = &[
        (None, None, true),
        (None, Some("0000000000"), true),
        (Some("0000000000"), None, true),
        (None, Some("01010102010301040105"), true),
        (Some("01010102010301040105"), None, false),
        (Some("01010102010301040105"), Some("0000000000"), true),
        (Some("0000000000"), Some("01010102010301040105"), true),
        (Some("01010102010301040105"), Some("01010102010301040105"), true),
        (Some("01010102010301040105"), Some("01010102010101040105"), false),
        (Some("0101000103000105"), Some("01010102010301040105"), true),
        (Some("01010102010301040105"), Some("0001020103000105"), true),
        (Some("000102000104"), Some("01010102010301040105"), true),
        (Some("01010102010301040105"), Some("010100010300"), false),
        (Some("051122334455"), Some("051122334455"), true),
        (Some("051122334455"), Some("0411223344"), false),
        (Some("03112233"), Some("051122334455"), false),
    ];

    /// (subscriber rx filter, publisher tx filter, expect match)
    const SUBSCRIBER_CASES: &[(Option<&str>, Option<&str>, bool)] = &[
        (None, None, true),
        (Some("0000000000"), None, true),
        (None, Some("0000000000"), true),
        (Some("01010102010301040105"), None, false),
        (None, Some("01010102010301040105"), true),
        (Some("01010102010301040105"), Some("0000000000"), true),
        (Some("0000000000"), Some("01010102010301040105"), true),
        (Some("01010102010301040105"), Some("01010102010301040105"), true),
        (Some("01010102010101040105"), Some("01010102010301040105"), false),
        (Some("01010102010301040105"), Some("0101000103000105"), true),
        (Some("0001020103000105"), Some("01010102010301040105"), true),
        (Some("01010102010301040105"), Some("0001020104"), false),
        (Some("010100010300"), Some("01010102010301040105"), true),
        (Some("051122334455"), Some("051122334455"), true),
        (Some("051122334455"), Some("021122"), false),
        (Some("03112233"), Some("051122334455"), false),
    ];

    fn run_publisher_case(sub_tx: Option<&str>, pub_rx: Option<&str>) -> (usize, usize) {
        let mut medium = positional_medium();
        let publisher = medium.add_device();
        let subscriber = medium.add_device();

        let mut params = PublishParams::new("test_pub_match_filter")
            .with_ssi(ssi(PSSI))
            .with_mode(false, true);
        if let Some(rx) = pub_rx {
            params = params.with_rx_filter(filter(rx));
        }
        medium.device_mut(publisher).publish(params).unwrap();

        let mut params = SubscribeParams::new("test_pub_match_filter").with_ssi(ssi(SSSI));
        if let Some(tx) = sub_tx {
            params = params.with_tx_filter(filter(tx));
        }
        medium.device_mut(subscriber).subscribe(params).unwrap();

        medium.run_rounds(SETTLE_ROUNDS);

        (
            discoveries(&medium.drain_events(subscriber)).len(),
            replies(&medium.drain_events(publisher)).len(),
        )
    }

    fn run_subscriber_case(sub_rx: Option<&str>, pub_tx: Option<&str>) -> (usize, usize) {
        let mut medium = positional_medium();
        let publisher = medium.add_device();
        let subscriber = medium.add_device();

        let mut params = PublishParams::new("test_sub_match_filter")
            .with_ssi(ssi(PSSI))
            .with_mode(true, false);
        if let Some(tx) = pub_tx {
            params = params.with_tx_filter(filter(tx));
        }
        medium.device_mut(publisher).publish(params).unwrap();

        let mut params = SubscribeParams::new("test_sub_match_filter")
            .with_ssi(ssi(SSSI))
            .passive();
        if let Some(rx) = sub_rx {
            params = params.with_rx_filter(filter(rx));
        }
        medium.device_mut(subscriber).subscribe(params).unwrap();

        medium.run_rounds(SETTLE_ROUNDS);

        (
            discoveries(&medium.drain_events(subscriber)).len(),
            replies(&medium.drain_events(publisher)).len(),
        )
    }

    #[test]
    fn test_publisher_match_filter_table() {
        for (i, &(sub_tx, pub_rx, expect)) in PUBLISHER_CASES.iter().enumerate() {
            let (discovered, replied) = run_publisher_case(sub_tx, pub_rx);
            let expected = usize::from(expect);
            assert_eq!(
                (discovered, replied),
                (expected, expected),
                "Case {}: sub_tx={:?} pub_rx={:?}",
                i + 1,
                sub_tx,
                pub_rx
            );
        }
    }

    #[test]
    fn test_subscriber_match_filter_table() {
        for (i, &(sub_rx, pub_tx, expect)) in SUBSCRIBER_CASES.iter().enumerate() {
            let (discovered, replied) = run_subscriber_case(sub_rx, pub_tx);
            assert_eq!(
                discovered,
                usize::from(expect),
                "Case {}: sub_rx={:?} pub_tx={:?}",
                i + 1,
                sub_rx,
                pub_tx
            );
            assert_eq!(replied, 0, "Passive subscribers are never replied to");
        }
    }

    #[test]
    fn test_intersection_rule_matches_any_common_entry() {
        // Default rule: order does not matter, one shared entry is enough
        let mut medium = nan_discovery::testing::InMemoryMedium::new();
        let publisher = medium.add_device();
        let subscriber = medium.add_device();

        medium
            .device_mut(publisher)
            .publish(PublishParams::new("svc").with_rx_filter(filter("01aa01bb")))
            .unwrap();
        medium
            .device_mut(subscriber)
            .subscribe(SubscribeParams::new("svc").with_tx_filter(filter("01cc01bb")))
            .unwrap();

        medium.run_rounds(SETTLE_ROUNDS);
        assert_eq!(discoveries(&medium.drain_events(subscriber)).len(), 1);
        assert_eq!(replies(&medium.drain_events(publisher)).len(), 1);
    }

    #[test]
    fn test_intersection_rule_zero_length_entry_needs_its_twin() {
        let mut medium = nan_discovery::testing::InMemoryMedium::new();
        let publisher = medium.add_device();
        let subscriber = medium.add_device();

        medium
            .device_mut(publisher)
            .publish(PublishParams::new("svc").with_rx_filter(filter("00")))
            .unwrap();
        medium
            .device_mut(subscriber)
            .subscribe(SubscribeParams::new("svc").with_tx_filter(filter("0101")))
            .unwrap();

        medium.run_rounds(SETTLE_ROUNDS);
        assert!(medium.drain_events(subscriber).is_empty());
        assert!(medium.drain_events(publisher).is_empty());
    }

    #[test]
    fn test_intersection_rule_disjoint_filters_do_not_match() {
        let mut medium = nan_discovery::testing::InMemoryMedium::new();
        let publisher = medium.add_device();
        let subscriber = medium.add_device();

        medium
            .device_mut(publisher)
            .publish(PublishParams::new("svc").with_rx_filter(filter("0411223344")))
            .unwrap();
        medium
            .device_mut(subscriber)
            .subscribe(SubscribeParams::new("svc").with_tx_filter(filter("051122334455")))
            .unwrap();

        medium.run_rounds(SETTLE_ROUNDS);
        assert!(medium.drain_events(subscriber).is_empty());
        assert!(medium.drain_events(publisher).is_empty());
        assert!(medium.metrics().snapshot().filtered_by_match_filter > 0);
    }
}
