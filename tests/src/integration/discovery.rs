//! # Discovery Scenarios
//!
//! Active and passive subscribers against solicited and unsolicited
//! publishers, on two and three devices.

#[cfg(test)]
mod tests {
    use nan_discovery::testing::InMemoryMedium;
    use nan_discovery::{DiscoveryApi, PublishParams, SubscribeParams};

    use crate::integration::fixtures::{discoveries, replies, ssi, SETTLE_ROUNDS};

    #[test]
    fn test_active_subscribe_and_solicited_publish() {
        let mut medium = InMemoryMedium::new();
        let publisher = medium.add_device();
        let subscriber = medium.add_device();
        let paddr = medium.address(publisher);
        let saddr = medium.address(subscriber);

        let pid = medium
            .device_mut(publisher)
            .publish(
                PublishParams::new("test_service")
                    .with_ssi(ssi("aabbccdd"))
                    .with_mode(false, true),
            )
            .unwrap();
        let sid = medium
            .device_mut(subscriber)
            .subscribe(SubscribeParams::new("test_service").with_ssi(ssi("ddbbccaa")))
            .unwrap();

        medium.run_rounds(SETTLE_ROUNDS);

        let sub_events = medium.drain_events(subscriber);
        let pub_events = medium.drain_events(publisher);
        assert_eq!(
            discoveries(&sub_events),
            vec![(sid, pid, paddr, ssi("aabbccdd"))],
            "Subscriber should discover the publisher once"
        );
        assert_eq!(
            replies(&pub_events),
            vec![(pid, sid, saddr, ssi("ddbbccaa"))],
            "Publisher should report one reply"
        );
    }

    #[test]
    fn test_passive_subscribe_and_unsolicited_publish() {
        let mut medium = InMemoryMedium::new();
        let publisher = medium.add_device();
        let subscriber = medium.add_device();

        let pid = medium
            .device_mut(publisher)
            .publish(PublishParams::new("test_service").with_ssi(ssi("aabbccdd0011")))
            .unwrap();
        let sid = medium
            .device_mut(subscriber)
            .subscribe(SubscribeParams::new("test_service").passive())
            .unwrap();

        medium.run_rounds(SETTLE_ROUNDS);

        let sub_events = medium.drain_events(subscriber);
        assert_eq!(
            discoveries(&sub_events),
            vec![(sid, pid, medium.address(publisher), ssi("aabbccdd0011"))]
        );
        assert!(
            medium.drain_events(publisher).is_empty(),
            "Passive subscribers are never replied to"
        );
    }

    #[test]
    fn test_active_subscribe_two_publishers() {
        let mut medium = InMemoryMedium::new();
        let publisher = medium.add_device();
        let subscriber = medium.add_device();
        let external = medium.add_device();

        let pid = medium
            .device_mut(publisher)
            .publish(PublishParams::new("test_service").with_mode(false, true))
            .unwrap();
        let sid = medium
            .device_mut(subscriber)
            .subscribe(SubscribeParams::new("test_service"))
            .unwrap();
        medium.run_rounds(SETTLE_ROUNDS);
        assert_eq!(discoveries(&medium.drain_events(subscriber)).len(), 1);

        medium.device_mut(publisher).cancel_publish(pid).unwrap();
        medium.drain_events(publisher);

        // Second publisher is unsolicited only
        let essi = ssi("ddbbccaa1212121212121212");
        let eid = medium
            .device_mut(external)
            .publish(
                PublishParams::new("test_service")
                    .with_ssi(essi.clone())
                    .with_mode(true, false),
            )
            .unwrap();
        medium.run_rounds(SETTLE_ROUNDS);

        assert_eq!(
            discoveries(&medium.drain_events(subscriber)),
            vec![(sid, eid, medium.address(external), essi)]
        );
        assert!(
            replies(&medium.drain_events(external)).is_empty(),
            "No reply expected for an unsolicited-only publish"
        );
        assert!(medium.drain_events(publisher).is_empty());
    }

    #[test]
    fn test_active_subscribe_no_match() {
        let mut medium = InMemoryMedium::new();
        let publisher = medium.add_device();
        let subscriber = medium.add_device();
        let external = medium.add_device();

        medium
            .device_mut(publisher)
            .publish(PublishParams::new("test_dummy").with_mode(false, true))
            .unwrap();
        medium
            .device_mut(external)
            .publish(PublishParams::new("test_dummy").with_mode(true, false))
            .unwrap();
        medium
            .device_mut(subscriber)
            .subscribe(SubscribeParams::new("test_service"))
            .unwrap();

        medium.run_rounds(SETTLE_ROUNDS);

        for device in [publisher, subscriber, external] {
            assert!(
                medium.drain_events(device).is_empty(),
                "Device {} should see no events",
                device
            );
        }
        assert_eq!(medium.metrics().snapshot().matches, 0);
    }

    #[test]
    fn test_service_name_is_case_insensitive() {
        let mut medium = InMemoryMedium::new();
        let publisher = medium.add_device();
        let subscriber = medium.add_device();

        medium
            .device_mut(publisher)
            .publish(PublishParams::new("Test_Service"))
            .unwrap();
        medium
            .device_mut(subscriber)
            .subscribe(SubscribeParams::new("test_service"))
            .unwrap();

        medium.run_round();
        assert_eq!(discoveries(&medium.drain_events(subscriber)).len(), 1);
    }

    #[test]
    fn test_late_subscriber_discovers_existing_publisher() {
        let mut medium = InMemoryMedium::new();
        let publisher = medium.add_device();
        let subscriber = medium.add_device();

        medium
            .device_mut(publisher)
            .publish(PublishParams::new("svc"))
            .unwrap();
        medium.run_rounds(SETTLE_ROUNDS);

        medium
            .device_mut(subscriber)
            .subscribe(SubscribeParams::new("svc").passive())
            .unwrap();
        medium.run_round();

        assert_eq!(discoveries(&medium.drain_events(subscriber)).len(), 1);
    }
}
