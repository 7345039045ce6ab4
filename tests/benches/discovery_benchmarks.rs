//! # NAN Discovery Benchmarks
//!
//! | Area | Operation |
//! |------|-----------|
//! | SRF | Bloom filter build and lookup across lengths |
//! | Matching filters | TLV decode, intersection and positional compare |
//! | Session manager | Inbound frame against a full instance table |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use nan_discovery::domain::matching::{self, PublishView, SubscribeView};
use nan_discovery::testing::device_address;
use nan_discovery::{
    DiscoveryApi, DiscoveryConfig, MacAddress, MatchFilter, MatchRule, PublishMode,
    PublishParams, ServiceId, ServiceResponseFilter, SessionManager, SubscribeParams,
};
use rand::Rng;
use std::time::Duration;

fn random_addresses(n: usize) -> Vec<MacAddress> {
    let mut rng = rand::thread_rng();
    (0..n).map(|_| MacAddress::new(rng.gen())).collect()
}

fn bench_srf_bloom(c: &mut Criterion) {
    let mut group = c.benchmark_group("srf-bloom");
    group.measurement_time(Duration::from_secs(5));

    for len in [1usize, 8, 64, 255] {
        let addresses = random_addresses(len * 2);
        group.throughput(Throughput::Elements(addresses.len() as u64));

        group.bench_with_input(BenchmarkId::new("build", len), &len, |b, &len| {
            b.iter(|| black_box(ServiceResponseFilter::bloom(&addresses, len, 2, true).unwrap()))
        });

        let srf = ServiceResponseFilter::bloom(&addresses, len, 2, true).unwrap();
        let probes = random_addresses(256);
        group.bench_with_input(BenchmarkId::new("lookup", len), &srf, |b, srf| {
            b.iter(|| probes.iter().filter(|a| srf.contains(a)).count())
        });
    }

    group.finish();
}

fn bench_match_filters(c: &mut Criterion) {
    let mut group = c.benchmark_group("match-filter");

    let entries: Vec<Vec<u8>> = (0..32u8).map(|i| vec![i; (i % 8 + 1) as usize]).collect();
    let a = MatchFilter::new(entries.clone()).unwrap();
    let mut reversed = entries;
    reversed.reverse();
    let b_filter = MatchFilter::new(reversed).unwrap();
    let encoded = a.encode();

    group.bench_function("decode", |b| {
        b.iter(|| black_box(MatchFilter::decode(&encoded).unwrap()))
    });
    for rule in [MatchRule::Intersection, MatchRule::Positional] {
        group.bench_with_input(
            BenchmarkId::new("compare", format!("{:?}", rule)),
            &rule,
            |b, rule| b.iter(|| rule.evaluate(Some(&a), Some(&b_filter))),
        );
    }

    group.finish();
}

fn bench_matching_decision(c: &mut Criterion) {
    let filter = MatchFilter::from_hex("01010102010301040105").unwrap();
    let srf = ServiceResponseFilter::bloom(&random_addresses(16), 16, 0, false).unwrap();
    let publ = PublishView {
        service_id: ServiceId::from_name("svc"),
        address: device_address(0),
        mode: PublishMode::default(),
        rx_filter: Some(&filter),
        tx_filter: Some(&filter),
    };
    let sub = SubscribeView {
        service_id: ServiceId::from_name("svc"),
        address: device_address(1),
        active: true,
        rx_filter: Some(&filter),
        tx_filter: Some(&filter),
        srf: Some(&srf),
    };

    c.bench_function("matching/evaluate", |b| {
        b.iter(|| black_box(matching::evaluate(MatchRule::Positional, &publ, &sub)))
    });
}

fn bench_inbound_frames(c: &mut Criterion) {
    let mut group = c.benchmark_group("session-manager");

    for instances in [1usize, 32, 255] {
        let mut publisher = SessionManager::new(device_address(0), DiscoveryConfig::default());
        for i in 0..instances {
            publisher
                .publish(PublishParams::new(format!("svc_{}", i)))
                .unwrap();
        }
        let mut subscriber = SessionManager::new(device_address(1), DiscoveryConfig::default());
        subscriber.subscribe(SubscribeParams::new("svc_0")).unwrap();
        let frame = subscriber.advertisements().remove(0);

        group.throughput(Throughput::Elements(instances as u64));
        group.bench_with_input(
            BenchmarkId::new("subscribe_frame", instances),
            &frame,
            |b, frame| {
                b.iter(|| {
                    let replies = publisher.on_advertisement(frame);
                    publisher.drain_events();
                    black_box(replies)
                })
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_srf_bloom,
    bench_match_filters,
    bench_matching_decision,
    bench_inbound_frames
);
criterion_main!(benches);
