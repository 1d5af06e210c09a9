use criterion::{black_box, criterion_group, criterion_main, Criterion};
use meshcheck::engine::gateway_overlap::{find_overlaps, GatewayView};
use meshcheck::engine::host_matcher::hosts_overlap;
use meshcheck::engine_core::models::{GatewayRecord, Server};
use meshcheck::engine_core::types::{Origin, ResourceKind, ResourceName};
use std::collections::BTreeMap;

fn bench_host_overlap(c: &mut Criterion) {
    c.bench_function("host_overlap_wildcard_prefix", |b| {
        b.iter(|| {
            hosts_overlap(
                black_box("team-a"),
                black_box("./*.api.internal.example.com"),
                black_box("team-b"),
                black_box("*/orders.api.internal.example.com"),
            )
        })
    });
}

fn bench_gateway_scan(c: &mut Criterion) {
    let mut selector = BTreeMap::new();
    selector.insert("istio".to_string(), "ingressgateway".to_string());

    let origins: Vec<Origin> = (0..50)
        .map(|i| {
            Origin::new(
                ResourceKind::Gateway,
                ResourceName::new(format!("ns-{}", i % 5), format!("gw-{}", i)),
            )
        })
        .collect();
    let gateways: Vec<GatewayRecord> = (0..50)
        .map(|i| GatewayRecord {
            selector: selector.clone(),
            servers: vec![
                Server {
                    port: 80,
                    hosts: vec![format!("./svc-{}.example.com", i), "*.shared.example.com".to_string()],
                },
                Server {
                    port: 443,
                    hosts: vec![format!("svc-{}.secure.example.com", i)],
                },
            ],
        })
        .collect();
    let views: Vec<GatewayView<'_>> = origins
        .iter()
        .zip(&gateways)
        .map(|(o, g)| GatewayView::new(o, g))
        .collect();

    c.bench_function("gateway_overlap_scan_50", |b| {
        b.iter(|| find_overlaps(black_box(&views)))
    });
}

criterion_group!(benches, bench_host_overlap, bench_gateway_scan);
criterion_main!(benches);
