// Copyright 2026 BadCompany
// Licensed under the Apache License, Version 2.0

#![no_main]

use arbitrary::{Arbitrary, Unstructured};
use libfuzzer_sys::fuzz_target;
use meshcheck::engine::host_matcher::{hosts_overlap, normalize, overlaps};

/// Two gateway hosts with their owning namespaces.
#[derive(Debug, Arbitrary)]
struct FuzzHostsInput {
    namespace_a: String,
    host_a: String,
    namespace_b: String,
    host_b: String,
}

fuzz_target!(|data: &[u8]| {
    let mut unstructured = Unstructured::new(data);

    if let Ok(input) = FuzzHostsInput::arbitrary(&mut unstructured) {
        let forward = hosts_overlap(&input.namespace_a, &input.host_a, &input.namespace_b, &input.host_b);
        let backward = hosts_overlap(&input.namespace_b, &input.host_b, &input.namespace_a, &input.host_a);
        assert_eq!(forward, backward, "overlap must be symmetric");

        let a = normalize(&input.namespace_a, &input.host_a);
        assert!(overlaps(&a, &a), "a host must overlap itself");
    }
});
