// Copyright 2026 BadCompany
// Licensed under the Apache License, Version 2.0

#![no_main]

use libfuzzer_sys::fuzz_target;
use meshcheck::config::Config;
use meshcheck::snapshot::InMemorySnapshot;

fuzz_target!(|data: &[u8]| {
    // Arbitrary manifests must either fail to load or analyze without panicking.
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(snapshot) = InMemorySnapshot::from_yaml_str("fuzz.yaml", text) {
            let _ = meshcheck::analyzers::run_all(&Config::default(), &snapshot);
        }
    }
});
