// Copyright 2026 BadCompany
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Gateway host matching.
//!
//! Gateway hosts are authored as `namespace/domain`, where either part may be
//! `*` and the domain may start with a single `*` meaning "any prefix".

use serde::Serialize;
use std::fmt;

use crate::engine_core::constants::naming;

/// A gateway host split into its namespace scope and domain pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct NormalizedHost {
    pub namespace: String,
    pub domain: String,
}

impl NormalizedHost {
    pub fn new(namespace: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            domain: domain.into(),
        }
    }

    fn is_any_namespace(&self) -> bool {
        self.namespace == naming::WILDCARD
    }
}

impl fmt::Display for NormalizedHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.domain)
    }
}

/// Split `host` on its first `/`.
///
/// No namespace means any namespace; `.` means the resource's own namespace
/// when that is known.
pub fn normalize(resource_namespace: &str, host: &str) -> NormalizedHost {
    match host.split_once(naming::NAMESPACE_SEPARATOR) {
        None => NormalizedHost::new(naming::WILDCARD, host),
        Some((ns, domain)) if ns == naming::SELF_NAMESPACE && !resource_namespace.is_empty() => {
            NormalizedHost::new(resource_namespace, domain)
        }
        Some((ns, domain)) => NormalizedHost::new(ns, domain),
    }
}

/// Whether two normalized hosts could match the same traffic.
pub fn overlaps(a: &NormalizedHost, b: &NormalizedHost) -> bool {
    if a.namespace != b.namespace && !a.is_any_namespace() && !b.is_any_namespace() {
        return false;
    }
    if a.domain == naming::WILDCARD || b.domain == naming::WILDCARD {
        return true;
    }
    domains_overlap(a.domain.as_bytes(), b.domain.as_bytes())
}

/// Normalize both hosts against their owners' namespaces and test overlap.
pub fn hosts_overlap(namespace_a: &str, host_a: &str, namespace_b: &str, host_b: &str) -> bool {
    overlaps(&normalize(namespace_a, host_a), &normalize(namespace_b, host_b))
}

/// Suffix comparison of two domain patterns.
///
/// A `*` may only appear as the leftmost character, so walking both strings
/// from the right until a mismatch or a leading `*` decides overlap in
/// linear time.
pub fn domains_overlap(a: &[u8], b: &[u8]) -> bool {
    let (mut i, mut j) = (a.len(), b.len());
    while i > 0 && j > 0 {
        i -= 1;
        j -= 1;
        if (i == 0 && a[i] == b'*') || (j == 0 && b[j] == b'*') {
            return true;
        }
        if a[i] != b[j] {
            return false;
        }
    }

    // `*example.com` against `example.com`: the star matches the empty prefix
    match a.len().abs_diff(b.len()) {
        0 => true,
        1 if a.len() > b.len() => a[0] == b'*',
        1 => b[0] == b'*',
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overlap(h1: &str, h2: &str) -> bool {
        hosts_overlap("", h1, "", h2)
    }

    #[test]
    fn test_normalize_adds_implicit_star() {
        assert_eq!(normalize("", "myhost"), NormalizedHost::new("*", "myhost"));
    }

    #[test]
    fn test_normalize_accepts_explicit_namespace() {
        assert_eq!(normalize("", "foobar/baz"), NormalizedHost::new("foobar", "baz"));
    }

    #[test]
    fn test_normalize_keeps_dot_without_namespace() {
        assert_eq!(normalize("", "./myhost"), NormalizedHost::new(".", "myhost"));
    }

    #[test]
    fn test_normalize_substitutes_dot() {
        assert_eq!(
            normalize("mynamespace", "./myhost"),
            NormalizedHost::new("mynamespace", "myhost")
        );
    }

    #[test]
    fn test_normalize_splits_on_first_slash_only() {
        assert_eq!(normalize("", "a/b/c"), NormalizedHost::new("a", "b/c"));
    }

    #[test]
    fn test_basic() {
        assert!(overlap("*/host", "*/host"));
    }

    #[test]
    fn test_basic_no_match() {
        assert!(!overlap("*/host", "*/differenthost"));
    }

    #[test]
    fn test_diff_namespace() {
        assert!(!overlap("a/host", "b/host"));
    }

    #[test]
    fn test_star_namespace() {
        assert!(overlap("a/host", "*/host"));
        assert!(overlap("host", "a/host"));
    }

    #[test]
    fn test_star_host() {
        assert!(overlap("a/*", "a/example.com"));
        assert!(overlap("a/example.com", "a/*"));
    }

    #[test]
    fn test_star_prefix() {
        assert!(overlap("a/*.example.com", "a/*mple.com"));
    }

    #[test]
    fn test_star_prefix_no_overlap() {
        assert!(!overlap("a/*.b.example.com", "a/*.a.example.com"));
    }

    #[test]
    fn test_star_prefix_edgecase() {
        assert!(overlap("a/*example.com", "a/example.com"));
        assert!(overlap("a/example.com", "a/*example.com"));
    }

    #[test]
    fn test_length_mismatch_without_star() {
        assert!(!overlap("a/xexample.com", "a/example.com"));
        assert!(!overlap("a/foo.example.com", "a/example.com"));
    }

    #[test]
    fn test_dot_namespace_resolves_against_owner() {
        assert!(hosts_overlap("prod", "./api.example.com", "prod", "prod/api.example.com"));
        assert!(!hosts_overlap("prod", "./api.example.com", "dev", "./api.example.com"));
    }

    #[test]
    fn test_empty_domains() {
        assert!(domains_overlap(b"", b""));
        assert!(domains_overlap(b"*", b""));
        assert!(!domains_overlap(b"a", b""));
    }
}
