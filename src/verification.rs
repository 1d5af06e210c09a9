// Copyright 2026 BadCompany
// Licensed under the Apache License, Version 2.0

//! Formal Verification Module (Kani Proofs)
//!
//! The strictness proof drives the real policy check with one symbolic peer.
//! Host-overlap proofs run the real suffix matcher over short symbolic byte
//! strings.

#[allow(unused_variables, unused_assignments, unused_mut)]
#[cfg(kani)]
mod verification {
    use crate::engine::host_matcher::domains_overlap;
    use crate::engine::policy_index::enforces_strict_mtls;
    use crate::engine_core::models::{MtlsMode, MutualTls, PeerAuthMethod, PolicyRecord};

    // =========================================================================
    // PROOF 1: STRICT IFF MANDATORY, STRICT-MODE, TLS-INTOLERANT MTLS
    // (policy_index.rs enforces_strict_mtls)
    // =========================================================================
    #[kani::proof]
    fn prove_single_peer_strictness() {
        let peer_is_optional: bool = kani::any();
        let is_mtls: bool = kani::any();
        let permissive: bool = kani::any();
        let allow_tls: bool = kani::any();

        let peer = if is_mtls {
            PeerAuthMethod::Mtls(MutualTls {
                mode: if permissive { MtlsMode::Permissive } else { MtlsMode::Strict },
                allow_tls,
            })
        } else {
            PeerAuthMethod::Other
        };
        let policy = PolicyRecord {
            targets: Vec::new(),
            peers: vec![peer],
            peer_is_optional,
        };

        let enforces = enforces_strict_mtls(&policy);
        if peer_is_optional {
            kani::assert(!enforces, "CRITICAL: Optional peer auth must not count as strict");
        }
        kani::assert(
            enforces == (!peer_is_optional && is_mtls && !permissive && !allow_tls),
            "Strict only for a mandatory, strict, TLS-intolerant mTLS peer",
        );
    }

    // =========================================================================
    // PROOF 2: OVERLAP IS SYMMETRIC (host_matcher.rs domains_overlap)
    // =========================================================================
    #[kani::proof]
    #[kani::unwind(4)]
    fn prove_domain_overlap_symmetric() {
        let a: [u8; 3] = kani::any();
        let b: [u8; 3] = kani::any();
        let la: usize = kani::any();
        let lb: usize = kani::any();
        kani::assume(la <= 3 && lb <= 3);
        let (a, b) = (&a[..la], &b[..lb]);
        kani::assert(
            domains_overlap(a, b) == domains_overlap(b, a),
            "Overlap must not depend on argument order",
        );
    }

    // =========================================================================
    // PROOF 3: A DOMAIN OVERLAPS ITSELF
    // =========================================================================
    #[kani::proof]
    #[kani::unwind(4)]
    fn prove_domain_overlap_reflexive() {
        let a: [u8; 3] = kani::any();
        let la: usize = kani::any();
        kani::assume(la <= 3);
        kani::assert(domains_overlap(&a[..la], &a[..la]), "CRITICAL: Identical hosts overlap");
    }
}
