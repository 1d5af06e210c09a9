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

// Name qualification helpers

use crate::engine_core::constants::naming;

/// Qualify a short service name into its cluster-local fqdn.
///
/// Wildcards and names that already contain a dot are returned unchanged, as
/// is everything when the namespace is unknown.
pub fn convert_host_to_fqdn(namespace: &str, host: &str, cluster_domain: &str) -> String {
    if host.starts_with('*') || host.contains('.') || namespace.is_empty() {
        return host.to_string();
    }
    format!(
        "{}.{}.{}.{}",
        host,
        namespace,
        naming::SERVICE_SUBDOMAIN,
        cluster_domain
    )
}

/// Namespace label of an fqdn (`name.namespace.svc...`), if there is one.
pub fn namespace_of(fqdn: &str) -> Option<&str> {
    let mut labels = fqdn.split('.');
    labels.next()?;
    labels.next().filter(|ns| !ns.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_name_is_qualified() {
        assert_eq!(
            convert_host_to_fqdn("my-namespace", "foobar", "cluster.local"),
            "foobar.my-namespace.svc.cluster.local"
        );
    }

    #[test]
    fn test_qualified_and_wildcard_names_untouched() {
        assert_eq!(
            convert_host_to_fqdn("ns", "foo.other.svc.cluster.local", "cluster.local"),
            "foo.other.svc.cluster.local"
        );
        assert_eq!(convert_host_to_fqdn("ns", "*", "cluster.local"), "*");
        assert_eq!(convert_host_to_fqdn("", "foo", "cluster.local"), "foo");
    }

    #[test]
    fn test_namespace_of() {
        assert_eq!(
            namespace_of("foobar.my-namespace.svc.cluster.local"),
            Some("my-namespace")
        );
        assert_eq!(namespace_of("foobar"), None);
        assert_eq!(namespace_of("foobar."), None);
    }
}
