#[cfg(test)]
mod test {

    use serde_json::json;

    use crate::config::catalog::EnvironmentCatalog;
    use crate::flavors;
    use crate::gateway::ScopeQuery;
    use crate::images;
    use crate::models::{CloudEnvironment, Region};

    #[test]
    fn known_flavor_name_resolves_to_its_id() {
        assert_eq!(
            flavors::resolve_flavor_id("1 GB General Purpose v1"),
            "general1-1"
        );
        assert_eq!(flavors::resolve_flavor_id("OnMetal I/O v2"), "onmetal-io2");
    }

    #[test]
    fn unknown_flavor_name_falls_back_to_default() {
        assert_eq!(
            flavors::resolve_flavor_id("nonexistent flavor"),
            flavors::DEFAULT_FLAVOR_ID
        );
    }

    #[test]
    fn flavor_family_strips_generation_suffix() {
        assert_eq!(flavors::flavor_family("general1-2"), "general");
        assert_eq!(flavors::flavor_family("compute1-15"), "compute");
        assert_eq!(flavors::flavor_family("performance2-90"), "performance");
    }

    #[test]
    fn image_lookup_is_case_insensitive() {
        assert_eq!(
            images::resolve_image_uuid("Ubuntu 24.04 LTS (Cloud)"),
            "2fd07c5d-3104-4931-882b-4fe6a115c3bd"
        );
        assert_eq!(
            images::resolve_image_uuid("  ubuntu 24.04 lts (cloud) "),
            "2fd07c5d-3104-4931-882b-4fe6a115c3bd"
        );
    }

    #[test]
    fn unknown_image_name_passes_through() {
        let uuid = "f0927f2c-7b84-4bc9-ac8c-a0891ffb16d4";
        assert_eq!(images::resolve_image_uuid(uuid), uuid);
    }

    #[test]
    fn rackspace_catalog_renders_scoped_endpoints() {
        let catalog = EnvironmentCatalog::rackspace();

        assert_eq!(
            catalog.identity_base(CloudEnvironment::Ospc),
            "https://identity.api.rackspacecloud.com/v2.0"
        );
        assert_eq!(
            catalog.servers_base(CloudEnvironment::Ospc, Region::Iad, "t1"),
            "https://iad.servers.api.rackspacecloud.com/v2/t1"
        );
        assert_eq!(
            catalog.volumes_base(CloudEnvironment::Flex, Region::Ord, "t2"),
            "https://ord.blockstorage.api.rackspacecloud.com/v1/t2"
        );
        assert_eq!(
            catalog.networking_base(CloudEnvironment::Ospc, Region::Dfw),
            "https://dfw.networks.api.rackspacecloud.com/v2.0"
        );
    }

    #[test]
    fn scope_query_defaults_to_ospc() {
        let scope: ScopeQuery = serde_json::from_value(json!({ "region": "iad" })).unwrap();
        assert_eq!(scope.region, Region::Iad);
        assert_eq!(scope.cloud_environment, CloudEnvironment::Ospc);

        let scope: ScopeQuery =
            serde_json::from_value(json!({ "region": "lon", "cloud_environment": "flex" }))
                .unwrap();
        assert_eq!(scope.cloud_environment, CloudEnvironment::Flex);
    }

    #[test]
    fn every_key_pair_has_a_store_slot() {
        use crate::auth::store::CredentialStore;

        let store = CredentialStore::new();
        for environment in CloudEnvironment::ALL {
            for region in Region::ALL {
                assert_eq!(store.read(environment, region), None);
            }
        }
    }
}
