use crate::models::{CloudEnvironment, Region};

/// Base endpoint URL templates for one environment. `{region}` and, for
/// tenant-scoped services, `{tenant_id}` are interpolated after
/// authentication.
#[derive(Debug, Clone)]
pub struct EndpointTemplates {
    pub identity: String,
    pub servers: String,
    pub volumes: String,
    pub networking: String,
}

/// Static per-environment endpoint map. Built once at startup and never
/// mutated; tests construct one pointing at mock upstreams.
#[derive(Debug, Clone)]
pub struct EnvironmentCatalog {
    ospc: EndpointTemplates,
    flex: EndpointTemplates,
}

impl EnvironmentCatalog {
    pub fn new(ospc: EndpointTemplates, flex: EndpointTemplates) -> Self {
        Self { ospc, flex }
    }

    /// The production Rackspace endpoints. OSPC and Flex share the same
    /// hosts today but stay separate entries because credentials and
    /// cached tokens are per environment.
    pub fn rackspace() -> Self {
        let templates = EndpointTemplates {
            identity: "https://identity.api.rackspacecloud.com/v2.0".to_string(),
            servers: "https://{region}.servers.api.rackspacecloud.com/v2/{tenant_id}".to_string(),
            volumes: "https://{region}.blockstorage.api.rackspacecloud.com/v1/{tenant_id}"
                .to_string(),
            networking: "https://{region}.networks.api.rackspacecloud.com/v2.0".to_string(),
        };
        Self::new(templates.clone(), templates)
    }

    pub fn identity_base(&self, environment: CloudEnvironment) -> &str {
        &self.templates(environment).identity
    }

    /// Compute endpoint scoped by region and tenant.
    pub fn servers_base(
        &self,
        environment: CloudEnvironment,
        region: Region,
        tenant_id: &str,
    ) -> String {
        render(&self.templates(environment).servers, region, Some(tenant_id))
    }

    /// Block-storage endpoint scoped by region and tenant.
    pub fn volumes_base(
        &self,
        environment: CloudEnvironment,
        region: Region,
        tenant_id: &str,
    ) -> String {
        render(&self.templates(environment).volumes, region, Some(tenant_id))
    }

    /// Networking endpoint scoped by region only.
    pub fn networking_base(&self, environment: CloudEnvironment, region: Region) -> String {
        render(&self.templates(environment).networking, region, None)
    }

    fn templates(&self, environment: CloudEnvironment) -> &EndpointTemplates {
        match environment {
            CloudEnvironment::Ospc => &self.ospc,
            CloudEnvironment::Flex => &self.flex,
        }
    }
}

fn render(template: &str, region: Region, tenant_id: Option<&str>) -> String {
    let mut url = template.replace("{region}", region.as_str());
    if let Some(tenant_id) = tenant_id {
        url = url.replace("{tenant_id}", tenant_id);
    }
    url
}
