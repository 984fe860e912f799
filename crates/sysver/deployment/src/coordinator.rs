//! Deployment Coordinator - records deployments and mints system versions
//!
//! Every deployment is written to the deployment store. Only deployments
//! that change a service's tracked version (or introduce a new service)
//! produce a new system version snapshot.

use crate::error::Result;
use std::sync::Arc;
use sysver_registry::{DeploymentStore, SystemVersionStore};
use sysver_types::{DeploymentRecord, DeploymentResponse};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

/// Coordinates the deployment store and the system version store
pub struct DeploymentCoordinator {
    /// Current view and deployment log
    deployments: Arc<dyn DeploymentStore>,
    /// Snapshot storage
    system_versions: Arc<dyn SystemVersionStore>,
    /// Serializes deployments across both stores
    critical: Mutex<()>,
}

impl DeploymentCoordinator {
    /// Create a new coordinator over the given stores
    pub fn new(
        deployments: Arc<dyn DeploymentStore>,
        system_versions: Arc<dyn SystemVersionStore>,
    ) -> Self {
        Self {
            deployments,
            system_versions,
            critical: Mutex::new(()),
        }
    }

    /// Record that `name` is now at `version` and return the system version
    ///
    /// Inputs are expected to be validated already: `name` non-empty and
    /// `version` positive.
    #[instrument(skip(self))]
    pub async fn handle_deployment(&self, name: &str, version: u64) -> Result<DeploymentResponse> {
        // The whole read-update-snapshot sequence must not interleave with
        // another deployment, or a snapshot could capture a half-applied view.
        let _guard = self.critical.lock().await;

        // 1. Compare with the last tracked version
        let prior = self.deployments.version_of(name).await?;
        let changed = prior != Some(version);

        // 2. Update the current view and the log, even for redeploys
        self.deployments.set_version(name, version).await?;
        self.deployments
            .append(DeploymentRecord::now(name, version))
            .await?;

        // 3. Mint a snapshot only when something changed
        let system_version = if changed {
            let services = self.deployments.current_services().await?;
            let id = self.system_versions.create_snapshot(&services).await?;
            info!(
                system_version = %id,
                prior_version = ?prior,
                "Service version changed, created system version"
            );
            id
        } else {
            let id = self.system_versions.current_id().await?;
            debug!(system_version = %id, "Service redeployed at same version");
            id
        };

        Ok(DeploymentResponse { system_version })
    }

    /// Deployment store used by this coordinator
    pub fn deployments(&self) -> &Arc<dyn DeploymentStore> {
        &self.deployments
    }

    /// System version store used by this coordinator
    pub fn system_versions(&self) -> &Arc<dyn SystemVersionStore> {
        &self.system_versions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DeploymentError;
    use crate::query::ServiceQuery;
    use async_trait::async_trait;
    use proptest::prelude::*;
    use std::collections::HashMap;
    use sysver_registry::{
        InMemoryDeploymentStore, InMemorySystemVersionStore, RegistryError,
    };
    use sysver_types::{ServiceState, SystemVersionId, SystemVersionSnapshot};

    fn setup() -> (DeploymentCoordinator, ServiceQuery, Arc<InMemoryDeploymentStore>) {
        let deployments = Arc::new(InMemoryDeploymentStore::new());
        let system_versions = Arc::new(InMemorySystemVersionStore::new());
        let coordinator = DeploymentCoordinator::new(deployments.clone(), system_versions.clone());
        let query = ServiceQuery::new(system_versions);
        (coordinator, query, deployments)
    }

    async fn deploy(coordinator: &DeploymentCoordinator, name: &str, version: u64) -> u64 {
        coordinator
            .handle_deployment(name, version)
            .await
            .unwrap()
            .system_version
            .get()
    }

    async fn services_at(query: &ServiceQuery, id: u64) -> Vec<(String, u64)> {
        query
            .get_services(SystemVersionId::new(id))
            .await
            .unwrap()
            .into_iter()
            .map(|s| (s.name, s.version))
            .collect()
    }

    #[tokio::test]
    async fn test_first_deployment_creates_version_one() {
        let (coordinator, _, deployments) = setup();

        assert_eq!(deploy(&coordinator, "api", 1).await, 1);
        assert_eq!(
            deployments.current_services().await.unwrap(),
            vec![ServiceState::new("api", 1)]
        );
    }

    #[tokio::test]
    async fn test_version_change_increments_system_version() {
        let (coordinator, _, deployments) = setup();

        deploy(&coordinator, "api", 1).await;
        assert_eq!(deploy(&coordinator, "api", 2).await, 2);
        assert_eq!(
            deployments.current_services().await.unwrap(),
            vec![ServiceState::new("api", 2)]
        );
    }

    #[tokio::test]
    async fn test_redeploy_keeps_version_but_is_logged() {
        let (coordinator, _, deployments) = setup();

        deploy(&coordinator, "api", 1).await;
        for _ in 0..4 {
            assert_eq!(deploy(&coordinator, "api", 1).await, 1);
        }

        assert_eq!(deployments.history().await.unwrap().len(), 5);
        assert_eq!(
            coordinator.system_versions().snapshot_count().await.unwrap(),
            1
        );
    }

    #[tokio::test]
    async fn test_lower_version_counts_as_change() {
        let (coordinator, query, _) = setup();

        deploy(&coordinator, "api", 5).await;
        assert_eq!(deploy(&coordinator, "api", 3).await, 2);
        assert_eq!(services_at(&query, 2).await, vec![("api".to_string(), 3)]);
    }

    #[tokio::test]
    async fn test_multi_service_scenario() {
        let (coordinator, query, _) = setup();

        assert_eq!(deploy(&coordinator, "A", 1).await, 1);
        assert_eq!(deploy(&coordinator, "B", 1).await, 2);
        assert_eq!(deploy(&coordinator, "A", 2).await, 3);
        assert_eq!(deploy(&coordinator, "B", 1).await, 3);

        assert_eq!(services_at(&query, 1).await, vec![("A".to_string(), 1)]);
        assert_eq!(
            services_at(&query, 2).await,
            vec![("A".to_string(), 1), ("B".to_string(), 1)]
        );
        assert_eq!(
            services_at(&query, 3).await,
            vec![("A".to_string(), 2), ("B".to_string(), 1)]
        );

        // Repeated reads of a fixed id are identical
        assert_eq!(services_at(&query, 2).await, services_at(&query, 2).await);
    }

    #[tokio::test]
    async fn test_concurrent_deployments_produce_consistent_snapshots() {
        let (coordinator, _, _) = setup();
        let coordinator = Arc::new(coordinator);

        let mut handles = Vec::new();
        for i in 0..32u64 {
            let coordinator = coordinator.clone();
            handles.push(tokio::spawn(async move {
                coordinator
                    .handle_deployment(&format!("svc-{}", i), 1)
                    .await
                    .unwrap()
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        // Each deployment introduced one service, so snapshot N holds N services
        let snapshots = coordinator.system_versions().all_snapshots().await.unwrap();
        assert_eq!(snapshots.len(), 32);
        for snapshot in snapshots {
            assert_eq!(snapshot.services.len() as u64, snapshot.id.get());
        }
    }

    /// Store whose snapshot counter has drifted
    struct BrokenSystemVersionStore;

    #[async_trait]
    impl SystemVersionStore for BrokenSystemVersionStore {
        async fn current_id(&self) -> sysver_registry::Result<SystemVersionId> {
            Ok(SystemVersionId::NONE)
        }

        async fn create_snapshot(
            &self,
            _services: &[ServiceState],
        ) -> sysver_registry::Result<SystemVersionId> {
            Err(RegistryError::Inconsistent("counter drift".to_string()))
        }

        async fn snapshot(
            &self,
            _id: SystemVersionId,
        ) -> sysver_registry::Result<Option<SystemVersionSnapshot>> {
            Ok(None)
        }

        async fn all_snapshots(&self) -> sysver_registry::Result<Vec<SystemVersionSnapshot>> {
            Ok(Vec::new())
        }

        async fn snapshot_count(&self) -> sysver_registry::Result<usize> {
            Ok(0)
        }
    }

    #[tokio::test]
    async fn test_inconsistent_store_is_fatal() {
        let coordinator = DeploymentCoordinator::new(
            Arc::new(InMemoryDeploymentStore::new()),
            Arc::new(BrokenSystemVersionStore),
        );

        let err = coordinator.handle_deployment("api", 1).await.unwrap_err();
        assert!(matches!(err, DeploymentError::Registry(_)));
        assert!(err.is_fatal());
    }

    fn deployment_strategy() -> impl Strategy<Value = Vec<(String, u64)>> {
        proptest::collection::vec(
            (
                prop_oneof![Just("api"), Just("web"), Just("worker")].prop_map(String::from),
                1u64..4,
            ),
            1..24,
        )
    }

    proptest! {
        #[test]
        fn property_system_version_tracks_changes(ops in deployment_strategy()) {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("runtime");

            rt.block_on(async move {
                let (coordinator, query, deployments) = setup();
                let mut model: HashMap<String, u64> = HashMap::new();
                let mut order: Vec<String> = Vec::new();
                let mut expected_id = 0u64;
                let mut expected_views: Vec<Vec<(String, u64)>> = Vec::new();

                for (name, version) in &ops {
                    let changed = model.get(name) != Some(version);
                    if !model.contains_key(name) {
                        order.push(name.clone());
                    }
                    model.insert(name.clone(), *version);

                    if changed {
                        expected_id += 1;
                        expected_views.push(
                            order.iter().map(|n| (n.clone(), model[n])).collect(),
                        );
                    }

                    let id = deploy(&coordinator, name, *version).await;
                    assert_eq!(id, expected_id);
                }

                // Every snapshot still reflects the view right after it was minted
                for (index, view) in expected_views.iter().enumerate() {
                    assert_eq!(&services_at(&query, index as u64 + 1).await, view);
                }

                assert_eq!(deployments.history().await.unwrap().len(), ops.len());
            });
        }
    }
}
