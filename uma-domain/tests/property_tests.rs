use proptest::prelude::*;
use uma_domain::{
    application::{ports::repository::ClientRepository, services::ResourceManagementService},
    domain::entities::*,
    infrastructure::adapters::InMemoryDirectory,
};

mod mocks;
use mocks::{ctx, MockAuthorizationService, MockEventPublisher};
use std::sync::Arc;

// Property-based tests for the reference editor and the listing bounds

fn reference() -> impl Strategy<Value = Dn> {
    "[A-F0-9]{1,4}".prop_map(|inum| Dn::new(format!("inum={inum},ou=clients,o=gluu")))
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
}

mod reference_properties {
    use super::*;

    proptest! {
        /// Adding then removing the same reference restores the collection
        #[test]
        fn add_then_remove_restores(
            existing in prop::collection::vec(reference(), 0..8),
            candidate in reference()
        ) {
            let mut resource = UmaResource::new("r1");
            resource.clients = existing.clone();

            resource.add_reference(ReferenceSet::Clients, candidate.clone());
            prop_assert!(resource.remove_reference(ReferenceSet::Clients, &candidate));

            let mut expected = existing.clone();
            expected.push(candidate.clone());
            if let Some(pos) = expected.iter().position(|r| r == &candidate) {
                expected.remove(pos);
            }
            prop_assert_eq!(&resource.clients, &expected);

            // same multiset as before, whatever the position of the removed entry
            let mut got = resource.clients.clone();
            let mut before = existing;
            got.sort();
            before.sort();
            prop_assert_eq!(got, before);
        }

        /// Each remove deletes at most one entry
        #[test]
        fn remove_deletes_at_most_one(
            existing in prop::collection::vec(reference(), 0..8),
            candidate in reference()
        ) {
            let mut resource = UmaResource::new("r1");
            resource.scopes = existing.clone();

            let removed = resource.remove_reference(ReferenceSet::Scopes, &candidate);

            let expected_len = if existing.contains(&candidate) {
                existing.len() - 1
            } else {
                existing.len()
            };
            prop_assert_eq!(removed, existing.contains(&candidate));
            prop_assert_eq!(resource.scopes.len(), expected_len);
        }

        /// Double add then one remove leaves exactly one extra occurrence
        #[test]
        fn double_add_single_remove_nets_one(
            existing in prop::collection::vec(reference(), 0..8),
            candidate in reference()
        ) {
            let mut resource = UmaResource::new("r1");
            resource.clients = existing.clone();
            let count = |r: &UmaResource| r.clients.iter().filter(|c| *c == &candidate).count();
            let before = count(&resource);

            resource.add_reference(ReferenceSet::Clients, candidate.clone());
            resource.add_reference(ReferenceSet::Clients, candidate.clone());
            resource.remove_reference(ReferenceSet::Clients, &candidate);

            prop_assert_eq!(count(&resource), before + 1);
        }
    }
}

mod bound_properties {
    use super::*;

    fn service(directory: Arc<InMemoryDirectory>, limit: usize) -> ResourceManagementService {
        ResourceManagementService::new(
            directory.clone(),
            directory.clone(),
            directory,
            Arc::new(MockEventPublisher::new()),
            Arc::new(MockAuthorizationService::allow_all()),
        )
        .with_list_limit(limit)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        /// Search never returns more than the requested size
        #[test]
        fn search_never_exceeds_size(records in 0usize..20, size in 1usize..10) {
            let result = runtime().block_on(async {
                let service = service(Arc::new(InMemoryDirectory::default()), 1000);
                for i in 0..records {
                    service
                        .create_resource(UmaResource::new(format!("item-{i}")), &ctx())
                        .await
                        .unwrap();
                }
                service.search_resources("item", size, &ctx()).await.unwrap()
            });

            prop_assert!(result.len() <= size);
            prop_assert_eq!(result.len(), records.min(size));
        }

        /// Listing never returns more than the cap
        #[test]
        fn list_never_exceeds_cap(records in 0usize..20, cap in 1usize..10) {
            let listed = runtime().block_on(async {
                let service = service(Arc::new(InMemoryDirectory::default()), cap);
                for i in 0..records {
                    service
                        .create_resource(UmaResource::new(format!("r{i}")), &ctx())
                        .await
                        .unwrap();
                }
                service.list_resources(&ctx()).await.unwrap()
            });

            prop_assert_eq!(listed.len(), records.min(cap));
        }

        /// Service-level add/remove of a client restores the stored list
        #[test]
        fn service_round_trip_restores(inum in "[A-F0-9]{1,6}", preexisting in 0usize..4) {
            let (before, after) = runtime().block_on(async {
                let directory = Arc::new(InMemoryDirectory::default());
                directory.insert_client(Client::new(inum.clone()));
                let service = service(directory.clone(), 1000);

                service.create_resource(UmaResource::new("r1"), &ctx()).await.unwrap();
                for _ in 0..preexisting {
                    service.add_client("r1", &inum, &ctx()).await.unwrap();
                }
                let before = service.get_resource("r1", &ctx()).await.unwrap();

                service.add_client("r1", &inum, &ctx()).await.unwrap();
                let after = service.remove_client("r1", &inum, &ctx()).await.unwrap();
                assert_eq!(after.clients.len(), preexisting);
                assert!(after.clients.iter().all(|c| *c == directory.dn_for_client(&inum)));
                (before, after)
            });

            prop_assert_eq!(before, after);
        }
    }
}
