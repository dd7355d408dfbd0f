//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::intervention::Intervention;
use crate::repository::InterventionReader;
use crate::repository::errors::RepositoryResult;

mock! {
    pub InterventionRepository {}

    impl InterventionReader for InterventionRepository {
        fn list_interventions(&self) -> RepositoryResult<Vec<Intervention>>;
    }
}
