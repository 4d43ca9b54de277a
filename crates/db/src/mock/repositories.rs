use async_trait::async_trait;
use chrono::NaiveDate;
use mockall::mock;
use residency_core::{
    errors::StoreResult,
    models::{
        appointment::{Appointment, CreateOutcome, NewAppointment},
        city::CityKey,
        process::Process,
        unit::ServiceUnit,
    },
    ports::{AppointmentStore, ProcessStore, UnitDirectory},
};
use uuid::Uuid;

// Mock repositories for testing
mock! {
    pub UnitRepo {}

    #[async_trait]
    impl UnitDirectory for UnitRepo {
        async fn units_in_city(&self, city: &CityKey) -> StoreResult<Vec<ServiceUnit>>;

        async fn unit_by_id(&self, id: Uuid) -> StoreResult<Option<ServiceUnit>>;

        async fn staff_count(&self, id: Uuid) -> StoreResult<usize>;
    }
}

mock! {
    pub AppointmentRepo {}

    #[async_trait]
    impl AppointmentStore for AppointmentRepo {
        async fn create(&self, appointment: NewAppointment) -> StoreResult<Appointment>;

        async fn create_if_available(
            &self,
            appointment: NewAppointment,
            capacity: usize,
        ) -> StoreResult<CreateOutcome>;

        async fn find_by_unit_and_date(
            &self,
            unit_id: Uuid,
            date: NaiveDate,
        ) -> StoreResult<Vec<Appointment>>;

        async fn find_by_process(&self, process_id: Uuid) -> StoreResult<Option<Appointment>>;

        async fn exists_for_process(&self, process_id: Uuid) -> StoreResult<bool>;

        async fn delete(&self, id: Uuid) -> StoreResult<bool>;

        async fn delete_all_for_process(&self, process_id: Uuid) -> StoreResult<usize>;
    }
}

mock! {
    pub ProcessRepo {}

    #[async_trait]
    impl ProcessStore for ProcessRepo {
        async fn process_by_id(&self, id: Uuid) -> StoreResult<Option<Process>>;
    }
}
