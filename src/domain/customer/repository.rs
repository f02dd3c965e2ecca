use async_trait::async_trait;

use super::{Customer, NewCustomer, UpdateCustomerDto};
use crate::shared::DomainResult;

#[async_trait]
pub trait CustomerRepositoryInterface: Send + Sync {
    async fn create_customer(&self, customer: NewCustomer) -> DomainResult<Customer>;
    async fn get_customer_by_id(&self, id: i32) -> DomainResult<Option<Customer>>;
    async fn update_customer(
        &self,
        id: i32,
        dto: UpdateCustomerDto,
    ) -> DomainResult<Option<Customer>>;
    /// Fails with `NotFound` when no row matched.
    async fn delete_customer(&self, id: i32) -> DomainResult<()>;
}
