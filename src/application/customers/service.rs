//! Customer service

use std::sync::Arc;

use tracing::info;

use crate::domain::{
    Customer, CustomerRepositoryInterface, DomainError, DomainResult, NewCustomer,
    UpdateCustomerDto,
};

pub struct CustomerService {
    repo: Arc<dyn CustomerRepositoryInterface>,
}

impl CustomerService {
    pub fn new(repo: Arc<dyn CustomerRepositoryInterface>) -> Self {
        Self { repo }
    }

    pub async fn create_customer(&self, customer: NewCustomer) -> DomainResult<Customer> {
        let created = self.repo.create_customer(customer).await?;
        info!(customer_id = created.id, "Customer created");
        Ok(created)
    }

    pub async fn get_customer(&self, id: i32) -> DomainResult<Customer> {
        self.repo
            .get_customer_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Customer", "id", id))
    }

    pub async fn update_customer(&self, id: i32, dto: UpdateCustomerDto) -> DomainResult<Customer> {
        let updated = self
            .repo
            .update_customer(id, dto)
            .await?
            .ok_or_else(|| DomainError::not_found("Customer", "id", id))?;
        info!(customer_id = id, "Customer updated");
        Ok(updated)
    }

    pub async fn delete_customer(&self, id: i32) -> DomainResult<()> {
        self.repo.delete_customer(id).await?;
        info!(customer_id = id, "Customer deleted");
        Ok(())
    }
}
