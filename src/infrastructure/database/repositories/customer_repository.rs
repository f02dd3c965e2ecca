use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, NotSet, Set};

use crate::domain::{
    Customer, CustomerRepositoryInterface, DomainError, DomainResult, NewCustomer,
    UpdateCustomerDto,
};
use crate::infrastructure::database::entities::customer;
use crate::shared::InfraError;

pub struct CustomerRepository {
    db: DatabaseConnection,
}

impl CustomerRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn customer_model_to_domain(model: customer::Model) -> Customer {
    Customer {
        id: model.id,
        first_name: model.first_name,
        last_name: model.last_name,
        email: model.email,
        avatar: model.avatar,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    InfraError::Database(e).into()
}

#[async_trait]
impl CustomerRepositoryInterface for CustomerRepository {
    async fn create_customer(&self, new_customer: NewCustomer) -> DomainResult<Customer> {
        let now = Utc::now();

        let model = customer::ActiveModel {
            id: NotSet,
            first_name: Set(new_customer.first_name),
            last_name: Set(new_customer.last_name),
            email: Set(new_customer.email),
            avatar: Set(new_customer.avatar),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let inserted = model.insert(&self.db).await.map_err(db_err)?;
        Ok(customer_model_to_domain(inserted))
    }

    async fn get_customer_by_id(&self, id: i32) -> DomainResult<Option<Customer>> {
        let model = customer::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(customer_model_to_domain))
    }

    async fn update_customer(
        &self,
        id: i32,
        dto: UpdateCustomerDto,
    ) -> DomainResult<Option<Customer>> {
        let existing = customer::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut active: customer::ActiveModel = existing.into();

        if let Some(first_name) = dto.first_name {
            active.first_name = Set(first_name);
        }
        if let Some(last_name) = dto.last_name {
            active.last_name = Set(last_name);
        }
        if let Some(email) = dto.email {
            active.email = Set(email);
        }
        if let Some(avatar) = dto.avatar {
            active.avatar = Set(avatar);
        }

        active.updated_at = Set(Utc::now());

        let updated = active.update(&self.db).await.map_err(db_err)?;
        Ok(Some(customer_model_to_domain(updated)))
    }

    async fn delete_customer(&self, id: i32) -> DomainResult<()> {
        let result = customer::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Customer", "id", id));
        }

        Ok(())
    }
}
