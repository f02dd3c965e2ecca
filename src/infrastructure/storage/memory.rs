//! In-memory repository implementations
//!
//! `DashMap`-backed stand-ins for the SeaORM repositories, used for tests
//! and for running the API without a database.

use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::domain::{
    Actor, ActorRepositoryInterface, Customer, CustomerRepositoryInterface, DomainError,
    DomainResult, NewActor, NewCustomer, UpdateActorDto, UpdateCustomerDto,
};

/// In-memory actor storage
///
/// `usernames` indexes `actors` by name. Claiming a name through its
/// `entry` is what makes the uniqueness check and the write one step.
pub struct InMemoryActorRepository {
    actors: DashMap<i32, Actor>,
    usernames: DashMap<String, i32>,
    next_id: AtomicI32,
}

impl InMemoryActorRepository {
    pub fn new() -> Self {
        Self {
            actors: DashMap::new(),
            usernames: DashMap::new(),
            next_id: AtomicI32::new(1),
        }
    }

    /// Reserve `username` for `id`, or fail if another actor holds it.
    fn claim_username(&self, username: &str, id: i32) -> DomainResult<()> {
        match self.usernames.entry(username.to_string()) {
            Entry::Occupied(owner) if *owner.get() != id => {
                Err(DomainError::Conflict("Username already exists".to_string()))
            }
            Entry::Occupied(_) => Ok(()),
            Entry::Vacant(slot) => {
                slot.insert(id);
                Ok(())
            }
        }
    }
}

impl Default for InMemoryActorRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ActorRepositoryInterface for InMemoryActorRepository {
    async fn create_actor(&self, new_actor: NewActor) -> DomainResult<Actor> {
        // The name's shard stays locked until the actor is stored.
        let Entry::Vacant(slot) = self.usernames.entry(new_actor.username.clone()) else {
            return Err(DomainError::Conflict("Username already exists".to_string()));
        };

        let now = Utc::now();
        let actor = Actor {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            username: new_actor.username,
            password_hash: new_actor.password_hash,
            role_id: new_actor.role_id,
            verified: new_actor.verified,
            active: new_actor.active,
            created_at: now,
            updated_at: now,
        };
        self.actors.insert(actor.id, actor.clone());
        slot.insert(actor.id);
        Ok(actor)
    }

    async fn get_actor_by_id(&self, id: i32) -> DomainResult<Option<Actor>> {
        Ok(self.actors.get(&id).map(|a| a.value().clone()))
    }

    async fn get_actor_by_username(&self, username: &str) -> DomainResult<Option<Actor>> {
        let Some(id) = self.usernames.get(username).map(|entry| *entry.value()) else {
            return Ok(None);
        };
        Ok(self.actors.get(&id).map(|a| a.value().clone()))
    }

    async fn update_actor(&self, id: i32, dto: UpdateActorDto) -> DomainResult<Option<Actor>> {
        let Some(current) = self.actors.get(&id).map(|a| a.username.clone()) else {
            return Ok(None);
        };

        let renamed_to = match dto.username {
            Some(ref username) if *username != current => {
                self.claim_username(username, id)?;
                Some(username.clone())
            }
            _ => None,
        };

        let Some(mut actor) = self.actors.get_mut(&id) else {
            if let Some(ref username) = renamed_to {
                self.usernames.remove_if(username, |_, owner| *owner == id);
            }
            return Ok(None);
        };

        if let Some(username) = dto.username {
            actor.username = username;
        }
        if let Some(password_hash) = dto.password {
            actor.password_hash = password_hash;
        }
        if let Some(role_id) = dto.role_id {
            actor.role_id = role_id;
        }
        if let Some(verified) = dto.verified {
            actor.verified = verified;
        }
        if let Some(active) = dto.active {
            actor.active = active;
        }
        actor.updated_at = Utc::now();
        let updated = actor.value().clone();
        drop(actor);

        if renamed_to.is_some() {
            self.usernames.remove_if(&current, |_, owner| *owner == id);
        }
        Ok(Some(updated))
    }

    async fn delete_actor_by_username(&self, username: &str) -> DomainResult<()> {
        let Some((_, id)) = self.usernames.remove(username) else {
            return Err(DomainError::not_found("Actor", "username", username));
        };
        self.actors.remove(&id);
        Ok(())
    }

    async fn count_actors(&self) -> DomainResult<u64> {
        Ok(self.actors.len() as u64)
    }
}

/// In-memory customer storage
pub struct InMemoryCustomerRepository {
    customers: DashMap<i32, Customer>,
    next_id: AtomicI32,
}

impl InMemoryCustomerRepository {
    pub fn new() -> Self {
        Self {
            customers: DashMap::new(),
            next_id: AtomicI32::new(1),
        }
    }
}

impl Default for InMemoryCustomerRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CustomerRepositoryInterface for InMemoryCustomerRepository {
    async fn create_customer(&self, new_customer: NewCustomer) -> DomainResult<Customer> {
        let now = Utc::now();
        let customer = Customer {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            first_name: new_customer.first_name,
            last_name: new_customer.last_name,
            email: new_customer.email,
            avatar: new_customer.avatar,
            created_at: now,
            updated_at: now,
        };
        self.customers.insert(customer.id, customer.clone());
        Ok(customer)
    }

    async fn get_customer_by_id(&self, id: i32) -> DomainResult<Option<Customer>> {
        Ok(self.customers.get(&id).map(|c| c.value().clone()))
    }

    async fn update_customer(
        &self,
        id: i32,
        dto: UpdateCustomerDto,
    ) -> DomainResult<Option<Customer>> {
        let Some(mut customer) = self.customers.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(first_name) = dto.first_name {
            customer.first_name = first_name;
        }
        if let Some(last_name) = dto.last_name {
            customer.last_name = last_name;
        }
        if let Some(email) = dto.email {
            customer.email = email;
        }
        if let Some(avatar) = dto.avatar {
            customer.avatar = avatar;
        }
        customer.updated_at = Utc::now();

        Ok(Some(customer.value().clone()))
    }

    async fn delete_customer(&self, id: i32) -> DomainResult<()> {
        match self.customers.remove(&id) {
            Some(_) => Ok(()),
            None => Err(DomainError::not_found("Customer", "id", id)),
        }
    }
}
