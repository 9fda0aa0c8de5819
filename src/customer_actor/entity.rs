//! [`ActorEntity`] implementation for [`Customer`].

use super::CustomerError;
use crate::model::{Customer, CustomerCreate, CustomerId, CustomerUpdate};
use actor_framework::ActorEntity;
use async_trait::async_trait;

fn require(field: &str, value: &str) -> Result<(), CustomerError> {
    if value.trim().is_empty() {
        return Err(CustomerError::ValidationError(format!(
            "{field} must not be empty"
        )));
    }
    Ok(())
}

#[async_trait]
impl ActorEntity for Customer {
    type Id = CustomerId;
    type Create = CustomerCreate;
    type Update = CustomerUpdate;
    type Action = ();
    type ActionResult = ();
    type Context = ();
    type Error = CustomerError;

    fn from_create_params(id: CustomerId, params: CustomerCreate) -> Result<Self, Self::Error> {
        require("name", &params.name)?;
        require("email", &params.email)?;
        Ok(Self {
            id,
            account_id: params.account_id,
            name: params.name,
            email: params.email,
            phone: params.phone,
            address: params.address,
        })
    }

    fn unique_key(&self) -> Option<String> {
        Some(self.account_id.to_string())
    }

    async fn on_update(
        &mut self,
        update: CustomerUpdate,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error> {
        if let Some(name) = update.name {
            require("name", &name)?;
            self.name = name;
        }
        if let Some(phone) = update.phone {
            self.phone = Some(phone);
        }
        if let Some(address) = update.address {
            self.address = Some(address);
        }
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }
}
