//! [`ActorEntity`] implementation for [`Address`].

use super::AddressError;
use crate::model::{Address, AddressCreate, AddressId, AddressUpdate};
use actor_framework::ActorEntity;
use async_trait::async_trait;

#[async_trait]
impl ActorEntity for Address {
    type Id = AddressId;
    type Create = AddressCreate;
    type Update = AddressUpdate;
    type Action = ();
    type ActionResult = ();
    type Context = ();
    type Error = AddressError;

    fn from_create_params(id: AddressId, params: AddressCreate) -> Result<Self, Self::Error> {
        Ok(Self {
            id,
            customer_id: params.customer_id,
            street: params.street,
            ward: params.ward,
            district: params.district,
            province: params.province,
        })
    }

    async fn on_update(
        &mut self,
        update: AddressUpdate,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error> {
        if let Some(street) = update.street {
            self.street = Some(street);
        }
        if let Some(ward) = update.ward {
            self.ward = Some(ward);
        }
        if let Some(district) = update.district {
            self.district = Some(district);
        }
        if let Some(province) = update.province {
            self.province = Some(province);
        }
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }
}
