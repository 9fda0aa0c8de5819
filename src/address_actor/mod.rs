//! The address book. Orders reference an entry by id and render it as a one-line label
//! when they are read.

pub mod entity;
pub mod error;

pub use error::*;

use crate::model::Address;
use actor_framework::{ResourceActor, ResourceClient};

/// Creates a new Address actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Address>, ResourceClient<Address>) {
    ResourceActor::new(buffer_size)
}
