use serde::{Deserialize, Serialize};

entity_id!(CustomerId, "customer");
entity_id!(
    /// Authenticated login account. Issued by the auth layer, linked to at most one customer.
    AccountId,
    "account"
);

/// A customer profile, linked one-to-one to a login account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub account_id: AccountId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    /// Free-form address kept on the profile, separate from the address book.
    pub address: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerCreate {
    pub account_id: AccountId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}
