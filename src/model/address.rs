use super::CustomerId;
use serde::{Deserialize, Serialize};

entity_id!(AddressId, "address");

/// A shipping address. Every part is optional; blank parts are left out of the label.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Address {
    pub id: AddressId,
    pub customer_id: Option<CustomerId>,
    pub street: Option<String>,
    pub ward: Option<String>,
    pub district: Option<String>,
    pub province: Option<String>,
}

impl Address {
    /// `street, ward, district, province`, skipping missing or blank parts.
    pub fn shipping_label(&self) -> String {
        [&self.street, &self.ward, &self.district, &self.province]
            .into_iter()
            .filter_map(|part| part.as_deref().map(str::trim))
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddressCreate {
    pub customer_id: Option<CustomerId>,
    pub street: Option<String>,
    pub ward: Option<String>,
    pub district: Option<String>,
    pub province: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddressUpdate {
    pub street: Option<String>,
    pub ward: Option<String>,
    pub district: Option<String>,
    pub province: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shipping_label_skips_missing_parts() {
        let address = Address {
            street: Some("12 Ly Thuong Kiet".into()),
            ward: None,
            district: Some("  ".into()),
            province: Some("Ha Noi".into()),
            ..Default::default()
        };
        assert_eq!(address.shipping_label(), "12 Ly Thuong Kiet, Ha Noi");
        assert_eq!(Address::default().shipping_label(), "");
    }
}
