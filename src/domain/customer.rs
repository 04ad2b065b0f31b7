use serde::{Deserialize, Serialize};

/// Contact and delivery details captured with an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInfo {
    #[serde(rename = "customerName")]
    pub name: String,
    pub phone: String,
    pub address: String,
    pub pincode: String,
}

impl CustomerInfo {
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        address: impl Into<String>,
        pincode: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            address: address.into(),
            pincode: pincode.into(),
        }
    }

    /// Copy with surrounding whitespace removed from every field.
    pub fn trimmed(&self) -> Self {
        Self::new(
            self.name.trim(),
            self.phone.trim(),
            self.address.trim(),
            self.pincode.trim(),
        )
    }

    /// Name of the first required field that is blank, if any.
    pub fn first_blank_field(&self) -> Option<&'static str> {
        [
            ("name", &self.name),
            ("phone", &self.phone),
            ("address", &self.address),
            ("pincode", &self.pincode),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
    }
}
