/// Row of the customer table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Customer {
    pub id: i64,
    pub active: bool,
}

impl Customer {
    pub fn new(id: i64, active: bool) -> Self {
        Self { id, active }
    }
}

/// Ternary answer of a customer lookup against the reference snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerStatus {
    Active,
    Inactive,
    Unknown,
}

impl CustomerStatus {
    pub fn from_flag(active: Option<bool>) -> Self {
        match active {
            Some(true) => CustomerStatus::Active,
            Some(false) => CustomerStatus::Inactive,
            None => CustomerStatus::Unknown,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, CustomerStatus::Unknown)
    }
}
