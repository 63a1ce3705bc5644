//! Error types for the inventory crate.

use thiserror::Error;

/// Result type alias for inventory operations.
pub type Result<T> = std::result::Result<T, InventoryError>;

/// Rule violations when changing a pharmacy's inventory.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    /// The medicine already has an inventory row
    #[error("Medicine `{0}` is already in the inventory")]
    AlreadyInInventory(String),

    /// Quantities cannot go below zero
    #[error("Invalid quantity {0}: must be zero or more")]
    InvalidQuantity(i64),

    /// No inventory row with this id
    #[error("Inventory item not found: {0}")]
    ItemNotFound(String),

    /// The row belongs to another pharmacy
    #[error("Inventory item `{item}` belongs to pharmacy `{owner}`")]
    ForeignItem {
        /// Row id
        item: String,
        /// Pharmacy that owns the row
        owner: String,
    },
}

impl InventoryError {
    /// Numeric code in the inventory family.
    pub fn code(&self) -> u32 {
        match self {
            Self::AlreadyInInventory(_) => 6001,
            Self::InvalidQuantity(_) => 6002,
            Self::ItemNotFound(_) => 6003,
            Self::ForeignItem { .. } => 6004,
        }
    }
}

impl From<InventoryError> for medfinder_core::Error {
    fn from(err: InventoryError) -> Self {
        use medfinder_core::ErrorCode;

        let code = match err {
            InventoryError::AlreadyInInventory(_) => ErrorCode::AlreadyInInventory,
            InventoryError::InvalidQuantity(_) => ErrorCode::InvalidQuantity,
            InventoryError::ItemNotFound(_) => ErrorCode::InventoryItemNotFound,
            InventoryError::ForeignItem { .. } => ErrorCode::InventoryError,
        };
        medfinder_core::Error::new(code, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_map_to_core() {
        let err: medfinder_core::Error = InventoryError::InvalidQuantity(-3).into();
        assert_eq!(err.code, medfinder_core::ErrorCode::InvalidQuantity);
        assert_eq!(InventoryError::InvalidQuantity(-3).code(), 6002);
        assert_eq!(err.exit_code(), medfinder_core::error::exit_codes::VALIDATION_ERROR);
    }
}
