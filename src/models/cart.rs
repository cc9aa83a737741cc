use serde::{Deserialize, Serialize};

/// One product line in a session's cart.
///
/// A cart item has no identity of its own; it is addressed only by its
/// position in the cart's ordered sequence. The price is stored exactly
/// as submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub name: String,
    pub price: String,
    pub size: String,
}
