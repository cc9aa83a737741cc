use serde::{Deserialize, Serialize};

use crate::models::cart::CartItem;

/// Represents one browser's interaction state.
///
/// The record is stored as JSON in Redis under `session:{id}` and the
/// id travels in a signed cookie. Cart mutations are only meaningful
/// while `is_logged_in` is true; handlers check the flag before
/// touching the cart.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    /// Whether this browser has authenticated.
    #[serde(default)]
    pub is_logged_in: bool,
    /// The cart, in insertion order.
    #[serde(default)]
    pub cart: Vec<CartItem>,
}

impl Session {
    /// Appends an item to the cart.
    pub fn add_item(&mut self, item: CartItem) {
        self.cart.push(item);
    }

    /// Removes the item at `index`, shifting subsequent items left.
    ///
    /// Returns `false` without touching the cart when the index is out
    /// of range.
    pub fn remove_item(&mut self, index: usize) -> bool {
        if index < self.cart.len() {
            self.cart.remove(index);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str) -> CartItem {
        CartItem {
            name: name.to_string(),
            price: "20".to_string(),
            size: "M".to_string(),
        }
    }

    #[test]
    fn new_session_is_logged_out_with_empty_cart() {
        let session = Session::default();
        assert!(!session.is_logged_in);
        assert!(session.cart.is_empty());
    }

    #[test]
    fn add_item_preserves_insertion_order() {
        let mut session = Session::default();
        session.add_item(item("A"));
        session.add_item(item("B"));
        session.add_item(item("C"));
        let names: Vec<&str> = session.cart.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["A", "B", "C"]);
    }

    #[test]
    fn remove_middle_item_shifts_tail() {
        let mut session = Session::default();
        session.add_item(item("A"));
        session.add_item(item("B"));
        session.add_item(item("C"));

        assert!(session.remove_item(1));

        let names: Vec<&str> = session.cart.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["A", "C"]);
    }

    #[test]
    fn remove_out_of_range_leaves_cart_unchanged() {
        let mut session = Session::default();
        session.add_item(item("A"));

        assert!(!session.remove_item(1));
        assert!(!session.remove_item(99));
        assert_eq!(session.cart.len(), 1);
    }

    #[test]
    fn remove_from_empty_cart_fails() {
        let mut session = Session::default();
        assert!(!session.remove_item(0));
    }

    #[test]
    fn session_round_trips_through_json() {
        let mut session = Session::default();
        session.is_logged_in = true;
        session.add_item(item("Shirt"));

        let json = sonic_rs::to_string(&session).unwrap();
        let restored: Session = sonic_rs::from_str(&json).unwrap();
        assert!(restored.is_logged_in);
        assert_eq!(restored.cart, session.cart);
    }

    #[test]
    fn missing_fields_deserialize_to_defaults() {
        let restored: Session = sonic_rs::from_str("{}").unwrap();
        assert!(!restored.is_logged_in);
        assert!(restored.cart.is_empty());
    }
}
