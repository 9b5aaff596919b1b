use serde::{Deserialize, Serialize};

/// Store-assigned order identifier. Never reused once handed out.
pub type OrderId = i64;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Order {
    pub id: OrderId,
    pub order_name: String,
    pub product_code: String,
}

/// A single field in a partial update: either left alone or replaced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldUpdate<T> {
    #[default]
    Unset,
    Set(T),
}

impl<T> FieldUpdate<T> {
    pub fn is_set(&self) -> bool {
        matches!(self, FieldUpdate::Set(_))
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            FieldUpdate::Set(v) => Some(v),
            FieldUpdate::Unset => None,
        }
    }

    /// Overwrites `target` when the field was supplied.
    pub fn apply_to(self, target: &mut T) {
        if let FieldUpdate::Set(value) = self {
            *target = value;
        }
    }
}

impl<T> From<Option<T>> for FieldUpdate<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => FieldUpdate::Set(v),
            None => FieldUpdate::Unset,
        }
    }
}

/// Field-level changes for `OrderRepository::update`.
///
/// Every field defaults to `Unset`, so `OrderChanges::default()` is a no-op
/// update that still round-trips through the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderChanges {
    pub order_name: FieldUpdate<String>,
    pub product_code: FieldUpdate<String>,
}

impl OrderChanges {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn order_name(mut self, order_name: impl Into<String>) -> Self {
        self.order_name = FieldUpdate::Set(order_name.into());
        self
    }

    pub fn product_code(mut self, product_code: impl Into<String>) -> Self {
        self.product_code = FieldUpdate::Set(product_code.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        !self.order_name.is_set() && !self.product_code.is_set()
    }
}

impl Order {
    pub fn apply(&mut self, changes: OrderChanges) {
        changes.order_name.apply_to(&mut self.order_name);
        changes.product_code.apply_to(&mut self.product_code);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Order {
        Order {
            id: 1,
            order_name: "A".into(),
            product_code: "P1".into(),
        }
    }

    #[test]
    fn empty_changes_leave_order_untouched() {
        let mut order = sample();
        let changes = OrderChanges::new();
        assert!(changes.is_empty());
        order.apply(changes);
        assert_eq!(order, sample());
    }

    #[test]
    fn single_field_change_is_independent() {
        let mut order = sample();
        order.apply(OrderChanges::new().product_code("P9"));
        assert_eq!(order.order_name, "A");
        assert_eq!(order.product_code, "P9");

        order.apply(OrderChanges::new().order_name("B"));
        assert_eq!(order.order_name, "B");
        assert_eq!(order.product_code, "P9");
        assert_eq!(order.id, 1);
    }

    #[test]
    fn option_maps_to_field_update() {
        assert_eq!(FieldUpdate::<String>::from(None), FieldUpdate::Unset);
        assert_eq!(
            FieldUpdate::from(Some("x".to_string())),
            FieldUpdate::Set("x".to_string())
        );
    }

    #[test]
    fn serializes_record_shape() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "id": 1, "order_name": "A", "product_code": "P1" })
        );
    }
}
