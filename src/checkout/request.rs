//! Payment request

use rust_decimal::Decimal;
use serde::Serialize;

use crate::{
    cart::CartStore,
    checkout::method::PaymentMethod,
    pricing::to_decimal,
    products::ProductId,
    session::User,
};

/// Name sent when nobody is signed in.
pub const GUEST_NAME: &str = "Cliente TechParts";

/// E-mail sent when nobody is signed in.
pub const GUEST_EMAIL: &str = "cliente@techparts.com";

/// Who the payment is charged to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    /// Customer name
    pub name: String,

    /// Customer e-mail
    pub email: String,
}

impl Customer {
    /// The fixed guest identity.
    pub fn guest() -> Self {
        Self {
            name: GUEST_NAME.to_string(),
            email: GUEST_EMAIL.to_string(),
        }
    }

    /// The signed-in user, falling back to the guest identity.
    pub fn from_user(user: Option<&User>) -> Self {
        user.map_or_else(Self::guest, |user| Self {
            name: user.name.clone(),
            email: user.email.clone(),
        })
    }
}

/// One cart line as the processor sees it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentItem {
    /// Product id
    pub id: ProductId,

    /// Product name at checkout time
    pub name: String,

    /// Unit price, sent as a JSON number.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    /// Units bought
    pub quantity: u32,
}

/// Everything submitted to the payment endpoint for one checkout.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentRequest {
    /// Chosen payment method.
    pub method: PaymentMethod,

    /// Cart total, scaled to the currency's minor unit.
    pub amount: Decimal,

    /// One entry per cart line, in cart order.
    pub items: Vec<PaymentItem>,

    /// Who pays.
    pub customer: Customer,
}

impl PaymentRequest {
    /// Snapshots the cart into a request.
    pub fn from_cart(cart: &CartStore, method: PaymentMethod, customer: Customer) -> Self {
        let items = cart
            .priced_lines()
            .map(|line| PaymentItem {
                id: line.product.id,
                name: line.product.name.clone(),
                price: to_decimal(&line.product.price),
                quantity: line.quantity,
            })
            .collect();

        Self {
            method,
            amount: to_decimal(&cart.total()),
            items,
            customer,
        }
    }

    /// Form fields in submission order, with `items` JSON-encoded.
    ///
    /// # Errors
    ///
    /// Returns an error if the items cannot be serialized.
    pub fn form_fields(&self) -> Result<Vec<(&'static str, String)>, serde_json::Error> {
        Ok(vec![
            ("payment_method", self.method.as_str().to_string()),
            ("amount", self.amount.to_string()),
            ("items", serde_json::to_string(&self.items)?),
            ("customer_name", self.customer.name.clone()),
            ("customer_email", self.customer.email.clone()),
        ])
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use testresult::TestResult;

    use crate::{catalog::Catalog, storage::MemoryStore};

    use super::*;

    fn cart() -> Result<CartStore, Box<dyn std::error::Error>> {
        let mut cart =
            CartStore::restore(Arc::new(Catalog::seeded()?), Arc::new(MemoryStore::new()))?;

        cart.add(ProductId::new(4))?;
        cart.add(ProductId::new(4))?;
        cart.add(ProductId::new(1))?;

        Ok(cart)
    }

    #[test]
    fn from_cart_totals_and_lists_lines() -> TestResult {
        let request = PaymentRequest::from_cart(&cart()?, PaymentMethod::Pix, Customer::guest());

        assert_eq!(request.amount.to_string(), "5099.97");
        assert_eq!(request.items.len(), 2);

        let first = request.items.first().ok_or("missing first item")?;

        assert_eq!(first.id, ProductId::new(4));
        assert_eq!(first.quantity, 2);
        assert_eq!(first.price.to_string(), "899.99");

        Ok(())
    }

    #[test]
    fn form_fields_encode_items_as_json() -> TestResult {
        let request = PaymentRequest::from_cart(&cart()?, PaymentMethod::Card, Customer::guest());

        let fields = request.form_fields()?;
        let names: Vec<&str> = fields.iter().map(|(name, _)| *name).collect();

        assert_eq!(
            names,
            vec!["payment_method", "amount", "items", "customer_name", "customer_email"]
        );

        let items = fields
            .iter()
            .find(|(name, _)| *name == "items")
            .map(|(_, value)| value.as_str())
            .ok_or("missing items field")?;

        let decoded: serde_json::Value = serde_json::from_str(items)?;

        assert_eq!(
            decoded,
            serde_json::json!([
                {"id": 4, "name": "Corsair Vengeance RGB 32GB", "price": 899.99, "quantity": 2},
                {"id": 1, "name": "Intel Core i9-14900K", "price": 3299.99, "quantity": 1},
            ])
        );

        Ok(())
    }

    #[test]
    fn customer_falls_back_to_guest() {
        assert_eq!(Customer::from_user(None), Customer::guest());

        let user = User {
            email: "ana@example.com".to_string(),
            name: "Ana".to_string(),
        };

        let customer = Customer::from_user(Some(&user));

        assert_eq!(customer.name, "Ana");
        assert_eq!(customer.email, "ana@example.com");
    }
}
