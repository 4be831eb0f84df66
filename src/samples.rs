//! Sample payloads for testing and demonstration.
//!
//! Mirrors the synthetic data the engine is typically exercised with: line
//! items cycle through five quantity/price combinations, users alternate
//! between two genders and roles.

use crate::content::{InvoiceMeta, LineItem, Payload, User};

/// Build an invoice payload with `count` generated line items.
pub fn sample_invoice(count: usize) -> Payload {
    let items = (0..count)
        .map(|i| LineItem {
            name: format!("Product {}", i + 1),
            description: Some(format!("Awesome item {}", i + 1)),
            quantity: (i % 5) as u32 + 1,
            price: ((i % 5) as f64 + 1.0) * 50.0,
        })
        .collect();

    Payload::Invoice {
        invoice: InvoiceMeta {
            number: Some("INV-1001".to_string()),
            from_name: Some("Acme Corp".to_string()),
            from_address: Some("123 Business St, New York, NY 10001".to_string()),
            to_name: Some("Client Inc".to_string()),
            to_address: Some("456 Client Ave, Los Angeles, CA 90001".to_string()),
            issue_date: Some("2026-01-15".to_string()),
            due_date: Some("2026-02-15".to_string()),
            po_number: Some("PO-7731".to_string()),
            ..InvoiceMeta::default()
        },
        items,
    }
}

/// Build a user-list payload with `count` generated users.
pub fn sample_users(count: usize) -> Payload {
    let users = (0..count)
        .map(|i| User {
            name: format!("Test{}", i + 1),
            email: format!("Test{}@gmail.com", i + 1),
            gender: Some(if i % 2 == 0 { "Male" } else { "Female" }.to_string()),
            role: Some(if i % 2 == 0 { "Admin" } else { "User" }.to_string()),
        })
        .collect();

    Payload::UserList { users }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::RenderRequest;
    use crate::validate::validate;

    #[test]
    fn sample_items_cycle_quantities_and_prices() {
        match sample_invoice(7) {
            Payload::Invoice { items, .. } => {
                assert_eq!(items.len(), 7);
                assert_eq!(items[0].quantity, 1);
                assert_eq!(items[0].price, 50.0);
                assert_eq!(items[4].quantity, 5);
                assert_eq!(items[4].price, 250.0);
                assert_eq!(items[5].quantity, 1);
            }
            other => panic!("unexpected payload {other:?}"),
        }
    }

    #[test]
    fn samples_pass_validation() {
        for payload in [sample_invoice(10), sample_users(10)] {
            let request = RenderRequest {
                payload,
                ..RenderRequest::default()
            };
            assert!(validate(&request).is_ok());
        }
    }
}
