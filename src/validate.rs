//! Payload validation – declared per-field limits, checked before the layout
//! engine is invoked.
//!
//! All violations are collected and surfaced together as structured
//! per-field messages; nothing is recovered or clamped.

use crate::content::Payload;
use crate::error::{Error, FieldError, Result};
use crate::pipeline::RenderRequest;

const MAX_FILENAME_LEN: usize = 50;
const MAX_NUMBER_LEN: usize = 10;
const MAX_NAME_LEN: usize = 50;
const MAX_AMOUNT: f64 = 9999.0;
const MAX_DISCOUNT: f64 = 100.0;
const MAX_TAX: f64 = 10.0;

/// Check every declared field constraint of a render request.
pub fn validate(request: &RenderRequest) -> Result<()> {
    let mut errors = Vec::new();

    check_len(
        &mut errors,
        "filename",
        Some(request.filename.as_str()),
        MAX_FILENAME_LEN,
        "Filename",
    );

    if let Payload::Invoice { invoice, .. } = &request.payload {
        check_len(
            &mut errors,
            "invoice.number",
            invoice.number.as_deref(),
            MAX_NUMBER_LEN,
            "Invoice number",
        );
        check_len(
            &mut errors,
            "invoice.poNumber",
            invoice.po_number.as_deref(),
            MAX_NUMBER_LEN,
            "PO number",
        );
        check_len(
            &mut errors,
            "invoice.fromName",
            invoice.from_name.as_deref(),
            MAX_NAME_LEN,
            "From name",
        );
        check_len(
            &mut errors,
            "invoice.fromAddress",
            invoice.from_address.as_deref(),
            MAX_NAME_LEN,
            "From address",
        );
        check_len(
            &mut errors,
            "invoice.toName",
            invoice.to_name.as_deref(),
            MAX_NAME_LEN,
            "To name",
        );
        check_len(
            &mut errors,
            "invoice.toAddress",
            invoice.to_address.as_deref(),
            MAX_NAME_LEN,
            "To address",
        );

        check_max(&mut errors, "invoice.subtotal", invoice.subtotal, MAX_AMOUNT, "Subtotal");
        check_max(&mut errors, "invoice.total", invoice.total, MAX_AMOUNT, "Total");
        check_max(&mut errors, "invoice.shipping", invoice.shipping, MAX_AMOUNT, "Shipping");
        check_max(&mut errors, "invoice.discount", invoice.discount, MAX_DISCOUNT, "Discount");
        check_max(&mut errors, "invoice.tax", invoice.tax, MAX_TAX, "Tax");
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(Error::Validation(errors))
    }
}

fn check_len(
    errors: &mut Vec<FieldError>,
    field: &str,
    value: Option<&str>,
    max: usize,
    what: &str,
) {
    if let Some(v) = value {
        if v.chars().count() > max {
            errors.push(FieldError::new(
                field,
                format!("{what} cannot be longer than {max} characters"),
            ));
        }
    }
}

fn check_max(errors: &mut Vec<FieldError>, field: &str, value: Option<f64>, max: f64, what: &str) {
    if let Some(v) = value {
        if v > max {
            errors.push(FieldError::new(
                field,
                format!("{what} cannot be greater than {max}"),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::InvoiceMeta;

    fn request_with(invoice: InvoiceMeta) -> RenderRequest {
        RenderRequest {
            payload: Payload::Invoice {
                invoice,
                items: Vec::new(),
            },
            ..RenderRequest::default()
        }
    }

    #[test]
    fn default_request_is_valid() {
        assert!(validate(&RenderRequest::default()).is_ok());
    }

    #[test]
    fn over_limit_fields_are_all_reported() {
        let req = request_with(InvoiceMeta {
            number: Some("X".repeat(11)),
            subtotal: Some(10_000.0),
            tax: Some(12.5),
            ..InvoiceMeta::default()
        });
        match validate(&req) {
            Err(Error::Validation(errors)) => {
                assert_eq!(errors.len(), 3);
                let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
                assert!(fields.contains(&"invoice.number"));
                assert!(fields.contains(&"invoice.subtotal"));
                assert!(fields.contains(&"invoice.tax"));
                assert_eq!(
                    errors[0].message,
                    "Invoice number cannot be longer than 10 characters"
                );
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn boundary_values_pass() {
        let req = request_with(InvoiceMeta {
            number: Some("X".repeat(10)),
            subtotal: Some(9999.0),
            discount: Some(100.0),
            tax: Some(10.0),
            ..InvoiceMeta::default()
        });
        assert!(validate(&req).is_ok());
    }

    #[test]
    fn long_filename_is_rejected() {
        let req = RenderRequest {
            filename: "f".repeat(51),
            ..RenderRequest::default()
        };
        match validate(&req) {
            Err(Error::Validation(errors)) => {
                assert_eq!(errors[0].field, "filename");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn user_payload_has_no_invoice_checks() {
        let req = RenderRequest {
            payload: Payload::UserList { users: Vec::new() },
            ..RenderRequest::default()
        };
        assert!(validate(&req).is_ok());
    }
}
