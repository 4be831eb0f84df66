//! Design registry – the closed set of named designs. A design turns a
//! payload into the ordered content-block sequence and column spec the
//! paginator consumes.
//!
//! Optional-field fallbacks are resolved here, once, before any block is
//! built: absent strings render as "-", absent amounts fall back to values
//! computed from the line items, and the total quantity is the sum over
//! line-item quantities.

use std::fmt;
use std::str::FromStr;

use crate::columns::ColumnSpec;
use crate::content::{
    Cell, ContentBlock, HeaderBlock, HeaderCell, InvoiceMeta, LabelValueBlock, LabelValueEntry,
    LineItem, Payload, TableHeaderBlock, TableRowBlock, TextSize, TotalsBlock, TotalsEmphasis,
    TotalsRow, User,
};
use crate::document::Align;
use crate::error::{Error, Result};
use crate::geometry::{Metrics, A6_WIDTH_PT};

/// Vertical extent of the invoice header (logo + number line).
const INVOICE_HEADER_EXTENT: f32 = 50.0;
/// Vertical extent of the from/to address block.
const ADDRESS_BLOCK_EXTENT: f32 = 80.0;
/// Vertical extent of the issue/due/PO info row.
const INFO_BLOCK_EXTENT: f32 = 45.0;

/// Named document designs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DesignKind {
    Invoice,
    UserList,
}

impl FromStr for DesignKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "invoice" => Ok(DesignKind::Invoice),
            "user-list" => Ok(DesignKind::UserList),
            other => Err(Error::Config(format!("unknown design '{other}'"))),
        }
    }
}

impl fmt::Display for DesignKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DesignKind::Invoice => f.write_str("invoice"),
            DesignKind::UserList => f.write_str("user-list"),
        }
    }
}

/// Everything the assembler needs to lay out one document.
#[derive(Debug, Clone)]
pub struct DesignPlan {
    pub metrics: Metrics,
    pub columns: ColumnSpec,
    pub blocks: Vec<ContentBlock>,
}

impl DesignKind {
    /// Build the block sequence and column spec for a payload.
    ///
    /// `logo` is an already-resolved data URI; the assembler fetches it (or
    /// drops it) before planning. A payload whose shape does not match the
    /// design fails validation.
    pub fn plan(self, payload: &Payload, page_width: f32, logo: Option<String>) -> Result<DesignPlan> {
        match (self, payload) {
            (DesignKind::Invoice, Payload::Invoice { invoice, items }) => {
                Ok(invoice_plan(invoice, items, page_width, logo))
            }
            (DesignKind::UserList, Payload::UserList { users }) => {
                Ok(user_list_plan(users, page_width))
            }
            (design, _) => Err(Error::invalid_field(
                "payload",
                format!("payload shape does not match design '{design}'"),
            )),
        }
    }
}

/// Fixed currency-prefix rendering; no locale-aware grouping.
fn money(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("Rs. {}", value as i64)
    } else {
        format!("Rs. {value}")
    }
}

/// Missing or empty optional text renders as a dash.
fn or_dash(value: &Option<String>) -> String {
    match value {
        Some(s) if !s.is_empty() => s.clone(),
        _ => "-".to_string(),
    }
}

fn invoice_plan(
    meta: &InvoiceMeta,
    items: &[LineItem],
    page_width: f32,
    logo: Option<String>,
) -> DesignPlan {
    let metrics = Metrics::invoice(page_width);
    let columns = ColumnSpec::new(&[
        ("sn", 0.05),
        ("desc", 0.5),
        ("qty", 0.1),
        ("unit", 0.15),
        ("total", 0.2),
    ]);

    let mut blocks = Vec::with_capacity(items.len() + 5);

    blocks.push(ContentBlock::Header(HeaderBlock {
        title: or_dash(&meta.number),
        logo,
        extent: INVOICE_HEADER_EXTENT,
    }));

    blocks.push(ContentBlock::LabelValue(LabelValueBlock {
        entries: vec![
            LabelValueEntry {
                label: "Invoice From".to_string(),
                value: or_dash(&meta.from_name),
                detail: Some(or_dash(&meta.from_address)),
            },
            LabelValueEntry {
                label: "Invoice To".to_string(),
                value: or_dash(&meta.to_name),
                detail: Some(or_dash(&meta.to_address)),
            },
        ],
        extent: ADDRESS_BLOCK_EXTENT,
        value_dy: 15.0,
        detail_dy: 30.0,
    }));

    blocks.push(ContentBlock::LabelValue(LabelValueBlock {
        entries: vec![
            LabelValueEntry {
                label: "Issue Date".to_string(),
                value: or_dash(&meta.issue_date),
                detail: None,
            },
            LabelValueEntry {
                label: "Due Date".to_string(),
                value: or_dash(&meta.due_date),
                detail: None,
            },
            LabelValueEntry {
                label: "PO No".to_string(),
                value: or_dash(&meta.po_number),
                detail: None,
            },
        ],
        extent: INFO_BLOCK_EXTENT,
        value_dy: 14.0,
        detail_dy: 28.0,
    }));

    blocks.push(ContentBlock::TableHeader(TableHeaderBlock {
        cells: vec![
            HeaderCell::new("#", Align::Left),
            HeaderCell::new("Description", Align::Left),
            HeaderCell::new("Qty", Align::Right),
            HeaderCell::new("Price", Align::Right),
            HeaderCell::new("Total", Align::Right),
        ],
    }));

    let mut computed_subtotal = 0.0f64;
    let mut total_qty = 0u32;

    for (i, item) in items.iter().enumerate() {
        let line_total = item.quantity as f64 * item.price;
        computed_subtotal += line_total;
        total_qty += item.quantity;

        let mut desc = Cell::new(item.name.clone()).size(TextSize::Normal).bold();
        if let Some(description) = item.description.as_deref().filter(|d| !d.is_empty()) {
            desc = desc.detail(description);
        }

        blocks.push(ContentBlock::TableRow(TableRowBlock {
            cells: vec![
                Cell::new((i + 1).to_string()),
                desc,
                Cell::new(item.quantity.to_string()).align(Align::Right),
                Cell::new(money(item.price)).align(Align::Right),
                Cell::new(money(line_total)).bold().align(Align::Right),
            ],
        }));
    }

    let subtotal = meta.subtotal.unwrap_or(computed_subtotal);
    let shipping = meta.shipping.unwrap_or(0.0);
    let discount = meta.discount.unwrap_or(0.0);
    let total = meta.total.unwrap_or(computed_subtotal);

    blocks.push(ContentBlock::Totals(TotalsBlock {
        rows: vec![
            TotalsRow::new("Total Qty", total_qty.to_string()),
            TotalsRow::new("Subtotal", money(subtotal)),
            TotalsRow::new("Shipping", money(shipping)),
            TotalsRow::new("Discount", format!("-{}", money(discount)))
                .emphasis(TotalsEmphasis::Discount),
            TotalsRow::new("Total", money(total)).emphasis(TotalsEmphasis::Total),
        ],
    }));

    DesignPlan {
        metrics,
        columns,
        blocks,
    }
}

fn user_list_plan(users: &[User], page_width: f32) -> DesignPlan {
    let metrics = Metrics::user_list(page_width);
    let compact = page_width <= A6_WIDTH_PT;
    let columns = if compact {
        ColumnSpec::new(&[
            ("sn", 0.1),
            ("name", 0.34),
            ("email", 0.32),
            ("gender", 0.12),
            ("role", 0.12),
        ])
    } else {
        ColumnSpec::new(&[
            ("sn", 0.05),
            ("name", 0.25),
            ("email", 0.4),
            ("gender", 0.15),
            ("role", 0.15),
        ])
    };

    let mut blocks = Vec::with_capacity(users.len() + 1);

    blocks.push(ContentBlock::TableHeader(TableHeaderBlock {
        cells: vec![
            HeaderCell::new("SN", Align::Left),
            HeaderCell::new("Name", Align::Left),
            HeaderCell::new("Email", Align::Left),
            HeaderCell::new("Gender", Align::Left),
            HeaderCell {
                text: "Role".to_string(),
                align: Align::Left,
                truncate: true,
            },
        ],
    }));

    for (i, user) in users.iter().enumerate() {
        // email columns get too narrow on compact formats to wrap sensibly
        let mut email = Cell::new(user.email.clone());
        if compact {
            email = email.truncated();
        }
        blocks.push(ContentBlock::TableRow(TableRowBlock {
            cells: vec![
                Cell::new((i + 1).to_string()),
                Cell::new(user.name.clone()),
                email,
                Cell::new(or_dash(&user.gender)),
                Cell::new(or_dash(&user.role)).truncated(),
            ],
        }));
    }

    DesignPlan {
        metrics,
        columns,
        blocks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<LineItem> {
        vec![
            LineItem {
                name: "Product 1".into(),
                description: Some("Awesome item 1".into()),
                quantity: 2,
                price: 100.0,
            },
            LineItem {
                name: "Product 2".into(),
                description: None,
                quantity: 3,
                price: 50.0,
            },
        ]
    }

    fn totals_rows(plan: &DesignPlan) -> &[TotalsRow] {
        match plan.blocks.last().unwrap() {
            ContentBlock::Totals(t) => &t.rows,
            other => panic!("expected totals, got {other:?}"),
        }
    }

    #[test]
    fn unknown_design_is_rejected() {
        let err = "foo".parse::<DesignKind>();
        assert!(matches!(err, Err(Error::Config(_))));
        assert_eq!("invoice".parse::<DesignKind>().unwrap(), DesignKind::Invoice);
        assert_eq!(
            "user-list".parse::<DesignKind>().unwrap(),
            DesignKind::UserList
        );
    }

    #[test]
    fn payload_shape_must_match_design() {
        let payload = Payload::UserList { users: vec![] };
        let err = DesignKind::Invoice.plan(&payload, 595.28, None);
        assert!(matches!(err, Err(Error::Validation(_))));
    }

    #[test]
    fn total_quantity_sums_line_items() {
        let payload_items = items();
        let plan = invoice_plan(&InvoiceMeta::default(), &payload_items, 595.28, None);
        let rows = totals_rows(&plan);
        assert_eq!(rows[0].label, "Total Qty");
        assert_eq!(rows[0].value, "5");
    }

    #[test]
    fn absent_amounts_fall_back_to_computed_sums() {
        let plan = invoice_plan(&InvoiceMeta::default(), &items(), 595.28, None);
        let rows = totals_rows(&plan);
        // 2×100 + 3×50 = 350
        assert_eq!(rows[1].value, "Rs. 350");
        assert_eq!(rows[2].value, "Rs. 0");
        assert_eq!(rows[3].value, "-Rs. 0");
        assert_eq!(rows[4].value, "Rs. 350");
    }

    #[test]
    fn explicit_amounts_win_over_computed() {
        let meta = InvoiceMeta {
            subtotal: Some(400.0),
            total: Some(390.0),
            discount: Some(10.0),
            ..InvoiceMeta::default()
        };
        let plan = invoice_plan(&meta, &items(), 595.28, None);
        let rows = totals_rows(&plan);
        assert_eq!(rows[1].value, "Rs. 400");
        assert_eq!(rows[3].value, "-Rs. 10");
        assert_eq!(rows[3].emphasis, TotalsEmphasis::Discount);
        assert_eq!(rows[4].value, "Rs. 390");
    }

    #[test]
    fn missing_strings_render_as_dash() {
        let plan = invoice_plan(&InvoiceMeta::default(), &[], 595.28, None);
        match &plan.blocks[0] {
            ContentBlock::Header(h) => assert_eq!(h.title, "-"),
            other => panic!("unexpected {other:?}"),
        }
        match &plan.blocks[1] {
            ContentBlock::LabelValue(lv) => {
                assert_eq!(lv.entries[0].value, "-");
                assert_eq!(lv.entries[0].detail.as_deref(), Some("-"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn empty_invoice_still_plans_header_and_totals() {
        let plan = invoice_plan(&InvoiceMeta::default(), &[], 595.28, None);
        // header, addresses, info, table header, totals
        assert_eq!(plan.blocks.len(), 5);
        assert!(matches!(plan.blocks.last().unwrap(), ContentBlock::Totals(_)));
    }

    #[test]
    fn user_list_columns_tighten_on_a6() {
        let wide = user_list_plan(&[], 595.28);
        let narrow = user_list_plan(&[], A6_WIDTH_PT);
        assert_ne!(wide.columns, narrow.columns);
        assert_eq!(narrow.metrics.small_font, 7.0);
    }

    #[test]
    fn role_cells_are_truncated() {
        let users = vec![User {
            name: "Test1".into(),
            email: "Test1@gmail.com".into(),
            gender: None,
            role: Some("Administrator".into()),
        }];
        let plan = user_list_plan(&users, 595.28);
        match &plan.blocks[1] {
            ContentBlock::TableRow(row) => {
                assert!(row.cells[4].truncate);
                // email only truncates on compact formats
                assert!(!row.cells[2].truncate);
                assert_eq!(row.cells[3].text, "-");
            }
            other => panic!("unexpected {other:?}"),
        }

        let compact = user_list_plan(&users, A6_WIDTH_PT);
        match &compact.blocks[1] {
            ContentBlock::TableRow(row) => assert!(row.cells[2].truncate),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn money_has_no_grouping() {
        assert_eq!(money(6000.0), "Rs. 6000");
        assert_eq!(money(99.5), "Rs. 99.5");
    }
}
