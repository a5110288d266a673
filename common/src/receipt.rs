use chrono::{FixedOffset, Offset, Utc};
use printpdf::{BuiltinFont, Mm, PdfDocument};

use crate::config::StoreConfig;
use crate::error::ReceiptError;
use crate::order::Order;

const RULE_WIDTH: usize = 56;
const ITEM_COLUMN: usize = 35;

/// Heading above the on-screen item list.
pub const ITEMS_HEADING: &str = "उत्पादने:";
/// On-screen total; prices are settled at the counter.
pub const TOTAL_AT_STORE: &str = "एकूण: दुकानात ठरेल";
/// On-screen footer lines.
pub const FOOTER_NOTES: [&str; 3] = [
    "धन्यवाद! पुन्हा भेट द्या!",
    "कृपया वेळेवर उत्पादने घेऊन जा",
    "* किमत दुकानातील दरानुसार ठरेल *",
];

const PDF_MIME: &str = "application/pdf";
const PAGE_WIDTH: Mm = Mm(210.0);
const PAGE_HEIGHT: Mm = Mm(297.0);
const MARGIN: f32 = 15.0;
const FONT_SIZE: f32 = 9.0;
const LINE_HEIGHT: f32 = 4.5;

/// One printed line item. Prices are left blank for the counter to fill in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptItem {
    pub name_mr: String,
    pub name_en: String,
    pub pack_size: Option<String>,
    pub quantity: u32,
}

impl ReceiptItem {
    /// English name with the pack size in parentheses, as printed.
    pub fn label(&self) -> String {
        match &self.pack_size {
            Some(size) => format!("{} ({size})", self.name_en),
            None => self.name_en.clone(),
        }
    }

    /// Marathi name with the pack size, as shown on screen.
    pub fn label_mr(&self) -> String {
        match &self.pack_size {
            Some(size) => format!("{} ({size})", self.name_mr),
            None => self.name_mr.clone(),
        }
    }

    /// On-screen quantity cell.
    pub fn quantity_note(&self) -> String {
        format!("{} x दुकानातील किमत", self.quantity)
    }
}

/// A labelled value in the on-screen order details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptField {
    pub label: &'static str,
    pub value: String,
}

/// Everything a receipt shows, derived from an [`Order`] and the store config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub store_name: String,
    pub tagline: String,
    pub address: Vec<String>,
    pub store_phone: String,
    pub order_id: String,
    pub issued_at: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub pickup: String,
    pub items: Vec<ReceiptItem>,
    pub total_items: u64,
}

/// A rendered receipt ready to hand to a [`crate::delivery::ReceiptDelivery`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptDocument {
    pub file_name: String,
    pub caption: String,
    pub mime_type: &'static str,
    pub body: Vec<u8>,
}

impl Receipt {
    pub fn new(config: &StoreConfig, order: &Order) -> Self {
        let offset = config
            .utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| Utc.fix());
        let issued_at = order
            .created_at
            .with_timezone(&offset)
            .format("%d/%m/%Y, %H:%M:%S")
            .to_string();

        Self {
            store_name: config.store_name.clone(),
            tagline: config.tagline.clone(),
            address: config.address.clone(),
            store_phone: config.phone.clone(),
            order_id: order.id.to_string(),
            issued_at,
            customer_name: order.customer.name.clone(),
            customer_phone: order.customer.phone.clone(),
            pickup: order.pickup.to_string(),
            items: order
                .lines
                .iter()
                .map(|line| ReceiptItem {
                    name_mr: line.product.name_mr.clone(),
                    name_en: line.product.name_en.clone(),
                    pack_size: line.pack_size().map(str::to_string),
                    quantity: line.quantity,
                })
                .collect(),
            total_items: order.total_items(),
        }
    }

    pub fn file_name(&self) -> String {
        format!("Order_{}.pdf", self.order_id)
    }

    /// Short message sent alongside the document.
    pub fn caption(&self) -> String {
        format!(
            "🧾 New Order Receipt\nCustomer: {}\nPhone: {}\nPickup: {}",
            self.customer_name, self.customer_phone, self.pickup
        )
    }

    /// Store header lines for the on-screen receipt.
    pub fn header_lines(&self) -> Vec<String> {
        let mut lines = vec![self.store_name.clone()];
        if !self.tagline.is_empty() {
            lines.push(self.tagline.clone());
        }
        lines.extend(self.address.iter().cloned());
        lines.push(format!("फोन: {}", self.store_phone));
        lines
    }

    /// Order details for the on-screen receipt, with Marathi labels.
    pub fn info_fields(&self) -> Vec<ReceiptField> {
        let field = |label, value: &str| ReceiptField {
            label,
            value: value.to_string(),
        };
        vec![
            field("रसीद क्रमांक", &self.order_id),
            field("दिनांक व वेळ", &self.issued_at),
            field("ग्राहकाचे नाव", &self.customer_name),
            field("फोन नंबर", &self.customer_phone),
            field("पिकअप वेळ", &self.pickup),
        ]
    }

    /// Plain-text receipt for the shop counter, in English.
    pub fn to_text(&self) -> String {
        let rule = "-".repeat(RULE_WIDTH);
        let mut out = Vec::new();

        out.push(self.store_name.clone());
        if !self.tagline.is_empty() {
            out.push(self.tagline.clone());
        }
        out.extend(self.address.iter().cloned());
        out.push(format!("Phone: {}", self.store_phone));
        out.push(rule.clone());

        out.push(format!("Order ID: {}", self.order_id));
        out.push(format!("Date: {}", self.issued_at));
        out.push(format!("Customer: {}", self.customer_name));
        out.push(format!("Phone: {}", self.customer_phone));
        out.push(format!("Pickup Time: {}", self.pickup));
        out.push(rule.clone());

        out.push(format!(
            "{:<ITEM_COLUMN$} {:>4}  {:<6} {:<6}",
            "Item", "Qty", "Rate", "Amount"
        ));
        out.push(rule.clone());
        for item in &self.items {
            let mut wrapped = wrap(&item.label(), ITEM_COLUMN).into_iter();
            if let Some(first) = wrapped.next() {
                out.push(format!(
                    "{first:<ITEM_COLUMN$} {:>4}  {:<6} {:<6}",
                    item.quantity, "_____", "_____"
                ));
            }
            out.extend(wrapped);
        }
        out.push(rule);

        out.push(format!("Total Items: {}", self.total_items));
        out.push("Total Amount: Rs. _______".to_string());
        out.push(String::new());
        out.push("Please call customer to confirm order".to_string());
        out.push("Thank you! Visit again!".to_string());
        out.push("* Fill rates according to your stock *".to_string());

        let mut text = out.join("\n");
        text.push('\n');
        text
    }

    /// The text receipt laid out on A4 pages in a monospace font.
    pub fn to_pdf(&self) -> Result<Vec<u8>, ReceiptError> {
        let title = format!("Order {}", self.order_id);
        let (doc, page, layer) = PdfDocument::new(&title, PAGE_WIDTH, PAGE_HEIGHT, "Receipt");
        let font = doc.add_builtin_font(BuiltinFont::Courier)?;

        let top = PAGE_HEIGHT.0 - MARGIN;
        let mut current = doc.get_page(page).get_layer(layer);
        let mut y = top;
        for line in self.to_text().lines() {
            if y < MARGIN {
                let (page, layer) = doc.add_page(PAGE_WIDTH, PAGE_HEIGHT, "Receipt");
                current = doc.get_page(page).get_layer(layer);
                y = top;
            }
            current.use_text(line, FONT_SIZE, Mm(MARGIN), Mm(y), &font);
            y -= LINE_HEIGHT;
        }

        drop(current);
        Ok(doc.save_to_bytes()?)
    }

    /// The PDF receipt with its delivery metadata.
    pub fn document(&self) -> Result<ReceiptDocument, ReceiptError> {
        Ok(ReceiptDocument {
            file_name: self.file_name(),
            caption: self.caption(),
            mime_type: PDF_MIME,
            body: self.to_pdf()?,
        })
    }
}

/// Greedy word wrap on character counts. Words longer than `width` get a
/// line of their own.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
