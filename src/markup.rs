//! HTML fragments for the page's live lists
//!
//! The page rebuilds these from state whenever they change. Every clickable
//! entry carries `data-action` / `data-arg` for the delegated click handler.

use std::fmt::Write;

use crate::app::ExperimentMetadata;
use crate::sim::budget::{Cart, SHOP_ITEMS, format_money};
use crate::sim::tile::Inventory;

/// Escape text for use in element content or a quoted attribute
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// One place button per discovered element
pub fn inventory(inventory: &Inventory) -> String {
    let mut html = String::new();
    for element in inventory.iter() {
        let name = escape(&element.name);
        let _ = write!(
            html,
            "<button class=\"element\" data-action=\"place\" data-arg=\"{name}\">{} {name}</button>",
            escape(&element.emoji),
        );
    }
    html
}

/// Home grid cards
pub fn catalog_grid(entries: &[ExperimentMetadata]) -> String {
    let mut html = String::new();
    for e in entries {
        let _ = write!(
            html,
            "<button class=\"card\" data-action=\"open\" data-arg=\"{}\">\
             <span class=\"tag {}\">{}</span>\
             <h3>{}</h3>\
             <p>{}</p>\
             </button>",
            escape(&e.id),
            escape(&e.color),
            e.tag.label(),
            escape(&e.title),
            escape(&e.description),
        );
    }
    html
}

/// Dashboard rows with edit and delete buttons
pub fn admin_rows(entries: &[ExperimentMetadata]) -> String {
    if entries.is_empty() {
        return "<p class=\"empty\">No experiments yet.</p>".to_string();
    }
    let mut html = String::new();
    for e in entries {
        let id = escape(&e.id);
        let _ = write!(
            html,
            "<div class=\"admin-row\">\
             <span class=\"admin-title\">{}</span>\
             <code>{id}</code>\
             <span class=\"tag\">{}</span>\
             <button data-action=\"admin-edit\" data-arg=\"{id}\">Edit</button>\
             <button data-action=\"admin-delete\" data-arg=\"{id}\">Delete</button>\
             </div>",
            escape(&e.title),
            e.tag.label(),
        );
    }
    html
}

/// Shop shelf with quantities. Buy is disabled when unaffordable, sell when none owned.
pub fn shop(cart: &Cart) -> String {
    let mut html = String::new();
    for item in &SHOP_ITEMS {
        let qty = cart.quantity(item.id);
        let sell = if qty == 0 { " disabled" } else { "" };
        let buy = if cart.can_afford(item.id) { "" } else { " disabled" };
        let _ = write!(
            html,
            "<div class=\"shop-item\">\
             <span class=\"item-image\">{}</span>\
             <span class=\"item-name\">{}</span>\
             <span class=\"item-price\">{}</span>\
             <button data-action=\"sell\" data-arg=\"{id}\"{sell}>Sell</button>\
             <span class=\"item-qty\">{qty}</span>\
             <button data-action=\"buy\" data-arg=\"{id}\"{buy}>Buy</button>\
             </div>",
            item.image,
            item.name,
            format_money(item.price),
            id = item.id,
        );
    }
    html
}

/// Receipt lines plus total. Empty until something is bought.
pub fn receipt(cart: &Cart) -> String {
    let lines = cart.receipt();
    if lines.is_empty() {
        return String::new();
    }
    let mut html = String::from("<h3>Your Receipt</h3>");
    for line in &lines {
        let _ = write!(
            html,
            "<div class=\"receipt-line\"><span>{}</span><span>x{}</span><span>{}</span></div>",
            line.name,
            line.quantity,
            format_money(line.subtotal),
        );
    }
    let _ = write!(
        html,
        "<div class=\"receipt-total\"><span>TOTAL</span><span>{}</span></div>",
        format_money(cart.total_spent())
    );
    html
}

/// Inline width for the spent bar
pub fn progress_style(fraction: f64) -> String {
    format!("width:{:.2}%", (fraction * 100.0).clamp(0.0, 100.0))
}
