//! Spend the Budget: a shopping cart against a fixed fortune

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One hundred billion dollars
pub const TOTAL_BUDGET: u64 = 100_000_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShopItem {
    pub id: u32,
    pub name: &'static str,
    pub price: u64,
    pub image: &'static str,
}

const fn item(id: u32, name: &'static str, price: u64, image: &'static str) -> ShopItem {
    ShopItem {
        id,
        name,
        price,
        image,
    }
}

pub const SHOP_ITEMS: [ShopItem; 16] = [
    item(1, "Big Mac", 5, "🍔"),
    item(2, "Flip Flops", 20, "🩴"),
    item(3, "Video Game", 60, "🎮"),
    item(4, "Airpods", 200, "🎧"),
    item(5, "Smartphone", 1_000, "📱"),
    item(6, "Designer Handbag", 5_000, "👜"),
    item(7, "Jet Ski", 12_000, "🚤"),
    item(8, "Tesla Model S", 90_000, "🚗"),
    item(9, "Single Family Home", 400_000, "🏠"),
    item(10, "Gold Bar", 700_000, "🪙"),
    item(11, "Superbowl Ad", 7_000_000, "📺"),
    item(12, "Luxury Yacht", 25_000_000, "🛳️"),
    item(13, "F16 Fighter Jet", 50_000_000, "✈️"),
    item(14, "Skyscraper", 800_000_000, "🏙️"),
    item(15, "Cruise Ship", 1_200_000_000, "🚢"),
    item(16, "NBA Team", 3_000_000_000, "🏀"),
];

pub fn shop_item(id: u32) -> Option<&'static ShopItem> {
    SHOP_ITEMS.iter().find(|i| i.id == id)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BudgetError {
    #[error("no shop item with id {0}")]
    UnknownItem(u32),
    #[error("cannot afford {price}, only {remaining} left")]
    CannotAfford { price: u64, remaining: u64 },
    #[error("nothing to sell")]
    NothingToSell,
}

/// A line on the receipt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptLine {
    pub name: &'static str,
    pub quantity: u32,
    pub subtotal: u64,
}

/// Quantities bought per item id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    counts: BTreeMap<u32, u32>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quantity(&self, id: u32) -> u32 {
        self.counts.get(&id).copied().unwrap_or(0)
    }

    pub fn total_spent(&self) -> u64 {
        self.counts
            .iter()
            .filter_map(|(id, qty)| shop_item(*id).map(|i| i.price * u64::from(*qty)))
            .sum()
    }

    pub fn remaining(&self) -> u64 {
        TOTAL_BUDGET.saturating_sub(self.total_spent())
    }

    /// Share of the budget spent, 0.0 to 1.0
    pub fn spent_fraction(&self) -> f64 {
        self.total_spent() as f64 / TOTAL_BUDGET as f64
    }

    pub fn can_afford(&self, id: u32) -> bool {
        shop_item(id).is_some_and(|i| self.remaining() >= i.price)
    }

    pub fn buy(&mut self, id: u32) -> Result<u32, BudgetError> {
        let item = shop_item(id).ok_or(BudgetError::UnknownItem(id))?;
        let remaining = self.remaining();
        if remaining < item.price {
            return Err(BudgetError::CannotAfford {
                price: item.price,
                remaining,
            });
        }
        let count = self.counts.entry(id).or_insert(0);
        *count += 1;
        Ok(*count)
    }

    pub fn sell(&mut self, id: u32) -> Result<u32, BudgetError> {
        shop_item(id).ok_or(BudgetError::UnknownItem(id))?;
        match self.counts.get_mut(&id) {
            Some(count) if *count > 0 => {
                *count -= 1;
                Ok(*count)
            }
            _ => Err(BudgetError::NothingToSell),
        }
    }

    /// Receipt in shop order, skipping items sold back to zero
    pub fn receipt(&self) -> Vec<ReceiptLine> {
        self.counts
            .iter()
            .filter(|(_, qty)| **qty > 0)
            .filter_map(|(id, qty)| {
                shop_item(*id).map(|i| ReceiptLine {
                    name: i.name,
                    quantity: *qty,
                    subtotal: i.price * u64::from(*qty),
                })
            })
            .collect()
    }
}

/// "$1,234,567" (whole dollars)
pub fn format_money(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    out.push('$');
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
