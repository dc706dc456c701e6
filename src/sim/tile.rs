//! Crafting elements, the tiles placed from them, and the discovered inventory

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Point;

/// A combinable concept, e.g. Water 💧
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CraftElement {
    pub name: String,
    pub emoji: String,
}

impl CraftElement {
    pub fn new(name: impl Into<String>, emoji: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            emoji: emoji.into(),
        }
    }

    /// The four elements every session starts with
    pub fn starters() -> Vec<CraftElement> {
        vec![
            CraftElement::new("Water", "💧"),
            CraftElement::new("Fire", "🔥"),
            CraftElement::new("Wind", "🌬️"),
            CraftElement::new("Earth", "🌍"),
        ]
    }
}

/// Workspace-unique tile handle. Never reused within a workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileId(pub u32);

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tile-{}", self.0)
    }
}

/// One placed, movable copy of an element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileInstance {
    pub id: TileId,
    pub element: CraftElement,
    /// Anchor position (top-left of the tile box)
    pub pos: Point,
}

impl TileInstance {
    pub fn name(&self) -> &str {
        &self.element.name
    }

    pub fn emoji(&self) -> &str {
        &self.element.emoji
    }
}

/// Elements discovered so far, unique by name, in discovery order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    elements: Vec<CraftElement>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_starters() -> Self {
        let mut inventory = Self::new();
        for element in CraftElement::starters() {
            inventory.add(element);
        }
        inventory
    }

    /// Add an element unless one with the same name is already known.
    /// Returns true if it was new.
    pub fn add(&mut self, element: CraftElement) -> bool {
        if self.contains(&element.name) {
            return false;
        }
        self.elements.push(element);
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.elements.iter().any(|e| e.name == name)
    }

    pub fn get(&self, name: &str) -> Option<&CraftElement> {
        self.elements.iter().find(|e| e.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CraftElement> {
        self.elements.iter()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
