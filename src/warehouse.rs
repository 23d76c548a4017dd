//! Warehouse cell inventory.
//!
//! A warehouse is a grid of cells addressed as zone letter, two-digit shelf,
//! section digit and tier digit (`A0132` = zone A, shelf 1, section 3,
//! tier 2). Each cell holds a single product up to a fixed capacity.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Rejected warehouse operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WarehouseError {
    #[error("invalid warehouse layout: {0}")]
    InvalidLayout(String),
    #[error("invalid address: {0}")]
    InvalidAddress(String),
    #[error("quantity must be a positive integer, got {0}")]
    InvalidQuantity(u32),
    #[error("cannot place more than {capacity} units in a cell")]
    ExceedsCellCapacity { capacity: u32 },
    #[error("cell {address} already holds {product}")]
    CellOccupied {
        address: CellAddress,
        product: String,
    },
    #[error("cell {address} cannot hold more than {capacity} units (currently: {current})")]
    CellFull {
        address: CellAddress,
        capacity: u32,
        current: u32,
    },
    #[error("cell {address} is empty")]
    CellEmpty { address: CellAddress },
    #[error("cell {address} holds {stored}, not {requested}")]
    ProductMismatch {
        address: CellAddress,
        stored: String,
        requested: String,
    },
    #[error("not enough {product} in cell {address} (available: {available})")]
    InsufficientStock {
        address: CellAddress,
        product: String,
        available: u32,
    },
}

/// Warehouse dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WarehouseLayout {
    /// Zones, lettered from `A`.
    pub zones: u8,
    /// Shelves in each zone (two-digit address part).
    pub shelves_per_zone: u8,
    /// Sections on each shelf (one digit).
    pub sections_per_shelf: u8,
    /// Tiers in each section (one digit).
    pub tiers_per_section: u8,
    /// Units a single cell can hold.
    pub cell_capacity: u32,
}

impl Default for WarehouseLayout {
    fn default() -> Self {
        Self {
            zones: 1,
            shelves_per_zone: 10,
            sections_per_shelf: 7,
            tiers_per_section: 4,
            cell_capacity: 10,
        }
    }
}

impl WarehouseLayout {
    /// Checks that every dimension fits the address format.
    pub fn validate(&self) -> Result<(), WarehouseError> {
        let checks = [
            ("zones", u32::from(self.zones), 26),
            ("shelves_per_zone", u32::from(self.shelves_per_zone), 99),
            ("sections_per_shelf", u32::from(self.sections_per_shelf), 9),
            ("tiers_per_section", u32::from(self.tiers_per_section), 9),
        ];
        for (name, value, max) in checks {
            if value == 0 || value > max {
                return Err(WarehouseError::InvalidLayout(format!(
                    "{name} must be in 1..={max}, got {value}"
                )));
            }
        }
        if self.cell_capacity == 0 {
            return Err(WarehouseError::InvalidLayout(
                "cell_capacity must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Cells in one zone.
    pub fn cells_per_zone(&self) -> u32 {
        u32::from(self.shelves_per_zone)
            * u32::from(self.sections_per_shelf)
            * u32::from(self.tiers_per_section)
    }

    /// Cells in the whole warehouse.
    pub fn cell_count(&self) -> u32 {
        u32::from(self.zones) * self.cells_per_zone()
    }

    /// Units one zone can hold.
    pub fn zone_capacity(&self) -> u64 {
        u64::from(self.cells_per_zone()) * u64::from(self.cell_capacity)
    }

    /// Units the warehouse can hold.
    pub fn total_capacity(&self) -> u64 {
        u64::from(self.cell_count()) * u64::from(self.cell_capacity)
    }

    /// Zone letters in order, `A` through at most `Z`.
    pub fn zone_letters(&self) -> impl Iterator<Item = char> {
        (0..self.zones.min(26)).map(|i| char::from(b'A' + i))
    }
}

/// A validated cell address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellAddress {
    pub zone: char,
    pub shelf: u8,
    pub section: u8,
    pub tier: u8,
}

impl CellAddress {
    /// Parses `raw` and range-checks it against `layout`.
    pub fn parse(raw: &str, layout: &WarehouseLayout) -> Result<Self, WarehouseError> {
        let invalid = || WarehouseError::InvalidAddress(raw.to_string());
        let bytes = raw.as_bytes();
        if bytes.len() != 5 || !raw.is_ascii() {
            return Err(invalid());
        }

        let zone = char::from(bytes[0]);
        if !layout.zone_letters().any(|z| z == zone) {
            return Err(invalid());
        }

        let digit = |b: u8| b.is_ascii_digit().then(|| b - b'0');
        let (Some(tens), Some(ones), Some(section), Some(tier)) =
            (digit(bytes[1]), digit(bytes[2]), digit(bytes[3]), digit(bytes[4]))
        else {
            return Err(invalid());
        };
        let shelf = tens * 10 + ones;

        let in_range = |value: u8, max: u8| (1..=max).contains(&value);
        if !in_range(shelf, layout.shelves_per_zone)
            || !in_range(section, layout.sections_per_shelf)
            || !in_range(tier, layout.tiers_per_section)
        {
            return Err(invalid());
        }

        Ok(Self {
            zone,
            shelf,
            section,
            tier,
        })
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:02}{}{}", self.zone, self.shelf, self.section, self.tier)
    }
}

/// Contents of an occupied cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub product: String,
    pub quantity: u32,
}

/// Cell inventory keyed by address.
#[derive(Debug, Clone)]
pub struct Warehouse {
    layout: WarehouseLayout,
    cells: BTreeMap<CellAddress, Cell>,
    used: u64,
}

impl Warehouse {
    /// Creates an empty warehouse.
    pub fn new(layout: WarehouseLayout) -> Result<Self, WarehouseError> {
        layout.validate()?;
        Ok(Self {
            layout,
            cells: BTreeMap::new(),
            used: 0,
        })
    }

    /// The warehouse dimensions.
    pub fn layout(&self) -> &WarehouseLayout {
        &self.layout
    }

    /// Units currently stored.
    pub fn used_capacity(&self) -> u64 {
        self.used
    }

    /// Contents of the cell at `address`, if occupied.
    pub fn cell(&self, address: &CellAddress) -> Option<&Cell> {
        self.cells.get(address)
    }

    /// Stores `quantity` units of `product` at `address`.
    pub fn add(
        &mut self,
        product: &str,
        quantity: u32,
        address: &str,
    ) -> Result<CellAddress, WarehouseError> {
        let address = CellAddress::parse(address, &self.layout)?;
        let capacity = self.layout.cell_capacity;
        if quantity == 0 {
            return Err(WarehouseError::InvalidQuantity(quantity));
        }
        if quantity > capacity {
            return Err(WarehouseError::ExceedsCellCapacity { capacity });
        }

        match self.cells.get_mut(&address) {
            Some(cell) => {
                if cell.product != product {
                    return Err(WarehouseError::CellOccupied {
                        address,
                        product: cell.product.clone(),
                    });
                }
                let Some(total) = cell
                    .quantity
                    .checked_add(quantity)
                    .filter(|total| *total <= capacity)
                else {
                    return Err(WarehouseError::CellFull {
                        address,
                        capacity,
                        current: cell.quantity,
                    });
                };
                cell.quantity = total;
            }
            None => {
                self.cells.insert(
                    address,
                    Cell {
                        product: product.to_string(),
                        quantity,
                    },
                );
            }
        }
        self.used += u64::from(quantity);
        debug!(%address, product, quantity, "stored");
        Ok(address)
    }

    /// Takes `quantity` units of `product` from `address`, freeing the cell
    /// when it runs empty.
    pub fn remove(
        &mut self,
        product: &str,
        quantity: u32,
        address: &str,
    ) -> Result<CellAddress, WarehouseError> {
        let address = CellAddress::parse(address, &self.layout)?;
        if quantity == 0 {
            return Err(WarehouseError::InvalidQuantity(quantity));
        }
        let Some(cell) = self.cells.get_mut(&address) else {
            return Err(WarehouseError::CellEmpty { address });
        };
        if cell.product != product {
            return Err(WarehouseError::ProductMismatch {
                address,
                stored: cell.product.clone(),
                requested: product.to_string(),
            });
        }
        if cell.quantity < quantity {
            return Err(WarehouseError::InsufficientStock {
                address,
                product: product.to_string(),
                available: cell.quantity,
            });
        }

        cell.quantity -= quantity;
        if cell.quantity == 0 {
            self.cells.remove(&address);
        }
        self.used -= u64::from(quantity);
        debug!(%address, product, quantity, "taken");
        Ok(address)
    }

    /// Snapshot of fill levels and occupied cells.
    pub fn report(&self) -> WarehouseReport {
        let zones = self
            .layout
            .zone_letters()
            .map(|zone| {
                let used: u64 = self
                    .cells
                    .iter()
                    .filter(|(addr, _)| addr.zone == zone)
                    .map(|(_, cell)| u64::from(cell.quantity))
                    .sum();
                (zone, percent(used, self.layout.zone_capacity()))
            })
            .collect();

        WarehouseReport {
            total_fill_pct: percent(self.used, self.layout.total_capacity()),
            zones,
            occupied: self
                .cells
                .iter()
                .map(|(addr, cell)| (*addr, cell.clone()))
                .collect(),
            empty_cells: self.layout.cell_count() as usize - self.cells.len(),
        }
    }
}

fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// Result of an `INFO` query.
#[derive(Debug, Clone, PartialEq)]
pub struct WarehouseReport {
    /// Overall fill level (percent).
    pub total_fill_pct: f64,
    /// Per-zone fill level (percent).
    pub zones: Vec<(char, f64)>,
    /// Occupied cells sorted by address.
    pub occupied: Vec<(CellAddress, Cell)>,
    /// Cells holding nothing.
    pub empty_cells: usize,
}

impl fmt::Display for WarehouseReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Warehouse info:")?;
        writeln!(f, "Total fill: {:.1}%", self.total_fill_pct)?;
        for (zone, pct) in &self.zones {
            writeln!(f, "Zone {zone} fill: {pct:.1}%")?;
        }
        writeln!(f)?;
        writeln!(f, "Occupied cells:")?;
        for (addr, cell) in &self.occupied {
            writeln!(f, "{addr}: {} ({})", cell.product, cell.quantity)?;
        }
        writeln!(f)?;
        write!(f, "Empty cells: {}", self.empty_cells)
    }
}
