//! Row-based rectangle packing.
//!
//! Items are placed left-to-right in input (or width-sorted) order.
//! With a row limit configured, every full row starts the next one at
//! x = 0, below the tallest item of the row just completed. Without a
//! limit everything lands in a single row.

use serde::{Deserialize, Serialize};

/// A rectangular item to pack
///
/// Positions start at the origin and are assigned during export. `meta`
/// carries caller payload through packing untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item<M = ()> {
    /// Item width
    pub width: f64,
    /// Item height
    pub height: f64,
    /// Assigned horizontal position
    pub x: f64,
    /// Assigned vertical position
    pub y: f64,
    /// Caller payload
    pub meta: M,
}

impl<M> Item<M> {
    /// Create an unplaced item carrying metadata
    pub fn new(width: f64, height: f64, meta: M) -> Self {
        Self {
            width,
            height,
            x: 0.0,
            y: 0.0,
            meta,
        }
    }
}

impl Item<()> {
    /// Create an unplaced item without metadata
    pub fn sized(width: f64, height: f64) -> Self {
        Self::new(width, height, ())
    }
}

/// Packing options
#[derive(Debug, Clone, PartialEq)]
pub struct PackerOptions {
    /// Sort items by ascending width before placement
    pub sort_by_width: bool,
    /// Start a new row after this many items
    pub max_items_per_row: Option<usize>,
}

impl Default for PackerOptions {
    fn default() -> Self {
        Self {
            sort_by_width: true,
            max_items_per_row: None,
        }
    }
}

/// The packed result
#[derive(Debug, Clone, PartialEq)]
pub struct PackedLayout<M = ()> {
    /// Bounding width: the maximum `x + width` over all items
    pub width: f64,
    /// Bounding height: the maximum `y + height` over all items
    pub height: f64,
    /// Items with their assigned positions
    pub items: Vec<Item<M>>,
}

impl<M> PackedLayout<M> {
    /// Check if the layout holds no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Accumulates items, then computes positions in one export step
///
/// Positions are assigned only inside [`Packer::export`]; callers never
/// observe items with half-assigned coordinates.
#[derive(Debug, Clone)]
pub struct Packer<M = ()> {
    options: PackerOptions,
    items: Vec<Item<M>>,
}

impl<M> Packer<M> {
    /// Create a packer with default options
    pub fn new() -> Self {
        Self::with_options(PackerOptions::default())
    }

    /// Create a packer with explicit options
    pub fn with_options(options: PackerOptions) -> Self {
        Self {
            options,
            items: Vec::new(),
        }
    }

    /// Add an item
    pub fn add(&mut self, item: Item<M>) {
        self.items.push(item);
    }

    /// Place all items and return the immutable packed layout
    ///
    /// Zero items yield a zero-size layout; callers skip emission then.
    pub fn export(self) -> PackedLayout<M> {
        let Packer { options, mut items } = self;
        if options.sort_by_width {
            // Stable, so equal widths keep their input order.
            items.sort_by(|a, b| a.width.total_cmp(&b.width));
        }
        place_items(&mut items, options.max_items_per_row);
        normalize_to_origin(&mut items);
        let (width, height) = bounding_size(&items);
        PackedLayout {
            width,
            height,
            items,
        }
    }
}

impl<M> Default for Packer<M> {
    fn default() -> Self {
        Self::new()
    }
}

fn place_items<M>(items: &mut [Item<M>], max_items_per_row: Option<usize>) {
    match max_items_per_row {
        Some(per_row) if per_row > 0 => {
            let mut y = 0.0;
            for row in items.chunks_mut(per_row) {
                let mut x = 0.0;
                let mut tallest: f64 = 0.0;
                for item in row.iter_mut() {
                    item.x = x;
                    item.y = y;
                    x += item.width;
                    tallest = tallest.max(item.height);
                }
                y += tallest;
            }
        }
        _ => {
            let mut x = 0.0;
            for item in items.iter_mut() {
                item.x = x;
                item.y = 0.0;
                x += item.width;
            }
        }
    }
}

fn normalize_to_origin<M>(items: &mut [Item<M>]) {
    let min_x = items.iter().map(|item| item.x).fold(f64::INFINITY, f64::min);
    let min_y = items.iter().map(|item| item.y).fold(f64::INFINITY, f64::min);
    if !min_x.is_finite() || !min_y.is_finite() {
        return;
    }
    for item in items.iter_mut() {
        item.x -= min_x;
        item.y -= min_y;
    }
}

fn bounding_size<M>(items: &[Item<M>]) -> (f64, f64) {
    let width = items
        .iter()
        .map(|item| item.x + item.width)
        .fold(0.0, f64::max);
    let height = items
        .iter()
        .map(|item| item.y + item.height)
        .fold(0.0, f64::max);
    (width, height)
}
