//! # slidesmith-layout
//!
//! Row-based rectangle packing and fit scaling.
//!
//! Renderers use this crate to arrange several images inside one slide
//! placeholder: items are packed left-to-right into rows, normalized to
//! the origin, then uniformly scaled and centered into the target box.
//!
//! ## Example
//!
//! ```rust,ignore
//! use slidesmith_layout::{fit_into, Item, Packer, PackerOptions, Rect};
//!
//! let mut packer = Packer::with_options(PackerOptions {
//!     max_items_per_row: Some(2),
//!     ..Default::default()
//! });
//! packer.add(Item::sized(640.0, 480.0));
//! packer.add(Item::sized(800.0, 600.0));
//!
//! let packed = packer.export();
//! let fit = fit_into(&packed, &Rect::new(0.0, 0.0, 3_000_000.0, 1_700_000.0));
//! ```

pub mod fit;
pub mod packer;

// Re-exports
pub use fit::{fit_into, FitTransform, Rect};
pub use packer::{Item, PackedLayout, Packer, PackerOptions};
