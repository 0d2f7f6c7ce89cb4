//! # rusty_datamodule: tagged data transforms
//!
//! Small building blocks for ML input pipelines: every position in a batch
//! carries a semantic tag ([`data::Desc`]), and transforms dispatch on that
//! tag to decide what to do with each item.
//!
//! ## Usage Example
//!
//! ```
//! use rusty_datamodule::data::{Desc, Item, ToFloat, Transform};
//!
//! let batch = [Item::from(vec![0u8, 128, 255]), Item::from(3i64)];
//! let out = ToFloat::new()
//!     .apply(&batch, Some(&[Desc::Image, Desc::Label]))
//!     .unwrap();
//!
//! assert_eq!(out[1], Item::from(3i64)); // labels pass through
//! ```

pub mod data;
