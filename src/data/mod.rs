//! # Data Module
//!
//! Descriptor-driven transforms for ML input batches.
//!
//! A batch is a slice of [`Item`]s paired positionally with a descriptor, a
//! slice of [`Desc`] tags. A [`Transform`] picks a handler for each item by
//! its tag and leaves untagged kinds unchanged.
//!
//! ## Example
//!
//! ```
//! use rusty_datamodule::data::{Compose, Desc, Item, ToFloat, Transform};
//!
//! let to_float = ToFloat::with_descriptor([Desc::Image]);
//! let out = to_float.apply(&[Item::from(vec![0u8, 255])], None).unwrap();
//! assert_eq!(out, vec![Item::from(vec![0.0f32, 1.0])]);
//!
//! // Fan-out: every transform sees the same input.
//! let compose = Compose::new().add(ToFloat::new());
//! let all = compose.apply(&[Item::from(vec![0u8, 255])], &[Desc::Image]).unwrap();
//! assert_eq!(all, vec![vec![Item::from(vec![0.0f32, 1.0])]]);
//! ```
//!
//! ## Available Components
//!
//! ### Transforms
//! - [`ToFloat`]: Scale 8-bit images into `[0, 1]` as `f32`
//! - [`Identity`]: Pass every item through
//! - [`Lambda`]: Transform built from closures
//! - [`Compose`]: Fan-out over several transforms
//!
//! ### Configuration
//! - [`ComposeConfig`]: JSON description of a [`Compose`]

pub mod config;
pub mod desc;
pub mod item;
pub mod module;
pub mod transforms;

pub use config::{ComposeConfig, ConfigError, TransformName};
pub use desc::{Desc, ParseDescError};
pub use item::Item;
pub use module::DataModule;
pub use transforms::{
    noop, Compose, Identity, KindFn, Kinds, Lambda, ToFloat, Transform, TransformError,
    TransformResult,
};
