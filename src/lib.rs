//! Nested-path record comparison and sorting.
//!
//! Records are [`Value`] trees. A [`Path`] such as `operation.client.name` picks a
//! leaf out of a record, a [`ValueComparator`] orders two leaves with a total,
//! type-aware policy, and a [`Sorter`] chains both into a multi-key sort.
//!
//! ```rust
//! use pathsort::{Sorter, Value};
//! use serde_json::json;
//!
//! let mut workers: Vec<Value> = vec![
//!     json!({"name": "Rui", "area": {"name": "Yard"}}).into(),
//!     json!({"name": "Ana", "area": null}).into(),
//!     json!({"name": "Ivo", "area": {"name": "Dock"}}).into(),
//! ];
//! Sorter::parse("area.name, name").unwrap().sort(&mut workers);
//! assert_eq!(workers[0].to_json()["name"], "Ana");
//! assert_eq!(workers[1].to_json()["name"], "Ivo");
//! ```

pub use crate::compare::{compare_values, Collator, FallbackPolicy, ValueComparator};
pub use crate::errors::SortError;
pub use crate::keys::{parse_keys, Direction, SortKey};
pub use crate::path::{Lookup, Path};
pub use crate::sort::Sorter;
pub use crate::value::{Value, ValueKind};

pub mod cli;
pub mod compare;
pub mod errors;
pub mod keys;
pub mod path;
pub mod sort;
pub mod value;
