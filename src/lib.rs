//! Scans a Sims 4 mods tree and lays it out in slot based load order.

pub mod classifier;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod hasher;
pub mod load_order;
pub mod model;
pub mod scanner;
pub mod util;

pub use classifier::ModKind;
pub use error::{OrganizerError, Result};
pub use load_order::{LoadOrderManager, Slot};
pub use model::{Catalog, ModEntry, ModRecord};
pub use scanner::ModScanner;
