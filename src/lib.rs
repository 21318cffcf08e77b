//! Types encapsulating a value that may or may not be present, stored inline
//! with manually managed lifetimes.
//!
//! The central type is [`OptCell`], a cell that reserves storage for a value
//! of type `T` without requiring the value to exist yet. It has two main uses:
//!
//! - *Delayed initialization*: reserve space for a value up front and
//!   construct it later, without requiring `T: Default`.
//! - *Maybe-absent results*: return a value that may not exist, with an
//!   unchecked fast path for callers that have already verified presence.
//!
//! ```
//! use optcell::OptCell;
//!
//! let mut cell = OptCell::empty();
//! assert!(!cell.is_valid());
//!
//! cell.set(String::from("hello"));
//! assert_eq!(cell.get(), Some(&String::from("hello")));
//!
//! cell.reset();
//! assert!(!cell.is_valid());
//! ```

pub mod cell;
pub mod iter;

pub use cell::OptCell;
