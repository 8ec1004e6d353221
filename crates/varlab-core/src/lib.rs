//! # varlab Core
//!
//! Core types for the varlab Value-at-Risk library.
//!
//! This crate provides the foundational building blocks used throughout varlab:
//!
//! - **Types**: `Series`, `Sample` and `UnitOfMeasure`
//! - **Returns**: Classic and logarithmic return transforms and their inverses
//!
//! ## Example
//!
//! ```rust
//! use varlab_core::prelude::*;
//!
//! let prices = Series::new(vec![100.0, 101.0, 99.5, 102.0]).with_name("Brent");
//! let returns = log_return_series(&prices).unwrap();
//! assert_eq!(returns.len(), prices.len() - 1);
//! assert_eq!(returns.unit(), Some(UnitOfMeasure::ReturnLog));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::uninlined_format_args)]

pub mod error;
pub mod returns;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::returns::{
        classic_return, classic_return_inverse, classic_return_series, log_return,
        log_return_inverse, log_return_series, return_series, ReturnType,
    };
    pub use crate::types::{Sample, Series, UnitOfMeasure};
}

// Re-export commonly used types at crate root
pub use error::{CoreError, CoreResult};
pub use returns::{classic_return_series, log_return_series, return_series, ReturnType};
pub use types::{Sample, Series, UnitOfMeasure};
