//! BEA Core - Emotional State Algebra
//!
//! A closed algebra over a fixed catalog of 32 emotional states with five
//! binary operators:
//!
//! - `StateTable`: the immutable catalog, validated once and shared process-wide
//! - `BeaCalculator`: Combust ⊕, Balance ⊖, Dissolve ⊗, Amplify ⨀, Divergence ≠
//! - `OperationDispatcher`: operator phrase + two state names → calculator call
//!
//! Everything here is synchronous and free of shared mutable state, so a
//! `&'static StateTable` can back any number of concurrent callers.
//!
//! # Example
//!
//! ```
//! use bea_core::{OperationDispatcher, StateTable};
//!
//! let table = StateTable::canonical()?;
//! let dispatcher = OperationDispatcher::new(table);
//!
//! let result = dispatcher.dispatch("combust", "Curiosity", "Bliss")?;
//! assert_eq!(result.result_state.name, "Inspiration");
//! # Ok::<(), bea_core::BeaError>(())
//! ```

pub mod calculator;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod operator;
pub mod state;
pub mod table;

// Re-export primary types
pub use calculator::{BeaCalculator, EtherealTier, OperationMetrics, OperationResult};
pub use config::CalculatorConfig;
pub use dispatcher::OperationDispatcher;
pub use error::{BeaError, BeaResult, StateRef};
pub use operator::Operator;
pub use state::{Affect, Category, EmotionState, MAX_INTENSITY, MIN_INTENSITY};
pub use table::{StateTable, NEUTRAL_ID, STATE_COUNT};
