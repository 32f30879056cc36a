//! rebar-optimizer - Cutting-stock optimization for reinforcement bar takeoffs.
//!
//! This library turns lists of required rebar pieces into purchase and cutting
//! plans against standard stock lengths, reusing offcuts left by elements
//! processed earlier in the same project.
//!
//! # Example
//!
//! ```
//! use rebar_optimizer::{optimize, OptimizerConfig, PieceRequirement};
//!
//! let pieces = vec![PieceRequirement::new("slab-x", 5.0, 12, 3, "Slab X")];
//! let result = optimize(&pieces, &OptimizerConfig::default(), &[]).unwrap();
//!
//! assert_eq!(result.purchased_bar_count(), 2);
//! assert_eq!(result.leftovers_produced.len(), 2);
//! ```

pub mod config;
pub mod error;
pub mod io;
pub mod model;
pub mod optimizer;
pub mod project;
pub mod validation;

// Re-exports for convenience
pub use config::{NewBarPolicy, OptimizerConfig, MIN_LEFTOVER_LENGTH};
pub use error::{OptimizeError, Result};
pub use io::{load_project, save_result};
pub use model::{
    BarSource, CutAssignment, DiameterResult, ElementResult, FlatPiece, LeftoverStock,
    PieceRequirement, StockBar,
};
pub use optimizer::optimize;
pub use project::{Element, LeftoverLedger, Project, ProjectResult, ProjectSummary, Sequencer};
pub use validation::{validate_project, ValidationResult};

/// Load a project file and optimize all of its elements.
///
/// This is the main high-level function that performs the full pipeline:
/// 1. Load the project file
/// 2. Validate the settings and takeoff
/// 3. Optimize every element in order, reusing leftovers
pub fn optimize_project_file(path: &std::path::Path) -> Result<ProjectResult> {
    let project = load_project(path)?;

    let validation = validate_project(&project);
    for warning in &validation.warnings {
        tracing::warn!("{}", warning);
    }
    for error in &validation.errors {
        tracing::error!("{}", error);
    }

    project.recompute_all()
}
