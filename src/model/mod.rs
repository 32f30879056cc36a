//! Data model types for rebar cutting plans.

mod bar;
mod leftover;
mod piece;
mod requirement;
mod result;

pub use bar::{BarSource, CutAssignment, StockBar};
pub use leftover::LeftoverStock;
pub use piece::FlatPiece;
pub use requirement::PieceRequirement;
pub use result::{DiameterResult, ElementResult};
