//! Project - Structural elements optimized in sequence with leftover reuse.
//!
//! Elements are optimized one after another in project order. Every element
//! sees the offcuts produced by the elements before it in the same pass, so
//! reordering elements changes which offcuts get reused.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::{float_cmp, OptimizerConfig};
use crate::error::{OptimizeError, Result};
use crate::model::{ElementResult, LeftoverStock, PieceRequirement};
use crate::optimizer::optimize;

fn default_true() -> bool {
    true
}

/// A structural element (wall, slab, beam, ...) and its takeoff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Element identifier, unique within the project.
    pub id: String,
    /// Display name, used for default piece labels.
    pub name: String,
    /// Required pieces.
    #[serde(default)]
    pub requirements: Vec<PieceRequirement>,
}

impl Element {
    /// Create an element without requirements.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            requirements: Vec::new(),
        }
    }

    /// Add a requirement.
    pub fn with_requirement(mut self, requirement: PieceRequirement) -> Self {
        self.requirements.push(requirement);
        self
    }

    /// Requirements ready for the optimizer: invalid lines dropped, empty
    /// labels replaced by `"{name} - piece {n}"`.
    pub fn prepared_requirements(&self) -> Vec<PieceRequirement> {
        self.requirements
            .iter()
            .filter(|r| r.is_valid())
            .enumerate()
            .map(|(idx, r)| {
                let mut req = r.clone();
                if req.label.trim().is_empty() {
                    req.label = format!("{} - piece {}", self.name, idx + 1);
                }
                req
            })
            .collect()
    }
}

/// A construction project: shared settings plus elements in processing order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Project name.
    pub name: String,
    /// Optimizer settings shared by every element.
    #[serde(default)]
    pub config: OptimizerConfig,
    /// Offer earlier elements' offcuts to later ones.
    #[serde(default = "default_true")]
    pub reuse_leftovers: bool,
    /// Elements in processing order.
    #[serde(default)]
    pub elements: Vec<Element>,
}

impl Project {
    /// Create an empty project with default settings.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            config: OptimizerConfig::default(),
            reuse_leftovers: true,
            elements: Vec::new(),
        }
    }

    /// Add an element at the end of the processing order.
    pub fn with_element(mut self, element: Element) -> Self {
        self.elements.push(element);
        self
    }

    /// Optimize every element from scratch, in order.
    ///
    /// Previously produced leftovers are discarded; the ledger starts empty.
    pub fn recompute_all(&self) -> Result<ProjectResult> {
        let mut seen = HashSet::new();
        for element in &self.elements {
            if !seen.insert(element.id.as_str()) {
                return Err(OptimizeError::DuplicateElement {
                    id: element.id.clone(),
                });
            }
        }

        let mut sequencer = Sequencer::new(&self.config, self.reuse_leftovers);
        for element in &self.elements {
            sequencer.process(element)?;
        }

        let result = sequencer.finish();
        tracing::info!(
            "Project '{}': {} element(s) optimized, {}",
            self.name,
            result.outcomes.len(),
            result.summary()
        );
        Ok(result)
    }
}

/// Project-wide inventory of offcuts produced so far in one pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeftoverLedger {
    entries: Vec<LeftoverStock>,
}

impl LeftoverLedger {
    /// Offcuts not yet consumed by any element, in production order.
    pub fn available(&self) -> Vec<LeftoverStock> {
        self.entries.iter().filter(|s| !s.used).cloned().collect()
    }

    /// Every offcut recorded so far.
    pub fn entries(&self) -> &[LeftoverStock] {
        &self.entries
    }

    /// Apply one element's leftover delta.
    ///
    /// Consumed offcuts are marked used; produced ones get ids prefixed with
    /// the element id so they stay unique across the project.
    pub fn record(&mut self, element_id: &str, result: &mut ElementResult) {
        for consumed in &result.leftovers_consumed {
            if let Some(entry) = self.entries.iter_mut().find(|s| s.id == consumed.id) {
                entry.used = true;
            }
        }

        for produced in &mut result.leftovers_produced {
            produced.id = format!("{}/{}", element_id, produced.id);
            self.entries.push(produced.clone());
        }
    }
}

/// Runs elements in order, threading the leftover ledger forward.
#[derive(Debug)]
pub struct Sequencer<'a> {
    config: &'a OptimizerConfig,
    reuse_leftovers: bool,
    ledger: LeftoverLedger,
    outcomes: Vec<ElementOutcome>,
}

impl<'a> Sequencer<'a> {
    /// Start a fresh pass with an empty ledger.
    pub fn new(config: &'a OptimizerConfig, reuse_leftovers: bool) -> Self {
        Self {
            config,
            reuse_leftovers,
            ledger: LeftoverLedger::default(),
            outcomes: Vec::new(),
        }
    }

    /// Offcuts the next element would be offered.
    pub fn offered(&self) -> Vec<LeftoverStock> {
        if self.reuse_leftovers {
            self.ledger.available()
        } else {
            Vec::new()
        }
    }

    /// Optimize the next element.
    ///
    /// Elements without any valid requirement are skipped and return `None`.
    pub fn process(&mut self, element: &Element) -> Result<Option<&ElementOutcome>> {
        let requirements = element.prepared_requirements();
        if requirements.is_empty() {
            tracing::debug!("Element '{}' has no valid requirements, skipped", element.name);
            return Ok(None);
        }

        let offered = self.offered();
        let mut result = optimize(&requirements, self.config, &offered)?;
        self.ledger.record(&element.id, &mut result);

        tracing::info!(
            "Element '{}': {} bar(s) to buy, {} kg, {} leftover(s) reused, {} produced",
            element.name,
            result.purchased_bar_count(),
            result.total_weight_kg,
            result.leftovers_consumed.len(),
            result.leftovers_produced.len()
        );

        self.outcomes.push(ElementOutcome {
            element_id: element.id.clone(),
            element_name: element.name.clone(),
            result,
        });
        Ok(self.outcomes.last())
    }

    /// Current ledger state.
    pub fn ledger(&self) -> &LeftoverLedger {
        &self.ledger
    }

    /// Finish the pass.
    pub fn finish(self) -> ProjectResult {
        ProjectResult {
            outcomes: self.outcomes,
            ledger: self.ledger,
        }
    }
}

/// Result of one element within a project pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementOutcome {
    /// Element id.
    pub element_id: String,
    /// Element name.
    pub element_name: String,
    /// Cutting plan.
    pub result: ElementResult,
}

/// Results of a full project pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectResult {
    /// Element results in processing order; skipped elements are absent.
    pub outcomes: Vec<ElementOutcome>,
    /// Final leftover inventory.
    pub ledger: LeftoverLedger,
}

impl ProjectResult {
    /// Result of one element by id.
    pub fn outcome(&self, element_id: &str) -> Option<&ElementOutcome> {
        self.outcomes.iter().find(|o| o.element_id == element_id)
    }

    /// Totals across all elements.
    pub fn summary(&self) -> ProjectSummary {
        let mut summary = ProjectSummary::default();
        let mut by_length: Vec<(f64, usize)> = Vec::new();

        for outcome in &self.outcomes {
            let result = &outcome.result;
            for diameter in &result.diameters {
                summary.bars_total += diameter.bar_count;
                summary.meters_purchased += diameter.meters_purchased;
                for bar in diameter.purchased_bars() {
                    match by_length
                        .iter_mut()
                        .find(|(l, _)| float_cmp::approx_eq(*l, bar.nominal_length))
                    {
                        Some((_, count)) => *count += 1,
                        None => by_length.push((bar.nominal_length, 1)),
                    }
                }
            }
            summary.weight_kg += result.total_weight_kg;
            summary.waste_m += result.total_waste_m;
            summary.bars_saved += result.bars_saved;
        }

        by_length.sort_by(|a, b| b.0.total_cmp(&a.0));
        summary.bars_by_length = by_length;
        summary.weight_kg = float_cmp::round_to(summary.weight_kg, 2);
        summary.waste_m = float_cmp::round_mm(summary.waste_m);
        summary.meters_purchased = float_cmp::round_mm(summary.meters_purchased);
        summary.leftovers_available = self.ledger.available().len();
        summary
    }
}

/// Project-wide purchase and waste totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectSummary {
    /// Purchased bars across all elements.
    pub bars_total: usize,
    /// Total steel weight.
    pub weight_kg: f64,
    /// Total waste.
    pub waste_m: f64,
    /// Total purchased length.
    pub meters_purchased: f64,
    /// Offcuts left unused at the end of the pass.
    pub leftovers_available: usize,
    /// Estimated bars avoided through reuse.
    pub bars_saved: usize,
    /// Purchased bar count per nominal length, longest first.
    pub bars_by_length: Vec<(f64, usize)>,
}

impl ProjectSummary {
    /// Purchase list such as `"3 x 12m + 1 x 6m"`.
    pub fn bars_text(&self) -> String {
        self.bars_by_length
            .iter()
            .map(|(length, count)| format!("{} x {}m", count, length))
            .collect::<Vec<_>>()
            .join(" + ")
    }
}

impl fmt::Display for ProjectSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} bar(s) to buy ({}), {} m purchased, {} kg, {} m waste, {} leftover(s) available, ~{} bar(s) saved",
            self.bars_total,
            if self.bars_by_length.is_empty() {
                "none".to_string()
            } else {
                self.bars_text()
            },
            self.meters_purchased,
            self.weight_kg,
            self.waste_m,
            self.leftovers_available,
            self.bars_saved
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn slab() -> Element {
        // Two 12 m bars; offcuts of 2 m and 7 m.
        Element::new("e1", "Slab").with_requirement(PieceRequirement::new("r1", 5.0, 12, 3, ""))
    }

    fn beam() -> Element {
        Element::new("e2", "Beam").with_requirement(PieceRequirement::new("r1", 6.5, 12, 1, "Top"))
    }

    #[test]
    fn test_prepared_requirements_labels_and_filter() {
        let element = Element::new("e", "Wall")
            .with_requirement(PieceRequirement::new("a", 0.0, 12, 1, ""))
            .with_requirement(PieceRequirement::new("b", 2.0, 12, 1, ""))
            .with_requirement(PieceRequirement::new("c", 3.0, 12, 1, "Custom"));

        let prepared = element.prepared_requirements();
        let labels: Vec<&str> = prepared.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["Wall - piece 1", "Custom"]);
    }

    #[test]
    fn test_leftovers_flow_forward() {
        let project = Project::new("House").with_element(slab()).with_element(beam());
        let result = project.recompute_all().unwrap();

        let slab_result = &result.outcome("e1").unwrap().result;
        let ids: Vec<&str> = slab_result
            .leftovers_produced
            .iter()
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(ids, vec!["e1/s_12_1", "e1/s_12_2"]);

        // The 6.5 m piece lands on the 7 m offcut instead of a new bar.
        let beam_result = &result.outcome("e2").unwrap().result;
        assert_eq!(beam_result.purchased_bar_count(), 0);
        assert_eq!(beam_result.leftovers_consumed.len(), 1);
        assert_eq!(beam_result.leftovers_consumed[0].id, "e1/s_12_2");
        assert_eq!(beam_result.bars_saved, 1);

        let available: Vec<(String, f64)> = result
            .ledger
            .available()
            .into_iter()
            .map(|s| (s.id, s.length))
            .collect();
        assert_eq!(
            available,
            vec![
                ("e1/s_12_1".to_string(), 2.0),
                ("e2/s_12_1".to_string(), 0.5)
            ]
        );
    }

    #[test]
    fn test_reuse_disabled() {
        let mut project = Project::new("House").with_element(slab()).with_element(beam());
        project.reuse_leftovers = false;
        let result = project.recompute_all().unwrap();

        let beam_result = &result.outcome("e2").unwrap().result;
        assert_eq!(beam_result.purchased_bar_count(), 1);
        assert!(beam_result.leftovers_consumed.is_empty());
    }

    #[test]
    fn test_order_changes_economics() {
        let lintel = Element::new("l", "Lintel")
            .with_requirement(PieceRequirement::new("r1", 2.0, 12, 2, "Lintel"));
        let column = Element::new("c", "Column")
            .with_requirement(PieceRequirement::new("r1", 9.0, 12, 2, "Column"));

        // Lintel first: its 8 m offcut is too short for 9 m pieces.
        let forward = Project::new("P")
            .with_element(lintel.clone())
            .with_element(column.clone());
        // Column first: the lintel pieces fit the two 3 m offcuts.
        let reversed = Project::new("P").with_element(column).with_element(lintel);

        assert_eq!(forward.recompute_all().unwrap().summary().bars_total, 3);
        assert_eq!(reversed.recompute_all().unwrap().summary().bars_total, 2);
    }

    #[test]
    fn test_consumed_leftover_not_offered_twice() {
        let project = Project::new("P")
            .with_element(slab())
            .with_element(beam())
            .with_element(
                Element::new("e3", "Column")
                    .with_requirement(PieceRequirement::new("r1", 6.8, 12, 1, "Starter")),
            );
        let result = project.recompute_all().unwrap();

        // The 7 m offcut went to the beam; the column needs a new bar.
        let column = &result.outcome("e3").unwrap().result;
        assert_eq!(column.purchased_bar_count(), 1);
        assert!(column.leftovers_consumed.is_empty());
    }

    #[test]
    fn test_recompute_all_is_repeatable() {
        let project = Project::new("P").with_element(slab()).with_element(beam());
        assert_eq!(project.recompute_all().unwrap(), project.recompute_all().unwrap());
    }

    #[test]
    fn test_duplicate_element_ids() {
        let project = Project::new("P").with_element(slab()).with_element(slab());
        let err = project.recompute_all().unwrap_err();
        assert!(matches!(err, OptimizeError::DuplicateElement { id } if id == "e1"));
    }

    #[test]
    fn test_empty_elements_are_skipped() {
        let project = Project::new("P")
            .with_element(Element::new("empty", "Nothing"))
            .with_element(slab());
        let result = project.recompute_all().unwrap();
        assert_eq!(result.outcomes.len(), 1);
        assert!(result.outcome("empty").is_none());
    }

    #[test]
    fn test_summary_text() {
        let mut project = Project::new("P")
            .with_element(slab())
            .with_element(
                Element::new("e3", "Girder")
                    .with_requirement(PieceRequirement::new("r1", 8.0, 16, 2, "Bottom")),
            )
            .with_element(
                Element::new("e4", "Stairs")
                    .with_requirement(PieceRequirement::new("r1", 4.0, 8, 1, "Step")),
            );
        project.config = OptimizerConfig::with_stock_lengths(vec![6.0, 12.0]);

        let summary = project.recompute_all().unwrap().summary();
        insta::assert_snapshot!(summary.bars_text(), @"2 x 12m + 4 x 6m");
        assert_eq!(summary.bars_total, 6);
        assert_eq!(summary.meters_purchased, 48.0);
        assert_eq!(summary.bars_saved, 0);
    }
}
