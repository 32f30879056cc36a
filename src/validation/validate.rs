//! Validation logic for projects and optimizer settings.

use std::collections::HashSet;

use crate::config::OptimizerConfig;
use crate::project::Project;

/// Validation result with warnings.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Whether validation passed.
    pub passed: bool,
    /// Warning messages.
    pub warnings: Vec<String>,
    /// Error messages.
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// Create a passing result.
    pub fn ok() -> Self {
        Self {
            passed: true,
            ..Default::default()
        }
    }

    /// Add a warning.
    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Add an error.
    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
        self.passed = false;
    }

    /// Merge another result into this one.
    pub fn merge(&mut self, other: ValidationResult) {
        self.warnings.extend(other.warnings);
        self.errors.extend(other.errors);
        if !other.passed {
            self.passed = false;
        }
    }
}

/// Validate optimizer settings.
pub fn validate_config(config: &OptimizerConfig) -> ValidationResult {
    let mut result = ValidationResult::ok();

    let lengths = match config.normalized_stock_lengths() {
        Ok(lengths) => lengths,
        Err(e) => {
            result.add_error(e.to_string());
            return result;
        }
    };
    if lengths.len() < config.stock_lengths.len() {
        result.add_warning(format!(
            "Stock lengths {:?} contain invalid or duplicate values, using {:?}",
            config.stock_lengths, lengths
        ));
    }

    let max_length = lengths.last().copied().unwrap_or(0.0);
    for (&diameter, &overlap) in &config.splice_overlaps {
        if !overlap.is_finite() || overlap < 0.0 {
            result.add_error(format!(
                "Splice overlap for diameter {} mm is invalid ({})",
                diameter, overlap
            ));
        } else if overlap >= max_length {
            result.add_error(format!(
                "Splice overlap for diameter {} mm ({} m) is not shorter than the longest stock bar ({} m)",
                diameter, overlap, max_length
            ));
        }
    }

    for (&diameter, &weight) in &config.weights_per_meter {
        if !weight.is_finite() || weight < 0.0 {
            result.add_error(format!(
                "Weight per meter for diameter {} mm is invalid ({})",
                diameter, weight
            ));
        }
    }

    result
}

/// Validate a project and its settings.
pub fn validate_project(project: &Project) -> ValidationResult {
    let mut result = ValidationResult::ok();
    result.merge(validate_config(&project.config));

    if project.elements.is_empty() {
        result.add_warning(format!("Project '{}' has no elements", project.name));
    }

    let mut seen = HashSet::new();
    let mut unknown_diameters = HashSet::new();

    for (element_num, element) in project.elements.iter().enumerate() {
        let element_num = element_num + 1;

        if !seen.insert(element.id.as_str()) {
            result.add_error(format!(
                "Element {} ('{}'): duplicate id '{}'",
                element_num, element.name, element.id
            ));
        }

        let mut valid = 0usize;
        for (req_num, req) in element.requirements.iter().enumerate() {
            let req_num = req_num + 1;

            if !req.has_valid_fold_length() {
                result.add_warning(format!(
                    "Element {} ('{}'), requirement {}: invalid fold length ({} m), skipped",
                    element_num, element.name, req_num, req.fold_length
                ));
                continue;
            }

            if !req.is_valid() {
                result.add_warning(format!(
                    "Element {} ('{}'), requirement {}: non-positive length or quantity ({} m x {}), skipped",
                    element_num, element.name, req_num, req.length, req.quantity
                ));
                continue;
            }
            valid += 1;

            if req.fold_count > 2 {
                result.add_warning(format!(
                    "Element {} ('{}'), requirement {}: {} folds (expected 0, 1 or 2)",
                    element_num, element.name, req_num, req.fold_count
                ));
            }

            if !project.config.weights_per_meter.contains_key(&req.diameter)
                && unknown_diameters.insert(req.diameter)
            {
                result.add_warning(format!(
                    "Diameter {} mm has no weight per meter, its weight counts as 0",
                    req.diameter
                ));
            }
        }

        if valid == 0 {
            result.add_warning(format!(
                "Element {} ('{}'): no valid requirements",
                element_num, element.name
            ));
        }
    }

    result
}
