//! Project and result files (JSON).

use std::fs;
use std::path::Path;

use crate::error::{OptimizeError, Result};
use crate::project::{Project, ProjectResult};

/// Load a project file.
pub fn load_project(path: &Path) -> Result<Project> {
    if !path.exists() {
        return Err(OptimizeError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Err(OptimizeError::EmptyFile {
            path: path.to_path_buf(),
        });
    }

    parse_project(&content)
}

/// Parse a project from JSON text.
pub fn parse_project(content: &str) -> Result<Project> {
    let project: Project = serde_json::from_str(content)?;
    tracing::debug!(
        "Loaded project '{}' with {} element(s)",
        project.name,
        project.elements.len()
    );
    Ok(project)
}

/// Serialize a project result as pretty JSON.
pub fn result_to_json(result: &ProjectResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

/// Write a project result file.
pub fn save_result(path: &Path, result: &ProjectResult) -> Result<()> {
    fs::write(path, result_to_json(result)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const PROJECT: &str = r#"{
        "name": "Garage",
        "config": { "stock_lengths": [6, 12] },
        "elements": [
            {
                "id": "f1",
                "name": "Footing",
                "requirements": [
                    { "id": "r1", "length": 1.8, "diameter": 12, "quantity": 6, "fold_count": 2 }
                ]
            }
        ]
    }"#;

    #[test]
    fn test_parse_project_defaults() {
        let project = parse_project(PROJECT).unwrap();
        assert_eq!(project.name, "Garage");
        assert!(project.reuse_leftovers);
        assert_eq!(project.config.stock_lengths, vec![6.0, 12.0]);
        assert_eq!(project.elements[0].requirements[0].effective_length(), 2.1);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_project(Path::new("/nonexistent/project.json")).unwrap_err();
        assert!(matches!(err, OptimizeError::FileNotFound { .. }));
    }

    #[test]
    fn test_load_empty_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "   ").unwrap();
        let err = load_project(file.path()).unwrap_err();
        assert!(matches!(err, OptimizeError::EmptyFile { .. }));
    }

    #[test]
    fn test_load_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ \"name\": ").unwrap();
        let err = load_project(file.path()).unwrap_err();
        assert!(matches!(err, OptimizeError::Json(_)));
    }

    #[test]
    fn test_save_and_reload_result() {
        let project = parse_project(PROJECT).unwrap();
        let result = project.recompute_all().unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garage.plan.json");
        save_result(&path, &result).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        let reloaded: ProjectResult = serde_json::from_str(&written).unwrap();
        assert_eq!(reloaded, result);
    }
}
