use camlog_host::ObjectRef;
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;
use thiserror::Error;

static PROJECT_ID_REGEX: OnceLock<Regex> = OnceLock::new();

fn project_id_regex() -> &'static Regex {
    PROJECT_ID_REGEX.get_or_init(|| Regex::new("DM-.*-.{6}").expect("invalid project id regex"))
}

#[derive(Error, Debug)]
pub enum DirectiveError {
    #[error("save location {0:?} does not contain a DM-XXX00-000000 project id")]
    MissingProjectId(String),
    #[error("first selected object has no name to build a filename from")]
    UnnamedObject,
}

/// Naming directive for one export, derived from the save location path.
///
/// Jobs live in folders carrying the project id schema (e.g.
/// `DM-GDN03-220001`); the exported file is named after the project id and
/// the first selected object.
#[derive(Clone, Debug, PartialEq)]
pub struct Directive {
    project_id: String,
}

impl Directive {
    pub fn from_save_location(location: &Path) -> Result<Self, DirectiveError> {
        let text = location.to_string_lossy();
        let found = project_id_regex()
            .find(&text)
            .ok_or_else(|| DirectiveError::MissingProjectId(text.to_string()))?;
        Ok(Self {
            project_id: found.as_str().to_string(),
        })
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// Export filename: `{project_id}_{object name}.stp`.
    pub fn filename_for(&self, object: &ObjectRef) -> Result<String, DirectiveError> {
        let name = object
            .name
            .as_deref()
            .filter(|name| !name.is_empty())
            .ok_or(DirectiveError::UnnamedObject)?;
        Ok(format!("{}_{name}.stp", self.project_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camlog_base::Guid;
    use std::path::PathBuf;

    fn object(name: Option<&str>) -> ObjectRef {
        ObjectRef {
            guid: Guid::new(),
            name: name.map(str::to_string),
        }
    }

    #[test]
    fn project_id_is_read_from_the_save_location() {
        let directive =
            Directive::from_save_location(&PathBuf::from("/jobs/Ciena/DM-GDN03-220001")).unwrap();
        assert_eq!(directive.project_id(), "DM-GDN03-220001");
    }

    #[test]
    fn paths_without_the_schema_are_rejected() {
        let err = Directive::from_save_location(&PathBuf::from("/jobs/Ciena/CAM")).unwrap_err();
        assert!(matches!(err, DirectiveError::MissingProjectId(_)));
    }

    #[test]
    fn filename_joins_project_id_and_object_name() {
        let directive =
            Directive::from_save_location(&PathBuf::from("/jobs/DM-GDN03-220001")).unwrap();
        assert_eq!(
            directive.filename_for(&object(Some("side_panel"))).unwrap(),
            "DM-GDN03-220001_side_panel.stp"
        );
    }

    #[test]
    fn unnamed_objects_cannot_derive_a_filename() {
        let directive =
            Directive::from_save_location(&PathBuf::from("/jobs/DM-GDN03-220001")).unwrap();
        assert!(matches!(
            directive.filename_for(&object(None)),
            Err(DirectiveError::UnnamedObject)
        ));
        assert!(matches!(
            directive.filename_for(&object(Some(""))),
            Err(DirectiveError::UnnamedObject)
        ));
    }
}
