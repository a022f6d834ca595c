use crate::model::SourceApplication;

/// Keep an application only when it carries a non-empty cross-reference block.
///
/// Applications openFDA does not cross-reference have no generic names or
/// NDCs to aggregate on, so neither pipeline looks at them.
pub fn has_cross_reference(application: &SourceApplication) -> bool {
    application
        .openfda
        .as_ref()
        .is_some_and(|xref| !xref.is_empty())
}
