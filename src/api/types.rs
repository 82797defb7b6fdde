//! Form payloads accepted by the handlers.

use serde::Deserialize;

/// Body of the create and rename list forms.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListNameForm {
    /// Requested list name. Absent on rename means "keep current name".
    #[serde(default)]
    pub list_name: Option<String>,
}

/// Body of the add item form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TodoForm {
    #[serde(default)]
    pub todo: String,
}
