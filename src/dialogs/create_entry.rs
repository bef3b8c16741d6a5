//! "New folder" and "new file" dialogs.

use serde::{Deserialize, Serialize};

use super::{ButtonView, DialogAction, DialogView, SubmitTrigger};
use crate::helpers::{NameError, PATH_SEPARATORS, validate_entry_name};

const FOLDER_NAME_ERROR: &str = "Folder name cannot contain path separators";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateDirectoryState {
    pub name: String,
}

impl CreateDirectoryState {
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn is_valid(&self) -> bool {
        !self.name.is_empty() && !self.name.contains(PATH_SEPARATORS)
    }

    /// The field is flagged only once something invalid has been typed.
    pub fn show_error(&self) -> bool {
        !self.name.is_empty() && !self.is_valid()
    }

    /// Returns the directory name to create and clears the field.
    pub fn submit(&mut self, trigger: SubmitTrigger) -> Option<String> {
        if !self.is_valid() {
            log::debug!("Ignoring {trigger:?} on invalid directory name {:?}", self.name);
            return None;
        }
        Some(std::mem::take(&mut self.name))
    }

    pub fn render(&self) -> DialogView {
        DialogView {
            title: "New Folder".to_string(),
            lines: vec![format!("Name: {}", self.name)],
            error: self.show_error().then(|| FOLDER_NAME_ERROR.to_string()),
            buttons: vec![
                ButtonView::new("Cancel", DialogAction::Cancel),
                ButtonView::new("Create", DialogAction::Create).enabled(self.is_valid()),
            ],
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateFileState {
    pub name: String,
    pub content: String,
    pub error: Option<NameError>,
}

impl CreateFileState {
    /// Editing the name re-validates only while an error is showing.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        if self.error.is_some() {
            self.validate();
        }
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    fn validate(&mut self) -> bool {
        self.error = validate_entry_name(&self.name).err();
        self.error.is_none()
    }

    /// Validates and returns `(name, content)` for the file to create.
    pub fn submit(&mut self, trigger: SubmitTrigger) -> Option<(String, String)> {
        if !self.validate() {
            log::debug!("Rejected {trigger:?} for file name {:?}: {:?}", self.name, self.error);
            return None;
        }
        Some((self.name.clone(), self.content.clone()))
    }

    pub fn render(&self) -> DialogView {
        DialogView {
            title: "New File".to_string(),
            lines: vec![format!("Name: {}", self.name), self.content.clone()],
            error: self.error.map(|e| e.to_string()),
            buttons: vec![
                ButtonView::new("Cancel", DialogAction::Cancel),
                ButtonView::new("Create", DialogAction::Create)
                    .enabled(!self.name.trim().is_empty()),
            ],
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_submit_clears_field() {
        let mut state = CreateDirectoryState::default();
        state.set_name("photos");
        assert_eq!(state.submit(SubmitTrigger::Shortcut), Some("photos".to_string()));
        assert!(state.name.is_empty());
    }

    #[test]
    fn directory_error_only_for_typed_input() {
        let mut state = CreateDirectoryState::default();
        assert!(!state.show_error());
        assert!(!state.render().button(DialogAction::Create).unwrap().enabled);

        state.set_name("a/b");
        assert!(state.show_error());
        assert_eq!(state.submit(SubmitTrigger::Confirm), None);
        assert_eq!(state.name, "a/b");
        assert_eq!(state.render().error.as_deref(), Some(FOLDER_NAME_ERROR));
    }

    #[test]
    fn blank_directory_name_is_accepted_as_typed() {
        let mut state = CreateDirectoryState::default();
        state.set_name("   ");
        assert!(state.is_valid());
        assert_eq!(state.render().error, None);
        assert!(state.render().button(DialogAction::Create).unwrap().enabled);
        assert_eq!(state.submit(SubmitTrigger::Confirm), Some("   ".to_string()));
    }

    #[test]
    fn file_error_tracks_edits_after_failed_submit() {
        let mut state = CreateFileState::default();
        state.set_name("bad\\name");
        // No error until the user tries to submit
        assert_eq!(state.error, None);

        assert_eq!(state.submit(SubmitTrigger::Confirm), None);
        assert_eq!(state.error, Some(NameError::PathSeparator));

        state.set_name("good.txt");
        assert_eq!(state.error, None);

        state.set_content("hello");
        assert_eq!(
            state.submit(SubmitTrigger::Shortcut),
            Some(("good.txt".to_string(), "hello".to_string()))
        );
    }

    #[test]
    fn blank_file_name_disables_create() {
        let mut state = CreateFileState::default();
        state.set_name("   ");
        assert!(!state.render().button(DialogAction::Create).unwrap().enabled);
        assert_eq!(state.submit(SubmitTrigger::Confirm), None);
        assert_eq!(state.render().error.as_deref(), Some("File name cannot be empty"));
    }
}
