//! Text editor dialog with a selectable character encoding.

use encoding_rs::{Encoding, UTF_16BE, UTF_16LE};
use serde::{Deserialize, Serialize};

use super::{ButtonView, DialogAction, DialogView, SubmitTrigger};
use crate::error::{Error, Result};

/// Encodings offered in the encoding menu, most common first.
pub const COMMON_ENCODINGS: &[&str] = &[
    "UTF-8",
    "GBK",
    "GB18030",
    "GB2312",
    "UTF-16",
    "ISO-8859-1",
    "BIG5",
    "Shift-JIS",
    "EUC-JP",
    "EUC-KR",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEditState {
    pub file_name: String,
    pub initial_content: String,
    pub content: String,
    pub encoding: String,
    pub encoding_menu_open: bool,
}

impl FileEditState {
    pub fn new(
        file_name: impl Into<String>,
        content: impl Into<String>,
        encoding: impl Into<String>,
    ) -> Self {
        let content = content.into();
        Self {
            file_name: file_name.into(),
            initial_content: content.clone(),
            content,
            encoding: encoding.into(),
            encoding_menu_open: false,
        }
    }

    /// Open a file's raw bytes in the given encoding.
    pub fn open(file_name: impl Into<String>, bytes: &[u8], encoding: &str) -> Result<Self> {
        let content = decode(bytes, encoding)?;
        Ok(Self::new(file_name, content, encoding))
    }

    pub fn has_changes(&self) -> bool {
        self.content != self.initial_content
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    pub fn toggle_encoding_menu(&mut self) {
        self.encoding_menu_open = !self.encoding_menu_open;
    }

    /// Switch encoding; the caller reloads the file with [`decode`].
    pub fn select_encoding(&mut self, label: &str) -> Result<()> {
        resolve(label)?;
        self.encoding = label.to_string();
        self.encoding_menu_open = false;
        Ok(())
    }

    /// Current content encoded for writing back to disk.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let encoding = resolve(&self.encoding)?;
        // encoding_rs never encodes to UTF-16, so do it by hand
        if encoding == UTF_16LE {
            return Ok(self.content.encode_utf16().flat_map(u16::to_le_bytes).collect());
        }
        if encoding == UTF_16BE {
            return Ok(self.content.encode_utf16().flat_map(u16::to_be_bytes).collect());
        }
        let (bytes, _, had_unmappable) = encoding.encode(&self.content);
        if had_unmappable {
            log::warn!("Some characters in {} are not representable in {}", self.file_name, self.encoding);
        }
        Ok(bytes.into_owned())
    }

    /// Content to save.
    pub fn submit(&mut self, trigger: SubmitTrigger) -> Option<String> {
        log::debug!("Saving {} ({trigger:?})", self.file_name);
        self.encoding_menu_open = false;
        Some(self.content.clone())
    }

    pub fn render(&self) -> DialogView {
        let title = if self.has_changes() {
            format!("{} (modified)", self.file_name)
        } else {
            self.file_name.clone()
        };
        let options = if self.encoding_menu_open {
            COMMON_ENCODINGS.iter().map(|e| e.to_string()).collect()
        } else {
            Vec::new()
        };
        DialogView {
            title,
            lines: vec![format!("Encoding: {}", self.encoding), self.content.clone()],
            options,
            buttons: vec![
                ButtonView::new(self.encoding.clone(), DialogAction::ToggleEncodingMenu),
                ButtonView::new("Cancel", DialogAction::Cancel),
                ButtonView::new("Save", DialogAction::Save),
            ],
            ..Default::default()
        }
    }
}

fn resolve(label: &str) -> Result<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| Error::UnsupportedEncoding(label.to_string()))
}

/// Decode file bytes with the named encoding, honouring a byte order mark.
pub fn decode(bytes: &[u8], label: &str) -> Result<String> {
    let (text, _, had_errors) = resolve(label)?.decode(bytes);
    if had_errors {
        log::debug!("Malformed input while decoding as {label}");
    }
    Ok(text.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_offered_encoding_resolves() {
        for label in COMMON_ENCODINGS {
            assert!(resolve(label).is_ok(), "{label} should be supported");
        }
    }

    #[test]
    fn tracks_changes_against_initial_content() {
        let mut state = FileEditState::new("a.txt", "hello", "UTF-8");
        assert!(!state.has_changes());
        state.set_content("hello world");
        assert!(state.has_changes());
        assert!(state.render().title.ends_with("(modified)"));
        state.set_content("hello");
        assert!(!state.has_changes());
    }

    #[test]
    fn gbk_round_trip() {
        let mut state = FileEditState::new("cn.txt", "", "GBK");
        state.set_content("新版本");
        let bytes = state.encode().unwrap();
        assert_eq!(bytes, vec![0xD0, 0xC2, 0xB0, 0xE6, 0xB1, 0xBE]);
        assert_eq!(decode(&bytes, "GBK").unwrap(), "新版本");
    }

    #[test]
    fn utf16_is_written_little_endian() {
        let state = FileEditState::new("w.txt", "hi", "UTF-16");
        assert_eq!(state.encode().unwrap(), vec![b'h', 0, b'i', 0]);
    }

    #[test]
    fn unknown_encoding_is_rejected() {
        let mut state = FileEditState::new("a.txt", "", "UTF-8");
        state.toggle_encoding_menu();
        assert_eq!(state.render().options.len(), COMMON_ENCODINGS.len());

        assert!(matches!(state.select_encoding("KLINGON-8"), Err(Error::UnsupportedEncoding(_))));
        assert_eq!(state.encoding, "UTF-8");
        assert!(state.encoding_menu_open);

        state.select_encoding("Shift-JIS").unwrap();
        assert_eq!(state.encoding, "Shift-JIS");
        assert!(!state.encoding_menu_open);
    }
}
