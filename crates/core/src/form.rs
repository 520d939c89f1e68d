//! Multipart field layout of an upload.
//!
//! [`upload_fields`] flattens an [`UploadRequest`] into an ordered list of
//! [`FormField`] descriptors. The HTTP layer turns that list into a body
//! without reordering, so the list order is the wire order.

use std::path::{Path, PathBuf};

use crate::types::UploadRequest;

pub const FILE_FIELD: &str = "file";
pub const TOKEN_FIELD: &str = "token";
pub const PASSWORD_FIELD: &str = "password";
pub const COMMENT_FIELD: &str = "comment";
pub const CALLBACK_URL_FIELD: &str = "callback_url";
pub const CALLBACK_EMAILS_FIELD: &str = "callback_emails";
pub const FIND_BY_UDID_FIELD: &str = "find_by_udid";
pub const WALL_OF_APPS_FIELD: &str = "wall_of_apps";
pub const INSTALLATION_NOTIFICATIONS_FIELD: &str = "installation_notifications";

/// Separator used when a list is sent as a single text field.
pub const LIST_SEPARATOR: &str = ",";

/// Value carried by one multipart field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Binary payload streamed from disk.
    File { path: PathBuf, file_name: String },
    Text(String),
    List(Vec<String>),
    Bool(bool),
}

impl FieldValue {
    /// Text encoding of a scalar value, `None` for file parts.
    pub fn as_text(&self) -> Option<String> {
        match self {
            FieldValue::File { .. } => None,
            FieldValue::Text(text) => Some(text.clone()),
            FieldValue::List(items) => Some(items.join(LIST_SEPARATOR)),
            FieldValue::Bool(flag) => Some(if *flag { "1" } else { "0" }.to_string()),
        }
    }
}

/// One named part of the upload body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub name: &'static str,
    pub value: FieldValue,
}

impl FormField {
    fn new(name: &'static str, value: FieldValue) -> Self {
        Self { name, value }
    }
}

/// Base name of `path`, falling back to the whole path when it has none.
pub fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Ordered field list for `req`.
///
/// File and token always come first. Optional text fields are present only
/// when non-empty; the three flags are always sent.
pub fn upload_fields(req: &UploadRequest) -> Vec<FormField> {
    let mut fields = vec![
        FormField::new(
            FILE_FIELD,
            FieldValue::File {
                path: req.file_path.clone(),
                file_name: file_name_of(&req.file_path),
            },
        ),
        FormField::new(TOKEN_FIELD, FieldValue::Text(req.auth_token.clone())),
    ];

    let optional_text = [
        (PASSWORD_FIELD, &req.password),
        (COMMENT_FIELD, &req.comment),
        (CALLBACK_URL_FIELD, &req.callback_url),
    ];
    for (name, value) in optional_text {
        if let Some(text) = value.as_deref().filter(|t| !t.is_empty()) {
            fields.push(FormField::new(name, FieldValue::Text(text.to_string())));
        }
    }

    if !req.callback_emails.is_empty() {
        fields.push(FormField::new(
            CALLBACK_EMAILS_FIELD,
            FieldValue::List(req.callback_emails.clone()),
        ));
    }

    fields.push(FormField::new(FIND_BY_UDID_FIELD, FieldValue::Bool(req.find_by_udid)));
    fields.push(FormField::new(WALL_OF_APPS_FIELD, FieldValue::Bool(req.wall_of_apps)));
    fields.push(FormField::new(
        INSTALLATION_NOTIFICATIONS_FIELD,
        FieldValue::Bool(req.installation_notifications),
    ));

    fields
}
