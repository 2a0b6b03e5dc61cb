//! Helpers for the jQuery-style forms the admin pages submit.

use std::collections::HashMap;

use axum::extract::Multipart;
use serde::Deserialize;
use utoipa::IntoParams;

use super::ApiError;
use crate::domain::ImageUpload;
use crate::shared::Page;

/// `?current=` page selector. Kept as text so bad input falls back to page 1
/// instead of failing extraction.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    pub current: Option<String>,
}

impl PageQuery {
    pub fn page(&self) -> u64 {
        Page::parse_current(self.current.as_deref())
    }
}

/// Non-blank values submitted under `key`, accepting both `key[]` and `key`.
pub fn selected_values(pairs: &[(String, String)], key: &str) -> Vec<String> {
    let bracketed = format!("{}[]", key);
    pairs
        .iter()
        .filter(|(k, _)| k == key || *k == bracketed)
        .map(|(_, v)| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

/// A fully buffered multipart form: text fields and uploaded files by name.
#[derive(Debug, Default)]
pub struct UploadForm {
    fields: HashMap<String, String>,
    files: HashMap<String, ImageUpload>,
}

impl UploadForm {
    pub async fn read(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let bytes = field.bytes().await?;
                    // browsers send an empty part when no file was chosen
                    if !bytes.is_empty() {
                        form.files.insert(name, ImageUpload::new(file_name, bytes.to_vec()));
                    }
                }
                None => {
                    form.fields.insert(name, field.text().await?);
                }
            }
        }

        Ok(form)
    }

    pub fn text(&self, name: &str) -> &str {
        self.fields.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn take_file(&mut self, name: &str) -> Option<ImageUpload> {
        self.files.remove(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn selected_values_accept_bracketed_keys() {
        let form = pairs(&[("list[]", "1"), ("other", "9"), ("list", " 2 "), ("list[]", "")]);
        assert_eq!(selected_values(&form, "list"), vec!["1", "2"]);
    }

    #[test]
    fn missing_key_selects_nothing() {
        assert!(selected_values(&pairs(&[("x", "1")]), "list").is_empty());
    }
}
