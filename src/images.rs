//! Image Selection Model
//!
//! Bounded list of selected images with a single primary flag and the AI suggestion
//! derived from the first image. Generic over the file handle so it stays DOM-free.

use thiserror::Error;

use crate::models::AnalysisResult;

#[cfg(test)]
#[path = "images_test.rs"]
mod images_test;

pub const MAX_IMAGES: usize = 5;
pub const MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("Only image files are allowed")]
    NotAnImage,
    #[error("File size must be less than 5MB")]
    TooLarge,
    #[error("Maximum {} images allowed", MAX_IMAGES)]
    TooMany,
}

/// Type/size check shared with the profile picture upload
pub fn validate_file(mime: &str, size: u64) -> Result<(), UploadError> {
    if !mime.starts_with("image/") {
        return Err(UploadError::NotAnImage);
    }
    if size > MAX_FILE_SIZE {
        return Err(UploadError::TooLarge);
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
pub struct FileMeta {
    pub name: String,
    pub mime: String,
    pub size: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectedImage<F> {
    pub id: u64,
    pub file: F,
    pub meta: FileMeta,
    /// Data URL once the reader finishes
    pub preview: Option<String>,
    pub is_primary: bool,
    pub analysis: Option<AnalysisResult>,
}

/// Identifies one analysis request; results for removed images are discarded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisTicket {
    pub image_id: u64,
}

/// Result of adding a batch
#[derive(Debug, Clone, PartialEq)]
pub struct AddedBatch {
    pub ids: Vec<u64>,
    /// Set when the batch started an empty list: analyze this image
    pub analyze: Option<AnalysisTicket>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageSet<F> {
    images: Vec<SelectedImage<F>>,
    next_id: u64,
    suggestion: Option<AnalysisResult>,
    analyzed_id: Option<u64>,
    pending: Option<u64>,
    error: Option<String>,
}

impl<F> Default for ImageSet<F> {
    fn default() -> Self {
        Self {
            images: Vec::new(),
            next_id: 1,
            suggestion: None,
            analyzed_id: None,
            pending: None,
            error: None,
        }
    }
}

impl<F> ImageSet<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn images(&self) -> &[SelectedImage<F>] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.images.len() >= MAX_IMAGES
    }

    pub fn suggestion(&self) -> Option<&AnalysisResult> {
        self.suggestion.as_ref()
    }

    pub fn is_analyzing(&self) -> bool {
        self.pending.is_some()
    }

    /// Inline error from the last add
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Add files; invalid ones are skipped, a batch overflowing the limit is rejected whole
    pub fn add_batch(&mut self, files: Vec<(F, FileMeta)>) -> Result<AddedBatch, UploadError> {
        self.error = None;
        let mut first_invalid = None;
        let valid: Vec<(F, FileMeta)> = files
            .into_iter()
            .filter(|(_, meta)| match validate_file(&meta.mime, meta.size) {
                Ok(()) => true,
                Err(e) => {
                    first_invalid.get_or_insert(e);
                    false
                }
            })
            .collect();

        if self.images.len() + valid.len() > MAX_IMAGES {
            self.error = Some(UploadError::TooMany.to_string());
            return Err(UploadError::TooMany);
        }
        if let Some(e) = first_invalid {
            self.error = Some(e.to_string());
        }

        let was_empty = self.images.is_empty();
        let mut ids = Vec::with_capacity(valid.len());
        for (file, meta) in valid {
            let id = self.next_id;
            self.next_id += 1;
            self.images.push(SelectedImage {
                id,
                file,
                meta,
                preview: None,
                is_primary: self.images.is_empty(),
                analysis: None,
            });
            ids.push(id);
        }

        let analyze = if was_empty {
            ids.first().map(|&image_id| AnalysisTicket { image_id })
        } else {
            None
        };
        if let Some(ticket) = analyze {
            self.pending = Some(ticket.image_id);
        }
        Ok(AddedBatch { ids, analyze })
    }

    pub fn set_preview(&mut self, id: u64, data_url: String) {
        if let Some(img) = self.images.iter_mut().find(|img| img.id == id) {
            img.preview = Some(data_url);
        }
    }

    /// Store an analysis result; returns the accepted suggestion, `None` when stale or failed
    pub fn finish_analysis(
        &mut self,
        ticket: AnalysisTicket,
        outcome: Result<AnalysisResult, String>,
    ) -> Option<&AnalysisResult> {
        if self.pending != Some(ticket.image_id) {
            return None;
        }
        self.pending = None;
        let result = outcome.ok()?;
        let img = self.images.iter_mut().find(|img| img.id == ticket.image_id)?;
        img.analysis = Some(result.clone());
        self.analyzed_id = Some(ticket.image_id);
        self.suggestion = Some(result);
        self.suggestion.as_ref()
    }

    /// Remove by position; the new first image inherits primary if needed
    pub fn remove(&mut self, index: usize) -> Option<SelectedImage<F>> {
        if index >= self.images.len() {
            return None;
        }
        let removed = self.images.remove(index);
        if removed.is_primary {
            if let Some(first) = self.images.first_mut() {
                first.is_primary = true;
            }
        }
        if self.pending == Some(removed.id) {
            self.pending = None;
        }
        if self.analyzed_id == Some(removed.id) || self.images.is_empty() {
            self.suggestion = None;
            self.analyzed_id = None;
        }
        self.error = None;
        Some(removed)
    }

    /// Make exactly one image primary
    pub fn set_primary(&mut self, index: usize) {
        if index >= self.images.len() {
            return;
        }
        for (i, img) in self.images.iter_mut().enumerate() {
            img.is_primary = i == index;
        }
    }

    pub fn primary_index(&self) -> Option<usize> {
        self.images.iter().position(|img| img.is_primary)
    }

    /// Files in upload order: primary first, the rest in selection order
    pub fn submit_order(&self) -> Vec<&F> {
        let primary = self.primary_index().unwrap_or(0);
        self.images
            .get(primary)
            .into_iter()
            .chain(
                self.images
                    .iter()
                    .enumerate()
                    .filter(move |(i, _)| *i != primary)
                    .map(|(_, img)| img),
            )
            .map(|img| &img.file)
            .collect()
    }
}
