//! Avatar training photo collection.
//!
//! Tracks the set of photos a user has captured or uploaded for persona
//! training, the count-driven collection state, and the acceptance rules
//! for adding photos. Photos are immutable after creation; the only
//! mutations are add and remove.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;
use crate::photo_quality::PhotoQuality;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Minimum photos before persona training can be triggered.
pub const MIN_PHOTOS: usize = 5;
/// Recommended photo count for best training results.
pub const RECOMMENDED_PHOTOS: usize = 10;
/// Hard cap on photos in one session.
pub const MAX_PHOTOS: usize = 20;

/// Maximum accepted photo size: 10 MB.
pub const MAX_PHOTO_BYTES: u64 = 10 * 1024 * 1024;

/// Minimum successful storage uploads for training to proceed, even when
/// the original selection had more photos.
pub const TRAINING_SUCCESS_FLOOR: usize = 5;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// How a photo entered the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhotoSource {
    Captured,
    Uploaded,
}

/// Optional file metadata recorded at ingestion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PhotoMetadata {
    pub file_name: Option<String>,
    pub file_size: Option<u64>,
    pub timestamp: Option<Timestamp>,
}

/// One avatar training photo. Immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvatarPhoto {
    pub id: Uuid,
    /// Data or object URL of the photo contents.
    pub url: String,
    pub source: PhotoSource,
    /// Advisory quality score, computed once at ingestion.
    pub quality: PhotoQuality,
    #[serde(default)]
    pub metadata: Option<PhotoMetadata>,
}

impl AvatarPhoto {
    pub fn new(url: impl Into<String>, source: PhotoSource, quality: PhotoQuality) -> Self {
        Self {
            id: Uuid::new_v4(),
            url: url.into(),
            source,
            quality,
            metadata: None,
        }
    }
}

/// Count-driven state of a photo collection.
///
/// `Empty -> Collecting -> Ready -> Optimal -> Full`, driven purely by
/// add/remove; removing photos walks the states back down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionState {
    Empty,
    Collecting,
    Ready,
    Optimal,
    Full,
}

/// Derive the collection state from a photo count.
pub fn collection_state(count: usize) -> CollectionState {
    if count == 0 {
        CollectionState::Empty
    } else if count >= MAX_PHOTOS {
        CollectionState::Full
    } else if count >= RECOMMENDED_PHOTOS {
        CollectionState::Optimal
    } else if count >= MIN_PHOTOS {
        CollectionState::Ready
    } else {
        CollectionState::Collecting
    }
}

// ---------------------------------------------------------------------------
// Acceptance rules
// ---------------------------------------------------------------------------

/// Check that a file is acceptable as an avatar photo.
pub fn validate_photo_file(content_type: &str, size_bytes: u64) -> Result<(), CoreError> {
    if !content_type.starts_with("image/") {
        return Err(CoreError::Validation(format!(
            "'{content_type}' is not an image type"
        )));
    }
    if size_bytes > MAX_PHOTO_BYTES {
        return Err(CoreError::Validation(format!(
            "Photo is too large ({size_bytes} bytes). Maximum is {MAX_PHOTO_BYTES} bytes (10 MB)"
        )));
    }
    Ok(())
}

/// Enforce the success floor after batch-uploading photos to storage.
///
/// Individual upload failures are tolerated; fewer than
/// [`TRAINING_SUCCESS_FLOOR`] successes fails the whole operation.
pub fn check_training_floor(successes: usize, attempted: usize) -> Result<(), CoreError> {
    if successes < TRAINING_SUCCESS_FLOOR {
        return Err(CoreError::Validation(format!(
            "Insufficient photos: only {successes} of {attempted} uploaded successfully \
             (need at least {TRAINING_SUCCESS_FLOOR})"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Collection
// ---------------------------------------------------------------------------

/// The photos gathered in one avatar training session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PhotoCollection {
    photos: Vec<AvatarPhoto>,
}

impl PhotoCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn photos(&self) -> &[AvatarPhoto] {
        &self.photos
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    pub fn state(&self) -> CollectionState {
        collection_state(self.photos.len())
    }

    /// Training is enabled from `Ready` upward.
    pub fn can_start_training(&self) -> bool {
        self.photos.len() >= MIN_PHOTOS
    }

    /// Add a photo after checking file acceptance and the session cap.
    ///
    /// Rejections are ordinary validation errors for the UI to surface as
    /// a toast; the collection is left untouched.
    pub fn add(
        &mut self,
        photo: AvatarPhoto,
        content_type: &str,
        size_bytes: u64,
    ) -> Result<CollectionState, CoreError> {
        if self.photos.len() >= MAX_PHOTOS {
            return Err(CoreError::Validation(format!(
                "Photo limit reached (max {MAX_PHOTOS})"
            )));
        }
        validate_photo_file(content_type, size_bytes)?;
        self.photos.push(photo);
        Ok(self.state())
    }

    /// Remove a photo by ID. Returns the removed photo if present.
    pub fn remove(&mut self, id: Uuid) -> Option<AvatarPhoto> {
        let index = self.photos.iter().position(|p| p.id == id)?;
        Some(self.photos.remove(index))
    }

    /// Remove every photo.
    pub fn clear(&mut self) {
        self.photos.clear();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn photo() -> AvatarPhoto {
        AvatarPhoto::new("blob:photo", PhotoSource::Captured, PhotoQuality::neutral())
    }

    fn collection_with(count: usize) -> PhotoCollection {
        let mut collection = PhotoCollection::new();
        for _ in 0..count {
            collection.add(photo(), "image/jpeg", 1024).unwrap();
        }
        collection
    }

    // -- collection_state -----------------------------------------------------

    #[test]
    fn state_thresholds() {
        assert_eq!(collection_state(0), CollectionState::Empty);
        assert_eq!(collection_state(1), CollectionState::Collecting);
        assert_eq!(collection_state(4), CollectionState::Collecting);
        assert_eq!(collection_state(5), CollectionState::Ready);
        assert_eq!(collection_state(9), CollectionState::Ready);
        assert_eq!(collection_state(10), CollectionState::Optimal);
        assert_eq!(collection_state(19), CollectionState::Optimal);
        assert_eq!(collection_state(20), CollectionState::Full);
    }

    #[test]
    fn removing_walks_states_back_down() {
        let mut collection = collection_with(10);
        assert_eq!(collection.state(), CollectionState::Optimal);

        let id = collection.photos()[0].id;
        collection.remove(id).unwrap();
        assert_eq!(collection.state(), CollectionState::Ready);

        while collection.len() > 4 {
            let id = collection.photos()[0].id;
            collection.remove(id);
        }
        assert_eq!(collection.state(), CollectionState::Collecting);

        collection.clear();
        assert_eq!(collection.state(), CollectionState::Empty);
    }

    // -- add ------------------------------------------------------------------

    #[test]
    fn add_rejected_when_full() {
        let mut collection = collection_with(MAX_PHOTOS);
        assert_eq!(collection.state(), CollectionState::Full);

        let result = collection.add(photo(), "image/jpeg", 1024);
        assert!(result.is_err());
        assert_eq!(collection.len(), MAX_PHOTOS);
    }

    #[test]
    fn add_rejects_non_image() {
        let mut collection = PhotoCollection::new();
        let result = collection.add(photo(), "video/mp4", 1024);
        assert!(result.is_err());
        assert!(collection.is_empty());
    }

    #[test]
    fn add_rejects_oversized_photo() {
        let mut collection = PhotoCollection::new();
        let result = collection.add(photo(), "image/png", MAX_PHOTO_BYTES + 1);
        assert!(result.is_err());
        assert!(collection.is_empty());
    }

    #[test]
    fn add_reports_new_state() {
        let mut collection = collection_with(4);
        let state = collection.add(photo(), "image/jpeg", 1024).unwrap();
        assert_eq!(state, CollectionState::Ready);
    }

    // -- remove ---------------------------------------------------------------

    #[test]
    fn remove_unknown_id_is_none() {
        let mut collection = collection_with(2);
        assert!(collection.remove(Uuid::new_v4()).is_none());
        assert_eq!(collection.len(), 2);
    }

    #[test]
    fn readding_same_bytes_gets_new_id() {
        let a = photo();
        let b = photo();
        assert_ne!(a.id, b.id);
    }

    // -- training gates -------------------------------------------------------

    #[test]
    fn training_enabled_at_min() {
        assert!(!collection_with(4).can_start_training());
        assert!(collection_with(5).can_start_training());
        assert!(collection_with(20).can_start_training());
    }

    #[test]
    fn floor_of_five_successes_proceeds() {
        assert!(check_training_floor(5, 10).is_ok());
        assert!(check_training_floor(10, 10).is_ok());
    }

    #[test]
    fn four_successes_fails() {
        let result = check_training_floor(4, 10);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Insufficient photos"));
    }

    // -- validate_photo_file --------------------------------------------------

    #[test]
    fn image_types_accepted() {
        for ct in ["image/jpeg", "image/png", "image/webp"] {
            assert!(validate_photo_file(ct, 1024).is_ok(), "{ct}");
        }
    }

    #[test]
    fn exactly_ten_mb_accepted() {
        assert!(validate_photo_file("image/jpeg", MAX_PHOTO_BYTES).is_ok());
    }
}
