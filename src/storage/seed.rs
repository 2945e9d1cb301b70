//! Initial gallery catalogue
//!
//! A fresh install shows these images until an operator curates the gallery.

use chrono::{TimeZone, Utc};

use crate::storage::error::StorageResult;
use crate::storage::store::ClinicStore;
use crate::storage::types::{GalleryImage, ImageCategory};

const DEFAULT_IMAGES: &[(&str, &str, &str, ImageCategory)] = &[
    (
        "1",
        "https://images.unsplash.com/photo-1629909613654-28e377c37b09?w=800&q=80",
        "Modern Dental Clinic",
        ImageCategory::Clinic,
    ),
    (
        "2",
        "https://images.unsplash.com/photo-1588776814546-1ffcf47267a5?w=800&q=80",
        "State-of-the-Art Equipment",
        ImageCategory::Equipment,
    ),
    (
        "3",
        "https://images.unsplash.com/photo-1606811971618-4486d14f3f99?w=800&q=80",
        "Comfortable Treatment Room",
        ImageCategory::Clinic,
    ),
    (
        "4",
        "https://images.unsplash.com/photo-1598256989800-fe5f95da9787?w=800&q=80",
        "Professional Dental Team",
        ImageCategory::Team,
    ),
    (
        "5",
        "https://images.unsplash.com/photo-1609840112855-9ab5ad8f66e4?w=800&q=80",
        "Advanced Dental Technology",
        ImageCategory::Equipment,
    ),
    (
        "6",
        "https://images.unsplash.com/photo-1588776814546-daab30f310ce?w=800&q=80",
        "Happy Patient Care",
        ImageCategory::Patients,
    ),
];

/// The default gallery, dated one day apart from 2024-01-01
pub fn default_gallery() -> Vec<GalleryImage> {
    DEFAULT_IMAGES
        .iter()
        .enumerate()
        .map(|(day, (id, url, title, category))| GalleryImage {
            id: id.to_string(),
            url: url.to_string(),
            title: title.to_string(),
            category: *category,
            created_at: Utc
                .with_ymd_and_hms(2024, 1, 1 + day as u32, 0, 0, 0)
                .single()
                .unwrap_or_else(Utc::now),
        })
        .collect()
}

/// Seed the default gallery into an empty store
///
/// Returns the number of images inserted (zero if the gallery already had images).
pub fn seed_gallery(store: &ClinicStore) -> StorageResult<usize> {
    let inserted = store.seed_gallery_images(&default_gallery())?;

    if inserted > 0 {
        tracing::info!(count = inserted, "Seeded default gallery images");
    } else {
        tracing::info!("Gallery already has images, skipping seed");
    }

    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_gallery_covers_every_category() {
        let gallery = default_gallery();

        assert_eq!(gallery.len(), 6);
        for category in ImageCategory::all() {
            assert!(gallery.iter().any(|image| image.category == *category));
        }
        assert!(gallery.windows(2).all(|w| w[0].created_at < w[1].created_at));
    }

    #[test]
    fn test_seed_gallery_is_idempotent() {
        let store = ClinicStore::in_memory().unwrap();

        assert_eq!(seed_gallery(&store).unwrap(), 6);
        assert_eq!(seed_gallery(&store).unwrap(), 0);

        let titles: Vec<String> = store
            .list_gallery_images()
            .unwrap()
            .into_iter()
            .map(|image| image.title)
            .collect();
        assert_eq!(titles.first().map(String::as_str), Some("Modern Dental Clinic"));
        assert_eq!(titles.last().map(String::as_str), Some("Happy Patient Care"));
    }
}
