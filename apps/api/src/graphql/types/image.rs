//! GraphQL image types

use async_graphql::SimpleObject;

use crate::models;

/// One rendition of an image at a particular size
#[derive(Debug, Clone, SimpleObject)]
pub struct ImageView {
    /// Public URL of this rendition
    pub url: String,
    /// Pixel width, if known
    pub width: Option<i32>,
    /// Pixel height, if known
    pub height: Option<i32>,
}

impl From<models::media::ImageView> for ImageView {
    fn from(view: models::media::ImageView) -> Self {
        Self {
            url: view.url,
            width: view.width,
            height: view.height,
        }
    }
}

/// A named resized rendition of an image
#[derive(Debug, Clone, SimpleObject)]
pub struct NamedImageView {
    /// Rendition name (tiny, small, medium, large)
    pub name: String,
    /// Public URL of this rendition
    pub url: String,
    /// Pixel width, if known
    pub width: Option<i32>,
    /// Pixel height, if known
    pub height: Option<i32>,
}

/// An uploaded image with its derived renditions
#[derive(Debug, Clone, SimpleObject)]
pub struct Image {
    /// The original upload
    pub original: ImageView,
    /// Resized renditions, sorted by name
    pub views: Vec<NamedImageView>,
}

impl From<models::ImageSet> for Image {
    fn from(set: models::ImageSet) -> Self {
        let mut views: Vec<NamedImageView> = set
            .views
            .into_iter()
            .map(|(name, view)| NamedImageView {
                name,
                url: view.url,
                width: view.width,
                height: view.height,
            })
            .collect();
        views.sort_by(|a, b| a.name.cmp(&b.name));

        Self {
            original: set.original.into(),
            views,
        }
    }
}
