//! Image extraction for crawl targets.
//!
//! [`ImageExtractor`] is the pluggable seam: the crawl scheduler hands it one
//! target at a time and appends whatever it returns. The bundled
//! [`PlaceholderExtractor`] does not fetch pages; it synthesises a few
//! placeholder image URLs per target so the pipeline can be exercised end to
//! end.

use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use rand::Rng;

use crate::error::Result;
use crate::image::{CrawlTarget, ImageDescriptor};

/// Icon used when a target carries no icon tag of its own.
pub const FALLBACK_ICON: &str = "🖼️";

/// Produces images for a single crawl target.
#[async_trait]
pub trait ImageExtractor: Send + Sync {
    /// Extract images from `target`.
    ///
    /// # Errors
    ///
    /// Any error is treated by the scheduler as "no images from this target".
    async fn extract(&self, target: &CrawlTarget) -> Result<Vec<ImageDescriptor>>;
}

/// Placeholder image hosts, cycled per image index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlaceholderHost {
    Picsum,
    ViaPlaceholder,
    PlaceholdCo,
}

impl PlaceholderHost {
    const CYCLE: [PlaceholderHost; 3] = [
        PlaceholderHost::Picsum,
        PlaceholderHost::ViaPlaceholder,
        PlaceholderHost::PlaceholdCo,
    ];

    fn image_url(self, size: u32, text: &str, stamp: u128, index: usize) -> String {
        match self {
            PlaceholderHost::Picsum => {
                format!("https://picsum.photos/{size}/{size}?random={stamp}-{index}")
            }
            PlaceholderHost::ViaPlaceholder => {
                format!("https://via.placeholder.com/{size}x{size}/667eea/ffffff?text={text}")
            }
            PlaceholderHost::PlaceholdCo => {
                format!("https://placehold.co/{size}x{size}/764ba2/ffffff/png?text={text}")
            }
        }
    }
}

/// Synthesises 1 to 4 placeholder images per target.
#[derive(Debug, Clone, Default)]
pub struct PlaceholderExtractor {
    image_count: Option<usize>,
}

impl PlaceholderExtractor {
    /// Most images produced for one target.
    pub const MAX_IMAGES: usize = 4;

    /// Extractor producing a random count of images per target.
    pub fn new() -> Self {
        Self::default()
    }

    /// Extractor producing exactly `count` images per target, clamped to
    /// `1..=4`.
    pub fn with_image_count(count: usize) -> Self {
        Self {
            image_count: Some(count.clamp(1, Self::MAX_IMAGES)),
        }
    }

    fn image_count(&self) -> usize {
        self.image_count
            .unwrap_or_else(|| rand::thread_rng().gen_range(1..=Self::MAX_IMAGES))
    }

    /// Build the descriptors for `target` synchronously.
    pub fn placeholders(&self, target: &CrawlTarget) -> Vec<ImageDescriptor> {
        let count = self.image_count();
        let text = urlencoding::encode(&target.source);
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        let icon_tag = if target.icon_tag.is_empty() {
            FALLBACK_ICON.to_owned()
        } else {
            target.icon_tag.clone()
        };

        (0..count)
            .map(|index| {
                let size = 300 + 50 * index as u32;
                let host = PlaceholderHost::CYCLE[index % PlaceholderHost::CYCLE.len()];
                ImageDescriptor {
                    url: host.image_url(size, &text, stamp, index),
                    title: format!("Image from {}", target.title),
                    source: target.source.clone(),
                    source_url: target.url.clone(),
                    icon_tag: icon_tag.clone(),
                }
            })
            .collect()
    }
}

#[async_trait]
impl ImageExtractor for PlaceholderExtractor {
    async fn extract(&self, target: &CrawlTarget) -> Result<Vec<ImageDescriptor>> {
        let images = self.placeholders(target);
        tracing::debug!(
            source = %target.source,
            count = images.len(),
            "placeholder images generated"
        );
        Ok(images)
    }
}
