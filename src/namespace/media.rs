//! Media RSS (`media:`), as used by podcasts, photo feeds and YouTube.
//!
//! Most tags are a [`NamespacedElement`] over a small attribute record; the
//! few with real structure (`media:content`, `media:group`,
//! `media:community`, `media:location`) are records of their own.

use super::georss::GeoRssWhere;
use crate::xml::NamespacedElement;

// ============================================================================
// Attribute Records
// ============================================================================

xml_record! {
    /// `type="plain"` or `type="html"` on title/description.
    pub struct MediaTextTypeAttributes {
        text_type: String => attr("type"),
    }
}

xml_record! {
    pub struct MediaSchemeAttributes {
        scheme: String => attr("scheme"),
    }
}

xml_record! {
    pub struct MediaThumbnailAttributes {
        url: String => attr("url"),
        height: u32 => attr("height"),
        width: u32 => attr("width"),
        /// NTP offset into the media, e.g. `12:05:01.123`.
        time: String => attr("time"),
    }
}

xml_record! {
    pub struct MediaCategoryAttributes {
        scheme: String => attr("scheme"),
        label: String => attr("label"),
    }
}

xml_record! {
    pub struct MediaHashAttributes {
        /// `md5` or `sha-1`.
        algo: String => attr("algo"),
    }
}

xml_record! {
    pub struct MediaPlayerAttributes {
        url: String => attr("url"),
        height: u32 => attr("height"),
        width: u32 => attr("width"),
    }
}

xml_record! {
    pub struct MediaCreditAttributes {
        role: String => attr("role"),
        scheme: String => attr("scheme"),
    }
}

xml_record! {
    pub struct MediaCopyrightAttributes {
        url: String => attr("url"),
    }
}

xml_record! {
    pub struct MediaTextAttributes {
        text_type: String => attr("type"),
        lang: String => attr("lang"),
        start: String => attr("start"),
        end: String => attr("end"),
    }
}

xml_record! {
    pub struct MediaRestrictionAttributes {
        /// `allow` or `deny`.
        relationship: String => attr("relationship"),
        /// `country`, `uri` or `sharing`.
        restriction_type: String => attr("type"),
    }
}

xml_record! {
    pub struct MediaStarRatingAttributes {
        average: f64 => attr("average"),
        count: u64 => attr("count"),
        min: u32 => attr("min"),
        max: u32 => attr("max"),
    }
}

xml_record! {
    pub struct MediaStatisticsAttributes {
        views: u64 => attr("views"),
        favorites: u64 => attr("favorites"),
    }
}

xml_record! {
    pub struct MediaStatusAttributes {
        /// `active`, `blocked` or `deleted`.
        state: String => attr("state"),
        reason: String => attr("reason"),
    }
}

xml_record! {
    pub struct MediaPriceAttributes {
        /// `rent`, `purchase`, `package` or `subscription`.
        price_type: String => attr("type"),
        info: String => attr("info"),
        price: f64 => attr("price"),
        currency: String => attr("currency"),
    }
}

xml_record! {
    /// Shared by `media:license` and `media:peerLink`.
    pub struct MediaLinkAttributes {
        link_type: String => attr("type"),
        href: String => attr("href"),
    }
}

xml_record! {
    pub struct MediaSubTitleAttributes {
        subtitle_type: String => attr("type"),
        lang: String => attr("lang"),
        href: String => attr("href"),
    }
}

pub type MediaTitle = NamespacedElement<MediaTextTypeAttributes>;
pub type MediaDescription = NamespacedElement<MediaTextTypeAttributes>;
pub type MediaRating = NamespacedElement<MediaSchemeAttributes>;
pub type MediaThumbnail = NamespacedElement<MediaThumbnailAttributes>;
pub type MediaCategory = NamespacedElement<MediaCategoryAttributes>;
pub type MediaHash = NamespacedElement<MediaHashAttributes>;
pub type MediaPlayer = NamespacedElement<MediaPlayerAttributes>;
pub type MediaCredit = NamespacedElement<MediaCreditAttributes>;
pub type MediaCopyright = NamespacedElement<MediaCopyrightAttributes>;
pub type MediaText = NamespacedElement<MediaTextAttributes>;
pub type MediaRestriction = NamespacedElement<MediaRestrictionAttributes>;
pub type MediaStarRating = NamespacedElement<MediaStarRatingAttributes>;
pub type MediaStatistics = NamespacedElement<MediaStatisticsAttributes>;
pub type MediaStatus = NamespacedElement<MediaStatusAttributes>;
pub type MediaPrice = NamespacedElement<MediaPriceAttributes>;
pub type MediaLicense = NamespacedElement<MediaLinkAttributes>;
pub type MediaPeerLink = NamespacedElement<MediaLinkAttributes>;
pub type MediaSubTitle = NamespacedElement<MediaSubTitleAttributes>;

// ============================================================================
// Structured Elements
// ============================================================================

xml_record! {
    /// `<media:content>`: one media object and its optional per-object
    /// metadata.
    pub struct MediaContent {
        url: String => attr("url"),
        file_size: u64 => attr("fileSize"),
        /// MIME type.
        content_type: String => attr("type"),
        /// `image`, `audio`, `video`, `document` or `executable`.
        medium: String => attr("medium"),
        is_default: bool => attr("isDefault"),
        /// `sample`, `full` or `nonstop`.
        expression: String => attr("expression"),
        bitrate: u64 => attr("bitrate"),
        framerate: f64 => attr("framerate"),
        samplingrate: f64 => attr("samplingrate"),
        channels: u32 => attr("channels"),
        /// Seconds.
        duration: u64 => attr("duration"),
        height: u32 => attr("height"),
        width: u32 => attr("width"),
        lang: String => attr("lang"),
        title: MediaTitle => child("media:title"),
        description: MediaDescription => child("media:description"),
        keywords: String => element("media:keywords"),
        thumbnails: MediaThumbnail => children("media:thumbnail"),
        categories: MediaCategory => children("media:category"),
        player: MediaPlayer => child("media:player"),
        credits: MediaCredit => children("media:credit"),
        ratings: MediaRating => children("media:rating"),
    }
}

xml_record! {
    pub struct MediaCommunity {
        star_rating: MediaStarRating => child("media:starRating"),
        statistics: MediaStatistics => child("media:statistics"),
        /// Comma-separated `tag:weight` pairs.
        tags: String => element("media:tags"),
    }
}

xml_record! {
    pub struct MediaComments {
        comments: String => elements("media:comment"),
    }
}

xml_record! {
    pub struct MediaLocation {
        description: String => attr("description"),
        start: String => attr("start"),
        end: String => attr("end"),
        geo_rss: GeoRssWhere => child("georss:where"),
    }
}

xml_record! {
    /// `<media:group>`: alternate encodings of the same media object.
    pub struct MediaGroup {
        contents: MediaContent => children("media:content"),
        title: MediaTitle => child("media:title"),
        description: MediaDescription => child("media:description"),
        keywords: String => element("media:keywords"),
        thumbnails: MediaThumbnail => children("media:thumbnail"),
        categories: MediaCategory => children("media:category"),
        player: MediaPlayer => child("media:player"),
        credits: MediaCredit => children("media:credit"),
        ratings: MediaRating => children("media:rating"),
        community: MediaCommunity => child("media:community"),
    }
}

xml_record! {
    /// Every Media RSS tag that may appear directly on an item or entry.
    pub struct MediaNamespace {
        group: MediaGroup => child("media:group"),
        contents: MediaContent => children("media:content"),
        ratings: MediaRating => children("media:rating"),
        title: MediaTitle => child("media:title"),
        description: MediaDescription => child("media:description"),
        keywords: String => element("media:keywords"),
        thumbnails: MediaThumbnail => children("media:thumbnail"),
        categories: MediaCategory => children("media:category"),
        hash: MediaHash => child("media:hash"),
        player: MediaPlayer => child("media:player"),
        credits: MediaCredit => children("media:credit"),
        copyright: MediaCopyright => child("media:copyright"),
        texts: MediaText => children("media:text"),
        restriction: MediaRestriction => child("media:restriction"),
        community: MediaCommunity => child("media:community"),
        comments: MediaComments => child("media:comments"),
        status: MediaStatus => child("media:status"),
        prices: MediaPrice => children("media:price"),
        license: MediaLicense => child("media:license"),
        peer_link: MediaPeerLink => child("media:peerLink"),
        location: MediaLocation => child("media:location"),
        subtitles: MediaSubTitle => children("media:subTitle"),
    }
}
