//! Dublin Core Metadata Element Set, version 1.1 (`dc:`).

use chrono::{DateTime, FixedOffset};

xml_record! {
    /// The fifteen `dc:` elements, as they appear on a channel or an item.
    pub struct DublinCoreNamespace {
        title: String => element("dc:title"),
        creator: String => element("dc:creator"),
        subject: String => element("dc:subject"),
        description: String => element("dc:description"),
        publisher: String => element("dc:publisher"),
        contributor: String => element("dc:contributor"),
        date: DateTime<FixedOffset> => element("dc:date"),
        /// `dc:type`
        resource_type: String => element("dc:type"),
        format: String => element("dc:format"),
        identifier: String => element("dc:identifier"),
        source: String => element("dc:source"),
        language: String => element("dc:language"),
        relation: String => element("dc:relation"),
        coverage: String => element("dc:coverage"),
        rights: String => element("dc:rights"),
    }
}
