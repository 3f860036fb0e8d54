//! RSS 1.0 Syndication module (`sy:`): how often a channel is refreshed.

use chrono::{DateTime, FixedOffset};

xml_record! {
    pub struct SyndicationNamespace {
        /// `hourly`, `daily`, `weekly`, `monthly` or `yearly`.
        update_period: String => element("sy:updatePeriod"),
        /// Updates per period.
        update_frequency: u32 => element("sy:updateFrequency"),
        update_base: DateTime<FixedOffset> => element("sy:updateBase"),
    }
}
