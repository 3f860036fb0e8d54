//! RSS 1.0 Content module (`content:`).

xml_record! {
    pub struct ContentNamespace {
        /// Full entity-encoded or CDATA body of an item.
        encoded: String => element("content:encoded"),
    }
}
