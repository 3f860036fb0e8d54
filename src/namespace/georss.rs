//! GeoRSS (`georss:`) and the GML point profile (`gml:`) it wraps.

use crate::xml::NamespacedElement;

xml_record! {
    pub struct GmlPositionAttributes {
        srs_dimension: u8 => attr("srsDimension"),
    }
}

/// Space-separated coordinates, e.g. `45.256 -71.92`.
pub type GmlPosition = NamespacedElement<GmlPositionAttributes>;

xml_record! {
    pub struct GmlPoint {
        id: String => attr("gml:id"),
        srs_name: String => attr("srsName"),
        srs_dimension: u8 => attr("srsDimension"),
        pos: GmlPosition => child("gml:pos"),
    }
}

xml_record! {
    /// `<georss:where>`: either the simple `georss:point` encoding or a GML
    /// point.
    pub struct GeoRssWhere {
        point: String => element("georss:point"),
        gml_point: GmlPoint => child("gml:Point"),
    }
}
