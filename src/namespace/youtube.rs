//! YouTube channel feed extensions (`yt:`).

xml_record! {
    pub struct YouTubeNamespace {
        video_id: String => element("yt:videoId"),
        channel_id: String => element("yt:channelId"),
    }
}
