use super::*;

#[test]
fn decode_dedupes_and_normalizes() {
    let raw = r#"[
        {"url":"/api/api/rooms/floormaps/a.svg","filename":"a.svg","usedAt":3},
        {"url":"/api/rooms/floormaps/a.svg","filename":"a.svg","usedAt":2},
        {"url":"/api/rooms/floormaps/b.svg","filename":"b.svg"}
    ]"#;
    let recent = decode(raw);
    let urls: Vec<&str> = recent.entries().iter().map(|e| e.url.as_str()).collect();
    assert_eq!(urls, vec!["/api/rooms/floormaps/a.svg", "/api/rooms/floormaps/b.svg"]);
}

#[test]
fn corrupt_value_is_empty() {
    assert!(decode("{").is_empty());
    assert!(decode(r#"{"url":"x"}"#).is_empty());
}

#[test]
fn encoded_list_decodes_to_itself() {
    let mut recent = RecentFloorMaps::default();
    recent.push(RecentFloorMap {
        url: "/api/rooms/floormaps/c.svg".into(),
        filename: "c.svg".into(),
        title: Some("Lobby".into()),
        used_at: 10,
    });
    let raw = serde_json::to_string(&recent).unwrap();
    assert_eq!(decode(&raw), recent);
}

#[test]
fn upload_and_later_pick_share_one_entry() {
    let origin = "https://intra.example.com";
    let uploaded = UploadedFloorMap { url: "/api/rooms/floormaps/floormap-1.svg".into(), filename: "floormap-1.svg".into() };
    let mut recent = RecentFloorMaps::default();

    let url = record_upload(&mut recent, origin, &uploaded, Some("3F West".into()), 1);
    assert_eq!(url, "https://intra.example.com/api/rooms/floormaps/floormap-1.svg");

    recent.push(RecentFloorMap {
        url: reference::absolute_url(origin, "/api/api/rooms/floormaps/floormap-1.svg"),
        filename: "floormap-1.svg".into(),
        title: Some("3F West".into()),
        used_at: 2,
    });
    assert_eq!(recent.len(), 1);
    assert_eq!(recent.entries()[0].used_at, 2);
}
