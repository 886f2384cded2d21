use crate::model::{Track, TrackId};

pub const PLACEHOLDER_IMAGES: [&str; 4] = [
    "/icons/music/default1.svg",
    "/icons/music/default2.svg",
    "/icons/music/default3.svg",
    "/icons/music/default4.svg",
];

/// Picks the placeholder for `id`. The same id always maps to the same image.
pub fn placeholder_for(id: &TrackId) -> &'static str {
    let len = PLACEHOLDER_IMAGES.len() as u64;
    let index = match id.as_numeric() {
        Some(numeric) => numeric.unsigned_abs() % len,
        None => {
            let sum = id
                .to_string()
                .bytes()
                .fold(0u64, |acc, b| acc.wrapping_add(b as u64));
            sum % len
        }
    };
    PLACEHOLDER_IMAGES[index as usize]
}

pub fn assign_placeholder_image(mut track: Track) -> Track {
    let has_cover = track
        .cover_url
        .as_deref()
        .is_some_and(|url| !url.trim().is_empty());
    if !has_cover {
        track.cover_url = Some(placeholder_for(&track.id).to_string());
    }
    track
}

pub fn assign_placeholder_images(tracks: Vec<Track>) -> Vec<Track> {
    tracks.into_iter().map(assign_placeholder_image).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_ids_cycle_through_placeholders() {
        assert_eq!(placeholder_for(&TrackId::Numeric(0)), PLACEHOLDER_IMAGES[0]);
        assert_eq!(placeholder_for(&TrackId::Numeric(5)), PLACEHOLDER_IMAGES[1]);
        assert_eq!(placeholder_for(&TrackId::Numeric(-7)), PLACEHOLDER_IMAGES[3]);
    }

    #[test]
    fn assignment_is_stable_for_text_ids() {
        let id = TrackId::from("track-abc");
        assert_eq!(placeholder_for(&id), placeholder_for(&id.clone()));
    }

    #[test]
    fn existing_cover_is_kept() {
        let track = Track::new(3_i64).with_cover_url("https://img/3.png");
        let track = assign_placeholder_image(track);
        assert_eq!(track.cover_url.as_deref(), Some("https://img/3.png"));
    }

    #[test]
    fn empty_cover_is_replaced() {
        let tracks = assign_placeholder_images(vec![
            Track::new(2_i64).with_cover_url(""),
            Track::new(6_i64),
        ]);
        assert_eq!(tracks[0].cover_url.as_deref(), Some(PLACEHOLDER_IMAGES[2]));
        assert_eq!(tracks[1].cover_url.as_deref(), Some(PLACEHOLDER_IMAGES[2]));
    }
}
