use crate::model::{Track, TrackId};

/// The play history doubling as a navigation queue. `position` is either
/// `None` or the index of an entry whose id equals the current track's id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryQueue {
    tracks: Vec<Track>,
    position: Option<usize>,
}

impl HistoryQueue {
    pub fn new(tracks: Vec<Track>, current: Option<&TrackId>) -> Self {
        let mut queue = Self {
            tracks,
            position: None,
        };
        queue.sync_position(current);
        queue
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn position(&self) -> Option<usize> {
        self.position
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// Swaps in a freshly fetched history and re-locates the current track.
    pub fn replace(&mut self, tracks: Vec<Track>, current: Option<&TrackId>) {
        self.tracks = tracks;
        self.sync_position(current);
    }

    pub fn sync_position(&mut self, current: Option<&TrackId>) {
        self.position = current.and_then(|id| self.tracks.iter().position(|t| &t.id == id));
    }

    /// Moves `track` to the end of the queue, as the most recent play.
    pub fn push_recent(&mut self, track: Track) {
        self.tracks.retain(|t| t.id != track.id);
        self.tracks.push(track);
        self.position = Some(self.tracks.len() - 1);
    }

    pub fn clear(&mut self) {
        self.tracks.clear();
        self.position = None;
    }

    pub fn next_index(&self) -> Option<usize> {
        if self.tracks.is_empty() {
            return None;
        }
        match self.position {
            Some(index) if index + 1 < self.tracks.len() => Some(index + 1),
            _ => Some(0),
        }
    }

    pub fn previous_index(&self) -> Option<usize> {
        if self.tracks.is_empty() {
            return None;
        }
        match self.position {
            Some(index) if index > 0 && index < self.tracks.len() => Some(index - 1),
            _ => Some(self.tracks.len() - 1),
        }
    }

    pub fn next_track(&self) -> Option<&Track> {
        self.next_index().and_then(|index| self.tracks.get(index))
    }

    pub fn previous_track(&self) -> Option<&Track> {
        self.previous_index().and_then(|index| self.tracks.get(index))
    }
}
