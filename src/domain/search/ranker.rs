//! Ranking of recordings, timestamps and groups against a query

use tracing::error;

use super::fuzzy::weighted_ratio;
use crate::domain::library::{RecordingData, RecordingGroup, TimeStamp};
use crate::domain::recording::{Recording, RecordingId};

/// Minimum score a candidate needs to appear in results
pub const DEFAULT_SEARCH_THRESHOLD: u8 = 35;

/// Something that can show up in search results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Searchable<'a> {
    Recording(&'a Recording),
    TimeStamp(&'a TimeStamp),
    Group(&'a RecordingGroup),
}

impl<'a> Searchable<'a> {
    /// Text the query is matched against
    pub fn display_name(&self) -> &'a str {
        match self {
            Self::Recording(r) => &r.name,
            Self::TimeStamp(t) => &t.title,
            Self::Group(g) => &g.name,
        }
    }

    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Recording(_) => "recording",
            Self::TimeStamp(_) => "timestamp",
            Self::Group(_) => "group",
        }
    }
}

/// Free-text query with an optional tag filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub text: String,
    pub tag: Option<String>,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tag: None,
        }
    }

    /// Filter by tag. The name is trimmed like attached tag names are, and
    /// a blank name means no filter.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        let tag = tag.into();
        let tag = tag.trim();
        self.tag = (!tag.is_empty()).then(|| tag.to_string());
        self
    }
}

/// A ranked result. `score` is `None` when the result was not scored
/// (blank query with a tag filter).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchHit<'a> {
    pub item: Searchable<'a>,
    pub score: Option<u8>,
}

/// Scores candidates with [`weighted_ratio`] and keeps those above a threshold
#[derive(Debug, Clone, Copy)]
pub struct SearchRanker {
    threshold: u8,
}

impl Default for SearchRanker {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_THRESHOLD)
    }
}

impl SearchRanker {
    pub fn new(threshold: u8) -> Self {
        Self {
            threshold: threshold.min(100),
        }
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    /// Run a query over the library.
    ///
    /// `data_for` resolves a recording's annotations. A recording without
    /// annotations is logged and treated as untagged with no timestamps.
    pub fn search<'a, F>(
        &self,
        query: &SearchQuery,
        recordings: &'a [Recording],
        data_for: F,
        groups: &'a [RecordingGroup],
    ) -> Vec<SearchHit<'a>>
    where
        F: Fn(&RecordingId) -> Option<&'a RecordingData>,
    {
        let lookup = |recording: &Recording| {
            let data = data_for(&recording.id);
            if data.is_none() {
                error!(recording = %recording.id, "recording has no annotation record");
            }
            data
        };

        let candidates: Vec<(&'a Recording, Option<&'a RecordingData>)> = recordings
            .iter()
            .map(|r| (r, lookup(r)))
            .filter(|(_, data)| match query.tag.as_deref() {
                Some(tag) => data.is_some_and(|d| d.has_tag(tag)),
                None => true,
            })
            .collect();

        if query.text.trim().is_empty() && query.tag.is_some() {
            return candidates
                .into_iter()
                .map(|(r, _)| SearchHit {
                    item: Searchable::Recording(r),
                    score: None,
                })
                .collect();
        }

        let timestamps = candidates
            .iter()
            .filter_map(|(_, data)| *data)
            .flat_map(|d| d.timestamps.iter().map(Searchable::TimeStamp));

        let group_candidates = groups
            .iter()
            .filter(|_| query.tag.is_none())
            .map(Searchable::Group);

        let pool = candidates
            .iter()
            .map(|(r, _)| Searchable::Recording(*r))
            .chain(timestamps)
            .chain(group_candidates);

        self.rank(&query.text, pool)
    }

    /// Score and sort arbitrary candidates, best first
    pub fn rank<'a>(
        &self,
        text: &str,
        candidates: impl IntoIterator<Item = Searchable<'a>>,
    ) -> Vec<SearchHit<'a>> {
        let mut hits: Vec<SearchHit<'a>> = candidates
            .into_iter()
            .filter_map(|item| {
                let score = weighted_ratio(text, item.display_name());
                (score >= self.threshold && score > 0).then_some(SearchHit {
                    item,
                    score: Some(score),
                })
            })
            .collect();

        hits.sort_by(|a, b| b.score.cmp(&a.score));
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::path::PathBuf;

    use chrono::Utc;

    use crate::domain::library::{GroupId, Tag};
    use crate::domain::recording::Duration;

    fn recording(name: &str) -> Recording {
        Recording {
            id: RecordingId::new(format!("file:///rec/{}", name)),
            name: name.to_string(),
            duration: Duration::from_secs(1),
            size: 10,
            date: Utc::now(),
            path: PathBuf::from(format!("/rec/{}", name)),
        }
    }

    fn names<'a>(hits: &[SearchHit<'a>]) -> Vec<&'a str> {
        hits.iter().map(|h| h.item.display_name()).collect()
    }

    struct Fixture {
        recordings: Vec<Recording>,
        data: HashMap<RecordingId, RecordingData>,
        groups: Vec<RecordingGroup>,
    }

    impl Fixture {
        fn new(names: &[&str]) -> Self {
            let recordings: Vec<Recording> = names.iter().map(|n| recording(n)).collect();
            let data = recordings
                .iter()
                .map(|r| (r.id.clone(), RecordingData::new(r.id.clone())))
                .collect();
            Self {
                recordings,
                data,
                groups: Vec::new(),
            }
        }

        fn tag(&mut self, index: usize, tag: &str) {
            let id = self.recordings[index].id.clone();
            self.data.get_mut(&id).unwrap().add_tag(Tag::new(tag));
        }

        fn search(&self, query: &SearchQuery) -> Vec<SearchHit<'_>> {
            SearchRanker::default().search(
                query,
                &self.recordings,
                |id| self.data.get(id),
                &self.groups,
            )
        }
    }

    #[test]
    fn closer_names_rank_first() {
        let fixture = Fixture::new(&["Grocery List", "Meeting Notes", "Meeting"]);
        let hits = fixture.search(&SearchQuery::new("meeting"));
        let found = names(&hits);

        assert_eq!(found[0], "Meeting");
        assert_eq!(found[1], "Meeting Notes");
        if let Some(pos) = found.iter().position(|n| *n == "Grocery List") {
            assert!(pos > 1);
        }
    }

    #[test]
    fn blank_query_with_tag_returns_tagged_recordings_unscored() {
        let mut fixture = Fixture::new(&["a", "b", "c"]);
        fixture.tag(0, "demo");
        fixture.tag(2, "demo");
        fixture.tag(1, "other");

        let hits = fixture.search(&SearchQuery::new("  ").with_tag("demo"));
        let mut found = names(&hits);
        found.sort_unstable();
        assert_eq!(found, vec!["a", "c"]);
        assert!(hits.iter().all(|h| h.score.is_none()));
    }

    #[test]
    fn tag_filter_is_trimmed() {
        let mut fixture = Fixture::new(&["a", "b"]);
        fixture.tag(1, "work");

        let hits = fixture.search(&SearchQuery::new("").with_tag(" work "));
        assert_eq!(names(&hits), vec!["b"]);

        assert_eq!(SearchQuery::new("x").with_tag("   ").tag, None);
    }

    #[test]
    fn blank_query_without_tag_finds_nothing() {
        let fixture = Fixture::new(&["a", "b"]);
        assert!(fixture.search(&SearchQuery::new("")).is_empty());
    }

    #[test]
    fn timestamps_are_searched_by_title() {
        let mut fixture = Fixture::new(&["Lecture"]);
        let id = fixture.recordings[0].id.clone();
        fixture.data.get_mut(&id).unwrap().add_timestamp(TimeStamp::new(
            Duration::from_secs(30),
            "Quarterly budget",
            None,
            "Lecture",
            id.clone(),
        ));

        let hits = fixture.search(&SearchQuery::new("budget"));
        assert_eq!(hits.len(), 1);
        assert!(matches!(hits[0].item, Searchable::TimeStamp(_)));
    }

    #[test]
    fn groups_only_searched_without_tag_filter() {
        let mut fixture = Fixture::new(&["Unrelated"]);
        fixture.tag(0, "demo");
        fixture
            .groups
            .push(RecordingGroup::new(GroupId::random(), "Podcast", "#000000"));

        let unfiltered = fixture.search(&SearchQuery::new("podcast"));
        assert!(matches!(unfiltered[0].item, Searchable::Group(_)));

        let filtered = fixture.search(&SearchQuery::new("podcast").with_tag("demo"));
        assert!(filtered.iter().all(|h| !matches!(h.item, Searchable::Group(_))));
    }

    #[test]
    fn tag_filter_limits_recordings_and_their_timestamps() {
        let mut fixture = Fixture::new(&["Meeting one", "Meeting two"]);
        fixture.tag(1, "work");

        let hits = fixture.search(&SearchQuery::new("meeting").with_tag("work"));
        assert_eq!(names(&hits), vec!["Meeting two"]);
    }

    #[test]
    fn missing_annotations_do_not_panic() {
        let mut fixture = Fixture::new(&["Meeting"]);
        fixture.data.clear();

        assert_eq!(fixture.search(&SearchQuery::new("meeting")).len(), 1);
        assert!(fixture
            .search(&SearchQuery::new("meeting").with_tag("x"))
            .is_empty());
    }

    #[test]
    fn threshold_filters_weak_matches() {
        let strict = SearchRanker::new(100);
        let recordings = [recording("Meeting Notes")];
        let hits = strict.rank("meeting", recordings.iter().map(Searchable::Recording));
        assert!(hits.is_empty());
    }
}
