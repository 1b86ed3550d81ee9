//! Timeline filter: fade artifacts created after a chosen date.

use chrono::{Duration, NaiveDate};

use crate::models::Artifact;

/// Opacity of artifacts hidden by the timeline.
pub const FADED_OPACITY: f32 = 0.15;

/// Earliest and latest parseable creation dates.
pub fn date_range<'a>(
    artifacts: impl IntoIterator<Item = &'a Artifact>,
) -> Option<(NaiveDate, NaiveDate)> {
    let mut dates = artifacts.into_iter().filter_map(Artifact::created_date);
    let first = dates.next()?;
    Some(dates.fold((first, first), |(min, max), d| (min.min(d), max.max(d))))
}

/// Current cut-off date; `None` shows everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timeline {
    cutoff: Option<NaiveDate>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cutoff(&self) -> Option<NaiveDate> {
        self.cutoff
    }

    /// Position the slider at `percent` (0 to 100) of the artifacts' date range.
    ///
    /// `None` turns the filter off. With no parseable dates the filter stays off.
    pub fn set_percent<'a>(
        &mut self,
        artifacts: impl IntoIterator<Item = &'a Artifact>,
        percent: Option<f32>,
    ) {
        self.cutoff = percent.and_then(|p| {
            let (min, max) = date_range(artifacts)?;
            let span = (max - min).num_days() as f32;
            let offset = (span * p.clamp(0.0, 100.0) / 100.0).floor() as i64;
            Some(min + Duration::days(offset))
        });
        tracing::debug!(cutoff = ?self.cutoff, "Timeline updated");
    }

    /// Artifacts with an unparseable creation date are always visible. They
    /// sit outside the date range entirely, so no cut-off position ever
    /// fades them, not even 0%.
    pub fn is_visible(&self, artifact: &Artifact) -> bool {
        match (self.cutoff, artifact.created_date()) {
            (Some(cutoff), Some(created)) => created <= cutoff,
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ArtifactType;

    fn artifact(id: &str, created: &str) -> Artifact {
        Artifact {
            id: id.to_string(),
            title: id.to_string(),
            kind: ArtifactType::Note,
            focus: vec![],
            status: String::new(),
            created: created.to_string(),
            revisited: None,
            media: None,
            url: String::new(),
        }
    }

    fn set() -> Vec<Artifact> {
        vec![
            artifact("old", "2024-01-01"),
            artifact("mid", "2024-01-11"),
            artifact("new", "2024-01-21"),
            artifact("undated", "someday"),
        ]
    }

    #[test]
    fn test_date_range_ignores_bad_dates() {
        let (min, max) = date_range(&set()).unwrap();
        assert_eq!(min, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(max, NaiveDate::from_ymd_opt(2024, 1, 21).unwrap());
        assert_eq!(date_range(&[artifact("x", "nope")]), None);
    }

    #[test]
    fn test_half_way_hides_newer() {
        let artifacts = set();
        let mut timeline = Timeline::new();
        timeline.set_percent(&artifacts, Some(50.0));
        assert_eq!(timeline.cutoff(), NaiveDate::from_ymd_opt(2024, 1, 11));
        let visible: Vec<bool> = artifacts.iter().map(|a| timeline.is_visible(a)).collect();
        assert_eq!(visible, vec![true, true, false, true]);
    }

    #[test]
    fn test_full_range_and_off_show_all() {
        let artifacts = set();
        let mut timeline = Timeline::new();
        timeline.set_percent(&artifacts, Some(100.0));
        assert!(artifacts.iter().all(|a| timeline.is_visible(a)));
        timeline.set_percent(&artifacts, None);
        assert_eq!(timeline.cutoff(), None);
    }

    #[test]
    fn test_zero_percent_keeps_earliest() {
        let artifacts = set();
        let mut timeline = Timeline::new();
        timeline.set_percent(&artifacts, Some(0.0));
        assert!(timeline.is_visible(&artifacts[0]));
        assert!(!timeline.is_visible(&artifacts[1]));
    }

    #[test]
    fn test_undated_never_faded() {
        let artifacts = set();
        let mut timeline = Timeline::new();
        for percent in [0.0, 25.0, 50.0, 100.0] {
            timeline.set_percent(&artifacts, Some(percent));
            assert!(timeline.is_visible(&artifacts[3]), "faded at {percent}%");
        }
    }
}
