use chrono::{Datelike, Weekday};

use super::ScheduleEntry;

/// Monday-first cyclic order used for buckets and day navigation.
pub(crate) const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Fetched entries partitioned into seven weekday buckets.
///
/// Buckets hold positions into `entries`, sorted by episode timestamp with
/// fetch order kept among equal timestamps. Every position lands in exactly
/// one bucket.
#[derive(Debug, Clone, Default)]
pub(crate) struct ScheduleIndex {
    entries: Vec<ScheduleEntry>,
    buckets: [Vec<usize>; 7],
}

impl ScheduleIndex {
    pub(crate) fn build(entries: Vec<ScheduleEntry>) -> Self {
        let mut buckets: [Vec<usize>; 7] = Default::default();
        for (position, entry) in entries.iter().enumerate() {
            let day = entry.episode_date.weekday();
            buckets[day.num_days_from_monday() as usize].push(position);
        }
        for bucket in &mut buckets {
            bucket.sort_by_key(|&position| entries[position].episode_date);
        }
        Self { entries, buckets }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn entry(&self, position: usize) -> Option<&ScheduleEntry> {
        self.entries.get(position)
    }

    /// Positions scheduled on `day`, earliest first.
    pub(crate) fn positions_for(&self, day: Weekday) -> &[usize] {
        &self.buckets[day.num_days_from_monday() as usize]
    }

    pub(crate) fn entries_for(&self, day: Weekday) -> impl Iterator<Item = &ScheduleEntry> {
        self.positions_for(day)
            .iter()
            .map(|&position| &self.entries[position])
    }

    /// Every entry in fetch order.
    pub(crate) fn all_entries(&self) -> &[ScheduleEntry] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::fixtures::entry;

    fn titles<'a>(entries: impl Iterator<Item = &'a ScheduleEntry>) -> Vec<&'a str> {
        entries.map(|entry| entry.title.as_str()).collect()
    }

    fn sample() -> Vec<ScheduleEntry> {
        vec![
            // 2024-01-01 is a Monday.
            entry("Late Monday", "2024-01-01T22:00:00+00:00"),
            entry("Tuesday", "2024-01-02T09:00:00+00:00"),
            entry("Early Monday", "2024-01-01T08:00:00+00:00"),
            entry("Sunday", "2024-01-07T12:00:00+00:00"),
            entry("Tied Monday A", "2024-01-01T12:00:00+00:00"),
            entry("Tied Monday B", "2024-01-01T12:00:00+00:00"),
        ]
    }

    #[test]
    fn buckets_partition_all_entries() {
        let index = ScheduleIndex::build(sample());
        let mut seen: Vec<usize> = WEEK
            .iter()
            .flat_map(|&day| index.positions_for(day).iter().copied())
            .collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..index.len()).collect::<Vec<_>>());
    }

    #[test]
    fn buckets_are_sorted_by_timestamp_and_stable() {
        let index = ScheduleIndex::build(sample());
        assert_eq!(
            titles(index.entries_for(Weekday::Mon)),
            vec!["Early Monday", "Tied Monday A", "Tied Monday B", "Late Monday"]
        );
        for day in WEEK {
            let dates: Vec<_> = index.entries_for(day).map(|e| e.episode_date).collect();
            assert!(dates.windows(2).all(|pair| pair[0] <= pair[1]));
        }
    }

    #[test]
    fn empty_days_stay_present() {
        let index = ScheduleIndex::build(sample());
        assert!(index.positions_for(Weekday::Wed).is_empty());
        assert_eq!(titles(index.entries_for(Weekday::Sun)), vec!["Sunday"]);
    }

    #[test]
    fn weekday_follows_the_timestamp_offset() {
        // Sunday 23:30 in UTC+9 is still Sunday locally even though it is
        // Sunday 14:30 UTC; Monday 01:00 in UTC+9 is Sunday in UTC.
        let index = ScheduleIndex::build(vec![
            entry("Tokyo Monday", "2024-01-08T01:00:00+09:00"),
            entry("Tokyo Sunday", "2024-01-07T23:30:00+09:00"),
        ]);
        assert_eq!(titles(index.entries_for(Weekday::Mon)), vec!["Tokyo Monday"]);
        assert_eq!(titles(index.entries_for(Weekday::Sun)), vec!["Tokyo Sunday"]);
    }

    #[test]
    fn unset_timestamp_still_gets_a_bucket() {
        let unset: ScheduleEntry = serde_json::from_str(r#"{"title":"No date"}"#).expect("decode");
        let index = ScheduleIndex::build(vec![unset]);
        // 0001-01-01 fell on a Monday.
        assert_eq!(titles(index.entries_for(Weekday::Mon)), vec!["No date"]);
        assert!(index.positions_for(Weekday::Thu).is_empty());
    }

    #[test]
    fn all_entries_keeps_fetch_order() {
        let index = ScheduleIndex::build(sample());
        assert_eq!(
            titles(index.all_entries().iter()),
            vec![
                "Late Monday",
                "Tuesday",
                "Early Monday",
                "Sunday",
                "Tied Monday A",
                "Tied Monday B"
            ]
        );
    }

    #[test]
    fn empty_input_builds_empty_index() {
        let index = ScheduleIndex::build(Vec::new());
        assert!(index.is_empty());
        assert!(WEEK.iter().all(|&day| index.positions_for(day).is_empty()));
    }
}
