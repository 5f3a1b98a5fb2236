use super::event::NotedAway;
use super::formatter::{format_duration, FormattedAnnotation};
use prettytable::{row, Table};

pub struct View {}

impl View {
    pub fn annotations(annotations: &[NotedAway]) {
        let mut table = Table::new();

        table.add_row(row!["ID", "START", "END", "DURATION", "MESSAGE"]);
        for (index, noted) in annotations.iter().enumerate() {
            let formatted = FormattedAnnotation::from_noted((index + 1) as i32, noted);
            table.add_row(row![formatted.id, formatted.start, formatted.end, formatted.duration, formatted.message]);
        }
        table.printstd();
    }

    pub fn overlaps(pairs: &[(&NotedAway, &NotedAway)]) {
        let mut table = Table::new();

        table.add_row(row!["#", "FIRST", "SECOND", "SHARED"]);
        for (index, (first, second)) in pairs.iter().enumerate() {
            let shared = first.interval.overlap(&second.interval);
            let first = FormattedAnnotation::from_noted(0, first);
            let second = FormattedAnnotation::from_noted(0, second);
            table.add_row(row![
                index + 1,
                format!("{} - {} {}", first.start, first.end, first.message),
                format!("{} - {} {}", second.start, second.end, second.message),
                format_duration(&shared)
            ]);
        }
        table.printstd();
    }
}
