use std::io::{self, Write};

use triage_core::{CategoryBarView, ConversationView, MessageRowView};

const BAR_WIDTH: usize = 24;

pub fn print_welcome(out: &mut impl Write, base_url: &str) -> io::Result<()> {
    writeln!(out, "Triage — document and text classification")?;
    writeln!(out, "Service: {base_url}")?;
    writeln!(
        out,
        "Type a message and press Enter to classify it. Commands: /attach <path>, /detach, /quit"
    )
}

pub fn print_conversation(out: &mut impl Write, view: &ConversationView) -> io::Result<()> {
    writeln!(out)?;
    for row in &view.rows {
        print_row(out, row)?;
    }
    if let Some(name) = &view.pending_file_name {
        writeln!(out, "(attached: {name})")?;
    }
    Ok(())
}

fn print_row(out: &mut impl Write, row: &MessageRowView) -> io::Result<()> {
    if row.from_user {
        return writeln!(out, "You: {}", row.text);
    }
    if row.loading {
        return writeln!(out, "Triage: waiting for the service...");
    }
    if let Some(error) = &row.error {
        return writeln!(out, "Triage: {error}");
    }
    writeln!(out, "Triage:")?;
    for category in &row.categories {
        writeln!(out, "{}", category_line(category))?;
    }
    Ok(())
}

fn category_line(category: &CategoryBarView) -> String {
    format!(
        "  {:<20} {:>6.1}%  [{}]",
        category.name,
        category.probability,
        bar(category.fill_percent)
    )
}

fn bar(fill_percent: f64) -> String {
    let filled = ((fill_percent / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!("{}{}", "#".repeat(filled), " ".repeat(BAR_WIDTH - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_is_empty_at_zero_and_full_at_hundred() {
        assert_eq!(bar(0.0), " ".repeat(BAR_WIDTH));
        assert_eq!(bar(100.0), "#".repeat(BAR_WIDTH));
    }

    #[test]
    fn bar_is_proportional_in_between() {
        let half = bar(50.0);
        assert_eq!(half.matches('#').count(), BAR_WIDTH / 2);
        assert_eq!(half.len(), BAR_WIDTH);
    }

    #[test]
    fn category_line_shows_name_and_probability() {
        let line = category_line(&CategoryBarView {
            name: "Care".to_string(),
            probability: 72.5,
            fill_percent: 72.5,
        });

        assert!(line.contains("Care"));
        assert!(line.contains("72.5%"));
    }
}
